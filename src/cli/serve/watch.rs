//! Config file watcher for hot table reload.
//!
//! Watches the directory holding the config file (editors often replace the
//! file instead of writing in place), debounces bursts of events, then asks
//! the [`TableHandle`] to rebuild. A failed rebuild keeps the old table.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::TableHandle;
use crate::logger::{status_error, status_success, status_unchanged};
use crate::{debug, log};

/// Quiet period after the last event before reloading.
const DEBOUNCE_MS: u64 = 150;

/// Watches one config file and reloads the table on change.
pub struct ConfigWatcher {
    events: Receiver<notify::Event>,
    /// Watcher handle (must be kept alive)
    _watcher: RecommendedWatcher,
    config_path: PathBuf,
    tables: Arc<TableHandle>,
}

impl ConfigWatcher {
    pub fn new(tables: Arc<TableHandle>) -> Result<Self> {
        let config_path = tables.config_path().to_path_buf();
        let dir = config_path
            .parent()
            .context("config file has no parent directory")?;

        let (tx, events) = channel::unbounded();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    let _ = tx.send(event);
                }
                Err(e) => log!("watch"; "notify error: {}", e),
            }
        })?;
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch {}", dir.display()))?;

        Ok(Self {
            events,
            _watcher: watcher,
            config_path,
            tables,
        })
    }

    /// Run until a shutdown signal arrives.
    pub fn run(self, shutdown: Receiver<()>) {
        let mut debouncer = Debouncer::default();
        let name = display_name(&self.config_path);
        log!("reload"; "watching {}", name);

        loop {
            crossbeam::select! {
                recv(shutdown) -> _ => break,
                recv(self.events) -> event => match event {
                    Ok(event) if touches(&event, &self.config_path) => {
                        debug!("watch"; "{:?} {}", event.kind, name);
                        debouncer.touch();
                    }
                    Ok(_) => {}
                    Err(_) => break,
                },
                default(debouncer.sleep_duration()) => {
                    if debouncer.take_if_ready() {
                        self.reload(&name);
                    }
                }
            }
        }
    }

    fn reload(&self, name: &str) {
        match self.tables.reload() {
            Ok(true) => {
                let stats = self.tables.load().stats();
                status_success(&format!(
                    "reloaded {name} ({} excluded, {} docs, {} blog)",
                    stats.excluded, stats.docs_overrides, stats.blog_overrides
                ));
            }
            Ok(false) => status_unchanged(&format!("{name} unchanged")),
            Err(e) => status_error(
                &format!("reload of {name} failed, keeping previous table"),
                &format!("{e:#}"),
            ),
        }
    }
}

/// Whether an event changes the content of `path`.
fn touches(event: &notify::Event, path: &Path) -> bool {
    let relevant = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        // Ignore metadata-only changes (mtime/atime/chmod noise)
        EventKind::Modify(modify) => !matches!(modify, notify::event::ModifyKind::Metadata(_)),
        _ => false,
    };
    relevant && event.paths.iter().any(|p| p.file_name() == path.file_name())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Pure debouncer: only tracks timing.
#[derive(Debug, Default)]
struct Debouncer {
    last_event: Option<Instant>,
}

impl Debouncer {
    fn touch(&mut self) {
        self.last_event = Some(Instant::now());
    }

    fn is_ready(&self) -> bool {
        self.last_event
            .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take_if_ready(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.last_event = None;
        true
    }

    /// Precise sleep duration until next possible ready time.
    fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };
        Duration::from_millis(DEBOUNCE_MS)
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}
