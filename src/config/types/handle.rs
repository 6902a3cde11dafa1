//! Shared redirect table with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic table replacement, so a
//! request always resolves against one complete table even while the
//! config file is being reloaded.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use arc_swap::ArcSwap;

use crate::config::RedirectConfig;
use crate::redirect::{Preset, RedirectTable};

/// Current table plus what is needed to rebuild it from disk.
#[derive(Debug)]
pub struct TableHandle {
    current: ArcSwap<RedirectTable>,
    /// Hash of the config file content the current table was built from.
    hash: AtomicU64,
    config_path: PathBuf,
    /// `--preset` given on the command line, applied on every reload.
    preset_override: Option<Preset>,
}

impl TableHandle {
    pub fn new(config: &RedirectConfig, table: RedirectTable) -> Self {
        let hash = fs::read(&config.config_path)
            .map(|content| crate::utils::hash::compute(&content))
            .unwrap_or(0);

        Self {
            current: ArcSwap::from_pointee(table),
            hash: AtomicU64::new(hash),
            config_path: config.config_path.clone(),
            preset_override: config.cli.and_then(|cli| cli.preset),
        }
    }

    /// Snapshot of the current table.
    #[inline]
    pub fn load(&self) -> Arc<RedirectTable> {
        self.current.load_full()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Rebuild the table from disk if the config content changed.
    ///
    /// Returns `Ok(true)` if the table was replaced, `Ok(false)` if the file
    /// is unchanged. On error the current table stays in place.
    pub fn reload(&self) -> Result<bool> {
        let content = fs::read_to_string(&self.config_path)?;
        let new_hash = crate::utils::hash::compute(content.as_bytes());
        if new_hash == self.hash.load(Ordering::Relaxed) {
            return Ok(false);
        }

        let mut config = RedirectConfig::from_str(&content)?;
        if self.preset_override.is_some() {
            config.preset = self.preset_override;
        }
        let table = config.checked_table()?;

        self.current.store(Arc::new(table));
        self.hash.store(new_hash, Ordering::Relaxed);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIRST: &str = "[target]\nhost = \"https://one.example/\"\n";
    const SECOND: &str = "[target]\nhost = \"https://two.example/\"\n";

    fn handle_for(path: &Path) -> TableHandle {
        let config = RedirectConfig {
            config_path: path.to_path_buf(),
            ..RedirectConfig::from_str(&fs::read_to_string(path).unwrap()).unwrap()
        };
        let table = config.table().unwrap();
        TableHandle::new(&config, table)
    }

    #[test]
    fn test_reload_unchanged() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("redirect.toml");
        fs::write(&path, FIRST).unwrap();

        let handle = handle_for(&path);
        assert!(!handle.reload().unwrap());
        assert_eq!(handle.load().target.host, "https://one.example/");
    }

    #[test]
    fn test_reload_swaps_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("redirect.toml");
        fs::write(&path, FIRST).unwrap();

        let handle = handle_for(&path);
        let before = handle.load();

        fs::write(&path, SECOND).unwrap();
        assert!(handle.reload().unwrap());
        assert_eq!(handle.load().target.host, "https://two.example/");
        // Earlier snapshots are unaffected
        assert_eq!(before.target.host, "https://one.example/");
    }

    #[test]
    fn test_reload_keeps_table_on_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("redirect.toml");
        fs::write(&path, FIRST).unwrap();

        let handle = handle_for(&path);

        fs::write(&path, "[target\nhost = ").unwrap();
        assert!(handle.reload().is_err());

        fs::write(&path, "[target]\nhost = \"not a url\"\n").unwrap();
        assert!(handle.reload().is_err());

        assert_eq!(handle.load().target.host, "https://one.example/");
    }
}
