//! `emit` command: static deployments of a redirect table.
//!
//! - `script`: the client-side redirect script, for legacy pages that can
//!   still load JavaScript.
//! - `pages`: one `index.html` per legacy path, for static hosts that
//!   cannot run either the script or the server.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::common::collect_paths;
use crate::core::LegacyPath;
use crate::embed::build::{REDIRECT_HTML, REDIRECT_JS, RedirectVars, ScriptVars};
use crate::redirect::{Destination, Navigator, RedirectTable, Resolution, Resolver, follow};
use crate::{debug, log};

/// Render the redirect script for `table`.
pub fn render_script(table: &RedirectTable) -> String {
    REDIRECT_JS.render(&ScriptVars::from_table(table))
}

pub fn emit_script(table: &RedirectTable, output: Option<&Path>) -> Result<()> {
    let script = render_script(table);
    match output {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, script)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log!("emit"; "script -> {}", path.display());
        }
        None => io::stdout().lock().write_all(script.as_bytes())?,
    }
    Ok(())
}

/// What `emit pages` did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PagesReport {
    pub written: usize,
    pub stayed: usize,
    pub skipped: usize,
}

/// Writes one redirect page per navigation.
struct PageWriter {
    file: PathBuf,
}

impl Navigator for PageWriter {
    fn navigate(&mut self, destination: &Destination) -> Result<()> {
        if let Some(parent) = self.file.parent() {
            fs::create_dir_all(parent)?;
        }
        let html = REDIRECT_HTML.render(&RedirectVars {
            canonical_url: &destination.url,
        });
        fs::write(&self.file, html)
            .with_context(|| format!("Failed to write {}", self.file.display()))
    }
}

pub fn run_emit_pages(table: &RedirectTable, paths: &[String], output: &Path) -> Result<()> {
    let paths = collect_paths(paths)?;
    let report = emit_pages(table, &paths, output)?;
    log!(
        "emit";
        "{} pages -> {} ({} stayed, {} skipped)",
        report.written,
        output.display(),
        report.stayed,
        report.skipped
    );
    Ok(())
}

/// Write a redirect page under `output` for every path that redirects.
pub fn emit_pages(table: &RedirectTable, paths: &[String], output: &Path) -> Result<PagesReport> {
    let resolver = Resolver::new(table);
    let mut report = PagesReport::default();

    for path in paths {
        let legacy = LegacyPath::parse(path);
        let Some(file) = crate::utils::path::page_output_path(legacy.as_str(), output) else {
            log!("warning"; "skipping `{}`: path escapes the output directory", path);
            report.skipped += 1;
            continue;
        };

        let mut writer = PageWriter { file };
        match follow(&resolver, path, &mut writer)? {
            Resolution::Redirect(dest) => {
                debug!("redirect"; "{} -> {}", path, dest.url);
                report.written += 1;
            }
            Resolution::Stay { reason } => {
                debug!("emit"; "{} stays ({})", path, reason);
                report.stayed += 1;
            }
        }
    }

    Ok(report)
}
