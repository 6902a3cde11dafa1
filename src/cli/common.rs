//! Common utilities shared across CLI commands.

use std::io::{self, BufRead};

use anyhow::Result;

/// Expand CLI path arguments: a lone `-` reads paths from stdin.
pub fn collect_paths(paths: &[String]) -> Result<Vec<String>> {
    if paths.len() == 1 && paths[0] == "-" {
        return read_paths(io::stdin().lock());
    }
    Ok(paths.to_vec())
}

/// Read paths, one per line, skipping blank lines
pub fn read_paths(reader: impl BufRead) -> Result<Vec<String>> {
    let mut paths = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            paths.push(trimmed.to_string());
        }
    }

    Ok(paths)
}
