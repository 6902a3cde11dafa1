//! URL to filesystem path resolution for paths that are not redirected.

use std::path::{Path, PathBuf};

/// Resolve URL to filesystem path, handling index.html for directories
pub fn resolve_path(url: &str, serve_root: &Path) -> Option<PathBuf> {
    let clean = normalize_url(url);

    // Reject paths with suspicious patterns early
    if clean.split('/').any(|segment| segment == "..") {
        return None;
    }

    let local = serve_root.join(&clean);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}

/// Normalize URL: strip query string and fragment, decode, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("docs/en/playground")).unwrap();
        fs::write(dir.path().join("docs/en/playground/index.html"), "play").unwrap();
        fs::write(dir.path().join("index.html"), "home").unwrap();
        fs::write(dir.path().join("caf é.txt"), "x").unwrap();
        dir
    }

    #[test]
    fn test_resolve_index() {
        let dir = site();
        let root = dir.path();
        let found = resolve_path("/docs/en/playground", root).unwrap();
        assert!(found.ends_with("docs/en/playground/index.html"));

        let found = resolve_path("/?utm=1", root).unwrap();
        assert!(found.ends_with("index.html"));
    }

    #[test]
    fn test_resolve_decodes() {
        let dir = site();
        assert!(resolve_path("/caf%20%C3%A9.txt", dir.path()).is_some());
    }

    #[test]
    fn test_resolve_rejects_traversal_and_missing() {
        let dir = site();
        assert!(resolve_path("/../etc/passwd", dir.path()).is_none());
        assert!(resolve_path("/docs/%2E%2E/%2E%2E/x", dir.path()).is_none());
        assert!(resolve_path("/missing", dir.path()).is_none());
        assert!(resolve_path("/docs/en", dir.path()).is_none());
    }
}
