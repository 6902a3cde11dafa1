//! Filesystem path helpers.

use std::path::{Path, PathBuf};

/// Normalize a path to absolute form, resolving symlinks when it exists.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Output file for a page at `url_path`: `/old/page` -> `{dir}/old/page/index.html`.
///
/// Returns `None` for paths that would escape `dir`.
pub fn page_output_path(url_path: &str, dir: &Path) -> Option<PathBuf> {
    let mut out = dir.to_path_buf();
    for segment in url_path.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\\') {
            return None;
        }
        out.push(segment);
    }
    out.push("index.html");
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_relative() {
        let normalized = normalize_path(Path::new("surely-missing-dir/x"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("surely-missing-dir/x"));
    }

    #[test]
    fn test_page_output_path() {
        let dir = Path::new("/out");
        assert_eq!(
            page_output_path("/docs/en/install", dir),
            Some(PathBuf::from("/out/docs/en/install/index.html"))
        );
        assert_eq!(
            page_output_path("/docs/en/install/", dir),
            Some(PathBuf::from("/out/docs/en/install/index.html"))
        );
        assert_eq!(page_output_path("/", dir), Some(PathBuf::from("/out/index.html")));
        assert_eq!(page_output_path("/docs/../../etc", dir), None);
    }
}
