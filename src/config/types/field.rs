//! Config field path used in diagnostics.

use owo_colors::OwoColorize;
use std::borrow::Cow;
use std::fmt;

/// Dotted path of a config field, e.g. `target.host` or
/// `docs.overrides."stdlib-overview"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath(Cow<'static, str>);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(Cow::Borrowed(path))
    }

    /// Path of a table entry: `section."key"`.
    pub fn key(section: &'static str, key: &str) -> Self {
        Self(Cow::Owned(format!("{section}.\"{key}\"")))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_key() {
        assert_eq!(FieldPath::new("target.host").as_str(), "target.host");
        assert_eq!(
            FieldPath::key("docs.overrides", "stdlib-overview").as_str(),
            "docs.overrides.\"stdlib-overview\""
        );
    }
}
