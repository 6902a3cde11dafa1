//! Immutable redirect tables.
//!
//! A [`RedirectTable`] is everything the resolver consults: where the new
//! site lives ([`Target`]), which docs pages must stay, and the two
//! override maps. Tables are built once (from a preset, a config file, or
//! both) and then only read.

use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

// ============================================================================
// MissingSegment
// ============================================================================

/// What a nonexistent path segment contributes to a destination URL.
///
/// Short legacy paths like `/docs/playground-old` have no segment 3. The
/// historical script interpolated JavaScript's `undefined` there; the
/// default here is an empty string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingSegment {
    #[default]
    Empty,
    Undefined,
}

impl MissingSegment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Undefined => "undefined",
        }
    }
}

impl fmt::Display for MissingSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Undefined => "undefined",
        })
    }
}

// ============================================================================
// Target
// ============================================================================

/// Destination site constants.
///
/// URLs are built by plain concatenation so that the output matches the
/// legacy script exactly, including odd results for odd inputs:
///
/// | Rule            | Destination                         |
/// |-----------------|-------------------------------------|
/// | docs override   | `host + fragment`                   |
/// | docs fallback   | `host + docs_fallback + segment`    |
/// | blog            | `host + blog + slug`                |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Absolute base of the new site, with trailing slash.
    pub host: String,
    /// Prefix (relative to `host`) for docs pages without override.
    pub docs_fallback: String,
    /// Prefix (relative to `host`) for blog posts.
    pub blog: String,
    pub missing_segment: MissingSegment,
}

impl Target {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            docs_fallback: Self::DEFAULT_DOCS_FALLBACK.to_string(),
            blog: Self::DEFAULT_BLOG.to_string(),
            missing_segment: MissingSegment::default(),
        }
    }

    pub const DEFAULT_DOCS_FALLBACK: &str = "docs/";
    pub const DEFAULT_BLOG: &str = "blog/";

    pub fn with_docs_fallback(mut self, prefix: impl Into<String>) -> Self {
        self.docs_fallback = prefix.into();
        self
    }

    pub fn with_blog(mut self, prefix: impl Into<String>) -> Self {
        self.blog = prefix.into();
        self
    }

    pub fn with_missing_segment(mut self, policy: MissingSegment) -> Self {
        self.missing_segment = policy;
        self
    }

    pub fn docs_override_url(&self, fragment: &str) -> String {
        format!("{}{}", self.host, fragment)
    }

    /// `segment` is `None` when the legacy path is too short.
    pub fn docs_fallback_url(&self, segment: Option<&str>) -> String {
        let segment = segment.unwrap_or(self.missing_segment.as_str());
        format!("{}{}{}", self.host, self.docs_fallback, segment)
    }

    pub fn blog_url(&self, slug: &str) -> String {
        format!("{}{}{}", self.host, self.blog, slug)
    }

    /// Base URL of docs pages without override.
    pub fn docs_fallback_base(&self) -> String {
        format!("{}{}", self.host, self.docs_fallback)
    }

    /// Base URL of blog posts.
    pub fn blog_base(&self) -> String {
        format!("{}{}", self.host, self.blog)
    }
}

// ============================================================================
// RedirectTable
// ============================================================================

/// Exclusion set plus docs and blog override maps for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTable {
    pub target: Target,
    exclude: FxHashSet<String>,
    docs: FxHashMap<String, String>,
    blog: FxHashMap<String, String>,
}

/// Entry counts, for summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub excluded: usize,
    pub docs_overrides: usize,
    pub blog_overrides: usize,
}

impl RedirectTable {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            exclude: FxHashSet::default(),
            docs: FxHashMap::default(),
            blog: FxHashMap::default(),
        }
    }

    /// Never redirect docs pages whose slug is `slug`.
    pub fn exclude(mut self, slug: impl Into<String>) -> Self {
        self.exclude.insert(slug.into());
        self
    }

    /// Send docs page `slug` to `host + fragment`. Replaces an earlier entry.
    pub fn docs_override(mut self, slug: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.docs.insert(slug.into(), fragment.into());
        self
    }

    /// Send blog path `path` (`year/month/day/slug`) to `host + blog + slug`.
    pub fn blog_override(mut self, path: impl Into<String>, slug: impl Into<String>) -> Self {
        self.blog.insert(path.into(), slug.into());
        self
    }

    /// Layer `other`'s entries over this table; `other` wins on equal keys.
    /// The target is left untouched.
    pub fn extend(&mut self, other: RedirectTable) {
        self.exclude.extend(other.exclude);
        self.docs.extend(other.docs);
        self.blog.extend(other.blog);
    }

    #[inline]
    pub fn is_excluded(&self, page: &str) -> bool {
        self.exclude.contains(page)
    }

    #[inline]
    pub fn docs_override_for(&self, slug: &str) -> Option<&str> {
        self.docs.get(slug).map(String::as_str)
    }

    #[inline]
    pub fn blog_override_for(&self, path: &str) -> Option<&str> {
        self.blog.get(path).map(String::as_str)
    }

    /// Excluded slugs, sorted.
    pub fn excluded(&self) -> Vec<&str> {
        let mut slugs: Vec<_> = self.exclude.iter().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }

    /// Docs overrides, sorted by slug.
    pub fn docs_overrides(&self) -> Vec<(&str, &str)> {
        sorted_pairs(&self.docs)
    }

    /// Blog overrides, sorted by legacy path.
    pub fn blog_overrides(&self) -> Vec<(&str, &str)> {
        sorted_pairs(&self.blog)
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            excluded: self.exclude.len(),
            docs_overrides: self.docs.len(),
            blog_overrides: self.blog.len(),
        }
    }
}

fn sorted_pairs(map: &FxHashMap<String, String>) -> Vec<(&str, &str)> {
    let mut pairs: Vec<_> = map
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    pairs.sort_unstable();
    pairs
}
