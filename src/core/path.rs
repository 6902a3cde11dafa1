//! Legacy request path split into segments.
//!
//! Mirrors what a browser exposes as `location.pathname`: query string and
//! fragment are dropped, everything else is kept byte-for-byte. No
//! percent-decoding and no case folding, since table lookups are exact.

use smallvec::SmallVec;

/// Section marker for documentation pages (`/docs/...`).
pub const DOCS_SECTION: &str = "docs";
/// Section marker for blog posts (`/blog/...`).
pub const BLOG_SECTION: &str = "blog";

/// A request path split on `/`.
///
/// Segment 0 is the (empty) text before the leading slash, segment 1 the
/// section, later segments the sub-path and page slug. Out-of-range reads
/// return `None` instead of panicking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyPath<'a> {
    raw: &'a str,
    segments: SmallVec<[&'a str; 8]>,
}

impl<'a> LegacyPath<'a> {
    /// Parse a path or request target (`/docs/en/x?lang=en#top`).
    pub fn parse(target: &'a str) -> Self {
        let raw = strip_query_fragment(target);
        Self {
            raw,
            segments: raw.split('/').collect(),
        }
    }

    /// Path with query string and fragment removed.
    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Segment at `index`, if the path is long enough.
    #[inline]
    pub fn segment(&self, index: usize) -> Option<&'a str> {
        self.segments.get(index).copied()
    }

    /// Section segment (`docs`, `blog`, ...).
    #[inline]
    pub fn section(&self) -> Option<&'a str> {
        self.segment(1)
    }

    /// Final segment, the page slug. Empty for paths ending in `/`.
    #[inline]
    pub fn page(&self) -> &'a str {
        // `split` always yields at least one item
        self.segments.last().copied().unwrap_or_default()
    }

    /// Everything after the section segment, joined back with `/`.
    ///
    /// `/blog/2019/03/21/release-5-0` -> `2019/03/21/release-5-0`
    pub fn after_section(&self) -> String {
        self.segments
            .get(2..)
            .map(|rest| rest.join("/"))
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// Drop `?query` and `#fragment` from a request target.
fn strip_query_fragment(target: &str) -> &str {
    match target.find(['?', '#']) {
        Some(pos) => &target[..pos],
        None => target,
    }
}
