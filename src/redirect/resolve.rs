//! Legacy path classification.
//!
//! ```text
//! /docs/...  → excluded? → docs override? → host + docs_fallback + segment 3
//! /blog/...  →             blog override? → host + blog + last segment
//! otherwise  → stay
//! ```
//!
//! Lookups are exact string matches. Resolution never fails: a segment the
//! path does not have is filled in by the table's [`MissingSegment`] policy.
//!
//! [`MissingSegment`]: super::MissingSegment

use std::fmt;

use serde::Serialize;

use super::RedirectTable;
use crate::core::{BLOG_SECTION, DOCS_SECTION, LegacyPath};

/// Position of the docs fallback segment in `/docs/<lang>/<slug>`.
///
/// Legacy docs URLs were all three levels deep, so this is the page slug for
/// them. For any other shape it is whatever sits at that position.
pub const DOCS_FALLBACK_SEGMENT: usize = 3;

/// Which rule produced a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    DocsOverride,
    DocsFallback,
    BlogOverride,
    BlogFallback,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DocsOverride => "docs override",
            Self::DocsFallback => "docs fallback",
            Self::BlogOverride => "blog override",
            Self::BlogFallback => "blog fallback",
        })
    }
}

/// Why a path is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StayReason {
    /// Neither `/docs/` nor `/blog/`.
    OutsideSections,
    /// Docs path ending in `/` (no page slug).
    EmptyPage,
    /// Docs slug is in the exclusion set.
    Excluded,
}

impl fmt::Display for StayReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OutsideSections => "outside docs and blog",
            Self::EmptyPage => "no page slug",
            Self::Excluded => "excluded",
        })
    }
}

/// A computed redirect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Destination {
    pub url: String,
    pub rule: Rule,
}

/// Outcome of resolving one path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Resolution {
    Redirect(Destination),
    Stay { reason: StayReason },
}

impl Resolution {
    pub fn destination(&self) -> Option<&Destination> {
        match self {
            Self::Redirect(dest) => Some(dest),
            Self::Stay { .. } => None,
        }
    }

    pub fn into_url(self) -> Option<String> {
        match self {
            Self::Redirect(dest) => Some(dest.url),
            Self::Stay { .. } => None,
        }
    }

    const fn stay(reason: StayReason) -> Self {
        Self::Stay { reason }
    }
}

/// Resolves legacy paths against one table.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'t> {
    table: &'t RedirectTable,
}

impl<'t> Resolver<'t> {
    pub const fn new(table: &'t RedirectTable) -> Self {
        Self { table }
    }

    /// Classify `path` (a path or full request target).
    pub fn resolve(&self, path: &str) -> Resolution {
        let path = LegacyPath::parse(path);
        match path.section() {
            Some(DOCS_SECTION) => self.resolve_docs(&path),
            Some(BLOG_SECTION) => self.resolve_blog(&path),
            _ => Resolution::stay(StayReason::OutsideSections),
        }
    }

    /// Destination URL for `path`, if it redirects.
    pub fn destination(&self, path: &str) -> Option<String> {
        self.resolve(path).into_url()
    }

    fn resolve_docs(&self, path: &LegacyPath<'_>) -> Resolution {
        let page = path.page();
        if page.is_empty() {
            return Resolution::stay(StayReason::EmptyPage);
        }
        if self.table.is_excluded(page) {
            return Resolution::stay(StayReason::Excluded);
        }

        let target = &self.table.target;
        let destination = match self.table.docs_override_for(page) {
            Some(fragment) => Destination {
                url: target.docs_override_url(fragment),
                rule: Rule::DocsOverride,
            },
            None => Destination {
                url: target.docs_fallback_url(path.segment(DOCS_FALLBACK_SEGMENT)),
                rule: Rule::DocsFallback,
            },
        };
        Resolution::Redirect(destination)
    }

    fn resolve_blog(&self, path: &LegacyPath<'_>) -> Resolution {
        let target = &self.table.target;
        let full_path = path.after_section();
        let destination = match self.table.blog_override_for(&full_path) {
            Some(slug) => Destination {
                url: target.blog_url(slug),
                rule: Rule::BlogOverride,
            },
            None => Destination {
                url: target.blog_url(path.page()),
                rule: Rule::BlogFallback,
            },
        };
        Resolution::Redirect(destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::{MissingSegment, Preset, Target};

    fn reasonml() -> RedirectTable {
        Preset::Reasonml.table().unwrap()
    }

    fn rescript() -> RedirectTable {
        Preset::Rescript.table().unwrap()
    }

    #[test]
    fn test_docs_override() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/docs/en/stdlib-overview").as_deref(),
            Some("https://reasonml.org/apis/javascript/latest")
        );

        let table = rescript();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/docs/en/stdlib-overview").as_deref(),
            Some("https://rescript-lang.org/apis/latest")
        );
    }

    #[test]
    fn test_docs_fallback_uses_segment_three() {
        let table = reasonml();
        let resolver = Resolver::new(&table);

        let resolution = resolver.resolve("/docs/en/some-unmapped-slug");
        let dest = resolution.destination().unwrap();
        assert_eq!(dest.rule, Rule::DocsFallback);
        assert_eq!(
            dest.url,
            format!("{}some-unmapped-slug", table.target.docs_fallback_base())
        );

        // Deeper shapes still take segment 3, not the slug
        assert_eq!(
            resolver.destination("/docs/en/build/overview").as_deref(),
            Some("https://reasonml.org/docs/reason-compiler/latest/build")
        );
    }

    #[test]
    fn test_docs_fallback_short_path() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/docs/interop").as_deref(),
            Some("https://reasonml.org/docs/reason-compiler/latest/")
        );

        let mut table = reasonml();
        table.target.missing_segment = MissingSegment::Undefined;
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/docs/interop").as_deref(),
            Some("https://reasonml.org/docs/reason-compiler/latest/undefined")
        );
    }

    #[test]
    fn test_excluded_docs_page_stays() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        for path in ["/docs/en/playground", "/docs/playground", "/docs/a/b/c/playground"] {
            assert_eq!(
                resolver.resolve(path),
                Resolution::Stay {
                    reason: StayReason::Excluded
                },
                "{path}"
            );
        }
    }

    #[test]
    fn test_exclusion_wins_over_override() {
        let table = RedirectTable::new(Target::new("https://example.org/"))
            .exclude("community")
            .docs_override("community", "community");
        let resolver = Resolver::new(&table);
        assert_eq!(resolver.destination("/docs/en/community"), None);
    }

    #[test]
    fn test_docs_empty_page_stays() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.resolve("/docs/en/installation/"),
            Resolution::Stay {
                reason: StayReason::EmptyPage
            }
        );
        assert_eq!(resolver.destination("/docs/"), None);
    }

    #[test]
    fn test_blog_override() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        let resolution = resolver.resolve("/blog/2019/03/21/release-5-0");
        let dest = resolution.destination().unwrap();
        assert_eq!(dest.rule, Rule::BlogOverride);
        assert_eq!(
            dest.url,
            format!("{}bucklescript-release-5-0", table.target.blog_base())
        );

        let table = rescript();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/blog/2019/03/21/release-5-0").as_deref(),
            Some("https://rescript-lang.org/blog/bucklescript-release-5-0")
        );
    }

    #[test]
    fn test_blog_fallback_uses_last_segment() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        let resolution = resolver.resolve("/blog/2025/01/01/unmapped-post");
        let dest = resolution.destination().unwrap();
        assert_eq!(dest.rule, Rule::BlogFallback);
        assert_eq!(dest.url, "https://reasonml.org/blog/unmapped-post");
    }

    #[test]
    fn test_blog_trailing_slash_falls_back_to_blog_index() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/blog/2019/03/21/release-5-0/").as_deref(),
            Some("https://reasonml.org/blog/")
        );
        assert_eq!(
            resolver.destination("/blog").as_deref(),
            Some("https://reasonml.org/blog/blog")
        );
    }

    #[test]
    fn test_blog_has_no_exclusions() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/blog/playground").as_deref(),
            Some("https://reasonml.org/blog/playground")
        );
    }

    #[test]
    fn test_other_sections_stay() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        for path in ["/", "", "/en/users", "/docsx/en/a", "/Docs/en/a", "/api/blog/x", "docs/en/a"] {
            assert_eq!(
                resolver.resolve(path),
                Resolution::Stay {
                    reason: StayReason::OutsideSections
                },
                "{path}"
            );
        }
    }

    #[test]
    fn test_request_target_query_is_ignored() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        assert_eq!(
            resolver.destination("/docs/en/stdlib-overview?x=1#top").as_deref(),
            Some("https://reasonml.org/apis/javascript/latest")
        );
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        for path in [
            "/docs/en/stdlib-overview",
            "/docs/en/x",
            "/blog/2020/05/06/exception-encoding",
            "/blog/x",
            "/other",
        ] {
            assert_eq!(resolver.resolve(path), resolver.resolve(path));
        }
    }

    #[test]
    fn test_resolution_json_shape() {
        let table = reasonml();
        let resolver = Resolver::new(&table);
        let json = serde_json::to_value(resolver.resolve("/docs/en/community")).unwrap();
        assert_eq!(json["action"], "redirect");
        assert_eq!(json["rule"], "docs-override");
        assert_eq!(json["url"], "https://reasonml.org/community");

        let json = serde_json::to_value(resolver.resolve("/en/users")).unwrap();
        assert_eq!(json["action"], "stay");
        assert_eq!(json["reason"], "outside-sections");
    }
}
