//! `[docs]` and `[blog]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [docs]
//! exclude = ["playground"]                       # never redirected
//!
//! [docs.overrides]                               # slug -> path under host
//! "stdlib-overview" = "apis/javascript/latest"
//!
//! [blog.overrides]                               # year/month/day/slug -> new slug
//! "2019/03/21/release-5-0" = "bucklescript-release-5-0"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::redirect::{RedirectTable, Target};

/// Documentation redirects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Page slugs that are never redirected.
    pub exclude: Vec<String>,

    /// Page slug -> destination path relative to `target.host`.
    pub overrides: BTreeMap<String, String>,
}

/// Blog redirects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Legacy post path (after `/blog/`) -> new post slug.
    pub overrides: BTreeMap<String, String>,
}

/// Build a table layer holding the entries of both sections.
pub fn table_layer(target: Target, docs: &DocsConfig, blog: &BlogConfig) -> RedirectTable {
    let table = docs
        .exclude
        .iter()
        .fold(RedirectTable::new(target), |t, slug| t.exclude(slug.as_str()));
    let table = docs
        .overrides
        .iter()
        .fold(table, |t, (slug, fragment)| {
            t.docs_override(slug.as_str(), fragment.as_str())
        });
    blog.overrides
        .iter()
        .fold(table, |t, (path, slug)| t.blog_override(path.as_str(), slug.as_str()))
}

/// Check table entries. Lookups are exact, so malformed keys are not
/// errors for the resolver; they are reported because they never match.
pub fn validate_entries(table: &RedirectTable, diag: &mut ConfigDiagnostics) {
    for slug in table.excluded() {
        let field = FieldPath::new("docs.exclude");
        if slug.is_empty() {
            diag.error(field, "empty slug");
        } else if slug.contains('/') {
            diag.warn(field, format!("`{slug}` contains `/` and never matches a page slug"));
        }
    }

    for (slug, fragment) in table.docs_overrides() {
        let field = FieldPath::key("docs.overrides", slug);
        if slug.is_empty() {
            diag.error(field, "empty page slug");
            continue;
        }
        if slug.contains('/') {
            diag.warn(field.clone(), "key contains `/` and never matches a page slug");
        }
        if table.is_excluded(slug) {
            diag.warn(field.clone(), "slug is excluded, override never applies");
        }
        if fragment.starts_with('/') {
            diag.warn(field, format!("`{fragment}` starts with `/`, destination gets `//`"));
        }
    }

    for (path, slug) in table.blog_overrides() {
        let field = FieldPath::key("blog.overrides", path);
        if path.is_empty() {
            diag.error(field, "empty blog path");
            continue;
        }
        if path.starts_with('/') || path.ends_with('/') || path.contains("//") {
            diag.warn(
                field.clone(),
                "path is compared with the text after `/blog/`, leading/trailing `/` never match",
            );
        }
        if slug.is_empty() {
            diag.error_with_hint(
                field,
                "empty destination slug",
                "remove the entry to fall back to the last path segment",
            );
        }
    }
}
