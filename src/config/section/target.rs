//! `[target]` section configuration.
//!
//! Where legacy paths are sent.
//!
//! # Example
//!
//! ```toml
//! [target]
//! host = "https://reasonml.org/"                 # new site, trailing slash
//! docs_fallback = "docs/reason-compiler/latest/" # docs pages without override
//! blog = "blog/"                                 # blog posts
//! missing_segment = "empty"                      # or "undefined"
//! ```
//!
//! Every field is optional when a preset is selected; set fields replace
//! the preset's values.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::redirect::{MissingSegment, Target};

/// Destination site settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Absolute base URL of the new site.
    pub host: Option<String>,

    /// Prefix for docs pages without override, relative to `host`.
    pub docs_fallback: Option<String>,

    /// Prefix for blog posts, relative to `host`.
    pub blog: Option<String>,

    /// Substitute for path segments a legacy URL does not have.
    pub missing_segment: Option<MissingSegment>,
}

impl TargetConfig {
    pub const HOST: FieldPath = FieldPath::new("target.host");
    pub const DOCS_FALLBACK: FieldPath = FieldPath::new("target.docs_fallback");
    pub const BLOG: FieldPath = FieldPath::new("target.blog");

    /// Build a target from this section alone (no preset).
    pub fn to_target(&self) -> Option<Target> {
        let mut target = Target::new(self.host.clone()?);
        self.apply(&mut target);
        Some(target)
    }

    /// Replace `target` values with the ones set here.
    pub fn apply(&self, target: &mut Target) {
        if let Some(host) = &self.host {
            target.host.clone_from(host);
        }
        if let Some(prefix) = &self.docs_fallback {
            target.docs_fallback.clone_from(prefix);
        }
        if let Some(prefix) = &self.blog {
            target.blog.clone_from(prefix);
        }
        if let Some(policy) = self.missing_segment {
            target.missing_segment = policy;
        }
    }
}

/// Check the resolved target: absolute http(s) host, slash-terminated prefixes.
pub fn validate_target(target: &Target, diag: &mut ConfigDiagnostics) {
    match url::Url::parse(&target.host) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if !target.host.ends_with('/') {
                diag.error_with_hint(
                    TargetConfig::HOST,
                    format!("`{}` must end with `/`", target.host),
                    "destinations are built by concatenation: host + path",
                );
            }
            if url.query().is_some() || url.fragment().is_some() {
                diag.error(
                    TargetConfig::HOST,
                    "host must not carry a query string or fragment",
                );
            }
        }
        Ok(url) => diag.error(
            TargetConfig::HOST,
            format!("unsupported scheme `{}`, expected http or https", url.scheme()),
        ),
        Err(e) => diag.error_with_hint(
            TargetConfig::HOST,
            format!("`{}` is not an absolute URL: {e}", target.host),
            "e.g. host = \"https://example.org/\"",
        ),
    }

    for (field, prefix) in [
        (TargetConfig::DOCS_FALLBACK, &target.docs_fallback),
        (TargetConfig::BLOG, &target.blog),
    ] {
        if prefix.starts_with('/') {
            diag.error(field.clone(), format!("`{prefix}` must be relative to host"));
        } else if !prefix.is_empty() && !prefix.ends_with('/') {
            diag.warn(field, format!("`{prefix}` does not end with `/`"));
        }
    }
}
