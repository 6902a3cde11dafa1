//! Embedded static resources.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `build` - Generated output templates (redirect.html, redirect.js)
//! - `preset` - Built-in redirect tables (TOML)
//!
//! # Usage
//!
//! ```ignore
//! use embed::build::{REDIRECT_HTML, RedirectVars};
//!
//! let html = REDIRECT_HTML.render(&RedirectVars { canonical_url: "https://example.org/new" });
//! ```

mod template;

pub use template::{Template, TemplateVars};

pub mod build {
    use std::borrow::Cow;
    use std::collections::BTreeMap;

    use super::{Template, TemplateVars};
    use crate::redirect::RedirectTable;
    use crate::utils::html::escape;

    /// Variables for redirect.html template.
    pub struct RedirectVars<'a> {
        pub canonical_url: &'a str,
    }

    impl TemplateVars for RedirectVars<'_> {
        fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
            match name {
                "CANONICAL_URL" => Some(escape(self.canonical_url)),
                "LOCATION_JSON" => Some(Cow::Owned(script_json(self.canonical_url))),
                _ => None,
            }
        }
    }

    /// Redirect HTML page for a single legacy path.
    pub const REDIRECT_HTML: Template<RedirectVars<'static>> =
        Template::new(include_str!("build/redirect.html"));

    /// Variables for redirect.js template, JSON-encoded.
    pub struct ScriptVars {
        pub exclude: String,
        pub docs_overrides: String,
        pub blog_overrides: String,
        pub host: String,
        pub docs_fallback: String,
        pub blog_prefix: String,
        pub missing: String,
    }

    impl ScriptVars {
        pub fn from_table(table: &RedirectTable) -> Self {
            let target = &table.target;
            let docs: BTreeMap<_, _> = table.docs_overrides().into_iter().collect();
            let blog: BTreeMap<_, _> = table.blog_overrides().into_iter().collect();
            Self {
                exclude: script_json(&table.excluded()),
                docs_overrides: script_json(&docs),
                blog_overrides: script_json(&blog),
                host: script_json(&target.host),
                docs_fallback: script_json(&target.docs_fallback),
                blog_prefix: script_json(&target.blog),
                missing: script_json(target.missing_segment.as_str()),
            }
        }
    }

    impl TemplateVars for ScriptVars {
        fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
            let value = match name {
                "EXCLUDE" => &self.exclude,
                "DOCS_OVERRIDES" => &self.docs_overrides,
                "BLOG_OVERRIDES" => &self.blog_overrides,
                "HOST" => &self.host,
                "DOCS_FALLBACK" => &self.docs_fallback,
                "BLOG_PREFIX" => &self.blog_prefix,
                "MISSING" => &self.missing,
                _ => return None,
            };
            Some(Cow::Borrowed(value.as_str()))
        }
    }

    /// Client-side redirect script, the browser deployment of the resolver.
    pub const REDIRECT_JS: Template<ScriptVars> =
        Template::new(include_str!("build/redirect.js"));

    /// JSON literal safe to place inside `<script>`.
    fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
        // Serializing strings, maps and vectors of strings cannot fail
        serde_json::to_string(value)
            .unwrap_or_default()
            .replace("</", "<\\/")
    }
}

pub mod preset {
    /// Table for the move to reasonml.org.
    pub const REASONML_TOML: &str = include_str!("preset/reasonml.toml");

    /// Table for the move to rescript-lang.org.
    pub const RESCRIPT_TOML: &str = include_str!("preset/rescript.toml");
}

// ============================================================================
// Tests
// ============================================================================
