//! Table versions embedded in the binary.

use std::fmt;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::RedirectTable;
use crate::config::RedirectConfig;
use crate::embed::preset::{REASONML_TOML, RESCRIPT_TOML};

/// Built-in redirect tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Docs and blog moved to reasonml.org
    Reasonml,
    /// Docs and blog moved to rescript-lang.org
    Rescript,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Self::Reasonml, Self::Rescript];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Reasonml => "reasonml",
            Self::Rescript => "rescript",
        }
    }

    /// Embedded TOML source, same schema as `redirect.toml`.
    pub const fn source(self) -> &'static str {
        match self {
            Self::Reasonml => REASONML_TOML,
            Self::Rescript => RESCRIPT_TOML,
        }
    }

    pub fn table(self) -> Result<RedirectTable> {
        let config = RedirectConfig::from_str(self.source())
            .with_context(|| format!("embedded preset `{}` is malformed", self.name()))?;
        config.table()
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_parse() {
        for preset in Preset::ALL {
            let table = preset.table().unwrap();
            let stats = table.stats();
            assert_eq!(stats.excluded, 1, "{preset}");
            assert_eq!(stats.docs_overrides, 2, "{preset}");
            assert_eq!(stats.blog_overrides, 32, "{preset}");
            assert!(table.is_excluded("playground"));
        }
    }

    #[test]
    fn test_preset_targets() {
        let reasonml = Preset::Reasonml.table().unwrap();
        assert_eq!(reasonml.target.host, "https://reasonml.org/");
        assert_eq!(
            reasonml.target.docs_fallback_base(),
            "https://reasonml.org/docs/reason-compiler/latest/"
        );
        assert_eq!(
            reasonml.docs_override_for("stdlib-overview"),
            Some("apis/javascript/latest")
        );

        let rescript = Preset::Rescript.table().unwrap();
        assert_eq!(rescript.target.blog_base(), "https://rescript-lang.org/blog/");
        assert_eq!(rescript.docs_override_for("stdlib-overview"), Some("apis/latest"));
    }

    #[test]
    fn test_presets_validate_cleanly() {
        for preset in Preset::ALL {
            let table = preset.table().unwrap();
            let diag = crate::config::check_table(&table);
            assert!(!diag.has_errors(), "{preset}: {diag}");
        }
    }

    #[test]
    fn test_preset_serde_name() {
        #[derive(Deserialize)]
        struct Wrapper {
            preset: Preset,
        }
        let w: Wrapper = toml::from_str("preset = \"rescript\"").unwrap();
        assert_eq!(w.preset, Preset::Rescript);
    }
}
