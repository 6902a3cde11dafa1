//! Redirect configuration management for `redirect.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── target     # [target]
//! │   ├── table      # [docs], [blog]
//! │   └── serve      # [serve]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   ├── field      # FieldPath
//! │   └── handle     # Reloadable table handle
//! └── mod.rs         # RedirectConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                      |
//! |--------------------|----------------------------------------------|
//! | `preset`           | Embedded table to start from (optional)      |
//! | `[target]`         | New site host, docs and blog prefixes        |
//! | `[docs]`           | Excluded slugs, docs override map            |
//! | `[blog]`           | Blog override map                            |
//! | `[serve]`          | Redirect server (port, interface, status)    |
//!
//! Entries from the file are layered over the preset: keys in the file
//! win, exclusions are merged.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{BlogConfig, DocsConfig, ServeConfig, TargetConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath, TableHandle};

use crate::{
    cli::{Cli, Commands},
    log,
    redirect::{Preset, RedirectTable},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing redirect.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// CLI arguments reference (internal use only)
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory of the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Embedded table the file builds on
    #[serde(default)]
    pub preset: Option<Preset>,

    /// Destination site
    #[serde(default)]
    pub target: TargetConfig,

    /// Docs exclusions and overrides
    #[serde(default)]
    pub docs: DocsConfig,

    /// Blog overrides
    #[serde(default)]
    pub blog: BlogConfig,

    /// Redirect server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl RedirectConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd for the config file. Without one, a
    /// `--preset` alone is enough to build a table.
    pub fn load(cli: &'static Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let found = find_config_file(&cli.config);

        let mut config = match &found {
            Some(path) => Self::from_path(path)?,
            None if cli.preset.is_some() || !cli.needs_table() => Self::default(),
            None => {
                log!(
                    "error";
                    "Config file '{}' not found. Create one or pass --preset <{}>.",
                    cli.config.display(),
                    Preset::ALL.map(Preset::name).join("|")
                );
                std::process::exit(1);
            }
        };

        config.config_path = found.unwrap_or_else(|| cwd.join(&cli.config));
        config.root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or(cwd);
        config.cli = Some(cli);
        config.apply_command_options(cli);
        config.normalize_paths();

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply global and command-specific CLI overrides.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        if cli.preset.is_some() {
            self.preset = cli.preset;
        }

        if let Commands::Serve {
            interface,
            port,
            status,
            root,
            watch,
        } = &cli.command
        {
            Self::update_option(&mut self.serve.interface, interface.as_ref());
            Self::update_option(&mut self.serve.port, port.as_ref());
            Self::update_option(&mut self.serve.status, status.as_ref());
            Self::update_option(&mut self.serve.watch, watch.as_ref());
            if root.is_some() {
                self.serve.root.clone_from(root);
            }
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve relative paths against the config file directory.
    fn normalize_paths(&mut self) {
        if let Some(root) = self.serve.root.take() {
            self.serve.root = Some(crate::utils::path::normalize_path(&self.root.join(root)));
        }
    }

    // ========================================================================
    // table construction
    // ========================================================================

    /// Build the redirect table: preset first, then this file's entries.
    pub fn table(&self) -> Result<RedirectTable> {
        let mut table = match self.preset {
            Some(preset) => {
                let mut table = preset.table()?;
                self.target.apply(&mut table.target);
                table
            }
            None => {
                let target = self.target.to_target().ok_or_else(|| {
                    ConfigError::Validation(
                        "no redirect target: set `target.host` or choose a `preset`".into(),
                    )
                })?;
                RedirectTable::new(target)
            }
        };

        let layer = section::table_layer(table.target.clone(), &self.docs, &self.blog);
        table.extend(layer);
        Ok(table)
    }

    /// Build the table and validate it, printing warnings.
    pub fn checked_table(&self) -> Result<RedirectTable> {
        let table = self.table()?;
        let diag = check_table(&table);
        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)?;
        Ok(table)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the current command.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if let Some(cli) = self.cli
            && cli.is_serve()
        {
            self.serve.validate(&mut diag);
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Collect every problem in a table without failing early.
pub fn check_table(table: &RedirectTable) -> ConfigDiagnostics {
    let mut diag = ConfigDiagnostics::new();
    section::validate_target(&table.target, &mut diag);
    section::validate_entries(table, &mut diag);
    diag
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RedirectConfig {
    let (parsed, ignored) = RedirectConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_without_preset_or_host() {
        let config = test_parse_config("[docs]\nexclude = [\"playground\"]");
        let err = config.table().unwrap_err();
        assert!(err.to_string().contains("target.host"));
    }

    #[test]
    fn test_table_from_file_only() {
        let config = test_parse_config(
            r#"
[target]
host = "https://example.org/"

[docs.overrides]
"stdlib-overview" = "apis/latest"
"#,
        );
        let table = config.checked_table().unwrap();
        assert_eq!(table.target.docs_fallback, "docs/");
        assert_eq!(table.docs_override_for("stdlib-overview"), Some("apis/latest"));
        assert_eq!(table.stats().blog_overrides, 0);
    }

    #[test]
    fn test_file_layers_over_preset() {
        let config = test_parse_config(
            r#"
preset = "reasonml"

[target]
host = "https://staging.reasonml.org/"

[docs]
exclude = ["try"]

[docs.overrides]
"community" = "community/overview"

[blog.overrides]
"2025/01/01/new-post" = "new-post-renamed"
"#,
        );
        let table = config.checked_table().unwrap();

        assert_eq!(table.target.host, "https://staging.reasonml.org/");
        assert_eq!(table.target.docs_fallback, "docs/reason-compiler/latest/");
        assert!(table.is_excluded("playground"));
        assert!(table.is_excluded("try"));
        assert_eq!(table.docs_override_for("community"), Some("community/overview"));
        assert_eq!(
            table.docs_override_for("stdlib-overview"),
            Some("apis/javascript/latest")
        );
        assert_eq!(table.stats().blog_overrides, 33);
    }

    #[test]
    fn test_checked_table_reports_errors() {
        let config = test_parse_config("[target]\nhost = \"https://example.org\"");
        assert!(config.table().is_ok());
        let err = config.checked_table().unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (_, ignored) =
            RedirectConfig::parse_with_ignored("[target]\nhots = \"x\"\n[serve]\nprot = 1")
                .unwrap();
        assert_eq!(ignored, vec!["target.hots", "serve.prot"]);
    }

    #[test]
    fn test_parse_error() {
        let err = RedirectConfig::from_str("[target\nhost = 1").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Toml(_))
        ));
    }
}
