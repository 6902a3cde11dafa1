//! `check` and `presets` commands.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::{ConfigError, RedirectConfig, check_table};
use crate::log;
use crate::redirect::{Preset, RedirectTable};

/// Validate the effective table and the server settings.
pub fn run_check(config: &RedirectConfig) -> Result<()> {
    let table = config.table()?;
    let mut diag = check_table(&table);
    config.serve.validate(&mut diag);

    diag.print_warnings();
    diag.into_result().map_err(ConfigError::Diagnostics)?;

    let source = match (config.config_path.is_file(), config.preset) {
        (true, Some(preset)) => format!("{} over preset {preset}", config.config_path.display()),
        (true, None) => config.config_path.display().to_string(),
        (false, Some(preset)) => format!("preset {preset}"),
        (false, None) => "defaults".to_string(),
    };
    log!("check"; "{} {}", "ok".green().bold(), source);
    log!("check"; "{}", summary(&table));
    Ok(())
}

/// List embedded presets with their target and entry counts.
pub fn run_presets() -> Result<()> {
    for preset in Preset::ALL {
        let table = preset.table()?;
        println!("{:<10} {}", preset.name().bold(), summary(&table));
    }
    Ok(())
}

fn summary(table: &RedirectTable) -> String {
    let stats = table.stats();
    format!(
        "{} ({} excluded, {} docs overrides, {} blog overrides)",
        table.target.host, stats.excluded, stats.docs_overrides, stats.blog_overrides
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_summary() {
        let table = Preset::Rescript.table().unwrap();
        assert_eq!(
            summary(&table),
            "https://rescript-lang.org/ (1 excluded, 2 docs overrides, 32 blog overrides)"
        );
    }

    #[test]
    fn test_check_fails_on_invalid_table() {
        let config = test_parse_config("[target]\nhost = \"reasonml.org\"");
        assert!(run_check(&config).is_err());
    }

    #[test]
    fn test_check_fails_on_invalid_status() {
        let config = test_parse_config("preset = \"reasonml\"\n[serve]\nstatus = 200");
        assert!(run_check(&config).is_err());
    }

    #[test]
    fn test_check_preset() {
        let config = test_parse_config("preset = \"reasonml\"");
        assert!(run_check(&config).is_ok());
    }
}
