use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from the given path, falling back to defaults on error.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables = toml::from_str(contents).context("Failed to parse config TOML")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    let tables = ConfigTables::from(config);
    toml::to_string_pretty(&tables).context("Failed to serialize config TOML")
}

/// Persist the config back to disk; errors are for the caller to log.
pub fn save_config(path: &Path, config: &AppConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let contents = serialize_config(config)?;
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LogLevel, ThemeMode};

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = parse_config("").unwrap();
        let def = AppConfig::default();
        assert_eq!(cfg.theme, def.theme);
        assert_eq!(cfg.font_size, def.font_size);
        assert_eq!(cfg.key_undo, def.key_undo);
        assert_eq!(cfg.chat_max_tokens, def.chat_max_tokens);
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let cfg = parse_config(
            "[appearance]\ntheme = \"day\"\n\n[logging]\nlog_level = \"warn\"\n",
        )
        .unwrap();
        assert_eq!(cfg.theme, ThemeMode::Day);
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert_eq!(cfg.font_size, AppConfig::default().font_size);
    }

    #[test]
    fn serialize_then_parse_round_trips_keys() {
        let mut cfg = AppConfig::default();
        cfg.key_undo = "ctrl+u".to_string();
        cfg.font_size = 24;
        let text = serialize_config(&cfg).unwrap();
        let back = parse_config(&text).unwrap();
        assert_eq!(back.key_undo, "ctrl+u");
        assert_eq!(back.font_size, 24);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(parse_config("[appearance\ntheme = day").is_err());
    }
}
