//! TOML config loading: read from a path or the platform default.

use std::path::Path;

use tracing::info;

use simpleshare_common::ConfigError;

use crate::paths;
use crate::schema::AppConfig;

/// Load config from a specific TOML file path. Missing fields take their
/// serde defaults.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform default path. If the file does not exist,
/// writes a default config there and returns the defaults.
pub fn load_default() -> Result<AppConfig, ConfigError> {
    let path = paths::config_file()
        .map_err(|e| ConfigError::ParseError(format!("config path unavailable: {e}")))?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::ParseError(msg)) if msg.contains("failed to read") => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(AppConfig::default())
        }
        Err(e) => Err(e),
    }
}

fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::WriteError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| ConfigError::WriteError(format!("failed to serialize defaults: {e}")))?;

    std::fs::write(path, content).map_err(|e| {
        ConfigError::WriteError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_missing_path_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_from_path_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[window.main]
title = "Shares"
width = 1440
"#,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.window.main.title, "Shares");
        assert_eq!(config.window.main.width, 1440);
        assert_eq!(config.window.startup.width, 420);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[window.main\nwidth = ").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse TOML"));
    }

    #[test]
    fn create_default_config_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        create_default_config(&path).unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.window.main.width, AppConfig::default().window.main.width);
    }
}
