//! Platform path resolution.

use std::path::PathBuf;

use simpleshare_common::PlatformError;

pub(crate) const APP_NAME: &str = "simpleshare";

/// Platform-specific configuration directory.
///
/// - macOS: `~/Library/Application Support/simpleshare`
/// - Linux: `$XDG_CONFIG_HOME/simpleshare` (defaults to `~/.config/simpleshare`)
/// - Windows: `%APPDATA%\simpleshare`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Platform-specific data directory.
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Path to the main configuration file, `config_dir()/config.toml`.
pub fn config_file() -> Result<PathBuf, PlatformError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Path to the persisted key-value settings store.
pub fn settings_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("settings.toml"))
}

/// Path to the persisted UI-session cookie file.
pub fn cookies_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("cookies.dat"))
}

/// Directory that saved files land in. Falls back to the data directory
/// when the platform has no downloads folder.
pub fn downloads_dir() -> Result<PathBuf, PlatformError> {
    match dirs::download_dir() {
        Some(dir) => Ok(dir),
        None => data_dir(),
    }
}

/// Create the config and data directories if they do not exist yet.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    for dir in [config_dir()?, data_dir()?] {
        std::fs::create_dir_all(&dir).map_err(|e| {
            PlatformError::PathError(format!("failed to create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
