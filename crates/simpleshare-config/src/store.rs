//! Persisted key-value settings store.
//!
//! Backs the `APP_SET_ITEM` / `APP_GET_ITEM` / `APP_REMOVE_ITEM` channels.
//! Keys are caller-defined strings with no schema and no TTL; values are
//! strings. `FileSettings` persists every mutation to a TOML map on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, warn};

use simpleshare_common::ConfigError;

pub trait SettingsStore: Send {
    /// Missing keys read as `None`, never as an error.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError>;
    fn remove(&mut self, key: &str) -> Result<(), ConfigError>;
}

/// TOML-file-backed store. Every mutation saves; a missing file on load is
/// an empty store.
pub struct FileSettings {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSettings {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("failed to parse settings: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(ConfigError::ParseError(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Self { path, entries })
    }

    /// Load, falling back to an empty store when the file is unreadable or
    /// corrupt (the settings are a cache of UI state, not user data worth
    /// refusing to start over).
    pub fn load_or_default(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::load(&path) {
            Ok(store) => store,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "settings unreadable, starting empty");
                Self {
                    path,
                    entries: BTreeMap::new(),
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::WriteError(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let content = toml::to_string(&self.entries)
            .map_err(|e| ConfigError::WriteError(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.path, content).map_err(|e| {
            ConfigError::WriteError(format!("failed to write {}: {e}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), entries = self.entries.len(), "settings saved");
        Ok(())
    }
}

impl SettingsStore for FileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        if self.entries.remove(key).is_some() {
            self.save()?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemorySettings {
    entries: BTreeMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        self.entries.remove(key);
        Ok(())
    }
}
