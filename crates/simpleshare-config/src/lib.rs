//! Simple Share configuration and persisted settings.
//!
//! TOML-based app configuration with serde defaults so partial configs
//! work out of the box, plus the key-value settings store the UI reaches
//! through the `APP_*_ITEM` channels.

pub mod loader;
pub mod paths;
pub mod schema;
pub mod store;

pub use loader::{load_default, load_from_path};
pub use schema::AppConfig;
pub use store::{FileSettings, MemorySettings, SettingsStore};
