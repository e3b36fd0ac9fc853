//! App configuration schema.

use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowSection,
}

/// Per-kind window parameters. Each window kind the host can show gets its
/// own geometry and flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub startup: WindowParams,
    pub main: WindowParams,
    pub update: WindowParams,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowParams {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_resizable")]
    pub resizable: bool,
    // Absent means unconstrained, so these must not inherit struct defaults.
    pub min_width: Option<u32>,
    pub min_height: Option<u32>,
}

fn default_title() -> String {
    "Simple Share".into()
}

fn default_width() -> u32 {
    980
}

fn default_height() -> u32 {
    680
}

fn default_resizable() -> bool {
    true
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            resizable: default_resizable(),
            min_width: Some(640),
            min_height: Some(480),
        }
    }
}

impl WindowSection {
    fn startup_defaults() -> WindowParams {
        WindowParams {
            title: "Simple Share — Sign in".into(),
            width: 420,
            height: 560,
            resizable: false,
            min_width: None,
            min_height: None,
        }
    }

    fn update_defaults() -> WindowParams {
        WindowParams {
            title: "Simple Share — Update required".into(),
            width: 400,
            height: 300,
            resizable: false,
            min_width: None,
            min_height: None,
        }
    }
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            startup: Self::startup_defaults(),
            main: WindowParams::default(),
            update: Self::update_defaults(),
        }
    }
}
