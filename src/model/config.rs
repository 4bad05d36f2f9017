use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Configuration from `conductor/tui.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Background refresh period in milliseconds
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Whether archived tracks are listed on startup
    #[serde(default)]
    pub show_archived: bool,
    /// Where tracing output goes; nowhere when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            refresh_interval_ms: default_refresh_interval_ms(),
            show_archived: false,
            log_file: None,
            ui: UiConfig::default(),
        }
    }
}

fn default_refresh_interval_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Color overrides by theme slot name, as `#RRGGBB`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}
