use serde::{Deserialize, Serialize};

pub const SETTINGS_FILE: &str = "settings.json";

/// User preferences persisted between runs.
///
/// Field names are camelCase on disk; missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_true")]
    pub sound_enabled: bool,
    #[serde(default = "default_true")]
    pub predictions_enabled: bool,
}

fn default_theme() -> String {
    "default".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            sound_enabled: default_true(),
            predictions_enabled: default_true(),
        }
    }
}
