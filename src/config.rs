use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::audio::Tone;
use crate::engine::quiz::{DEFAULT_QUIZ_SIZE, WORD_POOL};
use crate::keyboard::grid::GridSettings;
use crate::keyboard::layout::Breakpoints;

/// Presentation tuning read from `config.toml`. User choices that are toggled
/// at runtime live in [`crate::store::schema::Settings`] instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: u32,
    #[serde(default = "default_small_breakpoint")]
    pub small_breakpoint: u32,
    #[serde(default = "default_tiny_breakpoint")]
    pub tiny_breakpoint: u32,
    #[serde(default = "default_resize_threshold")]
    pub resize_threshold: u32,
    /// Nominal pixel width of a terminal cell, used when the terminal does not
    /// report its pixel size.
    #[serde(default = "default_cell_width_px")]
    pub cell_width_px: u32,
    #[serde(default = "default_quiz_size")]
    pub quiz_size: usize,
    #[serde(default = "default_quiz_advance_ms")]
    pub quiz_advance_ms: u64,
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,
    #[serde(default = "default_tone_hz")]
    pub tone_hz: f32,
    #[serde(default = "default_tone_volume")]
    pub tone_volume: f32,
    #[serde(default = "default_tone_ms")]
    pub tone_ms: u64,
    /// Shell command that records speech and prints the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech_command: Option<String>,
}

fn default_mobile_breakpoint() -> u32 {
    768
}
fn default_small_breakpoint() -> u32 {
    480
}
fn default_tiny_breakpoint() -> u32 {
    360
}
fn default_resize_threshold() -> u32 {
    100
}
fn default_cell_width_px() -> u32 {
    8
}
fn default_quiz_size() -> usize {
    DEFAULT_QUIZ_SIZE
}
fn default_quiz_advance_ms() -> u64 {
    1500
}
fn default_notification_ms() -> u64 {
    3000
}
fn default_tone_hz() -> f32 {
    660.0
}
fn default_tone_volume() -> f32 {
    0.2
}
fn default_tone_ms() -> u64 {
    40
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mobile_breakpoint: default_mobile_breakpoint(),
            small_breakpoint: default_small_breakpoint(),
            tiny_breakpoint: default_tiny_breakpoint(),
            resize_threshold: default_resize_threshold(),
            cell_width_px: default_cell_width_px(),
            quiz_size: default_quiz_size(),
            quiz_advance_ms: default_quiz_advance_ms(),
            notification_ms: default_notification_ms(),
            tone_hz: default_tone_hz(),
            tone_volume: default_tone_volume(),
            tone_ms: default_tone_ms(),
            speech_command: None,
        }
    }
}

impl Config {
    /// Load from `path`, or the default location when `None`. A missing file
    /// yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, path: Option<&Path>) -> Result<()> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vkbd")
            .join("config.toml")
    }

    /// Clamp values into usable ranges. Breakpoints that are out of order are
    /// reset together.
    pub fn validate(&mut self) {
        if !(self.tiny_breakpoint <= self.small_breakpoint
            && self.small_breakpoint <= self.mobile_breakpoint)
        {
            log::warn!(
                "breakpoints {}/{}/{} are out of order, using defaults",
                self.mobile_breakpoint,
                self.small_breakpoint,
                self.tiny_breakpoint
            );
            self.mobile_breakpoint = default_mobile_breakpoint();
            self.small_breakpoint = default_small_breakpoint();
            self.tiny_breakpoint = default_tiny_breakpoint();
        }
        self.cell_width_px = self.cell_width_px.clamp(1, 64);
        self.quiz_size = self.quiz_size.clamp(1, WORD_POOL.len());
        self.quiz_advance_ms = self.quiz_advance_ms.clamp(100, 10_000);
        self.notification_ms = self.notification_ms.clamp(500, 30_000);
        self.tone_hz = self.tone_hz.clamp(100.0, 4000.0);
        self.tone_volume = self.tone_volume.clamp(0.0, 1.0);
        self.tone_ms = self.tone_ms.clamp(5, 500);
        if self
            .speech_command
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            self.speech_command = None;
        }
    }

    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            breakpoints: Breakpoints {
                mobile: self.mobile_breakpoint,
                small: self.small_breakpoint,
                tiny: self.tiny_breakpoint,
            },
            resize_threshold: self.resize_threshold,
        }
    }

    pub fn tone(&self) -> Tone {
        Tone {
            hz: self.tone_hz,
            duration: Duration::from_millis(self.tone_ms),
        }
    }

    pub fn quiz_advance(&self) -> Duration {
        Duration::from_millis(self.quiz_advance_ms)
    }

    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
