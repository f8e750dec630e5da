use std::fs;

use ratatui::style::Color;
use rust_embed::Embed;
use serde::{Deserialize, Serialize};

#[derive(Embed)]
#[folder = "assets/themes/"]
struct ThemeAssets;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub key_bg: String,
    pub key_fg: String,
    pub key_special_bg: String,
    pub key_pressed_bg: String,
    /// Caps and Shift while latched.
    pub key_active_bg: String,
    /// Keys highlighted by the active lesson.
    pub key_focus: String,
    pub accent: String,
    pub border: String,
    pub header_bg: String,
    pub header_fg: String,
    pub placeholder: String,
    pub prediction: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// A theme by name: the user's themes directory first, then the bundled set.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("vkbd")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path) {
                match toml::from_str::<Theme>(&content) {
                    Ok(theme) => return Some(theme),
                    Err(e) => log::warn!("{} is invalid: {e}", user_theme_path.display()),
                }
            }
        }

        let filename = format!("{name}.toml");
        let file = ThemeAssets::get(&filename)?;
        let content = std::str::from_utf8(file.data.as_ref()).ok()?;
        toml::from_str::<Theme>(content).ok()
    }

    /// Bundled theme names, sorted with `default` first.
    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = ThemeAssets::iter()
            .filter_map(|f| f.strip_suffix(".toml").map(|n| n.to_string()))
            .collect();
        names.sort_by_key(|n| (n != "default", n.clone()));
        names
    }

    /// The theme after `current` in [`Theme::available_themes`], wrapping.
    pub fn next_name(current: &str) -> String {
        let names = Self::available_themes();
        let next = names
            .iter()
            .position(|n| n == current)
            .map_or(0, |i| (i + 1) % names.len());
        names
            .get(next)
            .cloned()
            .unwrap_or_else(|| "default".to_string())
    }

    /// Load `name`, falling back to the default theme when it does not exist.
    pub fn load_or_default(name: &str) -> Self {
        Self::load(name).unwrap_or_else(|| {
            log::warn!("theme {name:?} not found, using default");
            Self::default()
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::load("default").unwrap_or_else(|| Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        })
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            key_bg: "#313244".to_string(),
            key_fg: "#cdd6f4".to_string(),
            key_special_bg: "#45475a".to_string(),
            key_pressed_bg: "#89b4fa".to_string(),
            key_active_bg: "#f5c2e7".to_string(),
            key_focus: "#f9e2af".to_string(),
            accent: "#89b4fa".to_string(),
            border: "#45475a".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            placeholder: "#585b70".to_string(),
            prediction: "#94e2d5".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#f9e2af".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return Color::Rgb(r, g, b);
            }
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn key_bg(&self) -> Color { Self::parse_color(&self.key_bg) }
    pub fn key_fg(&self) -> Color { Self::parse_color(&self.key_fg) }
    pub fn key_special_bg(&self) -> Color { Self::parse_color(&self.key_special_bg) }
    pub fn key_pressed_bg(&self) -> Color { Self::parse_color(&self.key_pressed_bg) }
    pub fn key_active_bg(&self) -> Color { Self::parse_color(&self.key_active_bg) }
    pub fn key_focus(&self) -> Color { Self::parse_color(&self.key_focus) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn placeholder(&self) -> Color { Self::parse_color(&self.placeholder) }
    pub fn prediction(&self) -> Color { Self::parse_color(&self.prediction) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
