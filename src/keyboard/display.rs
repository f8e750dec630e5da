//! Key names: parsing the strings produced by clicks and physical key events,
//! and turning layout names back into labels.
//!
//! Every input path produces a key-name string (`"a"`, `"Shift"`, `" "`, …) and
//! hands it to [`KeyName::parse`]. Matching is case-insensitive; single-character
//! names keep their original case so they can be typed verbatim.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, ModifierKeyCode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyName {
    Backspace,
    Enter,
    Tab,
    Space,
    Caps,
    Shift,
    Ctrl,
    Alt,
    Char(char),
    /// Multi-character names with no binding (`"Escape"`, `"F5"`, …).
    Ignored,
}

impl KeyName {
    pub fn parse(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            return if ch == ' ' { KeyName::Space } else { KeyName::Char(ch) };
        }

        match name.to_lowercase().as_str() {
            "backspace" => KeyName::Backspace,
            "enter" => KeyName::Enter,
            "tab" => KeyName::Tab,
            "space" => KeyName::Space,
            "caps" | "capslock" => KeyName::Caps,
            "shift" => KeyName::Shift,
            "ctrl" | "control" => KeyName::Ctrl,
            "alt" => KeyName::Alt,
            _ => KeyName::Ignored,
        }
    }

    pub fn is_control(self) -> bool {
        !matches!(self, KeyName::Char(_) | KeyName::Ignored)
    }
}

/// Lowercase lookup key used to find rendered keys for a key name.
///
/// Folds the aliases produced by physical events onto the layout's own names.
pub fn normalize_for_lookup(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.as_str() {
        "capslock" => "caps".to_string(),
        "space" => " ".to_string(),
        "control" => "ctrl".to_string(),
        _ => lower,
    }
}

/// Short label for narrow keyboards. Returns the label unchanged when it is
/// already short.
pub fn key_short_label(label: &str) -> &str {
    match label {
        "Backspace" => "Bksp",
        "Enter" => "Ent",
        "Shift" => "Shft",
        "Space" => "Spc",
        _ => label,
    }
}

/// Key name for a physical key event, in the same vocabulary as layout keys.
/// Returns `None` for keys the widget does not route (arrows, function keys…).
pub fn key_event_name(key: &KeyEvent) -> Option<String> {
    let name = match key.code {
        KeyCode::Char(ch) => return Some(ch.to_string()),
        KeyCode::Backspace => "Backspace",
        KeyCode::Enter => "Enter",
        KeyCode::Tab => "Tab",
        KeyCode::CapsLock => "CapsLock",
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => "Shift",
            ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => "Control",
            ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt => "Alt",
            _ => return None,
        },
        _ => return None,
    };
    Some(name.to_string())
}

/// True for bare Shift, Ctrl, Alt and Caps Lock events.
pub fn is_modifier_event(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Modifier(_) | KeyCode::CapsLock)
}

/// Key name to type for a physical press. Releases yield nothing, and so
/// does auto-repeat of a modifier key, which would otherwise toggle Shift or
/// Caps Lock over and over while held.
pub fn key_press_name(key: &KeyEvent) -> Option<String> {
    match key.kind {
        KeyEventKind::Release => None,
        KeyEventKind::Repeat if is_modifier_event(key) => None,
        _ => key_event_name(key),
    }
}
