use std::collections::HashSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Widget};

use crate::keyboard::display::key_short_label;
use crate::keyboard::grid::{KeyGrid, KeyId, RenderedKey};
use crate::keyboard::layout::KeyClass;
use crate::session::modifier::ModifierState;
use crate::ui::theme::Theme;

pub struct KeyboardView<'a> {
    grid: &'a KeyGrid,
    modifiers: ModifierState,
    focus: HashSet<KeyId>,
    theme: &'a Theme,
}

impl<'a> KeyboardView<'a> {
    pub fn new(grid: &'a KeyGrid, modifiers: ModifierState, theme: &'a Theme) -> Self {
        Self {
            grid,
            modifiers,
            focus: HashSet::new(),
            theme,
        }
    }

    /// Highlight every key named in `names` (lesson keys).
    pub fn focus<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.focus.extend(self.grid.find(name.as_ref()).iter().copied());
        }
        self
    }

    /// Area the keys are laid out in when the view is drawn into `area`.
    pub fn inner(area: Rect) -> Rect {
        Block::bordered().inner(area)
    }
}

/// Caps while caps lock is on, both Shift keys while shift is pending.
pub fn is_latched(key: &RenderedKey, modifiers: ModifierState) -> bool {
    if key.key.eq_ignore_ascii_case("caps") {
        modifiers.caps_lock
    } else if key.key.eq_ignore_ascii_case("shift") {
        modifiers.shift_active
    } else {
        false
    }
}

/// Text drawn on a key: short labels on small tiers, the shifted character
/// while shifted, and both characters on symbol keys when there is room.
fn key_text(key: &RenderedKey, modifiers: ModifierState, small: bool, width: u16) -> String {
    if key.class != KeyClass::Character {
        return if small {
            key_short_label(key.label).to_string()
        } else {
            key.label.to_string()
        };
    }
    if modifiers.is_shifted() {
        return match key.shifted {
            Some(shifted) => shifted.to_string(),
            None => key.label.to_uppercase(),
        };
    }
    match key.shifted {
        Some(shifted) if width >= 5 => format!("{shifted} {}", key.label),
        _ => key.label.to_string(),
    }
}

fn centered(text: &str, width: u16) -> String {
    let width = width as usize;
    let text: String = text.chars().take(width).collect();
    let len = text.chars().count();
    let left = (width - len) / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(width - len - left))
}

impl Widget for KeyboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" Keyboard ({}) ", self.grid.tier().as_str()))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let small = self.grid.tier().is_small();
        for (id, rect) in self.grid.layout(inner) {
            let Some(key) = self.grid.key(id) else {
                continue;
            };

            let bg = if key.pressed {
                colors.key_pressed_bg()
            } else if is_latched(key, self.modifiers) {
                colors.key_active_bg()
            } else if key.class == KeyClass::Character {
                colors.key_bg()
            } else {
                colors.key_special_bg()
            };
            let mut style = Style::default().bg(bg).fg(colors.key_fg());
            if key.pressed || is_latched(key, self.modifiers) {
                style = style.fg(colors.bg()).add_modifier(Modifier::BOLD);
            } else if self.focus.contains(&id) {
                style = style.fg(colors.key_focus()).add_modifier(Modifier::BOLD);
            }

            let text = key_text(key, self.modifiers, small, rect.width);
            if rect.height >= 3 && rect.width >= 3 {
                let key_block = Block::bordered()
                    .border_style(Style::default().fg(colors.border()).bg(bg))
                    .style(style);
                let key_inner = key_block.inner(rect);
                key_block.render(rect, buf);
                buf.set_string(
                    key_inner.x,
                    key_inner.y,
                    centered(&text, key_inner.width),
                    style,
                );
            } else {
                // Leave a one-cell gap between single-line keys when there is room.
                let width = if rect.width > 2 { rect.width - 1 } else { rect.width };
                buf.set_string(rect.x, rect.y, centered(&text, width), style);
            }
        }
    }
}
