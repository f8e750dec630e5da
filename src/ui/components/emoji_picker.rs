use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Clear, Widget};

use crate::engine::emoji::{EMOJI, EmojiPicker, PICKER_COLUMNS};
use crate::ui::theme::Theme;

/// Terminal columns per emoji cell.
const CELL_WIDTH: u16 = 4;

pub struct EmojiPickerView<'a> {
    picker: &'a EmojiPicker,
    theme: &'a Theme,
}

impl<'a> EmojiPickerView<'a> {
    pub fn new(picker: &'a EmojiPicker, theme: &'a Theme) -> Self {
        Self { picker, theme }
    }
}

/// Index of the emoji under `(column, row)` when the picker is drawn into `area`.
pub fn emoji_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let inner = Block::bordered().inner(area);
    if column < inner.x || row < inner.y {
        return None;
    }
    let col = ((column - inner.x) / CELL_WIDTH) as usize;
    let line = (row - inner.y) as usize;
    let index = line * PICKER_COLUMNS + col;
    (col < PICKER_COLUMNS && index < EMOJI.len()).then_some(index)
}

impl Widget for EmojiPickerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(format!(" Emoji: {} ", self.picker.selected_name()))
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, (emoji, _)) in EMOJI.iter().enumerate() {
            let x = inner.x + (i % PICKER_COLUMNS) as u16 * CELL_WIDTH;
            let y = inner.y + (i / PICKER_COLUMNS) as u16;
            if y >= inner.y + inner.height || x + CELL_WIDTH > inner.x + inner.width {
                continue;
            }
            let style = if i == self.picker.selected {
                Style::default()
                    .bg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            buf.set_string(x, y, format!(" {emoji} "), style);
        }
    }
}
