pub const EMOJI: &[(&str, &str)] = &[
    ("😀", "grinning"),
    ("😂", "joy"),
    ("😊", "blush"),
    ("😍", "heart eyes"),
    ("😎", "cool"),
    ("🤔", "thinking"),
    ("😢", "cry"),
    ("😡", "angry"),
    ("👍", "thumbs up"),
    ("👎", "thumbs down"),
    ("👏", "clap"),
    ("🙏", "pray"),
    ("👋", "wave"),
    ("💪", "strong"),
    ("❤", "heart"),
    ("🔥", "fire"),
    ("⭐", "star"),
    ("🎉", "party"),
    ("✅", "check"),
    ("❌", "cross"),
    ("⚡", "zap"),
    ("🚀", "rocket"),
    ("💡", "idea"),
    ("☕", "coffee"),
];

pub const PICKER_COLUMNS: usize = 8;

/// Cursor over the emoji grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmojiPicker {
    pub selected: usize,
}

impl EmojiPicker {
    pub fn selected_emoji(&self) -> &'static str {
        EMOJI[self.selected.min(EMOJI.len() - 1)].0
    }

    pub fn selected_name(&self) -> &'static str {
        EMOJI[self.selected.min(EMOJI.len() - 1)].1
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % EMOJI.len();
    }

    pub fn prev(&mut self) {
        self.selected = self.selected.checked_sub(1).unwrap_or(EMOJI.len() - 1);
    }

    pub fn down(&mut self) {
        if self.selected + PICKER_COLUMNS < EMOJI.len() {
            self.selected += PICKER_COLUMNS;
        }
    }

    pub fn up(&mut self) {
        if self.selected >= PICKER_COLUMNS {
            self.selected -= PICKER_COLUMNS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_movement_wraps() {
        let mut picker = EmojiPicker::default();
        picker.prev();
        assert_eq!(picker.selected, EMOJI.len() - 1);
        picker.next();
        assert_eq!(picker.selected, 0);
        assert_eq!(picker.selected_emoji(), "😀");
    }

    #[test]
    fn test_vertical_movement_stays_in_grid() {
        let mut picker = EmojiPicker::default();
        picker.up();
        assert_eq!(picker.selected, 0);
        picker.down();
        assert_eq!(picker.selected, PICKER_COLUMNS);
        picker.down();
        picker.down();
        assert_eq!(picker.selected, PICKER_COLUMNS * 2);
        assert_eq!(picker.selected_name(), "star");
    }
}
