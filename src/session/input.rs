use crate::keyboard::display::KeyName;
use crate::session::buffer::OutputBuffer;
use crate::session::modifier::ModifierState;

/// What a key press did to the buffer or the modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Inserted(char),
    Deleted,
    CapsToggled(bool),
    ShiftToggled(bool),
    NoOp,
}

impl KeyOutcome {
    pub fn changed_text(self) -> bool {
        matches!(self, KeyOutcome::Inserted(_) | KeyOutcome::Deleted)
    }
}

/// Apply one normalized key to the buffer and modifiers.
///
/// Space, Enter and Tab append their whitespace without consuming a pending
/// Shift; only single-character keys go through the shift map.
pub fn process_key(
    buffer: &mut OutputBuffer,
    modifiers: &mut ModifierState,
    key: KeyName,
) -> KeyOutcome {
    match key {
        KeyName::Backspace => {
            if buffer.backspace().is_some() {
                KeyOutcome::Deleted
            } else {
                KeyOutcome::NoOp
            }
        }
        KeyName::Enter => insert(buffer, '\n'),
        KeyName::Tab => insert(buffer, '\t'),
        KeyName::Space => insert(buffer, ' '),
        KeyName::Caps => KeyOutcome::CapsToggled(modifiers.toggle_caps()),
        KeyName::Shift => KeyOutcome::ShiftToggled(modifiers.toggle_shift()),
        KeyName::Ctrl | KeyName::Alt | KeyName::Ignored => KeyOutcome::NoOp,
        KeyName::Char(ch) => {
            let out = modifiers.apply(ch);
            insert(buffer, out)
        }
    }
}

fn insert(buffer: &mut OutputBuffer, ch: char) -> KeyOutcome {
    buffer.push(ch);
    KeyOutcome::Inserted(ch)
}
