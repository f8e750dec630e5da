use crate::keyboard::shift::shifted_char;

/// Caps Lock and one-shot Shift.
///
/// Both flags shift-map the next character; only `shift_active` is cleared
/// by typing it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierState {
    pub caps_lock: bool,
    pub shift_active: bool,
}

impl ModifierState {
    pub fn toggle_caps(&mut self) -> bool {
        self.caps_lock = !self.caps_lock;
        self.caps_lock
    }

    pub fn toggle_shift(&mut self) -> bool {
        self.shift_active = !self.shift_active;
        self.shift_active
    }

    pub fn is_shifted(&self) -> bool {
        self.caps_lock || self.shift_active
    }

    /// Character to emit for `ch`, consuming a pending one-shot Shift.
    pub fn apply(&mut self, ch: char) -> char {
        let out = if self.is_shifted() { shifted_char(ch) } else { ch };
        self.shift_active = false;
        out
    }
}
