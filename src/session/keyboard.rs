use crate::engine::lesson::Lesson;
use crate::engine::prediction::Predictor;
use crate::keyboard::display::KeyName;
use crate::keyboard::grid::{KeyGrid, KeyId};
use crate::session::buffer::OutputBuffer;
use crate::session::input::{self, KeyOutcome};
use crate::session::modifier::ModifierState;

/// The on-screen keyboard and the text it writes.
///
/// Clicks and physical key presses both end up in [`handle_key_press`], so they
/// behave identically; they differ only in which keys get highlighted.
///
/// [`handle_key_press`]: KeyboardWidget::handle_key_press
pub struct KeyboardWidget {
    pub buffer: OutputBuffer,
    pub modifiers: ModifierState,
    pub grid: KeyGrid,
    predictor: Predictor,
    predictions: Vec<String>,
    predictions_enabled: bool,
}

impl KeyboardWidget {
    pub fn new(grid: KeyGrid, predictor: Predictor, predictions_enabled: bool) -> Self {
        Self {
            buffer: OutputBuffer::new(),
            modifiers: ModifierState::default(),
            grid,
            predictor,
            predictions: Vec::new(),
            predictions_enabled,
        }
    }

    pub fn handle_key_press(&mut self, name: &str) -> KeyOutcome {
        let outcome = input::process_key(&mut self.buffer, &mut self.modifiers, KeyName::parse(name));
        if outcome.changed_text() {
            self.refresh_predictions();
        }
        outcome
    }

    /// Physical key down: highlight the matching keys, then type.
    pub fn key_down(&mut self, name: &str) -> KeyOutcome {
        self.grid.set_pressed(name, true);
        self.handle_key_press(name)
    }

    pub fn key_up(&mut self, name: &str) {
        self.grid.set_pressed(name, false);
    }

    /// Click on a rendered key. Only the clicked key is highlighted.
    pub fn click(&mut self, id: KeyId) -> Option<KeyOutcome> {
        let key = self.grid.key(id)?.key;
        self.grid.set_pressed_id(id, true);
        Some(self.handle_key_press(key))
    }

    /// Append text verbatim (emoji, dictation). Modifiers are left alone.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.buffer.push_str(text);
        self.refresh_predictions();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.buffer.set_placeholder(None);
        self.refresh_predictions();
    }

    pub fn load_lesson(&mut self, lesson: &Lesson) {
        self.buffer.clear();
        self.buffer
            .set_placeholder(Some(lesson.practice_text.to_string()));
        self.refresh_predictions();
    }

    pub fn predictions(&self) -> &[String] {
        &self.predictions
    }

    pub fn predictions_enabled(&self) -> bool {
        self.predictions_enabled
    }

    pub fn set_predictions_enabled(&mut self, enabled: bool) {
        self.predictions_enabled = enabled;
        self.refresh_predictions();
    }

    /// Replace the word being typed with prediction `index`, plus a space.
    pub fn accept_prediction(&mut self, index: usize) -> Option<String> {
        let word = self.predictions.get(index)?.clone();
        self.buffer.replace_current_word(&word);
        self.refresh_predictions();
        Some(word)
    }

    fn refresh_predictions(&mut self) {
        self.predictions = if self.predictions_enabled {
            self.predictor
                .candidates(self.buffer.current_word())
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };
    }
}
