/// Text written by the keyboard.
///
/// Grows at the end only; [`OutputBuffer::backspace`] removes the last char and
/// [`OutputBuffer::clear`] empties it. The placeholder is shown while the
/// buffer is empty (lesson practice text).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    text: String,
    placeholder: Option<String>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn backspace(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// The word being typed: everything after the last whitespace.
    pub fn current_word(&self) -> &str {
        self.text.rsplit(char::is_whitespace).next().unwrap_or("")
    }

    /// Replace the word being typed with `word`, followed by a space.
    pub fn replace_current_word(&mut self, word: &str) {
        let keep = self.text.len() - self.current_word().len();
        self.text.truncate(keep);
        self.text.push_str(word);
        self.text.push(' ');
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }
}
