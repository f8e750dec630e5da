const COMMON_WORDS: &str = include_str!("../../assets/common-words.json");

pub const MAX_PREDICTIONS: usize = 3;
pub const MIN_PREFIX_CHARS: usize = 2;

/// Prefix completion over a fixed list of common words.
pub struct Predictor {
    words: Vec<String>,
}

impl Predictor {
    pub fn load() -> Self {
        let words: Vec<String> = match serde_json::from_str(COMMON_WORDS) {
            Ok(words) => words,
            Err(e) => {
                log::warn!("bundled word list unreadable, predictions disabled: {e}");
                Vec::new()
            }
        };
        Self::with_words(words)
    }

    pub fn with_words(words: Vec<String>) -> Self {
        let words = words.into_iter().map(|w| w.to_lowercase()).collect();
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Up to [`MAX_PREDICTIONS`] words starting with `prefix`, in list order.
    /// The prefix itself is never suggested, and prefixes shorter than
    /// [`MIN_PREFIX_CHARS`] yield nothing.
    pub fn candidates(&self, prefix: &str) -> Vec<&str> {
        if prefix.chars().count() < MIN_PREFIX_CHARS {
            return Vec::new();
        }
        let prefix = prefix.to_lowercase();
        self.words
            .iter()
            .filter(|w| w.starts_with(&prefix) && **w != prefix)
            .take(MAX_PREDICTIONS)
            .map(|w| w.as_str())
            .collect()
    }
}
