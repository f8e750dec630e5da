use rand::Rng;
use rand::seq::SliceRandom;

pub const WORD_POOL: &[&str] = &[
    "keyboard",
    "typing",
    "practice",
    "computer",
    "program",
    "developer",
    "language",
    "function",
];

pub const DEFAULT_QUIZ_SIZE: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    /// Waiting for an answer to the current word.
    Awaiting,
    /// The current word was scored; waiting for the advance timer.
    Feedback { correct: bool },
    Finished,
}

/// One run of the typing quiz: each sampled word is shown once and scored
/// once, in order.
#[derive(Clone, Debug)]
pub struct QuizSession {
    words: Vec<String>,
    current_index: usize,
    score: usize,
    phase: QuizPhase,
}

impl QuizSession {
    /// Sample `size` distinct words from `pool`: shuffle, keep the first `size`.
    pub fn start<R: Rng + ?Sized>(pool: &[&str], size: usize, rng: &mut R) -> Self {
        let mut words: Vec<String> = pool.iter().map(|w| w.to_string()).collect();
        words.shuffle(rng);
        words.truncate(size);
        Self::from_words(words)
    }

    pub fn from_words(words: Vec<String>) -> Self {
        let phase = if words.is_empty() {
            QuizPhase::Finished
        } else {
            QuizPhase::Awaiting
        };
        Self {
            words,
            current_index: 0,
            score: 0,
            phase,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuizPhase::Finished
    }

    pub fn current_word(&self) -> Option<&str> {
        if self.is_finished() {
            return None;
        }
        self.words.get(self.current_index).map(|w| w.as_str())
    }

    /// Score `answer` against the current word (trimmed, case-insensitive).
    /// Only the first submission per word counts; later ones return `None`.
    pub fn submit(&mut self, answer: &str) -> Option<bool> {
        if self.phase != QuizPhase::Awaiting {
            return None;
        }
        let word = self.words.get(self.current_index)?;
        let correct = answer.trim().to_lowercase() == word.to_lowercase();
        if correct {
            self.score += 1;
        }
        self.phase = QuizPhase::Feedback { correct };
        Some(correct)
    }

    /// Move past a scored word. Returns true once the quiz is finished.
    pub fn advance(&mut self) -> bool {
        if let QuizPhase::Feedback { .. } = self.phase {
            self.current_index += 1;
            self.phase = if self.current_index >= self.total() {
                QuizPhase::Finished
            } else {
                QuizPhase::Awaiting
            };
        }
        self.is_finished()
    }

    pub fn percentage(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        (self.score as f64 / self.total() as f64 * 100.0).round() as u32
    }
}
