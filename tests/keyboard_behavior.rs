use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

use vkbd::engine::prediction::Predictor;
use vkbd::engine::quiz::{DEFAULT_QUIZ_SIZE, QuizSession, WORD_POOL};
use vkbd::keyboard::grid::{GridSettings, KeyGrid};
use vkbd::keyboard::layout::{KeyClass, QWERTY};
use vkbd::keyboard::shift::SHIFT_PAIRS;
use vkbd::session::input::KeyOutcome;
use vkbd::session::keyboard::KeyboardWidget;
use vkbd::store::json_store::JsonStore;
use vkbd::store::schema::{SETTINGS_FILE, Settings};

fn widget() -> KeyboardWidget {
    KeyboardWidget::new(
        KeyGrid::new(1200, GridSettings::default()),
        Predictor::load(),
        true,
    )
}

fn printable_keys() -> Vec<&'static str> {
    QWERTY
        .iter()
        .flat_map(|row| row.iter())
        .filter(|def| def.class == KeyClass::Character)
        .map(|def| def.key)
        .collect()
}

fn expected_shifted(ch: char) -> char {
    SHIFT_PAIRS
        .iter()
        .find(|(base, _)| *base == ch)
        .map(|(_, shifted)| *shifted)
        .unwrap_or_else(|| ch.to_ascii_uppercase())
}

#[test]
fn shift_applies_to_the_next_character_only() {
    let mut kb = widget();
    for key in ["a", "Shift", "a", "a"] {
        kb.handle_key_press(key);
    }
    assert_eq!(kb.buffer.text(), "aAa");
    assert!(!kb.modifiers.shift_active);
    assert!(!kb.modifiers.caps_lock);
}

#[test]
fn every_printable_key_shifts_per_table() {
    for key in printable_keys() {
        let base = key.chars().next().unwrap();
        let expected = expected_shifted(base);

        let mut kb = widget();
        kb.handle_key_press("Shift");
        assert_eq!(kb.handle_key_press(key), KeyOutcome::Inserted(expected), "shift {key}");
        assert!(!kb.modifiers.shift_active);

        let mut kb = widget();
        kb.handle_key_press("Caps");
        kb.handle_key_press(key);
        kb.handle_key_press(key);
        assert_eq!(kb.buffer.text(), format!("{expected}{expected}"), "caps {key}");
        assert!(kb.modifiers.caps_lock);
    }
}

#[test]
fn unshifted_keys_type_themselves() {
    let mut kb = widget();
    let keys = printable_keys();
    for key in &keys {
        kb.handle_key_press(key);
    }
    assert_eq!(kb.buffer.text(), keys.concat());
}

#[test]
fn backspace_on_empty_buffer_is_a_no_op() {
    let mut kb = widget();
    assert_eq!(kb.handle_key_press("Backspace"), KeyOutcome::NoOp);
    assert_eq!(kb.buffer.text(), "");
    kb.handle_key_press("x");
    kb.handle_key_press("Backspace");
    kb.handle_key_press("Backspace");
    assert_eq!(kb.buffer.text(), "");
}

#[test]
fn clicks_and_physical_presses_produce_the_same_text() {
    let mut typed = widget();
    for key in ["h", "Shift", "i", " ", "Enter"] {
        typed.key_down(key);
        typed.key_up(key);
    }

    let mut clicked = widget();
    for key in ["h", "Shift", "i", " ", "Enter"] {
        let id = clicked.grid.find(key)[0];
        clicked.click(id);
        clicked.grid.clear_pressed();
    }
    assert_eq!(typed.buffer.text(), "hI \n");
    assert_eq!(clicked.buffer.text(), typed.buffer.text());
}

#[test]
fn predictions_complete_the_current_word() {
    let mut kb = widget();
    kb.handle_key_press("t");
    assert!(kb.predictions().is_empty());
    kb.handle_key_press("h");
    assert_eq!(kb.predictions().first().map(String::as_str), Some("the"));
    assert!(kb.predictions().len() <= 3);
    assert_eq!(kb.accept_prediction(0).as_deref(), Some("the"));
    assert_eq!(kb.buffer.text(), "the ");
    assert!(kb.predictions().is_empty());
}

#[test]
fn quiz_draws_distinct_words_from_the_pool() {
    for seed in 0..50 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let quiz = QuizSession::start(WORD_POOL, DEFAULT_QUIZ_SIZE, &mut rng);
        assert_eq!(quiz.total(), 5);
        let distinct: HashSet<&str> = quiz.words().iter().map(String::as_str).collect();
        assert_eq!(distinct.len(), 5);
        assert!(distinct.iter().all(|w| WORD_POOL.contains(w)));
    }
}

#[test]
fn quiz_score_stays_in_bounds() {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut quiz = QuizSession::start(WORD_POOL, DEFAULT_QUIZ_SIZE, &mut rng);
    let mut expected = 0;
    for i in 0..quiz.total() {
        let answer = if i % 2 == 0 {
            expected += 1;
            quiz.current_word().unwrap().to_string()
        } else {
            "zzz".to_string()
        };
        quiz.submit(&format!("  {answer} "));
        quiz.advance();
    }
    assert!(quiz.is_finished());
    assert_eq!(quiz.score(), expected);
    assert_eq!(quiz.percentage(), 60);
}

#[test]
fn settings_survive_a_restart() {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(store.load_settings(), Settings::default());

    let settings = Settings {
        theme: "ocean".to_string(),
        sound_enabled: false,
        predictions_enabled: true,
    };
    store.save_settings(&settings).unwrap();

    let reopened = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    assert_eq!(reopened.load_settings(), settings);

    let raw = std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
    assert!(raw.contains("\"soundEnabled\": false"));
}
