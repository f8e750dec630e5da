use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;
use ratatui::layout::Rect;

use crate::audio::SoundPlayer;
use crate::config::Config;
use crate::engine::emoji::EmojiPicker;
use crate::engine::lesson::{self, LESSONS, Lesson};
use crate::engine::prediction::Predictor;
use crate::engine::quiz::{QuizSession, WORD_POOL};
use crate::keyboard::display::KeyName;
use crate::keyboard::grid::{KeyGrid, viewport_width};
use crate::platform::clipboard::{Clipboard, SystemClipboard};
use crate::platform::speech::{SpeechEvent, SpeechRecognizer, create_recognizer};
use crate::session::input::KeyOutcome;
use crate::session::keyboard::KeyboardWidget;
use crate::store::json_store::JsonStore;
use crate::store::schema::Settings;
use crate::timer::Timer;
use crate::ui::components::emoji_picker::emoji_at;
use crate::ui::components::keyboard_view::KeyboardView;
use crate::ui::components::prediction_bar::candidate_at;
use crate::ui::layout::{AppLayout, centered_rect};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Highlights are cleared this long after a press when the terminal never
/// reports the release.
const HIGHLIGHT_FALLBACK: Duration = Duration::from_millis(150);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Keyboard,
    Quiz,
    Lessons,
    Emoji,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

/// Side-effecting capabilities, injectable so tests can run headless.
pub struct Services {
    pub store: Option<JsonStore>,
    pub sound: SoundPlayer,
    pub clipboard: Box<dyn Clipboard>,
    pub speech: Box<dyn SpeechRecognizer>,
}

impl Services {
    pub fn system(config: &Config) -> Self {
        let store = match JsonStore::new() {
            Ok(store) => Some(store),
            Err(e) => {
                log::warn!("settings store unavailable: {e}");
                None
            }
        };
        Self {
            store,
            sound: SoundPlayer::spawn(config.tone(), config.tone_volume),
            clipboard: Box::new(SystemClipboard),
            speech: create_recognizer(config.speech_command.as_deref()),
        }
    }
}

pub struct App {
    pub screen: AppScreen,
    pub keyboard: KeyboardWidget,
    pub settings: Settings,
    pub config: Config,
    pub theme: Theme,
    pub quiz: Option<QuizSession>,
    pub quiz_input: LineInput,
    pub lesson_selected: usize,
    pub active_lesson: Option<usize>,
    pub emoji: EmojiPicker,
    pub frame_size: Rect,
    pub should_quit: bool,
    store: Option<JsonStore>,
    sound: SoundPlayer,
    clipboard: Box<dyn Clipboard>,
    speech: Box<dyn SpeechRecognizer>,
    quiz_advance: Timer<()>,
    notification: Timer<Notification>,
    highlight_release: Timer<()>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config, settings: Settings, services: Services, frame_size: Rect, pixel_width: u16) -> Self {
        Self::with_rng(config, settings, services, frame_size, pixel_width, SmallRng::from_entropy())
    }

    pub fn with_rng(
        config: Config,
        settings: Settings,
        services: Services,
        frame_size: Rect,
        pixel_width: u16,
        rng: SmallRng,
    ) -> Self {
        let width = viewport_width(frame_size.width, pixel_width, config.cell_width_px);
        let grid = KeyGrid::new(width, config.grid_settings());
        log::info!("keyboard laid out at {width}px ({})", grid.tier().as_str());
        let keyboard = KeyboardWidget::new(grid, Predictor::load(), settings.predictions_enabled);
        let theme = Theme::load_or_default(&settings.theme);

        Self {
            screen: AppScreen::Keyboard,
            keyboard,
            settings,
            config,
            theme,
            quiz: None,
            quiz_input: LineInput::default(),
            lesson_selected: 0,
            active_lesson: None,
            emoji: EmojiPicker::default(),
            frame_size,
            should_quit: false,
            store: services.store,
            sound: services.sound,
            clipboard: services.clipboard,
            speech: services.speech,
            quiz_advance: Timer::new(),
            notification: Timer::new(),
            highlight_release: Timer::new(),
            rng,
        }
    }

    // ── layout ──────────────────────────────────────────────────────────

    pub fn layout(&self) -> AppLayout {
        AppLayout::new(self.frame_size, self.keyboard.grid.tier())
    }

    /// Area of the quiz, lesson and emoji overlays.
    pub fn popup_area(&self) -> Rect {
        centered_rect(60, 60, self.frame_size)
    }

    pub fn on_resize(&mut self, columns: u16, rows: u16, pixel_width: u16) {
        self.frame_size = Rect::new(0, 0, columns, rows);
        let width = viewport_width(columns, pixel_width, self.config.cell_width_px);
        if self.keyboard.grid.on_resize(width) {
            log::info!(
                "keyboard re-laid out at {width}px ({})",
                self.keyboard.grid.tier().as_str()
            );
        }
    }

    // ── keys ────────────────────────────────────────────────────────────

    /// Physical key press, by key name.
    pub fn key_down(&mut self, name: &str) -> KeyOutcome {
        let outcome = self.keyboard.key_down(name);
        self.after_key(name);
        outcome
    }

    pub fn key_up(&mut self, name: &str) {
        self.keyboard.key_up(name);
        if !self.keyboard.grid.any_pressed() {
            self.highlight_release.cancel();
        }
    }

    /// Left click at a terminal cell.
    pub fn click(&mut self, column: u16, row: u16) {
        match self.screen {
            AppScreen::Keyboard => self.click_keyboard(column, row),
            AppScreen::Emoji => {
                if let Some(index) = emoji_at(self.popup_area(), column, row) {
                    self.emoji.selected = index;
                    self.insert_selected_emoji();
                }
            }
            _ => {}
        }
    }

    fn click_keyboard(&mut self, column: u16, row: u16) {
        let layout = self.layout();
        let keys_area = KeyboardView::inner(layout.keyboard);
        if let Some(id) = self.keyboard.grid.hit_test(keys_area, column, row) {
            let Some(name) = self.keyboard.grid.key(id).map(|k| k.key) else {
                return;
            };
            self.keyboard.click(id);
            self.after_key(name);
        } else if let Some(index) =
            candidate_at(self.keyboard.predictions(), layout.predictions, column, row)
        {
            self.accept_prediction(index);
        }
    }

    pub fn mouse_up(&mut self) {
        self.keyboard.grid.clear_pressed();
        self.highlight_release.cancel();
    }

    fn after_key(&mut self, name: &str) {
        if self.settings.sound_enabled {
            self.sound.play_key(KeyName::parse(name));
        }
        if self.keyboard.grid.any_pressed() {
            self.highlight_release
                .schedule(Instant::now(), HIGHLIGHT_FALLBACK, ());
        }
    }

    pub fn accept_prediction(&mut self, index: usize) -> Option<String> {
        self.keyboard.accept_prediction(index)
    }

    // ── toggles ─────────────────────────────────────────────────────────

    pub fn cycle_theme(&mut self) {
        let name = Theme::next_name(&self.settings.theme);
        self.theme = Theme::load_or_default(&name);
        self.settings.theme = name;
        self.save_settings();
        self.notify(NotificationLevel::Info, format!("Theme: {}", self.settings.theme));
    }

    pub fn toggle_sound(&mut self) {
        self.settings.sound_enabled = !self.settings.sound_enabled;
        self.save_settings();
        let state = if self.settings.sound_enabled { "on" } else { "off" };
        self.notify(NotificationLevel::Info, format!("Sound {state}"));
    }

    pub fn toggle_predictions(&mut self) {
        self.settings.predictions_enabled = !self.settings.predictions_enabled;
        self.keyboard
            .set_predictions_enabled(self.settings.predictions_enabled);
        self.save_settings();
        let state = if self.settings.predictions_enabled { "on" } else { "off" };
        self.notify(NotificationLevel::Info, format!("Predictions {state}"));
    }

    fn save_settings(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.save_settings(&self.settings) {
            log::warn!("failed to save settings: {e}");
            self.notify(NotificationLevel::Warning, "Settings could not be saved");
        }
    }

    // ── quiz ────────────────────────────────────────────────────────────

    pub fn open_quiz(&mut self) {
        self.quiz_advance.cancel();
        let quiz = QuizSession::start(WORD_POOL, self.config.quiz_size, &mut self.rng);
        log::info!("quiz started with {} words", quiz.total());
        self.quiz = Some(quiz);
        self.quiz_input.clear();
        self.screen = AppScreen::Quiz;
    }

    /// Score the typed answer and schedule the move to the next word.
    pub fn submit_quiz_answer(&mut self) -> Option<bool> {
        let quiz = self.quiz.as_mut()?;
        let correct = quiz.submit(self.quiz_input.value())?;
        self.quiz_advance
            .schedule(Instant::now(), self.config.quiz_advance(), ());
        Some(correct)
    }

    pub fn restart_quiz(&mut self) {
        if self.quiz.as_ref().is_some_and(QuizSession::is_finished) {
            self.open_quiz();
        }
    }

    pub fn close_quiz(&mut self) {
        self.quiz_advance.cancel();
        self.quiz = None;
        self.quiz_input.clear();
        self.screen = AppScreen::Keyboard;
    }

    /// Switching to another overlay ends a running quiz.
    fn leave_quiz(&mut self) {
        if self.screen == AppScreen::Quiz {
            self.close_quiz();
        }
    }

    pub fn quiz_advance_pending(&self) -> bool {
        self.quiz_advance.is_pending()
    }

    fn advance_quiz(&mut self) {
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        self.quiz_input.clear();
        if quiz.advance() {
            log::info!(
                "quiz finished: {}/{} ({}%)",
                quiz.score(),
                quiz.total(),
                quiz.percentage()
            );
        }
    }

    // ── lessons ─────────────────────────────────────────────────────────

    pub fn open_lessons(&mut self) {
        self.leave_quiz();
        self.lesson_selected = self.active_lesson.unwrap_or(0);
        self.screen = AppScreen::Lessons;
    }

    pub fn lesson_next(&mut self) {
        self.lesson_selected = (self.lesson_selected + 1) % LESSONS.len();
    }

    pub fn lesson_prev(&mut self) {
        self.lesson_selected = self
            .lesson_selected
            .checked_sub(1)
            .unwrap_or(LESSONS.len() - 1);
    }

    pub fn start_lesson(&mut self, index: usize) {
        let Some(lesson) = lesson::lesson(index) else {
            return;
        };
        log::info!("lesson selected: {}", lesson.title);
        self.keyboard.load_lesson(lesson);
        self.active_lesson = Some(index);
        self.lesson_selected = index;
        self.screen = AppScreen::Keyboard;
        self.notify(NotificationLevel::Info, format!("Lesson: {}", lesson.title));
    }

    pub fn current_lesson(&self) -> Option<&'static Lesson> {
        self.active_lesson.and_then(lesson::lesson)
    }

    // ── emoji ───────────────────────────────────────────────────────────

    pub fn open_help(&mut self) {
        self.leave_quiz();
        self.screen = AppScreen::Help;
    }

    pub fn open_emoji(&mut self) {
        self.leave_quiz();
        self.screen = AppScreen::Emoji;
    }

    /// Insert the highlighted emoji verbatim and close the picker.
    pub fn insert_selected_emoji(&mut self) {
        let emoji = self.emoji.selected_emoji();
        self.keyboard.insert_text(emoji);
        self.screen = AppScreen::Keyboard;
    }

    // ── voice, clipboard, clear ─────────────────────────────────────────

    pub fn is_listening(&self) -> bool {
        self.speech.is_listening()
    }

    pub fn toggle_voice(&mut self) {
        if self.speech.is_listening() {
            self.speech.stop();
            self.notify(NotificationLevel::Info, "Voice capture stopped");
            return;
        }
        match self.speech.start() {
            Ok(()) => self.notify(NotificationLevel::Info, "Listening..."),
            Err(e) => {
                log::warn!("voice capture unavailable: {e}");
                self.notify(NotificationLevel::Warning, e.to_string());
            }
        }
    }

    pub fn copy_to_clipboard(&mut self) {
        let text = self.keyboard.buffer.text().to_string();
        if text.is_empty() {
            self.notify(NotificationLevel::Info, "Nothing to copy");
            return;
        }
        match self.clipboard.copy(&text) {
            Ok(()) => self.notify(
                NotificationLevel::Success,
                format!("Copied {} characters", text.chars().count()),
            ),
            Err(e) => {
                log::warn!("clipboard copy failed: {e}");
                self.notify(NotificationLevel::Warning, e.to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        self.keyboard.clear();
        self.active_lesson = None;
    }

    // ── notifications & timers ──────────────────────────────────────────

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let notification = Notification {
            message: message.into(),
            level,
        };
        self.notification.schedule(
            Instant::now(),
            self.config.notification_duration(),
            notification,
        );
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.peek()
    }

    /// Fire whatever timers are due and collect speech results.
    pub fn on_tick(&mut self, now: Instant) {
        if self.quiz_advance.poll(now).is_some() {
            self.advance_quiz();
        }
        self.notification.poll(now);
        if self.highlight_release.poll(now).is_some() {
            self.keyboard.grid.clear_pressed();
        }

        match self.speech.poll() {
            Some(SpeechEvent::Transcript(text)) if text.is_empty() => {
                self.notify(NotificationLevel::Info, "No speech recognized");
            }
            Some(SpeechEvent::Transcript(text)) => {
                self.keyboard.insert_text(&text);
                self.notify(NotificationLevel::Success, "Dictation inserted");
            }
            Some(SpeechEvent::Error(e)) => {
                log::warn!("speech recognition failed: {e}");
                self.notify(NotificationLevel::Error, format!("Voice capture failed: {e}"));
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::audio::Tone;
    use crate::engine::emoji::EMOJI;
    use crate::error::CapabilityError;
    use crate::platform::speech::Unavailable;
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedClipboard(Rc<RefCell<Option<String>>>);

    impl Clipboard for SharedClipboard {
        fn copy(&mut self, text: &str) -> Result<(), CapabilityError> {
            *self.0.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    struct FailingClipboard;

    impl Clipboard for FailingClipboard {
        fn copy(&mut self, _text: &str) -> Result<(), CapabilityError> {
            Err(CapabilityError::Unsupported("clipboard"))
        }
    }

    /// Recognizer that yields one scripted event after starting.
    struct ScriptedSpeech {
        event: Option<SpeechEvent>,
        listening: bool,
    }

    impl SpeechRecognizer for ScriptedSpeech {
        fn start(&mut self) -> Result<(), CapabilityError> {
            self.listening = true;
            Ok(())
        }
        fn stop(&mut self) {
            self.listening = false;
        }
        fn is_listening(&self) -> bool {
            self.listening
        }
        fn poll(&mut self) -> Option<SpeechEvent> {
            if !self.listening {
                return None;
            }
            self.listening = false;
            self.event.take()
        }
    }

    fn services(store: Option<JsonStore>) -> Services {
        Services {
            store,
            sound: SoundPlayer::silent(Tone {
                hz: 660.0,
                duration: Duration::from_millis(40),
            }),
            clipboard: Box::new(SharedClipboard::default()),
            speech: Box::new(Unavailable),
        }
    }

    fn make_app_with(services: Services) -> App {
        App::with_rng(
            Config::default(),
            Settings::default(),
            services,
            Rect::new(0, 0, 140, 40),
            0,
            SmallRng::seed_from_u64(7),
        )
    }

    fn make_app() -> App {
        make_app_with(services(None))
    }

    fn later(ms: u64) -> Instant {
        Instant::now() + Duration::from_millis(ms)
    }

    #[test]
    fn test_typing_scenario_with_shift() {
        let mut app = make_app();
        for key in ["a", "Shift", "a", "a"] {
            app.key_down(key);
            app.key_up(key);
        }
        assert_eq!(app.keyboard.buffer.text(), "aAa");
        assert!(!app.keyboard.modifiers.shift_active);
    }

    #[test]
    fn test_viewport_from_columns_picks_tier() {
        let app = make_app();
        // 140 columns * 8px
        assert_eq!(app.keyboard.grid.last_width(), 1120);
        let mut small = make_app();
        small.on_resize(50, 30, 0);
        assert!(small.keyboard.grid.tier().is_small());
    }

    #[test]
    fn test_small_resize_is_ignored() {
        let mut app = make_app();
        let tier = app.keyboard.grid.tier();
        app.on_resize(130, 40, 0);
        assert_eq!(app.keyboard.grid.last_width(), 1120);
        assert_eq!(app.keyboard.grid.tier(), tier);
        assert_eq!(app.frame_size.width, 130);
    }

    #[test]
    fn test_click_on_key_types_it() {
        let mut app = make_app();
        let layout = app.layout();
        let keys_area = KeyboardView::inner(layout.keyboard);
        let (_, rect) = app
            .keyboard
            .grid
            .layout(keys_area)
            .into_iter()
            .find(|(id, _)| app.keyboard.grid.key(*id).is_some_and(|k| k.key == "q"))
            .unwrap();
        app.click(rect.x + 1, rect.y + 1);
        assert_eq!(app.keyboard.buffer.text(), "q");
        assert!(app.keyboard.grid.any_pressed());
        app.mouse_up();
        assert!(!app.keyboard.grid.any_pressed());
    }

    #[test]
    fn test_highlight_fallback_clears_after_timeout() {
        let mut app = make_app();
        app.key_down("a");
        assert!(app.keyboard.grid.any_pressed());
        app.on_tick(Instant::now());
        assert!(app.keyboard.grid.any_pressed());
        app.on_tick(later(200));
        assert!(!app.keyboard.grid.any_pressed());
    }

    #[test]
    fn test_click_on_prediction_accepts_it() {
        let mut app = make_app();
        app.key_down("t");
        app.key_down("h");
        assert_eq!(app.keyboard.predictions()[0], "the");
        let area = app.layout().predictions;
        app.click(area.x + 2, area.y);
        assert_eq!(app.keyboard.buffer.text(), "the ");
    }

    #[test]
    fn test_quiz_flow_and_cancel() {
        let mut app = make_app();
        app.open_quiz();
        assert_eq!(app.screen, AppScreen::Quiz);
        let total = app.quiz.as_ref().unwrap().total();
        assert_eq!(total, 5);

        for _ in 0..total {
            let word = app.quiz.as_ref().unwrap().current_word().unwrap().to_string();
            app.quiz_input = LineInput::new(&word.to_uppercase());
            assert_eq!(app.submit_quiz_answer(), Some(true));
            // Second submission for the same word is ignored.
            assert_eq!(app.submit_quiz_answer(), None);
            app.on_tick(later(2000));
            assert_eq!(app.quiz_input.value(), "");
        }
        let quiz = app.quiz.as_ref().unwrap();
        assert!(quiz.is_finished());
        assert_eq!(quiz.percentage(), 100);

        app.restart_quiz();
        assert_eq!(app.quiz.as_ref().unwrap().current_index(), 0);

        app.quiz_input = LineInput::new("wrong");
        app.submit_quiz_answer();
        assert!(app.quiz_advance_pending());
        app.close_quiz();
        assert!(!app.quiz_advance_pending());
        assert!(app.quiz.is_none());
        app.on_tick(later(2000));
        assert_eq!(app.screen, AppScreen::Keyboard);
    }

    #[test]
    fn test_quiz_advances_on_schedule_while_keys_keep_arriving() {
        use crate::event::TickSchedule;

        let mut app = make_app();
        app.open_quiz();
        let word = app.quiz.as_ref().unwrap().current_word().unwrap().to_string();
        app.quiz_input = LineInput::new(&word);
        app.submit_quiz_answer();

        // Held key repeating every 30 ms for two seconds; ticks still fire.
        let start = Instant::now();
        let mut schedule = TickSchedule::new(Duration::from_millis(100), start);
        for step in 1..=66 {
            let now = start + Duration::from_millis(step * 30);
            app.key_up("x");
            if schedule.due(now) {
                app.on_tick(now);
            }
        }
        assert!(!app.quiz_advance_pending());
        assert_eq!(app.quiz.as_ref().unwrap().current_index(), 1);
    }

    #[test]
    fn test_switching_overlay_closes_running_quiz() {
        let mut app = make_app();
        app.open_quiz();
        app.quiz_input = LineInput::new("wrong");
        app.submit_quiz_answer();
        assert!(app.quiz_advance_pending());

        app.open_lessons();
        assert_eq!(app.screen, AppScreen::Lessons);
        assert!(app.quiz.is_none());
        assert!(!app.quiz_advance_pending());

        app.open_quiz();
        app.open_emoji();
        assert!(app.quiz.is_none());
        app.open_quiz();
        app.open_help();
        assert_eq!(app.screen, AppScreen::Help);
        assert!(app.quiz.is_none());
    }

    #[test]
    fn test_lesson_sets_placeholder_and_clear_resets() {
        let mut app = make_app();
        app.key_down("x");
        app.start_lesson(0);
        assert_eq!(app.keyboard.buffer.text(), "");
        assert_eq!(
            app.keyboard.buffer.placeholder(),
            Some(LESSONS[0].practice_text)
        );
        assert_eq!(app.current_lesson().map(|l| l.title), Some("Home Row"));
        app.clear();
        assert_eq!(app.keyboard.buffer.placeholder(), None);
        assert!(app.current_lesson().is_none());
    }

    #[test]
    fn test_lesson_selection_wraps() {
        let mut app = make_app();
        app.open_lessons();
        app.lesson_prev();
        assert_eq!(app.lesson_selected, LESSONS.len() - 1);
        app.lesson_next();
        assert_eq!(app.lesson_selected, 0);
    }

    #[test]
    fn test_emoji_insert_keeps_shift() {
        let mut app = make_app();
        app.key_down("Shift");
        app.open_emoji();
        app.emoji.next();
        app.insert_selected_emoji();
        assert_eq!(app.keyboard.buffer.text(), EMOJI[1].0);
        assert!(app.keyboard.modifiers.shift_active);
        assert_eq!(app.screen, AppScreen::Keyboard);
    }

    #[test]
    fn test_toggles_persist_settings() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut app = make_app_with(services(Some(store)));
        app.toggle_sound();
        app.toggle_predictions();
        app.cycle_theme();
        assert!(app.keyboard.predictions().is_empty());

        let reloaded = JsonStore::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .load_settings();
        assert_eq!(
            reloaded,
            Settings {
                theme: "dark".to_string(),
                sound_enabled: false,
                predictions_enabled: false,
            }
        );
        assert_eq!(app.theme.name, "dark");
    }

    #[test]
    fn test_copy_and_failure_notifications() {
        let clipboard = SharedClipboard::default();
        let mut svc = services(None);
        svc.clipboard = Box::new(clipboard.clone());
        let mut app = make_app_with(svc);

        app.copy_to_clipboard();
        assert_eq!(app.notification().unwrap().message, "Nothing to copy");

        app.key_down("h");
        app.key_down("i");
        app.copy_to_clipboard();
        assert_eq!(clipboard.0.borrow().as_deref(), Some("hi"));
        assert_eq!(app.notification().unwrap().level, NotificationLevel::Success);

        let mut svc = services(None);
        svc.clipboard = Box::new(FailingClipboard);
        let mut app = make_app_with(svc);
        app.key_down("h");
        app.copy_to_clipboard();
        let note = app.notification().unwrap();
        assert_eq!(note.level, NotificationLevel::Warning);
        assert!(note.message.contains("not supported"));
    }

    #[test]
    fn test_notification_expires() {
        let mut app = make_app();
        app.notify(NotificationLevel::Info, "hello");
        app.on_tick(Instant::now());
        assert!(app.notification().is_some());
        app.on_tick(later(5000));
        assert!(app.notification().is_none());
    }

    #[test]
    fn test_voice_unavailable_notifies() {
        let mut app = make_app();
        app.toggle_voice();
        assert!(!app.is_listening());
        assert!(
            app.notification()
                .unwrap()
                .message
                .contains("speech recognition is not supported")
        );
    }

    #[test]
    fn test_voice_transcript_and_error() {
        let mut svc = services(None);
        svc.speech = Box::new(ScriptedSpeech {
            event: Some(SpeechEvent::Transcript("hello there".to_string())),
            listening: false,
        });
        let mut app = make_app_with(svc);
        app.toggle_voice();
        assert!(app.is_listening());
        app.on_tick(Instant::now());
        assert_eq!(app.keyboard.buffer.text(), "hello there");
        assert!(!app.is_listening());

        let mut svc = services(None);
        svc.speech = Box::new(ScriptedSpeech {
            event: Some(SpeechEvent::Error("no microphone".to_string())),
            listening: false,
        });
        let mut app = make_app_with(svc);
        app.toggle_voice();
        app.on_tick(Instant::now());
        assert_eq!(app.notification().unwrap().level, NotificationLevel::Error);
        assert!(!app.is_listening());
        // Voice stays available for another attempt.
        app.toggle_voice();
        assert!(app.is_listening());
    }
}
