use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent, KeyboardEnhancementFlags, MouseEvent};

pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(u16, u16),
}

/// Keyboard protocol flags requested when the terminal supports them.
/// Reporting all keys as escape codes is what makes bare Shift, Ctrl, Alt and
/// Caps Lock presses (and their releases) visible.
pub fn keyboard_enhancement_flags() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
}

/// Fixed-rate tick clock, independent of how much input arrives.
#[derive(Clone, Copy, Debug)]
pub struct TickSchedule {
    rate: Duration,
    last: Instant,
}

impl TickSchedule {
    pub fn new(rate: Duration, now: Instant) -> Self {
        Self { rate, last: now }
    }

    /// How long to wait for input before the next tick is due.
    pub fn timeout(&self, now: Instant) -> Duration {
        self.rate.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// True (and restarts the period) when a tick is due at `now`.
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.rate {
            self.last = now;
            true
        } else {
            false
        }
    }
}

/// Forwards terminal input to the main loop, plus a tick every `tick_rate`
/// even while input keeps arriving.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    _tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let _tx = tx.clone();

        thread::spawn(move || {
            let mut schedule = TickSchedule::new(tick_rate, Instant::now());
            loop {
                let timeout = schedule.timeout(Instant::now());
                if event::poll(timeout).unwrap_or(false) {
                    let app_event = match event::read() {
                        Ok(Event::Key(key)) => Some(AppEvent::Key(key)),
                        Ok(Event::Mouse(mouse)) => Some(AppEvent::Mouse(mouse)),
                        Ok(Event::Resize(w, h)) => Some(AppEvent::Resize(w, h)),
                        _ => None,
                    };
                    if let Some(app_event) = app_event {
                        if tx.send(app_event).is_err() {
                            return;
                        }
                    }
                }
                if schedule.due(Instant::now()) && tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, _tx }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
