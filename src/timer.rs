use std::time::{Duration, Instant};

/// A single pending task that fires once its deadline passes.
///
/// Timers are polled from the event loop's tick; nothing runs in the
/// background. Cancelling (or scheduling over) a pending task drops it.
#[derive(Debug)]
pub struct Timer<T> {
    pending: Option<(Instant, T)>,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> Timer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, value: T) {
        self.pending = Some((now + delay, value));
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn peek(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, value)| value)
    }

    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(due, _)| due.saturating_duration_since(now))
    }

    /// Take the value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((due, _)) if now >= *due => self.cancel(),
            _ => None,
        }
    }
}
