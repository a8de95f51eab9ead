//! Time-injected timers. Callers pass the current millisecond clock into every call; nothing here
//! reads a clock or schedules a callback.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Pausable countdown that keeps its remaining budget across pause/resume.
pub struct Countdown {
    remaining_ms: u64,
    running_since: Option<u64>,
}

impl Countdown {
    /// Starts a countdown at `now_ms`.
    pub fn started(duration_ms: u64, now_ms: u64) -> Self {
        Self {
            remaining_ms: duration_ms,
            running_since: Some(now_ms),
        }
    }

    /// Creates a paused countdown holding `duration_ms`.
    pub fn paused(duration_ms: u64) -> Self {
        Self {
            remaining_ms: duration_ms,
            running_since: None,
        }
    }

    /// Returns whether the countdown is currently running.
    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Budget left at `now_ms`.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.running_since {
            Some(since) => self
                .remaining_ms
                .saturating_sub(now_ms.saturating_sub(since)),
            None => self.remaining_ms,
        }
    }

    /// Absolute expiry time while running; `None` while paused.
    pub fn deadline(&self) -> Option<u64> {
        self.running_since
            .map(|since| since.saturating_add(self.remaining_ms))
    }

    /// Freezes the remaining budget. No-op when already paused.
    pub fn pause(&mut self, now_ms: u64) {
        if self.running_since.is_some() {
            self.remaining_ms = self.remaining_ms(now_ms);
            self.running_since = None;
        }
    }

    /// Restarts the clock with the frozen budget. No-op when already running.
    pub fn resume(&mut self, now_ms: u64) {
        if self.running_since.is_none() {
            self.running_since = Some(now_ms);
        }
    }

    /// A paused countdown never elapses.
    pub fn is_elapsed(&self, now_ms: u64) -> bool {
        self.deadline().is_some_and(|deadline| now_ms >= deadline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Trailing-edge debounce: only the last value pushed within `delay_ms` is delivered.
pub struct Debounce<T> {
    delay_ms: u64,
    pending: Option<(u64, T)>,
}

impl<T> Debounce<T> {
    /// Creates an idle debounce.
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Configured delay.
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replaces any pending value and restarts the delay.
    pub fn push(&mut self, value: T, now_ms: u64) {
        self.pending = Some((now_ms.saturating_add(self.delay_ms), value));
    }

    /// Takes the pending value once its delay has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now_ms >= *deadline => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    /// Takes the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) -> Option<T> {
        self.flush()
    }

    /// Returns whether a value is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes deliverable.
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn countdown_pause_preserves_remaining_budget() {
        let mut countdown = Countdown::started(1_000, 0);
        assert_eq!(countdown.remaining_ms(400), 600);

        countdown.pause(400);
        assert!(!countdown.is_elapsed(5_000));
        assert_eq!(countdown.deadline(), None);
        assert_eq!(countdown.remaining_ms(5_000), 600);

        countdown.resume(5_000);
        assert_eq!(countdown.deadline(), Some(5_600));
        assert!(!countdown.is_elapsed(5_599));
        assert!(countdown.is_elapsed(5_600));
    }

    #[test]
    fn countdown_pause_and_resume_are_idempotent() {
        let mut countdown = Countdown::paused(300);
        countdown.pause(10);
        assert_eq!(countdown.remaining_ms(10), 300);
        countdown.resume(10);
        countdown.resume(200);
        assert_eq!(countdown.deadline(), Some(310));
    }

    #[test]
    fn debounce_delivers_only_the_last_value() {
        let mut debounce = Debounce::new(300);
        debounce.push("a", 0);
        debounce.push("ab", 100);
        debounce.push("abc", 250);

        assert_eq!(debounce.poll(400), None);
        assert_eq!(debounce.next_deadline(), Some(550));
        assert_eq!(debounce.poll(550), Some("abc"));
        assert_eq!(debounce.poll(10_000), None);
        assert!(!debounce.is_pending());
    }

    #[test]
    fn debounce_cancel_drops_pending_value() {
        let mut debounce = Debounce::new(50);
        debounce.push(1, 0);
        assert_eq!(debounce.cancel(), Some(1));
        assert_eq!(debounce.poll(100), None);
    }
}
