//! One cancelable timeout per concern.

use std::time::Duration;

use leptos::*;
use leptos::leptos_dom::helpers::TimeoutHandle;

#[derive(Clone, Copy)]
/// Holds at most one armed timeout. Re-arming cancels the previous timeout, and the slot is
/// cleared when the owning reactive scope is cleaned up, so no callback outlives its widget.
pub struct TimerSlot {
    handle: StoredValue<Option<TimeoutHandle>>,
}

impl TimerSlot {
    /// Creates an empty slot bound to the current reactive owner.
    pub fn new() -> Self {
        let slot = Self {
            handle: store_value(None),
        };
        on_cleanup(move || slot.cancel());
        slot
    }

    /// Arms `callback` after `delay_ms`, replacing any pending timeout.
    pub fn arm(&self, delay_ms: u64, callback: impl FnOnce() + 'static) {
        self.cancel();
        let slot = self.handle;
        let fire = move || {
            slot.try_set_value(None);
            callback();
        };
        match set_timeout_with_handle(fire, Duration::from_millis(delay_ms)) {
            Ok(handle) => {
                self.handle.try_set_value(Some(handle));
            }
            Err(err) => logging::warn!("timer arm failed: {err:?}"),
        }
    }

    /// Arms for an absolute deadline, or cancels when there is none.
    pub fn arm_at(&self, deadline_ms: Option<u64>, now_ms: u64, callback: impl FnOnce() + 'static) {
        match deadline_ms {
            Some(deadline_ms) => self.arm(deadline_ms.saturating_sub(now_ms), callback),
            None => self.cancel(),
        }
    }

    /// Clears the pending timeout, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.handle.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    }

    /// Returns whether a timeout is pending.
    pub fn is_armed(&self) -> bool {
        self.handle
            .try_with_value(Option::is_some)
            .unwrap_or(false)
    }
}

impl Default for TimerSlot {
    fn default() -> Self {
        Self::new()
    }
}
