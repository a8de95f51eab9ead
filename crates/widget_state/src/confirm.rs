//! Confirm dialog: an overlay surface that resolves to exactly one [`ConfirmOutcome`] per opening.

use crate::overlay::{
    CloseReason, OverlayConfig, OverlayEffect, OverlayInput, OverlayMachine, OverlayPhase,
    OverlaySurface,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How one opening of the dialog ended.
pub enum ConfirmOutcome {
    /// The confirm control was used.
    Confirmed,
    /// Cancel control, Escape, outside click, auto close, or a host close without a choice.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Callback intents, in firing order.
pub enum ConfirmEvent {
    /// Fires before the exit animation starts.
    Resolved(ConfirmOutcome),
    /// Lifecycle effect of the wrapped surface.
    Overlay(OverlayEffect),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Overlay surface plus the outcome of its current opening.
pub struct ConfirmDialogState {
    surface: OverlaySurface,
    outcome: Option<ConfirmOutcome>,
}

impl ConfirmDialogState {
    /// Creates a closed dialog.
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            surface: OverlaySurface::new(config),
            outcome: None,
        }
    }

    /// Current phase of the wrapped surface.
    pub fn phase(&self) -> OverlayPhase {
        self.surface.phase()
    }

    /// Wrapped surface, for hover and deadline inspection.
    pub fn surface(&self) -> &OverlaySurface {
        &self.surface
    }

    /// Outcome chosen during the current (or last) opening.
    pub fn outcome(&self) -> Option<ConfirmOutcome> {
        self.outcome
    }

    /// Reconciles the host's `is_open`. A fresh opening clears the previous outcome. Closing from
    /// the host without a choice resolves to [`ConfirmOutcome::Cancelled`].
    pub fn sync_open(&mut self, is_open: bool, now_ms: u64) -> Vec<ConfirmEvent> {
        if is_open {
            let effects = self.surface.open(now_ms);
            if effects.contains(&OverlayEffect::Opened) {
                self.outcome = None;
            }
            return wrap(effects);
        }
        self.resolve(ConfirmOutcome::Cancelled, CloseReason::Host, now_ms)
    }

    /// Resolves as confirmed and starts closing.
    pub fn confirm(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        self.resolve(ConfirmOutcome::Confirmed, CloseReason::Dismiss, now_ms)
    }

    /// Resolves as cancelled and starts closing.
    pub fn cancel(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        self.resolve(ConfirmOutcome::Cancelled, CloseReason::Dismiss, now_ms)
    }

    /// Escape cancels when the config allows it.
    pub fn handle_escape(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        if !self.surface.config().close_on_escape {
            return Vec::new();
        }
        self.resolve(ConfirmOutcome::Cancelled, CloseReason::EscapeKey, now_ms)
    }

    /// Outside click cancels when the config allows it.
    pub fn handle_outside_click(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        if !self.surface.config().close_on_outside_click {
            return Vec::new();
        }
        self.resolve(ConfirmOutcome::Cancelled, CloseReason::OutsideClick, now_ms)
    }

    /// Advances due deadlines. An auto close with no choice made resolves as cancelled first.
    pub fn tick(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        let effects = self.surface.tick(now_ms);
        self.resolve_auto_close(effects)
    }

    /// Pointer entered the dialog; pauses auto close when configured.
    pub fn pointer_enter(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        let effects = self.surface.pointer_enter(now_ms);
        self.resolve_auto_close(effects)
    }

    /// Pointer left the dialog; resumes a paused auto close.
    pub fn pointer_leave(&mut self, now_ms: u64) -> Vec<ConfirmEvent> {
        let effects = self.surface.pointer_leave(now_ms);
        self.resolve_auto_close(effects)
    }

    /// Next instant at which [`Self::tick`] makes progress.
    pub fn next_deadline(&self) -> Option<u64> {
        self.surface.next_deadline()
    }

    /// Drops pending deadlines without firing callbacks.
    pub fn unmount(&mut self) {
        self.surface.unmount();
    }

    fn resolve_auto_close(&mut self, effects: Vec<OverlayEffect>) -> Vec<ConfirmEvent> {
        let mut events = Vec::with_capacity(effects.len() + 1);
        for effect in effects {
            if effect == OverlayEffect::CloseRequested(CloseReason::AutoClose)
                && self.outcome.is_none()
            {
                self.outcome = Some(ConfirmOutcome::Cancelled);
                events.push(ConfirmEvent::Resolved(ConfirmOutcome::Cancelled));
            }
            events.push(ConfirmEvent::Overlay(effect));
        }
        events
    }

    fn resolve(
        &mut self,
        outcome: ConfirmOutcome,
        reason: CloseReason,
        now_ms: u64,
    ) -> Vec<ConfirmEvent> {
        if self.outcome.is_some() || !self.surface.listens_for_dismissal() {
            return Vec::new();
        }
        self.outcome = Some(outcome);

        let mut events = vec![ConfirmEvent::Resolved(outcome)];
        events.extend(wrap(self.surface.request_close(reason, now_ms)));
        events
    }
}

impl OverlayMachine for ConfirmDialogState {
    type Event = ConfirmEvent;

    fn apply(&mut self, input: OverlayInput, now_ms: u64) -> Vec<ConfirmEvent> {
        match input {
            OverlayInput::Sync(is_open) => self.sync_open(is_open, now_ms),
            OverlayInput::Open => self.sync_open(true, now_ms),
            OverlayInput::RequestClose(CloseReason::Host) => self.sync_open(false, now_ms),
            OverlayInput::RequestClose(reason) => {
                self.resolve(ConfirmOutcome::Cancelled, reason, now_ms)
            }
            OverlayInput::CompleteClose => wrap(self.surface.complete_close(now_ms)),
            OverlayInput::Tick => self.tick(now_ms),
            OverlayInput::PointerEnter => self.pointer_enter(now_ms),
            OverlayInput::PointerLeave => self.pointer_leave(now_ms),
            OverlayInput::Escape => self.handle_escape(now_ms),
            OverlayInput::OutsideClick => self.handle_outside_click(now_ms),
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        self.surface.next_deadline()
    }

    fn listens_for_dismissal(&self) -> bool {
        self.surface.listens_for_dismissal()
    }

    fn phase(&self) -> OverlayPhase {
        self.surface.phase()
    }
}

fn wrap(effects: Vec<OverlayEffect>) -> Vec<ConfirmEvent> {
    effects.into_iter().map(ConfirmEvent::Overlay).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn opened() -> ConfirmDialogState {
        let mut dialog = ConfirmDialogState::new(OverlayConfig::default());
        dialog.sync_open(true, 0);
        dialog.tick(200);
        dialog
    }

    #[test]
    fn confirm_resolves_before_exit_and_only_once() {
        let mut dialog = opened();
        assert_eq!(
            dialog.confirm(300),
            vec![
                ConfirmEvent::Resolved(ConfirmOutcome::Confirmed),
                ConfirmEvent::Overlay(OverlayEffect::CloseRequested(CloseReason::Dismiss)),
            ]
        );
        assert!(dialog.cancel(310).is_empty());
        assert!(dialog.sync_open(false, 320).is_empty());
        assert_eq!(
            dialog.tick(500),
            vec![ConfirmEvent::Overlay(OverlayEffect::CloseCompleted)]
        );
        assert_eq!(dialog.outcome(), Some(ConfirmOutcome::Confirmed));
    }

    #[test]
    fn escape_and_outside_click_cancel() {
        let mut dialog = opened();
        assert_eq!(
            dialog.handle_escape(250).first(),
            Some(&ConfirmEvent::Resolved(ConfirmOutcome::Cancelled))
        );

        let mut dialog = opened();
        assert_eq!(
            dialog.handle_outside_click(250).first(),
            Some(&ConfirmEvent::Resolved(ConfirmOutcome::Cancelled))
        );
    }

    #[test]
    fn host_close_without_choice_cancels_silently_to_the_host() {
        let mut dialog = opened();
        assert_eq!(
            dialog.sync_open(false, 300),
            vec![ConfirmEvent::Resolved(ConfirmOutcome::Cancelled)]
        );
    }

    #[test]
    fn reopening_clears_the_previous_outcome() {
        let mut dialog = opened();
        dialog.confirm(300);
        dialog.tick(500);
        dialog.sync_open(true, 600);
        assert_eq!(dialog.outcome(), None);
        assert_eq!(dialog.phase(), OverlayPhase::Opening);
    }

    #[test]
    fn closed_dialog_ignores_choices() {
        let mut dialog = ConfirmDialogState::new(OverlayConfig::default());
        assert!(dialog.confirm(0).is_empty());
        assert_eq!(dialog.outcome(), None);
    }

    #[test]
    fn machine_close_request_cancels() {
        let mut dialog = opened();
        assert_eq!(
            dialog.apply(OverlayInput::RequestClose(CloseReason::Dismiss), 300),
            vec![
                ConfirmEvent::Resolved(ConfirmOutcome::Cancelled),
                ConfirmEvent::Overlay(OverlayEffect::CloseRequested(CloseReason::Dismiss)),
            ]
        );
        assert_eq!(dialog.next_deadline(), Some(500));
    }

    #[test]
    fn auto_close_without_a_choice_resolves_cancelled_first() {
        let mut dialog = ConfirmDialogState::new(OverlayConfig::default().with_auto_close(1_000));
        dialog.sync_open(true, 0);
        dialog.tick(200);
        assert!(dialog.tick(1_199).is_empty());
        assert_eq!(
            dialog.apply(OverlayInput::Tick, 1_400),
            vec![
                ConfirmEvent::Resolved(ConfirmOutcome::Cancelled),
                ConfirmEvent::Overlay(OverlayEffect::CloseRequested(CloseReason::AutoClose)),
                ConfirmEvent::Overlay(OverlayEffect::CloseCompleted),
            ]
        );
        assert_eq!(dialog.outcome(), Some(ConfirmOutcome::Cancelled));
    }

    #[test]
    fn hovering_holds_the_auto_close() {
        let mut dialog = ConfirmDialogState::new(OverlayConfig::default().with_auto_close(1_000));
        dialog.sync_open(true, 0);
        dialog.tick(200);
        dialog.apply(OverlayInput::PointerEnter, 700);
        assert_eq!(dialog.next_deadline(), None);
        assert!(dialog.tick(5_000).is_empty());
        assert_eq!(dialog.outcome(), None);

        dialog.apply(OverlayInput::PointerLeave, 5_000);
        assert_eq!(
            dialog.tick(5_500).first(),
            Some(&ConfirmEvent::Resolved(ConfirmOutcome::Cancelled))
        );
    }
}
