//! Open/close lifecycle shared by every overlay-style widget (modal, drawer, offcanvas,
//! notification, toast, confirm dialog).
//!
//! ```text
//! Closed --open--> Opening --enter elapsed--> Open
//! Opening | Open --close request--> Exiting --exit elapsed--> Closed
//! ```
//!
//! The surface never reads a clock. Every operation takes `now_ms`, and [`OverlaySurface::next_deadline`]
//! names the one instant at which the host should call [`OverlaySurface::tick`]. Transitions are
//! reported as [`OverlayEffect`] values in the order the callbacks must fire.

use serde::{Deserialize, Serialize};

use crate::timer::Countdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Discrete lifecycle phase.
pub enum OverlayPhase {
    /// Not rendered.
    Closed,
    /// Enter animation playing.
    Opening,
    /// Fully shown and interactive.
    Open,
    /// Exit animation playing.
    Exiting,
}

impl OverlayPhase {
    /// Returns whether the surface should be in the DOM.
    pub fn is_rendered(self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Stable token for `data-ui-phase` attributes.
    pub fn token(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Open => "open",
            Self::Exiting => "exiting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Why a close was requested.
pub enum CloseReason {
    /// The host flipped `is_open` to false.
    Host,
    /// Escape key while the surface listened for dismissal.
    EscapeKey,
    /// Pointer down outside the surface.
    OutsideClick,
    /// The auto-close countdown elapsed.
    AutoClose,
    /// An explicit close control inside the surface.
    Dismiss,
}

impl CloseReason {
    /// Host-driven closes are not echoed back to the host.
    pub fn notifies_host(self) -> bool {
        !matches!(self, Self::Host)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Per-surface timing and dismissal settings.
pub struct OverlayConfig {
    /// Enter animation length. Zero opens immediately.
    pub enter_ms: u64,
    /// Exit animation length. Zero closes immediately.
    pub exit_ms: u64,
    /// Auto-close budget measured from entry to `Open`; `None` disables auto close.
    pub auto_close_ms: Option<u64>,
    /// Suspend the auto-close countdown while the pointer hovers the surface.
    pub pause_on_hover: bool,
    /// Close on Escape while listening for dismissal.
    pub close_on_escape: bool,
    /// Close on pointer down outside the surface while listening for dismissal.
    pub close_on_outside_click: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enter_ms: 200,
            exit_ms: 200,
            auto_close_ms: None,
            pause_on_hover: true,
            close_on_escape: true,
            close_on_outside_click: true,
        }
    }
}

impl OverlayConfig {
    /// Enables auto close after `duration_ms` in `Open`.
    pub fn with_auto_close(mut self, duration_ms: u64) -> Self {
        self.auto_close_ms = Some(duration_ms);
        self
    }

    /// Sets both animation lengths.
    pub fn with_durations(mut self, enter_ms: u64, exit_ms: u64) -> Self {
        self.enter_ms = enter_ms;
        self.exit_ms = exit_ms;
        self
    }

    /// Disables enter/exit animations.
    pub fn without_animation(self) -> Self {
        self.with_durations(0, 0)
    }

    /// Chooses which global dismissals apply.
    pub fn dismissible(mut self, on_escape: bool, on_outside_click: bool) -> Self {
        self.close_on_escape = on_escape;
        self.close_on_outside_click = on_outside_click;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Callback intents emitted by phase transitions.
pub enum OverlayEffect {
    /// `Closed -> Opening`; fire `on_open`.
    Opened,
    /// An internal trigger started the exit; fire `on_close` so the host flips `is_open`.
    CloseRequested(CloseReason),
    /// `Exiting -> Closed`; fire `on_close_complete`.
    CloseCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Inputs a reactive driver feeds into an overlay machine.
pub enum OverlayInput {
    /// Host `is_open` prop changed (or was re-read).
    Sync(bool),
    Open,
    RequestClose(CloseReason),
    CompleteClose,
    /// A scheduled deadline fired.
    Tick,
    PointerEnter,
    PointerLeave,
    Escape,
    OutsideClick,
}

/// Overlay-shaped state machine that a single reactive driver can schedule: it accepts
/// [`OverlayInput`]s, names its next deadline, and says when dismissal listeners are needed.
pub trait OverlayMachine: Clone + PartialEq + 'static {
    /// Callback intent emitted by transitions.
    type Event: 'static;

    /// Applies one input at `now_ms`.
    fn apply(&mut self, input: OverlayInput, now_ms: u64) -> Vec<Self::Event>;

    /// Instant at which [`OverlayInput::Tick`] will make progress.
    fn next_deadline(&self) -> Option<u64>;

    /// Whether Escape/outside-click listeners should be attached.
    fn listens_for_dismissal(&self) -> bool;

    /// Current lifecycle phase.
    fn phase(&self) -> OverlayPhase;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Phase machine for one overlay instance.
pub struct OverlaySurface {
    config: OverlayConfig,
    phase: OverlayPhase,
    phase_deadline: Option<u64>,
    auto_close: Option<Countdown>,
    hovered: bool,
}

impl Default for OverlaySurface {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl OverlaySurface {
    /// Creates a closed surface.
    pub fn new(config: OverlayConfig) -> Self {
        Self {
            config,
            phase: OverlayPhase::Closed,
            phase_deadline: None,
            auto_close: None,
            hovered: false,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Active configuration.
    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Replaces the configuration. Applies from the next transition on.
    pub fn set_config(&mut self, config: OverlayConfig) {
        self.config = config;
    }

    /// Whether the pointer is over the surface.
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Escape and outside-click listeners belong attached only while this is true.
    pub fn listens_for_dismissal(&self) -> bool {
        matches!(self.phase, OverlayPhase::Opening | OverlayPhase::Open)
    }

    /// Drag and resize are permitted only while fully open.
    pub fn can_drag(&self) -> bool {
        self.phase == OverlayPhase::Open
    }

    /// Auto-close budget left, if a countdown is armed.
    pub fn auto_close_remaining(&self, now_ms: u64) -> Option<u64> {
        self.auto_close.map(|countdown| countdown.remaining_ms(now_ms))
    }

    /// The instant at which [`Self::tick`] will make progress, if any.
    pub fn next_deadline(&self) -> Option<u64> {
        match self.phase {
            OverlayPhase::Opening | OverlayPhase::Exiting => self.phase_deadline,
            OverlayPhase::Open => self.auto_close.and_then(|countdown| countdown.deadline()),
            OverlayPhase::Closed => None,
        }
    }

    /// Reconciles the host's `is_open` prop.
    pub fn sync_open(&mut self, is_open: bool, now_ms: u64) -> Vec<OverlayEffect> {
        if is_open {
            self.open(now_ms)
        } else {
            self.request_close(CloseReason::Host, now_ms)
        }
    }

    /// Starts opening. Only valid from `Closed`.
    pub fn open(&mut self, now_ms: u64) -> Vec<OverlayEffect> {
        if self.phase != OverlayPhase::Closed {
            return Vec::new();
        }

        self.phase = OverlayPhase::Opening;
        self.phase_deadline = Some(now_ms.saturating_add(self.config.enter_ms));
        self.auto_close = None;

        let mut effects = vec![OverlayEffect::Opened];
        self.advance(now_ms, &mut effects);
        effects
    }

    /// Starts the exit animation. No-op from `Exiting` or `Closed`.
    pub fn request_close(&mut self, reason: CloseReason, now_ms: u64) -> Vec<OverlayEffect> {
        if !self.listens_for_dismissal() {
            return Vec::new();
        }

        let mut effects = Vec::new();
        self.begin_exit(reason, now_ms, &mut effects);
        self.advance(now_ms, &mut effects);
        effects
    }

    /// Finishes the exit immediately, e.g. on an `animationend` event.
    pub fn complete_close(&mut self, _now_ms: u64) -> Vec<OverlayEffect> {
        if self.phase != OverlayPhase::Exiting {
            return Vec::new();
        }
        self.finish_exit();
        vec![OverlayEffect::CloseCompleted]
    }

    /// Applies every transition whose deadline is at or before `now_ms`.
    pub fn tick(&mut self, now_ms: u64) -> Vec<OverlayEffect> {
        let mut effects = Vec::new();
        self.advance(now_ms, &mut effects);
        effects
    }

    /// Pointer entered the surface; suspends auto close when configured.
    pub fn pointer_enter(&mut self, now_ms: u64) -> Vec<OverlayEffect> {
        let mut effects = Vec::new();
        self.advance(now_ms, &mut effects);
        self.hovered = true;
        if self.config.pause_on_hover {
            if let Some(countdown) = self.auto_close.as_mut() {
                countdown.pause(now_ms);
            }
        }
        effects
    }

    /// Pointer left the surface; resumes a suspended countdown with its remaining budget.
    pub fn pointer_leave(&mut self, now_ms: u64) -> Vec<OverlayEffect> {
        self.hovered = false;
        if let Some(countdown) = self.auto_close.as_mut() {
            countdown.resume(now_ms);
        }
        let mut effects = Vec::new();
        self.advance(now_ms, &mut effects);
        effects
    }

    /// Escape key from the window listener.
    pub fn handle_escape(&mut self, now_ms: u64) -> Vec<OverlayEffect> {
        if !self.config.close_on_escape {
            return Vec::new();
        }
        self.request_close(CloseReason::EscapeKey, now_ms)
    }

    /// Pointer down outside the surface.
    pub fn handle_outside_click(&mut self, now_ms: u64) -> Vec<OverlayEffect> {
        if !self.config.close_on_outside_click {
            return Vec::new();
        }
        self.request_close(CloseReason::OutsideClick, now_ms)
    }

    /// Drops all pending deadlines without firing callbacks.
    pub fn unmount(&mut self) {
        self.phase = OverlayPhase::Closed;
        self.phase_deadline = None;
        self.auto_close = None;
        self.hovered = false;
    }

    fn begin_exit(&mut self, reason: CloseReason, at_ms: u64, effects: &mut Vec<OverlayEffect>) {
        self.phase = OverlayPhase::Exiting;
        self.phase_deadline = Some(at_ms.saturating_add(self.config.exit_ms));
        self.auto_close = None;
        if reason.notifies_host() {
            effects.push(OverlayEffect::CloseRequested(reason));
        }
    }

    fn finish_exit(&mut self) {
        self.phase = OverlayPhase::Closed;
        self.phase_deadline = None;
        self.auto_close = None;
        // The pointer left with the surface; no pointerleave will follow.
        self.hovered = false;
    }

    // Deadlines chain from the scheduled instant, not from `now_ms`, so a late tick replays the
    // same timeline an on-time tick would have produced.
    fn advance(&mut self, now_ms: u64, effects: &mut Vec<OverlayEffect>) {
        loop {
            match self.phase {
                OverlayPhase::Opening => {
                    let Some(at) = self.phase_deadline.filter(|at| *at <= now_ms) else {
                        return;
                    };
                    self.phase = OverlayPhase::Open;
                    self.phase_deadline = None;
                    self.auto_close = self.config.auto_close_ms.map(|budget| {
                        let mut countdown = Countdown::started(budget, at);
                        if self.hovered && self.config.pause_on_hover {
                            countdown.pause(at);
                        }
                        countdown
                    });
                }
                OverlayPhase::Open => {
                    let Some(at) = self
                        .auto_close
                        .filter(|countdown| countdown.is_elapsed(now_ms))
                        .and_then(|countdown| countdown.deadline())
                    else {
                        return;
                    };
                    self.begin_exit(CloseReason::AutoClose, at, effects);
                }
                OverlayPhase::Exiting => {
                    if !self.phase_deadline.is_some_and(|at| at <= now_ms) {
                        return;
                    }
                    self.finish_exit();
                    effects.push(OverlayEffect::CloseCompleted);
                    return;
                }
                OverlayPhase::Closed => return,
            }
        }
    }
}

impl OverlayMachine for OverlaySurface {
    type Event = OverlayEffect;

    fn apply(&mut self, input: OverlayInput, now_ms: u64) -> Vec<OverlayEffect> {
        match input {
            OverlayInput::Sync(is_open) => self.sync_open(is_open, now_ms),
            OverlayInput::Open => self.open(now_ms),
            OverlayInput::RequestClose(reason) => self.request_close(reason, now_ms),
            OverlayInput::CompleteClose => self.complete_close(now_ms),
            OverlayInput::Tick => self.tick(now_ms),
            OverlayInput::PointerEnter => self.pointer_enter(now_ms),
            OverlayInput::PointerLeave => self.pointer_leave(now_ms),
            OverlayInput::Escape => self.handle_escape(now_ms),
            OverlayInput::OutsideClick => self.handle_outside_click(now_ms),
        }
    }

    fn next_deadline(&self) -> Option<u64> {
        OverlaySurface::next_deadline(self)
    }

    fn listens_for_dismissal(&self) -> bool {
        OverlaySurface::listens_for_dismissal(self)
    }

    fn phase(&self) -> OverlayPhase {
        OverlaySurface::phase(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn auto_closing(budget: u64) -> OverlaySurface {
        OverlaySurface::new(OverlayConfig::default().with_auto_close(budget))
    }

    fn count(effects: &[OverlayEffect], wanted: OverlayEffect) -> usize {
        effects.iter().filter(|effect| **effect == wanted).count()
    }

    #[test]
    fn host_driven_open_and_close_fire_each_callback_once() {
        let mut surface = OverlaySurface::default();
        let mut log = Vec::new();

        log.extend(surface.sync_open(false, 0));
        assert_eq!(surface.phase(), OverlayPhase::Closed);

        log.extend(surface.sync_open(true, 10));
        assert_eq!(surface.phase(), OverlayPhase::Opening);
        log.extend(surface.sync_open(true, 50));
        log.extend(surface.tick(100));
        assert_eq!(surface.phase(), OverlayPhase::Opening);
        log.extend(surface.tick(210));
        assert_eq!(surface.phase(), OverlayPhase::Open);

        log.extend(surface.sync_open(false, 500));
        assert_eq!(surface.phase(), OverlayPhase::Exiting);
        log.extend(surface.tick(699));
        assert_eq!(surface.phase(), OverlayPhase::Exiting);
        log.extend(surface.tick(700));
        assert_eq!(surface.phase(), OverlayPhase::Closed);
        log.extend(surface.tick(10_000));

        assert_eq!(log, vec![OverlayEffect::Opened, OverlayEffect::CloseCompleted]);
    }

    #[test]
    fn zero_length_animations_transition_immediately() {
        let mut surface = OverlaySurface::new(OverlayConfig::default().without_animation());
        assert_eq!(surface.open(0), vec![OverlayEffect::Opened]);
        assert_eq!(surface.phase(), OverlayPhase::Open);
        assert_eq!(
            surface.handle_escape(5),
            vec![
                OverlayEffect::CloseRequested(CloseReason::EscapeKey),
                OverlayEffect::CloseCompleted
            ]
        );
        assert_eq!(surface.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn auto_close_completes_once_after_budget_and_exit() {
        let mut surface = auto_closing(3_000);
        let mut log = surface.open(0);
        assert_eq!(surface.next_deadline(), Some(200));
        log.extend(surface.tick(200));
        assert_eq!(surface.next_deadline(), Some(3_200));

        log.extend(surface.tick(3_199));
        assert_eq!(surface.phase(), OverlayPhase::Open);
        log.extend(surface.tick(3_200));
        assert_eq!(surface.phase(), OverlayPhase::Exiting);
        log.extend(surface.tick(3_400));
        log.extend(surface.tick(9_000));

        assert_eq!(count(&log, OverlayEffect::CloseCompleted), 1);
        assert_eq!(
            log,
            vec![
                OverlayEffect::Opened,
                OverlayEffect::CloseRequested(CloseReason::AutoClose),
                OverlayEffect::CloseCompleted
            ]
        );
    }

    #[test]
    fn late_tick_replays_the_whole_timeline() {
        let mut surface = auto_closing(1_000);
        surface.open(0);
        assert_eq!(
            surface.tick(60_000),
            vec![
                OverlayEffect::CloseRequested(CloseReason::AutoClose),
                OverlayEffect::CloseCompleted
            ]
        );
        assert_eq!(surface.phase(), OverlayPhase::Closed);
    }

    #[test]
    fn hover_suspends_auto_close_without_resetting() {
        let mut surface = auto_closing(1_000);
        surface.open(0);
        surface.tick(200);

        surface.pointer_enter(700);
        assert_eq!(surface.next_deadline(), None);
        assert!(surface.tick(5_000).is_empty());
        assert_eq!(surface.auto_close_remaining(5_000), Some(500));

        surface.pointer_leave(5_000);
        assert_eq!(surface.next_deadline(), Some(5_500));
        assert_eq!(
            surface.tick(5_500),
            vec![OverlayEffect::CloseRequested(CloseReason::AutoClose)]
        );
        // 4.3 s of hover pushed the close from 1 200 to 5 500.
        assert!(5_500 - 1_200 >= 5_000 - 700);
    }

    #[test]
    fn hovering_before_open_starts_the_countdown_paused() {
        let mut surface = auto_closing(1_000);
        surface.open(0);
        surface.pointer_enter(50);
        surface.tick(200);
        assert_eq!(surface.phase(), OverlayPhase::Open);
        assert_eq!(surface.auto_close_remaining(10_000), Some(1_000));
    }

    #[test]
    fn closing_while_hovered_does_not_pause_the_next_open() {
        let mut surface = auto_closing(1_000);
        surface.sync_open(true, 0);
        surface.tick(200);
        surface.pointer_enter(300);
        surface.request_close(CloseReason::Dismiss, 310);
        surface.tick(510);
        assert_eq!(surface.phase(), OverlayPhase::Closed);
        assert!(!surface.is_hovered());

        surface.sync_open(true, 10_000);
        surface.tick(10_200);
        assert_eq!(surface.phase(), OverlayPhase::Open);
        assert_eq!(surface.next_deadline(), Some(11_200));
        assert!(surface.tick(11_199).is_empty());
        assert_eq!(
            surface.tick(11_200),
            vec![OverlayEffect::CloseRequested(CloseReason::AutoClose)]
        );
    }

    #[test]
    fn hover_does_not_pause_when_disabled() {
        let mut config = OverlayConfig::default().with_auto_close(1_000);
        config.pause_on_hover = false;
        let mut surface = OverlaySurface::new(config);
        surface.open(0);
        surface.tick(200);
        surface.pointer_enter(300);
        assert_eq!(surface.next_deadline(), Some(1_200));
    }

    #[test]
    fn internal_dismissals_notify_the_host() {
        for (reason, mut surface) in [
            (CloseReason::EscapeKey, OverlaySurface::default()),
            (CloseReason::OutsideClick, OverlaySurface::default()),
        ] {
            surface.open(0);
            surface.tick(200);
            let effects = match reason {
                CloseReason::EscapeKey => surface.handle_escape(300),
                _ => surface.handle_outside_click(300),
            };
            assert_eq!(effects, vec![OverlayEffect::CloseRequested(reason)]);
            assert!(!surface.listens_for_dismissal());
        }
    }

    #[test]
    fn disabled_dismissals_are_ignored() {
        let mut surface = OverlaySurface::new(OverlayConfig::default().dismissible(false, false));
        surface.open(0);
        surface.tick(200);
        assert!(surface.handle_escape(300).is_empty());
        assert!(surface.handle_outside_click(300).is_empty());
        assert_eq!(surface.phase(), OverlayPhase::Open);
    }

    #[test]
    fn close_during_opening_goes_straight_to_exiting() {
        let mut surface = OverlaySurface::default();
        surface.open(0);
        assert!(surface.listens_for_dismissal());
        assert!(!surface.can_drag());
        surface.sync_open(false, 100);
        assert_eq!(surface.phase(), OverlayPhase::Exiting);
        assert_eq!(surface.next_deadline(), Some(300));
    }

    #[test]
    fn repeated_close_requests_are_noops() {
        let mut surface = OverlaySurface::default();
        assert!(surface.request_close(CloseReason::Dismiss, 0).is_empty());
        surface.open(0);
        surface.tick(200);
        assert_eq!(surface.request_close(CloseReason::Dismiss, 300).len(), 1);
        assert!(surface.request_close(CloseReason::Dismiss, 310).is_empty());
        assert!(surface.handle_escape(320).is_empty());
    }

    #[test]
    fn host_that_keeps_is_open_reopens_on_next_sync() {
        let mut surface = OverlaySurface::default();
        surface.sync_open(true, 0);
        surface.tick(200);
        surface.handle_escape(300);

        assert!(surface.sync_open(true, 350).is_empty(), "ignored while exiting");
        assert_eq!(surface.tick(500), vec![OverlayEffect::CloseCompleted]);
        assert_eq!(surface.sync_open(true, 510), vec![OverlayEffect::Opened]);
    }

    #[test]
    fn complete_close_only_applies_while_exiting() {
        let mut surface = OverlaySurface::default();
        assert!(surface.complete_close(0).is_empty());
        surface.open(0);
        surface.request_close(CloseReason::Dismiss, 10);
        assert_eq!(surface.complete_close(20), vec![OverlayEffect::CloseCompleted]);
        assert!(surface.tick(1_000).is_empty());
    }

    #[test]
    fn unmount_clears_deadlines_silently() {
        let mut surface = auto_closing(500);
        surface.open(0);
        surface.tick(200);
        surface.unmount();
        assert_eq!(surface.next_deadline(), None);
        assert!(surface.tick(10_000).is_empty());
    }

    #[test]
    fn drag_is_allowed_only_while_open() {
        let mut surface = OverlaySurface::default();
        assert!(!surface.can_drag());
        surface.open(0);
        surface.tick(200);
        assert!(surface.can_drag());
        surface.request_close(CloseReason::Dismiss, 300);
        assert!(!surface.can_drag());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: OverlayConfig =
            serde_json::from_str(r#"{"auto_close_ms":4000}"#).expect("config");
        assert_eq!(config, OverlayConfig::default().with_auto_close(4_000));
    }

    #[test]
    fn machine_inputs_route_to_surface_operations() {
        let mut surface = OverlaySurface::new(OverlayConfig::default().without_animation());
        assert_eq!(surface.apply(OverlayInput::Sync(true), 0), vec![OverlayEffect::Opened]);
        assert!(OverlayMachine::listens_for_dismissal(&surface));
        assert_eq!(
            surface.apply(OverlayInput::OutsideClick, 10),
            vec![
                OverlayEffect::CloseRequested(CloseReason::OutsideClick),
                OverlayEffect::CloseCompleted
            ]
        );
        assert_eq!(OverlayMachine::phase(&surface), OverlayPhase::Closed);
        assert!(surface.apply(OverlayInput::Tick, 20).is_empty());
    }
}
