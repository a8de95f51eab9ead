//! Reactive driver for overlay state machines.
//!
//! [`use_overlay_machine`] owns one [`OverlayMachine`] in a signal, keeps a single [`TimerSlot`]
//! armed at the machine's next deadline, and attaches the window Escape and pointer-down
//! listeners only while the machine listens for dismissal. Everything is released on cleanup.
#![allow(clippy::clone_on_copy)]

use leptos::*;
use leptos::leptos_dom::helpers::WindowListenerHandle;
use widget_state::{
    CloseReason, KeyIntent, OverlayConfig, OverlayEffect, OverlayInput, OverlayMachine,
    OverlayPhase, OverlaySurface,
};

use crate::primitives::{event_target_within, now_ms};
use crate::timer::TimerSlot;

/// Auto-close budget used when a host enables auto close without a duration.
pub const DEFAULT_AUTO_CLOSE_MS: u64 = 5_000;

/// Reactive handle to a driven overlay machine.
pub struct OverlayHandle<M: OverlayMachine> {
    /// Machine snapshot.
    pub state: RwSignal<M>,
    /// Surface element; pointer-downs inside it are not outside clicks.
    pub node_ref: NodeRef<html::Div>,
    timer: TimerSlot,
    on_event: Callback<M::Event>,
}

impl<M: OverlayMachine> Clone for OverlayHandle<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: OverlayMachine> Copy for OverlayHandle<M> {}

impl<M: OverlayMachine> OverlayHandle<M> {
    /// Feeds one input to the machine at the current time.
    pub fn send(&self, input: OverlayInput) {
        self.update(move |machine, now| machine.apply(input, now));
    }

    /// Runs a machine-specific operation, then reschedules the deadline timer and fires the
    /// resulting events like [`Self::send`].
    pub fn update(&self, apply: impl FnOnce(&mut M, u64) -> Vec<M::Event>) {
        let handle = *self;
        let now = now_ms();
        let mut next = handle.state.get_untracked();
        let previous = next.clone();
        let events = apply(&mut next, now);
        let deadline = next.next_deadline();

        if next != previous {
            handle.state.set(next);
        }
        handle
            .timer
            .arm_at(deadline, now, move || handle.send(OverlayInput::Tick));

        for event in events {
            handle.on_event.call(event);
        }
    }

    /// Reactive lifecycle phase.
    pub fn phase(&self) -> Signal<OverlayPhase> {
        let state = self.state;
        Signal::derive(move || state.with(|machine| machine.phase()))
    }

    /// Reactive "should be in the DOM" flag.
    pub fn is_rendered(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|machine| machine.phase().is_rendered()))
    }

    /// Requests a close from a control inside the surface.
    pub fn dismiss(&self) {
        self.send(OverlayInput::RequestClose(CloseReason::Dismiss));
    }
}

/// Drives `machine` from the host's `is_open` prop and the window dismissal listeners.
pub fn use_overlay_machine<M: OverlayMachine>(
    machine: M,
    is_open: MaybeSignal<bool>,
    on_event: Callback<M::Event>,
) -> OverlayHandle<M> {
    let handle = OverlayHandle {
        state: create_rw_signal(machine),
        node_ref: create_node_ref::<html::Div>(),
        timer: TimerSlot::new(),
        on_event,
    };

    create_effect(move |_| {
        let open = is_open.get();
        untrack(move || handle.send(OverlayInput::Sync(open)));
    });

    install_dismissal_listeners(handle);
    handle
}

fn install_dismissal_listeners<M: OverlayMachine>(handle: OverlayHandle<M>) {
    let listening = create_memo(move |_| {
        handle
            .state
            .with(|machine| machine.listens_for_dismissal())
    });
    let listeners = store_value(None::<(WindowListenerHandle, WindowListenerHandle)>);
    let remove_listeners = move || {
        if let Some((keydown, pointerdown)) = listeners.try_update_value(Option::take).flatten() {
            keydown.remove();
            pointerdown.remove();
        }
    };

    create_effect(move |_| {
        if !listening.get() {
            remove_listeners();
            return;
        }
        if listeners.with_value(Option::is_some) {
            return;
        }

        let keydown = window_event_listener(ev::keydown, move |ev| {
            if ev.default_prevented() {
                return;
            }
            if KeyIntent::from_key(&ev.key()) == KeyIntent::Dismiss {
                handle.send(OverlayInput::Escape);
            }
        });
        let pointerdown = window_event_listener(ev::pointerdown, move |ev| {
            let inside = handle
                .node_ref
                .get_untracked()
                .is_some_and(|surface| event_target_within(&surface, ev.target()));
            if !inside {
                handle.send(OverlayInput::OutsideClick);
            }
        });
        listeners.set_value(Some((keydown, pointerdown)));
    });

    on_cleanup(remove_listeners);
}

#[derive(Clone, Copy, Default)]
/// Host callbacks of an overlay-based widget.
pub struct OverlayCallbacks {
    /// Fired once per `Closed -> Opening`.
    pub on_open: Option<Callback<()>>,
    /// Fired when an internal trigger closes the surface; the host should flip `is_open`.
    pub on_close: Option<Callback<CloseReason>>,
    /// Fired once per `Exiting -> Closed`.
    pub on_close_complete: Option<Callback<()>>,
}

impl OverlayCallbacks {
    /// Routes one surface effect to the matching callback.
    pub fn dispatch(&self, effect: OverlayEffect) {
        match effect {
            OverlayEffect::Opened => {
                if let Some(on_open) = self.on_open.as_ref() {
                    on_open.call(());
                }
            }
            OverlayEffect::CloseRequested(reason) => match self.on_close.as_ref() {
                Some(on_close) => on_close.call(reason),
                None => logging::warn!(
                    "overlay closed by {reason:?} without an on_close callback; host is_open is now stale"
                ),
            },
            OverlayEffect::CloseCompleted => {
                if let Some(on_close_complete) = self.on_close_complete.as_ref() {
                    on_close_complete.call(());
                }
            }
        }
    }
}

/// [`OverlaySurface`] driver used by every overlay-based widget.
pub fn use_overlay_surface(
    is_open: MaybeSignal<bool>,
    config: OverlayConfig,
    callbacks: OverlayCallbacks,
) -> OverlayHandle<OverlaySurface> {
    use_overlay_machine(
        OverlaySurface::new(config),
        is_open,
        Callback::new(move |effect| callbacks.dispatch(effect)),
    )
}

/// Folds the host-facing `auto_close` / `auto_close_duration` props into `base`. With
/// `auto_close` off, `base` is returned unchanged.
pub fn overlay_config(
    base: Option<OverlayConfig>,
    auto_close: bool,
    auto_close_duration_ms: Option<u64>,
) -> OverlayConfig {
    let mut config = base.unwrap_or_default();
    if auto_close {
        let duration = auto_close_duration_ms
            .or(config.auto_close_ms)
            .unwrap_or(DEFAULT_AUTO_CLOSE_MS);
        config.auto_close_ms = Some(duration);
    }
    config
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn auto_close_props_fold_into_config() {
        assert_eq!(overlay_config(None, false, None), OverlayConfig::default());
        assert_eq!(
            overlay_config(None, true, None).auto_close_ms,
            Some(DEFAULT_AUTO_CLOSE_MS)
        );
        assert_eq!(
            overlay_config(None, true, Some(1_500)).auto_close_ms,
            Some(1_500)
        );
        assert_eq!(
            overlay_config(
                Some(OverlayConfig::default().with_auto_close(900)),
                true,
                None
            )
            .auto_close_ms,
            Some(900)
        );
    }

    #[test]
    fn base_config_survives_without_auto_close() {
        let base = OverlayConfig::default()
            .without_animation()
            .dismissible(false, true);
        assert_eq!(overlay_config(Some(base.clone()), false, None), base);
    }

    #[test]
    fn folded_config_passes_through_a_wrapping_widget() {
        let base = OverlayConfig::default().dismissible(true, false);
        let folded = overlay_config(Some(base), true, Some(2_000));
        assert_eq!(folded.auto_close_ms, Some(2_000));
        assert!(!folded.close_on_outside_click);
        assert_eq!(overlay_config(Some(folded.clone()), false, None), folded);
    }
}
