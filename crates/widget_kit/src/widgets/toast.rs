use widget_state::{ToastEvent, ToastId, ToastQueue, ToastTone};

use super::*;
use crate::primitives::now_ms;

const TOAST_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("toast-bg-light", "toast-text-light", "toast-border-light")),
    ("dark", tokens("toast-bg-dark", "toast-text-dark", "toast-border-dark")),
]);

#[component]
/// Single host-controlled notification. Auto close is on by default.
pub fn Toast(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] is_open: MaybeSignal<bool>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close_complete: Option<Callback<()>>,
    #[prop(default = true)] auto_close: bool,
    #[prop(optional)] auto_close_duration: Option<u64>,
    #[prop(optional)] config: Option<OverlayConfig>,
    #[prop(optional)] tone: ToastTone,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
    children: ChildrenFn,
) -> impl IntoView {
    let base = config.unwrap_or_else(|| OverlayConfig::default().dismissible(false, false));
    let duration = auto_close_duration
        .or(base.auto_close_ms)
        .unwrap_or(ToastQueue::DEFAULT_DURATION_MS);
    let surface = use_overlay_surface(
        is_open,
        overlay_config(Some(base), auto_close, Some(duration)),
        OverlayCallbacks {
            on_open,
            on_close,
            on_close_complete,
        },
    );
    let phase = surface.phase();
    let theme_class = use_widget_class(theme, TOAST_PALETTE);
    let (on_enter, on_leave) = hover_handlers(surface);

    let surface_node_ref = surface.node_ref;
    view! {
        <Show when=move || phase.get().is_rendered() fallback=|| ()>
            <div
                node_ref=surface_node_ref
                class=move || format!("{} {}", merge_layout_class("ui-toast", layout_class), theme_class.get())
                role="status"
                aria-live="polite"
                data-ui-primitive="true"
                data-ui-kind="toast"
                data-ui-tone=tone.token()
                data-ui-phase=move || phase.get().token()
                on:pointerenter=on_enter
                on:pointerleave=on_leave
            >
                <div data-ui-slot="message">{children()}</div>
                <button
                    type="button"
                    data-ui-slot="close"
                    aria-label="Dismiss"
                    on:click=move |_| surface.dismiss()
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}

#[derive(Clone, Copy)]
/// Leptos context for pushing toasts into the nearest [`ToastViewport`].
pub struct ToastContext {
    /// Queue snapshot.
    pub queue: RwSignal<ToastQueue>,
    timer: TimerSlot,
    on_event: Option<Callback<ToastEvent>>,
}

impl ToastContext {
    /// Queues a toast; it shows as soon as a slot is free.
    pub fn push(&self, message: impl Into<String>, tone: ToastTone) -> ToastId {
        let message = message.into();
        self.drive(move |queue, now| queue.push(message, tone, now))
    }

    /// Queues a toast with its own timing.
    pub fn push_with_config(
        &self,
        message: impl Into<String>,
        tone: ToastTone,
        config: OverlayConfig,
    ) -> ToastId {
        let message = message.into();
        self.drive(move |queue, now| queue.push_with_config(message, tone, config, now))
    }

    /// Closes a toast.
    pub fn dismiss(&self, id: ToastId) {
        self.drive(move |queue, now| ((), queue.dismiss(id, now)));
    }

    /// Drops every toast immediately.
    pub fn clear(&self) {
        self.timer.cancel();
        self.queue.update(ToastQueue::clear);
    }

    fn pointer(&self, id: ToastId, entered: bool) {
        self.drive(move |queue, now| {
            let events = if entered {
                queue.pointer_enter(id, now)
            } else {
                queue.pointer_leave(id, now)
            };
            ((), events)
        });
    }

    fn tick(self) {
        self.drive(|queue, now| ((), queue.tick(now)));
    }

    fn drive<R>(
        self,
        apply: impl FnOnce(&mut ToastQueue, u64) -> (R, Vec<ToastEvent>),
    ) -> R {
        let now = now_ms();
        let mut next = self.queue.get_untracked();
        let previous = next.clone();
        let (result, events) = apply(&mut next, now);
        let deadline = next.next_deadline();

        if next != previous {
            self.queue.set(next);
        }
        self.timer.arm_at(deadline, now, move || self.tick());

        if let Some(on_event) = self.on_event.as_ref() {
            for event in events {
                on_event.call(event);
            }
        }
        result
    }
}

#[component]
/// Fixed stack that renders queued toasts and provides [`ToastContext`] to its children.
pub fn ToastViewport(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(default = ToastQueue::DEFAULT_MAX_VISIBLE)] max_visible: usize,
    #[prop(optional)] config: Option<OverlayConfig>,
    /// Observes every toast transition.
    #[prop(optional)]
    on_event: Option<Callback<ToastEvent>>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
    children: Children,
) -> impl IntoView {
    let config = config.unwrap_or_else(|| {
        OverlayConfig::default()
            .dismissible(false, false)
            .with_auto_close(ToastQueue::DEFAULT_DURATION_MS)
    });
    let toasts = ToastContext {
        queue: create_rw_signal(ToastQueue::new(max_visible, config)),
        timer: TimerSlot::new(),
        on_event,
    };
    provide_context(toasts);
    let theme_class = use_widget_class(theme, TOAST_PALETTE);

    let visible = move || {
        toasts.queue.with(|queue| {
            queue
                .visible()
                .map(|entry| (entry.id, entry.message.clone(), entry.tone))
                .collect::<Vec<_>>()
        })
    };

    view! {
        {children()}
        <div
            class=merge_layout_class("ui-toast-viewport", layout_class)
            data-ui-primitive="true"
            data-ui-kind="toast-viewport"
            aria-live="polite"
        >
            <For each=visible key=|(id, _, _)| *id let:toast>
                {
                    let (id, message, tone) = toast;
                    let phase = move || {
                        toasts
                            .queue
                            .with(|queue| queue.get(id).map_or(OverlayPhase::Closed, |entry| entry.phase()))
                            .token()
                    };
                    view! {
                        <div
                            class=move || format!("ui-toast {}", theme_class.get())
                            role="status"
                            data-ui-primitive="true"
                            data-ui-kind="toast"
                            data-ui-tone=tone.token()
                            data-ui-phase=phase
                            on:pointerenter=move |_| toasts.pointer(id, true)
                            on:pointerleave=move |_| toasts.pointer(id, false)
                        >
                            <div data-ui-slot="message">{message}</div>
                            <button
                                type="button"
                                data-ui-slot="close"
                                aria-label="Dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}

/// Returns the nearest [`ToastContext`].
///
/// # Panics
///
/// Panics if called outside [`ToastViewport`].
pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext not provided; mount a ToastViewport")
}
