use widget_state::{ConfirmDialogState, ConfirmEvent, ConfirmOutcome, OverlayEffect};

use super::*;
use crate::overlay::use_overlay_machine;

const CONFIRM_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("confirm-bg-light", "confirm-text-light", "confirm-border-light")),
    ("dark", tokens("confirm-bg-dark", "confirm-text-dark", "confirm-border-dark")),
]);

#[derive(Clone, Copy)]
struct ConfirmCallbacks {
    on_confirm: Option<Callback<()>>,
    on_cancel: Option<Callback<()>>,
    on_resolve: Option<Callback<ConfirmOutcome>>,
    overlay: OverlayCallbacks,
}

impl ConfirmCallbacks {
    fn dispatch(&self, event: ConfirmEvent) {
        match event {
            ConfirmEvent::Resolved(outcome) => {
                let specific = match outcome {
                    ConfirmOutcome::Confirmed => self.on_confirm,
                    ConfirmOutcome::Cancelled => self.on_cancel,
                };
                if let Some(specific) = specific.as_ref() {
                    specific.call(());
                }
                if let Some(on_resolve) = self.on_resolve.as_ref() {
                    on_resolve.call(outcome);
                }
            }
            ConfirmEvent::Overlay(OverlayEffect::CloseRequested(reason))
                if self.overlay.on_close.is_none() =>
            {
                if self.on_resolve.is_none() && self.on_confirm.is_none() && self.on_cancel.is_none()
                {
                    logging::warn!("confirm dialog closed by {reason:?} with no callback to flip is_open");
                }
            }
            ConfirmEvent::Overlay(effect) => self.overlay.dispatch(effect),
        }
    }
}

#[component]
/// Modal yes/no prompt. Each opening resolves exactly once, before its exit animation: the
/// confirm button confirms, while the cancel button, Escape, an outside click, an elapsed auto
/// close, or the host closing the dialog all cancel. Hovering the dialog holds its auto close.
pub fn ConfirmDialog(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] is_open: MaybeSignal<bool>,
    #[prop(into)] title: String,
    #[prop(optional, into)] message: Option<String>,
    #[prop(default = "Confirm".to_string(), into)] confirm_label: String,
    #[prop(default = "Cancel".to_string(), into)] cancel_label: String,
    #[prop(optional)] on_confirm: Option<Callback<()>>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
    /// Fired once per opening with the chosen outcome.
    #[prop(optional)]
    on_resolve: Option<Callback<ConfirmOutcome>>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close_complete: Option<Callback<()>>,
    #[prop(optional)] auto_close: bool,
    #[prop(optional)] auto_close_duration: Option<u64>,
    #[prop(optional)] config: Option<OverlayConfig>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
) -> impl IntoView {
    let callbacks = ConfirmCallbacks {
        on_confirm,
        on_cancel,
        on_resolve,
        overlay: OverlayCallbacks {
            on_open,
            on_close,
            on_close_complete,
        },
    };
    let dialog = use_overlay_machine(
        ConfirmDialogState::new(overlay_config(config, auto_close, auto_close_duration)),
        is_open,
        Callback::new(move |event: ConfirmEvent| callbacks.dispatch(event)),
    );
    let phase = dialog.phase();
    let (on_enter, on_leave) = hover_handlers(dialog);
    let theme_class = use_widget_class(theme, CONFIRM_PALETTE);
    let title_id = next_instance_id("confirm-title");
    let resolve = move |outcome: ConfirmOutcome| {
        dialog.update(move |state, now| match outcome {
            ConfirmOutcome::Confirmed => state.confirm(now),
            ConfirmOutcome::Cancelled => state.cancel(now),
        });
    };

    let surface_node_ref = dialog.node_ref;
    view! {
        <Show when=move || phase.get().is_rendered() fallback=|| ()>
            <div
                class="ui-modal-backdrop"
                data-ui-kind="confirm-backdrop"
                data-ui-phase=move || phase.get().token()
            >
                <div
                    node_ref=surface_node_ref
                    class=move || format!("{} {}", merge_layout_class("ui-confirm-dialog", layout_class), theme_class.get())
                    role="alertdialog"
                    aria-modal="true"
                    aria-labelledby=title_id.clone()
                    data-ui-primitive="true"
                    data-ui-kind="confirm-dialog"
                    data-ui-phase=move || phase.get().token()
                    on:pointerenter=on_enter
                    on:pointerleave=on_leave
                    data-ui-outcome=move || {
                        dialog
                            .state
                            .with(|state| match state.outcome() {
                                Some(ConfirmOutcome::Confirmed) => "confirmed",
                                Some(ConfirmOutcome::Cancelled) => "cancelled",
                                None => "pending",
                            })
                    }
                >
                    <h2 id=title_id.clone() data-ui-slot="title">{title.clone()}</h2>
                    {message.clone().map(|message| view! { <p data-ui-slot="message">{message}</p> })}
                    <footer data-ui-slot="actions">
                        <button
                            type="button"
                            data-ui-slot="cancel"
                            on:click=move |_| resolve(ConfirmOutcome::Cancelled)
                        >
                            {cancel_label.clone()}
                        </button>
                        <button
                            type="button"
                            data-ui-slot="confirm"
                            on:click=move |_| resolve(ConfirmOutcome::Confirmed)
                        >
                            {confirm_label.clone()}
                        </button>
                    </footer>
                </div>
            </div>
        </Show>
    }
}
