use super::*;

const MODAL_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("modal-bg-light", "modal-text-light", "modal-border-light")),
    ("dark", tokens("modal-bg-dark", "modal-text-dark", "modal-border-dark")),
]);

const MODAL_INITIAL_RECT: SurfaceRect = SurfaceRect::new(160, 96, 560, 380);

#[component]
/// Dialog surface over a backdrop. With `draggable`, the header moves the dialog while it is
/// fully open.
pub fn Modal(
    #[prop(optional)] layout_class: Option<&'static str>,
    /// Host-owned open flag.
    #[prop(into)]
    is_open: MaybeSignal<bool>,
    /// Fired when Escape, an outside click, auto close, or the close button ends the dialog.
    #[prop(optional)]
    on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close_complete: Option<Callback<()>>,
    #[prop(optional)] auto_close: bool,
    #[prop(optional)] auto_close_duration: Option<u64>,
    #[prop(optional)] config: Option<OverlayConfig>,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
    #[prop(optional)] draggable: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let surface = use_overlay_surface(
        is_open,
        overlay_config(config, auto_close, auto_close_duration),
        OverlayCallbacks {
            on_open,
            on_close,
            on_close_complete,
        },
    );
    let phase = surface.phase();
    let theme_class = use_widget_class(theme, MODAL_PALETTE);
    let geometry = use_surface_geometry(MODAL_INITIAL_RECT, phase, false);
    let style = geometry.style();
    let (on_enter, on_leave) = hover_handlers(surface);
    let title_id = next_instance_id("modal-title");

    let surface_node_ref = surface.node_ref;
    view! {
        <Show when=move || phase.get().is_rendered() fallback=|| ()>
            <div
                class="ui-modal-backdrop"
                data-ui-kind="modal-backdrop"
                data-ui-phase=move || phase.get().token()
            >
                <div
                    node_ref=surface_node_ref
                    class=move || format!("{} {}", merge_layout_class("ui-modal", layout_class), theme_class.get())
                    role="dialog"
                    aria-modal="true"
                    aria-labelledby=title_id.clone()
                    style=move || draggable.then(|| style.get())
                    data-ui-primitive="true"
                    data-ui-kind="modal"
                    data-ui-phase=move || phase.get().token()
                    data-ui-draggable=bool_token(draggable)
                    on:pointerenter=on_enter
                    on:pointerleave=on_leave
                >
                    <header
                        data-ui-slot="header"
                        on:pointerdown=move |ev| {
                            if draggable {
                                geometry.begin_drag(&ev);
                            }
                        }
                    >
                        <span id=title_id.clone() data-ui-slot="title">{title.clone()}</span>
                        <button
                            type="button"
                            data-ui-slot="close"
                            aria-label="Close"
                            on:click=move |_| surface.dismiss()
                        >
                            "×"
                        </button>
                    </header>
                    <div data-ui-slot="body">{children()}</div>
                </div>
            </div>
        </Show>
    }
}
