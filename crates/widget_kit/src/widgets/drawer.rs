use super::*;

const DRAWER_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("drawer-bg-light", "drawer-text-light", "drawer-border-light")),
    ("dark", tokens("drawer-bg-dark", "drawer-text-dark", "drawer-border-dark")),
]);

const DRAWER_FLOATING_RECT: SurfaceRect = SurfaceRect::new(96, 72, 360, 480);

#[component]
/// Edge-anchored panel. It starts docked to `side`; with `draggable` it can be pulled off the
/// edge and snaps back to whichever edge it is released near, and with `resizable` the floating
/// panel grows from any edge or corner.
pub fn Drawer(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] is_open: MaybeSignal<bool>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close_complete: Option<Callback<()>>,
    #[prop(optional)] auto_close: bool,
    #[prop(optional)] auto_close_duration: Option<u64>,
    #[prop(optional)] config: Option<OverlayConfig>,
    /// Edge the drawer slides in from. Defaults to the right edge.
    #[prop(default = DockEdge::Right)]
    side: DockEdge,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
    #[prop(optional)] draggable: bool,
    #[prop(optional)] resizable: bool,
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
    let theme_class = use_widget_class(theme, DRAWER_PALETTE);
    let geometry = use_surface_geometry(DRAWER_FLOATING_RECT, phase, draggable);
    geometry.dock(side);
    let style = geometry.style();
    let dock_token = geometry.dock_token();
    let (on_enter, on_leave) = hover_handlers(surface);

    let surface_node_ref = surface.node_ref;
    view! {
        <Show when=move || phase.get().is_rendered() fallback=|| ()>
            <div
                node_ref=surface_node_ref
                class=move || format!("{} {}", merge_layout_class("ui-drawer", layout_class), theme_class.get())
                role="dialog"
                aria-label=title.clone()
                style=move || style.get()
                data-ui-primitive="true"
                data-ui-kind="drawer"
                data-ui-side=side.token()
                data-ui-dock=move || dock_token.get()
                data-ui-phase=move || phase.get().token()
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
                    <span data-ui-slot="title">{title.clone()}</span>
                    {draggable.then(|| view! { <DockToggle geometry=geometry side=side/> })}
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
                {resizable.then(|| view! { <ResizeHandles geometry=geometry/> })}
            </div>
        </Show>
    }
}

#[component]
fn DockToggle(geometry: GeometryHandle, side: DockEdge) -> impl IntoView {
    let docked = move || geometry.geometry.with(|geometry| geometry.docked().is_some());
    view! {
        <button
            type="button"
            data-ui-slot="dock"
            aria-pressed=move || bool_token(docked())
            on:pointerdown=|ev| ev.stop_propagation()
            on:click=move |_| {
                if docked() {
                    geometry.undock();
                } else {
                    geometry.dock(side);
                }
            }
        >
            {move || if docked() { "Float" } else { "Dock" }}
        </button>
    }
}

#[component]
fn ResizeHandles(geometry: GeometryHandle) -> impl IntoView {
    let floating = move || geometry.geometry.with(|geometry| geometry.docked().is_none());
    view! {
        <Show when=floating fallback=|| ()>
            {ResizeEdge::ALL
                .into_iter()
                .map(|edge| {
                    view! {
                        <div
                            data-ui-slot="resize-handle"
                            data-ui-edge=edge.token()
                            aria-hidden="true"
                            on:pointerdown=move |ev| {
                                ev.stop_propagation();
                                geometry.begin_resize(edge, &ev);
                            }
                        ></div>
                    }
                })
                .collect_view()}
        </Show>
    }
}

#[component]
/// Drawer without drag or resize; the panel simply slides in from `side`.
pub fn Offcanvas(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] is_open: MaybeSignal<bool>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close_complete: Option<Callback<()>>,
    #[prop(optional)] auto_close: bool,
    #[prop(optional)] auto_close_duration: Option<u64>,
    #[prop(optional)] config: Option<OverlayConfig>,
    #[prop(default = DockEdge::Left)] side: DockEdge,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
    children: ChildrenFn,
) -> impl IntoView {
    let on_close = Callback::new(move |reason: CloseReason| match on_close.as_ref() {
        Some(on_close) => on_close.call(reason),
        None => logging::warn!("offcanvas closed by {reason:?} without an on_close callback"),
    });
    let on_open = Callback::new(move |()| {
        if let Some(on_open) = on_open.as_ref() {
            on_open.call(());
        }
    });
    let on_close_complete = Callback::new(move |()| {
        if let Some(on_close_complete) = on_close_complete.as_ref() {
            on_close_complete.call(());
        }
    });

    view! {
        <Drawer
            layout_class=layout_class.unwrap_or("ui-offcanvas")
            is_open=is_open
            on_close=on_close
            on_open=on_open
            on_close_complete=on_close_complete
            config=overlay_config(config, auto_close, auto_close_duration)
            side=side
            title=title.unwrap_or_default()
            theme=theme
        >
            {children()}
        </Drawer>
    }
}
