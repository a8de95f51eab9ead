use serde::{Deserialize, Serialize};

use super::*;

const MENU_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("menu-bg-light", "menu-text-light", "menu-border-light")),
    ("dark", tokens("menu-bg-dark", "menu-text-dark", "menu-border-dark")),
]);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One menu command.
pub struct MenuEntry {
    /// Stable identity.
    pub key: String,
    /// Visible text.
    pub label: String,
    /// Skipped by clicks and keyboard navigation.
    #[serde(default)]
    pub disabled: bool,
}

impl MenuEntry {
    /// Enabled entry.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[component]
/// Overlay command list with roving focus. Choosing an entry marks it current, fires
/// `on_select`, and asks the host to close the menu. Escape closes without changing the current
/// entry.
pub fn Menu(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] is_open: MaybeSignal<bool>,
    #[prop(optional)] on_close: Option<Callback<CloseReason>>,
    #[prop(optional)] on_open: Option<Callback<()>>,
    #[prop(optional)] on_close_complete: Option<Callback<()>>,
    entries: Vec<MenuEntry>,
    /// Fired with the chosen entry index.
    on_select: Callback<usize>,
    #[prop(optional)] config: Option<OverlayConfig>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
) -> impl IntoView {
    let surface = use_overlay_surface(
        is_open,
        config.unwrap_or_else(|| OverlayConfig::default().with_durations(120, 120)),
        OverlayCallbacks {
            on_open,
            on_close,
            on_close_complete,
        },
    );
    let phase = surface.phase();
    let group = use_toggle_group(
        MaybeSignal::Static(
            entries
                .iter()
                .map(|entry| ToggleItem::new(entry.key.clone()).with_disabled(entry.disabled))
                .collect(),
        ),
        SelectionMode::ACCORDION,
        Vec::new(),
        None,
        ToggleCallbacks::default(),
    );
    let theme_class = use_widget_class(theme, MENU_PALETTE);
    let id_prefix = next_instance_id("menu");

    let choose = move |index: usize| {
        let enabled = group
            .group
            .with_untracked(|group| group.items().get(index).is_some_and(|item| !item.disabled));
        if !enabled {
            return;
        }
        group.set_active(vec![index]);
        on_select.call(index);
        surface.dismiss();
    };

    {
        let id_prefix = id_prefix.clone();
        create_effect(move |_| {
            if phase.get() != OverlayPhase::Open {
                return;
            }
            let target = untrack(move || {
                let mut next = group.group.get_untracked();
                let target = next
                    .active_indices()
                    .first()
                    .copied()
                    .filter(|index| next.set_focus(*index))
                    .or_else(|| next.focus_first());
                group.group.set(next);
                target
            });
            if let Some(index) = target {
                focus_item(&id_prefix, index);
            }
        });
    }

    let on_keydown = {
        let id_prefix = id_prefix.clone();
        move |ev: KeyboardEvent| {
            let intent = KeyIntent::from_key(&ev.key());
            if intent == KeyIntent::Activate {
                ev.prevent_default();
                if let Some(index) = group.group.with_untracked(|group| group.focused()) {
                    choose(index);
                }
                return;
            }
            match group.handle_keydown(&ev) {
                ToggleKeyOutcome::FocusMoved(index) => focus_item(&id_prefix, index),
                ToggleKeyOutcome::Dismiss => {
                    surface.send(OverlayInput::Escape);
                }
                ToggleKeyOutcome::Toggled(_) | ToggleKeyOutcome::Ignored => {}
            }
        }
    };

    let entries = store_value(entries);
    let render_entries = move || {
        entries.with_value(|entries| {
            entries
                .iter()
                .cloned()
                .enumerate()
                .map(|(index, entry)| {
                    let current = move || group.is_active(index);
                    view! {
                        <button
                            type="button"
                            role="menuitem"
                            id=format!("{id_prefix}-{index}")
                            aria-current=move || current().then_some("true")
                            aria-disabled=bool_token(entry.disabled)
                            disabled=entry.disabled
                            tabindex=move || if group.tab_stop() == Some(index) { 0 } else { -1 }
                            data-ui-slot="menu-item"
                            on:click=move |_| choose(index)
                            on:pointerenter=move |_| group.set_focus(index)
                        >
                            {entry.label}
                        </button>
                    }
                })
                .collect_view()
        })
    };

    let surface_node_ref = surface.node_ref;
    view! {
        <Show when=move || phase.get().is_rendered() fallback=|| ()>
            <div
                node_ref=surface_node_ref
                class=move || format!("{} {}", merge_layout_class("ui-menu", layout_class), theme_class.get())
                role="menu"
                aria-label=aria_label.clone()
                data-ui-primitive="true"
                data-ui-kind="menu"
                data-ui-phase=move || phase.get().token()
                on:keydown=on_keydown.clone()
            >
                {render_entries.clone()}
            </div>
        </Show>
    }
}
