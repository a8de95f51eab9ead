use serde::{Deserialize, Serialize};
use widget_state::Debounce;

use super::*;
use crate::primitives::now_ms;

const DROPDOWN_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("dropdown-bg-light", "dropdown-text-light", "dropdown-border-light")),
    ("dark", tokens("dropdown-bg-dark", "dropdown-text-dark", "dropdown-border-dark")),
]);

const DEFAULT_FILTER_DEBOUNCE_MS: u64 = 250;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One selectable option.
pub struct DropdownOption {
    /// Stable identity.
    pub key: String,
    /// Visible text.
    pub label: String,
    /// Skipped by clicks and keyboard navigation.
    #[serde(default)]
    pub disabled: bool,
}

impl DropdownOption {
    /// Enabled option.
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

/// Indices of options whose label contains `query`, ignoring case and surrounding whitespace.
/// A blank query matches everything.
pub fn filter_options(options: &[DropdownOption], query: &str) -> Vec<usize> {
    let query = query.trim().to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| query.is_empty() || option.label.to_lowercase().contains(&query))
        .map(|(index, _)| index)
        .collect()
}

#[component]
/// Select control with an overlay option list. Single mode behaves like a native select: one
/// option is always chosen and re-choosing it keeps it. With `multiple`, options toggle
/// independently and the list stays open. With `filterable`, typing narrows the list after a
/// debounce; hidden options are skipped by keyboard navigation.
pub fn Dropdown(
    #[prop(optional)] layout_class: Option<&'static str>,
    options: Vec<DropdownOption>,
    #[prop(optional)] multiple: bool,
    #[prop(optional)] default_selected: Vec<usize>,
    /// Host-controlled selection.
    #[prop(optional, into)]
    selected: Option<MaybeSignal<Vec<usize>>>,
    #[prop(optional)] on_change: Option<Callback<Vec<usize>>>,
    #[prop(optional)] filterable: bool,
    #[prop(default = DEFAULT_FILTER_DEBOUNCE_MS)] filter_debounce_ms: u64,
    #[prop(optional, into)] placeholder: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
) -> impl IntoView {
    let open = create_rw_signal(false);
    let surface = use_overlay_surface(
        open.into(),
        OverlayConfig::default().with_durations(120, 120),
        OverlayCallbacks {
            on_close: Some(Callback::new(move |_| open.set(false))),
            ..OverlayCallbacks::default()
        },
    );
    let phase = surface.phase();
    let mode = if multiple {
        SelectionMode::Multiple
    } else {
        SelectionMode::Single { allow_empty: false }
    };
    let group = use_toggle_group(
        MaybeSignal::Static(
            options
                .iter()
                .map(|option| ToggleItem::new(option.key.clone()).with_disabled(option.disabled))
                .collect(),
        ),
        mode,
        default_selected,
        selected,
        ToggleCallbacks {
            on_change,
            ..ToggleCallbacks::default()
        },
    );
    let options = store_value(options);
    let theme_class = use_widget_class(theme, DROPDOWN_PALETTE);
    let id_prefix = next_instance_id("dropdown");

    let query = create_rw_signal(String::new());
    let debounce = store_value(Debounce::<String>::new(filter_debounce_ms));
    let filter_timer = TimerSlot::new();
    let on_filter_input = move |ev: leptos::ev::Event| {
        let now = now_ms();
        debounce.update_value(|debounce| debounce.push(event_target_value(&ev), now));
        let deadline = debounce.with_value(Debounce::next_deadline);
        filter_timer.arm_at(deadline, now, move || {
            if let Some(value) = debounce.try_update_value(Debounce::flush).flatten() {
                query.set(value);
            }
        });
    };
    let visible = create_memo(move |_| {
        query.with(|query| options.with_value(|options| filter_options(options, query)))
    });

    create_effect(move |_| {
        let visible = visible.get();
        untrack(move || {
            let mut next = group.group.get_untracked();
            let mut changed = false;
            options.with_value(|options| {
                for (index, option) in options.iter().enumerate() {
                    let hidden = !visible.contains(&index);
                    changed |= next.set_disabled(index, option.disabled || hidden);
                }
            });
            if changed {
                group.group.set(next);
            }
        });
    });

    let summary = move || {
        let labels: Vec<String> = group.group.with(|group| {
            options.with_value(|options| {
                group
                    .active_indices()
                    .into_iter()
                    .filter_map(|index| options.get(index).map(|option| option.label.clone()))
                    .collect()
            })
        });
        if labels.is_empty() {
            placeholder.clone().unwrap_or_default()
        } else {
            labels.join(", ")
        }
    };

    let choose = move |index: usize| {
        group.toggle(index);
        if !multiple {
            open.set(false);
        }
    };

    let on_list_keydown = {
        let id_prefix = id_prefix.clone();
        move |ev: KeyboardEvent| match group.handle_keydown(&ev) {
            ToggleKeyOutcome::FocusMoved(index) => focus_item(&id_prefix, index),
            ToggleKeyOutcome::Toggled(_) if !multiple => open.set(false),
            ToggleKeyOutcome::Dismiss => surface.send(OverlayInput::Escape),
            ToggleKeyOutcome::Toggled(_) | ToggleKeyOutcome::Ignored => {}
        }
    };

    let list_id = format!("{id_prefix}-list");
    let option_prefix = store_value(id_prefix);
    let surface_node_ref = surface.node_ref;
    view! {
        <div
            node_ref=surface_node_ref
            class=move || format!("{} {}", merge_layout_class("ui-dropdown", layout_class), theme_class.get())
            data-ui-primitive="true"
            data-ui-kind="dropdown"
            data-ui-multiple=bool_token(multiple)
            data-ui-phase=move || phase.get().token()
        >
            <button
                type="button"
                data-ui-slot="trigger"
                aria-haspopup="listbox"
                aria-expanded=move || bool_token(open.get())
                aria-controls=list_id.clone()
                on:click=move |_| open.update(|open| *open = !*open)
            >
                {summary}
            </button>
            <Show when=move || phase.get().is_rendered() fallback=|| ()>
                <div data-ui-slot="popover">
                    {filterable.then(|| view! {
                        <input
                            type="search"
                            data-ui-slot="filter"
                            aria-label="Filter options"
                            on:input=on_filter_input
                        />
                    })}
                    <div
                        id=list_id.clone()
                        role="listbox"
                        aria-multiselectable=bool_token(multiple)
                        data-ui-slot="options"
                        on:keydown=on_list_keydown.clone()
                    >
                        <For each=move || visible.get() key=|index| *index let:index>
                            {
                                let option = options.with_value(|options| options.get(index).cloned());
                                option.map(|option| {
                                    view! {
                                        <div
                                            role="option"
                                            id=option_prefix.with_value(|prefix| format!("{prefix}-{index}"))
                                            aria-selected=move || bool_token(group.is_active(index))
                                            aria-disabled=bool_token(option.disabled)
                                            tabindex=move || if group.tab_stop() == Some(index) { 0 } else { -1 }
                                            data-ui-slot="option"
                                            on:click=move |_| {
                                                if !option.disabled {
                                                    choose(index);
                                                }
                                            }
                                        >
                                            {option.label.clone()}
                                        </div>
                                    }
                                })
                            }
                        </For>
                    </div>
                </div>
            </Show>
        </div>
    }
}
