use widget_state::{move_item, DragReorder, ReorderFn};

use super::*;

const TABS_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("tabs-bg-light", "tabs-text-light", "tabs-border-light")),
    ("dark", tokens("tabs-bg-dark", "tabs-text-dark", "tabs-border-dark")),
]);

#[derive(Clone)]
/// One tab and its panel.
pub struct TabPanel {
    /// Stable identity; the active tab follows its key through reorders.
    pub key: String,
    /// Visible text.
    pub label: String,
    /// Skipped by clicks and keyboard navigation.
    pub disabled: bool,
    /// Panel body, rendered while active.
    pub content: ViewFn,
}

impl TabPanel {
    /// Enabled tab.
    pub fn new(key: impl Into<String>, label: impl Into<String>, content: impl Into<ViewFn>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            disabled: false,
            content: content.into(),
        }
    }

    /// Sets the disabled flag.
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[component]
/// Tab list with exactly one active panel. With `reorderable`, headers can be dragged; the list
/// reorders live on every hover over another header and the active tab travels with its header.
pub fn Tabs(
    #[prop(optional)] layout_class: Option<&'static str>,
    panels: Vec<TabPanel>,
    #[prop(optional)] default_active: Option<usize>,
    /// Host-controlled active tab.
    #[prop(optional, into)]
    active_index: Option<MaybeSignal<usize>>,
    #[prop(optional)] on_change: Option<Callback<usize>>,
    #[prop(optional)] reorderable: bool,
    /// Drag-reorder capability; defaults to remove-and-insert.
    #[prop(optional)]
    reorder: Option<ReorderFn<ToggleItem>>,
    /// Fired with the new key order after every live reorder step.
    #[prop(optional)]
    on_reorder: Option<Callback<Vec<String>>>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
) -> impl IntoView {
    let items: Vec<ToggleItem> = panels
        .iter()
        .map(|panel| ToggleItem::new(panel.key.clone()).with_disabled(panel.disabled))
        .collect();
    let on_change = on_change.map(|on_change| {
        Callback::new(move |indices: Vec<usize>| {
            if let Some(index) = indices.first() {
                on_change.call(*index);
            }
        })
    });
    let group = use_toggle_group(
        MaybeSignal::Static(items),
        SelectionMode::TABS,
        default_active.into_iter().collect(),
        active_index.map(|active_index| {
            MaybeSignal::derive(move || vec![active_index.get()])
        }),
        ToggleCallbacks {
            on_change,
            ..ToggleCallbacks::default()
        },
    );
    let reorder = reorder.unwrap_or(move_item::<ToggleItem>);
    let drag = store_value(DragReorder::default());
    let panels = store_value(panels);
    let theme_class = use_widget_class(theme, TABS_PALETTE);
    let id_prefix = next_instance_id("tabs");

    let keys = move || {
        group.group.with(|group| {
            group
                .items()
                .iter()
                .map(|item| item.key.clone())
                .collect::<Vec<_>>()
        })
    };
    let active_panel = move || {
        let key = group.group.with(|group| {
            group
                .active_indices()
                .first()
                .and_then(|index| group.items().get(*index))
                .map(|item| item.key.clone())
        })?;
        panels.with_value(|panels| {
            panels
                .iter()
                .find(|panel| panel.key == key)
                .map(|panel| panel.content.clone())
        })
    };

    let tab_prefix = id_prefix.clone();
    view! {
        <div
            class=move || format!("{} {}", merge_layout_class("ui-tabs", layout_class), theme_class.get())
            data-ui-primitive="true"
            data-ui-kind="tabs"
            data-ui-reorderable=bool_token(reorderable)
        >
            <div role="tablist" aria-label=aria_label data-ui-slot="tab-list">
                <For each=keys key=|key| key.clone() let:key>
                    {
                        let position = {
                            let key = key.clone();
                            create_memo(move |_| {
                                group.group.with(|group| group.position(&key)).unwrap_or(0)
                            })
                        };
                        let (label, disabled) = panels.with_value(|panels| {
                            panels
                                .iter()
                                .find(|panel| panel.key == key)
                                .map(|panel| (panel.label.clone(), panel.disabled))
                                .unwrap_or_default()
                        });
                        let selected = move || group.is_active(position.get());
                        let prefix = tab_prefix.clone();
                        let on_keydown = move |ev: KeyboardEvent| {
                            if let ToggleKeyOutcome::FocusMoved(next) = group.handle_keydown(&ev) {
                                group.toggle(next);
                                focus_item(&prefix, next);
                            }
                        };
                        let tab_id = {
                            let prefix = tab_prefix.clone();
                            move || format!("{prefix}-{}", position.get())
                        };

                        view! {
                            <button
                                type="button"
                                role="tab"
                                id=tab_id
                                aria-selected=move || bool_token(selected())
                                tabindex=move || if selected() { 0 } else { -1 }
                                disabled=disabled
                                draggable=move || bool_token(reorderable && !disabled)
                                data-ui-slot="tab"
                                on:click=move |_| group.toggle(position.get())
                                on:keydown=on_keydown
                                on:dragstart=move |ev: DragEvent| {
                                    if let Some(transfer) = ev.data_transfer() {
                                        transfer.set_effect_allowed("move");
                                    }
                                    drag.update_value(|drag| drag.begin(position.get()));
                                }
                                on:dragover=move |ev: DragEvent| {
                                    if drag.with_value(|drag| drag.source().is_none()) {
                                        return;
                                    }
                                    ev.prevent_default();
                                    let step = drag
                                        .try_update_value(|drag| drag.hover(position.get()))
                                        .flatten();
                                    if let Some((from, to)) = step {
                                        group.move_item(from, to, reorder);
                                        if let Some(on_reorder) = on_reorder.as_ref() {
                                            on_reorder.call(keys());
                                        }
                                    }
                                }
                                on:drop=move |ev: DragEvent| {
                                    ev.prevent_default();
                                    drag.update_value(|drag| {
                                        drag.end();
                                    });
                                }
                                on:dragend=move |_| {
                                    drag.update_value(|drag| {
                                        drag.end();
                                    });
                                }
                            >
                                {label}
                            </button>
                        }
                    }
                </For>
            </div>
            <div role="tabpanel" data-ui-slot="panel">
                {move || active_panel().map(|content| content.run())}
            </div>
        </div>
    }
}
