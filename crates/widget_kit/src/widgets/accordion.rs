use super::*;

const ACCORDION_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("accordion-bg-light", "accordion-text-light", "accordion-border-light")),
    ("dark", tokens("accordion-bg-dark", "accordion-text-dark", "accordion-border-dark")),
]);

#[derive(Clone)]
/// One collapsible section.
pub struct AccordionSection {
    /// Stable identity; selection follows the key across item updates.
    pub key: String,
    /// Header text.
    pub title: String,
    /// Skipped by clicks and keyboard navigation.
    pub disabled: bool,
    /// Panel body, rendered while active.
    pub content: ViewFn,
}

impl AccordionSection {
    /// Enabled section.
    pub fn new(key: impl Into<String>, title: impl Into<String>, content: impl Into<ViewFn>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
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
/// Stack of collapsible sections. One section is open at a time unless `multi_open`; re-toggling
/// the open section collapses it. Disabled sections ignore clicks and keys.
pub fn Accordion(
    #[prop(optional)] layout_class: Option<&'static str>,
    sections: Vec<AccordionSection>,
    #[prop(optional)] multi_open: bool,
    /// Sections open at mount.
    #[prop(optional)]
    default_open: Vec<usize>,
    /// Host-controlled open sections.
    #[prop(optional, into)]
    active_indices: Option<MaybeSignal<Vec<usize>>>,
    #[prop(optional)] on_change: Option<Callback<Vec<usize>>>,
    #[prop(optional)] on_item_open: Option<Callback<usize>>,
    #[prop(optional)] on_item_close: Option<Callback<usize>>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
) -> impl IntoView {
    let mode = if multi_open {
        SelectionMode::Multiple
    } else {
        SelectionMode::ACCORDION
    };
    let items: Vec<ToggleItem> = sections
        .iter()
        .map(|section| ToggleItem::new(section.key.clone()).with_disabled(section.disabled))
        .collect();
    let group = use_toggle_group(
        MaybeSignal::Static(items),
        mode,
        default_open,
        active_indices,
        ToggleCallbacks {
            on_change,
            on_item_open,
            on_item_close,
        },
    );
    let theme_class = use_widget_class(theme, ACCORDION_PALETTE);
    let id_prefix = next_instance_id("accordion");

    let rendered = sections
        .into_iter()
        .enumerate()
        .map(|(index, section)| {
            let header_id = format!("{id_prefix}-{index}");
            let panel_id = format!("{id_prefix}-panel-{index}");
            let prefix = id_prefix.clone();
            let expanded = move || group.is_active(index);
            let content = section.content;
            let on_keydown = move |ev: KeyboardEvent| {
                if let ToggleKeyOutcome::FocusMoved(next) = group.handle_keydown(&ev) {
                    focus_item(&prefix, next);
                }
            };

            view! {
                <section
                    data-ui-slot="section"
                    data-ui-state=move || if expanded() { "open" } else { "closed" }
                    data-ui-disabled=bool_token(section.disabled)
                >
                    <button
                        type="button"
                        id=header_id.clone()
                        data-ui-slot="header"
                        aria-expanded=move || bool_token(expanded())
                        aria-controls=panel_id.clone()
                        disabled=section.disabled
                        tabindex=move || if group.tab_stop() == Some(index) { 0 } else { -1 }
                        on:click=move |_| group.toggle(index)
                        on:keydown=on_keydown
                    >
                        {section.title}
                    </button>
                    <Show when=expanded fallback=|| ()>
                        <div
                            id=panel_id.clone()
                            role="region"
                            aria-labelledby=header_id.clone()
                            data-ui-slot="panel"
                        >
                            {content.run()}
                        </div>
                    </Show>
                </section>
            }
        })
        .collect_view();

    view! {
        <div
            class=move || format!("{} {}", merge_layout_class("ui-accordion", layout_class), theme_class.get())
            data-ui-primitive="true"
            data-ui-kind="accordion"
            data-ui-mode=if multi_open { "multiple" } else { "single" }
        >
            {rendered}
        </div>
    }
}
