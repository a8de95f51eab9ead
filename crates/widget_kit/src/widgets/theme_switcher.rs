use crate::theme_context::use_theme_registry;

use super::*;

#[component]
/// Buttons for every registered theme plus next/reset controls. Hovering a theme button shows its
/// descriptor as a preview on the switcher itself without touching the shared registry.
pub fn ThemeSwitcher(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    /// Show the reset button.
    #[prop(default = true)]
    show_reset: bool,
) -> impl IntoView {
    let themes = use_theme_registry();
    let previewing = create_rw_signal(None::<String>);
    let preview_class = move || {
        let descriptor = previewing.with(|name| match name {
            Some(name) => themes.preview_theme(name),
            None => themes.active_theme(),
        });
        descriptor
            .class_list()
            .split_whitespace()
            .map(|token| themes.resolve_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    };

    view! {
        <div
            class=move || format!("{} {}", merge_layout_class("ui-theme-switcher", layout_class), preview_class())
            role="group"
            aria-label=aria_label.unwrap_or_else(|| "Theme".to_string())
            data-ui-primitive="true"
            data-ui-kind="theme-switcher"
            data-ui-theme=move || themes.active_theme_name()
            data-ui-previewing=move || previewing.with(|name| name.clone())
            on:pointerleave=move |_| previewing.set(None)
        >
            <For each=move || themes.available_theme_names() key=|name| name.clone() let:name>
                {
                    let pressed = {
                        let name = name.clone();
                        move || themes.active_theme_name() == name
                    };
                    let hover_name = name.clone();
                    let select_name = name.clone();
                    view! {
                        <button
                            type="button"
                            data-ui-slot="theme-option"
                            aria-pressed=move || bool_token(pressed())
                            on:pointerenter=move |_| previewing.set(Some(hover_name.clone()))
                            on:click=move |_| {
                                previewing.set(None);
                                themes.set_theme(select_name.clone());
                            }
                        >
                            {name}
                        </button>
                    }
                }
            </For>
            <button
                type="button"
                data-ui-slot="next-theme"
                on:click=move |_| themes.toggle_theme()
            >
                "Next theme"
            </button>
            {show_reset.then(|| view! {
                <button
                    type="button"
                    data-ui-slot="reset-theme"
                    on:click=move |_| themes.reset_theme()
                >
                    "Reset"
                </button>
            })}
        </div>
    }
}
