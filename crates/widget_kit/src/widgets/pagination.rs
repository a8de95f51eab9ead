use widget_state::Pagination as PageCursor;

use super::*;

const PAGINATION_PALETTE: WidgetPalette = WidgetPalette::new(&[
    ("light", tokens("pager-bg-light", "pager-text-light", "pager-border-light")),
    ("dark", tokens("pager-bg-dark", "pager-text-dark", "pager-border-dark")),
]);

const DEFAULT_MAX_BUTTONS: usize = 7;

/// Human-facing page label; pages are zero-based internally.
fn page_label(page: usize) -> String {
    (page + 1).to_string()
}

#[component]
/// Page navigator with first/previous/numbered/next/last buttons. `on_page_change` receives the
/// zero-based page and fires only when the page actually changes, including when a shrinking
/// item count pulls the cursor back.
pub fn Pagination(
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(into)] total_items: MaybeSignal<usize>,
    #[prop(default = MaybeSignal::Static(10), into)] page_size: MaybeSignal<usize>,
    /// Host-controlled page.
    #[prop(optional, into)]
    page: Option<MaybeSignal<usize>>,
    #[prop(default = DEFAULT_MAX_BUTTONS)] max_buttons: usize,
    #[prop(optional)] on_page_change: Option<Callback<usize>>,
    #[prop(optional, into)] aria_label: Option<String>,
    #[prop(optional, into)] theme: MaybeSignal<Option<String>>,
) -> impl IntoView {
    let cursor = create_rw_signal(PageCursor::new(
        total_items.get_untracked(),
        page_size.get_untracked(),
    ));
    let theme_class = use_widget_class(theme, PAGINATION_PALETTE);

    let update = move |notify: bool, apply: &dyn Fn(&mut PageCursor) -> bool| {
        let mut next = cursor.get_untracked();
        if !apply(&mut next) {
            return;
        }
        let page = next.page();
        cursor.set(next);
        if notify {
            if let Some(on_page_change) = on_page_change.as_ref() {
                on_page_change.call(page);
            }
        }
    };

    create_effect(move |previous: Option<(usize, usize)>| {
        let shape = (total_items.get(), page_size.get());
        if previous.is_some_and(|previous| previous != shape) {
            untrack(|| {
                update(true, &|cursor| {
                    let resized = cursor.set_page_size(shape.1);
                    cursor.set_total_items(shape.0) | resized
                })
            });
        }
        shape
    });

    if let Some(page) = page {
        create_effect(move |_| {
            let target = page.get();
            untrack(|| update(false, &|cursor| cursor.go_to(target)));
        });
    }

    let page_count = move || cursor.with(PageCursor::page_count);
    let numbered = move || cursor.with(|cursor| cursor.page_window(max_buttons));
    let nav_button = move |slot: &'static str,
                           label: &'static str,
                           blocked: fn(&PageCursor) -> bool,
                           step: fn(&mut PageCursor) -> bool| {
        view! {
            <button
                type="button"
                data-ui-slot=slot
                aria-label=label
                disabled=move || cursor.with(blocked)
                on:click=move |_| update(true, &|cursor| step(cursor))
            >
                {label}
            </button>
        }
    };

    view! {
        <nav
            class=move || format!("{} {}", merge_layout_class("ui-pagination", layout_class), theme_class.get())
            aria-label=aria_label.unwrap_or_else(|| "Pagination".to_string())
            data-ui-primitive="true"
            data-ui-kind="pagination"
            data-ui-page-count=page_count
        >
            {nav_button("first", "First", PageCursor::is_first, PageCursor::first)}
            {nav_button("prev", "Previous", PageCursor::is_first, PageCursor::prev)}
            <For each=numbered key=|page| *page let:page>
                <button
                    type="button"
                    data-ui-slot="page"
                    aria-current=move || cursor.with(|cursor| cursor.page() == page).then_some("page")
                    on:click=move |_| update(true, &|cursor| cursor.go_to(page))
                >
                    {page_label(page)}
                </button>
            </For>
            {nav_button("next", "Next", PageCursor::is_last, PageCursor::next)}
            {nav_button("last", "Last", PageCursor::is_last, PageCursor::last)}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn labels_are_one_based() {
        assert_eq!(page_label(0), "1");
        assert_eq!(page_label(9), "10");
    }

    #[test]
    fn button_window_tracks_cursor() {
        let mut cursor = PageCursor::new(200, 10);
        assert_eq!(cursor.page_window(DEFAULT_MAX_BUTTONS), vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(cursor.go_to(10));
        assert_eq!(cursor.page_window(DEFAULT_MAX_BUTTONS), vec![7, 8, 9, 10, 11, 12, 13]);
        assert!(cursor.last());
        assert_eq!(cursor.page_window(DEFAULT_MAX_BUTTONS), vec![13, 14, 15, 16, 17, 18, 19]);
    }
}
