//! DOM and token helpers shared by every widget.

use std::sync::atomic::{AtomicUsize, Ordering};

use wasm_bindgen::JsCast;
use widget_state::{PointerPosition, SurfaceRect};

static NEXT_INSTANCE_ID: AtomicUsize = AtomicUsize::new(1);

pub(crate) fn merge_layout_class(base: &'static str, layout_class: Option<&'static str>) -> String {
    match layout_class {
        Some(layout_class) if !layout_class.is_empty() => format!("{base} {layout_class}"),
        _ => base.to_string(),
    }
}

pub(crate) fn bool_token(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Document-unique id prefix for one widget instance, e.g. `ui-tabs-7`.
pub(crate) fn next_instance_id(kind: &str) -> String {
    let id = NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed);
    format!("ui-{kind}-{id}")
}

/// Current wall-clock time fed to the state machines.
pub(crate) fn now_ms() -> u64 {
    widget_host::unix_time_ms_now()
}

pub(crate) fn focus_element_by_id(id: &str) -> bool {
    let Some(element) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
        .and_then(|element| element.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return false;
    };
    element.focus().is_ok()
}

/// Browser viewport as a rect, or a fixed fallback off-browser.
pub(crate) fn viewport_rect() -> SurfaceRect {
    let dimension = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|value| value.as_f64()).map(|value| value as i32)
    };
    web_sys::window()
        .and_then(|window| {
            Some(SurfaceRect::new(
                0,
                0,
                dimension(window.inner_width())?,
                dimension(window.inner_height())?,
            ))
        })
        .unwrap_or(SurfaceRect::new(0, 0, 1280, 800))
}

pub(crate) fn pointer_from_pointer_event(ev: &web_sys::PointerEvent) -> PointerPosition {
    PointerPosition {
        x: ev.client_x(),
        y: ev.client_y(),
    }
}

/// Returns whether `target` lies inside `container`.
pub(crate) fn event_target_within(
    container: &web_sys::Node,
    target: Option<web_sys::EventTarget>,
) -> bool {
    target
        .and_then(|target| target.dyn_into::<web_sys::Node>().ok())
        .is_some_and(|node| container.contains(Some(&node)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_class_is_appended_when_present() {
        assert_eq!(merge_layout_class("ui-modal", None), "ui-modal");
        assert_eq!(merge_layout_class("ui-modal", Some("")), "ui-modal");
        assert_eq!(merge_layout_class("ui-modal", Some("wide")), "ui-modal wide");
    }

    #[test]
    fn instance_ids_are_unique() {
        let first = next_instance_id("tabs");
        let second = next_instance_id("tabs");
        assert_ne!(first, second);
        assert!(first.starts_with("ui-tabs-"));
    }
}
