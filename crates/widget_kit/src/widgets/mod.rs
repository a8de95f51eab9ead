//! Overlay, toggle-group, and theme widgets.
//!
//! Every widget carries its own static [`WidgetPalette`] and resolves its theme through
//! [`use_widget_class`], so a per-instance `theme` prop beats the shared registry. DOM hooks
//! follow the `data-ui-kind` / `data-ui-phase` / `data-ui-slot` attribute contract.

use leptos::ev::{DragEvent, KeyboardEvent, PointerEvent};
use leptos::*;
use widget_state::{
    CloseReason, DockEdge, KeyIntent, OverlayConfig, OverlayInput, OverlayPhase, ResizeEdge,
    SelectionMode, SurfaceRect, ToggleItem, ToggleKeyOutcome, WidgetPalette, WidgetTokens,
};

use crate::geometry::{use_surface_geometry, GeometryHandle};
use crate::overlay::{overlay_config, use_overlay_surface, OverlayCallbacks, OverlayHandle};
use crate::primitives::{bool_token, focus_element_by_id, merge_layout_class, next_instance_id};
use crate::theme_context::use_widget_class;
use crate::timer::TimerSlot;
use crate::toggle::{use_toggle_group, ToggleCallbacks};

mod accordion;
mod confirm_dialog;
mod drawer;
mod dropdown;
mod menu;
mod modal;
mod pagination;
mod tabs;
mod theme_switcher;
mod toast;

pub use accordion::{Accordion, AccordionSection};
pub use confirm_dialog::ConfirmDialog;
pub use drawer::{Drawer, Offcanvas};
pub use dropdown::{filter_options, Dropdown, DropdownOption};
pub use menu::{Menu, MenuEntry};
pub use modal::Modal;
pub use pagination::Pagination;
pub use tabs::{TabPanel, Tabs};
pub use theme_switcher::ThemeSwitcher;
pub use toast::{use_toasts, Toast, ToastContext, ToastViewport};

const fn tokens(
    background: &'static str,
    text: &'static str,
    border: &'static str,
) -> WidgetTokens {
    WidgetTokens {
        background,
        text,
        border,
    }
}

/// Focuses the element rendered for `index` of a roving-focus list.
fn focus_item(prefix: &str, index: usize) {
    focus_element_by_id(&format!("{prefix}-{index}"));
}

/// Surface pointer hover routed to the overlay machine.
fn hover_handlers<M: widget_state::OverlayMachine>(
    surface: OverlayHandle<M>,
) -> (impl Fn(PointerEvent) + Copy, impl Fn(PointerEvent) + Copy) {
    (
        move |_| surface.send(OverlayInput::PointerEnter),
        move |_| surface.send(OverlayInput::PointerLeave),
    )
}
