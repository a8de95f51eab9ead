//! Leptos widget kit built on the headless `widget_state` machines.
//!
//! [`ThemeProvider`] owns the shared theme registry; every widget resolves its own palette
//! against it (explicit `theme` prop first). Overlay widgets (modal, drawer, toast, confirm
//! dialog, menu, dropdown) share one lifecycle hook, [`use_overlay_surface`], which keeps the
//! phase machine, its single timer, and the window dismissal listeners in sync. Compound widgets
//! (accordion, tabs, menu, dropdown) share [`use_toggle_group`].
//!
//! The crate never swallows a state transition silently: rejected actions and failed preference
//! writes are reported through `leptos::logging`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod geometry;
pub mod overlay;
mod primitives;
pub mod theme_context;
pub mod timer;
pub mod toggle;
pub mod widgets;

pub use geometry::{use_surface_geometry, GeometryHandle};
pub use overlay::{
    overlay_config, use_overlay_machine, use_overlay_surface, OverlayCallbacks, OverlayHandle,
    DEFAULT_AUTO_CLOSE_MS,
};
pub use theme_context::{
    reduce_theme, try_use_theme_registry, use_resolved_theme, use_theme_registry,
    use_widget_tokens, ThemeAction, ThemeContext, ThemeProvider,
};
pub use timer::TimerSlot;
pub use toggle::{
    rebuild_group, toggle_group_from, use_toggle_group, ToggleCallbacks, ToggleGroupHandle,
};
pub use widgets::{
    filter_options, use_toasts, Accordion, AccordionSection, ConfirmDialog, Drawer, Dropdown,
    DropdownOption, Menu, MenuEntry, Modal, Offcanvas, Pagination, TabPanel, Tabs, ThemeSwitcher,
    Toast, ToastContext, ToastViewport,
};

/// Convenience imports for applications mounting the widget set.
pub mod prelude {
    pub use crate::{
        use_theme_registry, use_toasts, Accordion, AccordionSection, ConfirmDialog, Drawer,
        Dropdown, DropdownOption, Menu, MenuEntry, Modal, Offcanvas, Pagination, TabPanel, Tabs,
        ThemeAction, ThemeContext, ThemeProvider, ThemeSwitcher, Toast, ToastContext,
        ToastViewport,
    };
    pub use widget_state::{
        CloseReason, ConfirmOutcome, DockEdge, OverlayConfig, StyleDescriptor,
        ThemeRegistryConfig, ToastTone,
    };
}
