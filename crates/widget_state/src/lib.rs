//! Headless widget state: the theme registry and the per-widget state machines (overlay
//! lifecycle, compound toggle groups, pagination, toast stack) that the reactive layer drives.
//!
//! Nothing in this crate reads a clock, touches the DOM, or logs. Time-dependent operations take
//! `now_ms`, and side effects come back as effect values for the caller to execute.

pub mod confirm;
pub mod consumer;
pub mod geometry;
pub mod keyboard;
pub mod overlay;
pub mod pagination;
pub mod persistence;
pub mod reorder;
pub mod theme;
pub mod timer;
pub mod toast_queue;
pub mod toggle_group;

pub use confirm::{ConfirmDialogState, ConfirmEvent, ConfirmOutcome};
pub use consumer::{
    resolve_theme, resolve_theme_name, ClassPrefixResolver, ResolvedTheme, StyleResolver,
    ThemeSource, WidgetPalette, WidgetTokens,
};
pub use geometry::{
    resize_rect, DockEdge, PointerPosition, ResizeEdge, SurfaceGeometry, SurfaceRect,
};
pub use keyboard::KeyIntent;
pub use overlay::{
    CloseReason, OverlayConfig, OverlayEffect, OverlayInput, OverlayMachine, OverlayPhase,
    OverlaySurface,
};
pub use pagination::Pagination;
pub use persistence::{
    clear_persisted_theme, load_persisted_theme, persist_theme, run_theme_effect,
};
pub use reorder::{move_item, DragReorder, ReorderFn};
pub use theme::{
    StyleDescriptor, ThemeEffect, ThemeError, ThemeRegistry, ThemeRegistryConfig,
    DEFAULT_THEME_STORAGE_KEY,
};
pub use timer::{Countdown, Debounce};
pub use toast_queue::{ToastEntry, ToastEvent, ToastId, ToastQueue, ToastTone};
pub use toggle_group::{
    SelectionMode, ToggleEffect, ToggleGroup, ToggleGroupError, ToggleItem, ToggleKeyOutcome,
};
