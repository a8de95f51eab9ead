//! Pointer-driven drag, resize, and dock for overlay surfaces.
#![allow(clippy::clone_on_copy)]

use leptos::ev::PointerEvent;
use leptos::*;
use leptos::leptos_dom::helpers::WindowListenerHandle;
use widget_state::{DockEdge, OverlayPhase, ResizeEdge, SurfaceGeometry, SurfaceRect};

use crate::primitives::{pointer_from_pointer_event, viewport_rect};

#[derive(Clone, Copy)]
/// Reactive geometry of one surface, gated on its overlay phase.
pub struct GeometryHandle {
    /// Geometry snapshot.
    pub geometry: RwSignal<SurfaceGeometry>,
    phase: Signal<OverlayPhase>,
    snap_to_edges: bool,
}

impl GeometryHandle {
    /// Inline `style` for the surface element.
    pub fn style(&self) -> Signal<String> {
        let geometry = self.geometry;
        Signal::derive(move || geometry.with(|geometry| geometry.rect().style()))
    }

    /// Dock edge token, or `"floating"`.
    pub fn dock_token(&self) -> Signal<&'static str> {
        let geometry = self.geometry;
        Signal::derive(move || {
            geometry.with(|geometry| geometry.docked().map_or("floating", DockEdge::token))
        })
    }

    /// Starts a move from a pointer-down on the drag handle.
    pub fn begin_drag(&self, ev: &PointerEvent) {
        let pointer = pointer_from_pointer_event(ev);
        let phase = self.phase.get_untracked();
        self.update(|geometry| geometry.begin_drag(pointer, phase));
    }

    /// Starts a resize from a pointer-down on an edge handle.
    pub fn begin_resize(&self, edge: ResizeEdge, ev: &PointerEvent) {
        let pointer = pointer_from_pointer_event(ev);
        let phase = self.phase.get_untracked();
        self.update(|geometry| geometry.begin_resize(edge, pointer, phase));
    }

    /// Docks to `edge` of the current viewport.
    pub fn dock(&self, edge: DockEdge) {
        let viewport = viewport_rect();
        self.update(|geometry| {
            geometry.dock(edge, viewport);
            true
        });
    }

    /// Restores the floating rect.
    pub fn undock(&self) {
        self.update(SurfaceGeometry::undock);
    }

    fn update(&self, apply: impl FnOnce(&mut SurfaceGeometry) -> bool) {
        let mut next = self.geometry.get_untracked();
        let previous = next.clone();
        apply(&mut next);
        if next != previous {
            self.geometry.set(next);
        }
    }
}

/// Tracks drag/resize for a surface. Window pointer listeners are attached only while an
/// interaction is active, and an interaction in progress is abandoned once the surface leaves
/// `Open`.
pub fn use_surface_geometry(
    initial: SurfaceRect,
    phase: Signal<OverlayPhase>,
    snap_to_edges: bool,
) -> GeometryHandle {
    let handle = GeometryHandle {
        geometry: create_rw_signal(SurfaceGeometry::new(initial)),
        phase,
        snap_to_edges,
    };

    create_effect(move |_| {
        if phase.get() != OverlayPhase::Open {
            untrack(move || handle.update(|geometry| {
                geometry.cancel_interaction();
                true
            }));
        }
    });

    let interacting = create_memo(move |_| {
        handle
            .geometry
            .with(|geometry| geometry.is_dragging() || geometry.is_resizing())
    });
    let listeners = store_value(None::<(WindowListenerHandle, WindowListenerHandle)>);
    let remove_listeners = move || {
        if let Some((pointermove, pointerup)) = listeners.try_update_value(Option::take).flatten() {
            pointermove.remove();
            pointerup.remove();
        }
    };

    create_effect(move |_| {
        if !interacting.get() {
            remove_listeners();
            return;
        }
        if listeners.with_value(Option::is_some) {
            return;
        }

        let pointermove = window_event_listener(ev::pointermove, move |ev| {
            let pointer = pointer_from_pointer_event(&ev);
            handle.update(|geometry| geometry.update_pointer(pointer));
        });
        let pointerup = window_event_listener(ev::pointerup, move |_| {
            let viewport = handle.snap_to_edges.then(viewport_rect);
            handle.update(|geometry| {
                geometry.end_interaction(viewport);
                true
            });
        });
        listeners.set_value(Some((pointermove, pointerup)));
    });

    on_cleanup(remove_listeners);
    handle
}
