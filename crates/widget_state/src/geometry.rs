//! Cosmetic position/size state for draggable, resizable and dockable surfaces.
//!
//! Geometry lives beside the overlay phase machine, not inside it: the only coupling is that an
//! interaction may start only while the surface phase is [`OverlayPhase::Open`].

use serde::{Deserialize, Serialize};

use crate::overlay::OverlayPhase;

/// Smallest width a resize can produce.
pub const MIN_SURFACE_WIDTH: i32 = 160;
/// Smallest height a resize can produce.
pub const MIN_SURFACE_HEIGHT: i32 = 120;
/// Distance from a viewport edge at which a released drag docks to that edge.
pub const DOCK_EDGE_THRESHOLD: i32 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Pixel rectangle in viewport coordinates.
pub struct SurfaceRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl SurfaceRect {
    /// Builds a rect.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn right(self) -> i32 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(self) -> i32 {
        self.y + self.h
    }

    /// Moves the rect by a delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Grows the size up to the given minimums.
    pub fn clamped_min(self, min_w: i32, min_h: i32) -> Self {
        Self {
            w: self.w.max(min_w),
            h: self.h.max(min_h),
            ..self
        }
    }

    /// Inline CSS for absolutely positioned surfaces.
    pub fn style(self) -> String {
        format!(
            "left:{}px;top:{}px;width:{}px;height:{}px;",
            self.x, self.y, self.w, self.h
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Resize handle.
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    /// Every handle, for rendering.
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Stable token for `data-ui-edge` attributes.
    pub fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    fn moves_left(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }

    fn moves_right(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    fn moves_top(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    fn moves_bottom(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Viewport edge a surface can dock to. Also the slide-in side of an offcanvas drawer.
pub enum DockEdge {
    Left,
    Right,
    Top,
    Bottom,
}

impl DockEdge {
    /// Stable token for `data-ui-side` attributes.
    pub fn token(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Rect a surface of size `size` occupies when docked to this edge of `viewport`.
    pub fn docked_rect(self, size: SurfaceRect, viewport: SurfaceRect) -> SurfaceRect {
        let w = size.w.clamp(MIN_SURFACE_WIDTH, viewport.w.max(MIN_SURFACE_WIDTH));
        let h = size.h.clamp(MIN_SURFACE_HEIGHT, viewport.h.max(MIN_SURFACE_HEIGHT));
        match self {
            Self::Left => SurfaceRect::new(viewport.x, viewport.y, w, viewport.h),
            Self::Right => SurfaceRect::new(viewport.right() - w, viewport.y, w, viewport.h),
            Self::Top => SurfaceRect::new(viewport.x, viewport.y, viewport.w, h),
            Self::Bottom => SurfaceRect::new(viewport.x, viewport.bottom() - h, viewport.w, h),
        }
    }
}

/// Applies a pointer delta to `start` for the given handle, keeping the opposite edge anchored
/// when the minimum size is hit.
pub fn resize_rect(start: SurfaceRect, edge: ResizeEdge, dx: i32, dy: i32) -> SurfaceRect {
    let mut rect = start;

    if edge.moves_right() {
        rect.w = (start.w + dx).max(MIN_SURFACE_WIDTH);
    }
    if edge.moves_left() {
        rect.w = (start.w - dx).max(MIN_SURFACE_WIDTH);
        rect.x = start.right() - rect.w;
    }
    if edge.moves_bottom() {
        rect.h = (start.h + dy).max(MIN_SURFACE_HEIGHT);
    }
    if edge.moves_top() {
        rect.h = (start.h - dy).max(MIN_SURFACE_HEIGHT);
        rect.y = start.bottom() - rect.h;
    }

    rect
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interaction {
    Drag {
        pointer_start: PointerPosition,
        rect_start: SurfaceRect,
    },
    Resize {
        edge: ResizeEdge,
        pointer_start: PointerPosition,
        rect_start: SurfaceRect,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Position, size, and dock state of one surface.
pub struct SurfaceGeometry {
    rect: SurfaceRect,
    restore_rect: Option<SurfaceRect>,
    docked: Option<DockEdge>,
    interaction: Option<Interaction>,
}

impl SurfaceGeometry {
    /// Floating geometry at `rect`, grown to the minimum size.
    pub fn new(rect: SurfaceRect) -> Self {
        Self {
            rect: rect.clamped_min(MIN_SURFACE_WIDTH, MIN_SURFACE_HEIGHT),
            restore_rect: None,
            docked: None,
            interaction: None,
        }
    }

    pub fn rect(&self) -> SurfaceRect {
        self.rect
    }

    pub fn docked(&self) -> Option<DockEdge> {
        self.docked
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Some(Interaction::Drag { .. }))
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.interaction, Some(Interaction::Resize { .. }))
    }

    /// Starts a move. Refused unless `phase` is `Open`. Dragging a docked surface undocks it at
    /// its current position with its pre-dock size.
    pub fn begin_drag(&mut self, pointer: PointerPosition, phase: OverlayPhase) -> bool {
        if phase != OverlayPhase::Open {
            return false;
        }
        if self.docked.take().is_some() {
            if let Some(restore) = self.restore_rect.take() {
                self.rect = SurfaceRect {
                    w: restore.w,
                    h: restore.h,
                    ..self.rect
                };
            }
        }
        self.interaction = Some(Interaction::Drag {
            pointer_start: pointer,
            rect_start: self.rect,
        });
        true
    }

    /// Starts a resize from `edge`. Refused unless `phase` is `Open` and the surface floats.
    pub fn begin_resize(
        &mut self,
        edge: ResizeEdge,
        pointer: PointerPosition,
        phase: OverlayPhase,
    ) -> bool {
        if phase != OverlayPhase::Open || self.docked.is_some() {
            return false;
        }
        self.interaction = Some(Interaction::Resize {
            edge,
            pointer_start: pointer,
            rect_start: self.rect,
        });
        true
    }

    /// Applies a pointer move to the active interaction. Returns whether the rect changed.
    pub fn update_pointer(&mut self, pointer: PointerPosition) -> bool {
        let next = match self.interaction {
            Some(Interaction::Drag {
                pointer_start,
                rect_start,
            }) => rect_start.offset(pointer.x - pointer_start.x, pointer.y - pointer_start.y),
            Some(Interaction::Resize {
                edge,
                pointer_start,
                rect_start,
            }) => resize_rect(
                rect_start,
                edge,
                pointer.x - pointer_start.x,
                pointer.y - pointer_start.y,
            ),
            None => return false,
        };
        let changed = next != self.rect;
        self.rect = next;
        changed
    }

    /// Ends the active interaction. A drag released within [`DOCK_EDGE_THRESHOLD`] of a viewport
    /// edge docks there when `viewport` is given. Returns the edge docked to, if any.
    pub fn end_interaction(&mut self, viewport: Option<SurfaceRect>) -> Option<DockEdge> {
        let interaction = self.interaction.take()?;
        let (Interaction::Drag { .. }, Some(viewport)) = (interaction, viewport) else {
            return None;
        };

        let edge = if self.rect.x <= viewport.x + DOCK_EDGE_THRESHOLD {
            DockEdge::Left
        } else if self.rect.right() >= viewport.right() - DOCK_EDGE_THRESHOLD {
            DockEdge::Right
        } else if self.rect.y <= viewport.y + DOCK_EDGE_THRESHOLD {
            DockEdge::Top
        } else if self.rect.bottom() >= viewport.bottom() - DOCK_EDGE_THRESHOLD {
            DockEdge::Bottom
        } else {
            return None;
        };
        self.dock(edge, viewport);
        Some(edge)
    }

    /// Abandons a drag or resize, e.g. when the surface starts closing.
    pub fn cancel_interaction(&mut self) {
        if let Some(
            Interaction::Drag { rect_start, .. } | Interaction::Resize { rect_start, .. },
        ) = self.interaction.take()
        {
            self.rect = rect_start;
        }
    }

    /// Docks to `edge`, remembering the floating rect for [`Self::undock`].
    pub fn dock(&mut self, edge: DockEdge, viewport: SurfaceRect) {
        let floating = self.restore_rect.unwrap_or(self.rect);
        self.restore_rect = Some(floating);
        self.rect = edge.docked_rect(floating, viewport);
        self.docked = Some(edge);
        self.interaction = None;
    }

    /// Returns to the floating rect saved by [`Self::dock`]. Returns whether anything changed.
    pub fn undock(&mut self) -> bool {
        if self.docked.take().is_none() {
            return false;
        }
        if let Some(restore) = self.restore_rect.take() {
            self.rect = restore;
        }
        true
    }
}
