//! Stack of notification toasts. Each toast owns an [`OverlaySurface`]; at most `max_visible` are
//! rendered at once and the rest wait, closed, until a slot frees up.

use serde::{Deserialize, Serialize};

use crate::overlay::{CloseReason, OverlayConfig, OverlayEffect, OverlayPhase, OverlaySurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Queue-unique toast identifier.
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
/// Severity, rendered as a `data-ui-tone` token.
pub enum ToastTone {
    /// Neutral notice.
    #[default]
    Info,
    /// A finished action.
    Success,
    /// Needs attention but nothing failed.
    Warning,
    /// Something failed.
    Danger,
}

impl ToastTone {
    /// Stable token for `data-ui-tone` attributes.
    pub fn token(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One queued toast and its lifecycle surface.
pub struct ToastEntry {
    /// Queue-unique id.
    pub id: ToastId,
    /// Text shown in the toast body.
    pub message: String,
    /// Severity.
    pub tone: ToastTone,
    surface: OverlaySurface,
    shown: bool,
}

impl ToastEntry {
    /// Lifecycle phase. Waiting toasts are `Closed`.
    pub fn phase(&self) -> OverlayPhase {
        self.surface.phase()
    }

    /// The toast's own surface, for hover and countdown inspection.
    pub fn surface(&self) -> &OverlaySurface {
        &self.surface
    }

    fn is_finished(&self) -> bool {
        self.shown && self.surface.phase() == OverlayPhase::Closed
    }
}

/// A surface transition tagged with the toast it belongs to.
pub type ToastEvent = (ToastId, OverlayEffect);

#[derive(Debug, Clone, PartialEq, Eq)]
/// Ordered toast stack with a cap on how many render at once.
pub struct ToastQueue {
    max_visible: usize,
    config: OverlayConfig,
    next_id: u64,
    entries: Vec<ToastEntry>,
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_VISIBLE,
            OverlayConfig::default().with_auto_close(Self::DEFAULT_DURATION_MS),
        )
    }
}

impl ToastQueue {
    /// Visible cap used by [`Default`].
    pub const DEFAULT_MAX_VISIBLE: usize = 3;
    /// Auto-close budget used by [`Default`].
    pub const DEFAULT_DURATION_MS: u64 = 4_000;

    /// Creates an empty queue. `config` applies to every toast pushed with [`Self::push`];
    /// `auto_close_ms: None` makes toasts persistent until dismissed.
    pub fn new(max_visible: usize, config: OverlayConfig) -> Self {
        Self {
            max_visible: max_visible.max(1),
            config,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Most toasts rendered at once.
    pub fn max_visible(&self) -> usize {
        self.max_visible
    }

    /// Visible plus waiting toasts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is shown or waiting.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Toasts currently rendered, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &ToastEntry> + '_ {
        self.entries.iter().filter(|entry| entry.phase().is_rendered())
    }

    /// Toasts waiting for a free slot.
    pub fn waiting_len(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.shown).count()
    }

    /// Looks up a toast.
    pub fn get(&self, id: ToastId) -> Option<&ToastEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Queues a toast with the queue-wide config.
    pub fn push(
        &mut self,
        message: impl Into<String>,
        tone: ToastTone,
        now_ms: u64,
    ) -> (ToastId, Vec<ToastEvent>) {
        let config = self.config.clone();
        self.push_with_config(message, tone, config, now_ms)
    }

    /// Queues a toast with its own timing.
    pub fn push_with_config(
        &mut self,
        message: impl Into<String>,
        tone: ToastTone,
        config: OverlayConfig,
        now_ms: u64,
    ) -> (ToastId, Vec<ToastEvent>) {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.entries.push(ToastEntry {
            id,
            message: message.into(),
            tone,
            surface: OverlaySurface::new(config),
            shown: false,
        });

        let mut events = Vec::new();
        self.settle(now_ms, &mut events);
        (id, events)
    }

    /// Closes a toast. A toast still waiting for a slot is dropped without events.
    pub fn dismiss(&mut self, id: ToastId, now_ms: u64) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        if let Some(position) = self.entries.iter().position(|entry| entry.id == id) {
            if self.entries[position].shown {
                let effects = self.entries[position]
                    .surface
                    .request_close(CloseReason::Dismiss, now_ms);
                events.extend(effects.into_iter().map(|effect| (id, effect)));
            } else {
                self.entries.remove(position);
            }
        }
        self.settle(now_ms, &mut events);
        events
    }

    /// Pointer entered a toast; pauses its countdown when configured.
    pub fn pointer_enter(&mut self, id: ToastId, now_ms: u64) -> Vec<ToastEvent> {
        self.with_surface(id, now_ms, |surface| surface.pointer_enter(now_ms))
    }

    /// Pointer left a toast.
    pub fn pointer_leave(&mut self, id: ToastId, now_ms: u64) -> Vec<ToastEvent> {
        self.with_surface(id, now_ms, |surface| surface.pointer_leave(now_ms))
    }

    /// Advances every toast to `now_ms`, drops finished toasts and promotes waiting ones.
    pub fn tick(&mut self, now_ms: u64) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        for entry in &mut self.entries {
            let id = entry.id;
            events.extend(entry.surface.tick(now_ms).into_iter().map(|effect| (id, effect)));
        }
        self.settle(now_ms, &mut events);
        events
    }

    /// Earliest deadline across all toasts.
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter_map(|entry| entry.surface.next_deadline())
            .min()
    }

    /// Drops every toast without events.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn with_surface(
        &mut self,
        id: ToastId,
        now_ms: u64,
        apply: impl FnOnce(&mut OverlaySurface) -> Vec<OverlayEffect>,
    ) -> Vec<ToastEvent> {
        let mut events = Vec::new();
        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == id) {
            events.extend(apply(&mut entry.surface).into_iter().map(|effect| (id, effect)));
        }
        self.settle(now_ms, &mut events);
        events
    }

    fn settle(&mut self, now_ms: u64, events: &mut Vec<ToastEvent>) {
        loop {
            self.entries.retain(|entry| !entry.is_finished());

            let rendered = self.visible().count();
            if rendered >= self.max_visible {
                return;
            }
            let Some(entry) = self.entries.iter_mut().find(|entry| !entry.shown) else {
                return;
            };
            entry.shown = true;
            let id = entry.id;
            events.extend(entry.surface.open(now_ms).into_iter().map(|effect| (id, effect)));
        }
    }
}
