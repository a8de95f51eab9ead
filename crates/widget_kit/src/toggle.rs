//! Reactive driver for compound toggle groups (accordion, tabs, menus, multi-select).
#![allow(clippy::clone_on_copy)]

use leptos::ev::KeyboardEvent;
use leptos::*;
use widget_state::{
    KeyIntent, ReorderFn, SelectionMode, ToggleEffect, ToggleGroup, ToggleItem, ToggleKeyOutcome,
};

#[derive(Clone, Copy, Default)]
/// Host callbacks of a toggle-group widget.
pub struct ToggleCallbacks {
    /// Fired with the new active indices after every effective change.
    pub on_change: Option<Callback<Vec<usize>>>,
    /// Fired per item that became active.
    pub on_item_open: Option<Callback<usize>>,
    /// Fired per item that became inactive.
    pub on_item_close: Option<Callback<usize>>,
}

impl ToggleCallbacks {
    /// Routes one effect to the matching callback.
    pub fn dispatch(&self, effect: ToggleEffect) {
        match effect {
            ToggleEffect::ItemClosed(index) => {
                if let Some(on_item_close) = self.on_item_close.as_ref() {
                    on_item_close.call(index);
                }
            }
            ToggleEffect::ItemOpened(index) => {
                if let Some(on_item_open) = self.on_item_open.as_ref() {
                    on_item_open.call(index);
                }
            }
            ToggleEffect::Changed(indices) => {
                if let Some(on_change) = self.on_change.as_ref() {
                    on_change.call(indices);
                }
            }
        }
    }
}

/// Builds a group, falling back to position keys when item keys collide.
pub fn toggle_group_from(items: Vec<ToggleItem>, mode: SelectionMode) -> ToggleGroup {
    match ToggleGroup::new(items.clone(), mode) {
        Ok(group) => group,
        Err(err) => {
            logging::warn!("toggle group keys rejected, keying by position: {err}");
            let mut group = ToggleGroup::indexed(items.len(), mode);
            for (index, item) in items.iter().enumerate() {
                group.set_disabled(index, item.disabled);
            }
            group
        }
    }
}

/// Rebuilds `previous` for a new item list. Active items and focus follow their keys.
pub fn rebuild_group(previous: &ToggleGroup, items: Vec<ToggleItem>) -> ToggleGroup {
    let active_keys: Vec<String> = previous
        .active_indices()
        .into_iter()
        .filter_map(|index| previous.items().get(index).map(|item| item.key.clone()))
        .collect();
    let focused_key = previous
        .focused()
        .and_then(|index| previous.items().get(index).map(|item| item.key.clone()));

    let mut group = toggle_group_from(items, previous.mode());
    let indices: Vec<usize> = active_keys
        .iter()
        .filter_map(|key| group.position(key))
        .collect();
    if !indices.is_empty() {
        group.set_active(indices);
    }
    if let Some(index) = focused_key.and_then(|key| group.position(&key)) {
        group.set_focus(index);
    }
    group
}

#[derive(Clone, Copy)]
/// Reactive handle to a driven toggle group.
pub struct ToggleGroupHandle {
    /// Group snapshot.
    pub group: RwSignal<ToggleGroup>,
    callbacks: ToggleCallbacks,
}

impl ToggleGroupHandle {
    /// Reactive active flag for `index`.
    pub fn is_active(&self, index: usize) -> bool {
        self.group.with(|group| group.is_active(index))
    }

    /// Reactive roving-focus index.
    pub fn focused(&self) -> Option<usize> {
        self.group.with(ToggleGroup::focused)
    }

    /// Reactive index of the single `tabindex=0` item.
    pub fn tab_stop(&self) -> Option<usize> {
        self.group.with(ToggleGroup::tab_stop)
    }

    /// Toggles `index` as a click would.
    pub fn toggle(&self, index: usize) {
        self.update(|group| {
            group.set_focus(index);
            group.toggle(index)
        });
    }

    /// Replaces the active set.
    pub fn set_active(&self, indices: Vec<usize>) {
        self.update(|group| group.set_active(indices));
    }

    /// Moves roving focus without toggling.
    pub fn set_focus(&self, index: usize) {
        self.update(|group| {
            group.set_focus(index);
            Vec::new()
        });
    }

    /// Moves an item through `reorder`; selection follows the item.
    pub fn move_item(&self, from: usize, to: usize, reorder: ReorderFn<ToggleItem>) {
        self.update(|group| group.move_item(from, to, reorder));
    }

    /// Routes a keydown through the shared keyboard contract. Handled keys have their default
    /// action prevented.
    pub fn handle_keydown(&self, ev: &KeyboardEvent) -> ToggleKeyOutcome {
        let intent = KeyIntent::from_key(&ev.key());
        if intent.is_handled() {
            ev.prevent_default();
        }

        let mut next = self.group.get_untracked();
        let previous = next.clone();
        let outcome = next.handle_key(intent);
        if next != previous {
            self.group.set(next);
        }
        if let ToggleKeyOutcome::Toggled(effects) = &outcome {
            for effect in effects.iter().cloned() {
                self.callbacks.dispatch(effect);
            }
        }
        outcome
    }

    fn update(&self, apply: impl FnOnce(&mut ToggleGroup) -> Vec<ToggleEffect>) {
        let mut next = self.group.get_untracked();
        let previous = next.clone();
        let effects = apply(&mut next);
        if next != previous {
            self.group.set(next);
        }
        for effect in effects {
            self.callbacks.dispatch(effect);
        }
    }
}

/// Drives a [`ToggleGroup`] from reactive items. When `active_indices` is given the host
/// controls the selection: its value is applied as an external override without echoing
/// callbacks back.
pub fn use_toggle_group(
    items: MaybeSignal<Vec<ToggleItem>>,
    mode: SelectionMode,
    default_active: Vec<usize>,
    active_indices: Option<MaybeSignal<Vec<usize>>>,
    callbacks: ToggleCallbacks,
) -> ToggleGroupHandle {
    let initial = toggle_group_from(items.get_untracked(), mode).with_active(default_active);
    let handle = ToggleGroupHandle {
        group: create_rw_signal(initial),
        callbacks,
    };

    create_effect(move |previous_run: Option<()>| {
        let items = items.get();
        if previous_run.is_some() {
            untrack(move || {
                let next = handle.group.with(|group| rebuild_group(group, items));
                handle.group.set(next);
            });
        }
    });

    if let Some(active_indices) = active_indices {
        create_effect(move |_| {
            let indices = active_indices.get();
            untrack(move || {
                let mut next = handle.group.get_untracked();
                next.set_active(indices);
                if handle.group.with(|group| *group != next) {
                    handle.group.set(next);
                }
            });
        });
    }

    handle
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn items(keys: &[&str]) -> Vec<ToggleItem> {
        keys.iter().map(|key| ToggleItem::new(*key)).collect()
    }

    #[test]
    fn duplicate_keys_fall_back_to_position_keys() {
        let group = toggle_group_from(
            vec![
                ToggleItem::new("a"),
                ToggleItem::new("a").with_disabled(true),
            ],
            SelectionMode::Multiple,
        );
        assert_eq!(group.len(), 2);
        assert_eq!(group.position("1"), Some(1));
        assert!(group.items()[1].disabled);
    }

    #[test]
    fn rebuild_keeps_selection_with_its_key() {
        let mut group =
            toggle_group_from(items(&["a", "b", "c"]), SelectionMode::Multiple).with_active([1, 2]);
        group.set_focus(2);

        let rebuilt = rebuild_group(&group, items(&["c", "x", "b"]));
        assert_eq!(rebuilt.active_indices(), vec![0, 2]);
        assert_eq!(rebuilt.focused(), Some(0));
    }

    #[test]
    fn rebuild_repairs_tabs_when_the_active_tab_disappears() {
        let group = toggle_group_from(items(&["a", "b"]), SelectionMode::TABS).with_active([1]);
        let rebuilt = rebuild_group(&group, items(&["a", "c"]));
        assert_eq!(rebuilt.active_indices(), vec![0]);
    }
}
