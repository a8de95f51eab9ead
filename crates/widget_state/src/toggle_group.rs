//! Compound toggle group: the parent-owned selection model behind accordions, tabs, menus and
//! multi-select dropdowns.
//!
//! The group holds the item list and the set of active indices; child views receive only their
//! derived `is_active` flag and an index-bound callback. Mutations return [`ToggleEffect`] lists
//! so callbacks fire once per effective change and never for a no-op.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keyboard::KeyIntent;
use crate::reorder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One toggleable entry. `key` identifies the item across reorders.
pub struct ToggleItem {
    /// Stable identity, unique within a group.
    pub key: String,
    /// Skipped by toggles and roving focus.
    #[serde(default)]
    pub disabled: bool,
}

impl ToggleItem {
    /// Enabled item.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            disabled: false,
        }
    }

    /// Sets the disabled flag.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Selection semantics, chosen explicitly by each consumer.
pub enum SelectionMode {
    /// At most one active item. With `allow_empty`, re-toggling the active item clears the
    /// selection (accordion); without it the toggle is ignored and one item stays active (tabs).
    Single { allow_empty: bool },
    /// Any subset may be active; toggling flips membership.
    Multiple,
}

impl SelectionMode {
    /// Accordion-style single selection.
    pub const ACCORDION: Self = Self::Single { allow_empty: true };
    /// Tab-style single selection that always keeps one item active.
    pub const TABS: Self = Self::Single { allow_empty: false };

    /// Returns whether an empty selection is repaired by activating an item.
    pub fn requires_selection(self) -> bool {
        matches!(self, Self::Single { allow_empty: false })
    }
}

impl Default for SelectionMode {
    fn default() -> Self {
        Self::ACCORDION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Callback intents in firing order. Closes precede opens; `Changed` comes last.
pub enum ToggleEffect {
    /// The item at this index became inactive.
    ItemClosed(usize),
    /// The item at this index became active.
    ItemOpened(usize),
    /// The active index set after the change.
    Changed(Vec<usize>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Result of routing a key through [`ToggleGroup::handle_key`].
pub enum ToggleKeyOutcome {
    /// Enter/Space toggled the focused item.
    Toggled(Vec<ToggleEffect>),
    /// Roving focus moved to this index.
    FocusMoved(usize),
    /// Escape: the owning overlay should close. Selection is untouched.
    Dismiss,
    /// The key has no meaning for the group, or there was nothing to act on.
    Ignored,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Rejected group operations.
pub enum ToggleGroupError {
    /// No item at `index`.
    #[error("item index {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Item count at the time.
        len: usize,
    },
    /// The item exists but is disabled.
    #[error("item {0} is disabled")]
    Disabled(usize),
    /// Keys must be unique within a group.
    #[error("item key `{0}` is already present")]
    DuplicateKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Items, active set and roving focus of one compound widget.
pub struct ToggleGroup {
    mode: SelectionMode,
    items: Vec<ToggleItem>,
    active: BTreeSet<usize>,
    focused: Option<usize>,
}

impl ToggleGroup {
    /// Builds a group. Tab-style groups start with their first enabled item active.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleGroupError::DuplicateKey`] when two items share a key.
    pub fn new(items: Vec<ToggleItem>, mode: SelectionMode) -> Result<Self, ToggleGroupError> {
        {
            let mut seen = HashSet::new();
            if let Some(duplicate) = items.iter().find(|item| !seen.insert(item.key.as_str())) {
                return Err(ToggleGroupError::DuplicateKey(duplicate.key.clone()));
            }
        }

        let mut group = Self {
            mode,
            items,
            active: BTreeSet::new(),
            focused: None,
        };
        group.repair_selection(0);
        Ok(group)
    }

    /// Group of `count` enabled items keyed by their position.
    pub fn indexed(count: usize, mode: SelectionMode) -> Self {
        let mut group = Self {
            mode,
            items: (0..count).map(|index| ToggleItem::new(index.to_string())).collect(),
            active: BTreeSet::new(),
            focused: None,
        };
        group.repair_selection(0);
        group
    }

    /// Applies an initial selection without reporting effects.
    pub fn with_active(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.set_active(indices);
        self
    }

    /// Selection semantics the group was built with.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Items in display order.
    pub fn items(&self) -> &[ToggleItem] {
        &self.items
    }

    /// Number of items, enabled or not.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the item at `index` is active. Out-of-range indices are never active.
    pub fn is_active(&self, index: usize) -> bool {
        self.active.contains(&index)
    }

    /// Active indices in ascending order.
    pub fn active_indices(&self) -> Vec<usize> {
        self.active.iter().copied().collect()
    }

    /// Position of the item with `key`.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| item.key == key)
    }

    /// Toggles `index`. Disabled and out-of-range indices are silent no-ops.
    pub fn toggle(&mut self, index: usize) -> Vec<ToggleEffect> {
        self.try_toggle(index).unwrap_or_default()
    }

    /// Toggles `index`, reporting why a toggle was refused.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleGroupError::IndexOutOfRange`] or [`ToggleGroupError::Disabled`].
    pub fn try_toggle(&mut self, index: usize) -> Result<Vec<ToggleEffect>, ToggleGroupError> {
        let item = self
            .items
            .get(index)
            .ok_or(ToggleGroupError::IndexOutOfRange {
                index,
                len: self.items.len(),
            })?;
        if item.disabled {
            return Err(ToggleGroupError::Disabled(index));
        }
        self.focused = Some(index);

        let next = match self.mode {
            SelectionMode::Single { allow_empty } if self.active.contains(&index) => {
                if !allow_empty {
                    return Ok(Vec::new());
                }
                BTreeSet::new()
            }
            SelectionMode::Single { .. } => BTreeSet::from([index]),
            SelectionMode::Multiple => {
                let mut next = self.active.clone();
                if !next.remove(&index) {
                    next.insert(index);
                }
                next
            }
        };
        Ok(self.replace_active(next))
    }

    /// Controlled override. Out-of-range indices are dropped; single mode keeps the first
    /// remaining index. An empty request is ignored by groups that require a selection.
    pub fn set_active(&mut self, indices: impl IntoIterator<Item = usize>) -> Vec<ToggleEffect> {
        let len = self.items.len();
        let mut requested = indices.into_iter().filter(|index| *index < len);

        let next = match self.mode {
            SelectionMode::Multiple => requested.collect(),
            SelectionMode::Single { allow_empty } => match requested.next() {
                Some(first) => BTreeSet::from([first]),
                None if allow_empty => BTreeSet::new(),
                None => return Vec::new(),
            },
        };
        self.replace_active(next)
    }

    /// Appends an item. A tab-style group with nothing selected activates it.
    ///
    /// # Errors
    ///
    /// Returns [`ToggleGroupError::DuplicateKey`] when the key is taken.
    pub fn push_item(&mut self, item: ToggleItem) -> Result<Vec<ToggleEffect>, ToggleGroupError> {
        if self.position(&item.key).is_some() {
            return Err(ToggleGroupError::DuplicateKey(item.key));
        }
        self.items.push(item);

        let mut effects = Vec::new();
        if let Some(opened) = self.repair_selection(self.items.len() - 1) {
            effects.push(ToggleEffect::ItemOpened(opened));
            effects.push(ToggleEffect::Changed(self.active_indices()));
        }
        Ok(effects)
    }

    /// Removes the item at `index`, shifting later indices down. Removing the active tab of a
    /// tab-style group activates its nearest enabled neighbour.
    pub fn remove_item(&mut self, index: usize) -> Vec<ToggleEffect> {
        if index >= self.items.len() {
            return Vec::new();
        }

        let before = self.active_indices();
        let was_active = self.active.contains(&index);
        self.items.remove(index);
        self.active = self
            .active
            .iter()
            .filter(|active| **active != index)
            .map(|active| if *active > index { active - 1 } else { *active })
            .collect();
        self.focused = match self.focused {
            Some(focused) if focused == index => None,
            Some(focused) if focused > index => Some(focused - 1),
            other => other,
        };

        let mut effects = Vec::new();
        if was_active {
            effects.push(ToggleEffect::ItemClosed(index));
        }
        if let Some(opened) = self.repair_selection(index) {
            effects.push(ToggleEffect::ItemOpened(opened));
        }
        let after = self.active_indices();
        if after != before {
            effects.push(ToggleEffect::Changed(after));
        }
        effects
    }

    /// Enables or disables an item. The selection is left as is. Returns whether the flag changed.
    pub fn set_disabled(&mut self, index: usize, disabled: bool) -> bool {
        match self.items.get_mut(index) {
            Some(item) if item.disabled != disabled => {
                item.disabled = disabled;
                true
            }
            _ => false,
        }
    }

    /// Reorders items through an injected capability and remaps the selection by key, so an
    /// active item stays active in its new slot. A capability result that is not a permutation of
    /// the current items is discarded.
    pub fn move_item<F>(&mut self, from: usize, to: usize, reorder: F) -> Vec<ToggleEffect>
    where
        F: FnOnce(&[ToggleItem], usize, usize) -> Vec<ToggleItem>,
    {
        let len = self.items.len();
        if from == to || from >= len || to >= len {
            return Vec::new();
        }

        let reordered = reorder(&self.items, from, to);
        if !self.is_permutation(&reordered) {
            return Vec::new();
        }

        let active_keys: HashSet<String> = self
            .active
            .iter()
            .map(|index| self.items[*index].key.clone())
            .collect();
        let focused_key = self.focused.map(|index| self.items[index].key.clone());
        let before = self.active_indices();

        self.items = reordered;
        self.active = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| active_keys.contains(&item.key))
            .map(|(index, _)| index)
            .collect();
        self.focused = focused_key.and_then(|key| self.position(&key));

        let after = self.active_indices();
        if after == before {
            Vec::new()
        } else {
            vec![ToggleEffect::Changed(after)]
        }
    }

    /// [`Self::move_item`] with the default [`reorder::move_item`] capability.
    pub fn reorder_item(&mut self, from: usize, to: usize) -> Vec<ToggleEffect> {
        self.move_item(from, to, reorder::move_item)
    }

    /// Index holding roving focus, if any.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// The one item that takes `tabindex=0`: the focused item, or the first enabled item before
    /// anything has been focused. `None` when every item is disabled.
    pub fn tab_stop(&self) -> Option<usize> {
        self.focused
            .filter(|index| self.items.get(*index).is_some_and(|item| !item.disabled))
            .or_else(|| self.enabled_indices().first().copied())
    }

    /// Moves roving focus to `index` if it is an enabled item.
    pub fn set_focus(&mut self, index: usize) -> bool {
        match self.items.get(index) {
            Some(item) if !item.disabled => {
                self.focused = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Drops roving focus, e.g. when the owning list closes.
    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    /// Moves focus to the next enabled item, wrapping around.
    pub fn focus_next(&mut self) -> Option<usize> {
        self.focus_relative(1)
    }

    /// Moves focus to the previous enabled item, wrapping around.
    pub fn focus_prev(&mut self) -> Option<usize> {
        self.focus_relative(-1)
    }

    /// Moves focus to the first enabled item.
    pub fn focus_first(&mut self) -> Option<usize> {
        let first = self.enabled_indices().first().copied()?;
        self.focused = Some(first);
        Some(first)
    }

    /// Moves focus to the last enabled item.
    pub fn focus_last(&mut self) -> Option<usize> {
        let last = self.enabled_indices().last().copied()?;
        self.focused = Some(last);
        Some(last)
    }

    /// Routes a key intent: Enter/Space toggles the focused item like a click, Escape asks the
    /// owner to close, arrows and Home/End move roving focus.
    pub fn handle_key(&mut self, intent: KeyIntent) -> ToggleKeyOutcome {
        let moved = match intent {
            KeyIntent::Activate => {
                return match self.focused {
                    Some(index) => ToggleKeyOutcome::Toggled(self.toggle(index)),
                    None => ToggleKeyOutcome::Ignored,
                };
            }
            KeyIntent::Dismiss => return ToggleKeyOutcome::Dismiss,
            KeyIntent::Next => self.focus_next(),
            KeyIntent::Previous => self.focus_prev(),
            KeyIntent::First => self.focus_first(),
            KeyIntent::Last => self.focus_last(),
            KeyIntent::Other => None,
        };
        moved.map_or(ToggleKeyOutcome::Ignored, ToggleKeyOutcome::FocusMoved)
    }

    fn replace_active(&mut self, next: BTreeSet<usize>) -> Vec<ToggleEffect> {
        if next == self.active {
            return Vec::new();
        }

        let mut effects: Vec<ToggleEffect> = self
            .active
            .difference(&next)
            .map(|index| ToggleEffect::ItemClosed(*index))
            .collect();
        effects.extend(
            next.difference(&self.active)
                .map(|index| ToggleEffect::ItemOpened(*index)),
        );
        self.active = next;
        effects.push(ToggleEffect::Changed(self.active_indices()));
        effects
    }

    fn repair_selection(&mut self, near: usize) -> Option<usize> {
        if !self.mode.requires_selection() || !self.active.is_empty() {
            return None;
        }
        let index = self.nearest_enabled(near)?;
        self.active.insert(index);
        Some(index)
    }

    fn nearest_enabled(&self, near: usize) -> Option<usize> {
        let len = self.items.len();
        (0..=len)
            .flat_map(|distance| [near.checked_add(distance), near.checked_sub(distance + 1)])
            .flatten()
            .filter(|index| *index < len)
            .find(|index| !self.items[*index].disabled)
    }

    fn enabled_indices(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.disabled)
            .map(|(index, _)| index)
            .collect()
    }

    fn focus_relative(&mut self, delta: i32) -> Option<usize> {
        let enabled = self.enabled_indices();
        if enabled.is_empty() {
            return None;
        }

        let current = self
            .focused
            .and_then(|focused| enabled.iter().position(|index| *index == focused));
        let next = match current {
            Some(position) => {
                enabled[(position as i32 + delta).rem_euclid(enabled.len() as i32) as usize]
            }
            None if delta < 0 => enabled[enabled.len() - 1],
            None => enabled[0],
        };
        self.focused = Some(next);
        Some(next)
    }

    fn is_permutation(&self, candidate: &[ToggleItem]) -> bool {
        if candidate.len() != self.items.len() {
            return false;
        }
        let mut current: Vec<&str> = self.items.iter().map(|item| item.key.as_str()).collect();
        let mut proposed: Vec<&str> = candidate.iter().map(|item| item.key.as_str()).collect();
        current.sort_unstable();
        proposed.sort_unstable();
        current == proposed
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn items(keys: &[&str]) -> Vec<ToggleItem> {
        keys.iter().map(|key| ToggleItem::new(*key)).collect()
    }

    fn group(mode: SelectionMode) -> ToggleGroup {
        ToggleGroup::new(items(&["a", "b", "c", "d"]), mode).expect("group")
    }

    #[test]
    fn tab_stop_skips_disabled_leading_items_until_focus_moves() {
        let mut items = items(&["a", "b", "c"]);
        items[0].disabled = true;
        let mut accordion = ToggleGroup::new(items, SelectionMode::ACCORDION).expect("group");
        assert_eq!(accordion.focused(), None);
        assert_eq!(accordion.tab_stop(), Some(1));

        accordion.set_focus(2);
        assert_eq!(accordion.tab_stop(), Some(2));

        accordion.set_disabled(2, true);
        assert_eq!(accordion.tab_stop(), Some(1));

        accordion.set_disabled(1, true);
        assert_eq!(accordion.tab_stop(), None);
    }

    #[test]
    fn accordion_click_closes_previous_then_opens_clicked() {
        let mut accordion = ToggleGroup::new(items(&["one", "two", "three"]), SelectionMode::ACCORDION)
            .expect("group")
            .with_active([0]);

        assert_eq!(
            accordion.toggle(1),
            vec![
                ToggleEffect::ItemClosed(0),
                ToggleEffect::ItemOpened(1),
                ToggleEffect::Changed(vec![1]),
            ]
        );
        assert_eq!(accordion.active_indices(), vec![1]);
    }

    #[test]
    fn single_select_round_trips() {
        for start in [vec![], vec![2]] {
            let mut accordion = group(SelectionMode::ACCORDION).with_active(start.clone());
            accordion.toggle(2);
            accordion.toggle(2);
            assert_eq!(accordion.active_indices(), start);
        }

        let mut accordion = group(SelectionMode::ACCORDION);
        accordion.toggle(0);
        accordion.toggle(3);
        assert_eq!(accordion.active_indices(), vec![3]);
    }

    #[test]
    fn tabs_ignore_retoggling_the_active_tab() {
        let mut tabs = group(SelectionMode::TABS);
        assert_eq!(tabs.active_indices(), vec![0]);
        assert!(tabs.toggle(0).is_empty());
        assert_eq!(tabs.active_indices(), vec![0]);
        assert!(tabs.set_active([]).is_empty());
        assert_eq!(tabs.active_indices(), vec![0]);
    }

    #[test]
    fn multi_select_toggle_is_its_own_inverse() {
        let mut multi = group(SelectionMode::Multiple).with_active([0, 2]);
        for index in 0..4 {
            let before = multi.active_indices();
            multi.toggle(index);
            multi.toggle(index);
            assert_eq!(multi.active_indices(), before);
        }
        assert_eq!(
            multi.toggle(1),
            vec![ToggleEffect::ItemOpened(1), ToggleEffect::Changed(vec![0, 1, 2])]
        );
    }

    #[test]
    fn disabled_and_out_of_range_toggles_fire_nothing() {
        let mut multi = ToggleGroup::new(
            vec![ToggleItem::new("a"), ToggleItem::new("b").with_disabled(true)],
            SelectionMode::Multiple,
        )
        .expect("group");

        assert!(multi.toggle(1).is_empty());
        assert!(multi.toggle(7).is_empty());
        assert!(multi.active_indices().is_empty());
        assert_eq!(multi.try_toggle(1), Err(ToggleGroupError::Disabled(1)));
        assert_eq!(
            multi.try_toggle(7),
            Err(ToggleGroupError::IndexOutOfRange { index: 7, len: 2 })
        );
    }

    #[test]
    fn set_active_filters_out_of_range_indices() {
        let mut multi = group(SelectionMode::Multiple);
        assert_eq!(
            multi.set_active([3, 9, 1]),
            vec![
                ToggleEffect::ItemOpened(1),
                ToggleEffect::ItemOpened(3),
                ToggleEffect::Changed(vec![1, 3]),
            ]
        );
        assert!(multi.set_active([1, 3]).is_empty());

        let mut single = group(SelectionMode::ACCORDION);
        single.set_active([9, 2, 1]);
        assert_eq!(single.active_indices(), vec![2]);
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        assert_eq!(
            ToggleGroup::new(items(&["a", "b", "a"]), SelectionMode::Multiple),
            Err(ToggleGroupError::DuplicateKey("a".to_string()))
        );
        let mut tabs = group(SelectionMode::TABS);
        assert_eq!(
            tabs.push_item(ToggleItem::new("b")),
            Err(ToggleGroupError::DuplicateKey("b".to_string()))
        );
    }

    #[test]
    fn selection_travels_with_moved_item() {
        let mut tabs = group(SelectionMode::TABS).with_active([1]);
        tabs.set_focus(1);
        assert_eq!(tabs.reorder_item(1, 3), vec![ToggleEffect::Changed(vec![3])]);
        assert_eq!(tabs.items()[3].key, "b");
        assert_eq!(tabs.focused(), Some(3));

        assert!(tabs.reorder_item(0, 1).is_empty(), "active index unaffected");
        assert_eq!(tabs.active_indices(), vec![3]);
    }

    #[test]
    fn non_permutation_reorder_results_are_discarded() {
        let mut multi = group(SelectionMode::Multiple).with_active([0]);
        let effects = multi.move_item(0, 2, |list, _, _| list[1..].to_vec());
        assert!(effects.is_empty());
        assert_eq!(multi.len(), 4);
        assert_eq!(multi.active_indices(), vec![0]);
    }

    #[test]
    fn removing_the_active_tab_selects_nearest_neighbour() {
        let mut tabs = ToggleGroup::new(
            vec![
                ToggleItem::new("a"),
                ToggleItem::new("b"),
                ToggleItem::new("c").with_disabled(true),
                ToggleItem::new("d"),
            ],
            SelectionMode::TABS,
        )
        .expect("group")
        .with_active([1]);

        assert_eq!(
            tabs.remove_item(1),
            vec![
                ToggleEffect::ItemClosed(1),
                ToggleEffect::ItemOpened(0),
                ToggleEffect::Changed(vec![0]),
            ]
        );
    }

    #[test]
    fn removing_an_earlier_item_shifts_the_selection() {
        let mut accordion = group(SelectionMode::ACCORDION).with_active([2]);
        assert_eq!(accordion.remove_item(0), vec![ToggleEffect::Changed(vec![1])]);
        assert_eq!(accordion.items()[1].key, "c");
        assert!(accordion.remove_item(10).is_empty());
    }

    #[test]
    fn empty_tabs_activate_the_first_pushed_item() {
        let mut tabs = ToggleGroup::new(Vec::new(), SelectionMode::TABS).expect("group");
        assert!(tabs.active_indices().is_empty());
        assert_eq!(
            tabs.push_item(ToggleItem::new("first")).expect("push"),
            vec![ToggleEffect::ItemOpened(0), ToggleEffect::Changed(vec![0])]
        );
        assert!(tabs.push_item(ToggleItem::new("second")).expect("push").is_empty());
    }

    #[test]
    fn roving_focus_wraps_and_skips_disabled() {
        let mut menu = group(SelectionMode::Multiple);
        menu.set_disabled(1, true);
        assert_eq!(menu.focus_next(), Some(0));
        assert_eq!(menu.focus_next(), Some(2));
        assert_eq!(menu.focus_next(), Some(3));
        assert_eq!(menu.focus_next(), Some(0));
        assert_eq!(menu.focus_prev(), Some(3));
        assert_eq!(menu.focus_first(), Some(0));
        assert_eq!(menu.focus_last(), Some(3));
        assert!(!menu.set_focus(1));
    }

    #[test]
    fn keyboard_activation_matches_click_and_escape_keeps_selection() {
        let mut menu = group(SelectionMode::Multiple).with_active([3]);
        assert_eq!(menu.handle_key(KeyIntent::Activate), ToggleKeyOutcome::Ignored);
        assert_eq!(menu.handle_key(KeyIntent::Next), ToggleKeyOutcome::FocusMoved(0));
        assert_eq!(
            menu.handle_key(KeyIntent::from_key(" ")),
            ToggleKeyOutcome::Toggled(vec![
                ToggleEffect::ItemOpened(0),
                ToggleEffect::Changed(vec![0, 3])
            ])
        );
        assert_eq!(menu.handle_key(KeyIntent::Dismiss), ToggleKeyOutcome::Dismiss);
        assert_eq!(menu.active_indices(), vec![0, 3]);
    }

    #[test]
    fn indexed_groups_key_items_by_position() {
        let tabs = ToggleGroup::indexed(3, SelectionMode::TABS);
        assert_eq!(tabs.position("2"), Some(2));
        assert_eq!(tabs.active_indices(), vec![0]);
    }
}
