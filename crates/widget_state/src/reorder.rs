//! Drag-reorder capability.
//!
//! The capability is a pure function from `(list, from, to)` to the reordered list. It runs on
//! every hover over a new drop target while a drag is in flight, not only on drop, so the list
//! reorders live under the pointer.

/// Injected reorder capability.
pub type ReorderFn<T> = fn(&[T], usize, usize) -> Vec<T>;

/// Default capability: removes the item at `from` and reinserts it at `to`. Out-of-range or
/// equal indices return the list unchanged.
pub fn move_item<T: Clone>(list: &[T], from: usize, to: usize) -> Vec<T> {
    let mut reordered = list.to_vec();
    if from == to || from >= reordered.len() || to >= reordered.len() {
        return reordered;
    }
    let item = reordered.remove(from);
    reordered.insert(to, item);
    reordered
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Tracks the dragged item's current slot across hover events.
pub struct DragReorder {
    source: Option<usize>,
}

impl DragReorder {
    /// Starts dragging the item at `index`.
    pub fn begin(&mut self, index: usize) {
        self.source = Some(index);
    }

    /// Current slot of the dragged item.
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    /// Pointer is over `target`. Returns the `(from, to)` move to apply, and follows the item to
    /// its new slot.
    pub fn hover(&mut self, target: usize) -> Option<(usize, usize)> {
        let from = self.source?;
        if from == target {
            return None;
        }
        self.source = Some(target);
        Some((from, target))
    }

    /// Drop or cancel.
    pub fn end(&mut self) -> Option<usize> {
        self.source.take()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn move_item_reinserts_at_target() {
        assert_eq!(move_item(&["a", "b", "c", "d"], 0, 2), vec!["b", "c", "a", "d"]);
        assert_eq!(move_item(&["a", "b", "c", "d"], 3, 1), vec!["a", "d", "b", "c"]);
        assert_eq!(move_item(&["a", "b"], 0, 5), vec!["a", "b"]);
    }

    #[test]
    fn drag_session_follows_the_item_across_hovers() {
        let mut list = vec!["a", "b", "c", "d"];
        let mut drag = DragReorder::default();
        drag.begin(0);

        for target in [1, 2, 2, 3] {
            if let Some((from, to)) = drag.hover(target) {
                list = move_item(&list, from, to);
            }
        }
        assert_eq!(list, vec!["b", "c", "d", "a"]);
        assert_eq!(drag.end(), Some(3));
        assert_eq!(drag.hover(0), None);
    }
}
