use std::ops::Range;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Zero-based page cursor over `total_items`. There is always at least one page.
pub struct Pagination {
    total_items: usize,
    page_size: usize,
    page: usize,
}

impl Pagination {
    /// Starts on the first page. A zero page size is treated as one.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
            page: 0,
        }
    }

    /// Current zero-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Items per page, never zero.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Items being paged over.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages; one even when there are no items.
    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Whether the cursor is on the first page.
    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    /// Whether the cursor is on the last page.
    pub fn is_last(&self) -> bool {
        self.page + 1 >= self.page_count()
    }

    /// Jumps to `page`, clamped to the last page. Returns whether the page changed.
    pub fn go_to(&mut self, page: usize) -> bool {
        let clamped = page.min(self.page_count() - 1);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Steps forward; a no-op on the last page.
    pub fn next(&mut self) -> bool {
        self.go_to(self.page.saturating_add(1))
    }

    /// Steps back; a no-op on the first page.
    pub fn prev(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Jumps to the first page.
    pub fn first(&mut self) -> bool {
        self.go_to(0)
    }

    /// Jumps to the last page.
    pub fn last(&mut self) -> bool {
        self.go_to(self.page_count() - 1)
    }

    /// Changes the item count, pulling the cursor back if its page no longer exists.
    pub fn set_total_items(&mut self, total_items: usize) -> bool {
        self.total_items = total_items;
        self.go_to(self.page)
    }

    /// Changes the page size while keeping the first visible item on screen.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        let first_item = self.page * self.page_size;
        let before = self.page;
        self.page_size = page_size.max(1);
        self.page = (first_item / self.page_size).min(self.page_count() - 1);
        self.page != before
    }

    /// Item indices shown on the current page.
    pub fn item_range(&self) -> Range<usize> {
        let start = (self.page * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Up to `max_buttons` consecutive page numbers centred on the current page.
    pub fn page_window(&self, max_buttons: usize) -> Vec<usize> {
        let count = self.page_count();
        let width = max_buttons.clamp(1, count);
        let start = self
            .page
            .saturating_sub(width / 2)
            .min(count - width);
        (start..start + width).collect()
    }
}
