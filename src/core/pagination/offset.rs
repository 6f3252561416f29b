//! Page-number pagination over an already-loaded collection.
//!
//! Nothing here fetches. The caller owns the full collection and asks for
//! the slice belonging to the current page.

/// Derived bounds for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// `max(1, ceil(total_items / items_per_page))`.
    pub total_pages: usize,
    /// Inclusive start of the page slice.
    pub start_index: usize,
    /// Exclusive end of the page slice.
    pub end_index: usize,
    /// Requested page clamped into `[1, total_pages]`.
    pub safe_page: usize,
}

/// Number of pages needed for `total_items`; never less than 1.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1)).max(1)
}

/// Pure page-bounds calculation.
pub fn window(current_page: usize, items_per_page: usize, total_items: usize) -> PageWindow {
    let per_page = items_per_page.max(1);
    let total_pages = total_pages(total_items, per_page);
    let safe_page = current_page.clamp(1, total_pages);
    let start_index = (safe_page - 1) * per_page;
    let end_index = (start_index + per_page).min(total_items);

    PageWindow {
        total_pages,
        start_index,
        end_index,
        safe_page,
    }
}

/// Current page, page size, and collection size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPagination {
    current_page: usize,
    items_per_page: usize,
    total_items: usize,
}

impl OffsetPagination {
    pub fn new(items_per_page: usize, initial_page: usize) -> Self {
        Self {
            current_page: initial_page.max(1),
            items_per_page: items_per_page.max(1),
            total_items: 0,
        }
    }

    pub fn window(&self) -> PageWindow {
        window(self.current_page, self.items_per_page, self.total_items)
    }

    /// The current page, always within `[1, total_pages]`.
    pub fn current_page(&self) -> usize {
        self.window().safe_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.items_per_page)
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page() < self.total_pages()
    }

    pub fn has_prev_page(&self) -> bool {
        self.current_page() > 1
    }

    /// Clamp `page` into range and make it current. Returns the committed page.
    pub fn go_to_page(&mut self, page: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages());
        self.current_page
    }

    pub fn next_page(&mut self) -> usize {
        self.go_to_page(self.current_page() + 1)
    }

    pub fn prev_page(&mut self) -> usize {
        self.go_to_page(self.current_page().saturating_sub(1))
    }

    pub fn first_page(&mut self) -> usize {
        self.go_to_page(1)
    }

    pub fn last_page(&mut self) -> usize {
        self.go_to_page(self.total_pages())
    }

    /// Update the collection size. A page that no longer exists sends the
    /// viewer back to page 1, not to the new last page.
    pub fn set_total_items(&mut self, total: usize) {
        self.total_items = total;
        if self.current_page > self.total_pages() {
            self.current_page = 1;
        }
    }

    /// Change the page size (e.g. the terminal was resized). The current
    /// page is kept and only clamped when it runs off the end.
    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }

    /// The current page's slice of `items`.
    pub fn paginate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let w = self.window();
        let end = w.end_index.min(items.len());
        let start = w.start_index.min(end);
        &items[start..end]
    }

    /// `Showing 5-8 of 12 results`; `None` for an empty collection.
    pub fn summary(&self) -> Option<String> {
        if self.total_items == 0 {
            return None;
        }
        let w = self.window();
        Some(format!(
            "Showing {}-{} of {} results",
            w.start_index + 1,
            w.end_index,
            self.total_items
        ))
    }
}
