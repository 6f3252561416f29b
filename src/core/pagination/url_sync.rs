//! Page-number pagination mirrored into the address bar's `page` parameter.

use super::location::{Location, Navigator};
use super::offset::{OffsetPagination, PageWindow};

/// [`OffsetPagination`] whose current page is also the `page` parameter of
/// the current [`Location`].
///
/// Every page-changing call updates the internal state and pushes the
/// rewritten location. Nothing is refetched: a navigation only changes
/// what is rendered.
#[derive(Debug, Clone)]
pub struct UrlPagination {
    inner: OffsetPagination,
    default_page: usize,
}

impl UrlPagination {
    pub fn new(items_per_page: usize, default_page: usize, location: &Location) -> Self {
        let default_page = default_page.max(1);
        Self {
            inner: OffsetPagination::new(items_per_page, location.page(default_page)),
            default_page,
        }
    }

    pub fn state(&self) -> &OffsetPagination {
        &self.inner
    }

    pub fn window(&self) -> PageWindow {
        self.inner.window()
    }

    pub fn current_page(&self) -> usize {
        self.inner.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.inner.total_pages()
    }

    pub fn paginate<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        self.inner.paginate(items)
    }

    pub fn summary(&self) -> Option<String> {
        self.inner.summary()
    }

    pub fn go_to_page(&mut self, page: usize, nav: &mut Navigator) -> usize {
        let committed = self.inner.go_to_page(page);
        let target = nav.current().with_page(committed);
        if nav.push(target) {
            log::debug!("Location -> {}", nav.current());
        }
        committed
    }

    pub fn next_page(&mut self, nav: &mut Navigator) -> usize {
        self.go_to_page(self.current_page() + 1, nav)
    }

    pub fn prev_page(&mut self, nav: &mut Navigator) -> usize {
        self.go_to_page(self.current_page().saturating_sub(1), nav)
    }

    pub fn first_page(&mut self, nav: &mut Navigator) -> usize {
        self.go_to_page(1, nav)
    }

    pub fn last_page(&mut self, nav: &mut Navigator) -> usize {
        self.go_to_page(self.total_pages(), nav)
    }

    /// Follow a location that changed outside this adapter (address-bar
    /// edit, back/forward). Returns `true` if the current page moved.
    pub fn sync(&mut self, location: &Location) -> bool {
        let wanted = location.page(self.default_page);
        if wanted == self.inner.current_page() {
            return false;
        }
        self.inner.go_to_page(wanted);
        true
    }

    /// Bring the current location and the pager back in line after the
    /// collection changed size.
    ///
    /// A location page that still exists is followed. One that no longer
    /// exists is not clamped to the last page: the pager keeps the page
    /// [`OffsetPagination::set_total_items`] chose (page 1 after a shrink)
    /// and the location is rewritten in place to match.
    pub fn reconcile(&mut self, nav: &mut Navigator) {
        if nav.current().page(self.default_page) <= self.total_pages() {
            self.sync(nav.current());
        }
        let page = self.current_page();
        if nav.current().page(self.default_page) != page {
            let canonical = nav.current().with_page(page);
            nav.replace(canonical);
        }
    }

    pub fn set_total_items(&mut self, total: usize) {
        self.inner.set_total_items(total);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.inner.set_items_per_page(items_per_page);
    }
}
