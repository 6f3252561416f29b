//! Cursor pagination over server-issued `next` / `previous` locators.
//!
//! Fetches run as background tokio tasks and report back over a channel,
//! the same way the views load their data: start the work, keep drawing,
//! pick the result up on the next tick with [`CursorPagination::poll`].
//!
//! At most one fetch is in flight per controller. A request made while one
//! is pending is dropped, not queued.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::api::{ClientError, Page, PageSource};

/// Shown when a fetch task dies without reporting back.
const FALLBACK_ERROR: &str = "Something went wrong";

struct Fetched<T> {
    generation: u64,
    result: Result<Page<T>, ClientError>,
}

/// Current page of results plus the locators needed to move around.
pub struct CursorPagination<T> {
    source: Arc<dyn PageSource<T>>,
    items: Vec<T>,
    next: Option<String>,
    previous: Option<String>,
    loading: bool,
    error: Option<String>,
    /// Bumped on every fetch and reset; results tagged with an older
    /// generation are discarded.
    generation: u64,
    task: Option<JoinHandle<()>>,
    result_tx: mpsc::UnboundedSender<Fetched<T>>,
    result_rx: mpsc::UnboundedReceiver<Fetched<T>>,
}

impl<T: Send + 'static> CursorPagination<T> {
    pub fn new(source: Arc<dyn PageSource<T>>) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            source,
            items: Vec::new(),
            next: None,
            previous: None,
            loading: false,
            error: None,
            generation: 0,
            task: None,
            result_tx,
            result_rx,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn next_locator(&self) -> Option<&str> {
        self.next.as_deref()
    }

    pub fn previous_locator(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    pub fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev_page(&self) -> bool {
        self.previous.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a new search. Always clears the previous results first, so a
    /// new query never shows the old query's items.
    pub fn submit_query(&mut self, query: &str) -> bool {
        self.reset();
        match self.source.search_locator(query) {
            Ok(locator) => self.fetch(locator),
            Err(e) => {
                self.fail(&e);
                false
            }
        }
    }

    /// Fetch the `next` locator. No-op without one or while loading.
    pub fn load_next(&mut self) -> bool {
        match self.next.clone() {
            Some(locator) => self.fetch(locator),
            None => false,
        }
    }

    /// Fetch the `previous` locator. No-op without one or while loading.
    pub fn load_previous(&mut self) -> bool {
        match self.previous.clone() {
            Some(locator) => self.fetch(locator),
            None => false,
        }
    }

    /// Clear everything, including the loading flag, and cancel any
    /// in-flight fetch.
    pub fn reset(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.generation += 1;
        self.items.clear();
        self.next = None;
        self.previous = None;
        self.error = None;
        self.loading = false;
    }

    /// Replace items and cursors from an envelope obtained elsewhere.
    pub fn set_data(&mut self, page: Page<T>) {
        self.items = page.results;
        self.next = page.next;
        self.previous = page.previous;
        self.error = None;
    }

    /// Apply any finished fetch. Call from the tick handler.
    ///
    /// Returns `true` when the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.drain();

        let finished = self.task.as_ref().is_some_and(|t| t.is_finished());
        if self.loading && finished {
            // The task is done, so anything it sent is already queued.
            changed |= self.drain();
            if self.loading {
                log::error!("Fetch task ended without a result");
                self.task = None;
                self.loading = false;
                self.clear_results();
                self.error = Some(FALLBACK_ERROR.to_string());
                changed = true;
            }
        }
        changed
    }

    /// Wait for the in-flight fetch, if any, and apply it.
    pub async fn settle(&mut self) -> bool {
        let Some(task) = self.task.take() else {
            return self.poll();
        };
        if let Err(e) = task.await {
            if e.is_panic() {
                log::error!("Fetch task panicked: {e}");
            }
        }
        let changed = self.drain();
        if self.loading {
            self.loading = false;
            self.clear_results();
            self.error = Some(FALLBACK_ERROR.to_string());
            return true;
        }
        changed
    }

    fn fetch(&mut self, locator: String) -> bool {
        if self.loading {
            log::debug!("Fetch already in flight; dropping request for {locator}");
            return false;
        }
        self.loading = true;
        self.error = None;
        self.generation += 1;

        let generation = self.generation;
        let source = Arc::clone(&self.source);
        let tx = self.result_tx.clone();
        log::info!("Fetching page {locator}");

        self.task = Some(tokio::spawn(async move {
            let result = source.fetch_page(&locator).await;
            let _ = tx.send(Fetched { generation, result });
        }));
        true
    }

    fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(fetched) = self.result_rx.try_recv() {
            changed |= self.apply(fetched);
        }
        changed
    }

    fn apply(&mut self, fetched: Fetched<T>) -> bool {
        if fetched.generation != self.generation || !self.loading {
            log::debug!("Discarding superseded fetch #{}", fetched.generation);
            return false;
        }
        self.loading = false;
        self.task = None;
        match fetched.result {
            Ok(page) => self.set_data(page),
            Err(e) => self.fail(&e),
        }
        true
    }

    fn fail(&mut self, err: &ClientError) {
        log::warn!("Recommendation fetch failed: {err}");
        self.clear_results();
        self.error = Some(err.to_string());
    }

    fn clear_results(&mut self) {
        self.items.clear();
        self.next = None;
        self.previous = None;
    }
}

impl<T> Drop for CursorPagination<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
