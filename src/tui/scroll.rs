//! Background scroll suppression while an overlay is open.
//!
//! Overlays hold a [`ScrollSuspension`]; the results pane ignores wheel
//! paging while any suspension is alive. Dropping the guard restores
//! scrolling, so closing a modal through any path (Esc, outside click,
//! replacing the overlay, quitting) cannot leave the page stuck.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared counter of live suspensions.
#[derive(Debug, Clone, Default)]
pub struct ScrollGate {
    holds: Arc<AtomicUsize>,
}

impl ScrollGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suspend background scrolling until the returned guard is dropped.
    pub fn suspend(&self) -> ScrollSuspension {
        self.holds.fetch_add(1, Ordering::SeqCst);
        ScrollSuspension {
            holds: Arc::clone(&self.holds),
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.holds.load(Ordering::SeqCst) > 0
    }
}

/// RAII guard returned by [`ScrollGate::suspend`].
#[derive(Debug)]
pub struct ScrollSuspension {
    holds: Arc<AtomicUsize>,
}

impl Drop for ScrollSuspension {
    fn drop(&mut self) {
        self.holds.fetch_sub(1, Ordering::SeqCst);
    }
}
