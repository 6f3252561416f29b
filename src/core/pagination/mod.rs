//! Pagination state machines.
//!
//! - [`cursor`]: server-driven pages behind opaque `next`/`previous` locators.
//! - [`offset`]: page numbers over a collection that is already in memory.
//! - [`location`] + [`url_sync`]: the page number mirrored into the address bar.

pub mod cursor;
pub mod location;
pub mod offset;
pub mod url_sync;

pub use cursor::CursorPagination;
pub use location::{Location, Navigator};
pub use offset::{OffsetPagination, PageWindow};
pub use url_sync::UrlPagination;
