//! Client side of the external recommendation service.

pub mod client;
pub mod error;
pub mod models;

pub use client::{PageSource, RecommendationClient};
pub use error::{ClientError, Result};
pub use models::{Movie, Page, Tag};
