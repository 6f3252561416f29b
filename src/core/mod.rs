pub mod api;
pub mod logging;
pub mod pagination;
pub mod scoring;
