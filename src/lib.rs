/// CineMatch - Movie Recommendation Browser (TUI Edition)
///
/// Core library providing the recommendation API client, cursor and
/// offset pagination, and the terminal browse UI.

pub mod config;
pub mod core;
pub mod tui;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
