//! Terminal browse UI: search pane, result grid, detail modal, address bar.

pub mod app;
pub mod events;
pub mod layout;
pub mod scroll;
pub mod theme;
pub mod views;
pub mod widgets;
