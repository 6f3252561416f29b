//! Root layout computation for header + search + results grid + pager + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the search pane (borders + three text rows + counter row).
pub const SEARCH_HEIGHT: u16 = 6;
/// Collapse the search pane to a single text row below this terminal height.
pub const COMPACT_HEIGHT_THRESHOLD: u16 = 24;
/// Height of the search pane in compact mode.
pub const SEARCH_COMPACT_HEIGHT: u16 = 4;
/// Height of the pager row (summary + controls).
pub const PAGER_HEIGHT: u16 = 2;

/// Narrowest a result card may get before the grid drops a column.
pub const CARD_MIN_WIDTH: u16 = 34;
/// Fixed height of a result card.
pub const CARD_HEIGHT: u16 = 8;

/// Computed layout regions for a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    /// Brand header (top row).
    pub header: Rect,
    /// Search input pane.
    pub search: Rect,
    /// Result grid area.
    pub results: Rect,
    /// Pagination summary and controls.
    pub pager: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    /// Compute layout regions from the terminal area.
    pub fn compute(area: Rect) -> Self {
        let search_height = if area.height < COMPACT_HEIGHT_THRESHOLD {
            SEARCH_COMPACT_HEIGHT
        } else {
            SEARCH_HEIGHT
        };

        let rows = Layout::vertical([
            Constraint::Length(1),             // Header
            Constraint::Length(search_height), // Search
            Constraint::Min(1),                // Results
            Constraint::Length(PAGER_HEIGHT),  // Pager
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

        AppLayout {
            header: rows[0],
            search: rows[1],
            results: rows[2],
            pager: rows[3],
            status: rows[4],
        }
    }
}

/// Number of card columns and rows that fit in `area`. Never less than 1x1.
pub fn grid_dimensions(area: Rect) -> (u16, u16) {
    let cols = (area.width / CARD_MIN_WIDTH).max(1);
    let rows = (area.height / CARD_HEIGHT).max(1);
    (cols, rows)
}

/// How many cards fit on one local page.
pub fn grid_capacity(area: Rect) -> usize {
    let (cols, rows) = grid_dimensions(area);
    usize::from(cols) * usize::from(rows)
}

/// Rects for the first `count` cards, laid out row-major.
pub fn card_rects(area: Rect, count: usize) -> Vec<Rect> {
    let (cols, rows) = grid_dimensions(area);
    let width = area.width / cols;
    let height = CARD_HEIGHT.min(area.height);

    (0..count.min(usize::from(cols) * usize::from(rows)))
        .map(|i| {
            let col = (i % usize::from(cols)) as u16;
            let row = (i / usize::from(cols)) as u16;
            Rect::new(
                area.x + col * width,
                area.y + row * CARD_HEIGHT,
                width,
                height,
            )
        })
        .collect()
}

/// Index of the card under the given cell, if any.
pub fn card_at(area: Rect, count: usize, column: u16, row: u16) -> Option<usize> {
    card_rects(area, count)
        .iter()
        .position(|r| contains(*r, column, row))
}

/// Whether a cell lies inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Calculate a centered rect using percentage of parent area.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
