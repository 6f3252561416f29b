//! Result grid, pager bar and the empty/loading/error states.
//!
//! The grid shows one local page of the fetched items. Which slice that is
//! comes from the URL-synced offset pager; server pages are moved with the
//! cursor controls in the pager bar.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::core::api::Movie;
use crate::core::scoring::{match_percent, rating_label};
use crate::tui::layout::{self, AppLayout};
use crate::tui::scroll::ScrollGate;
use crate::tui::theme;

/// Genre names shown on a card.
const CARD_GENRES: usize = 3;

const PREV_LABEL: &str = "← Previous [p]";
const NEXT_LABEL: &str = "Next → [n]";

/// Local-page movement requested from the results pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMove {
    Next,
    Prev,
    First,
    Last,
}

/// Outcome of input routed to the results pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsResult {
    Consumed,
    /// Open the detail modal for this index within the visible page.
    Open(usize),
    LoadNext,
    LoadPrevious,
    Page(PageMove),
    Ignored,
}

/// Everything the pane needs to draw one frame.
pub struct ResultsView<'a> {
    /// Items on the visible local page.
    pub items: &'a [Movie],
    /// Items on the whole server page.
    pub total: usize,
    pub loading: bool,
    pub error: Option<&'a str>,
    /// A query has been submitted at least once.
    pub searched: bool,
    pub has_next: bool,
    pub has_prev: bool,
    pub page: usize,
    pub total_pages: usize,
    pub summary: Option<String>,
    pub focused: bool,
}

/// Selection and scroll state for the results pane.
#[derive(Debug, Default)]
pub struct ResultsState {
    selected: usize,
    gate: ScrollGate,
}

impl ResultsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    /// Keep the selection inside a page of `count` items.
    pub fn clamp_selection(&mut self, count: usize) {
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Gate that overlays use to suspend wheel paging.
    pub fn scroll_gate(&self) -> &ScrollGate {
        &self.gate
    }

    /// Handle input. `count` is the number of cards on the visible page.
    pub fn handle_input(&mut self, event: &Event, layout: &AppLayout, count: usize) -> ResultsResult {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.handle_key(*code, layout.results, count)
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse, layout, count),
            _ => ResultsResult::Ignored,
        }
    }

    fn handle_key(&mut self, code: KeyCode, area: Rect, count: usize) -> ResultsResult {
        let (cols, _) = layout::grid_dimensions(area);
        let cols = usize::from(cols);

        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = self.selected.saturating_sub(1);
                ResultsResult::Consumed
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                ResultsResult::Consumed
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected >= cols {
                    self.selected -= cols;
                }
                ResultsResult::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + cols < count {
                    self.selected += cols;
                }
                ResultsResult::Consumed
            }
            KeyCode::Enter if count > 0 => ResultsResult::Open(self.selected.min(count - 1)),
            KeyCode::Char('n') => ResultsResult::LoadNext,
            KeyCode::Char('p') => ResultsResult::LoadPrevious,
            KeyCode::Char(']') | KeyCode::PageDown => ResultsResult::Page(PageMove::Next),
            KeyCode::Char('[') | KeyCode::PageUp => ResultsResult::Page(PageMove::Prev),
            KeyCode::Char('g') | KeyCode::Home => ResultsResult::Page(PageMove::First),
            KeyCode::Char('G') | KeyCode::End => ResultsResult::Page(PageMove::Last),
            _ => ResultsResult::Ignored,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, layout: &AppLayout, count: usize) -> ResultsResult {
        let (col, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp
                if layout::contains(layout.results, col, row) =>
            {
                if self.gate.is_suspended() {
                    return ResultsResult::Consumed;
                }
                if mouse.kind == MouseEventKind::ScrollDown {
                    ResultsResult::Page(PageMove::Next)
                } else {
                    ResultsResult::Page(PageMove::Prev)
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = layout::card_at(layout.results, count, col, row) {
                    self.selected = index;
                    return ResultsResult::Open(index);
                }
                let (prev, next) = pager_buttons(layout.pager);
                if layout::contains(prev, col, row) {
                    ResultsResult::LoadPrevious
                } else if layout::contains(next, col, row) {
                    ResultsResult::LoadNext
                } else {
                    ResultsResult::Ignored
                }
            }
            _ => ResultsResult::Ignored,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, layout: &AppLayout, view: &ResultsView<'_>) {
        self.render_body(frame, layout.results, view);
        render_pager(frame, layout.pager, view);
    }

    fn render_body(&self, frame: &mut Frame, area: Rect, view: &ResultsView<'_>) {
        if let Some(error) = view.error {
            render_banner(
                frame,
                area,
                vec![
                    Line::from(Span::styled(
                        "Error",
                        Style::default().fg(theme::ERROR).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(Span::styled(error.to_string(), Style::default().fg(theme::ERROR))),
                    Line::raw(""),
                    Line::from(Span::styled("Submit the search again to retry.", theme::dim())),
                ],
            );
            return;
        }

        if view.loading {
            render_banner(
                frame,
                area,
                vec![Line::from(Span::styled(
                    "Loading recommendations...",
                    theme::heading(),
                ))],
            );
            return;
        }

        if view.items.is_empty() {
            let message = if view.searched {
                "No recommendations found. Try a different search."
            } else {
                "Enter a movie description or genre to get started"
            };
            render_banner(frame, area, vec![Line::from(Span::styled(message, theme::muted()))]);
            return;
        }

        let rects = layout::card_rects(area, view.items.len());
        for (i, (movie, rect)) in view.items.iter().zip(rects).enumerate() {
            render_card(frame, rect, movie, view.focused && i == self.selected);
        }
    }
}

/// Hit areas for the Previous and Next controls in the pager row.
pub fn pager_buttons(area: Rect) -> (Rect, Rect) {
    let row = area.y + area.height.saturating_sub(1);
    let prev_width = PREV_LABEL.chars().count() as u16;
    let next_width = NEXT_LABEL.chars().count() as u16;
    let prev = Rect::new(area.x + 1, row, prev_width, 1);
    let next = Rect::new(prev.x + prev_width + 2, row, next_width, 1);
    (prev, next)
}

fn render_banner(frame: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let rows = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(lines.len() as u16),
        Constraint::Min(0),
    ])
    .split(area);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[1],
    );
}

fn render_card(frame: &mut Frame, area: Rect, movie: &Movie, selected: bool) {
    let border = if selected {
        theme::highlight()
    } else {
        theme::border_default()
    };
    let title_style = if selected {
        theme::title()
    } else {
        Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
    };

    let block = Block::default()
        .title(Span::styled(format!(" {} ", movie.title), title_style))
        .borders(Borders::ALL)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let percent = match_percent(movie.similarity_score);
    let mut badges = vec![Span::styled(
        format!("{percent}% match"),
        theme::match_badge(percent),
    )];
    if let Some(rating) = rating_label(movie.score()) {
        badges.push(Span::raw("  "));
        badges.push(Span::styled(rating, Style::default().fg(theme::RATING)));
    }

    let facts: Vec<String> = [
        movie.year().map(|y| y.to_string()),
        movie.language(),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut lines = vec![Line::from(badges)];
    if !facts.is_empty() {
        lines.push(Line::from(Span::styled(facts.join(" · "), theme::muted())));
    }
    if let Some(genres) = movie.genre_label(CARD_GENRES) {
        lines.push(Line::from(Span::styled(genres, theme::key_hint())));
    }
    if let Some(summary) = movie.summary() {
        lines.push(Line::from(Span::styled(summary.to_string(), theme::dim())));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

fn render_pager(frame: &mut Frame, area: Rect, view: &ResultsView<'_>) {
    if area.height == 0 || view.error.is_some() {
        return;
    }

    let rows = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).split(area);

    if !view.loading && view.total > 0 {
        render_page_info(frame, rows[0], view);
    }

    if !(view.has_next || view.has_prev) || rows[1].height == 0 {
        return;
    }

    let button = |enabled: bool| {
        if view.loading {
            theme::dim().add_modifier(Modifier::ITALIC)
        } else if enabled {
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
        } else {
            theme::dim()
        }
    };

    let (prev, next) = pager_buttons(area);
    frame.render_widget(
        Paragraph::new(Span::styled(PREV_LABEL, button(view.has_prev))),
        prev.intersection(rows[1]),
    );
    frame.render_widget(
        Paragraph::new(Span::styled(NEXT_LABEL, button(view.has_next))),
        next.intersection(rows[1]),
    );
}

fn render_page_info(frame: &mut Frame, area: Rect, view: &ResultsView<'_>) {
    let mut info = vec![Span::styled(
        format!(" Recommendations ({})", view.total),
        theme::heading(),
    )];
    if let Some(summary) = &view.summary {
        info.push(Span::styled(format!("  {summary}"), theme::muted()));
    }
    if view.total_pages > 1 {
        info.push(Span::styled(
            format!("  page {}/{} ", view.page, view.total_pages),
            theme::muted(),
        ));
        info.push(Span::styled("[ ]", theme::key_hint()));
    }
    frame.render_widget(Paragraph::new(Line::from(info)), area);
}
