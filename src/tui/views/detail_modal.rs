//! Movie detail modal overlay.
//!
//! Opened from the results grid with a snapshot of the selected item; no
//! fetch happens here. Closes on Esc, `q`, the close control, or a click
//! on the backdrop. While the modal exists it holds a [`ScrollSuspension`],
//! so dropping it through any path restores background scrolling.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::core::api::{Movie, Tag};
use crate::core::scoring::{match_percent, rating_label};
use crate::tui::layout::{centered_rect, contains};
use crate::tui::scroll::ScrollSuspension;
use crate::tui::theme;

const CLOSE_LABEL: &str = "[x]";

/// Outcome of input routed to the modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalResult {
    Consumed,
    Close,
    /// Not for the modal (e.g. a wheel event over the backdrop).
    Ignored,
}

pub struct DetailModalState {
    movie: Movie,
    poster_url: Option<String>,
    scroll: u16,
    _suspension: ScrollSuspension,
}

impl DetailModalState {
    pub fn new(movie: Movie, image_base: &str, suspension: ScrollSuspension) -> Self {
        let poster_url = movie.poster_url(image_base);
        Self {
            movie,
            poster_url,
            scroll: 0,
            _suspension: suspension,
        }
    }

    pub fn movie(&self) -> &Movie {
        &self.movie
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Dialog rect inside the full terminal area.
    pub fn dialog_area(area: Rect) -> Rect {
        centered_rect(70, 80, area)
    }

    /// Hit area of the close control on the dialog's top border.
    pub fn close_button(area: Rect) -> Rect {
        let dialog = Self::dialog_area(area);
        let width = CLOSE_LABEL.len() as u16;
        Rect::new(
            (dialog.x + dialog.width).saturating_sub(width + 2),
            dialog.y,
            width,
            1,
        )
    }

    /// Body viewport: the dialog interior above the hint line.
    fn body_area(area: Rect) -> Rect {
        let inner = Block::default()
            .borders(Borders::ALL)
            .inner(Self::dialog_area(area));
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        }
    }

    /// Furthest the body can scroll before its last line leaves the
    /// viewport.
    pub fn max_scroll(&self, area: Rect) -> u16 {
        let body = Self::body_area(area);
        let rows = wrapped_rows(&self.body_lines(), body.width);
        let max = rows.saturating_sub(usize::from(body.height));
        u16::try_from(max).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32, area: Rect) {
        let target = (i32::from(self.scroll) + delta).max(0);
        let target = u16::try_from(target).unwrap_or(u16::MAX);
        self.scroll = target.min(self.max_scroll(area));
    }

    /// Handle input. `area` is the full terminal area.
    pub fn handle_input(&mut self, event: &Event, area: Rect) -> ModalResult {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Esc | KeyCode::Char('q') => ModalResult::Close,
                KeyCode::Down | KeyCode::Char('j') => {
                    self.scroll_by(1, area);
                    ModalResult::Consumed
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.scroll_by(-1, area);
                    ModalResult::Consumed
                }
                KeyCode::Home | KeyCode::Char('g') => {
                    self.scroll = 0;
                    ModalResult::Consumed
                }
                KeyCode::End | KeyCode::Char('G') => {
                    self.scroll = self.max_scroll(area);
                    ModalResult::Consumed
                }
                // Focus stays in the dialog.
                _ => ModalResult::Consumed,
            },
            Event::Mouse(mouse) => self.handle_mouse(mouse, area),
            _ => ModalResult::Ignored,
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, area: Rect) -> ModalResult {
        let dialog = Self::dialog_area(area);
        let inside = contains(dialog, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if contains(Self::close_button(area), mouse.column, mouse.row) || !inside {
                    ModalResult::Close
                } else {
                    ModalResult::Consumed
                }
            }
            MouseEventKind::ScrollDown if inside => {
                self.scroll_by(1, area);
                ModalResult::Consumed
            }
            MouseEventKind::ScrollUp if inside => {
                self.scroll_by(-1, area);
                ModalResult::Consumed
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => ModalResult::Ignored,
            _ => ModalResult::Consumed,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let modal = Self::dialog_area(area);
        frame.render_widget(Clear, modal);

        let block = Block::default()
            .title(format!(" {} ", self.movie.title))
            .title_alignment(Alignment::Center)
            .title_style(theme::title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MARQUEE))
            .style(Style::default().bg(theme::AUDITORIUM));

        let inner = block.inner(modal);
        frame.render_widget(block, modal);

        frame.render_widget(
            Paragraph::new(Span::styled(CLOSE_LABEL, theme::key_hint())),
            Self::close_button(area),
        );

        let chunks = Layout::vertical([
            Constraint::Min(1),    // Body
            Constraint::Length(1), // Hint line
        ])
        .split(inner);

        frame.render_widget(
            Paragraph::new(self.body_lines())
                .wrap(Wrap { trim: false })
                .scroll((self.scroll.min(self.max_scroll(area)), 0)),
            chunks[0],
        );
        self.render_hint(frame, chunks[1]);
    }

    fn body_lines(&self) -> Vec<Line<'static>> {
        let movie = &self.movie;
        let mut lines = Vec::new();

        let percent = match_percent(movie.similarity_score);
        let mut badges = vec![Span::styled(
            format!("{percent}% match"),
            theme::match_badge(percent),
        )];
        if let Some(rating) = rating_label(movie.score()) {
            badges.push(Span::raw("   "));
            badges.push(Span::styled(rating, Style::default().fg(theme::RATING)));
        }
        if let Some(language) = movie.language() {
            badges.push(Span::raw("   "));
            badges.push(Span::styled(language, theme::muted()));
        }
        lines.push(Line::from(badges));
        lines.push(Line::raw(""));

        if let Some(date) = movie.release_date() {
            lines.push(field("Released", date.format("%B %-d, %Y").to_string()));
        } else if let Some(raw) = movie.release_date.as_deref() {
            lines.push(field("Released", raw.to_string()));
        }
        if let Some(genres) = tag_list(&movie.genre) {
            lines.push(field("Genres", genres));
        }
        if let Some(talent) = tag_list(&movie.talent) {
            lines.push(field("Talent", talent));
        }

        if let Some(summary) = movie.summary() {
            lines.push(Line::raw(""));
            lines.push(Line::from(Span::styled("Overview", theme::heading())));
            for paragraph in summary.split('\n') {
                lines.push(Line::from(Span::styled(
                    paragraph.to_string(),
                    Style::default().fg(theme::TEXT),
                )));
            }
        }

        let mut meta = Vec::new();
        if let Some(url) = &self.poster_url {
            meta.push(field("Poster", url.clone()));
        }
        if let Some(created) = movie.created_at() {
            meta.push(field("Added", created.format("%Y-%m-%d %H:%M").to_string()));
        }
        if let Some(updated) = movie.updated_at() {
            meta.push(field("Updated", updated.format("%Y-%m-%d %H:%M").to_string()));
        }
        if !movie.id.is_empty() {
            meta.push(field("ID", movie.id.clone()));
        }
        if !meta.is_empty() {
            lines.push(Line::raw(""));
            lines.extend(meta);
        }

        lines
    }

    fn render_hint(&self, frame: &mut Frame, area: Rect) {
        let hint = Line::from(vec![
            Span::styled(" Esc", theme::key_hint()),
            Span::styled(":close ", theme::dim()),
            Span::styled("↑/↓", theme::key_hint()),
            Span::styled(":scroll ", theme::dim()),
            Span::styled("click outside", theme::key_hint()),
            Span::styled(":dismiss", theme::dim()),
        ]);
        frame.render_widget(Paragraph::new(hint), area);
    }
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label:<10}"),
            theme::muted().add_modifier(Modifier::BOLD),
        ),
        Span::styled(value, Style::default().fg(theme::TEXT)),
    ])
}

fn tag_list(tags: &[Tag]) -> Option<String> {
    if tags.is_empty() {
        None
    } else {
        Some(
            tags.iter()
                .map(|t| t.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Rows `lines` take when word-wrapped to `width` columns.
fn wrapped_rows(lines: &[Line], width: u16) -> usize {
    let width = usize::from(width.max(1));
    lines
        .iter()
        .map(|line| {
            let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
            let mut rows = 1;
            let mut col = 0;
            for word in text.split(' ') {
                let len = word.chars().count();
                if col == 0 {
                    col = len;
                } else if col + 1 + len <= width {
                    col += 1 + len;
                } else {
                    rows += 1;
                    col = len;
                }
                while col > width {
                    rows += 1;
                    col -= width;
                }
            }
            rows
        })
        .sum()
}
