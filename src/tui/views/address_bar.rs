//! Editable address bar overlay (`Ctrl+L`).
//!
//! Accepts a full `cinematch://` location or a bare relative form such as
//! `?query=noir&page=2`, resolved against the home location.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::core::pagination::Location;
use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// Outcome of input routed to the address bar.
#[derive(Debug, Clone, PartialEq)]
pub enum AddressResult {
    Consumed,
    /// Navigate to this location.
    Apply(Location),
    Cancel,
}

pub struct AddressBarState {
    input: InputBuffer,
    error: Option<String>,
}

impl AddressBarState {
    /// Open pre-filled with the current location.
    pub fn new(current: &Location) -> Self {
        Self {
            input: InputBuffer::with_text(current.as_str()),
            error: None,
        }
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn handle_input(&mut self, event: &Event) -> AddressResult {
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return AddressResult::Consumed;
        };

        match code {
            KeyCode::Esc => AddressResult::Cancel,
            KeyCode::Enter => self.submit(),
            KeyCode::Char(c) => {
                self.input.insert_char(*c);
                self.error = None;
                AddressResult::Consumed
            }
            KeyCode::Backspace => {
                self.input.backspace();
                self.error = None;
                AddressResult::Consumed
            }
            KeyCode::Delete => {
                self.input.delete();
                self.error = None;
                AddressResult::Consumed
            }
            KeyCode::Left => {
                self.input.move_left();
                AddressResult::Consumed
            }
            KeyCode::Right => {
                self.input.move_right();
                AddressResult::Consumed
            }
            KeyCode::Home => {
                self.input.move_home();
                AddressResult::Consumed
            }
            KeyCode::End => {
                self.input.move_end();
                AddressResult::Consumed
            }
            _ => AddressResult::Consumed,
        }
    }

    fn submit(&mut self) -> AddressResult {
        let raw = self.input.text().trim();
        if raw.is_empty() {
            return AddressResult::Apply(Location::home());
        }
        match Location::parse(raw) {
            Ok(location) => AddressResult::Apply(location),
            Err(e) => {
                log::debug!("rejected location {raw:?}: {e}");
                self.error = Some(format!("Invalid location: {e}"));
                AddressResult::Consumed
            }
        }
    }

    /// Render over the top rows of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let height = if self.error.is_some() { 4 } else { 3 };
        let bar = Rect::new(area.x, area.y, area.width, height.min(area.height));
        frame.render_widget(Clear, bar);

        let block = Block::default()
            .title(" Location ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::MARQUEE))
            .style(Style::default().bg(theme::AUDITORIUM));
        let inner = block.inner(bar);
        frame.render_widget(block, bar);

        let mut lines = vec![Line::from(Span::styled(
            self.input.text().to_string(),
            Style::default().fg(theme::TEXT),
        ))];
        if let Some(err) = &self.error {
            lines.push(Line::from(Span::styled(
                err.clone(),
                Style::default().fg(theme::ERROR),
            )));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if inner.width > 0 && inner.height > 0 {
            let (_, col) = self.input.cursor_line_col();
            frame.set_cursor_position((
                inner.x + (col as u16).min(inner.width - 1),
                inner.y,
            ));
        }
    }
}
