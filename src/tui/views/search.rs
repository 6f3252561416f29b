//! Free-text search pane.
//!
//! Enter submits, Shift+Enter / Alt+Enter inserts a line break. The
//! character counter is advisory: going past [`SOFT_LIMIT`] changes its
//! colour but never blocks or truncates.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::theme;
use crate::tui::widgets::input_buffer::InputBuffer;

/// Advisory character limit shown in the counter.
pub const SOFT_LIMIT: usize = 500;

const PLACEHOLDER: &str = "Describe the movie you're looking for...";

/// Outcome of a key press in the search pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Handled here, nothing for the app to do.
    Consumed,
    /// Run a search for this text.
    Submit(String),
    /// Not a search-pane key; let global bindings see it.
    Ignored,
}

pub struct SearchState {
    input: InputBuffer,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            input: InputBuffer::new(),
        }
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }

    /// Replace the text, e.g. when history restores an older query.
    pub fn set_text(&mut self, text: &str) {
        self.input.set_text(text);
    }

    pub fn char_count(&self) -> usize {
        self.input.char_count()
    }

    pub fn over_limit(&self) -> bool {
        self.char_count() > SOFT_LIMIT
    }

    /// Whether Enter would submit right now.
    pub fn can_submit(&self, loading: bool) -> bool {
        !loading && !self.input.is_empty()
    }

    /// Handle a key press. While `loading`, the field is read-only.
    pub fn handle_input(&mut self, event: &Event, loading: bool) -> SearchResult {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return SearchResult::Ignored;
        };

        if modifiers.contains(KeyModifiers::CONTROL)
            || (modifiers.contains(KeyModifiers::ALT) && *code != KeyCode::Enter)
        {
            return SearchResult::Ignored;
        }

        match code {
            KeyCode::Enter
                if modifiers.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) =>
            {
                if !loading {
                    self.input.insert_newline();
                }
                SearchResult::Consumed
            }
            KeyCode::Enter => {
                if self.can_submit(loading) {
                    SearchResult::Submit(self.input.text().to_string())
                } else {
                    SearchResult::Consumed
                }
            }
            KeyCode::Char(c) => {
                if !loading {
                    self.input.insert_char(*c);
                }
                SearchResult::Consumed
            }
            KeyCode::Backspace => {
                if !loading {
                    self.input.backspace();
                }
                SearchResult::Consumed
            }
            KeyCode::Delete => {
                if !loading {
                    self.input.delete();
                }
                SearchResult::Consumed
            }
            KeyCode::Left => {
                self.input.move_left();
                SearchResult::Consumed
            }
            KeyCode::Right => {
                self.input.move_right();
                SearchResult::Consumed
            }
            KeyCode::Home => {
                self.input.move_home();
                SearchResult::Consumed
            }
            KeyCode::End => {
                self.input.move_end();
                SearchResult::Consumed
            }
            _ => SearchResult::Ignored,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool, loading: bool) {
        let block = if focused {
            theme::block_focused("Search")
        } else {
            theme::block_default("Search")
        };

        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let inner = block.inner(rows[0]);
        frame.render_widget(block, rows[0]);

        self.render_text(frame, inner, focused, loading);
        self.render_footer(frame, rows[1], loading);
    }

    fn render_text(&self, frame: &mut Frame, area: Rect, focused: bool, loading: bool) {
        if area.height == 0 {
            return;
        }

        if self.input.text().is_empty() {
            let placeholder = Line::from(Span::styled(PLACEHOLDER, theme::dim()));
            frame.render_widget(Paragraph::new(placeholder), area);
            if focused && !loading {
                frame.set_cursor_position((area.x, area.y));
            }
            return;
        }

        let text_style = if loading {
            theme::muted()
        } else {
            Style::default().fg(theme::TEXT)
        };

        // Keep the cursor line visible when the text outgrows the pane.
        let (cursor_line, cursor_col) = self.input.cursor_line_col();
        let visible = usize::from(area.height);
        let first = (cursor_line + 1).saturating_sub(visible);

        let lines: Vec<Line> = self
            .input
            .text()
            .split('\n')
            .skip(first)
            .take(visible)
            .map(|l| Line::from(Span::styled(l.to_string(), text_style)))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);

        if focused && !loading {
            let x = area.x + (cursor_col as u16).min(area.width.saturating_sub(1));
            let y = area.y + (cursor_line - first) as u16;
            frame.set_cursor_position((x, y));
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, loading: bool) {
        let cols = Layout::horizontal([Constraint::Min(1), Constraint::Length(12)]).split(area);

        let hint = if loading {
            Line::from(Span::styled(" Searching...", theme::key_hint()))
        } else {
            Line::from(vec![
                Span::styled(" Enter", theme::key_hint()),
                Span::styled(":send ", theme::dim()),
                Span::styled("Shift+Enter", theme::key_hint()),
                Span::styled(":new line", theme::dim()),
            ])
        };
        frame.render_widget(Paragraph::new(hint), cols[0]);

        let counter_style = if self.over_limit() {
            Style::default().fg(theme::WARNING)
        } else {
            theme::muted()
        };
        let counter = Line::from(Span::styled(
            format!("{}/{SOFT_LIMIT} ", self.char_count()),
            counter_style,
        ))
        .right_aligned();
        frame.render_widget(Paragraph::new(counter), cols[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    fn type_text(state: &mut SearchState, text: &str) {
        for c in text.chars() {
            state.handle_input(&key(KeyCode::Char(c)), false);
        }
    }

    #[test]
    fn test_enter_submits_text() {
        let mut state = SearchState::new();
        type_text(&mut state, "romantic comedy");
        assert_eq!(
            state.handle_input(&key(KeyCode::Enter), false),
            SearchResult::Submit("romantic comedy".into())
        );
        // Text stays in the field after submitting
        assert_eq!(state.text(), "romantic comedy");
    }

    #[test]
    fn test_blank_query_is_not_submitted() {
        let mut state = SearchState::new();
        type_text(&mut state, "   ");
        assert_eq!(
            state.handle_input(&key(KeyCode::Enter), false),
            SearchResult::Consumed
        );
    }

    #[test]
    fn test_no_submit_while_loading() {
        let mut state = SearchState::new();
        type_text(&mut state, "heist");
        assert_eq!(
            state.handle_input(&key(KeyCode::Enter), true),
            SearchResult::Consumed
        );
    }

    #[test]
    fn test_shift_enter_inserts_newline() {
        let mut state = SearchState::new();
        type_text(&mut state, "space");
        let result = state.handle_input(&key_with(KeyCode::Enter, KeyModifiers::SHIFT), false);
        assert_eq!(result, SearchResult::Consumed);
        type_text(&mut state, "opera");
        assert_eq!(state.text(), "space\nopera");
    }

    #[test]
    fn test_alt_enter_inserts_newline() {
        let mut state = SearchState::new();
        type_text(&mut state, "a");
        state.handle_input(&key_with(KeyCode::Enter, KeyModifiers::ALT), false);
        assert_eq!(state.text(), "a\n");
    }

    #[test]
    fn test_typing_ignored_while_loading() {
        let mut state = SearchState::new();
        type_text(&mut state, "ab");
        state.handle_input(&key(KeyCode::Char('c')), true);
        state.handle_input(&key(KeyCode::Backspace), true);
        assert_eq!(state.text(), "ab");
    }

    #[test]
    fn test_counter_is_advisory() {
        let mut state = SearchState::new();
        state.set_text(&"x".repeat(SOFT_LIMIT + 20));
        assert!(state.over_limit());
        assert_eq!(state.char_count(), SOFT_LIMIT + 20);
        // Still submittable past the limit
        assert!(matches!(
            state.handle_input(&key(KeyCode::Enter), false),
            SearchResult::Submit(_)
        ));
    }

    #[test]
    fn test_ctrl_and_esc_fall_through() {
        let mut state = SearchState::new();
        assert_eq!(
            state.handle_input(&key_with(KeyCode::Char('l'), KeyModifiers::CONTROL), false),
            SearchResult::Ignored
        );
        assert_eq!(state.handle_input(&key(KeyCode::Esc), false), SearchResult::Ignored);
        assert_eq!(state.handle_input(&key(KeyCode::Tab), false), SearchResult::Ignored);
    }

    #[test]
    fn test_alt_arrows_fall_through() {
        let mut state = SearchState::new();
        assert_eq!(
            state.handle_input(&key_with(KeyCode::Left, KeyModifiers::ALT), false),
            SearchResult::Ignored
        );
    }

    #[test]
    fn test_shifted_chars_are_typed() {
        let mut state = SearchState::new();
        state.handle_input(&key_with(KeyCode::Char('A'), KeyModifiers::SHIFT), false);
        assert_eq!(state.text(), "A");
    }
}
