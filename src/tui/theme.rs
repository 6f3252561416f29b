//! Colors and styles for the CineMatch TUI.
//!
//! A movie-theater palette: a dark auditorium, a cold blue screen glow for
//! structure and focus, marquee red for calls to action and ticket gold
//! for ratings. All colors are RGB truecolor; views import from here
//! instead of using inline `Color::*` literals.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};

// ── Auditorium ──────────────────────────────────────────────────────────────

/// Near-black auditorium: overlay and badge backgrounds.
pub const AUDITORIUM: Color = Color::Rgb(0x12, 0x10, 0x1A);

/// Screen glow: focused borders, section headings.
pub const SCREEN: Color = Color::Rgb(0x5C, 0x8D, 0xD6);
/// Brighter glow: key hints, the loading badge.
pub const SCREEN_GLOW: Color = Color::Rgb(0x9C, 0xC4, 0xFF);

/// Marquee red: titles, the selected card, the brand badge.
pub const MARQUEE: Color = Color::Rgb(0xE5, 0x39, 0x35);

/// Ticket gold: star ratings.
pub const RATING: Color = Color::Rgb(0xF5, 0xC5, 0x18);

// ── Text ────────────────────────────────────────────────────────────────────

pub const TEXT: Color = Color::Rgb(0xEC, 0xE8, 0xE1);
/// Secondary labels.
pub const TEXT_MUTED: Color = Color::Rgb(0x9A, 0x94, 0x8C);
/// Disabled controls, unfocused borders.
pub const TEXT_DIM: Color = Color::Rgb(0x5A, 0x55, 0x60);

// ── Semantic ────────────────────────────────────────────────────────────────

pub const ERROR: Color = Color::Rgb(0xFF, 0x6B, 0x6B);
pub const SUCCESS: Color = Color::Rgb(0x7B, 0xC9, 0x6F);
/// Soft limits and degraded states.
pub const WARNING: Color = Color::Rgb(0xFF, 0xB3, 0x47);
pub const INFO: Color = SCREEN_GLOW;

// ── Match tiers ─────────────────────────────────────────────────────────────

/// Percentages at or above this read as a strong match.
pub const STRONG_MATCH: u8 = 75;
/// Percentages at or above this read as a fair match.
pub const FAIR_MATCH: u8 = 40;

/// Badge color for a match percentage.
pub fn match_color(percent: u8) -> Color {
    if percent >= STRONG_MATCH {
        SUCCESS
    } else if percent >= FAIR_MATCH {
        RATING
    } else {
        TEXT_MUTED
    }
}

// ── Styles ──────────────────────────────────────────────────────────────────

pub fn title() -> Style {
    Style::default().fg(MARQUEE).add_modifier(Modifier::BOLD)
}

pub fn heading() -> Style {
    Style::default().fg(SCREEN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(SCREEN)
}

pub fn border_default() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// Selected card title.
pub fn highlight() -> Style {
    title()
}

pub fn muted() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

/// `[n]`-style key hints.
pub fn key_hint() -> Style {
    Style::default().fg(SCREEN_GLOW)
}

/// `87% match`, colored by tier.
pub fn match_badge(percent: u8) -> Style {
    Style::default()
        .fg(match_color(percent))
        .add_modifier(Modifier::BOLD)
}

fn badge(bg: Color) -> Style {
    Style::default()
        .fg(AUDITORIUM)
        .bg(bg)
        .add_modifier(Modifier::BOLD)
}

/// ` CINEMATCH ` in the status bar.
pub fn brand_badge() -> Style {
    badge(MARQUEE)
}

/// ` FETCHING ` in the status bar.
pub fn loading_badge() -> Style {
    badge(SCREEN_GLOW)
}

pub fn block_focused(title: &str) -> Block<'_> {
    pane(title, border_focused())
}

pub fn block_default(title: &str) -> Block<'_> {
    pane(title, border_default())
}

fn pane(title: &str, border: Style) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border)
}
