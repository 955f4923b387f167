//! Semantic style builders

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};
use simcon_core::{EventType, RunStatus};

use super::palette;

// --- Text styles ---
pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn value_bold() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .add_modifier(Modifier::BOLD)
}

// --- Accent styles ---
pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn error_text() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn warning_text() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

// --- Key hints ---
/// Key of an available binding
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Key of a binding that is currently rejected
pub fn keybinding_disabled() -> Style {
    Style::default()
        .fg(palette::TEXT_MUTED)
        .add_modifier(Modifier::DIM)
}

// --- Selection ---
pub fn selected_row() -> Style {
    Style::default()
        .bg(palette::SELECTED_BG)
        .add_modifier(Modifier::BOLD)
}

/// "Black on Cyan" - focused button
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Focused button of a destructive choice
pub fn focused_destructive() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::STATUS_RED)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            palette::BORDER_ACTIVE
        } else {
            palette::BORDER_DIM
        }))
        .style(Style::default().bg(palette::CARD_BG))
}

pub fn modal_block(destructive: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if destructive {
            palette::STATUS_RED
        } else {
            palette::BORDER_ACTIVE
        }))
        .style(Style::default().bg(palette::POPUP_BG))
}

// --- Status indicators ---
/// Icon, label and style for a run status badge
pub fn run_status_indicator(status: Option<RunStatus>) -> (&'static str, &'static str, Style) {
    match status {
        Some(RunStatus::Running) => ("●", "running", Style::default().fg(palette::STATUS_GREEN)),
        Some(RunStatus::Stopped) => ("○", "stopped", Style::default().fg(palette::TEXT_SECONDARY)),
        Some(RunStatus::Error) => ("✗", "error", Style::default().fg(palette::STATUS_RED)),
        Some(RunStatus::Unknown) => ("?", "unknown", Style::default().fg(palette::STATUS_YELLOW)),
        None => ("…", "loading", text_muted()),
    }
}

/// Badge color for an activity event category
pub fn event_type_style(event_type: &EventType) -> Style {
    let color = match event_type {
        EventType::Generation | EventType::Start => palette::STATUS_GREEN,
        EventType::Stop | EventType::GapFill => palette::STATUS_BLUE,
        EventType::Error => palette::STATUS_RED,
        EventType::ConfigChange | EventType::Reset => palette::STATUS_INDIGO,
        EventType::Other(_) => palette::TEXT_SECONDARY,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}
