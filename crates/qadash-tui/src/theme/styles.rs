//! Semantic style builders.

use qadash_core::{LoadPhase, ViewSchema};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

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

// --- Border styles ---
pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

// --- Accent styles ---
pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn accent_bold() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

// --- Status styles ---
pub fn status_green() -> Style {
    Style::default().fg(palette::STATUS_GREEN)
}

pub fn status_red() -> Style {
    Style::default().fg(palette::STATUS_RED)
}

pub fn status_yellow() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Key names in hint lines
pub fn keybinding() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// "Black on Cyan" - active tab
pub fn focused_selected() -> Style {
    Style::default()
        .fg(palette::CONTRAST_FG)
        .bg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Row under the cursor
pub fn selected_row() -> Style {
    Style::default()
        .bg(palette::SELECTED_ROW_BG)
        .add_modifier(Modifier::BOLD)
}

// --- Block builders ---
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
}

/// Color a status cell: pass values green, fail values red.
pub fn record_status(schema: &ViewSchema, value: &str) -> Style {
    if value.eq_ignore_ascii_case(schema.pass_value) {
        status_green()
    } else if value.eq_ignore_ascii_case(schema.fail_value) {
        status_red()
    } else {
        text_primary()
    }
}

/// Indicator glyph, label and style for a load phase.
pub fn phase_indicator(phase: LoadPhase) -> (&'static str, &'static str, Style) {
    match phase {
        LoadPhase::Idle => ("○", "Idle", text_muted()),
        LoadPhase::Loading => ("↻", "Loading", status_yellow()),
        LoadPhase::Ready => ("●", "Ready", status_green()),
        LoadPhase::Error => ("✗", "Error", status_red()),
    }
}
