//! Color palette.

use ratatui::style::Color;

// --- Background layers ---
pub const DEEPEST_BG: Color = Color::Black; // Terminal background
pub const CARD_BG: Color = Color::Black; // Panel/card backgrounds
pub const SELECTED_ROW_BG: Color = Color::DarkGray;
pub const DETAIL_BG: Color = Color::Rgb(22, 27, 34);
pub const ERROR_BG: Color = Color::Rgb(60, 20, 24);

// --- Borders ---
pub const BORDER_DIM: Color = Color::DarkGray;
pub const BORDER_ACTIVE: Color = Color::Cyan;

// --- Accent ---
pub const ACCENT: Color = Color::Cyan;
pub const CONTRAST_FG: Color = Color::Black; // Text on accent backgrounds

// --- Text ---
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Gray;
pub const TEXT_MUTED: Color = Color::DarkGray;
pub const TEXT_BRIGHT: Color = Color::White;

// --- Status ---
pub const STATUS_GREEN: Color = Color::Green; // Passing records
pub const STATUS_RED: Color = Color::Red; // Failing records, load errors
pub const STATUS_YELLOW: Color = Color::Yellow; // Loading, key hints
pub const STATUS_BLUE: Color = Color::Blue; // Polling indicator
