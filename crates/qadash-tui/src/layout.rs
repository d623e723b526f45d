//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + tabs row + bottom border
const HEADER_HEIGHT: u16 = 3;

/// Footer height: top border + page/hint row
const FOOTER_HEIGHT: u16 = 2;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// View tabs and current scope
    pub header: Rect,

    /// Active filters, or the text being typed in an input mode
    pub filters: Rect,

    /// Summary statistics of the filtered records
    pub stats: Rect,

    /// Load error banner, only while an error is shown
    pub error: Option<Rect>,

    /// Record table (remaining space)
    pub table: Rect,

    /// Page indicator, key hints and status message
    pub footer: Rect,
}

/// Create the main screen layout
///
/// # Arguments
/// * `area` - Total screen area
/// * `show_error` - Reserve a row for the error banner
pub fn create(area: Rect, show_error: bool) -> ScreenAreas {
    let error_height = u16::from(show_error);
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(error_height),
        Constraint::Min(3),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        filters: chunks[1],
        stats: chunks[2],
        error: show_error.then_some(chunks[3]),
        table: chunks[4],
        footer: chunks[5],
    }
}
