//! Load error banner

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

/// One-row banner for the active view's last load error. Records loaded
/// before the failure stay visible in the table below it.
pub struct ErrorBanner<'a> {
    message: &'a str,
}

impl<'a> ErrorBanner<'a> {
    pub fn new(message: &'a str) -> Self {
        Self { message }
    }
}

impl Widget for ErrorBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let bg = Style::default().bg(palette::ERROR_BG);
        let line = Line::from(vec![
            Span::styled(
                " ✗ ",
                styles::status_red().add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.message.to_string(), styles::text_primary()),
            Span::styled("  r", styles::keybinding()),
            Span::styled(" retry ", styles::text_secondary()),
            Span::styled("x", styles::keybinding()),
            Span::styled(" dismiss", styles::text_secondary()),
        ]);
        Paragraph::new(line).style(bg).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};

    #[test]
    fn test_banner_shows_message_and_hints() {
        let buf = render_widget(
            ErrorBanner::new("HTTP error 500: Internal Server Error"),
            100,
            1,
        );
        let text = buffer_text(&buf);
        assert!(text.contains("HTTP error 500"));
        assert!(text.contains("retry"));
        assert!(text.contains("dismiss"));
    }
}
