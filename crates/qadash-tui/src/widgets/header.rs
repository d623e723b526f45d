//! Header bar: app title, view tabs and the active route's scope

use qadash_core::{ViewKind, ViewRoute};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{palette, styles};

/// Main header showing the view tabs, scope and polling indicator
pub struct ViewHeader<'a> {
    route: &'a ViewRoute,
    polling: bool,
}

impl<'a> ViewHeader<'a> {
    pub fn new(route: &'a ViewRoute) -> Self {
        Self {
            route,
            polling: false,
        }
    }

    /// Show the polling indicator for the active view
    pub fn polling(mut self, polling: bool) -> Self {
        self.polling = polling;
        self
    }

    fn build_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::styled(" qadash ", styles::accent_bold()), Span::raw(" ")];

        for (i, kind) in ViewKind::ALL.iter().enumerate() {
            let label = format!(" {} {} ", i + 1, kind.label());
            let style = if *kind == self.route.view {
                styles::focused_selected()
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::raw(" "));
        }

        if let Some(scope) = &self.route.scope {
            let label = self.route.view.schema().scope_label;
            spans.push(Span::styled("│ ", styles::text_muted()));
            spans.push(Span::styled(format!("{label} "), styles::text_secondary()));
            spans.push(Span::styled(scope.clone(), styles::accent()));
            spans.push(Span::raw(" "));
        }

        if self.polling {
            spans.push(Span::styled("│ ", styles::text_muted()));
            spans.push(Span::styled(
                "⟳ polling",
                Style::default().fg(palette::STATUS_BLUE),
            ));
        }

        spans
    }
}

impl Widget for ViewHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        Paragraph::new(Line::from(self.build_spans())).render(inner, buf);
    }
}
