//! Footer: page indicator, key hints and the status message

use qadash_app::UiMode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::styles;

const NORMAL_HINTS: &[(&str, &str)] = &[
    ("1-3", "view"),
    ("/", "search"),
    ("s", "status"),
    ("f", "facet"),
    ("d", "dates"),
    ("<>", "sort"),
    ("n/p", "page"),
    ("⏎", "expand"),
    ("o", "open run"),
    ("P", "poll"),
    ("T", "start run"),
    ("q", "quit"),
];

const INPUT_HINTS: &[(&str, &str)] = &[("⏎", "apply"), ("Esc", "cancel")];

pub struct Footer<'a> {
    page: usize,
    page_count: usize,
    filtered: usize,
    total: usize,
    mode: UiMode,
    status: Option<&'a str>,
}

impl<'a> Footer<'a> {
    pub fn new(page: usize, page_count: usize, filtered: usize, total: usize) -> Self {
        Self {
            page,
            page_count,
            filtered,
            total,
            mode: UiMode::Normal,
            status: None,
        }
    }

    pub fn mode(mut self, mode: UiMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }

    fn page_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![
            Span::styled(" Page ", styles::text_muted()),
            Span::styled(
                format!("{}/{}", self.page, self.page_count),
                styles::accent(),
            ),
            Span::styled(format!("  {} records", self.filtered), styles::text_secondary()),
        ];
        if self.filtered != self.total {
            spans.push(Span::styled(
                format!(" of {}", self.total),
                styles::text_muted(),
            ));
        }
        spans
    }

    fn hint_spans(&self) -> Vec<Span<'static>> {
        let hints = match self.mode {
            UiMode::Normal => NORMAL_HINTS,
            UiMode::SearchInput | UiMode::DateInput => INPUT_HINTS,
        };
        let mut spans = Vec::with_capacity(hints.len() * 2);
        for (key, action) in hints {
            spans.push(Span::styled(format!(" {key}"), styles::keybinding()));
            spans.push(Span::styled(format!(" {action}"), styles::text_muted()));
        }
        spans
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive());
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [left, right] =
            Layout::horizontal([Constraint::Length(28), Constraint::Min(0)]).areas(inner);
        Paragraph::new(Line::from(self.page_spans())).render(left, buf);

        // The status message replaces the hints until the next one.
        let line = match self.status {
            Some(status) => Line::styled(format!(" {status}"), styles::text_primary()),
            None => Line::from(self.hint_spans()),
        };
        Paragraph::new(line).render(right, buf);
    }
}
