//! Filter bar: active criteria and sort, or the text being typed

use qadash_app::{ExplorerState, UiMode};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

/// Text being edited in an input mode
#[derive(Debug, Clone, Copy)]
pub struct InputLine<'a> {
    pub mode: UiMode,
    pub buffer: &'a str,
    pub error: Option<&'a str>,
}

/// One-row summary of the active view's filters, or the input prompt
pub struct FilterBar<'a> {
    explorer: &'a ExplorerState,
    input: Option<InputLine<'a>>,
}

impl<'a> FilterBar<'a> {
    pub fn new(explorer: &'a ExplorerState) -> Self {
        Self {
            explorer,
            input: None,
        }
    }

    /// Replace the summary with an input prompt (ignored in normal mode)
    pub fn input(mut self, mode: UiMode, buffer: &'a str, error: Option<&'a str>) -> Self {
        if mode != UiMode::Normal {
            self.input = Some(InputLine {
                mode,
                buffer,
                error,
            });
        }
        self
    }

    fn input_spans(input: InputLine<'_>) -> Vec<Span<'static>> {
        let prompt = match input.mode {
            UiMode::DateInput => " Dates (YYYY-MM-DD..YYYY-MM-DD): ",
            _ => " Search: ",
        };
        let mut spans = vec![
            Span::styled(prompt, styles::keybinding()),
            Span::styled(input.buffer.to_string(), styles::text_primary()),
            Span::styled("█", styles::accent()),
        ];
        if let Some(error) = input.error {
            spans.push(Span::styled(format!("  {error}"), styles::status_red()));
        } else {
            spans.push(Span::styled("  Enter apply · Esc cancel", styles::text_muted()));
        }
        spans
    }

    fn summary_spans(&self) -> Vec<Span<'static>> {
        let criteria = self.explorer.criteria();
        let schema = self.explorer.schema;
        let separator = || Span::styled(" │ ", styles::text_muted());
        let value_style = |active: bool| {
            if active {
                styles::accent()
            } else {
                styles::text_secondary()
            }
        };

        let search = if criteria.text.is_empty() {
            "-".to_string()
        } else {
            format!("\"{}\"", criteria.text)
        };
        let mut spans = vec![
            Span::styled(" Search ", styles::text_muted()),
            Span::styled(search, value_style(!criteria.text.is_empty())),
            separator(),
            Span::styled("Status ", styles::text_muted()),
            Span::styled(
                criteria.status.to_string(),
                value_style(!criteria.status.is_all()),
            ),
        ];

        if let Some(field) = schema.facet_field {
            spans.push(separator());
            spans.push(Span::styled(format!("{field} "), styles::text_muted()));
            spans.push(Span::styled(
                criteria.facet.to_string(),
                value_style(!criteria.facet.is_all()),
            ));
        }

        let dates = if criteria.date_range.is_unbounded() {
            "any".to_string()
        } else {
            criteria.date_range.to_string()
        };
        spans.push(separator());
        spans.push(Span::styled("Dates ", styles::text_muted()));
        spans.push(Span::styled(
            dates,
            value_style(!criteria.date_range.is_unbounded()),
        ));

        let sort = self.explorer.sort();
        spans.push(separator());
        spans.push(Span::styled("Sort ", styles::text_muted()));
        spans.push(Span::styled(
            format!("{} {}", sort.key, sort.direction.arrow()),
            styles::text_secondary(),
        ));
        spans
    }
}

impl Widget for FilterBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let spans = match self.input {
            Some(input) => Self::input_spans(input),
            None => self.summary_spans(),
        };
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{buffer_text, render_widget};
    use qadash_core::{DateRange, StatusFilter, RESULTS_SCHEMA};

    #[test]
    fn test_summary_defaults() {
        let explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        let text = buffer_text(&render_widget(FilterBar::new(&explorer), 120, 1));
        assert!(text.contains("Status all"), "{text}");
        assert!(text.contains("Dates any"));
        assert!(text.contains("Sort id ▲"));
    }

    #[test]
    fn test_summary_shows_active_filters() {
        let mut explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        explorer.set_search("login");
        explorer.set_status_filter(StatusFilter::Only("FAIL".into()));
        explorer.set_date_range(DateRange::parse("2024-01-01..").unwrap());

        let text = buffer_text(&render_widget(FilterBar::new(&explorer), 120, 1));
        assert!(text.contains("\"login\""));
        assert!(text.contains("Status FAIL"));
        assert!(text.contains("2024-01-01.."));
    }

    #[test]
    fn test_input_prompt_replaces_summary() {
        let explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        let bar = FilterBar::new(&explorer).input(UiMode::SearchInput, "log", None);
        let text = buffer_text(&render_widget(bar, 80, 1));
        assert!(text.contains("Search: log"));
        assert!(!text.contains("Status"));
    }

    #[test]
    fn test_input_error_is_shown() {
        let explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        let bar = FilterBar::new(&explorer).input(
            UiMode::DateInput,
            "soon",
            Some("Invalid date 'soon': expected YYYY-MM-DD"),
        );
        let text = buffer_text(&render_widget(bar, 120, 1));
        assert!(text.contains("Invalid date"));
    }
}
