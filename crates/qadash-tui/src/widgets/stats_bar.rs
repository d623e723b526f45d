//! Summary statistics of the filtered records

use chrono::{DateTime, Local};
use qadash_core::{ExplorerStats, LoadPhase, ViewSchema};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::styles;

pub struct StatsBar<'a> {
    stats: &'a ExplorerStats,
    schema: &'a ViewSchema,
    phase: LoadPhase,
    loaded_at: Option<DateTime<Local>>,
}

impl<'a> StatsBar<'a> {
    pub fn new(stats: &'a ExplorerStats, schema: &'a ViewSchema, phase: LoadPhase) -> Self {
        Self {
            stats,
            schema,
            phase,
            loaded_at: None,
        }
    }

    pub fn loaded_at(mut self, loaded_at: Option<DateTime<Local>>) -> Self {
        self.loaded_at = loaded_at;
        self
    }

    fn build_spans(&self) -> Vec<Span<'static>> {
        let separator = || Span::styled(" │ ", styles::text_muted());
        let (icon, label, phase_style) = styles::phase_indicator(self.phase);

        let mut spans = vec![
            Span::raw(" "),
            Span::styled(format!("{icon} {label}"), phase_style),
            separator(),
            Span::styled("Total ", styles::text_muted()),
            Span::styled(self.stats.total.to_string(), styles::text_primary()),
            separator(),
            Span::styled(format!("{} ", self.schema.pass_value), styles::text_muted()),
            Span::styled(self.stats.passed.to_string(), styles::status_green()),
            separator(),
            Span::styled(format!("{} ", self.schema.fail_value), styles::text_muted()),
            Span::styled(self.stats.failed.to_string(), styles::status_red()),
            separator(),
            Span::styled("Rate ", styles::text_muted()),
            Span::styled(
                format!("{}%", self.stats.pass_rate_display()),
                styles::accent(),
            ),
        ];

        if let Some(average) = self.stats.average_display() {
            spans.push(separator());
            spans.push(Span::styled(
                format!("{} ", self.schema.numeric_label),
                styles::text_muted(),
            ));
            spans.push(Span::styled(average, styles::text_primary()));
        }

        if let Some(at) = self.loaded_at {
            spans.push(separator());
            spans.push(Span::styled(
                format!("updated {}", at.format("%H:%M:%S")),
                styles::text_muted(),
            ));
        }
        spans
    }
}

impl Widget for StatsBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        Paragraph::new(Line::from(self.build_spans())).render(area, buf);
    }
}
