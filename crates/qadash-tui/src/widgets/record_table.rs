//! # Record Table Widget
//!
//! Renders the current page of the active explorer: a column header row
//! (with the sort arrow on the active key), one row per record, and an
//! indented detail block under every expanded record. The widget is pure;
//! paging and cursor movement belong to the handler layer.

use qadash_app::{DetailState, ExplorerState};
use qadash_core::{value_text, LoadPhase, Record};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Widget};
use serde_json::Value;

use super::truncate;
use crate::theme::{palette, styles};

/// Shown when no record passes the filters
pub const EMPTY_STATE_TEXT: &str = "No records match the current filters";

/// Expansion marker column
const GUTTER: u16 = 2;

/// Lines shown per detail block before eliding the rest
const MAX_DETAIL_LINES: usize = 12;

pub struct RecordTable<'a> {
    explorer: &'a ExplorerState,
}

impl<'a> RecordTable<'a> {
    pub fn new(explorer: &'a ExplorerState) -> Self {
        Self { explorer }
    }

    /// Column start offsets and widths for `width` cells after the gutter.
    /// The last column takes the remaining space.
    fn column_layout(&self, width: u16) -> Vec<(u16, u16)> {
        let columns = self.explorer.schema.columns;
        let mut layout = Vec::with_capacity(columns.len());
        let mut x = 0u16;
        for (i, column) in columns.iter().enumerate() {
            if x >= width {
                break;
            }
            let w = if i + 1 == columns.len() {
                width - x
            } else {
                column.width.min(width - x)
            };
            layout.push((x, w));
            x += w;
        }
        layout
    }

    fn render_column_headers(&self, area: Rect, buf: &mut Buffer) {
        let style = styles::text_muted().add_modifier(Modifier::BOLD);
        let sort = self.explorer.sort();
        let width = area.width.saturating_sub(GUTTER);

        for (column, (offset, w)) in self
            .explorer
            .schema
            .columns
            .iter()
            .zip(self.column_layout(width))
        {
            let label = if column.field == sort.key {
                format!("{} {}", column.label, sort.direction.arrow())
            } else {
                column.label.to_string()
            };
            let style = if column.field == sort.key {
                styles::accent_bold()
            } else {
                style
            };
            let text = truncate(&label, w.saturating_sub(1) as usize);
            buf.set_string(area.x + GUTTER + offset, area.y, text, style);
        }
    }

    fn render_row(
        &self,
        record: &Record,
        selected: bool,
        expanded: bool,
        y: u16,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let row_style = if selected {
            styles::selected_row()
        } else {
            Style::default()
        };
        for x in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_style(row_style).set_char(' ');
            }
        }

        let marker = if expanded { "▾" } else { "▸" };
        buf.set_string(area.x, y, marker, row_style.patch(styles::text_muted()));

        let schema = self.explorer.schema;
        let width = area.width.saturating_sub(GUTTER);
        for (column, (offset, w)) in schema.columns.iter().zip(self.column_layout(width)) {
            let value = record.display(column.field);
            let cell_style = if column.field == schema.status_field {
                styles::record_status(schema, &value)
            } else {
                styles::text_primary()
            };
            let text = truncate(&value, w.saturating_sub(1) as usize);
            buf.set_string(area.x + GUTTER + offset, y, text, row_style.patch(cell_style));
        }
    }

    /// Lines shown beneath an expanded record: the fetched detail when the
    /// view has one, then the record's own fields. Each block is capped on
    /// its own so a wide record never hides the detail.
    fn detail_lines(&self, record: &Record, id: Option<&str>) -> Vec<(String, Style)> {
        let mut lines = Vec::new();

        match id.and_then(|id| self.explorer.detail(id)) {
            Some(DetailState::Loading) => {
                lines.push(("Loading details…".to_string(), styles::status_yellow()));
            }
            Some(DetailState::Failed(message)) => {
                lines.push((
                    format!("Failed to load details: {message}"),
                    styles::status_red(),
                ));
            }
            Some(DetailState::Loaded(value)) => {
                lines.push(("details".to_string(), styles::accent()));
                push_capped(
                    &mut lines,
                    detail_value_lines(value)
                        .into_iter()
                        .map(|line| (line, styles::text_primary()))
                        .collect(),
                );
            }
            None => {}
        }

        push_capped(
            &mut lines,
            record
                .fields()
                .map(|(key, value)| {
                    (
                        format!("{key}: {}", value_text(value)),
                        styles::text_secondary(),
                    )
                })
                .collect(),
        );
        lines
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let rows = self.explorer.page_rows();
        if rows.is_empty() {
            self.render_empty(area, buf);
            return;
        }

        let id_field = self.explorer.schema.id_field;
        let detail_style = Style::default().bg(palette::DETAIL_BG);
        let mut y = area.y;

        for (index, record) in rows.iter().enumerate() {
            if y >= area.bottom() {
                break;
            }
            let id = record.id(id_field);
            let expanded = id
                .as_deref()
                .map_or(false, |id| self.explorer.is_expanded(id));
            let selected = index == self.explorer.cursor();
            self.render_row(record, selected, expanded, y, area, buf);
            y += 1;

            if !expanded {
                continue;
            }
            for (text, style) in self.detail_lines(record, id.as_deref()) {
                if y >= area.bottom() {
                    break;
                }
                for x in area.x..area.right() {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_style(detail_style).set_char(' ');
                    }
                }
                let indent = GUTTER * 2;
                let width = area.width.saturating_sub(indent) as usize;
                buf.set_string(
                    area.x + indent,
                    y,
                    truncate(&text, width),
                    detail_style.patch(style),
                );
                y += 1;
            }
        }
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        let (text, style) = if self.explorer.phase() == LoadPhase::Loading
            && self.explorer.records().is_empty()
        {
            ("Loading…", styles::status_yellow())
        } else if self.explorer.phase() == LoadPhase::Idle && self.explorer.records().is_empty() {
            ("Press r to load", styles::text_muted())
        } else {
            (EMPTY_STATE_TEXT, styles::text_muted())
        };
        let y = area.y + area.height / 2;
        Paragraph::new(Line::styled(text, style))
            .alignment(Alignment::Center)
            .render(Rect { y, height: 1, ..area }, buf);
    }
}

/// Append `block`, eliding everything past [`MAX_DETAIL_LINES`].
fn push_capped(lines: &mut Vec<(String, Style)>, mut block: Vec<(String, Style)>) {
    if block.len() > MAX_DETAIL_LINES {
        let hidden = block.len() - MAX_DETAIL_LINES;
        block.truncate(MAX_DETAIL_LINES);
        block.push((format!("… {hidden} more"), styles::text_muted()));
    }
    lines.extend(block);
}

/// Flatten a detail document into display lines.
fn detail_value_lines(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map
            .iter()
            .map(|(key, v)| format!("  {key}: {}", value_text(v)))
            .collect(),
        Value::Array(items) => items
            .iter()
            .map(|v| format!("  - {}", value_text(v)))
            .collect(),
        other => vec![format!("  {}", value_text(other))],
    }
}

impl Widget for RecordTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(" {} ", self.explorer.schema.title);
        let block = styles::glass_block(true).title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        self.render_column_headers(Rect { height: 1, ..inner }, buf);
        let data_area = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        if data_area.height > 0 {
            self.render_rows(data_area, buf);
        }
    }
}
