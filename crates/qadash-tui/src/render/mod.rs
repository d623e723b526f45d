//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use qadash_app::AppState;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::layout;
use crate::theme::palette;
use crate::widgets;

/// Render the complete UI (View function in TEA)
///
/// Pure: the filtered, sorted page is derived from the active explorer on
/// every frame and nothing is written back into state.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let explorer = state.active_explorer();
    let error = explorer.last_error();
    let areas = layout::create(area, error.is_some());

    let header =
        widgets::ViewHeader::new(&state.route).polling(state.is_polling(state.active_kind()));
    frame.render_widget(header, areas.header);

    let filters = widgets::FilterBar::new(explorer).input(
        state.ui_mode,
        &state.input_buffer,
        state.input_error.as_deref(),
    );
    frame.render_widget(filters, areas.filters);

    let stats = explorer.compute_stats();
    frame.render_widget(
        widgets::StatsBar::new(&stats, explorer.schema, explorer.phase())
            .loaded_at(explorer.loaded_at()),
        areas.stats,
    );

    if let (Some(message), Some(error_area)) = (error, areas.error) {
        frame.render_widget(widgets::ErrorBanner::new(message), error_area);
    }

    frame.render_widget(widgets::RecordTable::new(explorer), areas.table);

    let footer = widgets::Footer::new(
        explorer.page_number(),
        explorer.page_count(),
        stats.total,
        explorer.records().len(),
    )
    .mode(state.ui_mode)
    .status(state.status_message.as_deref());
    frame.render_widget(footer, areas.footer);
}
