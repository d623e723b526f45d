//! # Explorer State
//!
//! One instance per view. Owns the loaded record collection, the load
//! lifecycle (phase, request tokens, last error), and every piece of UI
//! interaction state: filter criteria, sort, page, row cursor, expanded
//! rows, and the per-record detail cache.
//!
//! The filtered/sorted/paginated view is derived on demand and never
//! written back into `records`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Local};
use qadash_core::prelude::*;
use qadash_core::{
    distinct_values, DateRange, ExplorerStats, FilterCriteria, LoadPhase, Page, Record, RecordId,
    RequestToken, SortConfig, StatusFilter, ViewSchema,
};
use serde_json::Value;

/// Secondary detail of one expanded record.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Value),
    Failed(String),
}

/// Per-view explorer state.
#[derive(Debug)]
pub struct ExplorerState {
    pub schema: &'static ViewSchema,
    /// Parent entity narrowing the collection (run id, app id).
    scope: Option<String>,
    records: Vec<Record>,
    phase: LoadPhase,
    /// User-visible message from the last failed load.
    last_error: Option<String>,
    /// Most recently issued token.
    latest_token: RequestToken,
    /// Token of the load still awaiting its response.
    in_flight: Option<RequestToken>,
    /// Local time of the last successful load.
    loaded_at: Option<DateTime<Local>>,
    criteria: FilterCriteria,
    sort: SortConfig,
    page: Page,
    /// Row index within the current page.
    cursor: usize,
    expanded: HashSet<RecordId>,
    details: HashMap<RecordId, DetailState>,
}

impl ExplorerState {
    pub fn new(schema: &'static ViewSchema, page_size: usize) -> Self {
        Self {
            schema,
            scope: None,
            records: Vec::new(),
            phase: LoadPhase::Idle,
            last_error: None,
            latest_token: RequestToken::default(),
            in_flight: None,
            loaded_at: None,
            criteria: FilterCriteria::default(),
            sort: SortConfig::new(schema.default_sort_key, schema.default_direction),
            page: Page::new(page_size),
            cursor: 0,
            expanded: HashSet::new(),
            details: HashMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────
    // Load lifecycle
    // ─────────────────────────────────────────────────────────

    /// Start a load. Any earlier in-flight load is superseded.
    pub fn begin_load(&mut self) -> RequestToken {
        self.latest_token = self.latest_token.next();
        if let Some(previous) = self.in_flight.replace(self.latest_token) {
            debug!(
                view = %self.schema.kind,
                "load {} superseded by {}", previous, self.latest_token
            );
        }
        self.phase = LoadPhase::Loading;
        self.latest_token
    }

    /// Apply the response of a load. Returns `false` when `token` is stale
    /// and the response was discarded.
    pub fn complete_load(
        &mut self,
        token: RequestToken,
        result: std::result::Result<Vec<Record>, String>,
    ) -> bool {
        if self.in_flight != Some(token) {
            debug!(
                view = %self.schema.kind,
                "discarding stale response {} (latest {})", token, self.latest_token
            );
            return false;
        }
        self.in_flight = None;

        match result {
            Ok(records) => {
                info!(view = %self.schema.kind, count = records.len(), "collection loaded");
                self.records = records;
                self.phase = LoadPhase::Ready;
                self.last_error = None;
                self.loaded_at = Some(Local::now());
                self.clamp_position();
            }
            Err(message) => {
                warn!(view = %self.schema.kind, "load failed: {}", message);
                self.phase = LoadPhase::Error;
                self.last_error = Some(message);
            }
        }
        true
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Hide the error banner. The phase returns to `Ready` once data has
    /// ever loaded, otherwise to `Idle`.
    pub fn dismiss_error(&mut self) {
        self.last_error = None;
        if self.phase == LoadPhase::Error {
            self.phase = if self.loaded_at.is_some() {
                LoadPhase::Ready
            } else {
                LoadPhase::Idle
            };
        }
    }

    pub fn loaded_at(&self) -> Option<DateTime<Local>> {
        self.loaded_at
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Point the explorer at a different collection.
    ///
    /// Records, expansion and details belong to the old collection and are
    /// cleared; filters and sort are kept. Returns `false` if unchanged.
    pub fn set_scope(&mut self, scope: Option<String>) -> bool {
        if self.scope == scope {
            return false;
        }
        self.scope = scope;
        self.records.clear();
        self.expanded.clear();
        self.details.clear();
        self.in_flight = None;
        self.loaded_at = None;
        self.last_error = None;
        self.phase = LoadPhase::Idle;
        self.page.first();
        self.cursor = 0;
        true
    }

    /// All loaded records, in collection order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    // ─────────────────────────────────────────────────────────
    // Filtering
    // ─────────────────────────────────────────────────────────

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.reset_position();
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.criteria.text = text.into();
        self.reset_position();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.criteria.status = status;
        self.reset_position();
    }

    pub fn set_facet_filter(&mut self, facet: StatusFilter) {
        self.criteria.facet = facet;
        self.reset_position();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.criteria.date_range = range;
        self.reset_position();
    }

    pub fn clear_filters(&mut self) {
        self.set_filter(FilterCriteria::default());
    }

    /// Advance the status filter through the statuses present in the data.
    pub fn cycle_status_filter(&mut self) {
        let options = distinct_values(&self.records, self.schema.status_field);
        let next = self.criteria.status.cycle(&options);
        self.set_status_filter(next);
    }

    /// Advance the facet filter through the facet values present in the data.
    pub fn cycle_facet_filter(&mut self) {
        let Some(field) = self.schema.facet_field else {
            return;
        };
        let options = distinct_values(&self.records, field);
        let next = self.criteria.facet.cycle(&options);
        self.set_facet_filter(next);
    }

    // ─────────────────────────────────────────────────────────
    // Sorting
    // ─────────────────────────────────────────────────────────

    pub fn sort(&self) -> &SortConfig {
        &self.sort
    }

    /// Sort by `key`: flips direction when already active, otherwise adopts
    /// the view's default direction.
    pub fn set_sort(&mut self, key: &str) {
        self.sort.toggle(key, self.schema.default_direction);
        self.reset_position();
    }

    /// Move the sort key to the next (`forward`) or previous column.
    pub fn cycle_sort_column(&mut self, forward: bool) {
        let columns = self.schema.columns;
        if columns.is_empty() {
            return;
        }
        let next = match self.schema.column_index(&self.sort.key) {
            Some(i) if forward => (i + 1) % columns.len(),
            Some(i) => (i + columns.len() - 1) % columns.len(),
            None => 0,
        };
        self.set_sort(columns[next].field);
    }

    // ─────────────────────────────────────────────────────────
    // Derived view
    // ─────────────────────────────────────────────────────────

    /// Indices of the filtered records in sorted order.
    pub fn visible_indices(&self) -> Vec<usize> {
        let mut indices = self.criteria.apply(&self.records, self.schema);
        self.sort.sort_indices(&self.records, &mut indices);
        indices
    }

    pub fn filtered_count(&self) -> usize {
        self.criteria.apply(&self.records, self.schema).len()
    }

    /// Records on the current page, in display order.
    pub fn page_rows(&self) -> Vec<&Record> {
        let indices = self.visible_indices();
        let range = self.page.range(indices.len());
        indices[range].iter().map(|&i| &self.records[i]).collect()
    }

    /// Statistics over the filtered (not paginated) records.
    pub fn compute_stats(&self) -> ExplorerStats {
        let indices = self.criteria.apply(&self.records, self.schema);
        ExplorerStats::compute(indices.iter().map(|&i| &self.records[i]), self.schema)
    }

    // ─────────────────────────────────────────────────────────
    // Paging
    // ─────────────────────────────────────────────────────────

    pub fn page_number(&self) -> usize {
        self.page.number()
    }

    pub fn page_size(&self) -> usize {
        self.page.size()
    }

    pub fn page_count(&self) -> usize {
        self.page.page_count(self.filtered_count())
    }

    /// Jump to page `n`, clamped into `[1, page_count]`.
    pub fn set_page(&mut self, n: usize) -> usize {
        let total = self.filtered_count();
        self.cursor = 0;
        self.page.set(n, total)
    }

    pub fn next_page(&mut self) -> usize {
        self.set_page(self.page.number().saturating_add(1))
    }

    pub fn prev_page(&mut self) -> usize {
        self.set_page(self.page.number().saturating_sub(1))
    }

    pub fn first_page(&mut self) -> usize {
        self.set_page(1)
    }

    pub fn last_page(&mut self) -> usize {
        self.set_page(usize::MAX)
    }

    // ─────────────────────────────────────────────────────────
    // Row cursor
    // ─────────────────────────────────────────────────────────

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let rows = self.page_row_count();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    /// Record under the cursor, if the page has any rows.
    pub fn selected_record(&self) -> Option<&Record> {
        self.page_rows().get(self.cursor).copied()
    }

    /// Identifier of the record under the cursor.
    pub fn selected_id(&self) -> Option<RecordId> {
        self.selected_record()
            .and_then(|r| r.id(self.schema.id_field))
    }

    fn page_row_count(&self) -> usize {
        self.page.range(self.filtered_count()).len()
    }

    // ─────────────────────────────────────────────────────────
    // Expansion and detail
    // ─────────────────────────────────────────────────────────

    /// Flip the expansion of `id`. Returns whether it is now expanded.
    pub fn toggle_expand(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    pub fn expanded_ids(&self) -> &HashSet<RecordId> {
        &self.expanded
    }

    pub fn detail(&self, id: &str) -> Option<&DetailState> {
        self.details.get(id)
    }

    /// Mark a detail fetch for `id` as started.
    ///
    /// Returns `false` when the view has no detail endpoint or the detail is
    /// already loaded or loading; a failed entry is retried.
    pub fn begin_detail(&mut self, id: &str) -> bool {
        if self.schema.detail_path.is_none() {
            return false;
        }
        match self.details.get(id) {
            Some(DetailState::Loading) | Some(DetailState::Loaded(_)) => false,
            Some(DetailState::Failed(_)) | None => {
                self.details.insert(id.to_string(), DetailState::Loading);
                true
            }
        }
    }

    pub fn complete_detail(&mut self, id: &str, result: std::result::Result<Value, String>) {
        let state = match result {
            Ok(value) => DetailState::Loaded(value),
            Err(message) => {
                warn!(view = %self.schema.kind, id, "detail fetch failed: {}", message);
                DetailState::Failed(message)
            }
        };
        self.details.insert(id.to_string(), state);
    }

    // ─────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────

    fn reset_position(&mut self) {
        self.page.first();
        self.cursor = 0;
    }

    fn clamp_position(&mut self) {
        let total = self.filtered_count();
        self.page.clamp(total);
        let rows = self.page.range(total).len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qadash_core::{SortDirection, DEVICES_SCHEMA, RESULTS_SCHEMA, RUNS_SCHEMA};
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .map(|v| Record::from_value(v).unwrap())
            .collect()
    }

    fn results(n: usize) -> Vec<Record> {
        records(
            (1..=n)
                .map(|i| {
                    json!({
                        "id": i,
                        "status": if i % 2 == 0 { "FAIL" } else { "PASS" },
                        "name": format!("test {i}"),
                        "duration": i as f64,
                    })
                })
                .collect(),
        )
    }

    fn loaded(schema: &'static ViewSchema, recs: Vec<Record>) -> ExplorerState {
        let mut explorer = ExplorerState::new(schema, 10);
        let token = explorer.begin_load();
        assert!(explorer.complete_load(token, Ok(recs)));
        explorer
    }

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.display("id")).collect()
    }

    #[test]
    fn test_new_explorer_is_idle_and_empty() {
        let explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        assert_eq!(explorer.phase(), LoadPhase::Idle);
        assert!(explorer.page_rows().is_empty());
        assert_eq!(explorer.page_count(), 1);
        assert_eq!(explorer.sort(), &SortConfig::new("id", SortDirection::Ascending));
    }

    #[test]
    fn test_load_success_replaces_records() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(3));
        assert_eq!(explorer.phase(), LoadPhase::Ready);
        assert_eq!(explorer.records().len(), 3);
        assert!(explorer.loaded_at().is_some());

        let token = explorer.begin_load();
        assert_eq!(explorer.phase(), LoadPhase::Loading);
        // Stale data stays visible while loading.
        assert_eq!(explorer.records().len(), 3);
        explorer.complete_load(token, Ok(results(1)));
        assert_eq!(explorer.records().len(), 1);
    }

    #[test]
    fn test_failed_load_keeps_previous_records() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(2));
        let token = explorer.begin_load();
        explorer.complete_load(token, Err("HTTP error 500: Internal Server Error".into()));

        assert_eq!(explorer.phase(), LoadPhase::Error);
        assert_eq!(explorer.records().len(), 2);
        assert!(!explorer.last_error().unwrap_or_default().is_empty());
    }

    #[test]
    fn test_stale_token_is_discarded() {
        let mut explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        let first = explorer.begin_load();
        let second = explorer.begin_load();

        assert!(!explorer.complete_load(first, Ok(results(5))));
        assert!(explorer.records().is_empty());
        assert!(explorer.is_loading());

        assert!(explorer.complete_load(second, Ok(results(2))));
        assert_eq!(explorer.records().len(), 2);
        assert!(!explorer.is_loading());
    }

    #[test]
    fn test_late_error_for_superseded_load_is_ignored() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(2));
        let old = explorer.begin_load();
        let new = explorer.begin_load();
        explorer.complete_load(new, Ok(results(3)));
        assert!(!explorer.complete_load(old, Err("timeout".into())));
        assert_eq!(explorer.phase(), LoadPhase::Ready);
        assert_eq!(explorer.last_error(), None);
    }

    #[test]
    fn test_dismiss_error() {
        let mut explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        let token = explorer.begin_load();
        explorer.complete_load(token, Err("boom".into()));
        explorer.dismiss_error();
        assert_eq!(explorer.last_error(), None);
        assert_eq!(explorer.phase(), LoadPhase::Idle);

        let mut explorer = loaded(&RESULTS_SCHEMA, results(1));
        let token = explorer.begin_load();
        explorer.complete_load(token, Err("boom".into()));
        explorer.dismiss_error();
        assert_eq!(explorer.phase(), LoadPhase::Ready);
    }

    #[test]
    fn test_status_filter_scenario() {
        let recs = records(vec![
            json!({"id": 1, "status": "PASS", "name": "a"}),
            json!({"id": 2, "status": "FAIL", "name": "b"}),
        ]);
        let mut explorer = loaded(&RESULTS_SCHEMA, recs);

        let stats = explorer.compute_stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.passed, 1);
        assert_eq!(stats.pass_rate_display(), "50.0");

        explorer.set_status_filter(StatusFilter::Only("FAIL".into()));
        assert_eq!(ids(&explorer.page_rows()), ["2"]);
        // Filtering never mutates the collection.
        assert_eq!(explorer.records().len(), 2);
    }

    #[test]
    fn test_stats_over_empty_filter_result() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(4));
        explorer.set_search("no such test");
        let stats = explorer.compute_stats();
        assert_eq!(stats.total, 0);
        assert_eq!(stats.pass_rate, 0.0);
        assert!(!stats.pass_rate.is_nan());
        assert_eq!(stats.average_display().as_deref(), Some("0.00"));
    }

    #[test]
    fn test_stats_ignore_pagination() {
        let explorer = loaded(&RESULTS_SCHEMA, results(25));
        assert_eq!(explorer.page_rows().len(), 10);
        assert_eq!(explorer.compute_stats().total, 25);
    }

    #[test]
    fn test_pagination_clamps() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(25));
        assert_eq!(explorer.page_count(), 3);
        assert_eq!(explorer.set_page(3), 3);
        assert_eq!(ids(&explorer.page_rows()), ["21", "22", "23", "24", "25"]);
        assert_eq!(explorer.next_page(), 3);
        assert_eq!(explorer.set_page(0), 1);
        assert_eq!(explorer.set_page(99), 3);
        assert_eq!(explorer.prev_page(), 2);
    }

    #[test]
    fn test_filter_and_sort_changes_reset_page() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(25));
        explorer.set_page(3);
        explorer.set_search("test");
        assert_eq!(explorer.page_number(), 1);

        explorer.set_page(2);
        explorer.set_sort("duration");
        assert_eq!(explorer.page_number(), 1);

        explorer.set_page(2);
        explorer.clear_filters();
        assert_eq!(explorer.page_number(), 1);
    }

    #[test]
    fn test_set_sort_twice_restores_order() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(5));
        let before = ids(&explorer.page_rows());
        let before_sort = explorer.sort().clone();

        explorer.set_sort("id");
        assert_eq!(ids(&explorer.page_rows()), ["5", "4", "3", "2", "1"]);
        explorer.set_sort("id");

        assert_eq!(explorer.sort(), &before_sort);
        assert_eq!(ids(&explorer.page_rows()), before);
    }

    #[test]
    fn test_new_sort_key_uses_view_default_direction() {
        let mut runs = ExplorerState::new(&RUNS_SCHEMA, 10);
        assert_eq!(runs.sort().direction, SortDirection::Descending);
        runs.set_sort("status");
        assert_eq!(runs.sort(), &SortConfig::new("status", SortDirection::Descending));

        let mut devices = ExplorerState::new(&DEVICES_SCHEMA, 10);
        devices.set_sort("type");
        assert_eq!(devices.sort().direction, SortDirection::Ascending);
    }

    #[test]
    fn test_cycle_sort_column_wraps() {
        let mut explorer = ExplorerState::new(&RESULTS_SCHEMA, 10);
        explorer.cycle_sort_column(false);
        assert_eq!(explorer.sort().key, "name");
        explorer.cycle_sort_column(true);
        assert_eq!(explorer.sort().key, "id");
    }

    #[test]
    fn test_toggle_expand_is_an_involution() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(3));
        let before = explorer.expanded_ids().clone();
        assert!(explorer.toggle_expand("2"));
        assert!(explorer.is_expanded("2"));
        assert!(!explorer.toggle_expand("2"));
        assert_eq!(explorer.expanded_ids(), &before);
    }

    #[test]
    fn test_cursor_stays_within_page() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(12));
        explorer.cursor_up();
        assert_eq!(explorer.cursor(), 0);
        for _ in 0..20 {
            explorer.cursor_down();
        }
        assert_eq!(explorer.cursor(), 9);
        assert_eq!(explorer.selected_id().as_deref(), Some("10"));

        explorer.next_page();
        assert_eq!(explorer.cursor(), 0);
        explorer.cursor_down();
        explorer.cursor_down();
        assert_eq!(explorer.cursor(), 1);
        assert_eq!(explorer.selected_id().as_deref(), Some("12"));
    }

    #[test]
    fn test_reload_with_fewer_records_clamps_page_and_cursor() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(25));
        explorer.set_page(3);
        explorer.cursor_down();
        explorer.cursor_down();

        let token = explorer.begin_load();
        explorer.complete_load(token, Ok(results(11)));
        assert_eq!(explorer.page_number(), 2);
        assert_eq!(explorer.cursor(), 0);
    }

    #[test]
    fn test_operations_accepted_while_loading() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(25));
        explorer.begin_load();
        explorer.set_status_filter(StatusFilter::Only("PASS".into()));
        explorer.set_sort("duration");
        explorer.set_page(2);
        explorer.toggle_expand("3");
        assert_eq!(explorer.phase(), LoadPhase::Loading);
        assert_eq!(explorer.page_number(), 2);
        assert_eq!(explorer.filtered_count(), 13);
    }

    #[test]
    fn test_detail_cache_lifecycle() {
        let mut explorer = loaded(&DEVICES_SCHEMA, records(vec![json!({"id": 7, "name": "Pixel"})]));
        assert!(explorer.begin_detail("7"));
        assert!(!explorer.begin_detail("7"));
        assert_eq!(explorer.detail("7"), Some(&DetailState::Loading));

        explorer.complete_detail("7", Err("HTTP error 404: gone".into()));
        assert!(explorer.begin_detail("7"));

        explorer.complete_detail("7", Ok(json!({"id": 7, "history": []})));
        assert!(!explorer.begin_detail("7"));
        assert!(matches!(explorer.detail("7"), Some(DetailState::Loaded(_))));
    }

    #[test]
    fn test_no_detail_fetch_without_endpoint() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(1));
        assert!(!explorer.begin_detail("1"));
        assert!(explorer.detail("1").is_none());
    }

    #[test]
    fn test_set_scope_clears_collection() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(3));
        explorer.toggle_expand("1");
        explorer.set_search("test");
        let pending = explorer.begin_load();

        assert!(explorer.set_scope(Some("HIS001".into())));
        assert_eq!(explorer.scope(), Some("HIS001"));
        assert!(explorer.records().is_empty());
        assert!(explorer.expanded_ids().is_empty());
        assert_eq!(explorer.phase(), LoadPhase::Idle);
        assert_eq!(explorer.criteria().text, "test");
        // A response for the old scope can no longer land.
        assert!(!explorer.complete_load(pending, Ok(results(3))));

        assert!(!explorer.set_scope(Some("HIS001".into())));
    }

    #[test]
    fn test_cycle_status_filter_uses_loaded_values() {
        let mut explorer = loaded(&RESULTS_SCHEMA, results(4));
        explorer.cycle_status_filter();
        assert_eq!(explorer.criteria().status, StatusFilter::Only("PASS".into()));
        explorer.cycle_status_filter();
        assert_eq!(explorer.criteria().status, StatusFilter::Only("FAIL".into()));
        explorer.cycle_status_filter();
        assert_eq!(explorer.criteria().status, StatusFilter::All);
    }
}
