//! Headless mode - one load, printed as a JSON snapshot
//!
//! Performs a single load of the requested view, applies the filter, sort
//! and page options, and serializes the visible page with its statistics.
//! Useful for scripting and CI checks where a terminal is not available.
//!
//! # Example Output
//!
//! ```json
//! {"view":"results","scope":null,"page":1,"page_count":1,"filtered":1,
//!  "stats":{"total":1,"passed":0,"failed":1,...},"rows":[{"id":2,"status":"FAIL"}]}
//! ```

use std::time::Duration;

use serde::Serialize;

use qadash_app::{Engine, ExplorerState, Settings};
use qadash_client::CollectionSource;
use qadash_core::prelude::*;
use qadash_core::{parse_date, DateRange, ExplorerStats, Record, StatusFilter, ViewRoute};

/// Extra time allowed on top of the request timeout before giving up.
const SETTLE_MARGIN: Duration = Duration::from_secs(1);

/// Filter, sort and page selection applied to the loaded collection
#[derive(Debug, Clone, Default)]
pub struct SnapshotOptions {
    pub search: Option<String>,
    pub status: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub sort: Option<String>,
    pub page: Option<usize>,
}

impl SnapshotOptions {
    /// Apply the options to a loaded explorer.
    ///
    /// Filters go first since they reset the page.
    pub fn apply(&self, explorer: &mut ExplorerState) -> Result<()> {
        if let Some(text) = &self.search {
            explorer.set_search(text.trim());
        }
        if let Some(status) = &self.status {
            explorer.set_status_filter(StatusFilter::from_input(status));
        }
        if self.from.is_some() || self.to.is_some() {
            let start = self.from.as_deref().map(parse_date).transpose()?;
            let end = self.to.as_deref().map(parse_date).transpose()?;
            explorer.set_date_range(DateRange::new(start, end));
        }
        if let Some(key) = &self.sort {
            if explorer.sort().key != *key {
                explorer.set_sort(key);
            }
        }
        if let Some(page) = self.page {
            explorer.set_page(page);
        }
        Ok(())
    }
}

/// The visible page of one view
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub view: String,
    pub scope: Option<String>,
    pub page: usize,
    pub page_count: usize,
    pub filtered: usize,
    pub stats: ExplorerStats,
    pub rows: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Snapshot {
    pub fn from_explorer(view: &str, explorer: &ExplorerState) -> Self {
        Self {
            view: view.to_string(),
            scope: explorer.scope().map(str::to_string),
            page: explorer.page_number(),
            page_count: explorer.page_count(),
            filtered: explorer.filtered_count(),
            stats: explorer.compute_stats(),
            rows: explorer.page_rows().into_iter().cloned().collect(),
            error: explorer.last_error().map(str::to_string),
        }
    }

    /// Whether the load behind this snapshot failed
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Load `route` from the configured backend and build its snapshot
pub async fn run_headless(
    settings: Settings,
    route: ViewRoute,
    options: &SnapshotOptions,
) -> Result<Snapshot> {
    info!("headless snapshot of {}", route);
    let limit = settings.server.timeout() + SETTLE_MARGIN;
    let mut engine = Engine::new(settings)?;
    snapshot(&mut engine, route, options, limit).await
}

/// Drive `engine` through one load of `route` and capture the result
pub async fn snapshot<S>(
    engine: &mut Engine<S>,
    route: ViewRoute,
    options: &SnapshotOptions,
    limit: Duration,
) -> Result<Snapshot>
where
    S: CollectionSource + Send + Sync + 'static,
{
    let view = route.view;
    engine.start(route);
    if !engine.settle(limit).await {
        engine.shutdown();
        return Err(Error::transport(format!(
            "no response from backend within {limit:?}"
        )));
    }
    engine.shutdown();

    let explorer = engine.state.explorer_mut(view);
    options
        .apply(explorer)
        .with_context(|| format!("Invalid snapshot options for {view}"))?;
    Ok(Snapshot::from_explorer(&view.to_string(), explorer))
}
