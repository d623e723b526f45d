//! # qadash-core - Core Domain Types
//!
//! Foundation crate for qadash. Provides records, view schemas, the pure
//! filter/sort/page/stats pipeline, error handling, and logging setup.
//!
//! This crate has **zero internal dependencies** and performs no I/O apart
//! from log file setup.
//!
//! ## Public API
//!
//! ### Records (`record`)
//! - [`Record`] - One JSON object from a backend collection
//! - [`decode_records()`] - Validate a collection body (array, objects, ids)
//! - [`parse_timestamp()`] - Parse the timestamp shapes the backend emits
//!
//! ### Views (`schema`, `types`)
//! - [`ViewKind`], [`ViewSchema`] - The built-in views and their configuration
//! - [`LoadPhase`], [`RequestToken`], [`ViewRoute`]
//!
//! ### Pipeline (`filter`, `sort`, `page`, `stats`)
//! - [`FilterCriteria`], [`StatusFilter`], [`DateRange`]
//! - [`SortConfig`], [`SortDirection`]
//! - [`Page`]
//! - [`ExplorerStats`]
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum; `is_load_failure` marks the backend load taxonomy
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! ```rust
//! use qadash_core::prelude::*;
//! ```

pub mod error;
pub mod filter;
pub mod logging;
pub mod page;
pub mod record;
pub mod schema;
pub mod sort;
pub mod stats;
pub mod types;

/// Prelude for common imports used throughout all qadash crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use filter::{distinct_values, parse_date, DateRange, FilterCriteria, StatusFilter};
pub use page::{Page, DEFAULT_PAGE_SIZE};
pub use record::{decode_records, parse_timestamp, value_text, Record, RecordId, PLACEHOLDER};
pub use schema::{ColumnSpec, ViewKind, ViewSchema, DEVICES_SCHEMA, RESULTS_SCHEMA, RUNS_SCHEMA};
pub use sort::{compare_values, SortConfig, SortDirection};
pub use stats::ExplorerStats;
pub use types::{LoadPhase, RequestToken, ViewRoute};
