//! View schemas
//!
//! Every explorer view is the same component configured by a [`ViewSchema`]:
//! which endpoint it reads, which field identifies a record, which fields are
//! searchable, where status and timestamps live, and which columns to show.

use std::fmt;
use std::str::FromStr;

use crate::sort::SortDirection;

/// The built-in explorer views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub enum ViewKind {
    /// Individual test results (optionally scoped to one run).
    #[default]
    Results,
    /// Test run history (optionally scoped to one application).
    Runs,
    /// Device inventory.
    Devices,
}

impl ViewKind {
    pub const ALL: [ViewKind; 3] = [ViewKind::Results, ViewKind::Runs, ViewKind::Devices];

    pub fn schema(self) -> &'static ViewSchema {
        match self {
            ViewKind::Results => &RESULTS_SCHEMA,
            ViewKind::Runs => &RUNS_SCHEMA,
            ViewKind::Devices => &DEVICES_SCHEMA,
        }
    }

    pub fn label(self) -> &'static str {
        self.schema().title
    }

    /// Position in [`ViewKind::ALL`].
    pub fn index(self) -> usize {
        match self {
            ViewKind::Results => 0,
            ViewKind::Runs => 1,
            ViewKind::Devices => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKind::Results => write!(f, "results"),
            ViewKind::Runs => write!(f, "runs"),
            ViewKind::Devices => write!(f, "devices"),
        }
    }
}

impl FromStr for ViewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "results" | "result" | "tests" => Ok(ViewKind::Results),
            "runs" | "run" => Ok(ViewKind::Runs),
            "devices" | "device" => Ok(ViewKind::Devices),
            other => Err(format!(
                "unknown view '{other}' (expected results, runs or devices)"
            )),
        }
    }
}

/// One table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Record field rendered in this column.
    pub field: &'static str,
    /// Header label.
    pub label: &'static str,
    /// Width in terminal cells. The last column takes the remaining space.
    pub width: u16,
}

impl ColumnSpec {
    const fn new(field: &'static str, label: &'static str, width: u16) -> Self {
        Self {
            field,
            label,
            width,
        }
    }
}

/// Static configuration of one explorer view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSchema {
    pub kind: ViewKind,
    pub title: &'static str,
    /// Collection path, relative to the server base URL.
    pub collection_path: &'static str,
    /// Path a scope id is appended to. `None` when the view cannot be scoped.
    pub scoped_path: Option<&'static str>,
    /// Label of the scope id shown in the header (`run`, `app`).
    pub scope_label: &'static str,
    /// Path a record id is appended to for the secondary detail fetch.
    pub detail_path: Option<&'static str>,
    pub id_field: &'static str,
    /// Fields searched by the free-text filter.
    pub text_fields: &'static [&'static str],
    pub status_field: &'static str,
    pub pass_value: &'static str,
    pub fail_value: &'static str,
    /// Secondary exact-match filter field (suite, trigger, device type).
    pub facet_field: Option<&'static str>,
    pub timestamp_field: &'static str,
    /// Field averaged in the summary header.
    pub numeric_field: Option<&'static str>,
    pub numeric_label: &'static str,
    pub default_sort_key: &'static str,
    /// Direction adopted whenever a new sort key is selected.
    pub default_direction: SortDirection,
    pub columns: &'static [ColumnSpec],
}

impl ViewSchema {
    /// Index of the column displaying `field`.
    pub fn column_index(&self, field: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.field == field)
    }

    /// Whether `field` is one of this view's columns.
    pub fn is_sortable(&self, field: &str) -> bool {
        self.column_index(field).is_some()
    }
}

pub static RESULTS_SCHEMA: ViewSchema = ViewSchema {
    kind: ViewKind::Results,
    title: "Test Results",
    collection_path: "api/v1/test",
    scoped_path: Some("api/v1/test"),
    scope_label: "run",
    detail_path: None,
    id_field: "id",
    text_fields: &["name", "message"],
    status_field: "status",
    pass_value: "PASS",
    fail_value: "FAIL",
    facet_field: Some("suite"),
    timestamp_field: "startTime",
    numeric_field: Some("duration"),
    numeric_label: "Avg duration (s)",
    default_sort_key: "id",
    default_direction: SortDirection::Ascending,
    columns: &[
        ColumnSpec::new("id", "ID", 7),
        ColumnSpec::new("status", "Status", 8),
        ColumnSpec::new("duration", "Duration", 10),
        ColumnSpec::new("suite", "Suite", 18),
        ColumnSpec::new("startTime", "Started", 21),
        ColumnSpec::new("name", "Name", 0),
    ],
};

pub static RUNS_SCHEMA: ViewSchema = ViewSchema {
    kind: ViewKind::Runs,
    title: "Test Runs",
    collection_path: "api/v1/test/run",
    scoped_path: Some("api/v1/test/run/app"),
    scope_label: "app",
    detail_path: None,
    id_field: "id",
    text_fields: &["runId", "triggeredBy", "suite"],
    status_field: "status",
    pass_value: "Passed",
    fail_value: "Failed",
    facet_field: Some("triggeredBy"),
    timestamp_field: "runDate",
    numeric_field: Some("total"),
    numeric_label: "Avg tests/run",
    default_sort_key: "runDate",
    default_direction: SortDirection::Descending,
    columns: &[
        ColumnSpec::new("runId", "Run ID", 18),
        ColumnSpec::new("runDate", "Run Date", 12),
        ColumnSpec::new("createdAt", "Started", 21),
        ColumnSpec::new("endedAt", "Ended", 21),
        ColumnSpec::new("status", "Status", 9),
        ColumnSpec::new("triggeredBy", "Triggered By", 0),
    ],
};

pub static DEVICES_SCHEMA: ViewSchema = ViewSchema {
    kind: ViewKind::Devices,
    title: "Devices",
    collection_path: "api/v1/device",
    scoped_path: None,
    scope_label: "",
    detail_path: Some("api/v1/device"),
    id_field: "id",
    text_fields: &["name", "manufacturer", "serialNumber", "os"],
    status_field: "status",
    pass_value: "Available",
    fail_value: "Checked Out",
    facet_field: Some("type"),
    timestamp_field: "last_checkout",
    numeric_field: None,
    numeric_label: "",
    default_sort_key: "name",
    default_direction: SortDirection::Ascending,
    columns: &[
        ColumnSpec::new("id", "ID", 6),
        ColumnSpec::new("name", "Name", 22),
        ColumnSpec::new("type", "Type", 12),
        ColumnSpec::new("os", "OS", 12),
        ColumnSpec::new("status", "Status", 13),
        ColumnSpec::new("manufacturer", "Manufacturer", 0),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_cycle_wraps() {
        assert_eq!(ViewKind::Results.next(), ViewKind::Runs);
        assert_eq!(ViewKind::Devices.next(), ViewKind::Results);
        assert_eq!(ViewKind::Results.prev(), ViewKind::Devices);
    }

    #[test]
    fn test_view_kind_parse() {
        assert_eq!("Runs".parse::<ViewKind>(), Ok(ViewKind::Runs));
        assert_eq!("device".parse::<ViewKind>(), Ok(ViewKind::Devices));
        assert!("charts".parse::<ViewKind>().is_err());
    }

    #[test]
    fn test_schema_kinds_match() {
        for kind in ViewKind::ALL {
            assert_eq!(kind.schema().kind, kind);
        }
    }

    #[test]
    fn test_default_sort_keys_are_columns() {
        for kind in ViewKind::ALL {
            let schema = kind.schema();
            assert!(
                schema.is_sortable(schema.default_sort_key),
                "{kind} default sort key must be a column"
            );
        }
    }

    #[test]
    fn test_runs_default_to_most_recent_first() {
        assert_eq!(
            RUNS_SCHEMA.default_direction,
            SortDirection::Descending
        );
        assert_eq!(
            RESULTS_SCHEMA.default_direction,
            SortDirection::Ascending
        );
    }
}
