//! # Filter Criteria
//!
//! Independent predicates combined with logical AND: free-text search,
//! status and facet equality, and an inclusive calendar-date range.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{Error, Result};
use crate::record::Record;
use crate::schema::ViewSchema;

/// Sentinel accepted by [`StatusFilter::from_input`] to disable the predicate.
pub const ALL_SENTINEL: &str = "all";

/// Exact-match filter on an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Predicate disabled.
    #[default]
    All,
    /// Only records whose field equals this value.
    Only(String),
}

impl StatusFilter {
    /// Parse user input. Empty input and `all` (any case) disable the filter.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            StatusFilter::All
        } else {
            StatusFilter::Only(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, StatusFilter::All)
    }

    /// Exact, case-sensitive comparison against a field's text.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(expected) => value == Some(expected.as_str()),
        }
    }

    /// Advance through `options` in order, wrapping back to `All`.
    pub fn cycle(&self, options: &[String]) -> Self {
        match self {
            StatusFilter::All => options
                .first()
                .map(|v| StatusFilter::Only(v.clone()))
                .unwrap_or_default(),
            StatusFilter::Only(current) => {
                match options.iter().position(|o| o == current) {
                    Some(i) if i + 1 < options.len() => StatusFilter::Only(options[i + 1].clone()),
                    _ => StatusFilter::All,
                }
            }
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "{ALL_SENTINEL}"),
            StatusFilter::Only(v) => write!(f, "{v}"),
        }
    }
}

/// Inclusive calendar-date bounds. An unset bound leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `ts` falls on a day within the bounds (both ends inclusive).
    pub fn contains(&self, ts: NaiveDateTime) -> bool {
        let day = ts.date();
        self.start.map_or(true, |s| day >= s) && self.end.map_or(true, |e| day <= e)
    }

    /// Parse `START..END`, where either side may be empty
    /// (`2024-01-01..`, `..2024-02-01`). A single date means that one day.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        match trimmed.split_once("..") {
            Some((start, end)) => Ok(Self {
                start: parse_optional_date(start)?,
                end: parse_optional_date(end)?,
            }),
            None => {
                let day = parse_date(trimmed)?;
                Ok(Self {
                    start: Some(day),
                    end: Some(day),
                })
            }
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_day = |d: Option<NaiveDate>| d.map(|d| d.to_string()).unwrap_or_default();
        write!(f, "{}..{}", fmt_day(self.start), fmt_day(self.end))
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| Error::invalid_date(input))
}

fn parse_optional_date(input: &str) -> Result<Option<NaiveDate>> {
    if input.trim().is_empty() {
        Ok(None)
    } else {
        parse_date(input).map(Some)
    }
}

/// The full set of active predicates for one explorer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterCriteria {
    /// Case-insensitive substring query (empty = disabled).
    pub text: String,
    pub status: StatusFilter,
    pub facet: StatusFilter,
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
            && self.status.is_all()
            && self.facet.is_all()
            && self.date_range.is_unbounded()
    }

    /// Whether `record` satisfies every active predicate.
    pub fn matches(&self, record: &Record, schema: &ViewSchema) -> bool {
        let query = self.text.trim().to_lowercase();
        self.matches_with_query(record, schema, &query)
    }

    fn matches_with_query(&self, record: &Record, schema: &ViewSchema, query: &str) -> bool {
        if !query.is_empty()
            && !schema.text_fields.iter().any(|field| {
                record
                    .text(field)
                    .is_some_and(|t| t.to_lowercase().contains(query))
            })
        {
            return false;
        }

        if !self
            .status
            .matches(record.text(schema.status_field).as_deref())
        {
            return false;
        }

        if let Some(facet_field) = schema.facet_field {
            if !self.facet.matches(record.text(facet_field).as_deref()) {
                return false;
            }
        }

        if !self.date_range.is_unbounded() {
            match record.timestamp(schema.timestamp_field) {
                Some(ts) if self.date_range.contains(ts) => {}
                _ => return false,
            }
        }

        true
    }

    /// Indices of the records that match, in collection order.
    pub fn apply(&self, records: &[Record], schema: &ViewSchema) -> Vec<usize> {
        let query = self.text.trim().to_lowercase();
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches_with_query(r, schema, &query))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Distinct non-empty values of `field` in first-seen order.
///
/// Feeds the status and facet cycling in the UI.
pub fn distinct_values(records: &[Record], field: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for value in records.iter().filter_map(|r| r.text(field)) {
        if !value.is_empty() && !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{DEVICES_SCHEMA, RESULTS_SCHEMA, RUNS_SCHEMA};
    use serde_json::json;

    fn records() -> Vec<Record> {
        vec![
            json!({"id": 1, "status": "PASS", "name": "Login works", "message": "", "suite": "auth", "startTime": "2024-11-07T09:00:00"}),
            json!({"id": 2, "status": "FAIL", "name": "Checkout", "message": "Timeout waiting for LOGIN button", "suite": "cart", "startTime": "2024-11-08T23:59:59"}),
            json!({"id": 3, "status": "PASS", "name": "Search", "suite": "cart", "startTime": "2024-11-10T00:00:00"}),
            json!({"id": 4, "status": "FAIL", "name": "Profile"}),
        ]
        .into_iter()
        .map(|v| Record::from_value(v).unwrap())
        .collect()
    }

    fn ids(records: &[Record], indices: &[usize]) -> Vec<String> {
        indices
            .iter()
            .map(|&i| records[i].id("id").unwrap())
            .collect()
    }

    #[test]
    fn test_empty_criteria_matches_everything() {
        let records = records();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.apply(&records, &RESULTS_SCHEMA), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_status_filter_exact_match() {
        let records = records();
        let criteria = FilterCriteria {
            status: StatusFilter::Only("FAIL".into()),
            ..Default::default()
        };
        assert_eq!(ids(&records, &criteria.apply(&records, &RESULTS_SCHEMA)), ["2", "4"]);

        let lower = FilterCriteria {
            status: StatusFilter::Only("fail".into()),
            ..Default::default()
        };
        assert!(lower.apply(&records, &RESULTS_SCHEMA).is_empty());
    }

    #[test]
    fn test_text_search_is_case_insensitive_across_fields() {
        let records = records();
        let criteria = FilterCriteria {
            text: "login".into(),
            ..Default::default()
        };
        // "Login works" by name, "Timeout waiting for LOGIN button" by message.
        assert_eq!(ids(&records, &criteria.apply(&records, &RESULTS_SCHEMA)), ["1", "2"]);
    }

    #[test]
    fn test_facet_filter() {
        let records = records();
        let criteria = FilterCriteria {
            facet: StatusFilter::Only("cart".into()),
            ..Default::default()
        };
        assert_eq!(ids(&records, &criteria.apply(&records, &RESULTS_SCHEMA)), ["2", "3"]);
    }

    #[test]
    fn test_date_range_bounds_are_inclusive_days() {
        let records = records();
        let criteria = FilterCriteria {
            date_range: DateRange::parse("2024-11-07..2024-11-08").unwrap(),
            ..Default::default()
        };
        // 23:59:59 on the end day is still inside; record 4 has no timestamp.
        assert_eq!(ids(&records, &criteria.apply(&records, &RESULTS_SCHEMA)), ["1", "2"]);
    }

    #[test]
    fn test_open_date_bounds() {
        let records = records();
        let from = FilterCriteria {
            date_range: DateRange::parse("2024-11-08..").unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&records, &from.apply(&records, &RESULTS_SCHEMA)), ["2", "3"]);

        let until = FilterCriteria {
            date_range: DateRange::parse("..2024-11-07").unwrap(),
            ..Default::default()
        };
        assert_eq!(ids(&records, &until.apply(&records, &RESULTS_SCHEMA)), ["1"]);
    }

    #[test]
    fn test_predicates_are_anded() {
        let records = records();
        let criteria = FilterCriteria {
            text: "s".into(),
            status: StatusFilter::Only("PASS".into()),
            facet: StatusFilter::Only("cart".into()),
            date_range: DateRange::default(),
        };
        assert_eq!(ids(&records, &criteria.apply(&records, &RESULTS_SCHEMA)), ["3"]);
    }

    #[test]
    fn test_filtered_records_satisfy_all_predicates() {
        let records = records();
        let criteria = FilterCriteria {
            text: "o".into(),
            status: StatusFilter::Only("FAIL".into()),
            ..Default::default()
        };
        let result = criteria.apply(&records, &RESULTS_SCHEMA);
        assert!(!result.is_empty());
        for i in result {
            assert!(i < records.len());
            assert!(criteria.matches(&records[i], &RESULTS_SCHEMA));
        }
    }

    #[test]
    fn test_status_filter_from_input() {
        assert_eq!(StatusFilter::from_input("all"), StatusFilter::All);
        assert_eq!(StatusFilter::from_input(" ALL "), StatusFilter::All);
        assert_eq!(StatusFilter::from_input(""), StatusFilter::All);
        assert_eq!(
            StatusFilter::from_input("FAIL"),
            StatusFilter::Only("FAIL".into())
        );
    }

    #[test]
    fn test_status_filter_cycle_wraps_to_all() {
        let options = vec!["PASS".to_string(), "FAIL".to_string()];
        let f = StatusFilter::All.cycle(&options);
        assert_eq!(f, StatusFilter::Only("PASS".into()));
        let f = f.cycle(&options);
        assert_eq!(f, StatusFilter::Only("FAIL".into()));
        assert_eq!(f.cycle(&options), StatusFilter::All);
        assert_eq!(StatusFilter::All.cycle(&[]), StatusFilter::All);
    }

    #[test]
    fn test_date_range_parse_errors() {
        assert!(DateRange::parse("2024-02-30..").is_err());
        assert!(DateRange::parse("soon").is_err());
        assert!(DateRange::parse("").unwrap().is_unbounded());
    }

    #[test]
    fn test_single_date_means_one_day() {
        let range = DateRange::parse("2024-11-08").unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(range.to_string(), "2024-11-08..2024-11-08");
    }

    #[test]
    fn test_schema_without_facet_ignores_facet_filter() {
        let records = records();
        let mut schema = RUNS_SCHEMA.clone();
        schema.facet_field = None;
        let criteria = FilterCriteria {
            facet: StatusFilter::Only("anything".into()),
            ..Default::default()
        };
        assert_eq!(criteria.apply(&records, &schema).len(), records.len());
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let records = records();
        assert_eq!(distinct_values(&records, "status"), ["PASS", "FAIL"]);
        assert_eq!(distinct_values(&records, "suite"), ["auth", "cart"]);
        assert!(distinct_values(&records, "missing").is_empty());
    }

    #[test]
    fn test_device_search_fields() {
        let devices: Vec<Record> = vec![
            json!({"id": 1, "name": "Pixel 8", "manufacturer": "Google", "os": "Android 14"}),
            json!({"id": 2, "name": "iPhone 13", "manufacturer": "Apple", "serialNumber": "GOOG-LOOKALIKE"}),
        ]
        .into_iter()
        .map(|v| Record::from_value(v).unwrap())
        .collect();
        let criteria = FilterCriteria {
            text: "goog".into(),
            ..Default::default()
        };
        assert_eq!(criteria.apply(&devices, &DEVICES_SCHEMA), vec![0, 1]);
    }
}
