//! Summary statistics over a record collection

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::Record;
use crate::schema::ViewSchema;

/// Counts and averages shown in the explorer header.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExplorerStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Records per status value. Records without a status are not counted.
    pub status_counts: BTreeMap<String, usize>,
    /// Percentage of passed records, rounded to one decimal; 0 when empty.
    pub pass_rate: f64,
    /// Mean of the schema's numeric field over records that carry it.
    /// `None` when the view has no numeric field.
    pub average: Option<f64>,
}

impl ExplorerStats {
    pub fn compute<'a, I>(records: I, schema: &ViewSchema) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut stats = Self::default();
        let mut sum = 0.0;
        let mut counted = 0usize;

        for record in records {
            stats.total += 1;
            if let Some(status) = record.text(schema.status_field) {
                if status == schema.pass_value {
                    stats.passed += 1;
                } else if status == schema.fail_value {
                    stats.failed += 1;
                }
                *stats.status_counts.entry(status).or_default() += 1;
            }
            if let Some(value) = schema.numeric_field.and_then(|f| record.number(f)) {
                sum += value;
                counted += 1;
            }
        }

        if stats.total > 0 {
            let rate = stats.passed as f64 * 100.0 / stats.total as f64;
            stats.pass_rate = (rate * 10.0).round() / 10.0;
        }
        stats.average = schema.numeric_field.map(|_| {
            if counted == 0 {
                0.0
            } else {
                sum / counted as f64
            }
        });
        stats
    }

    /// Pass rate with one decimal (`"66.7"`).
    pub fn pass_rate_display(&self) -> String {
        format!("{:.1}", self.pass_rate)
    }

    /// Average with two decimals (`"1.50"`), `None` when not applicable.
    pub fn average_display(&self) -> Option<String> {
        self.average.map(|avg| format!("{avg:.2}"))
    }

    pub fn count_for(&self, status: &str) -> usize {
        self.status_counts.get(status).copied().unwrap_or(0)
    }
}
