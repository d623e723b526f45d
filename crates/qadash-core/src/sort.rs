//! Sort configuration and record ordering

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use serde_json::Value;

use crate::record::{parse_timestamp, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => write!(f, "asc"),
            SortDirection::Descending => write!(f, "desc"),
        }
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// Select `key`. Reselecting the active key flips the direction; a new
    /// key starts at `default_direction`.
    pub fn toggle(&mut self, key: &str, default_direction: SortDirection) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key.to_string();
            self.direction = default_direction;
        }
    }

    /// Compare two records under this configuration.
    ///
    /// Records missing the key sort after all records that have it, in
    /// either direction.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let a = a.get(&self.key).map(SortKey::of);
        let b = b.get(&self.key).map(SortKey::of);
        self.compare_keys(a.as_ref(), b.as_ref())
    }

    /// Stable-sort `indices` (into `records`) in place.
    ///
    /// Records that compare equal keep their relative order. Each record's
    /// key is classified once before sorting.
    pub fn sort_indices(&self, records: &[Record], indices: &mut [usize]) {
        let keys: Vec<Option<SortKey<'_>>> = records
            .iter()
            .map(|r| r.get(&self.key).map(SortKey::of))
            .collect();
        indices.sort_by(|&a, &b| self.compare_keys(keys[a].as_ref(), keys[b].as_ref()));
    }

    fn compare_keys(&self, a: Option<&SortKey<'_>>, b: Option<&SortKey<'_>>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(x), Some(y)) => {
                let ord = x.cmp(y);
                match self.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    }
}

impl fmt::Display for SortConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.direction.arrow())
    }
}

/// Natural ascending order of two present field values.
///
/// Numbers (and numeric strings) compare numerically, timestamp strings
/// chronologically, other strings case-insensitively with an exact
/// tiebreak, booleans `false < true`. Values of different classes order by
/// class: booleans, numbers, timestamps, text, nested values, null.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    SortKey::of(a).cmp(&SortKey::of(b))
}

/// A field value reduced to exactly one sort class.
///
/// The class is decided per value, never per pair, so ordering by
/// `(class, payload)` is total.
#[derive(Debug, Clone)]
enum SortKey<'a> {
    Bool(bool),
    Number(f64),
    Timestamp(NaiveDateTime),
    Text { folded: String, raw: &'a str },
    Nested(String),
    Null,
}

impl<'a> SortKey<'a> {
    fn of(value: &'a Value) -> Self {
        match value {
            Value::Null => SortKey::Null,
            Value::Bool(b) => SortKey::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(SortKey::Null, SortKey::Number),
            Value::String(s) => {
                if let Some(n) = s.trim().parse::<f64>().ok().filter(|v| v.is_finite()) {
                    SortKey::Number(n)
                } else if let Some(ts) = parse_timestamp(s) {
                    SortKey::Timestamp(ts)
                } else {
                    SortKey::Text {
                        folded: s.to_lowercase(),
                        raw: s,
                    }
                }
            }
            Value::Array(_) | Value::Object(_) => SortKey::Nested(value.to_string()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Bool(_) => 0,
            SortKey::Number(_) => 1,
            SortKey::Timestamp(_) => 2,
            SortKey::Text { .. } => 3,
            SortKey::Nested(_) => 4,
            SortKey::Null => 5,
        }
    }
}

impl Ord for SortKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Bool(x), SortKey::Bool(y)) => x.cmp(y),
            (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
            (SortKey::Timestamp(x), SortKey::Timestamp(y)) => x.cmp(y),
            (
                SortKey::Text { folded: fx, raw: rx },
                SortKey::Text { folded: fy, raw: ry },
            ) => fx.cmp(fy).then_with(|| rx.cmp(ry)),
            (SortKey::Nested(x), SortKey::Nested(y)) => x.cmp(y),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey<'_> {}
