#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record, aggregate table, and state-name lookup types.
//!
//! These are the value types shared by the loader, the aggregator, and the
//! dashboard views. Everything here is built once per run and treated as
//! read-only after aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default drawing-surface width in pixels.
pub const DEFAULT_CANVAS_WIDTH: u32 = 1200;

/// The three external resources a dashboard is built from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    /// The incident-record collection (JSON).
    IncidentRecords,
    /// The state boundary topology (`TopoJSON`).
    Topology,
    /// The state id to state name lookup table (TSV).
    StateNames,
}

impl ResourceKind {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::IncidentRecords, Self::Topology, Self::StateNames]
    }
}

/// A single incident as seen by the dashboard.
///
/// Only the fields used for grouping are kept. `None` means the field was
/// absent, `null`, or not a string in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// State name (e.g. `"California"`).
    pub state: Option<String>,
    /// City name.
    pub city: Option<String>,
    /// Incident date, usually `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl IncidentRecord {
    /// Builds a record from an arbitrary JSON value.
    ///
    /// Never fails: non-object values and non-string fields simply produce
    /// missing fields.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Self {
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
        };

        Self {
            state: field("state"),
            city: field("city"),
            date: field("date"),
        }
    }
}

/// Grouping key of an [`AggregateTable`].
///
/// The empty string and a missing field are kept apart so that cleanup
/// can remove each of them explicitly. Both count as sentinel keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    /// The field was not present on the record.
    Missing,
    /// The field value, possibly empty.
    Value(String),
}

impl GroupKey {
    /// Creates a key from an optional field value.
    #[must_use]
    pub fn from_field(field: Option<&str>) -> Self {
        field.map_or(Self::Missing, |v| Self::Value(v.to_owned()))
    }

    /// Whether this key stands for "no data" (missing or empty string).
    #[must_use]
    pub fn is_sentinel(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Value(v) => v.is_empty(),
        }
    }

    /// Returns the key's string value, or `None` for [`GroupKey::Missing`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self::Value(value.to_owned())
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "undefined"),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

/// Mapping from a grouping key to the number of records sharing that key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateTable {
    counts: BTreeMap<GroupKey, u64>,
}

impl AggregateTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }

    /// Adds one record to the group for `key`.
    pub fn increment(&mut self, key: GroupKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for a present, string-valued key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<u64> {
        self.counts.get(&GroupKey::from(key)).copied()
    }

    /// Count for an arbitrary key, including [`GroupKey::Missing`].
    #[must_use]
    pub fn get_key(&self, key: &GroupKey) -> Option<u64> {
        self.counts.get(key).copied()
    }

    /// Removes a group, returning its count if it was present.
    pub fn remove(&mut self, key: &GroupKey) -> Option<u64> {
        self.counts.remove(key)
    }

    /// Number of distinct keys, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of sentinel groups (missing and/or empty-string) present.
    #[must_use]
    pub fn sentinel_count(&self) -> usize {
        self.counts.keys().filter(|k| k.is_sentinel()).count()
    }

    /// Sum of all group counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterates over `(key, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, u64)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    /// Iterates over the group counts.
    pub fn values(&self) -> impl Iterator<Item = u64> + '_ {
        self.counts.values().copied()
    }

    /// Smallest group count, if any.
    #[must_use]
    pub fn min_value(&self) -> Option<u64> {
        self.values().min()
    }

    /// Largest group count, if any.
    #[must_use]
    pub fn max_value(&self) -> Option<u64> {
        self.values().max()
    }
}

impl FromIterator<(GroupKey, u64)> for AggregateTable {
    fn from_iter<T: IntoIterator<Item = (GroupKey, u64)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (key, count) in iter {
            *table.counts.entry(key).or_insert(0) += count;
        }
        table
    }
}

/// Lookup from a numeric region identifier to a human-readable state name.
///
/// Identifiers are normalized on insert and on lookup: anything that parses
/// as an unsigned integer is keyed by its integer value, so `"01"` and `"1"`
/// are the same id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateNameTable {
    names: BTreeMap<String, String>,
}

impl StateNameTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            names: BTreeMap::new(),
        }
    }

    /// Normalizes a region identifier for use as a lookup key.
    #[must_use]
    pub fn normalize_id(id: &str) -> String {
        let trimmed = id.trim();
        trimmed
            .parse::<u64>()
            .map_or_else(|_| trimmed.to_owned(), |n| n.to_string())
    }

    /// Inserts or replaces the name for `id`.
    pub fn insert(&mut self, id: &str, name: impl Into<String>) {
        self.names.insert(Self::normalize_id(id), name.into());
    }

    /// Resolves a region identifier to its state name.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<&str> {
        self.names.get(&Self::normalize_id(id)).map(String::as_str)
    }

    /// Number of known ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<I: AsRef<str>, N: Into<String>> FromIterator<(I, N)> for StateNameTable {
    fn from_iter<T: IntoIterator<Item = (I, N)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (id, name) in iter {
            table.insert(id.as_ref(), name);
        }
        table
    }
}

/// The four headline numbers shown above the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounters {
    /// Total number of incident records.
    pub cases: u64,
    /// Distinct states, excluding the unknown-location bucket.
    pub states: u64,
    /// Distinct cities, excluding the empty-city bucket.
    pub cities: u64,
    /// Distinct dates, excluding missing dates.
    pub dates: u64,
}

/// Pixel size of a drawing surface. Height is always width × 4/6.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl CanvasSize {
    /// Creates a canvas of the given width with the fixed 6:4 aspect ratio.
    #[must_use]
    pub fn from_width(width: u32) -> Self {
        let width = f64::from(width);
        Self {
            width,
            height: width * 4.0 / 6.0,
        }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::from_width(DEFAULT_CANVAS_WIDTH)
    }
}
