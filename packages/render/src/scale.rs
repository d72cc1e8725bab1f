//! Linear, time, and threshold scales.

use chrono::{Datelike as _, NaiveDate};

/// Nine-step sequential red palette, lightest to darkest.
pub const REDS_9: [&str; 9] = [
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];

/// Maps a continuous domain linearly onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Creates a scale from `domain` onto `range`. The range may be
    /// inverted (`range.0 > range.1`).
    #[must_use]
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// The input domain.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The output range.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Maps `value` into the range. A zero-width domain maps everything
    /// to the middle of the range.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        let t = if span == 0.0 { 0.5 } else { (value - d0) / span };
        t.mul_add(r1 - r0, r0)
    }
}

/// A [`LinearScale`] over calendar dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    /// Creates a scale from the date extent onto `range`.
    #[must_use]
    pub fn new(extent: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((day_number(extent.0), day_number(extent.1)), range),
        }
    }

    /// Maps a date into the range.
    #[must_use]
    pub fn apply(&self, date: NaiveDate) -> f64 {
        self.inner.apply(day_number(date))
    }

    /// The output range.
    #[must_use]
    pub const fn range(&self) -> (f64, f64) {
        self.inner.range()
    }
}

fn day_number(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Partitions a numeric domain into equal-width buckets, one color each.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdScale {
    domain: (f64, f64),
    thresholds: Vec<f64>,
    colors: Vec<String>,
}

impl ThresholdScale {
    /// Splits `[min, max]` into `colors.len()` equal-width buckets.
    ///
    /// Bucket `i` starts at `min + i * (max - min) / n`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn equal_width(domain: (f64, f64), colors: &[&str]) -> Self {
        let (min, max) = domain;
        let n = colors.len().max(1);
        let step = (max - min) / n as f64;
        let thresholds = (0..n).map(|i| (i as f64).mul_add(step, min)).collect();

        Self {
            domain,
            thresholds,
            colors: colors.iter().map(|c| (*c).to_string()).collect(),
        }
    }

    /// The `[min, max]` domain.
    #[must_use]
    pub const fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// Start value of every bucket.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the scale has no buckets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Index of the bucket `value` falls into.
    ///
    /// Values below the domain go to the first bucket, values at or above
    /// the last threshold to the last. A zero-width domain puts everything
    /// in the first bucket.
    #[must_use]
    pub fn bucket(&self, value: f64) -> usize {
        if self.domain.1 <= self.domain.0 {
            return 0;
        }
        self.thresholds
            .iter()
            .skip(1)
            .filter(|t| **t <= value)
            .count()
    }

    /// Color for `value`.
    #[must_use]
    pub fn color(&self, value: f64) -> &str {
        self.colors
            .get(self.bucket(value))
            .map_or("#ccc", String::as_str)
    }

    /// Color of bucket `index`.
    #[must_use]
    pub fn bucket_color(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    /// `[start, end)` of bucket `index`; the last bucket ends at the domain
    /// maximum.
    #[must_use]
    pub fn extent(&self, index: usize) -> Option<(f64, f64)> {
        let start = *self.thresholds.get(index)?;
        let end = self
            .thresholds
            .get(index + 1)
            .copied()
            .unwrap_or(self.domain.1);
        Some((start, end))
    }
}
