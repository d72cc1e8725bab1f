//! Chronological daily series built from the date table.
//!
//! Date keys are parsed exactly once into [`NaiveDate`]; the time-series
//! view uses the same values for point placement and tick labels.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use incident_map_incident_models::AggregateTable;

/// One day on the time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DatePoint {
    /// Calendar date (UTC).
    pub date: NaiveDate,
    /// Number of incidents on that date.
    pub count: u64,
}

/// Parsed date table, sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateSeries {
    /// Points in strictly increasing date order.
    pub points: Vec<DatePoint>,
    /// Date keys that could not be parsed and are not plotted.
    pub unparsed: Vec<String>,
}

impl DateSeries {
    /// Whether there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last date.
    #[must_use]
    pub fn extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    /// Largest daily count.
    #[must_use]
    pub fn max_count(&self) -> Option<u64> {
        self.points.iter().map(|p| p.count).max()
    }
}

/// Parses an incident date string into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (converted to UTC), and
/// `YYYY-MM-DDTHH:MM:SS` with optional fractional seconds. The result does
/// not depend on the local timezone or locale.
#[must_use]
pub fn parse_incident_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.date());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.date());
    }
    None
}

/// Builds the chronological series from a (cleaned) date table.
///
/// Keys that parse to the same calendar date are merged.
#[must_use]
pub fn date_series(by_date: &AggregateTable) -> DateSeries {
    let mut days: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    let mut unparsed = Vec::new();

    for (key, count) in by_date.iter() {
        match key.as_str().and_then(parse_incident_date) {
            Some(date) => *days.entry(date).or_insert(0) += count,
            None => {
                log::warn!("Unparseable date key '{key}' ({count} records), not plotted");
                unparsed.push(key.to_string());
            }
        }
    }

    DateSeries {
        points: days
            .into_iter()
            .map(|(date, count)| DatePoint { date, count })
            .collect(),
        unparsed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_incident_models::GroupKey;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table(entries: &[(&str, u64)]) -> AggregateTable {
        entries
            .iter()
            .map(|(k, v)| (GroupKey::from(*k), *v))
            .collect()
    }

    #[test]
    fn parses_supported_formats() {
        assert_eq!(parse_incident_date("2020-01-05"), Some(ymd(2020, 1, 5)));
        assert_eq!(
            parse_incident_date("2020-01-05T23:30:00-05:00"),
            Some(ymd(2020, 1, 6))
        );
        assert_eq!(
            parse_incident_date("2020-01-05T14:30:00.000"),
            Some(ymd(2020, 1, 5))
        );
        assert_eq!(
            parse_incident_date("2020-01-05T14:30:00"),
            Some(ymd(2020, 1, 5))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_incident_date("last tuesday"), None);
        assert_eq!(parse_incident_date("2020-13-01"), None);
    }

    #[test]
    fn points_are_sorted_by_date() {
        let series = date_series(&table(&[
            ("2020-06-02", 1),
            ("2020-01-02", 5),
            ("2020-01-01", 3),
        ]));
        let dates: Vec<_> = series.points.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![ymd(2020, 1, 1), ymd(2020, 1, 2), ymd(2020, 6, 2)]);
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(series.max_count(), Some(5));
        assert_eq!(series.extent(), Some((ymd(2020, 1, 1), ymd(2020, 6, 2))));
    }

    #[test]
    fn unparseable_keys_are_reported() {
        let series = date_series(&table(&[("2020-01-01", 3), ("soon", 2)]));
        assert_eq!(series.points.len(), 1);
        assert_eq!(series.unparsed, vec!["soon".to_string()]);
    }

    #[test]
    fn same_day_keys_are_merged() {
        let series = date_series(&table(&[("2020-01-01", 3), ("2020-01-01T08:00:00", 2)]));
        assert_eq!(
            series.points,
            vec![DatePoint {
                date: ymd(2020, 1, 1),
                count: 5
            }]
        );
    }

    #[test]
    fn empty_table_gives_empty_series() {
        let series = date_series(&AggregateTable::new());
        assert!(series.is_empty());
        assert_eq!(series.extent(), None);
        assert_eq!(series.max_count(), None);
    }
}
