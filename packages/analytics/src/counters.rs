//! Headline counters.

use std::collections::BTreeSet;

use incident_map_incident_models::{AggregateTable, DashboardCounters, IncidentRecord};

use crate::Aggregates;
use crate::series::parse_incident_date;

/// Computes the four dashboard counters.
///
/// The state and city counts exclude the unknown-location and empty-city
/// buckets. One is subtracted per sentinel bucket actually present, so a
/// table without one is not undercounted.
///
/// The date count is the number of calendar days, so keys naming the same
/// day count once, matching the points of the date series. Keys that do
/// not parse as a date each count as their own day.
#[must_use]
pub fn dashboard_counters(records: &[IncidentRecord], aggregates: &Aggregates) -> DashboardCounters {
    DashboardCounters {
        cases: records.len() as u64,
        states: known_keys(&aggregates.by_state, "state"),
        cities: known_keys(&aggregates.by_city, "city"),
        dates: distinct_days(&aggregates.by_date),
    }
}

/// Number of distinct keys that are not sentinels.
fn known_keys(table: &AggregateTable, label: &str) -> u64 {
    let sentinels = table.sentinel_count();
    if sentinels == 0 {
        log::debug!("No unknown {label} bucket present, counting all {} keys", table.len());
    }
    table.len().saturating_sub(sentinels) as u64
}

/// Number of distinct calendar days among the date keys.
fn distinct_days(by_date: &AggregateTable) -> u64 {
    let mut days = BTreeSet::new();
    let mut unparsed = 0usize;
    for (key, _) in by_date.iter() {
        match key.as_str().and_then(parse_incident_date) {
            Some(day) => {
                days.insert(day);
            }
            None => unparsed += 1,
        }
    }
    (days.len() + unparsed) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate;

    fn record(state: &str, city: &str, date: &str) -> IncidentRecord {
        IncidentRecord {
            state: Some(state.to_owned()),
            city: Some(city.to_owned()),
            date: Some(date.to_owned()),
        }
    }

    #[test]
    fn excludes_sentinel_buckets() {
        let records = vec![
            record("California", "Oakland", "2020-05-30"),
            record("California", "Oakland", "2020-05-31"),
            record("Texas", "", "2020-05-31"),
            record("", "", ""),
        ];
        let counters = dashboard_counters(&records, &aggregate(&records));
        assert_eq!(
            counters,
            DashboardCounters {
                cases: 4,
                states: 2,
                cities: 1,
                dates: 2,
            }
        );
    }

    #[test]
    fn no_subtraction_without_sentinel() {
        let records = vec![
            record("California", "Oakland", "2020-05-30"),
            record("Texas", "Austin", "2020-05-30"),
        ];
        let counters = dashboard_counters(&records, &aggregate(&records));
        assert_eq!(counters.states, 2);
        assert_eq!(counters.cities, 2);
        assert_eq!(counters.dates, 1);
    }

    #[test]
    fn missing_and_empty_both_excluded() {
        let records = vec![
            record("Ohio", "Columbus", "2020-06-01"),
            record("", "", ""),
            IncidentRecord::default(),
        ];
        let counters = dashboard_counters(&records, &aggregate(&records));
        assert_eq!(counters.states, 1);
        assert_eq!(counters.cities, 1);
        assert_eq!(counters.dates, 1);
    }

    #[test]
    fn date_count_matches_plotted_days() {
        let records = vec![
            record("Ohio", "Columbus", "2020-01-01"),
            record("Ohio", "Columbus", "2020-01-01T08:00:00"),
            record("Ohio", "Dayton", "2020-01-02"),
        ];
        let aggregates = aggregate(&records);
        let counters = dashboard_counters(&records, &aggregates);
        let series = crate::series::date_series(&aggregates.by_date);

        assert_eq!(aggregates.by_date.len(), 3);
        assert_eq!(counters.dates, 2);
        assert_eq!(counters.dates, series.points.len() as u64);
    }

    #[test]
    fn unparseable_date_keys_still_count() {
        let records = vec![
            record("Ohio", "Columbus", "2020-01-01"),
            record("Ohio", "Columbus", "sometime in May"),
        ];
        let aggregates = aggregate(&records);
        let counters = dashboard_counters(&records, &aggregates);
        let series = crate::series::date_series(&aggregates.by_date);

        assert_eq!(counters.dates, 2);
        assert_eq!(
            counters.dates,
            (series.points.len() + series.unparsed.len()) as u64
        );
    }

    #[test]
    fn empty_input_is_all_zero() {
        let counters = dashboard_counters(&[], &aggregate(&[]));
        assert_eq!(counters, DashboardCounters::default());
    }
}
