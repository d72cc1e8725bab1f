//! Grouping of incident records into aggregate tables.

use incident_map_incident_models::{AggregateTable, GroupKey, IncidentRecord};

/// The three grouping tables shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    /// Records per state, sentinel buckets included.
    pub by_state: AggregateTable,
    /// Records per city, sentinel buckets included.
    pub by_city: AggregateTable,
    /// Records per date, with missing and empty dates removed.
    pub by_date: AggregateTable,
}

/// Groups `records` by the key `key_fn` extracts and counts each group.
///
/// The counts of the returned table always sum to `records.len()`.
pub fn aggregate_by<F>(records: &[IncidentRecord], key_fn: F) -> AggregateTable
where
    F: Fn(&IncidentRecord) -> GroupKey,
{
    let mut table = AggregateTable::new();
    for record in records {
        table.increment(key_fn(record));
    }
    table
}

/// Builds the state, city and date tables and cleans the date keys.
#[must_use]
pub fn aggregate(records: &[IncidentRecord]) -> Aggregates {
    let by_state = aggregate_by(records, |r| GroupKey::from_field(r.state.as_deref()));
    let by_city = aggregate_by(records, |r| GroupKey::from_field(r.city.as_deref()));
    let mut by_date = aggregate_by(records, |r| GroupKey::from_field(r.date.as_deref()));
    remove_missing_dates(&mut by_date);

    Aggregates {
        by_state,
        by_city,
        by_date,
    }
}

/// Drops the empty-string and missing date groups.
///
/// Returns the number of records that were in them.
pub fn remove_missing_dates(table: &mut AggregateTable) -> u64 {
    let removed: u64 = [GroupKey::from(""), GroupKey::Missing]
        .iter()
        .filter_map(|key| table.remove(key))
        .sum();

    if removed > 0 {
        log::debug!("Excluded {removed} records without a date from the date table");
    }

    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: Option<&str>, city: Option<&str>, date: Option<&str>) -> IncidentRecord {
        IncidentRecord {
            state: state.map(str::to_owned),
            city: city.map(str::to_owned),
            date: date.map(str::to_owned),
        }
    }

    fn sample() -> Vec<IncidentRecord> {
        vec![
            record(Some("CA"), Some("Oakland"), Some("2020-05-30")),
            record(Some("CA"), Some("Los Angeles"), Some("2020-05-31")),
            record(Some(""), Some(""), Some("")),
            record(Some("NY"), None, None),
            record(None, Some("Oakland"), Some("2020-05-30")),
        ]
    }

    #[test]
    fn groups_by_state_with_empty_bucket() {
        let records = vec![
            record(Some("CA"), None, None),
            record(Some("CA"), None, None),
            record(Some(""), None, None),
        ];
        let table = aggregate_by(&records, |r| GroupKey::from_field(r.state.as_deref()));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("CA"), Some(2));
        assert_eq!(table.get(""), Some(1));
    }

    #[test]
    fn counts_sum_to_record_count() {
        let records = sample();
        for table in [
            aggregate_by(&records, |r| GroupKey::from_field(r.state.as_deref())),
            aggregate_by(&records, |r| GroupKey::from_field(r.city.as_deref())),
            aggregate_by(&records, |r| GroupKey::from_field(r.date.as_deref())),
        ] {
            assert_eq!(table.total(), records.len() as u64);
        }
    }

    #[test]
    fn date_table_has_no_sentinels() {
        let aggregates = aggregate(&sample());
        assert_eq!(aggregates.by_date.sentinel_count(), 0);
        assert_eq!(aggregates.by_date.get("2020-05-30"), Some(2));
        assert_eq!(aggregates.by_date.get("2020-05-31"), Some(1));
        assert_eq!(aggregates.by_date.len(), 2);
    }

    #[test]
    fn state_and_city_keep_sentinels() {
        let aggregates = aggregate(&sample());
        assert_eq!(aggregates.by_state.get(""), Some(1));
        assert_eq!(aggregates.by_state.get_key(&GroupKey::Missing), Some(1));
        assert_eq!(aggregates.by_city.get_key(&GroupKey::Missing), Some(1));
    }

    #[test]
    fn aggregation_does_not_touch_input() {
        let records = sample();
        let before = records.clone();
        let _ = aggregate(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn remove_missing_dates_reports_count() {
        let mut table = aggregate_by(&sample(), |r| GroupKey::from_field(r.date.as_deref()));
        assert_eq!(remove_missing_dates(&mut table), 2);
        assert_eq!(remove_missing_dates(&mut table), 0);
    }

    #[test]
    fn empty_input_gives_empty_tables() {
        let aggregates = aggregate(&[]);
        assert!(aggregates.by_state.is_empty());
        assert!(aggregates.by_city.is_empty());
        assert!(aggregates.by_date.is_empty());
    }
}
