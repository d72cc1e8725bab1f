#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident aggregation for the dashboard.
//!
//! Groups incident records by state, city and date, derives the headline
//! counters, the choropleth color domain, and the chronological date
//! series. [`DashboardData`] bundles the loaded inputs with their
//! aggregates and is handed by reference to every view.

pub mod aggregate;
pub mod counters;
pub mod domain;
pub mod series;

use incident_map_incident_models::{DashboardCounters, IncidentRecord, StateNameTable};

pub use aggregate::{Aggregates, aggregate, aggregate_by};

/// Everything the views need, built once and never mutated.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// The incident records.
    pub records: Vec<IncidentRecord>,
    /// State boundary features.
    pub features: Vec<geojson::Feature>,
    /// State id to name lookup.
    pub state_names: StateNameTable,
    /// Grouping tables over `records`.
    pub aggregates: Aggregates,
}

impl DashboardData {
    /// Aggregates `records` and bundles the result with the other inputs.
    #[must_use]
    pub fn new(
        records: Vec<IncidentRecord>,
        features: Vec<geojson::Feature>,
        state_names: StateNameTable,
    ) -> Self {
        let aggregates = aggregate(&records);

        log::info!(
            "Aggregated {} records: {} state keys, {} city keys, {} date keys",
            records.len(),
            aggregates.by_state.len(),
            aggregates.by_city.len(),
            aggregates.by_date.len()
        );

        Self {
            records,
            features,
            state_names,
            aggregates,
        }
    }

    /// The four headline counters.
    #[must_use]
    pub fn counters(&self) -> DashboardCounters {
        counters::dashboard_counters(&self.records, &self.aggregates)
    }
}
