#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Static rendering of the incident dashboard.
//!
//! Produces one self-contained HTML document holding the headline
//! counters, the state choropleth (`#map_svg`) and the daily time series
//! (`#time_series_svg`). Styling and the hover tooltip are inlined so the
//! file can be opened without a server.

pub mod axis;
pub mod counters;
pub mod curve;
pub mod map;
pub mod page;
pub mod scale;
pub mod svg;
pub mod time_series;

use incident_map_analytics::DashboardData;
use incident_map_incident_models::CanvasSize;

use crate::svg::Element;

/// Default document title.
pub const DEFAULT_TITLE: &str = "Incident Dashboard";

/// Presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Size of each drawing surface.
    pub canvas: CanvasSize,
    /// Document title and heading.
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// Renders the full dashboard document.
#[must_use]
pub fn render_dashboard(data: &DashboardData, options: &RenderOptions) -> String {
    let counters = data.counters();
    log::info!(
        "Rendering dashboard: {} cases, {} states, {} cities, {} dates",
        counters.cases,
        counters.states,
        counters.cities,
        counters.dates
    );

    let body = vec![
        counters::render_counters(&counters),
        Element::new("div")
            .attr("class", "chart")
            .child(map::render_map(data, options.canvas)),
        Element::new("div")
            .attr("class", "chart")
            .child(time_series::render_time_series(
                &data.aggregates.by_date,
                options.canvas,
            )),
    ];

    page::document(&options.title, body, true)
}

/// Renders the page shown when loading fails: no charts, only the error.
#[must_use]
pub fn render_failure_page(title: &str, message: &str) -> String {
    let body = vec![
        Element::new("div")
            .attr("class", "failure")
            .child(Element::new("h2").text("Failed to load data"))
            .child(Element::new("pre").text(message)),
    ];

    page::document(title, body, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_incident_models::{IncidentRecord, StateNameTable};

    fn record(state: Option<&str>, city: &str, date: Option<&str>) -> IncidentRecord {
        IncidentRecord {
            state: state.map(str::to_string),
            city: Some(city.to_string()),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn dashboard_contains_every_surface() {
        let records = vec![
            record(Some("California"), "Oakland", Some("2020-06-01")),
            record(Some("Texas"), "Austin", Some("2020-06-02")),
            record(None, "", None),
        ];
        let names: StateNameTable = [("6", "California"), ("48", "Texas")].into_iter().collect();
        let data = DashboardData::new(records, Vec::new(), names);
        let html = render_dashboard(&data, &RenderOptions::default());

        for id in [
            "case_count",
            "state_count",
            "city_count",
            "date_count",
            "map_svg",
            "time_series_svg",
        ] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
        assert!(html.contains("id=\"case_count\">3<"));
        assert!(html.contains("id=\"state_count\">2<"));
        assert!(html.contains("id=\"city_count\">2<"));
        assert!(html.contains("id=\"date_count\">2<"));
        assert!(html.contains("<title>Incident Dashboard</title>"));
    }

    #[test]
    fn failure_page_has_message_and_no_charts() {
        let html = render_failure_page(DEFAULT_TITLE, "topology: HTTP 404");
        assert!(html.contains("Failed to load data"));
        assert!(html.contains("topology: HTTP 404"));
        assert!(!html.contains("map_svg"));
        assert!(!html.contains("case_count"));
    }
}
