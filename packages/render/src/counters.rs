//! Headline counter fields.

use incident_map_incident_models::DashboardCounters;

use crate::svg::Element;

/// Renders the four counters as labelled, identified fields.
#[must_use]
pub fn render_counters(counters: &DashboardCounters) -> Element {
    let fields = [
        ("case_count", "Incidents", counters.cases),
        ("state_count", "States", counters.states),
        ("city_count", "Cities", counters.cities),
        ("date_count", "Days", counters.dates),
    ];

    Element::new("div")
        .attr("class", "counters")
        .children(fields.into_iter().map(|(id, label, value)| {
            Element::new("div")
                .attr("class", "counter")
                .child(Element::new("span").attr("class", "value").attr("id", id).text(value))
                .child(Element::new("span").attr("class", "name").text(format!(" {label}")))
        }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_counter_has_its_id() {
        let counters = DashboardCounters {
            cases: 120,
            states: 30,
            cities: 80,
            dates: 14,
        };
        let html = render_counters(&counters);
        let values: Vec<(Option<&str>, String)> = html
            .find_all("span")
            .into_iter()
            .filter(|s| s.get_attr("class") == Some("value"))
            .map(|s| (s.get_attr("id"), s.text_content()))
            .collect();
        assert_eq!(
            values,
            vec![
                (Some("case_count"), "120".to_string()),
                (Some("state_count"), "30".to_string()),
                (Some("city_count"), "80".to_string()),
                (Some("date_count"), "14".to_string()),
            ]
        );
    }
}
