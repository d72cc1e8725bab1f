//! State choropleth with its legend.

use std::fmt::Write as _;

use geojson::{Feature, Geometry, Position, feature::Id};
use incident_map_analytics::{DashboardData, domain::state_color_domain};
use incident_map_incident_models::{AggregateTable, CanvasSize, StateNameTable};

use crate::axis::BottomAxis;
use crate::scale::{LinearScale, REDS_9, ThresholdScale};
use crate::svg::{Element, num};

/// Fill for states without an aggregate entry.
pub const NO_DATA_FILL: &str = "#ccc";

/// Label for features whose id has no name.
pub const UNKNOWN_STATE: &str = "Unknown";

const LEGEND_CAPTION: &str = "Number of Incidents";
const LEGEND_OFFSET_Y: f64 = 40.0;
const LEGEND_HEIGHT: f64 = 8.0;
const LEGEND_TICK_SIZE: f64 = 13.0;

/// Resolved display state of one feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateShade {
    /// Display name.
    pub name: String,
    /// Incident count, if the state has an aggregate entry.
    pub count: Option<u64>,
    /// Fill color.
    pub fill: String,
}

impl StateShade {
    /// Hover text, `"<name>: <count>"` or `"<name>: No Data"`.
    #[must_use]
    pub fn tooltip(&self) -> String {
        match self.count {
            Some(count) => format!("{}: {count}", self.name),
            None => format!("{}: No Data", self.name),
        }
    }
}

/// Builds the color scale for the state table, or `None` when no state has
/// any incidents.
#[must_use]
pub fn color_scale(by_state: &AggregateTable) -> Option<ThresholdScale> {
    state_color_domain(by_state).map(|domain| ThresholdScale::equal_width(domain, &REDS_9))
}

/// Resolves a feature to its name, count and fill.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn shade_feature(
    feature: &Feature,
    state_names: &StateNameTable,
    by_state: &AggregateTable,
    scale: Option<&ThresholdScale>,
) -> StateShade {
    let name = feature_id(feature)
        .as_deref()
        .and_then(|id| state_names.resolve(id))
        .map(str::to_string);

    let count = name.as_deref().and_then(|name| by_state.get(name));
    let fill = match (count, scale) {
        (Some(count), Some(scale)) => scale.color(count as f64).to_string(),
        _ => NO_DATA_FILL.to_string(),
    };

    StateShade {
        name: name.unwrap_or_else(|| UNKNOWN_STATE.to_string()),
        count,
        fill,
    }
}

fn feature_id(feature: &Feature) -> Option<String> {
    match feature.id.as_ref()? {
        Id::String(s) => Some(s.clone()),
        Id::Number(n) => Some(n.to_string()),
    }
}

/// Renders the `#map_svg` surface.
#[must_use]
pub fn render_map(data: &DashboardData, canvas: CanvasSize) -> Element {
    let by_state = &data.aggregates.by_state;
    let scale = color_scale(by_state);

    let mut unknown = 0usize;
    let paths: Vec<Element> = data
        .features
        .iter()
        .map(|feature| {
            let shade = shade_feature(feature, &data.state_names, by_state, scale.as_ref());
            if shade.count.is_none() && shade.name == UNKNOWN_STATE {
                unknown += 1;
            }
            Element::new("path")
                .attr("class", "state")
                .attr("d", feature_path(feature))
                .attr("fill", &shade.fill)
                .attr("stroke", "#000")
                .attr("data-tooltip", shade.tooltip())
        })
        .collect();

    if unknown > 0 {
        log::warn!("{unknown} map features have no state name");
    }
    log::debug!("Rendered {} state paths", paths.len());

    let mut svg = Element::new("svg")
        .attr("id", "map_svg")
        .attr("width", num(canvas.width))
        .attr("height", num(canvas.height));

    if let Some(scale) = &scale {
        svg = svg.child(legend(scale, canvas));
    }

    svg.child(Element::new("g").attr("class", "states").children(paths))
}

fn legend(scale: &ThresholdScale, canvas: CanvasSize) -> Element {
    let x = LinearScale::new(scale.domain(), (canvas.width - 600.0, canvas.width - 350.0));

    let rects = (0..scale.len()).filter_map(|i| {
        let (start, end) = scale.extent(i)?;
        let color = scale.bucket_color(i)?;
        Some(
            Element::new("rect")
                .attr("height", num(LEGEND_HEIGHT))
                .attr("x", num(x.apply(start)))
                .attr("width", num((x.apply(end) - x.apply(start)).max(0.0)))
                .attr("fill", color),
        )
    });

    let last = scale.thresholds().len().saturating_sub(1);
    let axis = scale
        .thresholds()
        .iter()
        .enumerate()
        .fold(
            BottomAxis::new(x.range())
                .tick_size(LEGEND_TICK_SIZE)
                .without_domain(),
            |axis, (i, t)| {
                let label = if i == last {
                    String::new()
                } else {
                    format!("{}", t.round())
                };
                axis.tick(x.apply(*t), label)
            },
        )
        .build();

    Element::new("g")
        .attr("class", "key")
        .attr("transform", format!("translate(0,{})", num(LEGEND_OFFSET_Y)))
        .children(rects)
        .child(
            Element::new("text")
                .attr("class", "caption")
                .attr("x", num(x.range().0))
                .attr("y", -6)
                .attr("fill", "#000")
                .attr("text-anchor", "start")
                .attr("font-weight", "bold")
                .attr("font-size", 16)
                .text(LEGEND_CAPTION),
        )
        .child(axis)
}

/// SVG path data for a feature's geometry, drawn without projection.
#[must_use]
pub fn feature_path(feature: &Feature) -> String {
    let mut d = String::new();
    if let Some(geometry) = &feature.geometry {
        geometry_path(geometry, &mut d);
    }
    d
}

fn geometry_path(geometry: &Geometry, d: &mut String) {
    match &geometry.value {
        geojson::Value::Polygon(rings) => rings.iter().for_each(|ring| ring_path(ring, true, d)),
        geojson::Value::MultiPolygon(polygons) => polygons
            .iter()
            .flatten()
            .for_each(|ring| ring_path(ring, true, d)),
        geojson::Value::LineString(line) => ring_path(line, false, d),
        geojson::Value::MultiLineString(lines) => {
            lines.iter().for_each(|line| ring_path(line, false, d));
        }
        geojson::Value::GeometryCollection(geometries) => {
            geometries.iter().for_each(|g| geometry_path(g, d));
        }
        geojson::Value::Point(_) | geojson::Value::MultiPoint(_) => {}
    }
}

fn ring_path(ring: &[Position], closed: bool, d: &mut String) {
    let mut points = ring.iter().filter(|p| p.len() >= 2);
    let Some(first) = points.next() else {
        return;
    };
    let _ = write!(d, "M{},{}", num(first[0]), num(first[1]));
    for p in points {
        let _ = write!(d, "L{},{}", num(p[0]), num(p[1]));
    }
    if closed {
        d.push('Z');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use incident_map_incident_models::{GroupKey, IncidentRecord};

    fn square(id: u64, x: f64) -> Feature {
        let ring = vec![
            vec![x, 0.0],
            vec![x + 10.0, 0.0],
            vec![x + 10.0, 10.0],
            vec![x, 10.0],
            vec![x, 0.0],
        ];
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::Polygon(vec![ring]))),
            id: Some(Id::Number(id.into())),
            properties: None,
            foreign_members: None,
        }
    }

    fn names() -> StateNameTable {
        [("6", "California"), ("48", "Texas"), ("36", "New York")]
            .into_iter()
            .collect()
    }

    fn record(state: &str) -> IncidentRecord {
        IncidentRecord {
            state: Some(state.to_string()),
            city: Some("Somewhere".to_string()),
            date: Some("2020-06-01".to_string()),
        }
    }

    #[test]
    fn polygon_path_is_closed() {
        assert_eq!(
            feature_path(&square(6, 0.0)),
            "M0,0L10,0L10,10L0,10L0,0Z"
        );
    }

    #[test]
    fn state_without_entry_is_gray_with_no_data() {
        let table: AggregateTable = [(GroupKey::from("California"), 4)].into_iter().collect();
        let scale = color_scale(&table);
        let shade = shade_feature(&square(48, 0.0), &names(), &table, scale.as_ref());
        assert_eq!(shade.fill, NO_DATA_FILL);
        assert_eq!(shade.tooltip(), "Texas: No Data");
    }

    #[test]
    fn unnamed_feature_is_unknown() {
        let table: AggregateTable = [(GroupKey::from("California"), 4)].into_iter().collect();
        let shade = shade_feature(&square(99, 0.0), &names(), &table, color_scale(&table).as_ref());
        assert_eq!(shade.name, UNKNOWN_STATE);
        assert_eq!(shade.fill, NO_DATA_FILL);
        assert_eq!(shade.tooltip(), "Unknown: No Data");
    }

    #[test]
    fn larger_counts_get_darker_buckets() {
        let table: AggregateTable = [
            (GroupKey::from("California"), 90),
            (GroupKey::from("Texas"), 45),
            (GroupKey::from("New York"), 1),
        ]
        .into_iter()
        .collect();
        let scale = color_scale(&table).unwrap();
        let shade = |id| shade_feature(&square(id, 0.0), &names(), &table, Some(&scale));
        let position = |fill: &str| REDS_9.iter().position(|c| *c == fill).unwrap();

        let ca = shade(6);
        let tx = shade(48);
        let ny = shade(36);
        assert_eq!(ca.tooltip(), "California: 90");
        assert_eq!(ca.fill, REDS_9[8]);
        assert!(position(&ca.fill) > position(&tx.fill));
        assert!(position(&tx.fill) > position(&ny.fill));
    }

    #[test]
    fn map_has_legend_and_one_path_per_feature() {
        let records = vec![record("California"), record("California"), record("Texas")];
        let data = DashboardData::new(
            records,
            vec![square(6, 0.0), square(48, 20.0), square(36, 40.0)],
            names(),
        );
        let svg = render_map(&data, CanvasSize::default());

        assert_eq!(svg.get_attr("id"), Some("map_svg"));
        assert_eq!(svg.get_attr("height"), Some("800"));
        assert_eq!(svg.find_all("path").len(), 3);

        let key = svg
            .child_elements()
            .find(|e| e.get_attr("class") == Some("key"))
            .unwrap();
        assert_eq!(key.get_attr("transform"), Some("translate(0,40)"));
        assert_eq!(key.find_all("rect").len(), 9);

        let labels: Vec<String> = key
            .find_all("g")
            .iter()
            .filter(|g| g.get_attr("class") == Some("tick"))
            .map(|g| g.text_content())
            .collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "0");
        assert_eq!(labels[8], "");

        let caption = key.find_all("text").into_iter().find(|t| t.get_attr("class") == Some("caption")).unwrap();
        assert_eq!(caption.text_content(), "Number of Incidents");
        assert_eq!(caption.get_attr("x"), Some("600"));
    }

    #[test]
    fn empty_state_table_draws_gray_map_without_legend() {
        let data = DashboardData::new(Vec::new(), vec![square(6, 0.0)], names());
        let svg = render_map(&data, CanvasSize::default());
        assert!(svg.find_all("rect").is_empty());
        assert_eq!(svg.find_all("path")[0].get_attr("fill"), Some(NO_DATA_FILL));
    }
}
