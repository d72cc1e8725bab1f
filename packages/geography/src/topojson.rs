//! `TopoJSON` to `GeoJSON` conversion.
//!
//! Decoding (quantized arcs, transform, stitching) is done by the
//! `topojson` crate. This module picks the named object, reports a missing
//! one by name, and makes sure every feature keeps its object id, which
//! the map resolves to a state name.

use geojson::{Feature, feature::Id};
use topojson::TopoJson;

use crate::TopologyError;

/// A parsed topology document.
#[derive(Debug)]
pub struct BoundaryTopology {
    raw: serde_json::Value,
    topology: topojson::Topology,
}

impl BoundaryTopology {
    /// Parses a `TopoJSON` document.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError`] if the text is not JSON, not valid
    /// `TopoJSON`, or a bare geometry instead of a topology.
    pub fn parse(text: &str) -> Result<Self, TopologyError> {
        let raw: serde_json::Value = serde_json::from_str(text)?;
        let parsed = text
            .parse::<TopoJson>()
            .map_err(|e| TopologyError::Decode {
                message: e.to_string(),
            })?;

        match parsed {
            TopoJson::Topology(topology) => Ok(Self { raw, topology }),
            TopoJson::Geometry(_) => Err(TopologyError::NotATopology),
        }
    }

    /// Converts the named object into `GeoJSON` features, one per member
    /// of a geometry collection.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::MissingObject`] if the topology has no
    /// object called `object`, or [`TopologyError::Decode`] if conversion
    /// fails.
    pub fn features(&self, object: &str) -> Result<Vec<Feature>, TopologyError> {
        let Some(source) = self.raw.get("objects").and_then(|o| o.get(object)) else {
            return Err(TopologyError::MissingObject {
                name: object.to_string(),
            });
        };

        let collection =
            topojson::to_geojson(&self.topology, object).map_err(|e| TopologyError::Decode {
                message: e.to_string(),
            })?;

        let ids = object_ids(source);
        let features: Vec<Feature> = collection
            .features
            .into_iter()
            .enumerate()
            .map(|(i, mut feature)| {
                if feature.id.is_none() {
                    feature.id = ids.get(i).cloned().flatten();
                }
                feature
            })
            .collect();

        log::debug!(
            "Decoded {} features from topology object '{object}'",
            features.len()
        );

        Ok(features)
    }
}

/// Ids of the object's members, in order. A single geometry yields one id.
fn object_ids(object: &serde_json::Value) -> Vec<Option<Id>> {
    let id_of = |geometry: &serde_json::Value| match geometry.get("id") {
        Some(serde_json::Value::String(s)) => Some(Id::String(s.clone())),
        Some(serde_json::Value::Number(n)) => Some(Id::Number(n.clone())),
        _ => None,
    };

    match object.get("geometries").and_then(serde_json::Value::as_array) {
        Some(members) => members.iter().map(id_of).collect(),
        None => vec![id_of(object)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARES: &str = r#"{
        "type": "Topology",
        "transform": {"scale": [10.0, 10.0], "translate": [100.0, 200.0]},
        "arcs": [
            [[0, 0], [2, 0], [0, 2]],
            [[2, 2], [-2, 0], [0, -2]]
        ],
        "objects": {
            "states": {
                "type": "GeometryCollection",
                "geometries": [
                    {"type": "Polygon", "id": "06", "arcs": [[0, 1]]},
                    {"type": "Polygon", "id": 48, "arcs": [[0, 1]]}
                ]
            }
        }
    }"#;

    #[test]
    fn decodes_named_object_and_keeps_ids() {
        let features = BoundaryTopology::parse(SQUARES)
            .unwrap()
            .features("states")
            .unwrap();

        assert_eq!(features.len(), 2);
        assert_eq!(features[0].id, Some(Id::String("06".to_string())));
        assert_eq!(features[1].id, Some(Id::Number(48.into())));

        match &features[0].geometry.as_ref().unwrap().value {
            geojson::Value::Polygon(rings) => {
                assert_eq!(rings[0].first(), Some(&vec![100.0, 200.0]));
                assert!(rings[0].contains(&vec![120.0, 220.0]));
                assert_eq!(rings[0].first(), rings[0].last());
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn missing_object_is_reported_by_name() {
        let err = BoundaryTopology::parse(SQUARES)
            .unwrap()
            .features("counties")
            .unwrap_err();
        assert!(matches!(err, TopologyError::MissingObject { ref name } if name == "counties"));
    }
}
