#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! State boundary geometry for the incident map.
//!
//! Decodes `TopoJSON` topologies (shared, quantized arcs) into `GeoJSON`
//! features that the map view can draw, and provides a built-in FIPS
//! state-name table for runs that have no external name file.

pub mod fips;
pub mod topojson;

use thiserror::Error;

/// Errors that can occur while decoding a topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// The document is not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested named object does not exist in the topology.
    #[error("Topology has no object named '{name}'")]
    MissingObject {
        /// The object name that was requested.
        name: String,
    },

    /// The document is not valid `TopoJSON` or could not be converted.
    #[error("TopoJSON error: {message}")]
    Decode {
        /// Description of what went wrong.
        message: String,
    },

    /// The document is a bare geometry, not a topology.
    #[error("Document is not a TopoJSON topology")]
    NotATopology,
}
