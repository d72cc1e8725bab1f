#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of the three dashboard inputs.
//!
//! [`load_all`] fetches the incident records, the state boundary topology
//! and the state-name table concurrently and only succeeds if all three
//! do. The first failure aborts the whole load; nothing is rendered from
//! a partial set of inputs.

pub mod location;
pub mod progress;
pub mod records;
pub mod retry;
pub mod state_names;

use std::sync::Arc;
use std::time::Duration;

use incident_map_geography::TopologyError;
use incident_map_geography::fips::builtin_state_names;
use incident_map_geography::topojson::BoundaryTopology;
use incident_map_incident_models::{IncidentRecord, ResourceKind, StateNameTable};
use serde::{Deserialize, Serialize};

use crate::location::ResourceLocation;
use crate::progress::ProgressCallback;

/// Errors that can occur while loading resources.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Final URL of the request.
        url: String,
        /// Response status code.
        status: reqwest::StatusCode,
    },

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// TSV parsing failed.
    #[error("TSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The topology could not be decoded.
    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),

    /// The resource parsed but does not have the expected shape.
    #[error("Invalid {resource}: {message}")]
    InvalidInput {
        /// Which resource was malformed.
        resource: ResourceKind,
        /// Description of what went wrong.
        message: String,
    },

    /// The location cannot be read as text.
    #[error("Location '{location}' cannot be read as text")]
    NotReadable {
        /// The offending location.
        location: String,
    },

    /// Wraps another error with the resource that failed.
    #[error("Failed to load {resource} from {location}: {source}")]
    Load {
        /// Which resource failed.
        resource: ResourceKind,
        /// Where it was loaded from.
        location: String,
        /// The underlying error.
        #[source]
        source: Box<Self>,
    },
}

impl SourceError {
    fn in_resource(self, resource: ResourceKind, location: &ResourceLocation) -> Self {
        Self::Load {
            resource,
            location: location.to_string(),
            source: Box::new(self),
        }
    }
}

/// Where the three inputs come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Incident-record JSON location.
    pub records: String,
    /// Top-level field holding the records array (empty for a bare array).
    #[serde(default = "default_records_field")]
    pub records_field: String,
    /// `TopoJSON` location.
    pub topology: String,
    /// Name of the topology object holding the state geometries.
    #[serde(default = "default_topology_object")]
    pub topology_object: String,
    /// State-name TSV location, or `builtin:fips`.
    pub state_names: String,
}

fn default_records_field() -> String {
    "data".to_string()
}

fn default_topology_object() -> String {
    "states".to_string()
}

/// Request behaviour for remote resources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// How many times a transient failure is retried (0 = never).
    pub retries: u32,
    /// Per-request timeout, if any.
    pub timeout: Option<Duration>,
}

/// The three inputs, fully parsed.
#[derive(Debug, Clone)]
pub struct LoadedResources {
    /// Incident records.
    pub records: Vec<IncidentRecord>,
    /// State boundary features decoded from the topology.
    pub features: Vec<geojson::Feature>,
    /// State id to name lookup.
    pub state_names: StateNameTable,
}

/// Loads all three resources concurrently.
///
/// # Errors
///
/// Returns the first [`SourceError`] raised by any of the three loads,
/// wrapped in [`SourceError::Load`]. The remaining loads are dropped.
pub async fn load_all(
    client: &reqwest::Client,
    config: &SourceConfig,
    options: &FetchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<LoadedResources, SourceError> {
    progress.set_total(ResourceKind::all().len() as u64);
    progress.set_message("Loading resources".to_string());

    let (records, features, state_names) = tokio::try_join!(
        load_records(client, config, options, progress),
        load_topology(client, config, options, progress),
        load_state_names(client, config, options, progress),
    )?;

    log::info!(
        "Loaded {} records, {} state features, {} state names",
        records.len(),
        features.len(),
        state_names.len()
    );
    progress.finish("Resources loaded".to_string());

    Ok(LoadedResources {
        records,
        features,
        state_names,
    })
}

/// Loads the incident-record collection.
///
/// # Errors
///
/// Returns [`SourceError::Load`] if the document cannot be read or has no
/// records array.
pub async fn load_records(
    client: &reqwest::Client,
    config: &SourceConfig,
    options: &FetchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let kind = ResourceKind::IncidentRecords;
    let location = ResourceLocation::parse(&config.records);

    let result = read_records(client, &location, &config.records_field, options).await;

    finish(kind, &location, result, progress)
}

/// Loads the topology and decodes the configured state object.
///
/// # Errors
///
/// Returns [`SourceError::Load`] if the document cannot be read or
/// decoded, or the object is missing.
pub async fn load_topology(
    client: &reqwest::Client,
    config: &SourceConfig,
    options: &FetchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<Vec<geojson::Feature>, SourceError> {
    let kind = ResourceKind::Topology;
    let location = ResourceLocation::parse(&config.topology);

    let result = read_topology(client, &location, &config.topology_object, options).await;

    finish(kind, &location, result, progress)
}

/// Loads the state-name table, either from TSV or the built-in FIPS list.
///
/// # Errors
///
/// Returns [`SourceError::Load`] if the file cannot be read or parsed.
pub async fn load_state_names(
    client: &reqwest::Client,
    config: &SourceConfig,
    options: &FetchOptions,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<StateNameTable, SourceError> {
    let kind = ResourceKind::StateNames;
    let location = ResourceLocation::parse(&config.state_names);

    let result = match &location {
        ResourceLocation::BuiltinFips => Ok(builtin_state_names()),
        _ => read_state_names(client, &location, options).await,
    };

    finish(kind, &location, result, progress)
}

async fn read_records(
    client: &reqwest::Client,
    location: &ResourceLocation,
    field: &str,
    options: &FetchOptions,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let text = location.read_text(client, options).await?;
    let document: serde_json::Value = serde_json::from_str(&text)?;
    records::parse_records(&document, field)
}

async fn read_topology(
    client: &reqwest::Client,
    location: &ResourceLocation,
    object: &str,
    options: &FetchOptions,
) -> Result<Vec<geojson::Feature>, SourceError> {
    let text = location.read_text(client, options).await?;
    Ok(BoundaryTopology::parse(&text)?.features(object)?)
}

async fn read_state_names(
    client: &reqwest::Client,
    location: &ResourceLocation,
    options: &FetchOptions,
) -> Result<StateNameTable, SourceError> {
    let text = location.read_text(client, options).await?;
    state_names::parse_state_names(&text)
}

fn finish<T>(
    kind: ResourceKind,
    location: &ResourceLocation,
    result: Result<T, SourceError>,
    progress: &Arc<dyn ProgressCallback>,
) -> Result<T, SourceError> {
    match result {
        Ok(value) => {
            log::debug!("Loaded {kind} from {location}");
            progress.inc(1);
            Ok(value)
        }
        Err(e) => {
            log::error!("Failed to load {kind} from {location}: {e}");
            Err(e.in_resource(kind, location))
        }
    }
}
