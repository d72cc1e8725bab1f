//! Incident-record document parsing.

use incident_map_incident_models::{IncidentRecord, ResourceKind};

use crate::SourceError;

/// Extracts the incident records from a parsed JSON document.
///
/// The records array lives under the top-level `field`; an empty `field`
/// means the document itself is the array. Individual records are parsed
/// leniently (see [`IncidentRecord::from_value`]).
///
/// # Errors
///
/// Returns [`SourceError::InvalidInput`] if the field is missing or does
/// not hold an array.
pub fn parse_records(
    document: &serde_json::Value,
    field: &str,
) -> Result<Vec<IncidentRecord>, SourceError> {
    let container = if field.is_empty() {
        Some(document)
    } else {
        document.get(field)
    };

    let items = container
        .and_then(serde_json::Value::as_array)
        .ok_or_else(|| SourceError::InvalidInput {
            resource: ResourceKind::IncidentRecords,
            message: if field.is_empty() {
                "expected the document to be an array of records".to_string()
            } else {
                format!("expected an array of records under top-level field '{field}'")
            },
        })?;

    Ok(items.iter().map(IncidentRecord::from_value).collect())
}
