//! Color-scale domain of the state choropleth.

use incident_map_incident_models::AggregateTable;

/// Number of state keys a complete dataset produces: 50 states, DC, and
/// one unknown-location bucket.
pub const COMPLETE_STATE_KEYS: usize = 51;

/// Returns the `[min, max]` domain for the state color scale.
///
/// The minimum is the smallest state count only when the table has exactly
/// [`COMPLETE_STATE_KEYS`] keys; for any other (sparser or messier) table
/// the lower bound is pinned to 0. Returns `None` for an empty table.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn state_color_domain(by_state: &AggregateTable) -> Option<(f64, f64)> {
    let max = by_state.max_value()?;
    let min = if by_state.len() == COMPLETE_STATE_KEYS {
        by_state.min_value()?
    } else {
        0
    };

    Some((min as f64, max as f64))
}
