//! Progress reporting for resource loading.
//!
//! The loader reports one unit of work per resource that finishes. The
//! [`ProgressCallback`] trait keeps it independent of how progress is
//! shown (an `indicatif` bar in the CLI, nothing at all in tests).

use std::sync::Arc;

/// Receives progress updates while resources load.
///
/// Implementations must be `Send + Sync` since the three loads run as
/// concurrent futures sharing one callback.
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected units of work.
    fn set_total(&self, total: u64);

    /// Records `delta` more finished resources.
    fn inc(&self, delta: u64);

    /// Replaces the status text.
    fn set_message(&self, msg: String);

    /// Marks loading as done.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}
