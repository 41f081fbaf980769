#![forbid(unsafe_code)]

//! Observer surface acquisitions report into.

use crate::AcquisitionError;

/// Terminal status delivered by `on_ended`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionStatus {
    Succeeded,
    Failed(AcquisitionError),
}

/// Outcome of a driven acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionOutcome {
    /// The fetch ran to an end; the status says how it went.
    Completed(AcquisitionStatus),
    /// Cancellation was requested and honored; no `Completed` follows.
    Canceled,
}

/// Callback surface for one acquisition.
///
/// A platform bridge implements this once and owns all marshaling and
/// handle lifetime behind it; the core only holds the trait object. Calls
/// for one acquisition arrive in order: `on_started` first (when it fires
/// at all), then progress, then exactly one of `on_canceled` / `on_ended`.
/// Nothing follows a terminal call.
pub trait AcquisitionObserver: Send + Sync {
    fn on_started(&self);

    /// Fraction of the expected total fetched so far, in `0.0..=1.0`;
    /// non-decreasing by convention, not enforced.
    fn on_progressed(&self, fraction: f32);

    fn on_canceled(&self);

    fn on_ended(&self, status: AcquisitionStatus);
}
