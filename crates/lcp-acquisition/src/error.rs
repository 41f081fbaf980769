#![forbid(unsafe_code)]

use thiserror::Error;

/// Terminal acquisition failures.
///
/// Carried inside [`AcquisitionStatus::Failed`](crate::AcquisitionStatus)
/// rather than returned as `Err`: the lifecycle contract is the reporting
/// channel, so the type is cloneable and comparable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    #[error("source failed: {0}")]
    Source(String),

    #[error("sink failed: {0}")]
    Sink(String),
}
