#![forbid(unsafe_code)]

//! Acquisition of protected publication resources.
//!
//! An acquisition fetches the encrypted bytes a license link points at and
//! reports how that goes. [`AcquisitionLifecycle`] is the notification
//! contract: `on_started` at most once, any number of `on_progressed`
//! fractions, then exactly one of `on_canceled` / `on_ended`.
//! [`Acquisition`] drives the contract while pumping a chunk stream into an
//! [`AcquisitionSink`]; cancellation is cooperative via a
//! `CancellationToken`.
//!
//! Where the bytes come from is not this crate's concern — any
//! `Stream<Item = Result<Bytes, E>>` will do.

mod driver;
mod error;
mod lifecycle;
mod observer;
mod sink;

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use driver::Acquisition;
pub use error::AcquisitionError;
pub use lifecycle::{AcquisitionLifecycle, AcquisitionState};
pub use observer::{AcquisitionObserver, AcquisitionOutcome, AcquisitionStatus};
pub use sink::{AcquisitionSink, FileSink, VecSink};
