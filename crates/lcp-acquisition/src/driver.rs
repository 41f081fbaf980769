#![forbid(unsafe_code)]

//! The acquisition driver: source stream → sink, reported through the
//! lifecycle.

use std::sync::Arc;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    AcquisitionError, AcquisitionLifecycle, AcquisitionObserver, AcquisitionOutcome,
    AcquisitionSink, AcquisitionStatus,
};

/// Pumps a chunk stream into a sink, reporting through an observer.
///
/// The driver owns the cancellation token (hand
/// [`cancellation_token`](Self::cancellation_token) to whoever may cancel)
/// and an optional expected total length, which is what progress fractions
/// are computed against. Without it, no progress is reported — start and
/// terminal callbacks still are.
pub struct Acquisition<S> {
    source: S,
    observer: Arc<dyn AcquisitionObserver>,
    cancel: CancellationToken,
    expected_len: Option<u64>,
}

impl<S, E> Acquisition<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    pub fn new(source: S, observer: Arc<dyn AcquisitionObserver>) -> Self {
        Self {
            source,
            observer,
            cancel: CancellationToken::new(),
            expected_len: None,
        }
    }

    /// Expected total byte count, the denominator of progress fractions.
    pub fn with_expected_len(mut self, len: u64) -> Self {
        self.expected_len = Some(len);
        self
    }

    /// Use an externally owned cancellation token.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that cancels this acquisition when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Drive the fetch to its end.
    ///
    /// Runs until the source is exhausted, either side fails, or the token
    /// fires. The sink sees exactly one of `commit` / `abort`; terminal
    /// failures travel in the returned outcome and the `on_ended` status,
    /// never as a panic or an `Err`. After a cancellation no `Completed`
    /// outcome is ever produced.
    pub async fn run<K>(mut self, sink: &mut K) -> AcquisitionOutcome
    where
        K: AcquisitionSink,
    {
        let mut lifecycle = AcquisitionLifecycle::new(self.observer.clone());
        lifecycle.started();

        let mut written: u64 = 0;
        let mut chunks: u64 = 0;

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    debug!(written, "acquisition cancelled");
                    if let Err(e) = sink.abort().await {
                        warn!(error = %e, "sink abort after cancel failed");
                    }
                    lifecycle.canceled();
                    return AcquisitionOutcome::Canceled;
                }

                next = self.source.next() => {
                    let Some(next) = next else { break };

                    let chunk = match next {
                        Ok(chunk) => chunk,
                        Err(e) => {
                            let error = AcquisitionError::Source(e.to_string());
                            return fail(sink, &mut lifecycle, error, true).await;
                        }
                    };

                    if chunk.is_empty() {
                        warn!(written, "empty source chunk skipped");
                        continue;
                    }

                    let len = chunk.len() as u64;
                    if let Err(e) = sink.write(chunk).await {
                        let error = AcquisitionError::Sink(e.to_string());
                        return fail(sink, &mut lifecycle, error, true).await;
                    }

                    written = written.saturating_add(len);
                    chunks = chunks.saturating_add(1);
                    if chunks == 1 {
                        debug!(written, "first chunk written");
                    }

                    if let Some(total) = self.expected_len {
                        if total > 0 {
                            let fraction = (written as f64 / total as f64).min(1.0) as f32;
                            lifecycle.progressed(fraction);
                        }
                    }
                }
            }
        }

        if let Err(e) = sink.commit().await {
            let error = AcquisitionError::Sink(e.to_string());
            // The sink already saw its finalizing call; no abort on top.
            return fail(sink, &mut lifecycle, error, false).await;
        }

        debug!(written, chunks, "acquisition complete");
        let status = AcquisitionStatus::Succeeded;
        lifecycle.ended(status.clone());
        AcquisitionOutcome::Completed(status)
    }
}

/// Materialize a failure: best-effort abort, terminal callback, outcome.
async fn fail<K>(
    sink: &mut K,
    lifecycle: &mut AcquisitionLifecycle,
    error: AcquisitionError,
    abort_sink: bool,
) -> AcquisitionOutcome
where
    K: AcquisitionSink,
{
    if abort_sink {
        if let Err(e) = sink.abort().await {
            warn!(error = %e, "sink abort after failure failed");
        }
    }
    let status = AcquisitionStatus::Failed(error);
    lifecycle.ended(status.clone());
    AcquisitionOutcome::Completed(status)
}
