#![forbid(unsafe_code)]

//! Test doubles for acquisition observers.

use parking_lot::Mutex;

use crate::{AcquisitionObserver, AcquisitionStatus};

/// One observed callback, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ObservedEvent {
    Started,
    Progressed(f32),
    Canceled,
    Ended(AcquisitionStatus),
}

impl ObservedEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ObservedEvent::Canceled | ObservedEvent::Ended(_))
    }
}

/// Observer that records every callback for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ObservedEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObservedEvent> {
        self.events.lock().clone()
    }

    /// Progress fractions seen so far, in order.
    pub fn fractions(&self) -> Vec<f32> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                ObservedEvent::Progressed(fraction) => Some(*fraction),
                _ => None,
            })
            .collect()
    }

    /// Number of terminal events seen; the contract allows at most one.
    pub fn terminal_count(&self) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|event| event.is_terminal())
            .count()
    }
}

impl AcquisitionObserver for RecordingObserver {
    fn on_started(&self) {
        self.events.lock().push(ObservedEvent::Started);
    }

    fn on_progressed(&self, fraction: f32) {
        self.events.lock().push(ObservedEvent::Progressed(fraction));
    }

    fn on_canceled(&self) {
        self.events.lock().push(ObservedEvent::Canceled);
    }

    fn on_ended(&self, status: AcquisitionStatus) {
        self.events.lock().push(ObservedEvent::Ended(status));
    }
}
