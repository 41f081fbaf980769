#![forbid(unsafe_code)]

//! The per-acquisition state machine.

use std::sync::Arc;

use tracing::debug;

use crate::{AcquisitionObserver, AcquisitionStatus};

/// Externally visible state of one acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    NotStarted,
    InProgress,
    Completed,
    Canceled,
}

impl AcquisitionState {
    /// Terminal states never transition further.
    pub fn is_terminal(self) -> bool {
        matches!(self, AcquisitionState::Completed | AcquisitionState::Canceled)
    }
}

/// Drives observer notifications for one acquisition.
///
/// Transitions return whether they happened; illegal ones are ignored and
/// return `false`. That makes the contract structural: `on_started` fires
/// at most once, progress only while in progress, and exactly one terminal
/// callback is ever delivered. Intended to be driven from a single task —
/// `&mut self` rules out interleaving by construction.
pub struct AcquisitionLifecycle {
    state: AcquisitionState,
    observer: Arc<dyn AcquisitionObserver>,
}

impl AcquisitionLifecycle {
    pub fn new(observer: Arc<dyn AcquisitionObserver>) -> Self {
        Self {
            state: AcquisitionState::NotStarted,
            observer,
        }
    }

    pub fn state(&self) -> AcquisitionState {
        self.state
    }

    /// NotStarted → InProgress.
    pub fn started(&mut self) -> bool {
        if self.state != AcquisitionState::NotStarted {
            return false;
        }
        self.state = AcquisitionState::InProgress;
        self.observer.on_started();
        true
    }

    /// Progress report, delivered only while InProgress. The fraction is
    /// clamped to `0.0..=1.0`.
    pub fn progressed(&mut self, fraction: f32) -> bool {
        if self.state != AcquisitionState::InProgress {
            return false;
        }
        self.observer.on_progressed(fraction.clamp(0.0, 1.0));
        true
    }

    /// NotStarted | InProgress → Canceled.
    ///
    /// A cancel that lands before the drive begins still terminates the
    /// acquisition; `on_started` then never fires.
    pub fn canceled(&mut self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        self.state = AcquisitionState::Canceled;
        debug!("acquisition canceled");
        self.observer.on_canceled();
        true
    }

    /// InProgress → Completed.
    pub fn ended(&mut self, status: AcquisitionStatus) -> bool {
        if self.state != AcquisitionState::InProgress {
            return false;
        }
        self.state = AcquisitionState::Completed;
        debug!(?status, "acquisition ended");
        self.observer.on_ended(status);
        true
    }
}
