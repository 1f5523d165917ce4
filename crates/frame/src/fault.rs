use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Return type of update and render callbacks.
pub type CallbackResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Which callback a fault came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Update,
    Render,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Update => f.write_str("update"),
            Phase::Render => f.write_str("render"),
        }
    }
}

/// A fault raised by a callback and absorbed by the frame loop.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{phase} callback failed on frame {frame}: {message}")]
pub struct FrameFault {
    pub phase: Phase,
    /// Index of the frame in which the fault happened, starting at 0.
    pub frame: u64,
    pub message: String,
    /// True if the callback panicked rather than returning an error.
    pub panicked: bool,
}

impl FrameFault {
    pub(crate) fn from_error(
        phase: Phase,
        frame: u64,
        err: &(dyn std::error::Error + Send + Sync),
    ) -> Self {
        Self {
            phase,
            frame,
            message: err.to_string(),
            panicked: false,
        }
    }

    pub(crate) fn from_panic(phase: Phase, frame: u64, payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_owned()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "callback panicked".to_owned()
        };
        Self {
            phase,
            frame,
            message,
            panicked: true,
        }
    }
}

/// Running fault counter plus the most recent fault.
#[derive(Debug, Default)]
pub(crate) struct FaultLog {
    count: AtomicU64,
    last: Mutex<Option<FrameFault>>,
}

impl FaultLog {
    pub(crate) fn record(&self, fault: FrameFault) {
        let n = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        if n == 1 {
            tracing::warn!(%fault, "first callback fault in frame loop");
        } else {
            tracing::debug!(%fault, total = n, "callback fault");
        }
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(fault);
    }

    pub(crate) fn count(&self) -> u64 {
        self.count.load(Ordering::SeqCst)
    }

    pub(crate) fn last(&self) -> Option<FrameFault> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
