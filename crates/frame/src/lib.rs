//! Frame scheduler: a background loop that calls update then render once per
//! frame and sleeps to hold a target frame rate.
//!
//! # Invariants
//! - At most one loop thread per scheduler is running at a time.
//! - A failing or panicking callback never ends the loop; the fault is
//!   recorded and counted instead.
//! - Overrun frames are not skipped or clamped; the next `dt` is simply larger.

mod fault;
mod scheduler;
mod timer;

pub use fault::{CallbackResult, FrameFault, Phase};
pub use scheduler::{RenderFn, Scheduler, SchedulerError, STOP_TIMEOUT, UpdateFn};
pub use timer::{FrameStats, FrameTimer};

pub fn crate_info() -> &'static str {
    "simplengine-frame v0.1.0"
}
