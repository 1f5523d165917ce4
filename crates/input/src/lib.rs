//! Input snapshots: key and mouse state fed by an external event source.
//!
//! # Invariants
//! - A key is "pressed" only on the frame it goes down, not while held.
//! - Per-frame edges (pressed/released) are cleared by `end_frame`.

pub mod key;
pub mod state;

pub use key::{Key, MouseButton};
pub use state::InputState;

pub fn crate_info() -> &'static str {
    "simplengine-input v0.1.0"
}
