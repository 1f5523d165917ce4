//! Rendering side of the engine: the 2D camera and draw-command plumbing.
//!
//! # Invariants
//! - Renderers read scene and camera state; they never mutate bodies.
//! - Camera zoom stays at or above 0.1 and follow speed within [0.01, 1.0].
//!
//! Presentation is external. [`DebugSurface`] is a recording surface used by
//! the CLI and tests in place of a window.

mod camera;
mod pass;
mod renderer;
mod surface;

pub use camera::{Camera, MAX_FOLLOW_SPEED, MIN_FOLLOW_SPEED, MIN_ZOOM, SharedCamera};
pub use pass::CameraPass;
pub use renderer::{DebugTextRenderer, Renderer, render_scene};
pub use surface::DebugSurface;

pub fn crate_info() -> &'static str {
    "simplengine-render v0.1.0"
}
