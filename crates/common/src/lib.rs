//! Shared types for the simplengine workspace: 2D vectors, bounding boxes,
//! the display-surface interface and engine configuration.
//!
//! # Invariants
//! - `Vector2` arithmetic never mutates its operands.
//! - Surfaces receive fully specified draw commands; no pixel format is implied.

pub mod config;
pub mod draw;
pub mod types;

pub use config::{CameraConfig, ConfigError, EngineConfig, ScreenConfig};
pub use draw::{Color, DrawCommand, DrawContext, ImageHandle, ImageInfo};
pub use types::{Bounds, Vector2};

pub fn crate_info() -> &'static str {
    "simplengine-common v0.1.0"
}
