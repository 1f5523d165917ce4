//! Simulation kernel: bodies, integration and collision tests.
//!
//! # Invariants
//! - A body always has a position and a velocity; both start at zero.
//! - Velocity is updated before it is applied to position within a step.
//! - Collision tests are symmetric and treat touching edges as overlap.

pub mod body;
pub mod collision;
pub mod rect;
pub mod scene;
pub mod sprite;

pub use body::{Body, GRAVITY, Kinematics};
pub use collision::{colliding_pairs, intersects};
pub use rect::RectBody;
pub use scene::{BodyId, Scene};
pub use sprite::{SpriteBody, SpriteError};

pub fn crate_info() -> &'static str {
    "simplengine-kernel v0.1.0"
}
