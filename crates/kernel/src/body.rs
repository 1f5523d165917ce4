use serde::{Deserialize, Serialize};
use simplengine_common::{Bounds, DrawContext, Vector2};
use std::fmt;

/// Downward acceleration applied to bodies with gravity, in px/s².
pub const GRAVITY: f64 = 981.0;

/// Position, velocity and gravity flag shared by every body variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vector2,
    pub velocity: Vector2,
    pub has_gravity: bool,
}

impl Kinematics {
    /// At rest at `position`, gravity disabled.
    pub fn at(position: Vector2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Advance by `dt` seconds with semi-implicit Euler: gravity first
    /// changes velocity, then the new velocity moves the position.
    pub fn integrate(&mut self, dt: f64) {
        if self.has_gravity {
            self.velocity = self.velocity.add_xy(0.0, GRAVITY * dt);
        }
        self.position = self
            .position
            .add_xy(self.velocity.x() * dt, self.velocity.y() * dt);
    }
}

/// Capability interface implemented by every simulated body variant.
///
/// Variants own a [`Kinematics`] slot and report their own bounds and drawing.
/// `update` and `intersects` are provided in terms of those.
pub trait Body: fmt::Debug + Send {
    fn kinematics(&self) -> &Kinematics;

    fn kinematics_mut(&mut self) -> &mut Kinematics;

    /// World-space axis-aligned bounds used for collision tests.
    fn bounds(&self) -> Bounds;

    /// Submit this body's draw commands in world space.
    fn draw(&self, ctx: &mut dyn DrawContext);

    fn update(&mut self, dt: f64) {
        self.kinematics_mut().integrate(dt);
    }

    fn intersects(&self, other: &dyn Body) -> bool {
        crate::collision::intersects(self, other)
    }

    fn position(&self) -> Vector2 {
        self.kinematics().position
    }

    fn set_position(&mut self, position: Vector2) {
        self.kinematics_mut().position = position;
    }

    fn velocity(&self) -> Vector2 {
        self.kinematics().velocity
    }

    fn set_velocity(&mut self, velocity: Vector2) {
        self.kinematics_mut().velocity = velocity;
    }

    fn has_gravity(&self) -> bool {
        self.kinematics().has_gravity
    }

    fn set_gravity(&mut self, enabled: bool) {
        self.kinematics_mut().has_gravity = enabled;
    }
}
