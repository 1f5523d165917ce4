use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D vector of `f64` components.
///
/// Values are immutable: `add`/`subtract` and the `with_*` builders return a
/// new vector. Owners that track a moving quantity (position, velocity) keep a
/// `Vector2` field and replace it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Copy of this vector with `x` replaced.
    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    /// Copy of this vector with `y` replaced.
    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add(self, other: Vector2) -> Self {
        self.add_xy(other.x, other.y)
    }

    pub fn add_xy(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn subtract(self, other: Vector2) -> Self {
        self.subtract_xy(other.x, other.y)
    }

    pub fn subtract_xy(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x - dx, self.y - dy)
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vector2) -> f64 {
        DVec2::from(self).distance(other.into())
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::subtract(self, rhs)
    }
}

impl From<DVec2> for Vector2 {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Vector2> for DVec2 {
    fn from(v: Vector2) -> Self {
        DVec2::new(v.x, v.y)
    }
}

/// Axis-aligned bounding box: top-left corner plus size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Closed-interval overlap test. Boxes that only share an edge intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_returns_new_value() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -4.0);
        let c = a.add(b);
        assert_eq!(c, Vector2::new(4.0, -2.0));
        // Operands are untouched.
        assert_eq!(a, Vector2::new(1.0, 2.0));
        assert_eq!(b, Vector2::new(3.0, -4.0));
    }

    #[test]
    fn scalar_add_and_subtract() {
        let v = Vector2::new(10.0, 10.0);
        assert_eq!(v.add_xy(5.0, -2.5), Vector2::new(15.0, 7.5));
        assert_eq!(v.subtract_xy(5.0, -2.5), Vector2::new(5.0, 12.5));
    }

    #[test]
    fn operators_match_methods() {
        let a = Vector2::new(0.5, 1.5);
        let b = Vector2::new(2.0, 3.0);
        assert_eq!(a + b, a.add(b));
        assert_eq!(a - b, a.subtract(b));
    }

    #[test]
    fn with_builders_replace_one_component() {
        let v = Vector2::new(1.0, 2.0);
        assert_eq!(v.with_x(9.0), Vector2::new(9.0, 2.0));
        assert_eq!(v.with_y(9.0), Vector2::new(1.0, 9.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let d = Vector2::ZERO.distance(Vector2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn glam_conversion() {
        let v: DVec2 = Vector2::new(1.0, -1.0).into();
        assert_eq!(v, DVec2::new(1.0, -1.0));
        assert_eq!(Vector2::from(v), Vector2::new(1.0, -1.0));
    }

    #[test]
    fn touching_edges_intersect() {
        let a = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let b = Bounds::new(100.0, 0.0, 50.0, 50.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        let a = Bounds::new(0.0, 0.0, 100.0, 50.0);
        let b = Bounds::new(151.0, 0.0, 50.0, 50.0);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn vertical_separation() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(0.0, 10.5, 10.0, 10.0);
        assert!(!a.intersects(&b));
    }
}
