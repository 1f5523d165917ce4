use glam::DVec2;
use serde::{Deserialize, Serialize};
use simplengine_common::{CameraConfig, Vector2};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

pub const MIN_ZOOM: f64 = 0.1;
pub const MIN_FOLLOW_SPEED: f64 = 0.01;
pub const MAX_FOLLOW_SPEED: f64 = 1.0;

/// Follow speed is expressed per frame at this reference rate.
const REFERENCE_FPS: f64 = 60.0;

/// 2D camera: view center in world space, zoom and follow smoothing.
///
/// Screen space has its origin at the top-left corner; the camera position
/// maps to the center of the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "CameraState")]
pub struct Camera {
    position: Vector2,
    zoom: f64,
    follow_speed: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vector2::ZERO,
            zoom: 1.0,
            follow_speed: 0.1,
        }
    }
}

/// Serialized camera fields, clamped on the way in.
#[derive(Deserialize)]
struct CameraState {
    position: Vector2,
    zoom: f64,
    follow_speed: f64,
}

impl From<CameraState> for Camera {
    fn from(state: CameraState) -> Self {
        let mut camera = Self {
            position: state.position,
            ..Self::default()
        };
        camera.set_zoom(state.zoom);
        camera.set_follow_speed(state.follow_speed);
        camera
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Camera at the origin with zoom and follow speed taken from `config`,
    /// clamped to their valid ranges.
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::default();
        camera.set_zoom(config.zoom);
        camera.set_follow_speed(config.follow_speed);
        camera
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vector2) {
        self.position = position;
    }

    pub fn move_by(&mut self, dx: f64, dy: f64) {
        self.position = self.position.add_xy(dx, dy);
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Values below 0.1 are raised to 0.1.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.max(MIN_ZOOM);
    }

    pub fn follow_speed(&self) -> f64 {
        self.follow_speed
    }

    /// Clamped to [0.01, 1.0].
    pub fn set_follow_speed(&mut self, speed: f64) {
        self.follow_speed = speed.max(MIN_FOLLOW_SPEED).min(MAX_FOLLOW_SPEED);
    }

    pub fn world_to_screen(
        &self,
        world_x: f64,
        world_y: f64,
        screen_width: u32,
        screen_height: u32,
    ) -> Vector2 {
        Vector2::new(
            (world_x - self.position.x()) * self.zoom + screen_width as f64 / 2.0,
            (world_y - self.position.y()) * self.zoom + screen_height as f64 / 2.0,
        )
    }

    /// Inverse of [`Camera::world_to_screen`].
    pub fn screen_to_world(
        &self,
        screen_x: f64,
        screen_y: f64,
        screen_width: u32,
        screen_height: u32,
    ) -> Vector2 {
        Vector2::new(
            (screen_x - screen_width as f64 / 2.0) / self.zoom + self.position.x(),
            (screen_y - screen_height as f64 / 2.0) / self.zoom + self.position.y(),
        )
    }

    /// Jump directly to `(x, y)`.
    pub fn center_on(&mut self, x: f64, y: f64) {
        self.position = Vector2::new(x, y);
    }

    pub fn center_on_point(&mut self, target: Vector2) {
        self.position = target;
    }

    /// Move a fraction of the remaining distance toward the target.
    ///
    /// The fraction is `follow_speed * dt * 60`, capped at 1, so a given
    /// follow speed looks the same at any frame rate and never overshoots.
    pub fn follow(&mut self, target_x: f64, target_y: f64, dt: f64) {
        let factor = (self.follow_speed * dt * REFERENCE_FPS).min(1.0);
        let current = DVec2::from(self.position);
        let target = DVec2::new(target_x, target_y);
        self.position = current.lerp(target, factor).into();
    }

    pub fn follow_target(&mut self, target: Vector2, dt: f64) {
        self.follow(target.x(), target.y(), dt);
    }
}

/// A camera shared between the frame loop and other threads.
///
/// Cloning shares the same camera. Use [`SharedCamera::new`] for an isolated
/// instance or [`SharedCamera::global`] for the one process-wide camera.
#[derive(Debug, Clone, Default)]
pub struct SharedCamera {
    inner: Arc<RwLock<Camera>>,
}

impl SharedCamera {
    pub fn new(camera: Camera) -> Self {
        Self {
            inner: Arc::new(RwLock::new(camera)),
        }
    }

    /// The process-wide camera, created on first access.
    pub fn global() -> &'static SharedCamera {
        static GLOBAL: OnceLock<SharedCamera> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            tracing::debug!("creating global camera");
            SharedCamera::default()
        })
    }

    /// Copy of the current camera state.
    pub fn snapshot(&self) -> Camera {
        *self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with<R>(&self, f: impl FnOnce(&Camera) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Camera) -> R) -> R {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// True when both handles refer to the same camera.
    pub fn ptr_eq(&self, other: &SharedCamera) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
