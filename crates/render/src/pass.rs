use simplengine_common::{Bounds, DrawCommand, DrawContext};

use crate::camera::Camera;

/// A draw context that maps world-space commands into screen space.
///
/// Bodies draw in world coordinates; wrapping the real surface in a
/// `CameraPass` applies the camera transform and drops commands that land
/// entirely off screen.
pub struct CameraPass<'a> {
    camera: Camera,
    target: &'a mut dyn DrawContext,
    culled: usize,
}

impl<'a> CameraPass<'a> {
    pub fn new(camera: Camera, target: &'a mut dyn DrawContext) -> Self {
        Self {
            camera,
            target,
            culled: 0,
        }
    }

    /// Commands dropped because they were outside the screen.
    pub fn culled(&self) -> usize {
        self.culled
    }

    fn to_screen(&self, world: Bounds) -> Bounds {
        let top_left =
            self.camera
                .world_to_screen(world.x, world.y, self.target.width(), self.target.height());
        let zoom = self.camera.zoom();
        Bounds::new(
            top_left.x(),
            top_left.y(),
            world.width * zoom,
            world.height * zoom,
        )
    }
}

impl DrawContext for CameraPass<'_> {
    fn width(&self) -> u32 {
        self.target.width()
    }

    fn height(&self) -> u32 {
        self.target.height()
    }

    fn submit(&mut self, command: DrawCommand) {
        let screen = Bounds::new(0.0, 0.0, self.width() as f64, self.height() as f64);
        let bounds = self.to_screen(command.bounds());
        if !bounds.intersects(&screen) {
            self.culled += 1;
            return;
        }
        self.target.submit(command.with_bounds(bounds));
    }
}
