use simplengine_common::DrawContext;
use simplengine_kernel::Scene;

use crate::camera::Camera;
use crate::pass::CameraPass;
use crate::surface::DebugSurface;

/// Draw every body of `scene` onto `surface` through `camera`.
/// Returns the number of culled draw commands.
pub fn render_scene(scene: &Scene, camera: &Camera, surface: &mut dyn DrawContext) -> usize {
    let mut pass = CameraPass::new(*camera, surface);
    scene.draw(&mut pass);
    pass.culled()
}

/// Renderer interface. Renderers read the scene and camera and produce
/// output; they never mutate the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and camera.
    fn render(&self, scene: &Scene, camera: &Camera) -> Self::Output;
}

/// Renders a frame into a [`DebugSurface`] and returns its text dump.
#[derive(Debug, Clone, Copy)]
pub struct DebugTextRenderer {
    width: u32,
    height: u32,
}

impl DebugTextRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &Camera) -> String {
        let mut surface = DebugSurface::new(self.width, self.height);
        let culled = render_scene(scene, camera, &mut surface);
        let p = camera.position();
        let mut out = format!(
            "Scene: tick={} bodies={} culled={}\nCamera: pos=({:.1}, {:.1}) zoom={:.2}\n",
            scene.tick(),
            scene.len(),
            culled,
            p.x(),
            p.y(),
            camera.zoom()
        );
        out.push_str(&surface.dump());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplengine_kernel::RectBody;

    #[test]
    fn debug_renderer_empty_scene() {
        let scene = Scene::new();
        let out = DebugTextRenderer::new(800, 600).render(&scene, &Camera::new());
        assert!(out.contains("bodies=0"));
        assert!(out.contains("Commands: 0"));
    }

    #[test]
    fn debug_renderer_with_bodies() {
        let mut scene = Scene::new();
        scene.spawn(RectBody::new(10.0, 10.0, 0.0, 0.0));
        scene.spawn(RectBody::new(10.0, 10.0, 9000.0, 0.0));
        let out = DebugTextRenderer::new(800, 600).render(&scene, &Camera::new());
        assert!(out.contains("bodies=2"));
        // One rect on screen (fill + stroke), the other culled twice.
        assert!(out.contains("Commands: 2"));
        assert!(out.contains("culled=2"));
    }

    #[test]
    fn render_scene_uses_camera_transform() {
        let mut scene = Scene::new();
        scene.spawn(RectBody::new(10.0, 10.0, 100.0, 0.0));
        let mut camera = Camera::new();
        camera.set_zoom(2.0);
        let mut surface = DebugSurface::new(800, 600);
        render_scene(&scene, &camera, &mut surface);
        let b = surface.commands()[0].bounds();
        assert_eq!((b.x, b.y, b.width), (600.0, 300.0, 20.0));
    }
}
