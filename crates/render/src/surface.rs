use simplengine_common::{DrawCommand, DrawContext};
use std::fmt::Write;

/// Recording display surface.
///
/// Collects the draw commands of the current frame and can dump them as text.
/// Stands in for a window in the CLI and in tests.
#[derive(Debug, Clone, Default)]
pub struct DebugSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
    frames_presented: u64,
}

impl DebugSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Resize the surface. Takes effect for the next frame's transforms.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Finish the frame: returns its commands and starts an empty one.
    pub fn present(&mut self) -> Vec<DrawCommand> {
        self.frames_presented += 1;
        std::mem::take(&mut self.commands)
    }

    /// Human-readable listing of the pending commands.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Frame {} ({}x{}) ===",
            self.frames_presented, self.width, self.height
        );
        let _ = writeln!(out, "Commands: {}", self.commands.len());
        for command in &self.commands {
            let b = command.bounds();
            let kind = match command {
                DrawCommand::FillRect { .. } => "fill",
                DrawCommand::StrokeRect { .. } => "stroke",
                DrawCommand::Image { .. } => "image",
            };
            let _ = writeln!(
                out,
                "  {kind:<6} at=({:.1}, {:.1}) size=({:.1}, {:.1})",
                b.x, b.y, b.width, b.height
            );
        }
        out
    }
}

impl DrawContext for DebugSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplengine_common::{Bounds, Color};

    #[test]
    fn empty_dump() {
        let surface = DebugSurface::new(800, 600);
        let out = surface.dump();
        assert!(out.contains("800x600"));
        assert!(out.contains("Commands: 0"));
    }

    #[test]
    fn present_drains_frame() {
        let mut surface = DebugSurface::new(800, 600);
        surface.submit(DrawCommand::FillRect {
            bounds: Bounds::new(1.0, 2.0, 3.0, 4.0),
            color: Color::WHITE,
        });
        assert!(surface.dump().contains("fill"));
        let frame = surface.present();
        assert_eq!(frame.len(), 1);
        assert!(surface.commands().is_empty());
        assert_eq!(surface.frames_presented(), 1);
    }

    #[test]
    fn resize_updates_dimensions() {
        let mut surface = DebugSurface::new(800, 600);
        surface.resize(1024, 768);
        assert_eq!((surface.width(), surface.height()), (1024, 768));
    }
}
