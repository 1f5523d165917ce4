use serde::{Deserialize, Serialize};

use crate::types::Bounds;

/// Opaque handle to a decoded image owned by an external asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageHandle(pub u64);

/// Descriptor of a decoded image as handed back by an asset loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub handle: ImageHandle,
    pub width: u32,
    pub height: u32,
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A single drawing instruction for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Filled axis-aligned rectangle.
    FillRect { bounds: Bounds, color: Color },
    /// Rectangle outline.
    StrokeRect { bounds: Bounds, color: Color },
    /// Image stretched over `bounds`. `source` selects a sub-region of the
    /// image in pixels; `None` draws the whole image.
    Image {
        image: ImageHandle,
        source: Option<Bounds>,
        bounds: Bounds,
    },
}

impl DrawCommand {
    pub fn bounds(&self) -> Bounds {
        match self {
            DrawCommand::FillRect { bounds, .. }
            | DrawCommand::StrokeRect { bounds, .. }
            | DrawCommand::Image { bounds, .. } => *bounds,
        }
    }

    /// The same command targeting different bounds.
    pub fn with_bounds(self, bounds: Bounds) -> Self {
        match self {
            DrawCommand::FillRect { color, .. } => DrawCommand::FillRect { bounds, color },
            DrawCommand::StrokeRect { color, .. } => DrawCommand::StrokeRect { bounds, color },
            DrawCommand::Image { image, source, .. } => DrawCommand::Image {
                image,
                source,
                bounds,
            },
        }
    }
}

/// A display surface for one frame.
///
/// Implementations own presentation. The engine only needs the surface size
/// (for camera transforms) and somewhere to submit draw commands.
pub trait DrawContext {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn submit(&mut self, command: DrawCommand);
}
