use serde::{Deserialize, Serialize};
use simplengine_common::{Bounds, DrawCommand, DrawContext, ImageHandle, ImageInfo, Vector2};

use crate::body::{Body, Kinematics};

/// Errors from selecting a sprite-sheet region.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpriteError {
    #[error("region origin must be non-negative and size positive: ({x}, {y}, {width}, {height})")]
    InvalidRegion {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error(
        "region ({x}, {y}, {width}, {height}) is outside the image bounds ({image_width}, {image_height})"
    )]
    RegionOutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        image_width: u32,
        image_height: u32,
    },
}

/// Image-backed body.
///
/// Holds a handle to an image decoded by an external loader, a base size in
/// pixels and a per-axis scale. Bounds use the scaled size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteBody {
    kinematics: Kinematics,
    image: Option<ImageHandle>,
    /// Pixel region of the image to draw; `None` for the whole image.
    source: Option<Bounds>,
    width: u32,
    height: u32,
    scale_x: f64,
    scale_y: f64,
}

impl SpriteBody {
    /// A sprite with no image yet. It draws nothing until one is set.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            kinematics: Kinematics::at(Vector2::new(x, y)),
            image: None,
            source: None,
            width: 0,
            height: 0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// A sprite showing `image` at its native size.
    pub fn from_image(image: ImageInfo, x: f64, y: f64) -> Self {
        let mut sprite = Self::new(x, y);
        sprite.set_image(image, false);
        sprite
    }

    /// A sprite showing `image` stretched to `width` x `height`.
    pub fn from_image_sized(image: ImageInfo, x: f64, y: f64, width: u32, height: u32) -> Self {
        let mut sprite = Self::from_image(image, x, y);
        sprite.set_size(width, height);
        sprite
    }

    pub fn image(&self) -> Option<ImageHandle> {
        self.image
    }

    pub fn source(&self) -> Option<Bounds> {
        self.source
    }

    /// Replace the image. Unless `keep_size` is set, the base size becomes
    /// the image's native size.
    pub fn set_image(&mut self, image: ImageInfo, keep_size: bool) {
        self.image = Some(image.handle);
        self.source = None;
        if !keep_size {
            self.width = image.width;
            self.height = image.height;
        }
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.source = None;
    }

    /// Show one region of a sprite sheet. Unless `keep_size` is set, the base
    /// size becomes the region size.
    pub fn set_image_region(
        &mut self,
        sheet: ImageInfo,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        keep_size: bool,
    ) -> Result<(), SpriteError> {
        if x < 0 || y < 0 || width <= 0 || height <= 0 {
            return Err(SpriteError::InvalidRegion {
                x,
                y,
                width,
                height,
            });
        }
        let fits_x = x as u64 + width as u64 <= sheet.width as u64;
        let fits_y = y as u64 + height as u64 <= sheet.height as u64;
        if !fits_x || !fits_y {
            return Err(SpriteError::RegionOutOfBounds {
                x,
                y,
                width,
                height,
                image_width: sheet.width,
                image_height: sheet.height,
            });
        }

        self.image = Some(sheet.handle);
        self.source = Some(Bounds::new(
            x as f64,
            y as f64,
            width as f64,
            height as f64,
        ));
        if !keep_size {
            self.width = width as u32;
            self.height = height as u32;
        }
        Ok(())
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }

    pub fn set_uniform_scale(&mut self, scale: f64) {
        self.set_scale(scale, scale);
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Unscaled width in pixels.
    pub fn base_width(&self) -> u32 {
        self.width
    }

    /// Unscaled height in pixels.
    pub fn base_height(&self) -> u32 {
        self.height
    }

    /// Scaled width, truncated to whole pixels.
    pub fn width(&self) -> u32 {
        (self.width as f64 * self.scale_x) as u32
    }

    /// Scaled height, truncated to whole pixels.
    pub fn height(&self) -> u32 {
        (self.height as f64 * self.scale_y) as u32
    }
}

impl Body for SpriteBody {
    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    fn bounds(&self) -> Bounds {
        let p = self.kinematics.position;
        Bounds::new(p.x(), p.y(), self.width() as f64, self.height() as f64)
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        let Some(image) = self.image else {
            return;
        };
        ctx.submit(DrawCommand::Image {
            image,
            source: self.source,
            bounds: self.bounds(),
        });
    }
}
