use serde::{Deserialize, Serialize};
use simplengine_common::{Bounds, Color, DrawCommand, DrawContext, Vector2};

use crate::body::{Body, Kinematics};

/// Solid rectangle body drawn as a white fill with a black outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectBody {
    kinematics: Kinematics,
    width: f64,
    height: f64,
}

impl RectBody {
    pub fn new(width: f64, height: f64, x: f64, y: f64) -> Self {
        Self {
            kinematics: Kinematics::at(Vector2::new(x, y)),
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl Body for RectBody {
    fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    fn kinematics_mut(&mut self) -> &mut Kinematics {
        &mut self.kinematics
    }

    fn bounds(&self) -> Bounds {
        let p = self.kinematics.position;
        Bounds::new(p.x(), p.y(), self.width, self.height)
    }

    fn draw(&self, ctx: &mut dyn DrawContext) {
        let bounds = self.bounds();
        ctx.submit(DrawCommand::FillRect {
            bounds,
            color: Color::WHITE,
        });
        ctx.submit(DrawCommand::StrokeRect {
            bounds,
            color: Color::BLACK,
        });
    }
}
