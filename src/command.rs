use kurbo::{Point, Rect};

use crate::color::Rgba8;

/// Stroke styling shared by every draw command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba8,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Rgba8, width: f64) -> Self {
        Self { color, width }
    }

    /// Same color with the width grown by `extra` px (glow pass).
    pub fn widened(self, extra: f64) -> Self {
        Self {
            color: self.color,
            width: self.width + extra,
        }
    }
}

/// Backend-independent draw instruction produced by the generators and
/// consumed only by the rasterizer. Arc angles are degrees from 3 o'clock,
/// increasing clockwise on the y-down canvas.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Circle {
        center: Point,
        radius: f64,
        stroke: Stroke,
    },
    /// Open polyline through `points` (at least 2).
    Polyline { points: Vec<Point>, stroke: Stroke },
    /// Closed polygon through `points` (at least 3).
    Polygon { points: Vec<Point>, stroke: Stroke },
    Arc {
        bounds: Rect,
        start_deg: f64,
        end_deg: f64,
        stroke: Stroke,
    },
    Rect { bounds: Rect, stroke: Stroke },
}

impl DrawCommand {
    pub fn stroke(&self) -> Stroke {
        match self {
            Self::Circle { stroke, .. }
            | Self::Polyline { stroke, .. }
            | Self::Polygon { stroke, .. }
            | Self::Arc { stroke, .. }
            | Self::Rect { stroke, .. } => *stroke,
        }
    }

    /// Copy of the command with every stroke width grown by `extra` px.
    pub fn with_widened_stroke(&self, extra: f64) -> Self {
        let mut out = self.clone();
        let widened = self.stroke().widened(extra);
        match &mut out {
            Self::Circle { stroke, .. }
            | Self::Polyline { stroke, .. }
            | Self::Polygon { stroke, .. }
            | Self::Arc { stroke, .. }
            | Self::Rect { stroke, .. } => *stroke = widened,
        }
        out
    }
}
