//! Bounding "container" shape drawn over the pattern.

use kurbo::{Point, Rect};

use crate::{
    command::{DrawCommand, Stroke},
    geometry::regular_polygon_points,
    model::{ContainerConfig, ContainerShape},
};

/// Builds the single draw command for a container shape. `canvas_size` is
/// the working canvas edge; the effective bounding radius is
/// `(canvas_size / 2) * (scale_percent / 100)`. Rectangle half-extents, when
/// present in the config, must already be scaled to the working resolution
/// by the caller.
pub fn generate_container(
    config: &ContainerConfig,
    center: Point,
    canvas_size: f64,
    stroke_width: f64,
) -> DrawCommand {
    let radius = canvas_size / 2.0 * (config.scale_percent / 100.0);
    let stroke = Stroke::new(config.stroke_color, stroke_width);

    match config.shape {
        ContainerShape::Circle => DrawCommand::Circle {
            center,
            radius,
            stroke,
        },
        ContainerShape::Square => DrawCommand::Rect {
            bounds: centered_rect(center, radius, radius),
            stroke,
        },
        ContainerShape::Rectangle => {
            let half_w = config.rect_length.unwrap_or(radius);
            let half_h = config.rect_width.unwrap_or(0.6 * radius);
            DrawCommand::Rect {
                bounds: centered_rect(center, half_w, half_h),
                stroke,
            }
        }
        // First vertex pulled back from 3 o'clock so the shapes read upright.
        ContainerShape::Triangle => polygon(center, radius, 3, -90.0, stroke),
        ContainerShape::Hexagon => polygon(center, radius, 6, -30.0, stroke),
        ContainerShape::Octagon => polygon(center, radius, 8, -22.5, stroke),
    }
}

fn centered_rect(center: Point, half_w: f64, half_h: f64) -> Rect {
    Rect::new(
        center.x - half_w,
        center.y - half_h,
        center.x + half_w,
        center.y + half_h,
    )
}

fn polygon(center: Point, radius: f64, sides: u32, rotation_deg: f64, stroke: Stroke) -> DrawCommand {
    DrawCommand::Polygon {
        points: regular_polygon_points(center, radius, sides, rotation_deg),
        stroke,
    }
}
