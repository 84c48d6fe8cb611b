//! Executes draw commands into a premultiplied RGBA8 pixmap.

use kurbo::{Arc, BezPath, Circle, Point, Shape, Vec2};

use crate::{
    command::{DrawCommand, Stroke},
    error::{GeoloomError, GeoloomResult},
};

/// Flattening tolerance for circles and arcs, in working-canvas pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Strokes `commands` in order onto a fresh transparent canvas of
/// `size x size` working pixels.
pub fn rasterize(commands: &[DrawCommand], size: u32) -> GeoloomResult<vello_cpu::Pixmap> {
    let dim: u16 = size
        .try_into()
        .map_err(|_| GeoloomError::render("working canvas dimension exceeds u16"))?;

    let mut pixmap = vello_cpu::Pixmap::new(dim, dim);
    let mut ctx = vello_cpu::RenderContext::new(dim, dim);
    for command in commands {
        draw_command(&mut ctx, command)?;
    }
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

fn draw_command(ctx: &mut vello_cpu::RenderContext, command: &DrawCommand) -> GeoloomResult<()> {
    let path = command_path(command)?;
    apply_stroke(ctx, command.stroke());
    ctx.stroke_path(&bezpath_to_cpu(&path));
    Ok(())
}

fn command_path(command: &DrawCommand) -> GeoloomResult<BezPath> {
    match command {
        DrawCommand::Circle { center, radius, .. } => {
            Ok(Circle::new(*center, *radius).to_path(PATH_TOLERANCE))
        }
        DrawCommand::Polyline { points, .. } => {
            if points.len() < 2 {
                return Err(GeoloomError::geometry("polyline needs at least 2 points"));
            }
            Ok(polyline_path(points, false))
        }
        DrawCommand::Polygon { points, .. } => {
            if points.len() < 3 {
                return Err(GeoloomError::geometry("polygon needs at least 3 points"));
            }
            Ok(polyline_path(points, true))
        }
        DrawCommand::Arc {
            bounds,
            start_deg,
            end_deg,
            ..
        } => {
            // Degrees from 3 o'clock, clockwise on the y-down canvas; the
            // same convention kurbo uses in y-down coordinates.
            let arc = Arc {
                center: bounds.center(),
                radii: Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0),
                start_angle: start_deg.to_radians(),
                sweep_angle: (end_deg - start_deg).to_radians(),
                x_rotation: 0.0,
            };
            Ok(arc.to_path(PATH_TOLERANCE))
        }
        DrawCommand::Rect { bounds, .. } => Ok(bounds.to_path(PATH_TOLERANCE)),
    }
}

fn polyline_path(points: &[Point], close: bool) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(points[0]);
    for &p in &points[1..] {
        path.line_to(p);
    }
    if close {
        path.close_path();
    }
    path
}

fn apply_stroke(ctx: &mut vello_cpu::RenderContext, stroke: Stroke) {
    let color = stroke.color;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        color.r, color.g, color.b, color.a,
    ));
    // Round joins and caps match the soft line look of the wide glow pass.
    ctx.set_stroke(
        vello_cpu::kurbo::Stroke::new(stroke.width)
            .with_caps(vello_cpu::kurbo::Cap::Round)
            .with_join(vello_cpu::kurbo::Join::Round),
    );
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}
