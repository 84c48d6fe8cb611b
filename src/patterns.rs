//! One generator per pattern kind. Each is a pure function from (center,
//! parameters, stroke) to an ordered list of [`DrawCommand`]s; the
//! compositor decides resolution and layering.

use kurbo::{Point, Rect, Vec2};

use crate::{
    command::{DrawCommand, Stroke},
    geometry::{regular_polygon_points, rotated_ellipse_points},
    model::Pattern,
};

/// Samples per ellipse ring in the torus pattern.
const ELLIPSE_SAMPLES: u32 = 64;

/// Sri Yantra triangle scale ladder, outermost first.
const SRI_YANTRA_SCALES: [f64; 9] = [0.95, 0.78, 0.62, 0.48, 0.36, 0.26, 0.18, 0.12, 0.07];

/// Exhaustive dispatch over the pattern kinds. Deterministic and
/// side-effect-free; command order is the paint order.
pub fn generate(pattern: &Pattern, center: Point, stroke: Stroke) -> Vec<DrawCommand> {
    match *pattern {
        Pattern::FlowerOfLife { radius, layers } => flower_of_life(center, radius, layers, stroke),
        Pattern::SeedOfLife { radius } => seed_of_life(center, radius, stroke),
        Pattern::MetatronsCube { radius } => metatrons_cube(center, radius, stroke),
        Pattern::SriYantra { radius } => sri_yantra(center, radius, stroke),
        Pattern::VesicaPiscis { radius } => vesica_piscis(center, radius, stroke),
        Pattern::Merkaba { radius } => merkaba(center, radius, stroke),
        Pattern::GoldenSpiral { scale, iterations } => {
            spiral(center, scale, iterations, stroke, SpiralStyle::ArcsOnly)
        }
        Pattern::FibonacciSpiral { scale, iterations } => {
            spiral(center, scale, iterations, stroke, SpiralStyle::ArcsAndRects)
        }
        Pattern::Torus { radius, rings } => torus(center, radius, rings, stroke),
        Pattern::Icosahedron { radius } => icosahedron(center, radius, stroke),
        Pattern::TetrahedronGrid { radius, layers } => {
            tetrahedron_grid(center, radius, layers, stroke)
        }
    }
}

fn circle(center: Point, radius: f64, stroke: Stroke) -> DrawCommand {
    DrawCommand::Circle {
        center,
        radius,
        stroke,
    }
}

fn polar(origin: Point, distance: f64, angle_deg: f64) -> Point {
    let theta = angle_deg.to_radians();
    origin + Vec2::new(distance * theta.cos(), distance * theta.sin())
}

/// Hexagonal close-packed circle lattice. For each layer, six hub centers
/// sit at `layer * radius` along 60-degree spokes; each hub then walks
/// `layer` steps along its spoke angle + 120 degrees, dropping a circle at
/// every step (step 0 is the hub itself).
fn flower_of_life(center: Point, radius: f64, layers: u32, stroke: Stroke) -> Vec<DrawCommand> {
    let mut cmds = vec![circle(center, radius, stroke)];
    for layer in 1..=layers {
        for i in 0..6u32 {
            let spoke = f64::from(i) * 60.0;
            let hub = polar(center, f64::from(layer) * radius, spoke);
            let walk = f64::from(i + 2) * 60.0;
            for step in 0..layer {
                let c = polar(hub, f64::from(step) * radius, walk);
                cmds.push(circle(c, radius, stroke));
            }
        }
    }
    cmds
}

/// Central circle plus six neighbors at distance `radius` on 60-degree
/// spokes; seven circles total.
fn seed_of_life(center: Point, radius: f64, stroke: Stroke) -> Vec<DrawCommand> {
    let mut cmds = vec![circle(center, radius, stroke)];
    for i in 0..6u32 {
        cmds.push(circle(polar(center, radius, f64::from(i) * 60.0), radius, stroke));
    }
    cmds
}

/// Thirteen circles (center, inner hex ring, outer hex ring) plus a line
/// between every unordered pair of centers: C(13,2) = 78 lines.
fn metatrons_cube(center: Point, radius: f64, stroke: Stroke) -> Vec<DrawCommand> {
    let mut centers = vec![center];
    for ring in [1.0, 2.0] {
        for i in 0..6u32 {
            centers.push(polar(center, ring * radius, f64::from(i) * 60.0));
        }
    }

    let mut cmds: Vec<DrawCommand> = centers
        .iter()
        .map(|&c| circle(c, radius, stroke))
        .collect();
    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            cmds.push(DrawCommand::Polyline {
                points: vec![centers[i], centers[j]],
                stroke,
            });
        }
    }
    cmds
}

fn inscribed_triangle(center: Point, radius: f64, apex_up: bool) -> Vec<Point> {
    // Apex straight up is -90 degrees on the y-down canvas.
    let rotation = if apex_up { -90.0 } else { 90.0 };
    regular_polygon_points(center, radius, 3, rotation)
}

/// Outer circle plus nine interlocking triangles of alternating orientation
/// on a fixed scale ladder.
fn sri_yantra(center: Point, radius: f64, stroke: Stroke) -> Vec<DrawCommand> {
    let mut cmds = vec![circle(center, radius, stroke)];
    for (i, s) in SRI_YANTRA_SCALES.iter().enumerate() {
        cmds.push(DrawCommand::Polygon {
            points: inscribed_triangle(center, s * radius, i % 2 == 0),
            stroke,
        });
    }
    cmds
}

/// Two equal circles whose centers sit half a radius either side of the
/// canvas center, so each passes through the other's center.
fn vesica_piscis(center: Point, radius: f64, stroke: Stroke) -> Vec<DrawCommand> {
    vec![
        circle(center - Vec2::new(radius / 2.0, 0.0), radius, stroke),
        circle(center + Vec2::new(radius / 2.0, 0.0), radius, stroke),
    ]
}

fn merkaba(center: Point, radius: f64, stroke: Stroke) -> Vec<DrawCommand> {
    vec![
        DrawCommand::Polygon {
            points: inscribed_triangle(center, radius, true),
            stroke,
        },
        DrawCommand::Polygon {
            points: inscribed_triangle(center, radius, false),
            stroke,
        },
        circle(center, radius, stroke),
    ]
}

#[derive(Clone, Copy, PartialEq)]
enum SpiralStyle {
    ArcsOnly,
    /// Also draw each quarter-turn's bounding rectangle (golden rectangles).
    ArcsAndRects,
}

/// Quarter-circle arcs whose radii follow the Fibonacci recurrence. The
/// cursor walks the four cardinal directions round-robin; each arc is
/// tangent to the previous one and the cursor advances to the new tangent
/// point. The golden variant seeds (0, 1), the fibonacci variant (1, 1).
fn spiral(
    center: Point,
    scale: f64,
    iterations: u32,
    stroke: Stroke,
    style: SpiralStyle,
) -> Vec<DrawCommand> {
    let (mut a, mut b) = match style {
        SpiralStyle::ArcsOnly => (0.0f64, 1.0f64),
        SpiralStyle::ArcsAndRects => (1.0, 1.0),
    };
    let (mut x, mut y) = (center.x, center.y);
    let mut direction = 0u8;

    let rect_stroke = Stroke::new(stroke.color, (stroke.width / 2.0).max(1.0));

    let mut cmds = Vec::new();
    for _ in 0..iterations {
        let r = b * scale;
        let (bounds, start_deg, end_deg) = match direction {
            0 => (Rect::new(x - r, y, x + r, y + 2.0 * r), 270.0, 360.0),
            1 => (Rect::new(x - 2.0 * r, y - r, x, y + r), 0.0, 90.0),
            2 => (Rect::new(x - r, y - 2.0 * r, x + r, y), 90.0, 180.0),
            _ => (Rect::new(x, y - r, x + 2.0 * r, y + r), 180.0, 270.0),
        };
        match direction {
            0 => x += r,
            1 => y += r,
            2 => x -= r,
            _ => y -= r,
        }

        cmds.push(DrawCommand::Arc {
            bounds,
            start_deg,
            end_deg,
            stroke,
        });
        if style == SpiralStyle::ArcsAndRects {
            cmds.push(DrawCommand::Rect {
                bounds,
                stroke: rect_stroke,
            });
        }

        (a, b) = (b, a + b);
        direction = (direction + 1) % 4;
    }
    cmds
}

/// Tube torus: `rings` tilted ellipses approximated as closed 64-point
/// polylines, fanned a full turn around the center.
fn torus(center: Point, radius: f64, rings: u32, stroke: Stroke) -> Vec<DrawCommand> {
    let step = 360.0 / f64::from(rings);
    (0..rings)
        .map(|i| DrawCommand::Polygon {
            points: rotated_ellipse_points(
                center,
                radius,
                0.4 * radius,
                f64::from(i) * step,
                ELLIPSE_SAMPLES,
            ),
            stroke,
        })
        .collect()
}

/// 2D projection of the icosahedron vertex graph: nested pentagons with
/// criss-cross edges, plus top and bottom pole vertices.
fn icosahedron(center: Point, radius: f64, stroke: Stroke) -> Vec<DrawCommand> {
    let outer = regular_polygon_points(center, radius, 5, -90.0);
    let inner = regular_polygon_points(center, radius * 0.5, 5, -90.0 + 36.0);

    let mut cmds = vec![
        DrawCommand::Polygon {
            points: outer.clone(),
            stroke,
        },
        DrawCommand::Polygon {
            points: inner.clone(),
            stroke,
        },
    ];

    // Each outer vertex to its two nearest inner vertices.
    for i in 0..5 {
        for inner_idx in [i, (i + 4) % 5] {
            cmds.push(DrawCommand::Polyline {
                points: vec![outer[i], inner[inner_idx]],
                stroke,
            });
        }
    }

    let top = center - Vec2::new(0.0, 1.4 * radius);
    let bottom = center + Vec2::new(0.0, 1.4 * radius);
    for &v in &outer[0..3] {
        cmds.push(DrawCommand::Polyline {
            points: vec![top, v],
            stroke,
        });
    }
    for &v in &outer[2..5] {
        cmds.push(DrawCommand::Polyline {
            points: vec![bottom, v],
            stroke,
        });
    }
    cmds
}

/// Triangular lattice: one upward equilateral triangle per cell of a
/// (2*layers+1)^2 hex-offset grid, odd rows shifted half a cell.
fn tetrahedron_grid(center: Point, radius: f64, layers: u32, stroke: Stroke) -> Vec<DrawCommand> {
    let span = i64::from(layers);
    let row_pitch = radius * 3.0f64.sqrt() / 2.0;
    // Circumradius of an equilateral triangle with side = radius.
    let circumradius = radius / 3.0f64.sqrt();

    let mut cmds = Vec::new();
    for row in -span..=span {
        let shift = if row.rem_euclid(2) == 1 { radius / 2.0 } else { 0.0 };
        for col in -span..=span {
            let cell = Point::new(
                center.x + col as f64 * radius + shift,
                center.y + row as f64 * row_pitch,
            );
            cmds.push(DrawCommand::Polygon {
                points: regular_polygon_points(cell, circumradius, 3, -90.0),
                stroke,
            });
        }
    }
    cmds
}
