//! Point-sampling helpers shared by the pattern generators.
//!
//! All angles are degrees, measured from 3 o'clock and increasing clockwise
//! on the y-down canvas (the PIL convention the generators were specified
//! against).

use kurbo::Point;

/// `sides` points evenly spaced on the circle of `radius` around `center`,
/// vertex `i` at `rotation_deg + i * 360/sides`.
pub fn regular_polygon_points(
    center: Point,
    radius: f64,
    sides: u32,
    rotation_deg: f64,
) -> Vec<Point> {
    let step = 360.0 / f64::from(sides);
    (0..sides)
        .map(|i| {
            let theta = (rotation_deg + f64::from(i) * step).to_radians();
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}

/// Samples `samples` points around an axis-aligned ellipse and rotates each
/// by `rotation_deg` about `center`. Closing the polyline is the caller's
/// concern.
pub fn rotated_ellipse_points(
    center: Point,
    radius_x: f64,
    radius_y: f64,
    rotation_deg: f64,
    samples: u32,
) -> Vec<Point> {
    let rot = rotation_deg.to_radians();
    let (sin_r, cos_r) = rot.sin_cos();
    (0..samples)
        .map(|i| {
            let t = f64::from(i) / f64::from(samples) * std::f64::consts::TAU;
            let ex = radius_x * t.cos();
            let ey = radius_y * t.sin();
            Point::new(
                center.x + ex * cos_r - ey * sin_r,
                center.y + ex * sin_r + ey * cos_r,
            )
        })
        .collect()
}
