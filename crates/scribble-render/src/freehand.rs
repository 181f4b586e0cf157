//! Freehand stroke outlines.

use kurbo::{BezPath, Point};

/// Closed path through `points` using quadratic midpoint interpolation.
///
/// Each point is the control of a quadratic segment ending halfway to the
/// next point; the last segment wraps back toward the first point before
/// the path is closed.
pub fn freehand_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&first) = points.first() else {
        return path;
    };
    path.move_to(first);
    for (i, &control) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        path.quad_to(control, control.midpoint(next));
    }
    path.close_path();
    path
}
