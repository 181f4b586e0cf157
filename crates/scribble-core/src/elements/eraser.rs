//! Eraser stroke.

use super::ElementId;
use kurbo::{Point, Rect, Vec2};

/// Default side of the square cleared around each eraser point.
pub const ERASER_SIZE: f64 = 20.0;

/// An eraser stroke. Never selectable.
#[derive(Debug, Clone, PartialEq)]
pub struct Eraser {
    pub(crate) id: ElementId,
    pub points: Vec<Point>,
}

impl Eraser {
    pub fn new(id: ElementId, start: Point) -> Self {
        Self {
            id,
            points: vec![start],
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn with_point(&self, point: Point) -> Self {
        let mut copy = self.clone();
        copy.points.push(point);
        copy
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            id: self.id,
            points: self.points.iter().map(|p| *p + delta).collect(),
        }
    }

    /// Squares of side `size` cleared by this stroke, one per point.
    ///
    /// Each square has its top-left corner on the point.
    pub fn cleared_rects(&self, size: f64) -> impl Iterator<Item = Rect> + '_ {
        self.points
            .iter()
            .map(move |p| Rect::new(p.x, p.y, p.x + size, p.y + size))
    }
}
