//! Freehand pencil stroke.

use super::ElementId;
use kurbo::{Point, Vec2};

/// A freehand stroke through an ordered list of points.
#[derive(Debug, Clone, PartialEq)]
pub struct Pencil {
    pub(crate) id: ElementId,
    pub points: Vec<Point>,
    pub stroke_width: f64,
}

impl Pencil {
    pub fn new(id: ElementId, start: Point, stroke_width: f64) -> Self {
        Self {
            id,
            points: vec![start],
            stroke_width,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// Copy with one more point at the end.
    pub fn with_point(&self, point: Point) -> Self {
        let mut copy = self.clone();
        copy.points.push(point);
        copy
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| *p + delta).collect(),
            ..self.clone()
        }
    }

    /// Rebuild every point as `cursor - offsets[i]`.
    ///
    /// `offsets` are the per-point offsets captured when the stroke was
    /// grabbed. Points without a recorded offset keep their position.
    pub fn repositioned(&self, cursor: Point, offsets: &[Vec2]) -> Self {
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| offsets.get(i).map_or(*p, |offset| cursor - *offset))
            .collect();
        Self {
            points,
            ..self.clone()
        }
    }

    /// Offsets from each point to `cursor`, as used by [`Pencil::repositioned`].
    pub fn offsets_from(&self, cursor: Point) -> Vec<Vec2> {
        self.points.iter().map(|p| cursor - *p).collect()
    }
}
