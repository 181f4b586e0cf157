//! Straight line element.

use super::{ElementId, Primitive, Style};
use crate::geometry::BoxCoords;
use kurbo::{Line as KurboLine, Shape};

/// A straight segment from `(x1, y1)` to `(x2, y2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: ElementId,
    pub coords: BoxCoords,
    pub style: Style,
    primitive: Primitive,
}

impl Line {
    pub fn new(id: ElementId, coords: BoxCoords, style: &Style) -> Self {
        Self {
            id,
            coords,
            style: *style,
            primitive: Self::outline(coords),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Copy with new endpoints.
    pub fn with_coords(&self, coords: BoxCoords) -> Self {
        Self::new(self.id, coords, &self.style)
    }

    fn outline(coords: BoxCoords) -> Primitive {
        Primitive::new(KurboLine::new(coords.start(), coords.end()).to_path(0.1))
    }
}
