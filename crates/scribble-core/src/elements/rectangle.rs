//! Rectangle element.

use super::{ElementId, Primitive, Style};
use crate::geometry::BoxCoords;
use kurbo::Shape;

/// An axis-aligned rectangle spanning two corners.
///
/// The corners may be in any order until the creating gesture finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub(crate) id: ElementId,
    pub coords: BoxCoords,
    pub style: Style,
    primitive: Primitive,
}

impl Rectangle {
    pub fn new(id: ElementId, coords: BoxCoords, style: &Style) -> Self {
        Self {
            id,
            coords,
            style: *style,
            primitive: Primitive::new(coords.to_rect().to_path(0.1)),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn primitive(&self) -> &Primitive {
        &self.primitive
    }

    /// Copy with new corners.
    pub fn with_coords(&self, coords: BoxCoords) -> Self {
        Self::new(self.id, coords, &self.style)
    }
}
