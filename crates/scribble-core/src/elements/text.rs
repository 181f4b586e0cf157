//! Text element.

use super::ElementId;
use crate::geometry::BoxCoords;
use kurbo::Point;

/// A single line of text anchored at its top-left corner `(x1, y1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub(crate) id: ElementId,
    pub coords: BoxCoords,
    /// Content. Empty while the element is first being typed.
    pub text: String,
}

impl Text {
    pub fn new(id: ElementId, origin: Point) -> Self {
        Self {
            id,
            coords: BoxCoords::at(origin),
            text: String::new(),
        }
    }

    /// Text whose box is sized from a measured width and the line height.
    pub fn retyped(id: ElementId, origin: Point, text: String, measured_width: f64, line_height: f64) -> Self {
        Self {
            id,
            coords: BoxCoords::new(origin.x, origin.y, origin.x + measured_width, origin.y + line_height),
            text,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn origin(&self) -> Point {
        self.coords.start()
    }

    /// Copy with a new box. The content is kept.
    pub fn with_coords(&self, coords: BoxCoords) -> Self {
        Self {
            id: self.id,
            coords,
            text: self.text.clone(),
        }
    }
}
