//! Grab state for the element under the current gesture.

use crate::elements::Element;
use crate::error::{EngineError, EngineResult};
use crate::geometry::Position;
use kurbo::{Point, Vec2};

/// Cursor offsets captured when an element is grabbed.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Offsets {
    /// Element was created by the gesture, nothing to track.
    #[default]
    Empty,
    /// Cursor minus the box's first corner.
    Box(Vec2),
    /// Cursor minus each pencil point.
    Points(Vec<Vec2>),
}

/// The element a gesture is working on.
///
/// `element` is the copy taken when the gesture started. Moves and resizes
/// are always computed from it, not from the in-gesture snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub element: Element,
    /// Where the element was grabbed. `None` for freshly created elements.
    pub position: Option<Position>,
    pub offsets: Offsets,
    /// Cursor position when the element was grabbed.
    pub grab_point: Option<Point>,
}

impl Selection {
    /// Selection for an element the gesture just created.
    pub fn created(element: Element) -> Self {
        Self {
            element,
            position: None,
            offsets: Offsets::Empty,
            grab_point: None,
        }
    }

    /// Selection for an element grabbed at `point` on `position`.
    pub fn grab(element: &Element, position: Position, point: Point) -> Self {
        let offsets = match element {
            Element::Pencil(pencil) => Offsets::Points(pencil.offsets_from(point)),
            _ => match element.coords() {
                Some(coords) => Offsets::Box(point - coords.start()),
                None => Offsets::Empty,
            },
        };
        Self {
            element: element.clone(),
            position: Some(position),
            offsets,
            grab_point: Some(point),
        }
    }

    /// The grabbed element repositioned so the grab point follows `cursor`.
    pub fn moved_to(&self, cursor: Point) -> EngineResult<Element> {
        match (&self.element, &self.offsets) {
            (Element::Pencil(pencil), Offsets::Points(offsets)) => {
                Ok(Element::Pencil(pencil.repositioned(cursor, offsets)))
            }
            (element, Offsets::Box(offset)) => {
                let coords = element.coords().ok_or(EngineError::UnsupportedElement {
                    kind: element.kind(),
                    operation: "move",
                })?;
                element.with_coords(coords.moved_to(cursor - *offset))
            }
            (element, _) => Err(EngineError::UnsupportedElement {
                kind: element.kind(),
                operation: "move",
            }),
        }
    }

    /// Whether releasing at `cursor` is a click on a box element: the
    /// pointer came back up exactly where it went down.
    pub fn is_click(&self, cursor: Point) -> bool {
        matches!(self.offsets, Offsets::Box(_)) && self.grab_point == Some(cursor)
    }
}
