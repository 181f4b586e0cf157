//! Drawable element definitions.

mod eraser;
mod line;
mod pencil;
mod rectangle;
mod text;

pub use eraser::{ERASER_SIZE, Eraser};
pub use line::Line;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use text::Text;

use crate::error::{EngineError, EngineResult};
use crate::geometry::BoxCoords;
use kurbo::{BezPath, Point, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable element identifier.
///
/// Allocated in increasing order and never reused, so identity survives
/// undo, redo and any reordering of the element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out element ids.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}

/// The five element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Line,
    Rectangle,
    Pencil,
    Eraser,
    Text,
}

impl ElementKind {
    pub fn name(&self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Pencil => "pencil",
            ElementKind::Eraser => "eraser",
            ElementKind::Text => "text",
        }
    }

    /// Whether a finished gesture runs the element through
    /// [`normalize_coordinates`](crate::geometry::normalize_coordinates).
    pub fn needs_normalization(&self) -> bool {
        matches!(self, ElementKind::Line | ElementKind::Rectangle | ElementKind::Eraser)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ElementKind::Line),
            "rectangle" => Ok(ElementKind::Rectangle),
            "pencil" => Ok(ElementKind::Pencil),
            "eraser" => Ok(ElementKind::Eraser),
            "text" => Ok(ElementKind::Text),
            other => Err(EngineError::UnrecognizedElementKind(other.to_string())),
        }
    }
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn red() -> Self {
        Self::new(255, 0, 0, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> EngineResult<Self> {
        let invalid = || EngineError::Config(format!("Invalid color: {color}"));
        let hex = color.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        match hex.len() {
            3 => Ok(Self::new(
                channel(0..1)? * 17,
                channel(1..2)? * 17,
                channel(2..3)? * 17,
                255,
            )),
            6 => Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Ok(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub stroke_width: f64,
    pub color: SerializableColor,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke_width: 5.0,
            color: SerializableColor::red(),
        }
    }
}

/// Vector outline handed to the render adapter for lines and rectangles.
///
/// Built whenever the element's geometry changes; the engine never reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Primitive(BezPath);

impl Primitive {
    pub(crate) fn new(path: BezPath) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &BezPath {
        &self.0
    }
}

/// A drawable element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Line(Line),
    Rectangle(Rectangle),
    Pencil(Pencil),
    Eraser(Eraser),
    Text(Text),
}

impl Element {
    /// Build a fresh element of `kind`.
    ///
    /// Strokes start with the single point `(x1, y1)`. Text starts empty
    /// with a zero-size box at `(x1, y1)`.
    pub fn create(id: ElementId, coords: BoxCoords, kind: ElementKind, style: &Style) -> Self {
        match kind {
            ElementKind::Line => Element::Line(Line::new(id, coords, style)),
            ElementKind::Rectangle => Element::Rectangle(Rectangle::new(id, coords, style)),
            ElementKind::Pencil => Element::Pencil(Pencil::new(id, coords.start(), style.stroke_width)),
            ElementKind::Eraser => Element::Eraser(Eraser::new(id, coords.start())),
            ElementKind::Text => Element::Text(Text::new(id, coords.start())),
        }
    }

    /// [`Element::create`] for a kind named by an external string tag.
    pub fn create_tagged(id: ElementId, coords: BoxCoords, tag: &str, style: &Style) -> EngineResult<Self> {
        let kind = tag.parse()?;
        Ok(Self::create(id, coords, kind, style))
    }

    /// Rebuild a text element whose box fits `measured_width` by `line_height`.
    pub fn retype_as_text(
        id: ElementId,
        origin: Point,
        text: String,
        measured_width: f64,
        line_height: f64,
    ) -> Self {
        Element::Text(Text::retyped(id, origin, text, measured_width, line_height))
    }

    pub fn id(&self) -> ElementId {
        match self {
            Element::Line(e) => e.id,
            Element::Rectangle(e) => e.id,
            Element::Pencil(e) => e.id,
            Element::Eraser(e) => e.id,
            Element::Text(e) => e.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Line(_) => ElementKind::Line,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Pencil(_) => ElementKind::Pencil,
            Element::Eraser(_) => ElementKind::Eraser,
            Element::Text(_) => ElementKind::Text,
        }
    }

    /// Corner box for the box-based kinds.
    pub fn coords(&self) -> Option<BoxCoords> {
        match self {
            Element::Line(e) => Some(e.coords),
            Element::Rectangle(e) => Some(e.coords),
            Element::Text(e) => Some(e.coords),
            Element::Pencil(_) | Element::Eraser(_) => None,
        }
    }

    /// Stroke points for pencil and eraser elements.
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Element::Pencil(e) => Some(&e.points),
            Element::Eraser(e) => Some(&e.points),
            _ => None,
        }
    }

    /// Copy with `point` appended to the stroke.
    pub fn append_point(&self, point: Point) -> EngineResult<Self> {
        match self {
            Element::Pencil(e) => Ok(Element::Pencil(e.with_point(point))),
            Element::Eraser(e) => Ok(Element::Eraser(e.with_point(point))),
            _ => Err(EngineError::UnsupportedElement {
                kind: self.kind(),
                operation: "append_point",
            }),
        }
    }

    /// Copy with new corner coordinates; the render primitive is rebuilt.
    pub fn with_coords(&self, coords: BoxCoords) -> EngineResult<Self> {
        match self {
            Element::Line(e) => Ok(Element::Line(e.with_coords(coords))),
            Element::Rectangle(e) => Ok(Element::Rectangle(e.with_coords(coords))),
            Element::Text(e) => Ok(Element::Text(e.with_coords(coords))),
            Element::Pencil(_) | Element::Eraser(_) => Err(EngineError::UnsupportedElement {
                kind: self.kind(),
                operation: "with_coords",
            }),
        }
    }

    /// Copy shifted rigidly by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        match self {
            Element::Line(e) => Element::Line(e.with_coords(e.coords.translate(delta))),
            Element::Rectangle(e) => Element::Rectangle(e.with_coords(e.coords.translate(delta))),
            Element::Text(e) => Element::Text(e.with_coords(e.coords.translate(delta))),
            Element::Pencil(e) => Element::Pencil(e.translated(delta)),
            Element::Eraser(e) => Element::Eraser(e.translated(delta)),
        }
    }
}

/// One snapshot of the drawing: elements in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementList {
    elements: Vec<Element>,
}

impl ElementList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.index_of(id).map(|i| &self.elements[i])
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Copy of this list with `element` appended.
    pub fn with_pushed(&self, element: Element) -> Self {
        let mut copy = self.clone();
        copy.elements.push(element);
        copy
    }

    /// Copy of this list with the element sharing `element`'s id replaced.
    ///
    /// Returns `None` when no element has that id.
    pub fn with_replaced(&self, element: Element) -> Option<Self> {
        let index = self.index_of(element.id())?;
        let mut copy = self.clone();
        copy.elements[index] = element;
        Some(copy)
    }
}

impl FromIterator<Element> for ElementList {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ElementList {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> Style {
        Style {
            stroke_width: 3.0,
            color: SerializableColor::black(),
        }
    }

    #[test]
    fn test_create_per_kind() {
        let coords = BoxCoords::new(1.0, 2.0, 3.0, 4.0);

        let line = Element::create(ElementId(0), coords, ElementKind::Line, &style());
        assert_eq!(line.kind(), ElementKind::Line);
        assert_eq!(line.coords(), Some(coords));

        let pencil = Element::create(ElementId(1), coords, ElementKind::Pencil, &style());
        assert_eq!(pencil.points(), Some(&[Point::new(1.0, 2.0)][..]));

        let eraser = Element::create(ElementId(2), coords, ElementKind::Eraser, &style());
        assert_eq!(eraser.points(), Some(&[Point::new(1.0, 2.0)][..]));

        let text = Element::create(ElementId(3), coords, ElementKind::Text, &style());
        assert_eq!(text.coords(), Some(BoxCoords::new(1.0, 2.0, 1.0, 2.0)));
        match text {
            Element::Text(t) => assert!(t.text.is_empty()),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_create_tagged_rejects_unknown() {
        let result = Element::create_tagged(ElementId(0), BoxCoords::default(), "circle", &style());
        assert_eq!(result, Err(EngineError::UnrecognizedElementKind("circle".to_string())));

        let rect = Element::create_tagged(ElementId(0), BoxCoords::default(), "rectangle", &style());
        assert_eq!(rect.map(|e| e.kind()), Ok(ElementKind::Rectangle));
    }

    #[test]
    fn test_append_point() {
        let pencil = Element::create(ElementId(0), BoxCoords::default(), ElementKind::Pencil, &style());
        let longer = pencil.append_point(Point::new(5.0, 5.0)).unwrap();
        assert_eq!(longer.points().map(<[Point]>::len), Some(2));
        // The source element is untouched.
        assert_eq!(pencil.points().map(<[Point]>::len), Some(1));

        let line = Element::create(ElementId(1), BoxCoords::default(), ElementKind::Line, &style());
        assert_eq!(
            line.append_point(Point::ZERO),
            Err(EngineError::UnsupportedElement {
                kind: ElementKind::Line,
                operation: "append_point",
            })
        );
    }

    #[test]
    fn test_translate_box_preserves_size() {
        let rect = Element::create(
            ElementId(0),
            BoxCoords::new(10.0, 10.0, 50.0, 30.0),
            ElementKind::Rectangle,
            &style(),
        );
        let moved = rect.translate(Vec2::new(5.0, -5.0));
        assert_eq!(moved.coords(), Some(BoxCoords::new(15.0, 5.0, 55.0, 25.0)));
    }

    #[test]
    fn test_translate_pencil_round_trip() {
        let pencil = Element::create(ElementId(0), BoxCoords::new(1.0, 2.0, 0.0, 0.0), ElementKind::Pencil, &style())
            .append_point(Point::new(4.5, 8.25))
            .unwrap()
            .append_point(Point::new(-3.0, 16.0))
            .unwrap();
        let delta = Vec2::new(12.5, -7.0);
        let back = pencil.translate(delta).translate(-delta);
        assert_eq!(back, pencil);
    }

    #[test]
    fn test_element_list_replace() {
        let list: ElementList = (0..3)
            .map(|i| Element::create(ElementId(i), BoxCoords::default(), ElementKind::Line, &style()))
            .collect();
        let updated = Element::create(
            ElementId(1),
            BoxCoords::new(0.0, 0.0, 9.0, 9.0),
            ElementKind::Line,
            &style(),
        );
        let replaced = list.with_replaced(updated.clone()).unwrap();
        assert_eq!(replaced.get(ElementId(1)), Some(&updated));
        assert_eq!(replaced.index_of(ElementId(1)), Some(1));
        assert_eq!(list.get(ElementId(1)).and_then(Element::coords), Some(BoxCoords::default()));

        let missing = Element::create(ElementId(7), BoxCoords::default(), ElementKind::Line, &style());
        assert!(list.with_replaced(missing).is_none());
    }

    #[test]
    fn test_id_allocator_is_monotonic() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id(), ElementId(0));
        assert_eq!(ids.next_id(), ElementId(1));
        assert_eq!(ids.next_id(), ElementId(2));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(SerializableColor::from_hex("#ff0000"), Ok(SerializableColor::red()));
        assert_eq!(SerializableColor::from_hex("#0f0"), Ok(SerializableColor::new(0, 255, 0, 255)));
        assert_eq!(
            SerializableColor::from_hex("#00000080"),
            Ok(SerializableColor::new(0, 0, 0, 128))
        );
        assert!(SerializableColor::from_hex("red").is_err());
        assert!(SerializableColor::from_hex("#12345").is_err());
        assert!(SerializableColor::from_hex("#gg0000").is_err());
        assert_eq!(SerializableColor::new(18, 52, 86, 255).to_hex(), "#123456");
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!("pencil".parse::<ElementKind>(), Ok(ElementKind::Pencil));
        assert_eq!(ElementKind::Rectangle.to_string(), "rectangle");
        assert!(ElementKind::Eraser.needs_normalization());
        assert!(!ElementKind::Pencil.needs_normalization());
        assert!(!ElementKind::Text.needs_normalization());
    }
}
