//! Hit-testing, coordinate normalization and resize math.
//!
//! Everything in this module is a pure function of its inputs.

use crate::elements::{Element, ElementList};
use crate::error::{EngineError, EngineResult};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Half-width of the square hit box around a control point.
pub const HANDLE_RADIUS: f64 = 5.0;
/// Detour slack allowed when testing a point against a straight line.
pub const LINE_TOLERANCE: f64 = 1.0;
/// Detour slack allowed when testing a point against a pencil stroke segment.
pub const PENCIL_TOLERANCE: f64 = 5.0;

/// Two-corner box used by lines, rectangles and text.
///
/// For a line `(x1, y1)` is the start point and `(x2, y2)` the end point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxCoords {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl BoxCoords {
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create from two points, keeping their order.
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Degenerate box with both corners at `point`.
    pub fn at(point: Point) -> Self {
        Self::from_points(point, point)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    /// Signed width (`x2 - x1`).
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Signed height (`y2 - y1`).
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Axis-aligned rectangle covering the box, whatever the corner order.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    /// Shift both corners by `delta`.
    pub fn translate(&self, delta: Vec2) -> Self {
        Self::from_points(self.start() + delta, self.end() + delta)
    }

    /// Move the box so its first corner sits at `origin`, preserving width and height.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + self.width(),
            origin.y + self.height(),
        )
    }

    fn contains(&self, point: Point) -> bool {
        let rect = self.to_rect();
        point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
    }
}

/// A control point of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// First endpoint of a line.
    Start,
    /// Second endpoint of a line.
    End,
}

impl Handle {
    /// Short tag used by hosts (`tl`, `tr`, `bl`, `br`, `start`, `end`).
    pub fn tag(&self) -> &'static str {
        match self {
            Handle::TopLeft => "tl",
            Handle::TopRight => "tr",
            Handle::BottomLeft => "bl",
            Handle::BottomRight => "br",
            Handle::Start => "start",
            Handle::End => "end",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Handle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tl" => Ok(Handle::TopLeft),
            "tr" => Ok(Handle::TopRight),
            "bl" => Ok(Handle::BottomLeft),
            "br" => Ok(Handle::BottomRight),
            "start" => Ok(Handle::Start),
            "end" => Ok(Handle::End),
            other => Err(EngineError::InvalidHandleTag(other.to_string())),
        }
    }
}

/// Where a point landed on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// On the body of the element.
    Inside,
    /// On one of its control points.
    Handle(Handle),
}

impl Position {
    pub fn handle(&self) -> Option<Handle> {
        match self {
            Position::Inside => None,
            Position::Handle(handle) => Some(*handle),
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Position::Inside => "inside",
            Position::Handle(handle) => handle.tag(),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Position {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "inside" {
            Ok(Position::Inside)
        } else {
            s.parse().map(Position::Handle)
        }
    }
}

impl From<Handle> for Position {
    fn from(handle: Handle) -> Self {
        Position::Handle(handle)
    }
}

/// Pointer cursor a host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorKind {
    #[default]
    Default,
    Move,
    /// Diagonal resize, top-left to bottom-right.
    ResizeNwse,
    /// Diagonal resize, top-right to bottom-left.
    ResizeNesw,
}

impl CursorKind {
    /// CSS cursor keyword.
    pub fn css_name(&self) -> &'static str {
        match self {
            CursorKind::Default => "default",
            CursorKind::Move => "move",
            CursorKind::ResizeNwse => "nwse-resize",
            CursorKind::ResizeNesw => "nesw-resize",
        }
    }
}

/// Tolerances used by [`position_within`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTolerance {
    pub handle_radius: f64,
    pub line: f64,
    pub pencil: f64,
}

impl Default for HitTolerance {
    fn default() -> Self {
        Self {
            handle_radius: HANDLE_RADIUS,
            line: LINE_TOLERANCE,
            pencil: PENCIL_TOLERANCE,
        }
    }
}

/// Result of [`hit_test`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit<'a> {
    pub element: &'a Element,
    pub position: Position,
}

/// Euclidean distance.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Return `tag` when `point` lies in the square of half-width `radius` around `target`.
pub fn near_point<T>(point: Point, target: Point, tag: T, radius: f64) -> Option<T> {
    if (point.x - target.x).abs() < radius && (point.y - target.y).abs() < radius {
        Some(tag)
    } else {
        None
    }
}

/// Test `point` against the segment `a`-`b`.
///
/// The detour through `point` (`|ap| + |pb| - |ab|`) must stay under
/// `max_distance`. The test does not depend on the segment's direction.
pub fn on_segment(a: Point, b: Point, point: Point, max_distance: f64) -> Option<Position> {
    let offset = distance(a, b) - (distance(a, point) + distance(b, point));
    if offset.abs() < max_distance {
        Some(Position::Inside)
    } else {
        None
    }
}

/// Locate `point` on `element`. Handles win over the body.
///
/// Eraser marks are never selectable and always return `None`.
pub fn position_within(element: &Element, point: Point, tolerance: &HitTolerance) -> Option<Position> {
    let radius = tolerance.handle_radius;
    match element {
        Element::Line(line) => {
            let c = &line.coords;
            near_point(point, c.start(), Position::Handle(Handle::Start), radius)
                .or_else(|| near_point(point, c.end(), Position::Handle(Handle::End), radius))
                .or_else(|| on_segment(c.start(), c.end(), point, tolerance.line))
        }
        Element::Rectangle(rect) => {
            let c = &rect.coords;
            near_point(point, Point::new(c.x1, c.y1), Position::Handle(Handle::TopLeft), radius)
                .or_else(|| near_point(point, Point::new(c.x2, c.y1), Position::Handle(Handle::TopRight), radius))
                .or_else(|| near_point(point, Point::new(c.x1, c.y2), Position::Handle(Handle::BottomLeft), radius))
                .or_else(|| near_point(point, Point::new(c.x2, c.y2), Position::Handle(Handle::BottomRight), radius))
                .or_else(|| c.contains(point).then_some(Position::Inside))
        }
        Element::Pencil(pencil) => pencil
            .points
            .windows(2)
            .any(|w| on_segment(w[0], w[1], point, tolerance.pencil).is_some())
            .then_some(Position::Inside),
        Element::Text(text) => text.coords.contains(point).then_some(Position::Inside),
        Element::Eraser(_) => None,
    }
}

/// Find the topmost element under `point`.
///
/// Elements are drawn in creation order, so the scan runs back to front and
/// the most recently created match wins.
pub fn hit_test<'a>(point: Point, elements: &'a ElementList, tolerance: &HitTolerance) -> Option<Hit<'a>> {
    elements.iter().rev().find_map(|element| {
        position_within(element, point, tolerance).map(|position| Hit { element, position })
    })
}

/// Canonical corner order after a creation or resize gesture.
///
/// Rectangles get `x1 <= x2` and `y1 <= y2` independently. Lines keep their
/// endpoints when `(x1, y1)` sorts before `(x2, y2)` (by x, then y) and swap
/// them otherwise. Other kinds pass through.
pub fn normalize_coordinates(element: &Element) -> Element {
    match element {
        Element::Rectangle(rect) => {
            let c = rect.coords;
            let normalized = BoxCoords::new(c.x1.min(c.x2), c.y1.min(c.y2), c.x1.max(c.x2), c.y1.max(c.y2));
            Element::Rectangle(rect.with_coords(normalized))
        }
        Element::Line(line) => {
            let c = line.coords;
            if c.x1 < c.x2 || (c.x1 == c.x2 && c.y1 < c.y2) {
                element.clone()
            } else {
                Element::Line(line.with_coords(BoxCoords::new(c.x2, c.y2, c.x1, c.y1)))
            }
        }
        Element::Pencil(_) | Element::Eraser(_) | Element::Text(_) => element.clone(),
    }
}

/// New box for a drag of `handle` to `point`; the opposite corner stays fixed.
///
/// `Position::Inside` is not a handle and yields [`EngineError::InvalidHandleTag`].
pub fn resized_coordinates(point: Point, position: Position, coords: BoxCoords) -> EngineResult<BoxCoords> {
    let BoxCoords { x1, y1, x2, y2 } = coords;
    let handle = position
        .handle()
        .ok_or_else(|| EngineError::InvalidHandleTag(position.tag().to_string()))?;
    Ok(match handle {
        Handle::TopLeft | Handle::Start => BoxCoords::new(point.x, point.y, x2, y2),
        Handle::TopRight => BoxCoords::new(x1, point.y, point.x, y2),
        Handle::BottomLeft => BoxCoords::new(point.x, y1, x2, point.y),
        Handle::BottomRight | Handle::End => BoxCoords::new(x1, y1, point.x, point.y),
    })
}

/// Cursor for a hit position.
pub fn cursor_hint(position: Position) -> CursorKind {
    match position {
        Position::Handle(Handle::TopLeft | Handle::BottomRight | Handle::Start | Handle::End) => {
            CursorKind::ResizeNwse
        }
        Position::Handle(Handle::TopRight | Handle::BottomLeft) => CursorKind::ResizeNesw,
        Position::Inside => CursorKind::Move,
    }
}
