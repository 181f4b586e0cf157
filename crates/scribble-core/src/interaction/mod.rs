//! Pointer-driven interaction state machine.
//!
//! [`Whiteboard`] owns the history, the current tool and style, and the
//! state of the gesture in progress. Hosts feed it pointer events and read
//! back the current element list, the cursor and the text overlay target.

mod selection;
mod tool;

pub use selection::{Offsets, Selection};
pub use tool::{Action, Tool};

use crate::config::{EngineConfig, PointerLeavePolicy};
use crate::elements::{Element, ElementId, ElementList, IdAllocator, SerializableColor, Style};
use crate::error::{EngineError, EngineResult};
use crate::geometry::{self, BoxCoords, CursorKind, Position};
use crate::history::{CommitMode, History};
use crate::keyboard::KeyboardSubscription;
use crate::render::{ApproxTextMeasure, RenderAdapter, TextMeasure};
use kurbo::Point;
use log::{debug, error, trace, warn};

/// The drawing engine facade.
pub struct Whiteboard {
    config: EngineConfig,
    history: History,
    ids: IdAllocator,
    action: Action,
    tool: Tool,
    style: Style,
    selection: Option<Selection>,
    cursor: CursorKind,
    measure: Box<dyn TextMeasure>,
    renderer: Option<Box<dyn RenderAdapter>>,
    pub(crate) keyboard: Option<KeyboardSubscription>,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Whiteboard {
    pub fn new() -> Self {
        Self::build(EngineConfig::default(), Style::default())
    }

    /// Whiteboard with custom settings. The config is validated first.
    pub fn with_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        let style = config.default_style()?;
        Ok(Self::build(config, style))
    }

    fn build(config: EngineConfig, style: Style) -> Self {
        let measure = ApproxTextMeasure {
            char_width: config.text_char_width,
        };
        Self {
            history: History::new(),
            ids: IdAllocator::new(),
            action: Action::Idle,
            tool: config.default_tool,
            style,
            selection: None,
            cursor: CursorKind::Default,
            measure: Box::new(measure),
            renderer: None,
            keyboard: None,
            config,
        }
    }

    /// Attach the surface to draw on. It is drawn once immediately.
    pub fn attach_renderer(&mut self, renderer: Box<dyn RenderAdapter>) {
        self.renderer = Some(renderer);
        self.redraw();
    }

    /// Replace the text width measurer used when committing text.
    pub fn set_text_measure(&mut self, measure: Box<dyn TextMeasure>) {
        self.measure = measure;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The element list currently on screen.
    pub fn elements(&self) -> &ElementList {
        self.history.current()
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// Cursor to show, updated by hovering with the selection tool.
    pub fn cursor(&self) -> CursorKind {
        self.cursor
    }

    /// Elements to draw: the current list minus the one being edited as text.
    pub fn visible_elements(&self) -> Vec<&Element> {
        visible(self.history.current(), self.writing_id())
    }

    /// Anchor and current content of the text element open for editing.
    pub fn text_edit_target(&self) -> Option<(Point, &str)> {
        let id = self.writing_id()?;
        let element = self
            .history
            .current()
            .get(id)
            .or(self.selection.as_ref().map(|s| &s.element))?;
        match element {
            Element::Text(text) => Some((text.origin(), text.text.as_str())),
            _ => None,
        }
    }

    /// Set the stroke color from a hex string. The old color is kept on error.
    pub fn set_color(&mut self, color: &str) -> EngineResult<()> {
        self.style.color = SerializableColor::from_hex(color)?;
        debug!("Color set to {}", self.style.color.to_hex());
        Ok(())
    }

    pub fn set_thickness(&mut self, thickness: f64) -> EngineResult<()> {
        if !(thickness.is_finite() && thickness > 0.0) {
            return Err(EngineError::Config(format!("Invalid thickness: {thickness}")));
        }
        self.style.stroke_width = thickness;
        Ok(())
    }

    /// Select a tool by its toolbar tag (`selection`, `line`, `rectangle`, ...).
    pub fn set_element_type(&mut self, tag: &str) -> EngineResult<()> {
        let tool = tag.parse()?;
        self.set_tool(tool);
        Ok(())
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if tool != self.tool {
            debug!("Tool: {} -> {}", self.tool, tool);
        }
        self.tool = tool;
        if tool != Tool::Selection {
            self.cursor = CursorKind::Default;
        }
    }

    /// Step back one snapshot. The interaction state is left alone.
    pub fn undo(&mut self) -> bool {
        let moved = self.history.undo();
        if moved {
            debug!("Undo -> snapshot {}", self.history.index());
            self.redraw();
        }
        moved
    }

    /// Step forward one snapshot. The interaction state is left alone.
    pub fn redo(&mut self) -> bool {
        let moved = self.history.redo();
        if moved {
            debug!("Redo -> snapshot {}", self.history.index());
            self.redraw();
        }
        moved
    }

    pub fn pointer_down(&mut self, point: Point) {
        match self.action {
            Action::Writing => {
                debug!("Pointer down ignored while writing");
                return;
            }
            Action::Idle => {}
            open => {
                warn!("Pointer down during {open:?}, finishing the open gesture first");
                self.pointer_up(point);
            }
        }

        match self.tool.element_kind() {
            None => self.grab(point),
            Some(kind) => {
                let id = self.ids.next_id();
                let element = Element::create(id, BoxCoords::at(point), kind, &self.style);
                self.history
                    .commit_with(|list| list.with_pushed(element.clone()), CommitMode::Discrete);
                self.selection = Some(Selection::created(element));
                self.set_action(match self.tool {
                    Tool::Eraser => Action::Erasing,
                    Tool::Text => Action::Writing,
                    _ => Action::Drawing,
                });
                self.redraw();
            }
        }
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.tool == Tool::Selection {
            let tolerance = self.config.hit_tolerance();
            self.cursor = geometry::hit_test(point, self.history.current(), &tolerance)
                .map_or(CursorKind::Default, |hit| geometry::cursor_hint(hit.position));
        }

        if !self.action.in_gesture() {
            return;
        }
        let Some(selection) = self.selection.as_ref() else {
            contract_violation(&EngineError::MissingSelection);
            return;
        };
        let drawing = matches!(self.action, Action::Drawing | Action::Erasing);
        if drawing && !self.history.current().contains(selection.element.id()) {
            // Undone mid-stroke: there is nothing left to extend.
            warn!("Element {} was undone during {:?}, ending the gesture", selection.element.id(), self.action);
            self.selection = None;
            self.set_action(Action::Idle);
            return;
        }
        let updated = match self.action {
            Action::Drawing | Action::Erasing => self.extend(selection.element.id(), point),
            Action::Moving => selection.moved_to(point),
            Action::Resizing => resize(selection, point),
            Action::Idle | Action::Writing => return,
        };
        match updated {
            Ok(element) => {
                trace!("{:?} {} to {:?}", self.action, element.id(), point);
                self.store(element, CommitMode::Overwrite);
            }
            Err(err) => contract_violation(&err),
        }
    }

    pub fn pointer_up(&mut self, point: Point) {
        match self.action {
            Action::Idle | Action::Writing => return,
            Action::Moving => {
                let clicked_text = self
                    .selection
                    .as_ref()
                    .is_some_and(|s| matches!(s.element, Element::Text(_)) && s.is_click(point));
                if clicked_text {
                    self.set_action(Action::Writing);
                    self.redraw();
                    return;
                }
                let current = self.history.current().clone();
                self.history.commit(current, self.config.gesture_commit);
                self.redraw();
            }
            Action::Drawing | Action::Erasing | Action::Resizing => {
                let target = self
                    .selection
                    .as_ref()
                    .and_then(|s| self.history.current().get(s.element.id()))
                    .filter(|e| e.kind().needs_normalization())
                    .map(geometry::normalize_coordinates);
                if let Some(element) = target {
                    self.store(element, self.config.gesture_commit);
                }
            }
        }
        self.selection = None;
        self.set_action(Action::Idle);
    }

    /// The pointer left the drawing surface at `point`.
    pub fn pointer_leave(&mut self, point: Point) {
        if !self.action.in_gesture() {
            return;
        }
        match self.config.pointer_leave {
            PointerLeavePolicy::Commit => {
                debug!("Pointer left during {:?}, finishing gesture", self.action);
                self.pointer_up(point);
            }
            PointerLeavePolicy::Ignore => {
                warn!("Pointer left during {:?}, gesture left open", self.action);
            }
        }
    }

    /// Close the text editor with its final content.
    pub fn commit_text(&mut self, text: impl Into<String>) -> EngineResult<()> {
        let selection = match (self.action, self.selection.take()) {
            (Action::Writing, Some(selection)) => selection,
            (_, selection) => {
                self.selection = selection;
                warn!("Text commit without an element being written");
                return Err(EngineError::MissingSelection);
            }
        };
        let text = text.into();
        let origin = match selection.element.coords() {
            Some(coords) => coords.start(),
            None => {
                let err = EngineError::UnsupportedElement {
                    kind: selection.element.kind(),
                    operation: "commit_text",
                };
                self.selection = Some(selection);
                return Err(err);
            }
        };
        let width = self.measure.measure(&text);
        let element = Element::retype_as_text(
            selection.element.id(),
            origin,
            text,
            width,
            self.config.text_line_height,
        );
        self.set_action(Action::Idle);
        self.store(element, self.config.gesture_commit);
        Ok(())
    }

    /// Start a selection-tool gesture on whatever lies under `point`.
    fn grab(&mut self, point: Point) {
        let tolerance = self.config.hit_tolerance();
        let Some(hit) = geometry::hit_test(point, self.history.current(), &tolerance) else {
            return;
        };
        let selection = Selection::grab(hit.element, hit.position, point);
        let action = match hit.position {
            Position::Inside => Action::Moving,
            Position::Handle(_) => Action::Resizing,
        };
        debug!("Grabbed {} at {}", selection.element.id(), hit.position);

        // Keep the pre-move state one undo away.
        let current = self.history.current().clone();
        self.history.commit(current, CommitMode::Discrete);
        self.selection = Some(selection);
        self.set_action(action);
        self.redraw();
    }

    /// The element being drawn, updated for a pointer at `point`.
    fn extend(&self, id: ElementId, point: Point) -> EngineResult<Element> {
        let element = self.history.current().get(id).ok_or(EngineError::MissingSelection)?;
        match element {
            Element::Pencil(_) | Element::Eraser(_) => element.append_point(point),
            Element::Line(_) | Element::Rectangle(_) => {
                let coords = element.coords().ok_or(EngineError::MissingSelection)?;
                let rebuilt = Element::create(
                    id,
                    BoxCoords::from_points(coords.start(), point),
                    element.kind(),
                    &self.style,
                );
                Ok(rebuilt)
            }
            Element::Text(_) => Err(EngineError::UnsupportedElement {
                kind: element.kind(),
                operation: "draw",
            }),
        }
    }

    /// Replace `element` in the current list, or append it if it is gone.
    fn store(&mut self, element: Element, mode: CommitMode) {
        let list = self.history.current();
        let next = match list.with_replaced(element.clone()) {
            Some(next) => next,
            None => {
                warn!("Element {} is no longer in the list, appending it", element.id());
                list.with_pushed(element)
            }
        };
        self.history.commit(next, mode);
        self.redraw();
    }

    fn set_action(&mut self, action: Action) {
        if action != self.action {
            debug!("Action: {:?} -> {:?}", self.action, action);
            self.action = action;
        }
    }

    fn writing_id(&self) -> Option<ElementId> {
        match self.action {
            Action::Writing => self.selection.as_ref().map(|s| s.element.id()),
            _ => None,
        }
    }

    fn redraw(&mut self) {
        let hidden = self.writing_id();
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.draw(&visible(self.history.current(), hidden));
        }
    }
}

fn visible(elements: &ElementList, hidden: Option<ElementId>) -> Vec<&Element> {
    elements.iter().filter(|e| Some(e.id()) != hidden).collect()
}

fn resize(selection: &Selection, point: Point) -> EngineResult<Element> {
    let position = selection.position.ok_or(EngineError::MissingSelection)?;
    let coords = selection
        .element
        .coords()
        .ok_or(EngineError::UnsupportedElement {
            kind: selection.element.kind(),
            operation: "resize",
        })?;
    let resized = geometry::resized_coordinates(point, position, coords)?;
    selection.element.with_coords(resized)
}

/// Caller bugs are logged and trip an assertion in debug builds.
fn contract_violation(err: &EngineError) {
    error!("Contract violation: {err}");
    debug_assert!(false, "contract violation: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::ElementKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn board_with_tool(tool: Tool) -> Whiteboard {
        let mut board = Whiteboard::new();
        board.set_tool(tool);
        board
    }

    fn drag(board: &mut Whiteboard, from: (f64, f64), to: (f64, f64)) {
        board.pointer_down(Point::new(from.0, from.1));
        board.pointer_move(Point::new(to.0, to.1));
        board.pointer_up(Point::new(to.0, to.1));
    }

    struct CountingRenderer(Rc<RefCell<Vec<usize>>>);

    impl RenderAdapter for CountingRenderer {
        fn draw(&mut self, elements: &[&Element]) {
            self.0.borrow_mut().push(elements.len());
        }
    }

    #[test]
    fn test_defaults() {
        let board = Whiteboard::new();
        assert_eq!(board.tool(), Tool::Pencil);
        assert_eq!(board.action(), Action::Idle);
        assert_eq!(board.style().color, SerializableColor::red());
        assert!((board.style().stroke_width - 5.0).abs() < f64::EPSILON);
        assert!(board.elements().is_empty());
    }

    #[test]
    fn test_draw_rectangle_normalizes() {
        let mut board = board_with_tool(Tool::Rectangle);
        board.pointer_down(Point::new(100.0, 80.0));
        assert_eq!(board.action(), Action::Drawing);
        board.pointer_move(Point::new(60.0, 40.0));
        board.pointer_move(Point::new(20.0, 10.0));
        board.pointer_up(Point::new(20.0, 10.0));

        assert_eq!(board.action(), Action::Idle);
        assert!(board.selection().is_none());
        assert_eq!(board.elements().len(), 1);
        let rect = board.elements().last().unwrap();
        assert_eq!(rect.id(), ElementId(0));
        assert_eq!(rect.coords(), Some(BoxCoords::new(20.0, 10.0, 100.0, 80.0)));
        // Start and end of the gesture are each one undo step.
        assert_eq!(board.history().len(), 3);
    }

    #[test]
    fn test_draw_line_normalizes_endpoints() {
        let mut board = board_with_tool(Tool::Line);
        drag(&mut board, (50.0, 50.0), (10.0, 20.0));
        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(10.0, 20.0, 50.0, 50.0))
        );
    }

    #[test]
    fn test_overwrite_gesture_commit() {
        let config = EngineConfig {
            gesture_commit: CommitMode::Overwrite,
            ..EngineConfig::default()
        };
        let mut board = Whiteboard::with_config(config).unwrap();
        board.set_tool(Tool::Rectangle);
        drag(&mut board, (50.0, 50.0), (10.0, 10.0));
        assert_eq!(board.history().len(), 2);
        assert!(board.undo());
        assert!(board.elements().is_empty());
    }

    #[test]
    fn test_pencil_stroke() {
        let mut board = board_with_tool(Tool::Pencil);
        board.pointer_down(Point::new(0.0, 0.0));
        board.pointer_move(Point::new(5.0, 5.0));
        board.pointer_move(Point::new(10.0, 5.0));
        board.pointer_up(Point::new(10.0, 5.0));

        let points = board.elements().last().and_then(Element::points).unwrap();
        assert_eq!(points, &[Point::new(0.0, 0.0), Point::new(5.0, 5.0), Point::new(10.0, 5.0)]);
        // Pencil strokes need no normalization commit.
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn test_eraser_is_not_selectable() {
        let mut board = board_with_tool(Tool::Eraser);
        board.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Erasing);
        board.pointer_move(Point::new(20.0, 10.0));
        board.pointer_up(Point::new(20.0, 10.0));
        assert_eq!(board.elements().last().map(Element::kind), Some(ElementKind::Eraser));

        board.set_tool(Tool::Selection);
        board.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Idle);
    }

    #[test]
    fn test_move_rectangle() {
        let mut board = board_with_tool(Tool::Rectangle);
        drag(&mut board, (10.0, 10.0), (50.0, 50.0));
        board.set_tool(Tool::Selection);

        board.pointer_down(Point::new(30.0, 30.0));
        assert_eq!(board.action(), Action::Moving);
        board.pointer_move(Point::new(40.0, 35.0));
        board.pointer_move(Point::new(60.0, 70.0));
        board.pointer_up(Point::new(60.0, 70.0));

        assert_eq!(board.action(), Action::Idle);
        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(40.0, 50.0, 80.0, 90.0))
        );

        // Undo back past the move restores the original box.
        board.undo();
        board.undo();
        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(10.0, 10.0, 50.0, 50.0))
        );
    }

    #[test]
    fn test_move_pencil() {
        let mut board = board_with_tool(Tool::Pencil);
        drag(&mut board, (0.0, 0.0), (100.0, 0.0));
        board.set_tool(Tool::Selection);

        board.pointer_down(Point::new(50.0, 0.0));
        assert_eq!(board.action(), Action::Moving);
        board.pointer_move(Point::new(50.0, 20.0));
        board.pointer_up(Point::new(50.0, 20.0));

        let points = board.elements().last().and_then(Element::points).unwrap();
        assert_eq!(points, &[Point::new(0.0, 20.0), Point::new(100.0, 20.0)]);
    }

    #[test]
    fn test_resize_bottom_right() {
        let mut board = board_with_tool(Tool::Rectangle);
        drag(&mut board, (10.0, 10.0), (50.0, 50.0));
        board.set_tool(Tool::Selection);

        board.pointer_down(Point::new(50.0, 50.0));
        assert_eq!(board.action(), Action::Resizing);
        board.pointer_move(Point::new(80.0, 90.0));
        board.pointer_up(Point::new(80.0, 90.0));

        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(10.0, 10.0, 80.0, 90.0))
        );
    }

    #[test]
    fn test_resize_past_opposite_corner_normalizes() {
        let mut board = board_with_tool(Tool::Rectangle);
        drag(&mut board, (10.0, 10.0), (50.0, 50.0));
        board.set_tool(Tool::Selection);

        board.pointer_down(Point::new(10.0, 10.0));
        board.pointer_move(Point::new(70.0, 60.0));
        board.pointer_up(Point::new(70.0, 60.0));

        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(50.0, 50.0, 70.0, 60.0))
        );
    }

    #[test]
    fn test_hover_cursor() {
        let mut board = board_with_tool(Tool::Rectangle);
        drag(&mut board, (10.0, 10.0), (50.0, 50.0));
        board.pointer_move(Point::new(30.0, 30.0));
        assert_eq!(board.cursor(), CursorKind::Default);

        board.set_tool(Tool::Selection);
        board.pointer_move(Point::new(30.0, 30.0));
        assert_eq!(board.cursor(), CursorKind::Move);
        board.pointer_move(Point::new(50.0, 10.0));
        assert_eq!(board.cursor(), CursorKind::ResizeNesw);
        board.pointer_move(Point::new(200.0, 200.0));
        assert_eq!(board.cursor(), CursorKind::Default);
    }

    #[test]
    fn test_text_create_and_commit() {
        let mut board = board_with_tool(Tool::Text);
        board.pointer_down(Point::new(5.0, 5.0));
        board.pointer_up(Point::new(5.0, 5.0));
        assert_eq!(board.action(), Action::Writing);
        assert_eq!(board.text_edit_target(), Some((Point::new(5.0, 5.0), "")));
        assert!(board.visible_elements().is_empty());

        // Clicks elsewhere do not interrupt editing.
        board.pointer_down(Point::new(300.0, 300.0));
        assert_eq!(board.action(), Action::Writing);
        assert_eq!(board.elements().len(), 1);

        board.commit_text("hello").unwrap();
        assert_eq!(board.action(), Action::Idle);
        let text = board.elements().last().unwrap();
        assert_eq!(text.coords(), Some(BoxCoords::new(5.0, 5.0, 65.0, 29.0)));
        assert_eq!(board.visible_elements().len(), 1);
    }

    #[test]
    fn test_text_click_to_edit() {
        let mut board = board_with_tool(Tool::Text);
        board.pointer_down(Point::new(5.0, 5.0));
        board.commit_text("hi").unwrap();
        board.set_tool(Tool::Selection);

        board.pointer_down(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Moving);
        board.pointer_up(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Writing);
        assert_eq!(board.text_edit_target(), Some((Point::new(5.0, 5.0), "hi")));

        board.commit_text("hi there").unwrap();
        match board.elements().last() {
            Some(Element::Text(text)) => assert_eq!(text.text, "hi there"),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_text_drag_moves_instead_of_editing() {
        let mut board = board_with_tool(Tool::Text);
        board.pointer_down(Point::new(5.0, 5.0));
        board.commit_text("hi").unwrap();
        board.set_tool(Tool::Selection);

        drag(&mut board, (10.0, 10.0), (20.0, 30.0));
        assert_eq!(board.action(), Action::Idle);
        match board.elements().last() {
            Some(Element::Text(text)) => {
                assert_eq!(text.text, "hi");
                assert_eq!(text.origin(), Point::new(15.0, 25.0));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_commit_text_requires_writing() {
        let mut board = Whiteboard::new();
        assert_eq!(board.commit_text("x"), Err(EngineError::MissingSelection));
    }

    #[test]
    fn test_custom_text_measure() {
        let mut board = board_with_tool(Tool::Text);
        board.set_text_measure(Box::new(|text: &str| text.len() as f64 * 7.0));
        board.pointer_down(Point::new(0.0, 0.0));
        board.commit_text("abc").unwrap();
        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(0.0, 0.0, 21.0, 24.0))
        );
    }

    #[test]
    fn test_style_setters() {
        let mut board = Whiteboard::new();
        board.set_color("#0000ff").unwrap();
        assert!(board.set_color("blue").is_err());
        assert_eq!(board.style().color, SerializableColor::new(0, 0, 255, 255));

        board.set_thickness(2.0).unwrap();
        assert!(board.set_thickness(0.0).is_err());
        assert!((board.style().stroke_width - 2.0).abs() < f64::EPSILON);

        board.set_element_type("line").unwrap();
        drag(&mut board, (0.0, 0.0), (10.0, 10.0));
        match board.elements().last() {
            Some(Element::Line(line)) => {
                assert_eq!(line.style.color, SerializableColor::new(0, 0, 255, 255));
                assert!((line.style.stroke_width - 2.0).abs() < f64::EPSILON);
            }
            other => panic!("expected line, got {other:?}"),
        }

        assert_eq!(
            board.set_element_type("circle"),
            Err(EngineError::UnrecognizedElementKind("circle".to_string()))
        );
        assert_eq!(board.tool(), Tool::Line);
    }

    #[test]
    fn test_undo_mid_stroke_ends_gesture() {
        let mut board = board_with_tool(Tool::Pencil);
        board.pointer_down(Point::new(0.0, 0.0));
        board.pointer_move(Point::new(5.0, 5.0));
        assert!(board.undo());
        assert!(board.elements().is_empty());

        board.pointer_move(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Idle);
        assert!(board.selection().is_none());
        board.pointer_up(Point::new(10.0, 10.0));
        assert!(board.elements().is_empty());

        // The stroke is still reachable through redo.
        assert!(board.redo());
        assert_eq!(board.elements().last().and_then(Element::points).map(<[Point]>::len), Some(2));
    }

    #[test]
    fn test_undo_mid_line_ends_gesture() {
        let mut board = board_with_tool(Tool::Line);
        board.pointer_down(Point::new(0.0, 0.0));
        board.pointer_move(Point::new(5.0, 5.0));
        board.undo();
        board.pointer_move(Point::new(10.0, 10.0));
        board.pointer_up(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Idle);
        assert!(board.elements().is_empty());
        assert_eq!(board.history().len(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            handle_radius: f64::NAN,
            ..EngineConfig::default()
        };
        assert!(matches!(Whiteboard::with_config(config), Err(EngineError::Config(_))));

        let config = EngineConfig {
            default_color: "crimson".to_string(),
            ..EngineConfig::default()
        };
        assert!(matches!(Whiteboard::with_config(config), Err(EngineError::Config(_))));

        let config = EngineConfig {
            default_color: "#00ff00".to_string(),
            default_thickness: 2.0,
            ..EngineConfig::default()
        };
        let board = Whiteboard::with_config(config).unwrap();
        assert_eq!(board.style().color, SerializableColor::new(0, 255, 0, 255));
    }

    #[test]
    fn test_text_click_to_edit_fractional() {
        let mut board = board_with_tool(Tool::Text);
        board.pointer_down(Point::new(0.1, 0.1));
        board.commit_text("hi").unwrap();
        board.set_tool(Tool::Selection);

        board.pointer_down(Point::new(0.7, 0.7));
        board.pointer_up(Point::new(0.7, 0.7));
        assert_eq!(board.action(), Action::Writing);
        assert_eq!(board.text_edit_target(), Some((Point::new(0.1, 0.1), "hi")));
    }

    #[test]
    fn test_pointer_leave_commits() {
        let mut board = board_with_tool(Tool::Rectangle);
        board.pointer_down(Point::new(50.0, 50.0));
        board.pointer_move(Point::new(20.0, 20.0));
        board.pointer_leave(Point::new(10.0, 10.0));
        assert_eq!(board.action(), Action::Idle);
        assert_eq!(
            board.elements().last().and_then(Element::coords),
            Some(BoxCoords::new(20.0, 20.0, 50.0, 50.0))
        );
    }

    #[test]
    fn test_pointer_leave_ignored() {
        let config = EngineConfig {
            pointer_leave: PointerLeavePolicy::Ignore,
            ..EngineConfig::default()
        };
        let mut board = Whiteboard::with_config(config).unwrap();
        board.pointer_down(Point::new(0.0, 0.0));
        board.pointer_leave(Point::new(5.0, 5.0));
        assert_eq!(board.action(), Action::Drawing);
        board.pointer_up(Point::new(5.0, 5.0));
        assert_eq!(board.action(), Action::Idle);
    }

    #[test]
    fn test_ids_survive_undo() {
        let mut board = board_with_tool(Tool::Rectangle);
        drag(&mut board, (0.0, 0.0), (10.0, 10.0));
        board.undo();
        board.undo();
        board.undo();
        assert!(board.elements().is_empty());
        drag(&mut board, (0.0, 0.0), (10.0, 10.0));
        assert_eq!(board.elements().last().map(Element::id), Some(ElementId(1)));
    }

    #[test]
    fn test_renderer_sees_every_change() {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let mut board = board_with_tool(Tool::Line);
        board.attach_renderer(Box::new(CountingRenderer(Rc::clone(&frames))));
        drag(&mut board, (0.0, 0.0), (10.0, 10.0));
        board.undo();

        // attach, down, move, up, undo
        assert_eq!(*frames.borrow(), vec![0, 1, 1, 1, 1]);

        board.set_tool(Tool::Text);
        board.pointer_down(Point::new(50.0, 50.0));
        assert_eq!(frames.borrow().last(), Some(&1));
    }
}
