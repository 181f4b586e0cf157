//! Display-list recording of element frames.

use crate::freehand::freehand_path;
use crate::renderer::{FontSpec, RenderContext, RenderResult};
use kurbo::{Affine, BezPath, Point, Rect};
use log::trace;
use scribble_core::{Element, RenderAdapter, SerializableColor};
use std::cell::RefCell;
use std::rc::Rc;

/// One drawing operation, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Clear a rectangle back to transparent.
    ClearRect(Rect),
    /// Stroke an open path.
    StrokePath {
        path: BezPath,
        width: f64,
        color: SerializableColor,
    },
    /// Fill a closed path, then stroke its outline with the same color.
    FillStrokePath {
        path: BezPath,
        width: f64,
        color: SerializableColor,
    },
    /// Fill a closed path.
    FillPath { path: BezPath, color: SerializableColor },
    /// Text with its top-left at `origin`.
    Text {
        origin: Point,
        text: String,
        font: FontSpec,
        color: SerializableColor,
    },
}

/// Turn an element sequence into draw commands.
///
/// Every frame starts by clearing the whole surface. Elements are emitted in
/// order, so eraser clears only affect what was drawn before them.
pub fn build_frame(elements: &[&Element], ctx: &RenderContext) -> Vec<DrawCommand> {
    let transform = Affine::scale(ctx.scale_factor);
    let ink = SerializableColor::from(ctx.ink);
    let mut frame = Vec::with_capacity(elements.len() + 1);
    frame.push(DrawCommand::ClearRect(ctx.surface_size.to_rect()));

    for element in elements {
        match element {
            Element::Line(line) => frame.push(DrawCommand::StrokePath {
                path: transform * line.primitive().path().clone(),
                width: line.style.stroke_width * ctx.scale_factor,
                color: line.style.color,
            }),
            Element::Rectangle(rect) => frame.push(DrawCommand::FillStrokePath {
                path: transform * rect.primitive().path().clone(),
                width: rect.style.stroke_width * ctx.scale_factor,
                color: rect.style.color,
            }),
            Element::Pencil(pencil) => frame.push(DrawCommand::FillPath {
                path: transform * freehand_path(&pencil.points),
                color: ink,
            }),
            Element::Eraser(eraser) => frame.extend(
                eraser
                    .cleared_rects(ctx.eraser_size)
                    .map(|rect| DrawCommand::ClearRect(transform.transform_rect_bbox(rect))),
            ),
            Element::Text(text) => frame.push(DrawCommand::Text {
                origin: transform * text.origin(),
                text: text.text.clone(),
                font: FontSpec {
                    family: ctx.font.family.clone(),
                    size: ctx.font.size * ctx.scale_factor,
                },
                color: ink,
            }),
        }
    }
    frame
}

#[derive(Debug)]
struct SceneState {
    ctx: RenderContext,
    frame: Vec<DrawCommand>,
    frames_drawn: u64,
}

/// [`RenderAdapter`] that keeps the latest frame as a display list.
///
/// Clones share the same frame, so a host can hand one clone to the
/// whiteboard and read frames back through another.
#[derive(Debug, Clone)]
pub struct SceneRecorder {
    state: Rc<RefCell<SceneState>>,
}

impl SceneRecorder {
    pub fn new(ctx: RenderContext) -> RenderResult<Self> {
        ctx.validate()?;
        Ok(Self {
            state: Rc::new(RefCell::new(SceneState {
                ctx,
                frame: Vec::new(),
                frames_drawn: 0,
            })),
        })
    }

    /// Commands of the most recent frame.
    pub fn frame(&self) -> Vec<DrawCommand> {
        self.state.borrow().frame.clone()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.state.borrow().frames_drawn
    }

    /// Swap the context. Takes effect from the next frame.
    pub fn set_context(&self, ctx: RenderContext) -> RenderResult<()> {
        ctx.validate()?;
        self.state.borrow_mut().ctx = ctx;
        Ok(())
    }
}

impl RenderAdapter for SceneRecorder {
    fn draw(&mut self, elements: &[&Element]) {
        let mut state = self.state.borrow_mut();
        let frame = build_frame(elements, &state.ctx);
        trace!("Frame {}: {} commands", state.frames_drawn, frame.len());
        state.frame = frame;
        state.frames_drawn += 1;
    }
}
