//! Scribble Render Library
//!
//! Turns whiteboard element lists into display lists of kurbo paths and
//! peniko-compatible paints that a host can replay on any 2D surface.

mod freehand;
mod renderer;
mod scene;

pub use freehand::freehand_path;
pub use renderer::{FontSpec, RenderContext, RenderResult, RendererError};
pub use scene::{DrawCommand, SceneRecorder, build_frame};
