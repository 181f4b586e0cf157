//! Scribble Core Library
//!
//! Platform-agnostic drawing engine: element model, hit-testing geometry,
//! undo/redo history and the pointer interaction state machine.

pub mod config;
pub mod elements;
pub mod error;
pub mod geometry;
pub mod history;
pub mod interaction;
pub mod keyboard;
pub mod render;

pub use config::{EngineConfig, PointerLeavePolicy};
pub use elements::{Element, ElementId, ElementKind, ElementList, SerializableColor, Style};
pub use error::{EngineError, EngineResult};
pub use geometry::{BoxCoords, CursorKind, Handle, HitTolerance, Position};
pub use history::{CommitMode, History};
pub use interaction::{Action, Tool, Whiteboard};
pub use keyboard::{KeyChord, KeyboardHub, KeyboardSubscription, ShortcutAction};
pub use render::{ApproxTextMeasure, RenderAdapter, TextMeasure};
