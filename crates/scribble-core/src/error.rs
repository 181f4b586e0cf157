//! Error taxonomy for the engine.
//!
//! Everything here is a caller contract violation. Undo at the first
//! snapshot or redo at the last one is not an error and has no variant:
//! [`History::undo`](crate::history::History::undo) simply returns `false`.

use crate::elements::ElementKind;
use thiserror::Error;

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A string tag did not name any element kind or tool.
    #[error("Type not recognised: {0}")]
    UnrecognizedElementKind(String),
    /// A resize was requested with a position that is not a handle.
    #[error("Not a resize handle: {0}")]
    InvalidHandleTag(String),
    /// An operation that needs a selected element ran without one.
    #[error("No element is selected")]
    MissingSelection,
    /// The operation is not defined for this element kind.
    #[error("{operation} is not supported for {kind} elements")]
    UnsupportedElement {
        kind: ElementKind,
        operation: &'static str,
    },
    /// Invalid configuration or style input.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
