//! Tools and interaction modes.

use crate::elements::ElementKind;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Toolbar tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, move and resize existing elements.
    Selection,
    Line,
    Rectangle,
    #[default]
    Pencil,
    Eraser,
    Text,
}

impl Tool {
    /// Kind of element this tool creates, if any.
    pub fn element_kind(&self) -> Option<ElementKind> {
        match self {
            Tool::Selection => None,
            Tool::Line => Some(ElementKind::Line),
            Tool::Rectangle => Some(ElementKind::Rectangle),
            Tool::Pencil => Some(ElementKind::Pencil),
            Tool::Eraser => Some(ElementKind::Eraser),
            Tool::Text => Some(ElementKind::Text),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.element_kind() {
            Some(kind) => kind.name(),
            None => "selection",
        }
    }
}

impl From<ElementKind> for Tool {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Line => Tool::Line,
            ElementKind::Rectangle => Tool::Rectangle,
            ElementKind::Pencil => Tool::Pencil,
            ElementKind::Eraser => Tool::Eraser,
            ElementKind::Text => Tool::Text,
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "selection" {
            Ok(Tool::Selection)
        } else {
            s.parse::<ElementKind>().map(Tool::from)
        }
    }
}

/// What the current gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    #[default]
    Idle,
    /// Creating a line, rectangle or pencil stroke.
    Drawing,
    Erasing,
    Moving,
    Resizing,
    /// A text element is open for editing.
    Writing,
}

impl Action {
    /// Whether a pointer gesture is in progress.
    pub fn in_gesture(&self) -> bool {
        matches!(
            self,
            Action::Drawing | Action::Erasing | Action::Moving | Action::Resizing
        )
    }
}
