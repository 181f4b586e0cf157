//! Engine configuration.

use crate::elements::{ERASER_SIZE, SerializableColor, Style};
use crate::error::{EngineError, EngineResult};
use crate::geometry::{HANDLE_RADIUS, HitTolerance, LINE_TOLERANCE, PENCIL_TOLERANCE};
use crate::history::CommitMode;
use crate::interaction::Tool;
use serde::{Deserialize, Serialize};

/// Fixed line height of text elements, in pixels.
pub const TEXT_LINE_HEIGHT: f64 = 24.0;
/// Average glyph advance used when no real text measurer is attached.
pub const TEXT_CHAR_WIDTH: f64 = 12.0;

/// What to do with an open gesture when the pointer leaves the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerLeavePolicy {
    /// Finish the gesture as if the pointer was released where it left.
    #[default]
    Commit,
    /// Keep the gesture open until the next pointer-up.
    Ignore,
}

/// Tunables for a [`Whiteboard`](crate::interaction::Whiteboard).
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Half-width of the handle hit box.
    pub handle_radius: f64,
    /// Slack for line hit-testing.
    pub line_tolerance: f64,
    /// Slack for pencil stroke hit-testing.
    pub pencil_tolerance: f64,
    pub text_line_height: f64,
    pub text_char_width: f64,
    /// Side of the square each eraser point clears.
    pub eraser_size: f64,
    /// Initial stroke color as a hex string.
    pub default_color: String,
    pub default_thickness: f64,
    pub default_tool: Tool,
    /// How a finished gesture is recorded.
    pub gesture_commit: CommitMode,
    pub pointer_leave: PointerLeavePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            handle_radius: HANDLE_RADIUS,
            line_tolerance: LINE_TOLERANCE,
            pencil_tolerance: PENCIL_TOLERANCE,
            text_line_height: TEXT_LINE_HEIGHT,
            text_char_width: TEXT_CHAR_WIDTH,
            eraser_size: ERASER_SIZE,
            default_color: "#ff0000".to_string(),
            default_thickness: 5.0,
            default_tool: Tool::Pencil,
            gesture_commit: CommitMode::Discrete,
            pointer_leave: PointerLeavePolicy::Commit,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        let positive = [
            ("handle_radius", self.handle_radius),
            ("line_tolerance", self.line_tolerance),
            ("pencil_tolerance", self.pencil_tolerance),
            ("text_line_height", self.text_line_height),
            ("text_char_width", self.text_char_width),
            ("eraser_size", self.eraser_size),
            ("default_thickness", self.default_thickness),
        ];
        if let Some((name, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(EngineError::Config(format!("{name} must be positive, got {value}")));
        }
        SerializableColor::from_hex(&self.default_color)?;
        Ok(())
    }

    pub fn hit_tolerance(&self) -> HitTolerance {
        HitTolerance {
            handle_radius: self.handle_radius,
            line: self.line_tolerance,
            pencil: self.pencil_tolerance,
        }
    }

    /// Style for new elements.
    pub fn default_style(&self) -> EngineResult<Style> {
        Ok(Style {
            stroke_width: self.default_thickness,
            color: SerializableColor::from_hex(&self.default_color)?,
        })
    }
}
