//! Render context and errors.

use kurbo::Size;
use peniko::Color;
use scribble_core::EngineConfig;
use scribble_core::config::TEXT_LINE_HEIGHT;
use scribble_core::elements::ERASER_SIZE;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Font error: {0}")]
    Font(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Font used for text elements.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in pixels.
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: TEXT_LINE_HEIGHT,
        }
    }
}

impl FontSpec {
    /// CSS shorthand, e.g. `24px sans-serif`.
    pub fn css(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

/// Settings for recorded frames.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Surface size in physical pixels.
    pub surface_size: Size,
    /// Device pixel ratio applied to all geometry.
    pub scale_factor: f64,
    /// Paint for pencil strokes and text, which carry no color of their own.
    pub ink: Color,
    pub font: FontSpec,
    /// Side of the square cleared per eraser point.
    pub eraser_size: f64,
}

impl RenderContext {
    pub fn new(surface_size: Size) -> Self {
        Self {
            surface_size,
            scale_factor: 1.0,
            ink: Color::from_rgba8(0, 0, 0, 255),
            font: FontSpec::default(),
            eraser_size: ERASER_SIZE,
        }
    }

    /// Context matching a whiteboard's eraser size and text line height.
    pub fn from_config(surface_size: Size, config: &EngineConfig) -> Self {
        Self::new(surface_size)
            .with_eraser_size(config.eraser_size)
            .with_font(FontSpec {
                size: config.text_line_height,
                ..FontSpec::default()
            })
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn with_ink(mut self, color: Color) -> Self {
        self.ink = color;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    pub fn with_eraser_size(mut self, size: f64) -> Self {
        self.eraser_size = size;
        self
    }

    /// Check the context describes a drawable surface.
    pub fn validate(&self) -> RenderResult<()> {
        let Size { width, height } = self.surface_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::Surface(format!("invalid surface size {width}x{height}")));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(RendererError::Surface(format!("invalid scale factor {}", self.scale_factor)));
        }
        if self.font.family.trim().is_empty() || !(self.font.size > 0.0) {
            return Err(RendererError::Font(format!("unusable font '{}'", self.font.css())));
        }
        Ok(())
    }
}
