//! Seams to the host's drawing surface.

use crate::elements::Element;

/// Draws the element sequence onto some surface.
///
/// The whiteboard calls [`draw`](RenderAdapter::draw) after every change
/// to the current snapshot, in creation order, leaving out the element
/// whose text is being edited.
pub trait RenderAdapter {
    fn draw(&mut self, elements: &[&Element]);
}

/// Measures rendered text width for sizing text element boxes.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> f64;
}

/// Fixed-advance measurer: every character is `char_width` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxTextMeasure {
    pub char_width: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self {
            char_width: crate::config::TEXT_CHAR_WIDTH,
        }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn measure(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f64,
{
    fn measure(&self, text: &str) -> f64 {
        self(text)
    }
}
