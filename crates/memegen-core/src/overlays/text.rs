//! Text overlay.

use super::{OverlayId, OverlayTrait};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A draggable, editable line of meme text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextOverlay {
    pub(crate) id: OverlayId,
    /// Top-left corner in canvas coordinates.
    pub position: Point,
    /// The text content. Any length, any characters.
    pub(crate) content: String,
    /// Whether the inline input is open.
    pub(crate) editing: bool,
}

impl TextOverlay {
    /// Font size used for layout estimates and export.
    pub const FONT_SIZE: f64 = 24.0;
    /// Average glyph advance as a fraction of the font size.
    const CHAR_WIDTH_FACTOR: f64 = 0.55;
    const LINE_HEIGHT_FACTOR: f64 = 1.2;

    pub(crate) fn new(id: OverlayId, position: Point, content: String) -> Self {
        Self {
            id,
            position,
            content,
            editing: false,
        }
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Approximate rendered size. Empty text keeps a one-glyph hit area so it
    /// can still be grabbed.
    fn approximate_size(&self) -> (f64, f64) {
        let widest = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0)
            .max(1);
        let lines = self.content.lines().count().max(1);
        (
            widest as f64 * Self::FONT_SIZE * Self::CHAR_WIDTH_FACTOR,
            lines as f64 * Self::FONT_SIZE * Self::LINE_HEIGHT_FACTOR,
        )
    }
}

impl OverlayTrait for TextOverlay {
    fn id(&self) -> OverlayId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn bounds(&self) -> Rect {
        let (width, height) = self.approximate_size();
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + width,
            self.position.y + height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_single_line() {
        let text = TextOverlay::new(OverlayId::new(1), Point::new(10.0, 20.0), "abcd".to_string());
        let bounds = text.bounds();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.width() - 4.0 * 24.0 * 0.55).abs() < 1e-9);
        assert!((bounds.height() - 24.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_multi_line_uses_widest_line() {
        let text = TextOverlay::new(OverlayId::new(1), Point::ZERO, "ab\nabcdef\nc".to_string());
        let bounds = text.bounds();
        assert!((bounds.width() - 6.0 * 24.0 * 0.55).abs() < 1e-9);
        assert!((bounds.height() - 3.0 * 24.0 * 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_keeps_hit_area() {
        let text = TextOverlay::new(OverlayId::new(1), Point::ZERO, String::new());
        assert!(text.hit_test(Point::new(2.0, 2.0)));
    }
}
