//! The scale/delete control shown for a selected character.

use crate::config::SizeBounds;
use crate::overlays::OverlayId;
use kurbo::{Point, Rect};

/// Top-left corner of the control panel, in canvas coordinates.
const PANEL_ORIGIN: Point = Point::new(10.0, 10.0);
const PANEL_WIDTH: f64 = 200.0;
const PANEL_HEIGHT: f64 = 34.0;
/// Horizontal space reserved for the "Scale:" label.
const LABEL_WIDTH: f64 = 50.0;
const DELETE_WIDTH: f64 = 28.0;
const PADDING: f64 = 5.0;

/// Part of the control panel under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// The panel background or label.
    Panel,
    /// The size slider.
    Scale,
    /// The delete button.
    Delete,
}

/// Descriptor of the control panel for the selected character.
///
/// This is editor chrome only and never part of an exported image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionControls {
    /// The character the control edits.
    pub overlay_id: OverlayId,
    /// The character's current edge length.
    pub size: f64,
    /// Slider range.
    pub bounds: SizeBounds,
}

impl SelectionControls {
    pub fn new(overlay_id: OverlayId, size: f64, bounds: SizeBounds) -> Self {
        Self {
            overlay_id,
            size,
            bounds,
        }
    }

    /// Whole panel.
    pub fn panel_rect(&self) -> Rect {
        Rect::new(
            PANEL_ORIGIN.x,
            PANEL_ORIGIN.y,
            PANEL_ORIGIN.x + PANEL_WIDTH,
            PANEL_ORIGIN.y + PANEL_HEIGHT,
        )
    }

    /// Slider track.
    pub fn slider_rect(&self) -> Rect {
        let panel = self.panel_rect();
        Rect::new(
            panel.x0 + LABEL_WIDTH,
            panel.y0 + PADDING,
            panel.x1 - DELETE_WIDTH - 2.0 * PADDING,
            panel.y1 - PADDING,
        )
    }

    /// Delete button.
    pub fn delete_rect(&self) -> Rect {
        let panel = self.panel_rect();
        Rect::new(
            panel.x1 - DELETE_WIDTH - PADDING,
            panel.y0 + PADDING,
            panel.x1 - PADDING,
            panel.y1 - PADDING,
        )
    }

    /// Slider thumb position for the current size.
    pub fn thumb_position(&self) -> Point {
        let slider = self.slider_rect();
        let span = self.bounds.max - self.bounds.min;
        let t = if span > 0.0 {
            ((self.size - self.bounds.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Point::new(slider.x0 + t * slider.width(), slider.center().y)
    }

    /// Size the slider maps a horizontal position to (already clamped).
    pub fn size_at(&self, x: f64) -> f64 {
        let slider = self.slider_rect();
        let t = ((x - slider.x0) / slider.width()).clamp(0.0, 1.0);
        let size = self.bounds.min + t * (self.bounds.max - self.bounds.min);
        self.bounds.clamp(size.round())
    }

    /// Which part of the panel a canvas point hits.
    pub fn hit_test(&self, point: Point) -> Option<ControlKind> {
        if self.delete_rect().contains(point) {
            Some(ControlKind::Delete)
        } else if self.slider_rect().contains(point) {
            Some(ControlKind::Scale)
        } else if self.panel_rect().contains(point) {
            Some(ControlKind::Panel)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(size: f64) -> SelectionControls {
        SelectionControls::new(OverlayId::new(1), size, SizeBounds::STANDARD)
    }

    #[test]
    fn test_hit_test_regions() {
        let c = controls(100.0);
        assert_eq!(c.hit_test(c.delete_rect().center()), Some(ControlKind::Delete));
        assert_eq!(c.hit_test(c.slider_rect().center()), Some(ControlKind::Scale));
        assert_eq!(c.hit_test(Point::new(15.0, 20.0)), Some(ControlKind::Panel));
        assert_eq!(c.hit_test(Point::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_slider_mapping() {
        let c = controls(100.0);
        let slider = c.slider_rect();
        assert!((c.size_at(slider.x0) - 20.0).abs() < f64::EPSILON);
        assert!((c.size_at(slider.x1) - 300.0).abs() < f64::EPSILON);
        assert!((c.size_at(slider.x1 + 100.0) - 300.0).abs() < f64::EPSILON);
        assert!((c.size_at(slider.x0 - 100.0) - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_thumb_tracks_size() {
        let slider = controls(20.0).slider_rect();
        assert!((controls(20.0).thumb_position().x - slider.x0).abs() < 1e-9);
        assert!((controls(300.0).thumb_position().x - slider.x1).abs() < 1e-9);
    }
}
