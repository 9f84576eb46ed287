//! Freehand ink layer with per-stroke undo.

mod history;
mod raster;

pub use history::StrokeHistory;
pub use raster::{RasterBuffer, RasterSurface, SnapshotRefused, point_to_segment_dist};

use crate::color::RgbaColor;
use image::RgbaImage;
use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

/// Color and width applied to new strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InkStyle {
    pub color: RgbaColor,
    pub width: f64,
}

impl Default for InkStyle {
    fn default() -> Self {
        Self {
            color: RgbaColor::black(),
            width: 3.0,
        }
    }
}

/// Per-gesture state of the ink layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StrokeGesture {
    #[default]
    Idle,
    /// A stroke is in progress; `points` holds every processed sample.
    Drawing { points: Vec<Point> },
}

/// A transparent drawing surface stacked between background and overlays.
///
/// Segments are composited as soon as they are extended, so ending a stroke
/// has no raster effect. Every stroke first pushes a capture of the whole
/// surface; undo restores the latest capture.
#[derive(Debug, Clone)]
pub struct StrokeLayer<S: RasterSurface = RasterBuffer> {
    surface: S,
    history: StrokeHistory,
    style: InkStyle,
    active: bool,
    gesture: StrokeGesture,
}

impl StrokeLayer<RasterBuffer> {
    /// Create a blank layer of the given size. `history_limit` caps the undo
    /// depth; `None` keeps every stroke undoable.
    pub fn new(width: u32, height: u32, style: InkStyle, history_limit: Option<usize>) -> Self {
        Self::with_surface(RasterBuffer::new(width, height), style, history_limit)
    }
}

impl<S: RasterSurface> StrokeLayer<S> {
    pub fn with_surface(surface: S, style: InkStyle, history_limit: Option<usize>) -> Self {
        Self {
            surface,
            history: StrokeHistory::new(history_limit),
            style,
            active: false,
            gesture: StrokeGesture::Idle,
        }
    }

    /// Enable or disable pointer capture. Disabling ends any stroke in
    /// progress; no further segment is added for that gesture.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.gesture = StrokeGesture::Idle;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.gesture, StrokeGesture::Drawing { .. })
    }

    pub fn gesture(&self) -> &StrokeGesture {
        &self.gesture
    }

    /// Start a stroke at a canvas-local point.
    pub fn stroke_begin(&mut self, point: Point) {
        if !self.active {
            return;
        }
        match self.surface.capture() {
            Ok(snapshot) => self.history.push(snapshot),
            Err(err) => log::warn!("{err}; this stroke cannot be undone"),
        }
        self.gesture = StrokeGesture::Drawing {
            points: vec![point],
        };
    }

    /// Extend the stroke in progress and composite the new segment.
    pub fn stroke_extend(&mut self, point: Point) {
        if !self.active {
            return;
        }
        let StrokeGesture::Drawing { points } = &mut self.gesture else {
            return;
        };
        let Some(&last) = points.last() else {
            return;
        };
        points.push(point);
        self.surface
            .stroke_segment(last, point, self.style.width, self.style.color);
    }

    /// Finish the stroke in progress.
    pub fn stroke_end(&mut self) {
        self.gesture = StrokeGesture::Idle;
    }

    /// Restore the surface to before the latest stroke, or clear it when no
    /// snapshot is left.
    pub fn undo(&mut self) {
        self.gesture = StrokeGesture::Idle;
        match self.history.pop() {
            Some(snapshot) => self.surface.restore(snapshot),
            None => self.surface.clear(),
        }
    }

    /// Blank the surface and drop all undo history.
    pub fn clear(&mut self) {
        self.gesture = StrokeGesture::Idle;
        self.history.clear();
        self.surface.clear();
    }

    /// Color for subsequent strokes. Existing ink is unchanged.
    pub fn set_color(&mut self, color: RgbaColor) {
        self.style.color = color;
    }

    pub fn style(&self) -> InkStyle {
        self.style
    }

    /// Vector path of the stroke in progress.
    pub fn current_path(&self) -> Option<BezPath> {
        let StrokeGesture::Drawing { points } = &self.gesture else {
            return None;
        };
        let (first, rest) = points.split_first()?;
        let mut path = BezPath::new();
        path.move_to(*first);
        for point in rest {
            path.line_to(*point);
        }
        Some(path)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn size(&self) -> (u32, u32) {
        self.surface.size()
    }

    pub fn pixels(&self) -> &RgbaImage {
        self.surface.pixels()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> StrokeLayer {
        let mut layer = StrokeLayer::new(60, 60, InkStyle::default(), None);
        layer.set_active(true);
        layer
    }

    fn draw(layer: &mut StrokeLayer, from: Point, to: Point) {
        layer.stroke_begin(from);
        layer.stroke_extend(to);
        layer.stroke_end();
    }

    fn blank(layer: &StrokeLayer) -> bool {
        layer.pixels().pixels().all(|p| p[3] == 0)
    }

    #[test]
    fn test_undo_is_lifo() {
        let mut layer = layer();
        draw(&mut layer, Point::new(5.0, 10.0), Point::new(55.0, 10.0));
        let after_s1 = layer.pixels().clone();
        draw(&mut layer, Point::new(5.0, 30.0), Point::new(55.0, 30.0));
        let after_s2 = layer.pixels().clone();
        draw(&mut layer, Point::new(5.0, 50.0), Point::new(55.0, 50.0));

        layer.undo();
        assert_eq!(layer.pixels(), &after_s2);
        layer.undo();
        assert_eq!(layer.pixels(), &after_s1);
        layer.undo();
        assert!(blank(&layer));
        layer.undo();
        assert!(blank(&layer));
    }

    #[test]
    fn test_undo_reaches_first_stroke_after_many() {
        let mut layer = layer();
        draw(&mut layer, Point::new(5.0, 5.0), Point::new(55.0, 5.0));
        let after_s1 = layer.pixels().clone();
        for i in 0..40 {
            let y = 8.0 + i as f64;
            draw(&mut layer, Point::new(5.0, y), Point::new(55.0, y));
        }
        assert_eq!(layer.undo_depth(), 41);

        for _ in 0..40 {
            layer.undo();
        }
        assert_eq!(layer.pixels(), &after_s1);
        layer.undo();
        assert!(blank(&layer));
    }

    #[test]
    fn test_history_limit_is_opt_in() {
        let mut layer = StrokeLayer::new(60, 60, InkStyle::default(), Some(2));
        layer.set_active(true);
        for y in [10.0, 20.0, 30.0] {
            draw(&mut layer, Point::new(5.0, y), Point::new(55.0, y));
        }
        assert_eq!(layer.undo_depth(), 2);
    }

    #[test]
    fn test_clear_discards_history() {
        let mut layer = layer();
        draw(&mut layer, Point::new(5.0, 10.0), Point::new(55.0, 10.0));
        draw(&mut layer, Point::new(5.0, 30.0), Point::new(55.0, 30.0));
        layer.clear();
        assert!(blank(&layer));
        assert!(!layer.can_undo());
        layer.undo();
        assert!(blank(&layer));
    }

    #[test]
    fn test_inactive_layer_ignores_input() {
        let mut layer = StrokeLayer::new(60, 60, InkStyle::default(), None);
        draw(&mut layer, Point::new(5.0, 10.0), Point::new(55.0, 10.0));
        assert!(blank(&layer));
        assert_eq!(layer.undo_depth(), 0);
    }

    #[test]
    fn test_deactivate_mid_stroke() {
        let mut layer = layer();
        layer.stroke_begin(Point::new(5.0, 10.0));
        layer.stroke_extend(Point::new(30.0, 10.0));
        let before = layer.pixels().clone();

        layer.set_active(false);
        layer.stroke_extend(Point::new(30.0, 50.0));
        assert_eq!(layer.pixels(), &before);

        // Re-enabling does not resume the old gesture.
        layer.set_active(true);
        layer.stroke_extend(Point::new(30.0, 50.0));
        assert_eq!(layer.pixels(), &before);
        assert!(!layer.is_drawing());
    }

    #[test]
    fn test_single_point_stroke_leaves_no_ink() {
        let mut layer = layer();
        layer.stroke_begin(Point::new(30.0, 30.0));
        layer.stroke_end();
        assert!(blank(&layer));
        assert_eq!(layer.undo_depth(), 1);
    }

    #[test]
    fn test_extend_without_begin_is_ignored() {
        let mut layer = layer();
        layer.stroke_extend(Point::new(30.0, 30.0));
        assert!(blank(&layer));
    }

    #[test]
    fn test_set_color_affects_new_strokes_only() {
        let mut layer = layer();
        draw(&mut layer, Point::new(5.0, 10.5), Point::new(55.0, 10.5));
        layer.set_color(RgbaColor::new(255, 0, 0, 255));
        draw(&mut layer, Point::new(5.0, 40.5), Point::new(55.0, 40.5));

        assert_eq!(layer.pixels().get_pixel(30, 10)[0], 0);
        assert_eq!(layer.pixels().get_pixel(30, 40)[0], 255);
    }

    #[test]
    fn test_current_path_tracks_samples() {
        let mut layer = layer();
        assert!(layer.current_path().is_none());
        layer.stroke_begin(Point::new(1.0, 1.0));
        layer.stroke_extend(Point::new(2.0, 2.0));
        layer.stroke_extend(Point::new(3.0, 1.0));
        assert_eq!(layer.current_path().unwrap().elements().len(), 3);
        layer.stroke_end();
        assert!(layer.current_path().is_none());
    }

    #[derive(Debug, Clone)]
    struct RefusingSurface(RasterBuffer);

    impl RasterSurface for RefusingSurface {
        fn size(&self) -> (u32, u32) {
            self.0.size()
        }

        fn capture(&self) -> Result<RgbaImage, SnapshotRefused> {
            Err(SnapshotRefused::new("tainted"))
        }

        fn restore(&mut self, snapshot: RgbaImage) {
            self.0.restore(snapshot);
        }

        fn clear(&mut self) {
            self.0.clear();
        }

        fn stroke_segment(&mut self, from: Point, to: Point, width: f64, color: RgbaColor) {
            self.0.stroke_segment(from, to, width, color);
        }

        fn pixels(&self) -> &RgbaImage {
            self.0.pixels()
        }
    }

    #[test]
    fn test_refused_snapshot_still_draws() {
        let mut layer =
            StrokeLayer::with_surface(RefusingSurface(RasterBuffer::new(60, 60)), InkStyle::default(), None);
        layer.set_active(true);
        layer.stroke_begin(Point::new(5.0, 10.0));
        layer.stroke_extend(Point::new(55.0, 10.0));
        layer.stroke_end();

        assert!(!layer.surface().0.is_blank());
        assert!(!layer.can_undo());
        // With no recorded snapshot, undo falls back to a blank surface.
        layer.undo();
        assert!(layer.surface().0.is_blank());
    }
}
