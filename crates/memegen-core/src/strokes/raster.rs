//! Raster surface the ink layer composites onto.

use crate::color::RgbaColor;
use image::{Rgba, RgbaImage};
use kurbo::{Point, Vec2};
use thiserror::Error;

/// The host refused to read back the surface's pixels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("raster snapshot refused: {reason}")]
pub struct SnapshotRefused {
    pub reason: String,
}

impl SnapshotRefused {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A drawable RGBA surface with whole-buffer capture and restore.
pub trait RasterSurface {
    /// Surface size in pixels.
    fn size(&self) -> (u32, u32);

    /// Copy the full buffer. May be refused by the host.
    fn capture(&self) -> Result<RgbaImage, SnapshotRefused>;

    /// Replace the full buffer with a previous capture.
    fn restore(&mut self, snapshot: RgbaImage);

    /// Make every pixel fully transparent.
    fn clear(&mut self);

    /// Composite one line segment with round caps.
    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, color: RgbaColor);

    /// Current pixels.
    fn pixels(&self) -> &RgbaImage;
}

/// Minimum distance from a point to a line segment.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    (point - proj).hypot()
}

/// In-memory RGBA buffer, transparent when created.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width.max(1), height.max(1)),
        }
    }

    /// True when no pixel carries any alpha.
    pub fn is_blank(&self) -> bool {
        self.image.pixels().all(|p| p[3] == 0)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl RasterSurface for RasterBuffer {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn capture(&self) -> Result<RgbaImage, SnapshotRefused> {
        Ok(self.image.clone())
    }

    fn restore(&mut self, snapshot: RgbaImage) {
        if snapshot.dimensions() != self.image.dimensions() {
            log::warn!(
                "Discarding snapshot of size {:?} for a {:?} surface",
                snapshot.dimensions(),
                self.image.dimensions()
            );
            return;
        }
        self.image = snapshot;
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, color: RgbaColor) {
        let radius = (width / 2.0).max(0.0);
        // One extra pixel for the anti-aliased rim.
        let reach = radius + 1.0;
        let (w, h) = self.image.dimensions();

        let x0 = (from.x.min(to.x) - reach).floor().max(0.0);
        let y0 = (from.y.min(to.y) - reach).floor().max(0.0);
        let x1 = (from.x.max(to.x) + reach).ceil().min(w as f64);
        let y1 = (from.y.max(to.y) + reach).ceil().min(h as f64);
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (radius + 0.5 - point_to_segment_dist(center, from, to)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    color.blend_onto(self.image.get_pixel_mut(x, y), coverage);
                }
            }
        }
    }

    fn pixels(&self) -> &RgbaImage {
        &self.image
    }
}
