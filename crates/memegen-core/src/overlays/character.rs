//! Character (clip-art) overlay.

use super::{OverlayId, OverlayTrait};
use crate::config::SizeBounds;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A square clip-art image placed on the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterOverlay {
    pub(crate) id: OverlayId,
    /// Top-left corner in canvas coordinates.
    pub position: Point,
    /// Catalog key of the asset.
    pub(crate) asset: String,
    /// Edge length; width and height are always equal.
    pub(crate) size: f64,
}

impl CharacterOverlay {
    pub(crate) fn new(id: OverlayId, asset: String, position: Point, size: f64) -> Self {
        Self {
            id,
            position,
            asset,
            size,
        }
    }

    /// Catalog key of the asset this overlay shows.
    pub fn asset(&self) -> &str {
        &self.asset
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn width(&self) -> f64 {
        self.size
    }

    pub fn height(&self) -> f64 {
        self.size
    }

    /// Set a uniform size, clamped to `bounds`. Returns the applied size.
    pub(crate) fn resize(&mut self, size: f64, bounds: SizeBounds) -> f64 {
        self.size = bounds.clamp(size);
        self.size
    }
}

impl OverlayTrait for CharacterOverlay {
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
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + self.size,
            self.position.y + self.size,
        )
    }
}
