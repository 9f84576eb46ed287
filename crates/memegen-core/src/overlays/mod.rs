//! Positionable overlays: text boxes and character images.

mod character;
mod model;
mod text;

pub use character::CharacterOverlay;
pub use model::{DragState, OverlayModel};
pub use text::TextOverlay;

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for overlays, assigned in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverlayId(u64);

impl OverlayId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Common trait for all overlays.
pub trait OverlayTrait {
    /// Get the unique identifier.
    fn id(&self) -> OverlayId;

    /// Top-left corner in canvas coordinates.
    fn position(&self) -> Point;

    /// Move the top-left corner. No clamping: overlays may leave the canvas.
    fn set_position(&mut self, position: Point);

    /// Bounding box in canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a canvas point hits this overlay.
    fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }
}

/// Enum wrapper for all overlay types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Overlay {
    Text(TextOverlay),
    Character(CharacterOverlay),
}

impl Overlay {
    pub fn id(&self) -> OverlayId {
        match self {
            Overlay::Text(o) => o.id(),
            Overlay::Character(o) => o.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Overlay::Text(o) => o.position(),
            Overlay::Character(o) => o.position(),
        }
    }

    pub fn set_position(&mut self, position: Point) {
        match self {
            Overlay::Text(o) => o.set_position(position),
            Overlay::Character(o) => o.set_position(position),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Overlay::Text(o) => o.bounds(),
            Overlay::Character(o) => o.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point) -> bool {
        match self {
            Overlay::Text(o) => o.hit_test(point),
            Overlay::Character(o) => o.hit_test(point),
        }
    }

    /// Whether this is a text overlay with an open input.
    pub fn is_editing(&self) -> bool {
        matches!(self, Overlay::Text(t) if t.is_editing())
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Overlay::Text(_))
    }

    pub fn is_character(&self) -> bool {
        matches!(self, Overlay::Character(_))
    }

    pub fn as_text(&self) -> Option<&TextOverlay> {
        match self {
            Overlay::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextOverlay> {
        match self {
            Overlay::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_character(&self) -> Option<&CharacterOverlay> {
        match self {
            Overlay::Character(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_character_mut(&mut self) -> Option<&mut CharacterOverlay> {
        match self {
            Overlay::Character(c) => Some(c),
            _ => None,
        }
    }
}
