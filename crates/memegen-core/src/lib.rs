//! Memegen Core Library
//!
//! Platform-agnostic scene model for the meme editor: backgrounds, draggable
//! text and character overlays, and the freehand ink layer.

pub mod assets;
pub mod background;
pub mod color;
pub mod config;
pub mod editor;
pub mod input;
pub mod overlays;
pub mod scene;
pub mod strokes;
pub mod widget;

pub use assets::{AssetCatalog, CharacterAsset};
pub use background::{Background, BackgroundError, BackgroundImage, ImageFormat, Template, TemplateKind};
pub use color::RgbaColor;
pub use config::{EditorConfig, SizeBounds};
pub use editor::{Editor, EditorError, Routed};
pub use input::{InputState, PointerEvent, TouchPhase};
pub use overlays::{CharacterOverlay, Overlay, OverlayId, OverlayModel, OverlayTrait, TextOverlay};
pub use scene::{CanvasSize, Layer, Scene};
pub use strokes::{InkStyle, RasterBuffer, RasterSurface, SnapshotRefused, StrokeLayer};
pub use widget::{ControlKind, SelectionControls, WidgetManager, WidgetState};
