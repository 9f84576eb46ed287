//! User actions the shell understands.

use memegen_core::input::PointerEvent;
use memegen_core::overlays::OverlayId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One user interaction, as recorded in a session script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    /// Start a new scene from a built-in template.
    ChooseTemplate { name: String },
    /// Start a new scene from an image file.
    UploadFile { path: PathBuf },
    /// Start a new scene from a `data:` URL.
    UploadDataUrl { data_url: String },
    /// Go back to background selection.
    Back,
    AddText,
    AddCharacter { asset: String },
    ToggleCharacterPicker,
    /// Raw pointer input in screen coordinates.
    Pointer { event: PointerEvent },
    /// Where the canvas' top-left corner sits on screen.
    SetCanvasOrigin { x: f64, y: f64 },
    SetText { id: OverlayId, text: String },
    ToggleEdit { id: OverlayId },
    CommitEdit { id: OverlayId },
    ResizeSelected { size: f64 },
    DeleteSelected,
    SetDrawingMode { enabled: bool },
    ToggleDrawing,
    /// CSS color string, e.g. `#ff0000` or `red`.
    SetDrawColor { color: String },
    UndoStroke,
    ClearStrokes,
    /// Export the scene as PNG.
    Download,
}
