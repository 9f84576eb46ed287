//! Interaction state for overlays.
//!
//! Overlays stay plain data. This module tracks which one is being dragged,
//! which character shows its scale/delete control, and where that control
//! sits on the canvas. None of it is ever exported.

mod controls;
mod manager;
mod state;

pub use controls::{ControlKind, SelectionControls};
pub use manager::WidgetManager;
pub use state::WidgetState;
