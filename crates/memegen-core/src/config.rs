//! Editor configuration.

use crate::color::RgbaColor;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Inclusive size range for character overlays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeBounds {
    pub min: f64,
    pub max: f64,
}

impl SizeBounds {
    /// Range used by the full editor.
    pub const STANDARD: Self = Self { min: 20.0, max: 300.0 };
    /// Range used by the minimal editor (slider starts at 50).
    pub const MINIMAL: Self = Self { min: 50.0, max: 300.0 };

    /// Clamp a requested size into this range. NaN maps to `min`.
    pub fn clamp(&self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min;
        }
        size.clamp(self.min, self.max)
    }

    pub fn contains(&self, size: f64) -> bool {
        size >= self.min && size <= self.max
    }
}

impl Default for SizeBounds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Tunables for a single editing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Canvas width used for color and panel backgrounds.
    pub canvas_width: u32,
    /// Canvas height used for color and panel backgrounds.
    pub canvas_height: u32,
    /// Content of a freshly added text overlay.
    pub text_content: String,
    /// Where new text overlays appear (canvas coordinates).
    pub text_spawn: Point,
    /// Where new character overlays appear (canvas coordinates).
    pub character_spawn: Point,
    /// Edge length of a freshly added character overlay.
    pub character_size: f64,
    /// Allowed character edge lengths.
    pub character_bounds: SizeBounds,
    /// Ink line width in pixels.
    pub stroke_width: f64,
    /// Initial ink color.
    pub stroke_color: RgbaColor,
    /// Maximum number of stroke snapshots kept for undo. `None` keeps every
    /// stroke undoable for the whole session.
    pub stroke_history_limit: Option<usize>,
    /// Commit other text overlays when one enters edit mode.
    pub single_text_editing: bool,
    /// Maximum gap between two presses counted as a double-click.
    pub double_click_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 500,
            canvas_height: 500,
            text_content: "Double-click to edit".to_string(),
            text_spawn: Point::new(200.0, 200.0),
            character_spawn: Point::new(150.0, 150.0),
            character_size: 100.0,
            character_bounds: SizeBounds::STANDARD,
            stroke_width: 3.0,
            stroke_color: RgbaColor::black(),
            stroke_history_limit: None,
            single_text_editing: true,
            double_click_ms: 500,
        }
    }
}

impl EditorConfig {
    /// Configuration matching the minimal editor variant.
    pub fn minimal() -> Self {
        Self {
            character_bounds: SizeBounds::MINIMAL,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_bounds() {
        assert!((SizeBounds::STANDARD.clamp(1000.0) - 300.0).abs() < f64::EPSILON);
        assert!((SizeBounds::STANDARD.clamp(-50.0) - 20.0).abs() < f64::EPSILON);
        assert!((SizeBounds::MINIMAL.clamp(-50.0) - 50.0).abs() < f64::EPSILON);
        assert!((SizeBounds::STANDARD.clamp(f64::NAN) - 20.0).abs() < f64::EPSILON);
        assert!((SizeBounds::STANDARD.clamp(120.0) - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{ "stroke_width": 5.0 }"#).unwrap();
        assert!((config.stroke_width - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.text_content, "Double-click to edit");
        assert_eq!(config.character_bounds, SizeBounds::STANDARD);
        assert_eq!(config.stroke_history_limit, None);
    }
}
