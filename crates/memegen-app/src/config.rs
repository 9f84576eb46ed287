//! Application configuration.

use crate::app::AppError;
use memegen_core::config::EditorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Editing defaults.
    pub editor: EditorConfig,
    /// File name used by the download action.
    pub export_file_name: String,
    /// Font for text overlays in exports. Defaults to the bundled bold sans.
    pub font_path: Option<PathBuf>,
    /// Directory holding the character images.
    pub asset_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            editor: EditorConfig::default(),
            export_file_name: "meme.png".to_string(),
            font_path: None,
            asset_dir: PathBuf::from("assets"),
        }
    }
}

impl AppConfig {
    /// Load from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}
