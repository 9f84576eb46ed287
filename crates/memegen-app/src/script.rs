//! Replaying recorded sessions.

use crate::actions::UiAction;
use crate::app::{App, AppError};
use crate::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A recorded session: optional configuration plus the actions to replay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub config: Option<AppConfig>,
    pub actions: Vec<UiAction>,
}

impl Script {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply every action in order. A failing action is logged and skipped,
    /// like a failed click in the editor. Returns how many failed.
    pub fn replay(&self, app: &mut App) -> usize {
        let mut failures = 0;
        for (index, action) in self.actions.iter().enumerate() {
            if let Err(err) = app.apply(action.clone()) {
                log::error!("Action {index} ({action:?}) failed: {err}");
                failures += 1;
            }
        }
        failures
    }
}

/// Load a script, build the app it configures and replay it.
///
/// Relative asset and font paths are resolved against the script's directory.
pub fn run_script(path: impl AsRef<Path>, out_dir: impl Into<PathBuf>) -> Result<usize, AppError> {
    let path = path.as_ref();
    let script = Script::load(path)?;
    let mut config = script.config.clone().unwrap_or_default();

    if let Some(base) = path.parent() {
        if config.asset_dir.is_relative() {
            config.asset_dir = base.join(&config.asset_dir);
        }
        if let Some(font) = config.font_path.as_mut() {
            if font.is_relative() {
                *font = base.join(&*font);
            }
        }
    }

    let mut app = App::new(config, out_dir)?;
    log::info!("Replaying {} actions from {}", script.actions.len(), path.display());
    Ok(script.replay(&mut app))
}
