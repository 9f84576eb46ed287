//! Application state and action dispatch.

use crate::actions::UiAction;
use crate::config::AppConfig;
use kurbo::Point;
use memegen_core::assets::AssetCatalog;
use memegen_core::color::RgbaColor;
use memegen_core::editor::{Editor, EditorError};
use memegen_render::{
    DirectoryAssetSource, RenderContext, Renderer, RendererError, SoftwareRenderer, TextRasterizer,
    encode_png,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error("Export failed: {0}")]
    Render(#[from] RendererError),
    #[error("No background chosen")]
    NoScene,
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// The application: an editor, an export renderer and where exports go.
pub struct App {
    editor: Editor,
    renderer: Box<dyn Renderer>,
    config: AppConfig,
    out_dir: PathBuf,
}

impl App {
    /// Create an app rendering characters from `config.asset_dir` and text
    /// with `config.font_path`, falling back to the bundled font.
    pub fn new(config: AppConfig, out_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let mut renderer = SoftwareRenderer::new(Box::new(DirectoryAssetSource::new(&config.asset_dir)));
        if let Some(path) = &config.font_path {
            log::info!("Using font {}", path.display());
            renderer.set_text(TextRasterizer::from_file(path)?);
        }
        Ok(Self::with_renderer(config, Box::new(renderer), out_dir))
    }

    /// Create an app with a custom export renderer.
    pub fn with_renderer(config: AppConfig, renderer: Box<dyn Renderer>, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            editor: Editor::new(config.editor.clone(), AssetCatalog::default()),
            renderer,
            config,
            out_dir: out_dir.into(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Where the download action writes.
    pub fn export_path(&self) -> PathBuf {
        self.out_dir.join(&self.config.export_file_name)
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: UiAction) -> Result<(), AppError> {
        log::debug!("Applying {action:?}");
        match action {
            UiAction::ChooseTemplate { name } => self.editor.choose_template(&name)?,
            UiAction::UploadFile { path } => {
                let bytes = std::fs::read(&path)?;
                self.editor.upload_bytes(&bytes)?;
            }
            UiAction::UploadDataUrl { data_url } => self.editor.upload_data_url(&data_url)?,
            UiAction::Back => self.editor.back(),
            UiAction::AddText => {
                self.editor.add_text().ok_or(AppError::NoScene)?;
            }
            UiAction::AddCharacter { asset } => {
                let scene = self.editor.scene().ok_or(AppError::NoScene)?;
                if !scene.overlays.catalog().contains(&asset) {
                    log::warn!("Unknown character asset {asset:?}; ignoring");
                }
                self.editor.add_character(&asset);
            }
            UiAction::ToggleCharacterPicker => {
                self.editor.toggle_character_picker();
            }
            UiAction::Pointer { event } => {
                self.editor.handle_pointer(event);
            }
            UiAction::SetCanvasOrigin { x, y } => self.editor.set_canvas_origin(Point::new(x, y)),
            UiAction::SetText { id, text } => self.editor.set_text(id, text),
            UiAction::ToggleEdit { id } => {
                self.editor.toggle_edit(id);
            }
            UiAction::CommitEdit { id } => self.editor.commit_edit(id),
            UiAction::ResizeSelected { size } => {
                self.editor.resize_selected(size);
            }
            UiAction::DeleteSelected => {
                self.editor.delete_selected();
            }
            UiAction::SetDrawingMode { enabled } => self.editor.set_drawing_mode(enabled),
            UiAction::ToggleDrawing => {
                self.editor.toggle_drawing();
            }
            UiAction::SetDrawColor { color } => {
                let color = RgbaColor::parse(&color).ok_or(AppError::InvalidColor(color))?;
                self.editor.set_draw_color(color);
            }
            UiAction::UndoStroke => self.editor.undo_stroke(),
            UiAction::ClearStrokes => self.editor.clear_strokes(),
            UiAction::Download => {
                self.download()?;
            }
        }
        Ok(())
    }

    /// Export the scene as PNG to `export_path()`.
    ///
    /// The file appears only once fully written; on failure nothing is left
    /// behind and the editor is unchanged.
    pub fn download(&mut self) -> Result<PathBuf, AppError> {
        let path = self.export_path();
        match self.export_to(&path) {
            Ok(len) => {
                log::info!("PNG export complete: {} bytes to {}", len, path.display());
                Ok(path)
            }
            Err(err) => {
                log::error!("Failed to export PNG: {err}");
                Err(err)
            }
        }
    }

    fn export_to(&mut self, path: &Path) -> Result<usize, AppError> {
        let scene = self.editor.scene().ok_or(AppError::NoScene)?;
        let rendered = self.renderer.render(&RenderContext::new(scene))?;
        let png_data = encode_png(&rendered)?;

        let tmp = path.with_extension("png.part");
        if let Err(err) = std::fs::write(&tmp, &png_data).and_then(|()| std::fs::rename(&tmp, path)) {
            let _ = std::fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(png_data.len())
    }
}
