//! Renderer trait abstraction.

use memegen_core::scene::Scene;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Missing character asset: {0}")]
    MissingAsset(String),
    #[error("Font error: {0}")]
    Font(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Result of PNG rendering - contains the raw RGBA pixel data and dimensions.
#[derive(Debug, Clone)]
pub struct PngRenderResult {
    /// RGBA pixel data (4 bytes per pixel).
    pub rgba_data: Vec<u8>,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

/// Context for a single render.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Draw editor chrome (selection outline, scale/delete control).
    /// Always off for exports.
    pub include_controls: bool,
    /// Selection highlight color.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a context for exporting `scene`.
    pub fn new(scene: &'a Scene) -> Self {
        Self {
            scene,
            include_controls: false,
            selection_color: Color::from_rgba8(59, 130, 246, 255), // Blue
        }
    }

    /// Include editor chrome, for previews.
    pub fn with_controls(mut self, include: bool) -> Self {
        self.include_controls = include;
        self
    }

    /// Set the selection highlight color.
    pub fn with_selection_color(mut self, color: Color) -> Self {
        self.selection_color = color;
        self
    }
}

/// Trait for export backends.
pub trait Renderer {
    /// Composite the scene into RGBA pixels at canvas size. Never mutates
    /// the scene.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<PngRenderResult>;
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(result: &PngRenderResult) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, result.width, result.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        writer.write_image_data(&result.rgba_data)?;
    }
    Ok(png_data)
}
