//! Backgrounds: solid colors, generated panel templates and uploaded images.

use crate::color::RgbaColor;
use base64::{Engine, engine::general_purpose::STANDARD};
use image::{Rgba, RgbaImage};
use std::sync::Arc;
use thiserror::Error;

/// Edge length of generated panel templates.
pub const PANEL_SIZE: u32 = 1000;
/// Divider thickness in generated panel templates.
const PANEL_LINE_WIDTH: f64 = 6.0;

/// Background errors.
#[derive(Debug, Error)]
pub enum BackgroundError {
    #[error("Unsupported image format")]
    UnsupportedFormat,
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Image decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has no pixels")]
    Empty,
}

/// Encoded image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from a MIME type such as `image/png`.
    pub fn from_mime_type(mime: &str) -> Option<Self> {
        match mime.trim().to_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < 4 {
            return None;
        }
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        None
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// A decoded background image.
///
/// Pixels are shared, so cloning a background (or a scene holding one) does
/// not copy the raster.
#[derive(Debug, Clone)]
pub struct BackgroundImage {
    pixels: Arc<RgbaImage>,
    format: Option<ImageFormat>,
}

impl BackgroundImage {
    /// Decode an uploaded file's bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, BackgroundError> {
        let format = ImageFormat::from_magic_bytes(bytes).ok_or(BackgroundError::UnsupportedFormat)?;
        let pixels = image::load_from_memory_with_format(bytes, format.into())?.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BackgroundError::Empty);
        }
        log::debug!(
            "Decoded {} background {}x{}",
            format.mime_type(),
            pixels.width(),
            pixels.height()
        );
        Ok(Self {
            pixels: Arc::new(pixels),
            format: Some(format),
        })
    }

    /// Decode a `data:image/...;base64,...` URL.
    pub fn from_data_url(url: &str) -> Result<Self, BackgroundError> {
        let rest = url
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| BackgroundError::InvalidDataUrl("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| BackgroundError::InvalidDataUrl("missing payload".to_string()))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| BackgroundError::InvalidDataUrl("payload is not base64".to_string()))?;
        if !mime.is_empty() && ImageFormat::from_mime_type(mime).is_none() {
            return Err(BackgroundError::UnsupportedFormat);
        }

        let bytes = STANDARD.decode(payload.trim())?;
        Self::decode(&bytes)
    }

    /// Wrap already-decoded pixels.
    pub fn from_rgba(pixels: RgbaImage) -> Result<Self, BackgroundError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(BackgroundError::Empty);
        }
        Ok(Self {
            pixels: Arc::new(pixels),
            format: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Encoded format of the upload, `None` for generated images.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// What sits underneath the ink and overlays.
#[derive(Debug, Clone)]
pub enum Background {
    Color(RgbaColor),
    Image(BackgroundImage),
}

impl Background {
    /// Default overlay text color for this background.
    ///
    /// Dark colors get white text; light colors and all images get black text.
    pub fn text_color(&self) -> RgbaColor {
        match self {
            Background::Color(color) => color.contrasting(),
            Background::Image(_) => RgbaColor::black(),
        }
    }

    /// Natural pixel dimensions, for image backgrounds.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        match self {
            Background::Color(_) => None,
            Background::Image(image) => Some((image.width(), image.height())),
        }
    }
}

/// How a template background is produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TemplateKind {
    Color(RgbaColor),
    Panels { rows: u32, cols: u32 },
}

/// A selectable starting background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Template {
    pub name: &'static str,
    pub kind: TemplateKind,
}

const TEMPLATES: [Template; 6] = [
    Template { name: "Black", kind: TemplateKind::Color(RgbaColor::black()) },
    Template { name: "White", kind: TemplateKind::Color(RgbaColor::white()) },
    Template { name: "2 Panel (Horizontal)", kind: TemplateKind::Panels { rows: 1, cols: 2 } },
    Template { name: "2 Panel (Vertical)", kind: TemplateKind::Panels { rows: 2, cols: 1 } },
    Template { name: "4 Panel", kind: TemplateKind::Panels { rows: 2, cols: 2 } },
    Template { name: "8 Panel", kind: TemplateKind::Panels { rows: 4, cols: 2 } },
];

impl Template {
    /// All built-in templates, in display order.
    pub fn catalog() -> &'static [Template] {
        &TEMPLATES
    }

    /// Look up a template by its display name (case-insensitive).
    pub fn find(name: &str) -> Option<&'static Template> {
        TEMPLATES.iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Build the background this template describes.
    pub fn background(&self) -> Background {
        match self.kind {
            TemplateKind::Color(color) => Background::Color(color),
            TemplateKind::Panels { rows, cols } => {
                let pixels = generate_panels(rows, cols, RgbaColor::black());
                Background::Image(BackgroundImage {
                    pixels: Arc::new(pixels),
                    format: None,
                })
            }
        }
    }
}

/// Render a white `PANEL_SIZE` square split into `rows` x `cols` panels.
pub fn generate_panels(rows: u32, cols: u32, line_color: RgbaColor) -> RgbaImage {
    let size = PANEL_SIZE;
    let mut image = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 255]));
    let line: Rgba<u8> = line_color.into();
    let half = PANEL_LINE_WIDTH / 2.0;

    let band = |center: f64| -> (u32, u32) {
        let start = (center - half).round().max(0.0) as u32;
        let end = ((center + half).round() as u32).min(size);
        (start, end)
    };

    for c in 1..cols.max(1) {
        let (x0, x1) = band(size as f64 / cols as f64 * c as f64);
        for y in 0..size {
            for x in x0..x1 {
                image.put_pixel(x, y, line);
            }
        }
    }

    for r in 1..rows.max(1) {
        let (y0, y1) = band(size as f64 / rows as f64 * r as f64);
        for y in y0..y1 {
            for x in 0..size {
                image.put_pixel(x, y, line);
            }
        }
    }

    image
}
