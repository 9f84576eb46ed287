//! Text rasterization for export.

use crate::renderer::{RenderResult, RendererError};
use ab_glyph::{Font, FontArc, FontVec, PxScale, ScaleFont, point};
use image::RgbaImage;
use kurbo::Point;
use memegen_core::color::RgbaColor;
use std::path::Path;

/// Bold sans face bundled for text overlays when no font is configured.
const EMBEDDED_FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Draws text overlays into an RGBA buffer with a single font.
#[derive(Clone)]
pub struct TextRasterizer {
    font: FontArc,
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer").finish_non_exhaustive()
    }
}

impl TextRasterizer {
    /// Load a TrueType/OpenType font from memory.
    pub fn from_bytes(bytes: Vec<u8>) -> RenderResult<Self> {
        let font = FontVec::try_from_vec(bytes).map_err(|err| RendererError::Font(err.to_string()))?;
        Ok(Self {
            font: FontArc::from(font),
        })
    }

    /// Use the bundled bold sans face.
    pub fn embedded() -> RenderResult<Self> {
        let font = FontArc::try_from_slice(EMBEDDED_FONT).map_err(|err| RendererError::Font(err.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<Path>) -> RenderResult<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Draw `text` with its top-left corner at `origin`. Each `\n` starts a
    /// new line.
    pub fn draw(&self, image: &mut RgbaImage, origin: Point, text: &str, size: f64, color: RgbaColor) {
        let scaled = self.font.as_scaled(PxScale::from(size as f32));
        let line_height = scaled.height() + scaled.line_gap();
        let (width, height) = image.dimensions();

        for (row, line) in text.lines().enumerate() {
            let baseline = origin.y as f32 + scaled.ascent() + row as f32 * line_height;
            let mut caret = point(origin.x as f32, baseline);
            let mut previous = None;

            for ch in line.chars() {
                let mut glyph = scaled.scaled_glyph(ch);
                if let Some(prev) = previous {
                    caret.x += scaled.kern(prev, glyph.id);
                }
                glyph.position = caret;
                caret.x += scaled.h_advance(glyph.id);
                previous = Some(glyph.id);

                let Some(outlined) = scaled.outline_glyph(glyph) else {
                    continue;
                };
                let bounds = outlined.px_bounds();
                outlined.draw(|x, y, coverage| {
                    let px = x as i64 + bounds.min.x as i64;
                    let py = y as i64 + bounds.min.y as i64;
                    if px >= 0 && py >= 0 && px < width as i64 && py < height as i64 {
                        color.blend_onto(image.get_pixel_mut(px as u32, py as u32), coverage as f64);
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_font_draws() {
        let text = TextRasterizer::embedded().unwrap();
        let mut image = RgbaImage::new(120, 40);
        text.draw(&mut image, Point::new(4.0, 4.0), "MEME", 24.0, RgbaColor::black());
        assert!(image.pixels().any(|p| p[3] > 0));
    }

    #[test]
    fn test_rejects_invalid_font() {
        assert!(matches!(
            TextRasterizer::from_bytes(vec![0, 1, 2, 3]),
            Err(RendererError::Font(_))
        ));
    }

    #[test]
    fn test_missing_font_file() {
        assert!(matches!(
            TextRasterizer::from_file("/nonexistent/font.ttf"),
            Err(RendererError::Io(_))
        ));
    }
}
