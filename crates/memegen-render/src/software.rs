//! CPU compositor built on `image`.

use crate::assets::AssetSource;
use crate::renderer::{PngRenderResult, RenderContext, RenderResult, Renderer, RendererError};
use crate::text::TextRasterizer;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use kurbo::Rect;
use memegen_core::background::Background;
use memegen_core::color::RgbaColor;
use memegen_core::overlays::{Overlay, OverlayTrait, TextOverlay};
use memegen_core::scene::{Layer, Scene};
use memegen_core::widget::SelectionControls;

const OUTLINE_WIDTH: f64 = 2.0;

/// Composites background, ink and overlays into one RGBA buffer.
pub struct SoftwareRenderer {
    assets: Box<dyn AssetSource>,
    text: Option<TextRasterizer>,
}

impl SoftwareRenderer {
    /// Create a renderer drawing text with the bundled font.
    pub fn new(assets: Box<dyn AssetSource>) -> Self {
        let text = match TextRasterizer::embedded() {
            Ok(text) => Some(text),
            Err(err) => {
                log::error!("Failed to load bundled font: {err}");
                None
            }
        };
        Self { assets, text }
    }

    /// Use `text` for text overlays instead of the bundled font.
    pub fn with_text(mut self, text: TextRasterizer) -> Self {
        self.text = Some(text);
        self
    }

    pub fn set_text(&mut self, text: TextRasterizer) {
        self.text = Some(text);
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    fn paint_background(&self, canvas: &mut RgbaImage, background: &Background, scene: &Scene) {
        match background {
            Background::Color(color) => {
                let pixel: Rgba<u8> = (*color).into();
                for px in canvas.pixels_mut() {
                    *px = pixel;
                }
            }
            Background::Image(image) => {
                let Some(rect) = scene.background_rect() else {
                    return;
                };
                let width = (rect.width().round() as u32).max(1);
                let height = (rect.height().round() as u32).max(1);
                let pixels = image.pixels();
                if pixels.dimensions() == (width, height) {
                    imageops::overlay(canvas, pixels, rect.x0.round() as i64, rect.y0.round() as i64);
                } else {
                    let fitted = imageops::resize(pixels, width, height, FilterType::Triangle);
                    imageops::overlay(canvas, &fitted, rect.x0.round() as i64, rect.y0.round() as i64);
                }
            }
        }
    }

    fn paint_overlay(&mut self, canvas: &mut RgbaImage, overlay: &Overlay, scene: &Scene) -> RenderResult<()> {
        match overlay {
            Overlay::Character(character) => {
                let asset = scene
                    .overlays
                    .catalog()
                    .get(character.asset())
                    .ok_or_else(|| RendererError::MissingAsset(character.asset().to_string()))?;
                let pixels = self.assets.load(asset)?;
                let edge = (character.size().round() as u32).max(1);
                let sized = imageops::resize(pixels.as_ref(), edge, edge, FilterType::Triangle);
                let position = character.position();
                imageops::overlay(canvas, &sized, position.x.round() as i64, position.y.round() as i64);
            }
            Overlay::Text(text) => {
                let rasterizer = self
                    .text
                    .as_ref()
                    .ok_or_else(|| RendererError::Font(format!("no font to draw text overlay {}", text.id())))?;
                rasterizer.draw(
                    canvas,
                    text.position(),
                    text.content(),
                    TextOverlay::FONT_SIZE,
                    scene.text_color(),
                );
            }
        }
        Ok(())
    }

    fn paint_controls(&self, canvas: &mut RgbaImage, ctx: &RenderContext) {
        let Some(controls) = ctx.scene.overlays.selection_controls() else {
            return;
        };
        let selection = RgbaColor::from(ctx.selection_color);
        if let Some(overlay) = ctx.scene.overlays.get(controls.overlay_id) {
            stroke_rect(canvas, overlay.bounds(), OUTLINE_WIDTH, selection);
        }
        paint_panel(canvas, &controls, selection);
    }
}

impl Renderer for SoftwareRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<PngRenderResult> {
        let scene = ctx.scene;
        let size = scene.size();
        let mut canvas = RgbaImage::new(size.width, size.height);

        for layer in scene.layers() {
            match layer {
                Layer::Background(background) => self.paint_background(&mut canvas, background, scene),
                Layer::Strokes(ink) => imageops::overlay(&mut canvas, ink, 0, 0),
                Layer::Overlay(overlay) => self.paint_overlay(&mut canvas, overlay, scene)?,
            }
        }

        if ctx.include_controls {
            self.paint_controls(&mut canvas, ctx);
        }

        Ok(PngRenderResult {
            rgba_data: canvas.into_raw(),
            width: size.width,
            height: size.height,
        })
    }
}

/// Scale/delete control: white panel, slider track with thumb, red delete box.
fn paint_panel(canvas: &mut RgbaImage, controls: &SelectionControls, accent: RgbaColor) {
    fill_rect(canvas, controls.panel_rect(), RgbaColor::new(255, 255, 255, 230));
    stroke_rect(canvas, controls.panel_rect(), 1.0, RgbaColor::new(0, 0, 0, 96));

    let slider = controls.slider_rect();
    let track_y = slider.center().y;
    fill_rect(
        canvas,
        Rect::new(slider.x0, track_y - 2.0, slider.x1, track_y + 2.0),
        RgbaColor::new(200, 200, 200, 255),
    );
    let thumb = controls.thumb_position();
    fill_rect(
        canvas,
        Rect::new(thumb.x - 4.0, slider.y0, thumb.x + 4.0, slider.y1),
        accent,
    );

    fill_rect(canvas, controls.delete_rect(), RgbaColor::new(220, 38, 38, 255));
}

fn fill_rect(canvas: &mut RgbaImage, rect: Rect, color: RgbaColor) {
    let (width, height) = canvas.dimensions();
    let x0 = rect.x0.round().max(0.0) as u32;
    let y0 = rect.y0.round().max(0.0) as u32;
    let x1 = (rect.x1.round().max(0.0) as u32).min(width);
    let y1 = (rect.y1.round().max(0.0) as u32).min(height);
    for y in y0..y1 {
        for x in x0..x1 {
            color.blend_onto(canvas.get_pixel_mut(x, y), 1.0);
        }
    }
}

fn stroke_rect(canvas: &mut RgbaImage, rect: Rect, width: f64, color: RgbaColor) {
    let outer = rect.inflate(width, width);
    fill_rect(canvas, Rect::new(outer.x0, outer.y0, outer.x1, rect.y0), color);
    fill_rect(canvas, Rect::new(outer.x0, rect.y1, outer.x1, outer.y1), color);
    fill_rect(canvas, Rect::new(outer.x0, rect.y0, rect.x0, rect.y1), color);
    fill_rect(canvas, Rect::new(rect.x1, rect.y0, outer.x1, rect.y1), color);
}
