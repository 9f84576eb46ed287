//! The Scene aggregate: background, canvas size, overlays and ink.

use crate::assets::AssetCatalog;
use crate::background::{Background, BackgroundImage, Template};
use crate::color::RgbaColor;
use crate::config::EditorConfig;
use crate::overlays::{Overlay, OverlayModel};
use crate::strokes::{InkStyle, StrokeLayer};
use image::RgbaImage;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Canvas dimensions in pixels. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }
}

/// One entry of the paint list, bottom to top.
#[derive(Debug, Clone, Copy)]
pub enum Layer<'a> {
    Background(&'a Background),
    Strokes(&'a RgbaImage),
    Overlay(&'a Overlay),
}

/// Everything that makes up the composed image.
#[derive(Debug, Clone)]
pub struct Scene {
    size: CanvasSize,
    background: Background,
    text_color: RgbaColor,
    pub overlays: OverlayModel,
    pub strokes: StrokeLayer,
}

impl Scene {
    /// Create an empty scene over `background`.
    pub fn new(
        background: Background,
        size: CanvasSize,
        config: &EditorConfig,
        catalog: AssetCatalog,
    ) -> Self {
        let style = InkStyle {
            color: config.stroke_color,
            width: config.stroke_width,
        };
        Self {
            size,
            text_color: background.text_color(),
            background,
            overlays: OverlayModel::new(config.clone(), catalog),
            strokes: StrokeLayer::new(size.width, size.height, style, config.stroke_history_limit),
        }
    }

    /// Scene for a built-in template, at the configured default canvas size.
    pub fn from_template(template: &Template, config: &EditorConfig, catalog: AssetCatalog) -> Self {
        let size = CanvasSize::new(config.canvas_width, config.canvas_height);
        log::info!("Starting scene from template {:?}", template.name);
        Self::new(template.background(), size, config, catalog)
    }

    /// Scene for an uploaded image; the canvas takes the image's natural size.
    pub fn from_upload(image: BackgroundImage, config: &EditorConfig, catalog: AssetCatalog) -> Self {
        let size = CanvasSize::new(image.width(), image.height());
        log::info!("Starting scene from upload ({}x{})", size.width, size.height);
        Self::new(Background::Image(image), size, config, catalog)
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Default color for overlay text, derived from the background.
    pub fn text_color(&self) -> RgbaColor {
        self.text_color
    }

    /// Where an image background is drawn: fitted inside the canvas keeping
    /// its aspect ratio, centered. `None` for color backgrounds.
    pub fn background_rect(&self) -> Option<Rect> {
        let (width, height) = self.background.natural_size()?;
        Some(fit_contain(width, height, self.size))
    }

    /// Paint list in stacking order: background, ink, then overlays.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        [
            Layer::Background(&self.background),
            Layer::Strokes(self.strokes.pixels()),
        ]
        .into_iter()
        .chain(self.overlays.iter().map(Layer::Overlay))
    }
}

/// Largest rect with the aspect ratio of `width` x `height` that fits the
/// canvas, centered.
pub fn fit_contain(width: u32, height: u32, canvas: CanvasSize) -> Rect {
    let (cw, ch) = (canvas.width as f64, canvas.height as f64);
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);
    let scale = (cw / w).min(ch / h);
    let (fw, fh) = (w * scale, h * scale);
    let x0 = (cw - fw) / 2.0;
    let y0 = (ch - fh) / 2.0;
    Rect::new(x0, y0, x0 + fw, y0 + fh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use kurbo::Point;

    #[test]
    fn test_template_scene_uses_default_size() {
        let template = Template::find("4 Panel").unwrap();
        let scene = Scene::from_template(template, &EditorConfig::default(), AssetCatalog::default());
        assert_eq!(scene.size(), CanvasSize::new(500, 500));
        assert_eq!(scene.strokes.size(), (500, 500));
        assert_eq!(scene.text_color(), RgbaColor::black());
        let rect = scene.background_rect().unwrap();
        assert!((rect.width() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_black_template_has_white_text() {
        let template = Template::find("black").unwrap();
        let scene = Scene::from_template(template, &EditorConfig::default(), AssetCatalog::default());
        assert_eq!(scene.text_color(), RgbaColor::white());
        assert!(scene.background_rect().is_none());
    }

    #[test]
    fn test_upload_uses_natural_size() {
        let image = BackgroundImage::from_rgba(RgbaImage::from_pixel(640, 360, Rgba([9, 9, 9, 255]))).unwrap();
        let scene = Scene::from_upload(image, &EditorConfig::default(), AssetCatalog::default());
        assert_eq!(scene.size(), CanvasSize::new(640, 360));
        assert_eq!(scene.strokes.size(), (640, 360));
    }

    #[test]
    fn test_fit_contain_centers() {
        let rect = fit_contain(200, 100, CanvasSize::new(500, 500));
        assert!((rect.x0).abs() < f64::EPSILON);
        assert!((rect.y0 - 125.0).abs() < f64::EPSILON);
        assert!((rect.height() - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_layers_paint_order() {
        let mut scene = Scene::from_template(
            Template::find("White").unwrap(),
            &EditorConfig::default(),
            AssetCatalog::default(),
        );
        let text = scene.overlays.add_text();
        let troll = scene.overlays.add_character("Troll").unwrap();
        // Selection state is chrome, not content.
        scene.overlays.begin_drag(troll, Point::new(160.0, 160.0));

        let layers: Vec<_> = scene.layers().collect();
        assert_eq!(layers.len(), 4);
        assert!(matches!(layers[0], Layer::Background(_)));
        assert!(matches!(layers[1], Layer::Strokes(_)));
        assert!(matches!(layers[2], Layer::Overlay(o) if o.id() == text));
        assert!(matches!(layers[3], Layer::Overlay(o) if o.id() == troll));
    }
}
