//! Editor controller: owns the scene and routes pointer input to it.

use crate::assets::AssetCatalog;
use crate::background::{BackgroundError, BackgroundImage, Template};
use crate::color::RgbaColor;
use crate::config::EditorConfig;
use crate::input::{InputState, PointerEvent};
use crate::overlays::{OverlayId, OverlayModel};
use crate::scene::Scene;
use crate::widget::ControlKind;
use kurbo::Point;
use std::time::Duration;
use thiserror::Error;

/// Errors from choosing a background.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error(transparent)]
    Background(#[from] BackgroundError),
}

/// Where a pointer event ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed {
    /// Consumed by the ink layer.
    Stroke,
    /// Hit or moved an overlay.
    Overlay(OverlayId),
    /// Hit the scale/delete control.
    Controls(ControlKind),
    /// Landed on empty canvas.
    Background,
    /// Nothing to do (no scene, or no gesture in progress).
    Ignored,
}

/// Owns the current scene (if a background was chosen) and the input state.
///
/// While drawing mode is on, pointer events go to the ink layer and overlays
/// never see them, except presses on the scale/delete control, which stays
/// on top. While drawing mode is off the ink layer is inert.
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Option<Scene>,
    config: EditorConfig,
    catalog: AssetCatalog,
    input: InputState,
    drawing_mode: bool,
    /// Screen-space position of the canvas' top-left corner.
    canvas_origin: Point,
    /// The scale slider is being dragged.
    scrubbing: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default(), AssetCatalog::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig, catalog: AssetCatalog) -> Self {
        let input = InputState::with_double_click_window(Duration::from_millis(config.double_click_ms));
        Self {
            scene: None,
            config,
            catalog,
            input,
            drawing_mode: false,
            canvas_origin: Point::ZERO,
            scrubbing: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    fn start_scene(&mut self, mut scene: Scene) {
        scene.overlays.set_canvas_origin(self.canvas_origin);
        self.drawing_mode = false;
        self.scrubbing = false;
        self.scene = Some(scene);
    }

    /// Start a fresh scene from a built-in template.
    pub fn choose_template(&mut self, name: &str) -> Result<(), EditorError> {
        let template = Template::find(name).ok_or_else(|| EditorError::UnknownTemplate(name.to_string()))?;
        let scene = Scene::from_template(template, &self.config, self.catalog.clone());
        self.start_scene(scene);
        Ok(())
    }

    /// Start a fresh scene from uploaded image bytes.
    pub fn upload_bytes(&mut self, bytes: &[u8]) -> Result<(), EditorError> {
        let image = BackgroundImage::decode(bytes)?;
        self.upload_image(image);
        Ok(())
    }

    /// Start a fresh scene from a `data:image/...;base64,` URL.
    pub fn upload_data_url(&mut self, url: &str) -> Result<(), EditorError> {
        let image = BackgroundImage::from_data_url(url)?;
        self.upload_image(image);
        Ok(())
    }

    pub fn upload_image(&mut self, image: BackgroundImage) {
        let scene = Scene::from_upload(image, &self.config, self.catalog.clone());
        self.start_scene(scene);
    }

    /// Return to background selection, discarding the scene.
    pub fn back(&mut self) {
        self.scene = None;
        self.drawing_mode = false;
        self.scrubbing = false;
    }

    /// Tell the editor where the canvas sits on screen.
    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
        if let Some(scene) = self.scene.as_mut() {
            scene.overlays.set_canvas_origin(origin);
        }
    }

    pub fn canvas_origin(&self) -> Point {
        self.canvas_origin
    }

    pub fn drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    /// Route a screen-space pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Routed {
        self.input.handle_pointer_event(&event);
        let double_click = self.input.is_double_click();
        let origin = self.canvas_origin.to_vec2();

        let Some(scene) = self.scene.as_mut() else {
            return Routed::Ignored;
        };

        if self.drawing_mode {
            match event {
                PointerEvent::Down { position } => {
                    let local = position - origin;
                    if let Some(kind) = press_controls(&mut scene.overlays, local, &mut self.scrubbing) {
                        return Routed::Controls(kind);
                    }
                    scene.strokes.stroke_begin(local);
                }
                PointerEvent::Move { position } => {
                    if self.scrubbing {
                        return scrub(&mut scene.overlays, position - origin);
                    }
                    scene.strokes.stroke_extend(position - origin);
                }
                PointerEvent::Up { .. } | PointerEvent::Leave => {
                    self.scrubbing = false;
                    scene.strokes.stroke_end();
                }
            }
            return Routed::Stroke;
        }

        let overlays = &mut scene.overlays;
        match event {
            PointerEvent::Down { position } => {
                let local = position - origin;
                let hit = overlays.overlay_at(local);

                // Pressing anywhere else blurs the open text input.
                if let Some(editing) = overlays.editing() {
                    if hit != Some(editing) {
                        overlays.commit_edit(editing);
                    }
                }

                if let Some(kind) = press_controls(overlays, local, &mut self.scrubbing) {
                    return Routed::Controls(kind);
                }

                match hit {
                    Some(id) => {
                        let is_text = overlays.get(id).is_some_and(|o| o.is_text());
                        if double_click && is_text {
                            overlays.toggle_edit(id);
                        } else {
                            overlays.begin_drag(id, position);
                        }
                        Routed::Overlay(id)
                    }
                    None => {
                        overlays.deselect_all();
                        Routed::Background
                    }
                }
            }
            PointerEvent::Move { position } => {
                if self.scrubbing {
                    return scrub(overlays, position - origin);
                }
                match overlays.active() {
                    Some(id) => {
                        overlays.continue_drag(position);
                        Routed::Overlay(id)
                    }
                    None => Routed::Ignored,
                }
            }
            PointerEvent::Up { .. } | PointerEvent::Leave => {
                self.scrubbing = false;
                let active = overlays.active();
                overlays.end_drag();
                active.map_or(Routed::Ignored, Routed::Overlay)
            }
        }
    }

    /// Switch drawing mode. Entering it ends any overlay drag; leaving it
    /// ends any stroke in progress.
    pub fn set_drawing_mode(&mut self, enabled: bool) {
        self.drawing_mode = enabled;
        self.scrubbing = false;
        if let Some(scene) = self.scene.as_mut() {
            if enabled {
                scene.overlays.end_drag();
            }
            scene.strokes.set_active(enabled);
        }
    }

    pub fn toggle_drawing(&mut self) -> bool {
        self.set_drawing_mode(!self.drawing_mode);
        self.drawing_mode
    }

    pub fn add_text(&mut self) -> Option<OverlayId> {
        Some(self.scene.as_mut()?.overlays.add_text())
    }

    pub fn add_character(&mut self, asset: &str) -> Option<OverlayId> {
        self.scene.as_mut()?.overlays.add_character(asset)
    }

    pub fn toggle_character_picker(&mut self) -> bool {
        self.scene
            .as_mut()
            .is_some_and(|scene| scene.overlays.toggle_character_picker())
    }

    pub fn set_text(&mut self, id: OverlayId, text: impl Into<String>) {
        if let Some(scene) = self.scene.as_mut() {
            scene.overlays.set_text(id, text);
        }
    }

    pub fn toggle_edit(&mut self, id: OverlayId) -> Option<bool> {
        self.scene.as_mut()?.overlays.toggle_edit(id)
    }

    pub fn commit_edit(&mut self, id: OverlayId) {
        if let Some(scene) = self.scene.as_mut() {
            scene.overlays.commit_edit(id);
        }
    }

    pub fn resize_selected(&mut self, size: f64) -> Option<f64> {
        self.scene.as_mut()?.overlays.resize_selected(size)
    }

    pub fn delete_selected(&mut self) -> Option<OverlayId> {
        self.scene.as_mut()?.overlays.delete_selected_character()
    }

    pub fn set_draw_color(&mut self, color: RgbaColor) {
        if let Some(scene) = self.scene.as_mut() {
            scene.strokes.set_color(color);
        }
    }

    pub fn undo_stroke(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.strokes.undo();
        }
    }

    pub fn clear_strokes(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.strokes.clear();
        }
    }
}

/// Apply a press on the scale/delete control, if `local` hits it.
fn press_controls(overlays: &mut OverlayModel, local: Point, scrubbing: &mut bool) -> Option<ControlKind> {
    let controls = overlays.selection_controls()?;
    let kind = controls.hit_test(local)?;
    match kind {
        ControlKind::Scale => {
            *scrubbing = true;
            overlays.resize_selected(controls.size_at(local.x));
        }
        ControlKind::Delete => {
            overlays.delete_selected_character();
        }
        ControlKind::Panel => {}
    }
    Some(kind)
}

fn scrub(overlays: &mut OverlayModel, local: Point) -> Routed {
    match overlays.selection_controls() {
        Some(controls) => {
            overlays.resize_selected(controls.size_at(local.x));
            Routed::Controls(ControlKind::Scale)
        }
        None => Routed::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetState;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn moved(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    fn editor() -> Editor {
        let mut editor = Editor::default();
        editor.choose_template("White").unwrap();
        editor
    }

    fn position(editor: &Editor, id: OverlayId) -> Point {
        editor.scene().unwrap().overlays.get(id).unwrap().position()
    }

    #[test]
    fn test_no_scene_ignores_everything() {
        let mut editor = Editor::default();
        assert_eq!(editor.handle_pointer(down(10.0, 10.0)), Routed::Ignored);
        assert!(editor.add_text().is_none());
        assert!(matches!(
            editor.choose_template("Nope"),
            Err(EditorError::UnknownTemplate(_))
        ));
    }

    #[test]
    fn test_pointer_drag_moves_overlay() {
        let mut editor = editor();
        editor.set_canvas_origin(Point::new(50.0, 20.0));
        let id = editor.add_character("Troll").unwrap();

        // Character sits at canvas (150, 150) = screen (200, 170).
        assert_eq!(editor.handle_pointer(down(210.0, 180.0)), Routed::Overlay(id));
        editor.handle_pointer(moved(260.0, 230.0));
        assert_eq!(position(&editor, id), Point::new(200.0, 200.0));
        assert_eq!(editor.handle_pointer(PointerEvent::Leave), Routed::Overlay(id));

        editor.handle_pointer(moved(400.0, 400.0));
        assert_eq!(position(&editor, id), Point::new(200.0, 200.0));
    }

    #[test]
    fn test_background_press_deselects() {
        let mut editor = editor();
        let id = editor.add_character("Troll").unwrap();
        editor.handle_pointer(down(160.0, 160.0));
        editor.handle_pointer(up(160.0, 160.0));
        assert_eq!(editor.scene().unwrap().overlays.selected(), Some(id));

        assert_eq!(editor.handle_pointer(down(450.0, 450.0)), Routed::Background);
        let scene = editor.scene().unwrap();
        assert_eq!(scene.overlays.selected(), None);
        assert_eq!(scene.overlays.widget_state(id), WidgetState::Normal);
        assert_eq!(position(&editor, id), Point::new(150.0, 150.0));
    }

    #[test]
    fn test_double_click_text_enters_edit() {
        let mut editor = editor();
        let id = editor.add_text().unwrap();
        editor.handle_pointer(down(205.0, 205.0));
        editor.handle_pointer(up(205.0, 205.0));
        editor.handle_pointer(down(205.0, 205.0));
        editor.handle_pointer(up(205.0, 205.0));
        let scene = editor.scene().unwrap();
        assert_eq!(scene.overlays.editing(), Some(id));
        assert_eq!(scene.overlays.active(), None);

        // Pressing elsewhere commits the edit.
        editor.handle_pointer(down(480.0, 20.0));
        assert_eq!(editor.scene().unwrap().overlays.editing(), None);
    }

    #[test]
    fn test_scale_control_scrubbing() {
        let mut editor = editor();
        let id = editor.add_character("Troll").unwrap();
        editor.handle_pointer(down(160.0, 160.0));
        editor.handle_pointer(up(160.0, 160.0));

        let controls = editor.scene().unwrap().overlays.selection_controls().unwrap();
        let slider = controls.slider_rect();
        let routed = editor.handle_pointer(down(slider.x0, slider.center().y));
        assert_eq!(routed, Routed::Controls(ControlKind::Scale));
        editor.handle_pointer(moved(slider.x1 + 40.0, slider.center().y));
        editor.handle_pointer(up(slider.x1 + 40.0, slider.center().y));

        let c = editor.scene().unwrap().overlays.get(id).unwrap().as_character().unwrap().size();
        assert!((c - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_delete_control() {
        let mut editor = editor();
        editor.add_character("Troll").unwrap();
        editor.handle_pointer(down(160.0, 160.0));
        editor.handle_pointer(up(160.0, 160.0));

        let delete = editor.scene().unwrap().overlays.selection_controls().unwrap().delete_rect();
        let routed = editor.handle_pointer(down(delete.center().x, delete.center().y));
        assert_eq!(routed, Routed::Controls(ControlKind::Delete));
        assert!(editor.scene().unwrap().overlays.is_empty());
    }

    #[test]
    fn test_drawing_mode_captures_pointer() {
        let mut editor = editor();
        editor.set_canvas_origin(Point::new(100.0, 100.0));
        let id = editor.add_character("Troll").unwrap();
        editor.set_drawing_mode(true);

        assert_eq!(editor.handle_pointer(down(260.0, 260.0)), Routed::Stroke);
        editor.handle_pointer(moved(300.0, 260.0));
        editor.handle_pointer(up(300.0, 260.0));

        let scene = editor.scene().unwrap();
        assert_eq!(position(&editor, id), Point::new(150.0, 150.0));
        assert_eq!(scene.strokes.pixels().get_pixel(180, 160)[3], 255);
        assert_eq!(scene.strokes.undo_depth(), 1);
    }

    #[test]
    fn test_controls_stay_usable_while_drawing() {
        let mut editor = editor();
        let id = editor.add_character("Troll").unwrap();
        editor.handle_pointer(down(160.0, 160.0));
        editor.handle_pointer(up(160.0, 160.0));
        editor.set_drawing_mode(true);

        let controls = editor.scene().unwrap().overlays.selection_controls().unwrap();
        let slider = controls.slider_rect();
        let routed = editor.handle_pointer(down(slider.x0, slider.center().y));
        assert_eq!(routed, Routed::Controls(ControlKind::Scale));
        editor.handle_pointer(moved(slider.x1 + 40.0, slider.center().y));
        editor.handle_pointer(up(slider.x1 + 40.0, slider.center().y));

        let scene = editor.scene().unwrap();
        let size = scene.overlays.get(id).unwrap().as_character().unwrap().size();
        assert!((size - 300.0).abs() < f64::EPSILON);
        assert_eq!(scene.strokes.undo_depth(), 0);
        assert!(scene.strokes.pixels().pixels().all(|p| p[3] == 0));

        let delete = scene.overlays.selection_controls().unwrap().delete_rect();
        let routed = editor.handle_pointer(down(delete.center().x, delete.center().y));
        assert_eq!(routed, Routed::Controls(ControlKind::Delete));
        assert!(editor.scene().unwrap().overlays.is_empty());

        // With nothing selected, presses draw again.
        assert_eq!(editor.handle_pointer(down(20.0, 20.0)), Routed::Stroke);
    }

    #[test]
    fn test_leaving_drawing_mode_ends_stroke() {
        let mut editor = editor();
        editor.set_drawing_mode(true);
        editor.handle_pointer(down(10.0, 10.0));
        editor.handle_pointer(moved(40.0, 10.0));
        let before = editor.scene().unwrap().strokes.pixels().clone();

        editor.toggle_drawing();
        editor.handle_pointer(moved(40.0, 60.0));
        assert_eq!(editor.scene().unwrap().strokes.pixels(), &before);
    }

    #[test]
    fn test_back_discards_scene() {
        let mut editor = editor();
        editor.add_text();
        editor.set_drawing_mode(true);
        editor.back();
        assert!(editor.scene().is_none());
        assert!(!editor.drawing_mode());

        editor.choose_template("Black").unwrap();
        assert!(editor.scene().unwrap().overlays.is_empty());
    }

    #[test]
    fn test_upload_rejects_garbage() {
        let mut editor = Editor::default();
        assert!(matches!(
            editor.upload_bytes(b"not an image"),
            Err(EditorError::Background(_))
        ));
        assert!(editor.scene().is_none());
    }
}
