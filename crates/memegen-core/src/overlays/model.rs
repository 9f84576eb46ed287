//! The overlay position model: add, drag, resize, select, delete and edit.

use super::{CharacterOverlay, Overlay, OverlayId, TextOverlay};
use crate::assets::AssetCatalog;
use crate::config::EditorConfig;
use crate::widget::{SelectionControls, WidgetManager, WidgetState};
use kurbo::{Point, Vec2};

/// An in-progress drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// The overlay following the pointer.
    pub overlay_id: OverlayId,
    /// Pointer position relative to the overlay's on-screen top-left corner,
    /// kept constant for the whole gesture.
    pub grip_offset: Vec2,
}

/// Owns the overlay sequence and every transition on it.
///
/// Pointer coordinates passed to the drag operations are in screen space;
/// `canvas_origin` converts them to canvas-local positions. Lookups that find
/// no matching overlay are silent no-ops.
#[derive(Debug, Clone)]
pub struct OverlayModel {
    /// Overlays in paint order (later = on top).
    overlays: Vec<Overlay>,
    next_id: u64,
    widgets: WidgetManager,
    drag: Option<DragState>,
    /// Screen-space position of the canvas' top-left corner.
    canvas_origin: Point,
    /// Whether the "choose character" picker is open.
    picker_open: bool,
    catalog: AssetCatalog,
    config: EditorConfig,
}

impl Default for OverlayModel {
    fn default() -> Self {
        Self::new(EditorConfig::default(), AssetCatalog::default())
    }
}

impl OverlayModel {
    pub fn new(config: EditorConfig, catalog: AssetCatalog) -> Self {
        Self {
            overlays: Vec::new(),
            next_id: 1,
            widgets: WidgetManager::new(),
            drag: None,
            canvas_origin: Point::ZERO,
            picker_open: false,
            catalog,
            config,
        }
    }

    fn allocate_id(&mut self) -> OverlayId {
        let id = OverlayId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a text overlay with the configured defaults.
    pub fn add_text(&mut self) -> OverlayId {
        self.deselect_all();
        let id = self.allocate_id();
        self.overlays.push(Overlay::Text(TextOverlay::new(
            id,
            self.config.text_spawn,
            self.config.text_content.clone(),
        )));
        log::debug!("Added text overlay {id}");
        id
    }

    /// Append a character overlay for a catalog asset and close the picker.
    ///
    /// Returns `None` without touching any state if the key is not in the
    /// catalog.
    pub fn add_character(&mut self, asset: &str) -> Option<OverlayId> {
        if !self.catalog.contains(asset) {
            log::debug!("Ignoring unknown character asset {asset:?}");
            return None;
        }
        self.deselect_all();
        self.picker_open = false;
        let id = self.allocate_id();
        let size = self.config.character_bounds.clamp(self.config.character_size);
        self.overlays.push(Overlay::Character(CharacterOverlay::new(
            id,
            asset.to_string(),
            self.config.character_spawn,
            size,
        )));
        log::debug!("Added character overlay {id} ({asset})");
        Some(id)
    }

    /// Start dragging an overlay from a screen-space pointer position.
    pub fn begin_drag(&mut self, id: OverlayId, pointer: Point) {
        let origin = self.canvas_origin;
        let Some(overlay) = self.get(id) else {
            log::debug!("begin_drag: no overlay {id}");
            return;
        };
        if overlay.is_editing() {
            return;
        }
        let screen_position = origin + overlay.position().to_vec2();
        let is_character = overlay.is_character();

        self.drag = Some(DragState {
            overlay_id: id,
            grip_offset: pointer - screen_position,
        });
        self.widgets.activate(id);
        if is_character {
            self.widgets.select(id);
        }
    }

    /// Move the active overlay so the grip point stays under the pointer.
    pub fn continue_drag(&mut self, pointer: Point) {
        let Some(drag) = self.drag else {
            return;
        };
        let position = pointer - self.canvas_origin.to_vec2() - drag.grip_offset;
        if let Some(overlay) = self.get_mut(drag.overlay_id) {
            overlay.set_position(position);
        }
    }

    /// Clear the active marker. Idempotent.
    pub fn end_drag(&mut self) {
        self.drag = None;
        self.widgets.deactivate();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    /// Flip edit mode on a text overlay. Returns the new editing flag, or
    /// `None` if `id` is not a text overlay.
    pub fn toggle_edit(&mut self, id: OverlayId) -> Option<bool> {
        let entering = !self.get(id)?.as_text()?.is_editing();

        if entering {
            if self.config.single_text_editing {
                for other in self.overlays.iter_mut().filter_map(Overlay::as_text_mut) {
                    if other.id != id {
                        other.editing = false;
                    }
                }
            }
            self.widgets.deselect();
            if self.widgets.is_active(id) {
                self.end_drag();
            }
        }

        let text = self.get_mut(id)?.as_text_mut()?;
        text.editing = entering;
        Some(entering)
    }

    /// Replace a text overlay's content.
    pub fn set_text(&mut self, id: OverlayId, text: impl Into<String>) {
        match self.get_mut(id).and_then(Overlay::as_text_mut) {
            Some(overlay) => overlay.content = text.into(),
            None => log::debug!("set_text: no text overlay {id}"),
        }
    }

    /// Leave edit mode (the input lost focus).
    pub fn commit_edit(&mut self, id: OverlayId) {
        if let Some(text) = self.get_mut(id).and_then(Overlay::as_text_mut) {
            text.editing = false;
        }
    }

    /// The text overlay currently being edited, if any.
    pub fn editing(&self) -> Option<OverlayId> {
        self.overlays
            .iter()
            .find(|overlay| overlay.is_editing())
            .map(Overlay::id)
    }

    /// Resize a character overlay. Returns the clamped size that was applied.
    pub fn resize_character(&mut self, id: OverlayId, size: f64) -> Option<f64> {
        let bounds = self.config.character_bounds;
        let character = self.get_mut(id)?.as_character_mut()?;
        Some(character.resize(size, bounds))
    }

    /// Resize whatever character is selected.
    pub fn resize_selected(&mut self, size: f64) -> Option<f64> {
        let id = self.widgets.selected()?;
        self.resize_character(id, size)
    }

    /// Remove the selected character overlay. The selection is cleared either
    /// way; returns the removed id.
    pub fn delete_selected_character(&mut self) -> Option<OverlayId> {
        let selected = self.widgets.selected();
        self.widgets.deselect();

        let id = selected?;
        let index = self
            .overlays
            .iter()
            .position(|overlay| overlay.id() == id && overlay.is_character())?;
        self.overlays.remove(index);
        self.widgets.remove(id);
        if self.drag.is_some_and(|drag| drag.overlay_id == id) {
            self.drag = None;
        }
        log::debug!("Deleted character overlay {id}");
        Some(id)
    }

    /// Clear both the active and selected markers.
    pub fn deselect_all(&mut self) {
        self.drag = None;
        self.widgets.clear();
    }

    /// Topmost overlay containing a canvas-local point.
    pub fn overlay_at(&self, point: Point) -> Option<OverlayId> {
        self.overlays
            .iter()
            .rev()
            .find(|overlay| overlay.hit_test(point))
            .map(Overlay::id)
    }

    /// Descriptor of the scale/delete control, when a character is selected.
    pub fn selection_controls(&self) -> Option<SelectionControls> {
        let id = self.widgets.selected()?;
        let character = self.get(id)?.as_character()?;
        Some(SelectionControls::new(
            id,
            character.size(),
            self.config.character_bounds,
        ))
    }

    pub fn widget_state(&self, id: OverlayId) -> WidgetState {
        let editing = self.get(id).is_some_and(Overlay::is_editing);
        self.widgets.state(id, editing)
    }

    pub fn widgets(&self) -> &WidgetManager {
        &self.widgets
    }

    pub fn active(&self) -> Option<OverlayId> {
        self.widgets.active()
    }

    pub fn selected(&self) -> Option<OverlayId> {
        self.widgets.selected()
    }

    pub fn toggle_character_picker(&mut self) -> bool {
        self.picker_open = !self.picker_open;
        self.picker_open
    }

    pub fn picker_open(&self) -> bool {
        self.picker_open
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    pub fn canvas_origin(&self) -> Point {
        self.canvas_origin
    }

    /// Convert a screen-space point to canvas-local coordinates.
    pub fn to_canvas(&self, screen: Point) -> Point {
        screen - self.canvas_origin.to_vec2()
    }

    pub fn catalog(&self) -> &AssetCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn get(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|overlay| overlay.id() == id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut Overlay> {
        self.overlays.iter_mut().find(|overlay| overlay.id() == id)
    }

    /// Overlays in paint order.
    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.overlays.iter()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }
}
