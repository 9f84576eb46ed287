//! Widget manager tracking the active and selected overlay.

use super::state::WidgetState;
use crate::overlays::OverlayId;

/// Tracks at most one active (dragged) and one selected overlay.
///
/// Editing is stored on the text overlays themselves; `state` folds it in.
#[derive(Debug, Clone, Default)]
pub struct WidgetManager {
    /// Overlay currently following the pointer.
    active: Option<OverlayId>,
    /// Character overlay showing the scale/delete control.
    selected: Option<OverlayId>,
}

impl WidgetManager {
    /// Create a new widget manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize the state of one overlay.
    pub fn state(&self, id: OverlayId, editing: bool) -> WidgetState {
        if editing {
            WidgetState::Editing
        } else if self.active == Some(id) {
            WidgetState::Dragging
        } else if self.selected == Some(id) {
            WidgetState::Selected
        } else {
            WidgetState::Normal
        }
    }

    /// Mark an overlay as being dragged, replacing any previous one.
    pub fn activate(&mut self, id: OverlayId) {
        self.active = Some(id);
    }

    /// Clear the active marker.
    pub fn deactivate(&mut self) {
        self.active = None;
    }

    pub fn active(&self) -> Option<OverlayId> {
        self.active
    }

    pub fn is_active(&self, id: OverlayId) -> bool {
        self.active == Some(id)
    }

    /// Select an overlay, replacing any previous selection.
    pub fn select(&mut self, id: OverlayId) {
        self.selected = Some(id);
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<OverlayId> {
        self.selected
    }

    pub fn is_selected(&self, id: OverlayId) -> bool {
        self.selected == Some(id)
    }

    /// Clear both markers.
    pub fn clear(&mut self) {
        self.active = None;
        self.selected = None;
    }

    /// Forget a removed overlay.
    pub fn remove(&mut self, id: OverlayId) {
        if self.active == Some(id) {
            self.active = None;
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_precedence() {
        let mut widgets = WidgetManager::new();
        let id = OverlayId::new(1);

        assert_eq!(widgets.state(id, false), WidgetState::Normal);
        widgets.select(id);
        assert_eq!(widgets.state(id, false), WidgetState::Selected);
        widgets.activate(id);
        assert_eq!(widgets.state(id, false), WidgetState::Dragging);
        assert_eq!(widgets.state(id, true), WidgetState::Editing);
    }

    #[test]
    fn test_single_active_and_selected() {
        let mut widgets = WidgetManager::new();
        let a = OverlayId::new(1);
        let b = OverlayId::new(2);

        widgets.activate(a);
        widgets.activate(b);
        assert!(!widgets.is_active(a));
        assert!(widgets.is_active(b));

        widgets.select(a);
        widgets.select(b);
        assert_eq!(widgets.selected(), Some(b));
    }

    #[test]
    fn test_remove_clears_markers() {
        let mut widgets = WidgetManager::new();
        let id = OverlayId::new(7);
        widgets.activate(id);
        widgets.select(id);
        widgets.remove(id);
        assert_eq!(widgets.active(), None);
        assert_eq!(widgets.selected(), None);
    }
}
