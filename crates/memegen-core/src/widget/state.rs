//! Widget state definitions.

/// The UI state of an overlay, as seen by a renderer drawing editor chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// No interaction.
    #[default]
    Normal,
    /// Character showing its scale/delete control.
    Selected,
    /// Following the pointer. Takes precedence over `Selected`.
    Dragging,
    /// Text overlay with an open input.
    Editing,
}

