//! Input state management for mouse/touch pointer events.

use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Use web_time for WASM compatibility
#[cfg(target_arch = "wasm32")]
use web_time::Instant;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

/// Pointer event type for unified mouse/touch handling, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas area. Ends a gesture like `Up`.
    Leave,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }

    /// Map a touch phase onto the equivalent pointer event.
    pub fn from_touch(phase: TouchPhase, position: Point) -> Self {
        match phase {
            TouchPhase::Started => PointerEvent::Down { position },
            TouchPhase::Moved => PointerEvent::Move { position },
            TouchPhase::Ended => PointerEvent::Up { position },
            TouchPhase::Cancelled => PointerEvent::Leave,
        }
    }

    /// Whether this event finishes a drag or stroke.
    pub fn ends_gesture(&self) -> bool {
        matches!(self, PointerEvent::Up { .. } | PointerEvent::Leave)
    }
}

/// Touch lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Double-click detection constants.
const DEFAULT_DOUBLE_CLICK_MS: u64 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks the pointer across events.
#[derive(Debug, Clone)]
pub struct InputState {
    /// Last known pointer position in screen coordinates.
    pub pointer_position: Point,
    /// Maximum gap between the two presses of a double-click.
    double_click_window: Duration,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether the latest event was the second press of a double-click.
    double_click_detected: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::with_double_click_window(Duration::from_millis(DEFAULT_DOUBLE_CLICK_MS))
    }
}

impl InputState {
    /// Create a new input state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_double_click_window(window: Duration) -> Self {
        Self {
            pointer_position: Point::ZERO,
            double_click_window: window,
            last_click_time: None,
            last_click_position: None,
            double_click_detected: false,
        }
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: &PointerEvent) {
        self.double_click_detected = false;
        if let Some(position) = event.position() {
            self.pointer_position = position;
        }
        if let PointerEvent::Down { position } = *event {
            self.register_click(position, Instant::now());
        }
    }

    fn register_click(&mut self, position: Point, now: Instant) {
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position) {
            let elapsed = now.duration_since(last_time);
            let distance = (position - last_pos).hypot();

            if elapsed < self.double_click_window && distance < DOUBLE_CLICK_DISTANCE {
                self.double_click_detected = true;
                // Reset so a triple-click is not a second double-click.
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// Check if the latest event completed a double-click.
    pub fn is_double_click(&self) -> bool {
        self.double_click_detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, y),
        }
    }

    fn up(x: f64, y: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, y),
        }
    }

    #[test]
    fn test_pointer_position_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(100.0, 100.0));
        input.handle_pointer_event(&PointerEvent::Move {
            position: Point::new(150.0, 120.0),
        });
        assert_eq!(input.pointer_position, Point::new(150.0, 120.0));

        // Leaving keeps the last known position.
        input.handle_pointer_event(&PointerEvent::Leave);
        assert_eq!(input.pointer_position, Point::new(150.0, 120.0));
    }

    #[test]
    fn test_double_click_detection() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(100.0, 100.0));
        assert!(!input.is_double_click());
        input.handle_pointer_event(&up(100.0, 100.0));

        input.handle_pointer_event(&down(101.0, 100.0));
        assert!(input.is_double_click());

        input.handle_pointer_event(&up(101.0, 100.0));
        assert!(!input.is_double_click());

        // Third click starts a new pair.
        input.handle_pointer_event(&down(101.0, 100.0));
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_double_click_too_far() {
        let mut input = InputState::new();
        input.handle_pointer_event(&down(100.0, 100.0));
        input.handle_pointer_event(&up(100.0, 100.0));
        input.handle_pointer_event(&down(120.0, 100.0));
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_double_click_too_slow() {
        let mut input = InputState::with_double_click_window(Duration::ZERO);
        input.handle_pointer_event(&down(100.0, 100.0));
        input.handle_pointer_event(&down(100.0, 100.0));
        assert!(!input.is_double_click());
    }

    #[test]
    fn test_touch_mapping() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(PointerEvent::from_touch(TouchPhase::Started, p), down(3.0, 4.0));
        assert_eq!(PointerEvent::from_touch(TouchPhase::Cancelled, p), PointerEvent::Leave);
        assert!(PointerEvent::from_touch(TouchPhase::Ended, p).ends_gesture());
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{ "kind": "down", "position": { "x": 1.0, "y": 2.0 } }"#).unwrap();
        assert_eq!(event, down(1.0, 2.0));
        let leave: PointerEvent = serde_json::from_str(r#"{ "kind": "leave" }"#).unwrap();
        assert_eq!(leave, PointerEvent::Leave);
    }
}
