//! Stack of pre-stroke snapshots.

use image::RgbaImage;

/// LIFO stack of whole-buffer captures, one per stroke.
///
/// Unbounded unless a limit is given, in which case the oldest capture is
/// dropped once the limit is exceeded.
#[derive(Debug, Clone, Default)]
pub struct StrokeHistory {
    snapshots: Vec<RgbaImage>,
    limit: Option<usize>,
}

impl StrokeHistory {
    /// Create a history. `Some(limit)` keeps at most `limit` snapshots (at
    /// least one).
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            snapshots: Vec::new(),
            limit: limit.map(|limit| limit.max(1)),
        }
    }

    /// Record a snapshot.
    pub fn push(&mut self, snapshot: RgbaImage) {
        self.snapshots.push(snapshot);
        if let Some(limit) = self.limit {
            if self.snapshots.len() > limit {
                self.snapshots.remove(0);
            }
        }
    }

    pub fn pop(&mut self) -> Option<RgbaImage> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}
