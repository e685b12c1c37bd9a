//! Snapshot undo history. There is no redo.

use crate::canvas::CanvasSnapshot;

/// Default number of undo steps kept.
pub const DEFAULT_UNDO_LIMIT: usize = 100;

/// LIFO stack of shape-list snapshots.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    stack: Vec<CanvasSnapshot>,
    limit: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_LIMIT)
    }
}

impl UndoHistory {
    /// `limit` of 0 keeps every snapshot.
    pub fn new(limit: usize) -> Self {
        Self {
            stack: Vec::new(),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.trim();
    }

    /// Saves a snapshot taken before a mutation, dropping the oldest once the
    /// limit is exceeded.
    pub fn push(&mut self, snapshot: CanvasSnapshot) {
        self.stack.push(snapshot);
        self.trim();
    }

    pub fn pop(&mut self) -> Option<CanvasSnapshot> {
        self.stack.pop()
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.stack.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }

    fn trim(&mut self) {
        if self.limit > 0 && self.stack.len() > self.limit {
            let excess = self.stack.len() - self.limit;
            self.stack.drain(..excess);
        }
    }
}
