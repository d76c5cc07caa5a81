//! Undo/redo history using compressed document snapshots
//!
//! Every edit already produces a whole new [`Document`], so history is just
//! a bounded list of those values, stored as zstd-compressed JSON.

use std::collections::VecDeque;

use crate::error::{Result, RouteTreeError};
use crate::types::Document;

/// Default zstd level for snapshots
pub const DEFAULT_SNAPSHOT_LEVEL: i32 = 3;

/// Undo/redo stack using compressed snapshots
pub struct UndoStack {
    /// Compressed document states (zstd)
    snapshots: VecDeque<Vec<u8>>,
    /// Current position in the stack
    current: usize,
    /// Maximum number of snapshots to keep
    max_snapshots: usize,
    /// zstd compression level
    level: i32,
}

impl UndoStack {
    /// Create a new undo stack with the specified maximum size
    pub fn new(max_snapshots: usize) -> Self {
        Self::with_level(max_snapshots, DEFAULT_SNAPSHOT_LEVEL)
    }

    /// Create a new undo stack with an explicit compression level
    pub fn with_level(max_snapshots: usize, level: i32) -> Self {
        Self {
            snapshots: VecDeque::new(),
            current: 0,
            max_snapshots: max_snapshots.max(1), // At least 1 snapshot
            level,
        }
    }

    /// Push a new snapshot onto the stack
    ///
    /// This truncates any redo history (snapshots after current position).
    pub fn push(&mut self, document: &Document) -> Result<()> {
        let json = serde_json::to_vec(document)?;
        let compressed = zstd::encode_all(&json[..], self.level)
            .map_err(|e| RouteTreeError::Compression(e.to_string()))?;

        if !self.snapshots.is_empty() {
            self.snapshots.truncate(self.current + 1);
        }

        self.snapshots.push_back(compressed);
        self.current = self.snapshots.len() - 1;

        while self.snapshots.len() > self.max_snapshots {
            self.snapshots.pop_front();
            self.current = self.current.saturating_sub(1);
        }

        Ok(())
    }

    /// Undo: move back one snapshot
    ///
    /// Returns the previous document, or None if at the beginning. The
    /// position only moves once the snapshot has been restored.
    pub fn undo(&mut self) -> Option<Result<Document>> {
        if self.current > 0 {
            let document = self.decompress(self.current - 1);
            if document.is_ok() {
                self.current -= 1;
            }
            Some(document)
        } else {
            None
        }
    }

    /// Redo: move forward one snapshot
    ///
    /// Returns the next document, or None if at the end. The position only
    /// moves once the snapshot has been restored.
    pub fn redo(&mut self) -> Option<Result<Document>> {
        if self.current + 1 < self.snapshots.len() {
            let document = self.decompress(self.current + 1);
            if document.is_ok() {
                self.current += 1;
            }
            Some(document)
        } else {
            None
        }
    }

    /// Get the current document without moving
    pub fn current(&self) -> Option<Result<Document>> {
        if self.snapshots.is_empty() {
            None
        } else {
            Some(self.decompress(self.current))
        }
    }

    pub fn can_undo(&self) -> bool {
        self.current > 0
    }

    pub fn can_redo(&self) -> bool {
        self.current + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.current = 0;
    }

    /// Get the total compressed size of all snapshots
    pub fn compressed_size(&self) -> usize {
        self.snapshots.iter().map(|s| s.len()).sum()
    }

    fn decompress(&self, index: usize) -> Result<Document> {
        let compressed = &self.snapshots[index];
        let json = zstd::decode_all(&compressed[..])
            .map_err(|e| RouteTreeError::Compression(e.to_string()))?;
        let document: Document = serde_json::from_slice(&json)?;
        Ok(document)
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new(100)
    }
}
