//! Fluent builder for route documents
//!
//! Provides a compact way to lay out fixed documents, mostly for tests and
//! fixtures. Nodes built here keep the ids they are given; interactive
//! editing goes through [`crate::edit::TreeEditor`], which owns id generation.

use crate::ids::NodeId;
use crate::types::{Document, Node, NodePath};

/// Slot name used by [`DocumentBuilder::entry`]
pub const ENTRY_SLOT: &str = "from";
/// Slot name used by [`DocumentBuilder::step`] and [`DocumentBuilder::step_into`]
pub const STEPS_SLOT: &str = "steps";

/// Fluent builder for constructing route documents
///
/// # Example
///
/// ```ignore
/// let doc = DocumentBuilder::new()
///     .flow("route-1", "route")
///     .entry("from-1", "from")
///     .with_data(serde_json::json!({"uri": "timer:tick"}))
///     .step_into("choice-1", "choice")
///     .child("when", "when-1", "when")
///     .step("log-1", "log")
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    document: Document,
    cursor: Option<NodePath>,
    last: Option<NodePath>,
}

impl DocumentBuilder {
    /// Create a new builder for an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new top-level flow; the cursor moves to it
    pub fn flow(mut self, id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        self.document.flows.push(Node::new(id.into(), kind));
        let path = NodePath {
            flow: self.document.flows.len() - 1,
            steps: Vec::new(),
        };
        self.cursor = Some(path.clone());
        self.last = Some(path);
        self
    }

    /// Add a child under the cursor and move the cursor into it
    pub fn child(mut self, slot: &str, id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        if let Some(path) = self.insert(slot, id.into(), kind.into()) {
            self.cursor = Some(path);
        }
        self
    }

    /// Add a child under the cursor, leaving the cursor in place
    pub fn leaf(mut self, slot: &str, id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        self.insert(slot, id.into(), kind.into());
        self
    }

    /// Add the flow's entry node and move the cursor into it
    pub fn entry(self, id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        self.child(ENTRY_SLOT, id, kind)
    }

    /// Append a step under the cursor
    pub fn step(self, id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        self.leaf(STEPS_SLOT, id, kind)
    }

    /// Append a step under the cursor and move the cursor into it
    pub fn step_into(self, id: impl Into<NodeId>, kind: impl Into<String>) -> Self {
        self.child(STEPS_SLOT, id, kind)
    }

    /// Move the cursor to its parent
    pub fn up(mut self) -> Self {
        self.cursor = self.cursor.and_then(|path| path.parent());
        self
    }

    /// Set data on the most recently added node
    ///
    /// Must be called immediately after the node is added.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        if let Some(path) = &self.last {
            if let Some(node) = self.document.node_at_mut(path) {
                node.data = data;
            }
        }
        self
    }

    /// Set the document metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.document.metadata = metadata;
        self
    }

    /// Build the document
    pub fn build(self) -> Document {
        self.document
    }

    fn insert(&mut self, slot: &str, id: NodeId, kind: String) -> Option<NodePath> {
        let cursor = self.cursor.clone()?;
        let parent = self.document.node_at_mut(&cursor)?;
        let children = parent.slot_mut(slot);
        children.push(Node::new(id, kind));
        let mut path = cursor;
        path.steps.push((slot.to_string(), children.len() - 1));
        self.last = Some(path.clone());
        Some(path)
    }
}
