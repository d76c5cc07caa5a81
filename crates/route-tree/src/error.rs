//! Error types for the route tree engine

use thiserror::Error;

use crate::ids::NodeId;

/// Result type alias using RouteTreeError
pub type Result<T> = std::result::Result<T, RouteTreeError>;

/// Errors that can occur while editing a route document
///
/// Every variant is a local, recoverable condition. An operation that
/// returns one of these has not touched the document it was given.
#[derive(Debug, Error)]
pub enum RouteTreeError {
    /// Referenced node id is absent from the document
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    /// Parent id is absent or its kind cannot hold children
    #[error("Invalid parent '{parent}': {reason}")]
    InvalidParent { parent: NodeId, reason: String },

    /// The parent's kind has no slot with this name
    #[error("Kind '{kind}' has no slot named '{slot}'")]
    UnknownSlot { kind: String, slot: String },

    /// Single-valued slot is already occupied
    #[error("Slot '{slot}' on node '{parent}' already holds a child")]
    SlotCapacityExceeded { parent: NodeId, slot: String },

    /// Target lies inside the subtree being moved
    #[error("Cannot move '{node}' into its own descendant '{target}'")]
    CyclicMove { node: NodeId, target: NodeId },

    /// Move would detach an entry node from its flow
    #[error("Illegal move of '{node}': {reason}")]
    IllegalMove { node: NodeId, reason: String },

    /// Paste target could not be narrowed to one insertion point
    #[error("Paste needs exactly one selected node, got {selected}")]
    AmbiguousPasteTarget { selected: usize },

    /// An inserted subtree reuses an id already present in the document
    #[error("Duplicate node id: {0}")]
    DuplicateId(NodeId),

    /// Kind is not known to the shape catalog
    #[error("Unknown node kind: {0}")]
    UnknownKind(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Compression error
    #[error("Compression error: {0}")]
    Compression(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RouteTreeError {
    /// Create an invalid parent error with a reason
    pub fn invalid_parent(parent: &NodeId, reason: impl Into<String>) -> Self {
        Self::InvalidParent {
            parent: parent.clone(),
            reason: reason.into(),
        }
    }

    /// Create an illegal move error with a reason
    pub fn illegal_move(node: &NodeId, reason: impl Into<String>) -> Self {
        Self::IllegalMove {
            node: node.clone(),
            reason: reason.into(),
        }
    }
}
