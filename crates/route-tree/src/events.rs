//! Structural change notifications
//!
//! After every successful edit the engine reports which nodes were added,
//! removed, moved or faded. Renderers use these to recompute connectors
//! and layout; no geometry travels through here.

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// Trait for receiving structure events
///
/// This abstracts over the transport mechanism (channel, pub/sub bus, etc.)
/// so the engine can be embedded by different hosts.
pub trait EventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be sent (e.g., channel closed)
    fn send(&self, event: StructureEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone)]
pub struct EventError {
    pub message: String,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event error: {}", self.message)
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn channel_closed() -> Self {
        Self {
            message: "Channel closed".to_string(),
        }
    }
}

/// What happened to a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    Added,
    Removed,
    Moved,
    Shown,
    Hidden,
}

/// A single structural change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureEvent {
    /// The affected node (subtree root)
    pub node_id: NodeId,
    /// Kind of change
    pub change: ChangeKind,
    /// Whether the node is visible after the change
    pub visible: bool,
}

impl StructureEvent {
    pub fn added(node_id: &NodeId) -> Self {
        Self {
            node_id: node_id.clone(),
            change: ChangeKind::Added,
            visible: true,
        }
    }

    pub fn removed(node_id: &NodeId) -> Self {
        Self {
            node_id: node_id.clone(),
            change: ChangeKind::Removed,
            visible: false,
        }
    }

    pub fn moved(node_id: &NodeId, visible: bool) -> Self {
        Self {
            node_id: node_id.clone(),
            change: ChangeKind::Moved,
            visible,
        }
    }

    pub fn visibility(node_id: &NodeId, visible: bool) -> Self {
        Self {
            node_id: node_id.clone(),
            change: if visible {
                ChangeKind::Shown
            } else {
                ChangeKind::Hidden
            },
            visible,
        }
    }
}

/// A no-op event sink that discards all events
///
/// Useful for testing or when events aren't needed.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: StructureEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: std::sync::Mutex<Vec<StructureEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<StructureEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: StructureEvent) -> Result<(), EventError> {
        let mut events = self.events.lock().map_err(|_| EventError {
            message: "Event buffer poisoned".to_string(),
        })?;
        events.push(event);
        Ok(())
    }
}
