//! Route Tree - Structural editing engine for integration-route documents
//!
//! A route document is an ordered list of flows, each a tree of nodes whose
//! children live in named slots. This crate edits those trees safely:
//!
//! - Value-semantics edits: every operation returns a new `Document`
//! - Nodes addressed by stable id, never by position
//! - Two-phase drag moves (shift beside or nest inside)
//! - Multi-selection with entry-node exclusion
//! - Copy/paste of whole subtrees with fresh ids on every paste
//! - Compressed snapshot-based undo/redo
//!
//! # Architecture
//!
//! - `TreeEditor`: Stateless engine over a `ShapeCatalog` and an `IdGenerator`
//! - `ShapeRegistry`: Kind shapes, with built-ins collected via `inventory`
//! - `EventSink`: Structural change notifications (not tied to any renderer)
//! - `EditorSession`: Stateful facade wiring selection, clipboard and history
//!
//! # Example
//!
//! ```ignore
//! use route_tree::{Position, ShapeRegistry, TreeEditor, UuidIds};
//!
//! let catalog = ShapeRegistry::with_builtins();
//! let ids = UuidIds;
//! let editor = TreeEditor::new(&catalog, &ids);
//!
//! let log = editor.new_node("log", serde_json::json!({"message": "hi"}))?;
//! let edited = editor.add_node(&doc, log, "from-1", "steps", Position::Append)?;
//! ```

pub mod builder;
pub mod clipboard;
pub mod config;
pub mod drag;
pub mod edit;
pub mod error;
pub mod events;
pub mod ids;
pub mod registry;
pub mod selection;
pub mod session;
pub mod shape;
pub mod types;
pub mod undo;
pub mod validation;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export key types
pub use builder::DocumentBuilder;
pub use clipboard::Clipboard;
pub use config::{EditorConfig, NestSlotRule};
pub use drag::{DragOutcome, MoveChoice, PendingMove};
pub use edit::{entry_ids, find_by_id, find_parent_and_slot, Edited, TreeEditor};
pub use error::{Result, RouteTreeError};
pub use events::{ChangeKind, EventError, EventSink, NullEventSink, StructureEvent, VecEventSink};
pub use ids::{IdGenerator, NodeId, SequentialIds, UuidIds};
pub use registry::ShapeRegistry;
pub use selection::{retain_existing, toggle_select, SelectionState};
pub use session::EditorSession;
pub use shape::{
    KindShape, Multiplicity, NodeRole, ShapeCatalog, ShapeDescriptor, ShapeFn, SlotShape,
};
pub use types::{Document, Location, Node, Position};
pub use undo::UndoStack;
pub use validation::{validate_document, ValidationError};
