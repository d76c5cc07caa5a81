//! Stateful editing session
//!
//! Wires the engine pieces together for a host UI: the current document,
//! selection, clipboard, undo history and a pending drag decision. Every
//! operation either swaps in a new document (snapshot, prune selection,
//! emit events) or fails leaving all of it untouched.

use std::collections::HashSet;
use std::sync::Arc;

use crate::clipboard::Clipboard;
use crate::config::EditorConfig;
use crate::drag::{DragOutcome, MoveChoice, PendingMove};
use crate::edit::{entry_ids, Edited, TreeEditor};
use crate::error::{Result, RouteTreeError};
use crate::events::{EventSink, NullEventSink, StructureEvent};
use crate::ids::{IdGenerator, NodeId, UuidIds};
use crate::selection::SelectionState;
use crate::shape::ShapeCatalog;
use crate::types::{Document, Node, Position};
use crate::undo::UndoStack;
use crate::validation::{validate_document, ValidationError};

/// Editing session over a single document
pub struct EditorSession {
    document: Document,
    selection: SelectionState,
    clipboard: Clipboard,
    history: UndoStack,
    pending: Option<PendingMove>,
    catalog: Arc<dyn ShapeCatalog>,
    ids: Arc<dyn IdGenerator>,
    events: Arc<dyn EventSink>,
    config: EditorConfig,
}

impl EditorSession {
    /// Create a session; the initial document becomes the first undo snapshot
    pub fn new(
        document: Document,
        catalog: Arc<dyn ShapeCatalog>,
        ids: Arc<dyn IdGenerator>,
        events: Arc<dyn EventSink>,
        config: EditorConfig,
    ) -> Result<Self> {
        let mut history = UndoStack::with_level(config.undo_depth, config.snapshot_level);
        history.push(&document)?;
        Ok(Self {
            document,
            selection: SelectionState::new(),
            clipboard: Clipboard::new(),
            history,
            pending: None,
            catalog,
            ids,
            events,
            config,
        })
    }

    /// Session with uuid ids, no event sink and default configuration
    pub fn with_catalog(document: Document, catalog: Arc<dyn ShapeCatalog>) -> Result<Self> {
        Self::new(
            document,
            catalog,
            Arc::new(UuidIds),
            Arc::new(NullEventSink),
            EditorConfig::default(),
        )
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The drag waiting for a shift/nest answer, if any
    pub fn pending_move(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Check the current document against the catalog
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_document(&self.document, self.catalog.as_ref())
    }

    fn editor(&self) -> TreeEditor<'_> {
        TreeEditor::new(self.catalog.as_ref(), self.ids.as_ref())
            .with_nest_slot(self.config.nest_slot.clone())
    }

    // ---- selection ----

    /// Record whether the accumulating modifier key is held
    pub fn set_modifier(&mut self, active: bool) {
        self.selection.set_modifier(active);
    }

    /// Apply a click; clicks on ids not in the document are ignored
    pub fn click(&mut self, id: &str) -> &[NodeId] {
        if self.document.contains(id) {
            let entries = entry_ids(&self.document, self.catalog.as_ref());
            self.selection.click(&NodeId::from(id), &entries);
        } else {
            log::trace!("Ignored click on unknown node '{}'", id);
        }
        self.selection.selected()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ---- edits ----

    /// Create a node of `kind` and append it to `slot` of `parent`
    pub fn add_step(
        &mut self,
        parent: &str,
        slot: &str,
        kind: &str,
        data: serde_json::Value,
    ) -> Result<NodeId> {
        let edited = {
            let editor = self.editor();
            let node = editor.new_node(kind, data)?;
            editor.add_node(&self.document, node, parent, slot, Position::Append)?
        };
        let id = edited
            .added_ids()
            .into_iter()
            .next()
            .ok_or_else(|| {
                RouteTreeError::invalid_parent(&NodeId::from(parent), "nothing added")
            })?;
        self.commit(edited)?;
        Ok(id)
    }

    /// Append a fresh flow with a fresh entry node
    pub fn add_flow(&mut self, entry_kind: &str) -> Result<NodeId> {
        let edited = {
            let editor = self.editor();
            let flow = editor.new_flow(&self.config.flow_kind, entry_kind)?;
            editor.add_flow(&self.document, flow, Position::Append)?
        };
        let id = edited
            .added_ids()
            .into_iter()
            .next()
            .ok_or_else(|| RouteTreeError::UnknownKind(self.config.flow_kind.clone()))?;
        self.commit(edited)?;
        Ok(id)
    }

    /// Delete one node (and its subtree)
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let edited = self.editor().delete_by_id(&self.document, id)?;
        self.commit(edited)
    }

    /// Delete every selected node, all or nothing
    pub fn delete_selected(&mut self) -> Result<()> {
        if self.selection.is_empty() {
            return Ok(());
        }
        let edited = self
            .editor()
            .delete_many(&self.document, self.selection.selected())?;
        self.commit(edited)
    }

    /// Toggle the transient fade flag; not recorded in undo history
    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<()> {
        let edited = self.editor().set_visible(&self.document, id, visible)?;
        self.document = edited.document;
        self.emit(edited.changes);
        Ok(())
    }

    // ---- drag ----

    /// Start resolving a drop of `source` onto `target`
    ///
    /// Unambiguous drops apply at once and return `None`. Ambiguous ones are
    /// held until [`Self::confirm_drag`] or [`Self::cancel_drag`], and the
    /// pending move is returned so the host can prompt.
    pub fn begin_drag(&mut self, source: &str, target: &str) -> Result<Option<PendingMove>> {
        let outcome = self.editor().propose_move(&self.document, source, target)?;
        match outcome {
            DragOutcome::Unchanged => {
                self.pending = None;
                Ok(None)
            }
            DragOutcome::Applied(edited) => {
                self.commit(edited)?;
                self.pending = None;
                Ok(None)
            }
            DragOutcome::Pending(pending) => {
                self.pending = Some(pending.clone());
                Ok(Some(pending))
            }
        }
    }

    /// Apply the pending drag as a nest (`as_child`) or a shift
    ///
    /// Returns `false` if no drag is pending.
    pub fn confirm_drag(&mut self, as_child: bool) -> Result<bool> {
        let Some(pending) = self.pending.clone() else {
            return Ok(false);
        };
        let choice = if as_child {
            MoveChoice::Nest
        } else {
            MoveChoice::Shift
        };
        if let Some(edited) = self.editor().resolve_move(&self.document, &pending, choice)? {
            self.commit(edited)?;
        }
        self.pending = None;
        Ok(true)
    }

    /// Discard the pending drag without touching the document
    pub fn cancel_drag(&mut self) -> Option<PendingMove> {
        let pending = self.pending.take();
        if let Some(pending) = &pending {
            log::debug!("Cancelled drag of '{}' onto '{}'", pending.source, pending.target);
        }
        pending
    }

    // ---- clipboard ----

    /// Copy the selected subtrees; returns how many were captured
    pub fn copy_selection(&mut self) -> usize {
        self.clipboard = Clipboard::copy(&self.document, self.selection.selected());
        self.clipboard.len()
    }

    /// Paste the clipboard relative to the current selection
    ///
    /// Returns the ids of the pasted subtree roots.
    pub fn paste(&mut self) -> Result<Vec<NodeId>> {
        let edited = self.editor().paste(
            &self.document,
            &self.clipboard,
            self.selection.selected(),
            &self.config.flow_kind,
        );
        let edited = match edited {
            Ok(edited) => edited,
            Err(err) => {
                if matches!(err, RouteTreeError::AmbiguousPasteTarget { .. }) {
                    log::warn!("Paste rejected: {}", err);
                }
                return Err(err);
            }
        };
        let pasted = edited.added_ids();
        self.commit(edited)?;
        Ok(pasted)
    }

    // ---- history ----

    /// Step back one snapshot; returns `false` at the start of history
    pub fn undo(&mut self) -> Result<bool> {
        match self.history.undo() {
            Some(restored) => {
                self.restore(restored?);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Step forward one snapshot; returns `false` at the end of history
    pub fn redo(&mut self) -> Result<bool> {
        match self.history.redo() {
            Some(restored) => {
                self.restore(restored?);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn restore(&mut self, document: Document) {
        let changes = diff_documents(&self.document, &document);
        self.document = document;
        self.selection.prune(&self.document);
        self.pending = None;
        self.emit(changes);
    }

    fn commit(&mut self, edited: Edited) -> Result<()> {
        if edited.is_noop() {
            return Ok(());
        }
        self.history.push(&edited.document)?;
        self.document = edited.document;
        self.selection.prune(&self.document);
        self.emit(edited.changes);
        Ok(())
    }

    fn emit(&self, changes: Vec<StructureEvent>) {
        for change in changes {
            if let Err(e) = self.events.send(change) {
                log::warn!("Failed to deliver structure event: {}", e);
            }
        }
    }
}

/// Structural changes between two documents, reported per subtree root
///
/// A node present in both is moved when its parent or slot differs, or when
/// its order among the siblings present in both differs.
fn diff_documents(before: &Document, after: &Document) -> Vec<StructureEvent> {
    let old_ids = before.id_set();
    let new_ids = after.id_set();
    let removed: HashSet<&NodeId> = old_ids.difference(&new_ids).collect();
    let added: HashSet<&NodeId> = new_ids.difference(&old_ids).collect();
    let kept: HashSet<&NodeId> = old_ids.intersection(&new_ids).collect();

    let is_root = |doc: &Document, id: &NodeId, set: &HashSet<&NodeId>| {
        match doc.location(id.as_str()) {
            Some(location) => !set.contains(&location.parent),
            None => true,
        }
    };

    let mut changes: Vec<StructureEvent> = before
        .node_ids()
        .iter()
        .filter(|id| removed.contains(id) && is_root(before, id, &removed))
        .map(StructureEvent::removed)
        .collect();
    changes.extend(
        after
            .node_ids()
            .iter()
            .filter(|id| {
                kept.contains(id) && placement(before, id, &kept) != placement(after, id, &kept)
            })
            .map(|id| {
                let visible = after.find(id.as_str()).map_or(true, Node::visible);
                StructureEvent::moved(id, visible)
            }),
    );
    changes.extend(
        after
            .node_ids()
            .iter()
            .filter(|id| added.contains(id) && is_root(after, id, &added))
            .map(StructureEvent::added),
    );
    changes
}

/// Parent, slot and order among `kept` siblings; flow roots have no parent
fn placement(
    doc: &Document,
    id: &NodeId,
    kept: &HashSet<&NodeId>,
) -> Option<(Option<NodeId>, String, usize)> {
    let (parent, slot, siblings) = match doc.location(id.as_str()) {
        Some(location) => {
            let siblings = doc.find(location.parent.as_str())?.slot(&location.slot);
            (Some(location.parent), location.slot, siblings)
        }
        None => (None, String::new(), doc.flows()),
    };
    let index = siblings
        .iter()
        .filter(|node| kept.contains(node.id()))
        .position(|node| node.id() == id)?;
    Some((parent, slot, index))
}
