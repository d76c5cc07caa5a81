//! Mutation engine
//!
//! Every operation takes a [`Document`] by reference and returns a new one
//! inside an [`Edited`], together with the structural changes it made. The
//! input document is never modified, and a failing operation returns an
//! error without producing any document at all.
//!
//! Work happens on a full clone of the input: the node is detached, the
//! destination is re-resolved by id in the clone, and only then inserted.
//! Resolving by id after detaching keeps sibling indices honest when source
//! and destination share a slot.

use std::collections::HashSet;

use crate::config::NestSlotRule;
use crate::error::{Result, RouteTreeError};
use crate::events::{ChangeKind, StructureEvent};
use crate::ids::{IdGenerator, NodeId};
use crate::shape::{KindShape, NodeRole, ShapeCatalog, SlotShape};
use crate::types::{Document, Location, Node, NodePath, Position};

/// Result of a successful edit
#[derive(Debug, Clone, PartialEq)]
pub struct Edited {
    /// The new document
    pub document: Document,
    /// Structural changes, in the order they happened
    pub changes: Vec<StructureEvent>,
}

impl Edited {
    /// An edit that changed nothing
    pub fn unchanged(document: &Document) -> Self {
        Self {
            document: document.clone(),
            changes: Vec::new(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    /// Ids of nodes this edit added, in document order
    pub fn added_ids(&self) -> Vec<NodeId> {
        self.changes
            .iter()
            .filter(|event| event.change == ChangeKind::Added)
            .map(|event| event.node_id.clone())
            .collect()
    }
}

/// Find a node by id, depth-first in pre-order across all flows
pub fn find_by_id<'d>(doc: &'d Document, id: &str) -> Option<&'d Node> {
    doc.find(id)
}

/// Parent id, slot name and index of a node; `None` for flow roots and absent ids
pub fn find_parent_and_slot(doc: &Document, id: &str) -> Option<Location> {
    doc.location(id)
}

/// Ids of every node whose kind is an entry kind
pub fn entry_ids(doc: &Document, catalog: &dyn ShapeCatalog) -> HashSet<NodeId> {
    doc.flows()
        .iter()
        .flat_map(|flow| flow.descendants())
        .filter(|node| {
            catalog
                .shape(node.kind())
                .map(KindShape::is_entry)
                .unwrap_or(false)
        })
        .map(|node| node.id().clone())
        .collect()
}

/// Structural editor over route documents
///
/// Borrows the shape catalog and id generator it needs; holds no document
/// state of its own.
pub struct TreeEditor<'a> {
    catalog: &'a dyn ShapeCatalog,
    ids: &'a dyn IdGenerator,
    nest_slot: NestSlotRule,
}

impl<'a> TreeEditor<'a> {
    pub fn new(catalog: &'a dyn ShapeCatalog, ids: &'a dyn IdGenerator) -> Self {
        Self {
            catalog,
            ids,
            nest_slot: NestSlotRule::default(),
        }
    }

    /// Choose which slot nest moves target
    pub fn with_nest_slot(mut self, rule: NestSlotRule) -> Self {
        self.nest_slot = rule;
        self
    }

    pub fn catalog(&self) -> &dyn ShapeCatalog {
        self.catalog
    }

    fn shape(&self, kind: &str) -> Result<&'a KindShape> {
        self.catalog
            .shape(kind)
            .ok_or_else(|| RouteTreeError::UnknownKind(kind.to_string()))
    }

    fn role(&self, node: &Node) -> NodeRole {
        self.catalog
            .shape(node.kind())
            .map(|shape| shape.role)
            .unwrap_or(NodeRole::Step)
    }

    /// Create a fresh node of a known kind
    pub fn new_node(&self, kind: &str, data: serde_json::Value) -> Result<Node> {
        self.shape(kind)?;
        Ok(Node::new(self.ids.next_id(), kind).with_data(data))
    }

    /// Create a fresh flow whose entry slot holds a fresh entry node
    pub fn new_flow(&self, flow_kind: &str, entry_kind: &str) -> Result<Node> {
        let entry = self.new_node(entry_kind, serde_json::Value::Null)?;
        self.wrap_entry(flow_kind, entry)
    }

    /// Wrap an existing entry subtree in a fresh flow
    pub fn wrap_entry(&self, flow_kind: &str, entry: Node) -> Result<Node> {
        let flow_shape = self.shape(flow_kind)?;
        if !flow_shape.is_flow() {
            return Err(RouteTreeError::illegal_move(
                entry.id(),
                format!("kind '{}' is not a flow kind", flow_kind),
            ));
        }
        let slot = flow_shape.entry_slot().ok_or_else(|| RouteTreeError::UnknownSlot {
            kind: flow_kind.to_string(),
            slot: "<entry>".to_string(),
        })?;
        let mut flow = Node::new(self.ids.next_id(), flow_kind);
        flow.slot_mut(&slot.name).push(entry);
        Ok(flow)
    }

    /// Deep-copy the subtree at `id`
    ///
    /// With `regenerate_ids`, every node in the copy (root included) gets a
    /// fresh id from the generator.
    pub fn clone_subtree(&self, doc: &Document, id: &str, regenerate_ids: bool) -> Option<Node> {
        let mut copy = doc.find(id)?.clone();
        if regenerate_ids {
            self.regenerate_ids(&mut copy);
        }
        Some(copy)
    }

    /// Give every node in a detached subtree a fresh id
    pub fn regenerate_ids(&self, node: &mut Node) {
        let ids = self.ids;
        node.reassign_ids(&mut || ids.next_id());
    }

    /// Insert `node` into `slot` of `parent`
    pub fn add_node(
        &self,
        doc: &Document,
        node: Node,
        parent: &str,
        slot: &str,
        position: Position,
    ) -> Result<Edited> {
        let parent_path = doc
            .locate(parent)
            .ok_or_else(|| RouteTreeError::invalid_parent(&NodeId::from(parent), "not found"))?;
        let parent_node = doc
            .node_at(&parent_path)
            .ok_or_else(|| RouteTreeError::invalid_parent(&NodeId::from(parent), "not found"))?;
        let index = self.insertion_index(parent_node, slot, &node, &position)?;
        self.check_fresh_ids(doc, &node)?;

        let mut next = doc.clone();
        let node_id = node.id().clone();
        insert_at(&mut next, &parent_path, slot, index, node)?;

        log::debug!("Added node '{}' under '{}'.{}", node_id, parent, slot);
        Ok(Edited {
            document: next,
            changes: vec![StructureEvent::added(&node_id)],
        })
    }

    /// Insert a whole flow into the document's flow list
    pub fn add_flow(&self, doc: &Document, flow: Node, position: Position) -> Result<Edited> {
        let shape = self.shape(flow.kind())?;
        if !shape.is_flow() {
            return Err(RouteTreeError::illegal_move(
                flow.id(),
                format!("kind '{}' cannot be a top-level flow", flow.kind()),
            ));
        }
        self.check_fresh_ids(doc, &flow)?;
        let index = flow_insertion_index(doc, &position)?;

        let mut next = doc.clone();
        let flow_id = flow.id().clone();
        next.flows.insert(index, flow);

        log::debug!("Added flow '{}' at {}", flow_id, index);
        Ok(Edited {
            document: next,
            changes: vec![StructureEvent::added(&flow_id)],
        })
    }

    /// Remove the subtree rooted at `id`
    ///
    /// Removing a flow's entry node removes the whole flow.
    pub fn delete_by_id(&self, doc: &Document, id: &str) -> Result<Edited> {
        let mut next = doc.clone();
        let mut changes = Vec::new();
        self.delete_in_place(&mut next, id, &mut changes)?;
        Ok(Edited {
            document: next,
            changes,
        })
    }

    /// Remove several subtrees at once, all or nothing
    ///
    /// Ids that disappear because an earlier id in the list covered them
    /// (a descendant, or a cascaded flow) are skipped.
    pub fn delete_many(&self, doc: &Document, ids: &[NodeId]) -> Result<Edited> {
        if let Some(missing) = ids.iter().find(|id| !doc.contains(id.as_str())) {
            return Err(RouteTreeError::NotFound(missing.clone()));
        }

        let mut next = doc.clone();
        let mut changes = Vec::new();
        for id in ids {
            if next.contains(id.as_str()) {
                self.delete_in_place(&mut next, id.as_str(), &mut changes)?;
            }
        }
        Ok(Edited {
            document: next,
            changes,
        })
    }

    fn delete_in_place(
        &self,
        doc: &mut Document,
        id: &str,
        changes: &mut Vec<StructureEvent>,
    ) -> Result<()> {
        let path = doc
            .locate(id)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(id)))?;
        let removed = doc
            .take_at(&path)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(id)))?;
        changes.push(StructureEvent::removed(removed.id()));

        if path.steps.len() == 1 && self.flow_lost_entry(doc, &path, &removed) {
            let flow = doc.flows.remove(path.flow);
            log::debug!("Removing flow '{}' with its entry '{}'", flow.id(), id);
            changes.push(StructureEvent::removed(flow.id()));
        } else {
            log::debug!("Deleted node '{}'", id);
        }
        Ok(())
    }

    /// Whether removing `removed` from the flow at `path.flow` emptied its entry slot
    fn flow_lost_entry(&self, doc: &Document, path: &NodePath, removed: &Node) -> bool {
        let Some(flow) = doc.flows.get(path.flow) else {
            return false;
        };
        let Some((slot, _)) = path.last_step() else {
            return false;
        };
        let in_entry_slot = match self.catalog.shape(flow.kind()).and_then(KindShape::entry_slot) {
            Some(entry_slot) => entry_slot.name == *slot,
            None => self.role(removed) == NodeRole::Entry,
        };
        in_entry_slot && flow.slot(slot).is_empty()
    }

    /// Set the transient visibility flag on a node
    pub fn set_visible(&self, doc: &Document, id: &str, visible: bool) -> Result<Edited> {
        let path = doc
            .locate(id)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(id)))?;
        let mut next = doc.clone();
        let node = next
            .node_at_mut(&path)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(id)))?;
        if node.visible == visible {
            return Ok(Edited::unchanged(doc));
        }
        node.visible = visible;
        Ok(Edited {
            document: next,
            changes: vec![StructureEvent::visibility(&NodeId::from(id), visible)],
        })
    }

    /// Move the subtree at `source` relative to `target`
    ///
    /// - `as_child = false`: becomes the next sibling of `target`
    /// - `as_child = true`: appended to `target`'s nest slot
    ///
    /// Flow roots and entry nodes only ever reorder the flow list.
    pub fn move_node(
        &self,
        doc: &Document,
        source: &str,
        target: &str,
        as_child: bool,
    ) -> Result<Edited> {
        if source == target {
            return Ok(Edited::unchanged(doc));
        }
        let source_path = doc
            .locate(source)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(source)))?;
        let target_path = doc
            .locate(target)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(target)))?;
        if doc.is_ancestor(source, target) {
            log::warn!("Rejected move of '{}' into its descendant '{}'", source, target);
            return Err(RouteTreeError::CyclicMove {
                node: NodeId::from(source),
                target: NodeId::from(target),
            });
        }

        let source_node = doc
            .node_at(&source_path)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(source)))?;
        if source_path.is_flow_root() || self.role(source_node) == NodeRole::Entry {
            return self.reorder_flow(doc, &source_path, &target_path, source, target, as_child);
        }

        let (slot, index) = if as_child {
            let target_node = doc
                .node_at(&target_path)
                .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(target)))?;
            let slot = self.nest_slot_for(target_node)?;
            (slot, None)
        } else {
            let location = doc.location(target).ok_or_else(|| {
                RouteTreeError::illegal_move(
                    &NodeId::from(source),
                    "steps cannot be placed beside a flow",
                )
            })?;
            self.check_sibling_slot(doc, &location)?;
            (location.slot, Some(target))
        };

        let mut next = doc.clone();
        let detached = next
            .take_at(&source_path)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(source)))?;
        let visible = detached.visible;

        match index {
            None => {
                let parent_path = next
                    .locate(target)
                    .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(target)))?;
                let end = next.node_at(&parent_path).map(|n| n.slot(&slot).len()).unwrap_or(0);
                insert_at(&mut next, &parent_path, &slot, end, detached)?;
            }
            Some(sibling) => {
                let sibling_path = next
                    .locate(sibling)
                    .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(sibling)))?;
                let parent_path = sibling_path
                    .parent()
                    .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(sibling)))?;
                let after = sibling_path.last_step().map(|(_, i)| i + 1).unwrap_or(0);
                insert_at(&mut next, &parent_path, &slot, after, detached)?;
            }
        }

        log::debug!(
            "Moved '{}' {} '{}'",
            source,
            if as_child { "into" } else { "after" },
            target
        );
        Ok(Edited {
            document: next,
            changes: vec![StructureEvent::moved(&NodeId::from(source), visible)],
        })
    }

    /// Move the flow owning `source_path` right after the flow owning `target_path`
    fn reorder_flow(
        &self,
        doc: &Document,
        source_path: &NodePath,
        target_path: &NodePath,
        source: &str,
        target: &str,
        as_child: bool,
    ) -> Result<Edited> {
        let source_id = NodeId::from(source);
        if as_child {
            log::warn!("Rejected nesting of entry '{}'", source);
            return Err(RouteTreeError::illegal_move(
                &source_id,
                "entry nodes and flows cannot be nested",
            ));
        }
        let target_node = doc
            .node_at(target_path)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(target)))?;
        if !(target_path.is_flow_root() || self.role(target_node) == NodeRole::Entry) {
            log::warn!("Rejected move of entry '{}' into a step", source);
            return Err(RouteTreeError::illegal_move(
                &source_id,
                "entry nodes can only be reordered among flows",
            ));
        }
        if source_path.flow == target_path.flow {
            return Ok(Edited::unchanged(doc));
        }

        let mut next = doc.clone();
        let flow = next.flows.remove(source_path.flow);
        let target_flow_id = doc.flows[target_path.flow].id().clone();
        let target_index = next
            .flows
            .iter()
            .position(|f| *f.id() == target_flow_id)
            .ok_or_else(|| RouteTreeError::NotFound(target_flow_id.clone()))?;
        next.flows.insert(target_index + 1, flow);

        log::debug!("Moved flow of '{}' after flow '{}'", source, target_flow_id);
        Ok(Edited {
            document: next,
            changes: vec![StructureEvent::moved(&source_id, true)],
        })
    }

    /// Slot a nest move lands in
    pub fn nest_slot_for(&self, target: &Node) -> Result<String> {
        let shape = self.shape(target.kind())?;
        let named = match &self.nest_slot {
            NestSlotRule::Named(name) => shape.slot(name).filter(|s| s.is_multi()),
            NestSlotRule::FirstMulti => None,
        };
        named
            .or_else(|| shape.first_multi_slot())
            .map(|slot| slot.name.clone())
            .ok_or_else(|| {
                RouteTreeError::invalid_parent(
                    target.id(),
                    format!("kind '{}' has no slot that takes children", target.kind()),
                )
            })
    }

    /// Check whether a node has children in any of its declared slots
    pub fn has_nested_children(&self, node: &Node) -> bool {
        match self.catalog.shape(node.kind()) {
            Some(shape) => shape
                .slots
                .iter()
                .any(|slot| !node.slot(&slot.name).is_empty()),
            None => node.has_children(),
        }
    }

    /// Target's parent slot must accept another child
    fn check_sibling_slot(&self, doc: &Document, location: &Location) -> Result<()> {
        let parent = doc
            .find(location.parent.as_str())
            .ok_or_else(|| RouteTreeError::NotFound(location.parent.clone()))?;
        let shape = self.shape(parent.kind())?;
        let slot = shape
            .slot(&location.slot)
            .ok_or_else(|| RouteTreeError::UnknownSlot {
                kind: parent.kind().to_string(),
                slot: location.slot.clone(),
            })?;
        if !slot.is_multi() {
            return Err(RouteTreeError::SlotCapacityExceeded {
                parent: location.parent.clone(),
                slot: location.slot.clone(),
            });
        }
        Ok(())
    }

    /// Validate a slot insertion and resolve its index
    fn insertion_index(
        &self,
        parent: &Node,
        slot: &str,
        node: &Node,
        position: &Position,
    ) -> Result<usize> {
        let shape = self.shape(parent.kind())?;
        if !shape.can_have_children() {
            return Err(RouteTreeError::invalid_parent(
                parent.id(),
                format!("kind '{}' cannot contain children", parent.kind()),
            ));
        }
        let slot_shape = shape.slot(slot).ok_or_else(|| RouteTreeError::UnknownSlot {
            kind: parent.kind().to_string(),
            slot: slot.to_string(),
        })?;
        self.check_placement(node, slot_shape)?;

        let siblings = parent.slot(slot);
        if !slot_shape.is_multi() && !siblings.is_empty() {
            return Err(RouteTreeError::SlotCapacityExceeded {
                parent: parent.id().clone(),
                slot: slot.to_string(),
            });
        }
        sibling_index(siblings, position)
    }

    /// Entry nodes belong in entry slots, flows belong at the top level
    fn check_placement(&self, node: &Node, slot: &SlotShape) -> Result<()> {
        match self.shape(node.kind())?.role {
            NodeRole::Flow => Err(RouteTreeError::illegal_move(
                node.id(),
                "flows can only live at the top level",
            )),
            NodeRole::Entry if !slot.holds_entry => Err(RouteTreeError::illegal_move(
                node.id(),
                "entry nodes can only live in a flow's entry slot",
            )),
            _ => Ok(()),
        }
    }

    fn check_fresh_ids(&self, doc: &Document, node: &Node) -> Result<()> {
        let existing = doc.id_set();
        let mut seen = HashSet::new();
        for id in node.subtree_ids() {
            if existing.contains(&id) || !seen.insert(id.clone()) {
                return Err(RouteTreeError::DuplicateId(id));
            }
        }
        Ok(())
    }
}

fn sibling_index(siblings: &[Node], position: &Position) -> Result<usize> {
    let find = |id: &NodeId| {
        siblings
            .iter()
            .position(|n| n.id() == id)
            .ok_or_else(|| RouteTreeError::NotFound(id.clone()))
    };
    match position {
        Position::Append => Ok(siblings.len()),
        Position::Before(id) => find(id),
        Position::After(id) => find(id).map(|i| i + 1),
    }
}

fn flow_insertion_index(doc: &Document, position: &Position) -> Result<usize> {
    sibling_index(&doc.flows, position)
}

fn insert_at(
    doc: &mut Document,
    parent_path: &NodePath,
    slot: &str,
    index: usize,
    node: Node,
) -> Result<()> {
    let parent = doc
        .node_at_mut(parent_path)
        .ok_or_else(|| RouteTreeError::NotFound(node.id().clone()))?;
    let children = parent.slot_mut(slot);
    let index = index.min(children.len());
    children.insert(index, node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{child_ids, sample_document, test_catalog};
    use crate::ids::SequentialIds;

    #[test]
    fn test_find_parent_and_slot() {
        let doc = sample_document();
        let location = find_parent_and_slot(&doc, "when-2").unwrap();
        assert_eq!(location.parent, "choice-1");
        assert_eq!(location.slot, "when");
        assert_eq!(location.index, 1);
        assert!(find_parent_and_slot(&doc, "route-2").is_none());
        assert!(find_by_id(&doc, "nope").is_none());
    }

    #[test]
    fn test_add_node_append_and_relative() {
        let catalog = test_catalog();
        let ids = SequentialIds::new("new");
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let log = editor.new_node("log", serde_json::json!({"message": "x"})).unwrap();
        let edited = editor.add_node(&doc, log, "from-1", "steps", Position::Append).unwrap();
        assert_eq!(
            child_ids(&edited.document, "from-1", "steps"),
            vec!["log-1", "choice-1", "to-2", "new-1"]
        );
        assert_eq!(edited.changes, vec![StructureEvent::added(&NodeId::from("new-1"))]);
        // Input untouched
        assert_eq!(child_ids(&doc, "from-1", "steps").len(), 3);

        let to = editor.new_node("to", serde_json::Value::Null).unwrap();
        let edited = editor
            .add_node(
                &edited.document,
                to,
                "from-1",
                "steps",
                Position::Before(NodeId::from("choice-1")),
            )
            .unwrap();
        assert_eq!(
            child_ids(&edited.document, "from-1", "steps"),
            vec!["log-1", "new-2", "choice-1", "to-2", "new-1"]
        );
    }

    #[test]
    fn test_add_node_errors() {
        let catalog = test_catalog();
        let ids = SequentialIds::new("new");
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let node = || editor.new_node("log", serde_json::Value::Null).unwrap();

        assert!(matches!(
            editor.add_node(&doc, node(), "ghost", "steps", Position::Append),
            Err(RouteTreeError::InvalidParent { .. })
        ));
        assert!(matches!(
            editor.add_node(&doc, node(), "log-1", "steps", Position::Append),
            Err(RouteTreeError::InvalidParent { .. })
        ));
        assert!(matches!(
            editor.add_node(&doc, node(), "choice-1", "branches", Position::Append),
            Err(RouteTreeError::UnknownSlot { .. })
        ));
        let otherwise = editor.new_node("otherwise", serde_json::Value::Null).unwrap();
        assert!(matches!(
            editor.add_node(&doc, otherwise, "choice-1", "otherwise", Position::Append),
            Err(RouteTreeError::SlotCapacityExceeded { .. })
        ));
        assert!(matches!(
            editor.add_node(
                &doc,
                node(),
                "from-1",
                "steps",
                Position::After(NodeId::from("ghost"))
            ),
            Err(RouteTreeError::NotFound(_))
        ));
        let duplicate = doc.find("log-1").unwrap().clone();
        assert!(matches!(
            editor.add_node(&doc, duplicate, "from-1", "steps", Position::Append),
            Err(RouteTreeError::DuplicateId(_))
        ));
        let entry = editor.new_node("from", serde_json::Value::Null).unwrap();
        assert!(matches!(
            editor.add_node(&doc, entry, "from-1", "steps", Position::Append),
            Err(RouteTreeError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_delete_step() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let edited = editor.delete_by_id(&doc, "choice-1").unwrap();
        assert!(!edited.document.contains("choice-1"));
        assert!(!edited.document.contains("when-1"));
        assert!(!edited.document.contains("log-2"));
        assert_eq!(child_ids(&edited.document, "from-1", "steps"), vec!["log-1", "to-2"]);
        assert_eq!(edited.changes.len(), 1);
        assert_eq!(edited.changes[0].change, ChangeKind::Removed);

        assert!(matches!(
            editor.delete_by_id(&doc, "ghost"),
            Err(RouteTreeError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_entry_cascades_to_flow() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let edited = editor.delete_by_id(&doc, "from-2").unwrap();
        assert_eq!(edited.document.flows().len(), 1);
        assert!(!edited.document.contains("route-2"));
        let removed: Vec<&str> = edited.changes.iter().map(|c| c.node_id.as_str()).collect();
        assert_eq!(removed, vec!["from-2", "route-2"]);

        let edited = editor.delete_by_id(&doc, "route-1").unwrap();
        assert_eq!(edited.document.flows().len(), 1);
        assert_eq!(edited.document.flows()[0].id(), "route-2");
    }

    #[test]
    fn test_delete_many_absorbs_descendants() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let edited = editor
            .delete_many(
                &doc,
                &[
                    NodeId::from("choice-1"),
                    NodeId::from("to-1"),
                    NodeId::from("log-3"),
                ],
            )
            .unwrap();
        assert!(!edited.document.contains("to-1"));
        assert!(!edited.document.contains("log-3"));
        assert_eq!(edited.changes.len(), 2);

        let result = editor.delete_many(&doc, &[NodeId::from("log-1"), NodeId::from("ghost")]);
        assert!(matches!(result, Err(RouteTreeError::NotFound(_))));
    }

    #[test]
    fn test_move_shift_and_nest() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let shifted = editor.move_node(&doc, "to-2", "log-1", false).unwrap();
        assert_eq!(
            child_ids(&shifted.document, "from-1", "steps"),
            vec!["log-1", "to-2", "choice-1"]
        );
        assert_eq!(shifted.changes[0].change, ChangeKind::Moved);

        let nested = editor.move_node(&doc, "log-3", "when-2", true).unwrap();
        assert_eq!(child_ids(&nested.document, "when-2", "steps"), vec!["log-3"]);
        assert!(child_ids(&nested.document, "from-2", "steps").is_empty());

        // Moving forward within the same slot
        let forward = editor.move_node(&doc, "log-1", "to-2", false).unwrap();
        assert_eq!(
            child_ids(&forward.document, "from-1", "steps"),
            vec!["choice-1", "to-2", "log-1"]
        );
    }

    #[test]
    fn test_move_errors() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        assert_eq!(editor.move_node(&doc, "log-1", "log-1", true).unwrap().document, doc);
        assert!(matches!(
            editor.move_node(&doc, "choice-1", "when-1", true),
            Err(RouteTreeError::CyclicMove { .. })
        ));
        assert!(matches!(
            editor.move_node(&doc, "ghost", "log-1", false),
            Err(RouteTreeError::NotFound(_))
        ));
        assert!(matches!(
            editor.move_node(&doc, "log-1", "to-2", true),
            Err(RouteTreeError::InvalidParent { .. })
        ));
        assert!(matches!(
            editor.move_node(&doc, "log-1", "otherwise-1", false),
            Err(RouteTreeError::SlotCapacityExceeded { .. })
        ));
        assert!(matches!(
            editor.move_node(&doc, "from-1", "from-2", true),
            Err(RouteTreeError::IllegalMove { .. })
        ));
        assert!(matches!(
            editor.move_node(&doc, "from-1", "log-3", false),
            Err(RouteTreeError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_move_entry_reorders_flows() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let edited = editor.move_node(&doc, "from-1", "from-2", false).unwrap();
        let order: Vec<&str> = edited.document.flows().iter().map(|f| f.id().as_str()).collect();
        assert_eq!(order, vec!["route-2", "route-1"]);
        assert_eq!(edited.document.find("from-1").unwrap().slot("steps").len(), 3);
    }

    #[test]
    fn test_clone_subtree_regenerates_ids() {
        let catalog = test_catalog();
        let ids = SequentialIds::new("copy");
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let kept = editor.clone_subtree(&doc, "choice-1", false).unwrap();
        assert_eq!(kept, *doc.find("choice-1").unwrap());

        let fresh = editor.clone_subtree(&doc, "choice-1", true).unwrap();
        let existing = doc.id_set();
        assert!(fresh.subtree_ids().iter().all(|id| !existing.contains(id)));
        assert_eq!(fresh.descendants().len(), kept.descendants().len());
        assert!(editor.clone_subtree(&doc, "ghost", true).is_none());
    }

    #[test]
    fn test_named_nest_slot_rule() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor =
            TreeEditor::new(&catalog, &ids).with_nest_slot(NestSlotRule::Named("otherwise".into()));
        let choice = sample_document().find("choice-1").unwrap().clone();
        // "otherwise" is single-valued, so the rule falls back to the first multi slot
        assert_eq!(editor.nest_slot_for(&choice).unwrap(), "when");
    }

    #[test]
    fn test_set_visible() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let hidden = editor.set_visible(&doc, "log-1", false).unwrap();
        assert!(!hidden.document.find("log-1").unwrap().visible());
        assert_eq!(hidden.changes[0].change, ChangeKind::Hidden);
        assert!(editor.set_visible(&doc, "log-1", true).unwrap().is_noop());
    }

    #[test]
    fn test_entry_ids() {
        let catalog = test_catalog();
        let entries = entry_ids(&sample_document(), &catalog);
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&NodeId::from("from-1")));
    }
}
