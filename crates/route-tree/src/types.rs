//! Core types for route documents
//!
//! A [`Document`] is an ordered list of flows. Each flow is a tree of
//! [`Node`]s whose children live in named slots. Documents are values:
//! engine operations take one by reference and hand back a new one.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// A node instance in a route tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: String,
    /// Business properties, opaque to the engine
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub(crate) data: serde_json::Value,
    /// Children keyed by slot name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(crate) slots: BTreeMap<String, Vec<Node>>,
    /// Transient fade flag, never persisted
    #[serde(skip, default = "default_visible")]
    pub(crate) visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: kind.into(),
            data: serde_json::Value::Null,
            slots: BTreeMap::new(),
            visible: true,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Replace the business properties of this node
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Children in a slot (empty if the slot is unused)
    pub fn slot(&self, name: &str) -> &[Node] {
        self.slots.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Occupied slots with their children
    pub fn slots(&self) -> impl Iterator<Item = (&str, &[Node])> {
        self.slots.iter().map(|(name, children)| (name.as_str(), children.as_slice()))
    }

    /// Direct children across all slots
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.slots.values().flatten()
    }

    /// Check if any slot holds a child
    pub fn has_children(&self) -> bool {
        self.slots.values().any(|children| !children.is_empty())
    }

    /// This node and every node below it, in pre-order
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        self.collect_preorder(&mut out);
        out
    }

    fn collect_preorder<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in self.children() {
            child.collect_preorder(out);
        }
    }

    /// Ids of this node and every node below it, in pre-order
    pub fn subtree_ids(&self) -> Vec<NodeId> {
        self.descendants().into_iter().map(|n| n.id.clone()).collect()
    }

    /// Find a node in this subtree by id (pre-order)
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == *id {
            return Some(self);
        }
        self.children().find_map(|child| child.find(id))
    }

    /// Check if this subtree contains a node with the given id
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> &mut Vec<Node> {
        self.slots.entry(name.to_string()).or_default()
    }

    /// Drop slots left empty by a removal
    pub(crate) fn prune_empty_slots(&mut self) {
        self.slots.retain(|_, children| !children.is_empty());
    }

    /// Rewrite every id in this subtree
    pub(crate) fn reassign_ids(&mut self, next: &mut dyn FnMut() -> NodeId) {
        self.id = next();
        for children in self.slots.values_mut() {
            for child in children.iter_mut() {
                child.reassign_ids(next);
            }
        }
    }

    fn find_path(&self, id: &str, steps: &mut Vec<(String, usize)>) -> bool {
        for (slot, children) in &self.slots {
            for (index, child) in children.iter().enumerate() {
                steps.push((slot.clone(), index));
                if child.id == *id || child.find_path(id, steps) {
                    return true;
                }
                steps.pop();
            }
        }
        false
    }
}

/// Where a node sits under its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub parent: NodeId,
    pub slot: String,
    pub index: usize,
}

/// Insertion point within a slot
///
/// Positions are always relative to a sibling id so that they stay
/// meaningful when other siblings change.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "sibling", rename_all = "camelCase")]
pub enum Position {
    /// After the last child
    #[default]
    Append,
    /// Immediately before the given sibling
    Before(NodeId),
    /// Immediately after the given sibling
    After(NodeId),
}

/// Resolved address of a node: flow index plus slot/index steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodePath {
    pub(crate) flow: usize,
    pub(crate) steps: Vec<(String, usize)>,
}

impl NodePath {
    pub(crate) fn is_flow_root(&self) -> bool {
        self.steps.is_empty()
    }

    pub(crate) fn parent(&self) -> Option<NodePath> {
        if self.steps.is_empty() {
            return None;
        }
        Some(NodePath {
            flow: self.flow,
            steps: self.steps[..self.steps.len() - 1].to_vec(),
        })
    }

    pub(crate) fn last_step(&self) -> Option<&(String, usize)> {
        self.steps.last()
    }
}

/// A complete route document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Top-level flows, in order
    pub(crate) flows: Vec<Node>,
    /// Auxiliary metadata, carried through edits untouched
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub(crate) metadata: serde_json::Value,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flows(&self) -> &[Node] {
        &self.flows
    }

    pub fn metadata(&self) -> &serde_json::Value {
        &self.metadata
    }

    /// Replace the auxiliary metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Find a node by id, depth-first in pre-order across all flows
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.flows.iter().find_map(|flow| flow.find(id))
    }

    /// Check if a node with the given id exists
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Every node id in the document, in pre-order
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.flows.iter().flat_map(|flow| flow.subtree_ids()).collect()
    }

    /// Set of every node id in the document
    pub fn id_set(&self) -> HashSet<NodeId> {
        self.node_ids().into_iter().collect()
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.flows.iter().map(|flow| flow.descendants().len()).sum()
    }

    /// The flow containing a node (the node itself if it is a flow root)
    pub fn flow_of(&self, id: &str) -> Option<&Node> {
        let path = self.locate(id)?;
        self.flows.get(path.flow)
    }

    /// Parent, slot and index of a node; `None` for flow roots and absent ids
    pub fn location(&self, id: &str) -> Option<Location> {
        let path = self.locate(id)?;
        let parent_path = path.parent()?;
        let parent = self.node_at(&parent_path)?;
        let (slot, index) = path.last_step()?.clone();
        Some(Location {
            parent: parent.id.clone(),
            slot,
            index,
        })
    }

    /// Check if `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        match self.find(ancestor) {
            Some(node) => node.id != *id && node.contains(id),
            None => false,
        }
    }

    pub(crate) fn locate(&self, id: &str) -> Option<NodePath> {
        for (flow_index, flow) in self.flows.iter().enumerate() {
            if flow.id == *id {
                return Some(NodePath {
                    flow: flow_index,
                    steps: Vec::new(),
                });
            }
            let mut steps = Vec::new();
            if flow.find_path(id, &mut steps) {
                return Some(NodePath {
                    flow: flow_index,
                    steps,
                });
            }
        }
        None
    }

    pub(crate) fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let mut node = self.flows.get(path.flow)?;
        for (slot, index) in &path.steps {
            node = node.slots.get(slot)?.get(*index)?;
        }
        Some(node)
    }

    pub(crate) fn node_at_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let mut node = self.flows.get_mut(path.flow)?;
        for (slot, index) in &path.steps {
            node = node.slots.get_mut(slot)?.get_mut(*index)?;
        }
        Some(node)
    }

    /// Detach the node at `path`, returning it
    pub(crate) fn take_at(&mut self, path: &NodePath) -> Option<Node> {
        let Some(parent_path) = path.parent() else {
            if path.flow < self.flows.len() {
                return Some(self.flows.remove(path.flow));
            }
            return None;
        };
        let (slot, index) = path.last_step()?.clone();
        let parent = self.node_at_mut(&parent_path)?;
        let children = parent.slots.get_mut(&slot)?;
        if index >= children.len() {
            return None;
        }
        let node = children.remove(index);
        parent.prune_empty_slots();
        Some(node)
    }
}
