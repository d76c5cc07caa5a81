//! Clipboard controller
//!
//! Copy takes deep snapshots of the selected subtrees with their ids intact.
//! Every paste then hands out fresh ids, so the same clipboard can be pasted
//! any number of times without two nodes ever sharing an id.

use serde::{Deserialize, Serialize};

use crate::edit::{Edited, TreeEditor};
use crate::error::{Result, RouteTreeError};
use crate::ids::NodeId;
use crate::shape::NodeRole;
use crate::types::{Document, Node, Position};

/// Copied subtrees, in selection order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clipboard {
    items: Vec<Node>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the subtrees rooted at `selection`
    ///
    /// Ids that do not resolve are skipped.
    pub fn copy(doc: &Document, selection: &[NodeId]) -> Self {
        let items: Vec<_> = selection
            .iter()
            .filter_map(|id| doc.find(id.as_str()).cloned())
            .collect();
        log::debug!("Copied {} of {} selected nodes", items.len(), selection.len());
        Self { items }
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<'a> TreeEditor<'a> {
    /// Paste the clipboard relative to the current selection
    ///
    /// - A single copied entry node becomes a new flow of `flow_kind`,
    ///   appended to the document.
    /// - A single copied flow is appended to the document.
    /// - Anything else needs exactly one selected step; the copies land right
    ///   after it, in clipboard order, in the same slot.
    pub fn paste(
        &self,
        doc: &Document,
        clipboard: &Clipboard,
        selection: &[NodeId],
        flow_kind: &str,
    ) -> Result<Edited> {
        if clipboard.is_empty() {
            return Ok(Edited::unchanged(doc));
        }

        if let [item] = clipboard.items() {
            match self.catalog().shape(item.kind()).map(|shape| shape.role) {
                Some(NodeRole::Entry) => {
                    let mut entry = item.clone();
                    self.regenerate_ids(&mut entry);
                    let flow = self.wrap_entry(flow_kind, entry)?;
                    log::debug!("Pasting entry as new flow '{}'", flow.id());
                    return self.add_flow(doc, flow, Position::Append);
                }
                Some(NodeRole::Flow) => {
                    let mut flow = item.clone();
                    self.regenerate_ids(&mut flow);
                    return self.add_flow(doc, flow, Position::Append);
                }
                _ => {}
            }
        }

        let [anchor] = selection else {
            return Err(RouteTreeError::AmbiguousPasteTarget {
                selected: selection.len(),
            });
        };
        if !doc.contains(anchor.as_str()) {
            return Err(RouteTreeError::NotFound(anchor.clone()));
        }
        let location = doc
            .location(anchor.as_str())
            .ok_or(RouteTreeError::AmbiguousPasteTarget { selected: 1 })?;

        // Inserting each copy directly after the anchor in reverse keeps clipboard order
        let mut current = doc.clone();
        let mut changes = Vec::with_capacity(clipboard.len());
        for item in clipboard.items().iter().rev() {
            let mut copy = item.clone();
            self.regenerate_ids(&mut copy);
            let edited = self.add_node(
                &current,
                copy,
                location.parent.as_str(),
                &location.slot,
                Position::After(anchor.clone()),
            )?;
            current = edited.document;
            changes.extend(edited.changes);
        }
        changes.reverse();

        log::debug!("Pasted {} nodes after '{}'", clipboard.len(), anchor);
        Ok(Edited {
            document: current,
            changes,
        })
    }
}
