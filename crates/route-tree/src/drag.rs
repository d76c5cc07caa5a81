//! Drag-move protocol
//!
//! Turns a finished drag (source dropped on target) into a move. When the
//! target already has children the drop is ambiguous: the source could land
//! beside the target or inside it. Instead of deciding, [`TreeEditor::propose_move`]
//! hands back a [`PendingMove`] and the host asks the user; the answer comes
//! back through [`TreeEditor::resolve_move`]. Nothing is mutated in between.

use serde::{Deserialize, Serialize};

use crate::edit::{Edited, TreeEditor};
use crate::error::{Result, RouteTreeError};
use crate::ids::NodeId;
use crate::shape::NodeRole;
use crate::types::{Document, Node};

/// A drop waiting for the user to pick shift or nest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingMove {
    pub source: NodeId,
    pub target: NodeId,
}

/// The user's answer to a pending move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveChoice {
    /// Place the source right after the target
    Shift,
    /// Append the source to the target's children
    Nest,
    /// Drop the gesture
    Cancel,
}

/// Result of proposing a move
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome {
    /// Dropped on itself
    Unchanged,
    /// Unambiguous drop, already applied
    Applied(Edited),
    /// Needs a [`MoveChoice`] before anything happens
    Pending(PendingMove),
}

impl<'a> TreeEditor<'a> {
    /// Interpret a drop of `source` onto `target`
    pub fn propose_move(&self, doc: &Document, source: &str, target: &str) -> Result<DragOutcome> {
        if source == target {
            return Ok(DragOutcome::Unchanged);
        }
        let source_node = doc
            .find(source)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(source)))?;
        let target_node = doc
            .find(target)
            .ok_or_else(|| RouteTreeError::NotFound(NodeId::from(target)))?;
        if doc.is_ancestor(source, target) {
            return Err(RouteTreeError::CyclicMove {
                node: NodeId::from(source),
                target: NodeId::from(target),
            });
        }

        let target_is_root = self.is_flow_level(doc, target_node);
        if self.is_flow_level(doc, source_node) {
            if !target_is_root {
                log::warn!("Rejected drop of entry '{}' onto step '{}'", source, target);
                return Err(RouteTreeError::illegal_move(
                    source_node.id(),
                    "entry nodes can only be reordered among flows",
                ));
            }
            return self
                .move_node(doc, source, target, false)
                .map(DragOutcome::Applied);
        }

        // Nothing can sit beside a flow root or an entry, so a step dropped there nests
        if target_is_root {
            let nest_target = self.nest_target_at_flow_level(doc, target_node);
            return self
                .move_node(doc, source, nest_target.as_str(), true)
                .map(DragOutcome::Applied);
        }

        let can_nest = self.nest_slot_for(target_node).is_ok();
        if can_nest && self.has_nested_children(target_node) {
            log::debug!("Drop of '{}' onto '{}' needs a shift/nest choice", source, target);
            return Ok(DragOutcome::Pending(PendingMove {
                source: NodeId::from(source),
                target: NodeId::from(target),
            }));
        }

        self.move_node(doc, source, target, false)
            .map(DragOutcome::Applied)
    }

    /// Apply the user's answer to a pending move
    ///
    /// Ids are re-resolved against `doc`, so a pending move whose nodes were
    /// deleted in the meantime fails with `NotFound`. `Cancel` returns `None`.
    pub fn resolve_move(
        &self,
        doc: &Document,
        pending: &PendingMove,
        choice: MoveChoice,
    ) -> Result<Option<Edited>> {
        let as_child = match choice {
            MoveChoice::Cancel => {
                log::debug!("Cancelled move of '{}'", pending.source);
                return Ok(None);
            }
            MoveChoice::Shift => false,
            MoveChoice::Nest => true,
        };
        self.move_node(doc, pending.source.as_str(), pending.target.as_str(), as_child)
            .map(Some)
    }

    /// Flow roots and entry nodes
    fn is_flow_level(&self, doc: &Document, node: &Node) -> bool {
        let is_root = doc.flows().iter().any(|flow| flow.id() == node.id());
        is_root
            || self
                .catalog()
                .shape(node.kind())
                .map(|shape| shape.role == NodeRole::Entry)
                .unwrap_or(false)
    }

    /// A drop on a flow root lands in its entry node
    fn nest_target_at_flow_level(&self, doc: &Document, node: &Node) -> NodeId {
        let is_root = doc.flows().iter().any(|flow| flow.id() == node.id());
        if is_root {
            if let Some(entry) = node.children().next() {
                return entry.id().clone();
            }
        }
        node.id().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{child_ids, sample_document, test_catalog};
    use crate::ids::SequentialIds;

    #[test]
    fn test_drop_on_leaf_shifts() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let outcome = editor.propose_move(&doc, "log-3", "log-1").unwrap();
        let DragOutcome::Applied(edited) = outcome else {
            panic!("expected an applied move");
        };
        assert_eq!(
            child_ids(&edited.document, "from-1", "steps"),
            vec!["log-1", "log-3", "choice-1", "to-2"]
        );
    }

    #[test]
    fn test_drop_on_parent_with_children_is_pending() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let outcome = editor.propose_move(&doc, "log-3", "when-1").unwrap();
        let DragOutcome::Pending(pending) = outcome else {
            panic!("expected a pending move");
        };
        assert_eq!(pending.target, "when-1");

        let nested = editor
            .resolve_move(&doc, &pending, MoveChoice::Nest)
            .unwrap()
            .unwrap();
        assert_eq!(child_ids(&nested.document, "when-1", "steps"), vec!["to-1", "log-3"]);

        let shifted = editor
            .resolve_move(&doc, &pending, MoveChoice::Shift)
            .unwrap()
            .unwrap();
        assert_eq!(
            child_ids(&shifted.document, "choice-1", "when"),
            vec!["when-1", "log-3", "when-2"]
        );

        assert!(editor.resolve_move(&doc, &pending, MoveChoice::Cancel).unwrap().is_none());
    }

    #[test]
    fn test_pending_move_against_newer_document() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let outcome = editor.propose_move(&doc, "log-3", "when-1").unwrap();
        let DragOutcome::Pending(pending) = outcome else {
            panic!("expected a pending move");
        };
        let newer = editor.delete_by_id(&doc, "log-3").unwrap().document;
        assert!(matches!(
            editor.resolve_move(&newer, &pending, MoveChoice::Nest),
            Err(RouteTreeError::NotFound(_))
        ));
    }

    #[test]
    fn test_drop_on_self_and_entry_rules() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        assert_eq!(
            editor.propose_move(&doc, "to-1", "to-1").unwrap(),
            DragOutcome::Unchanged
        );
        assert!(matches!(
            editor.propose_move(&doc, "from-2", "log-1"),
            Err(RouteTreeError::IllegalMove { .. })
        ));

        let outcome = editor.propose_move(&doc, "from-2", "route-1").unwrap();
        let DragOutcome::Applied(edited) = outcome else {
            panic!("expected flows to be reordered");
        };
        assert_eq!(edited.document.flows()[0].id(), "route-1");
        assert_eq!(edited.document.flows()[1].id(), "route-2");

        let outcome = editor.propose_move(&doc, "from-1", "from-2").unwrap();
        let DragOutcome::Applied(edited) = outcome else {
            panic!("expected flows to be reordered");
        };
        assert_eq!(edited.document.flows()[0].id(), "route-2");
    }

    #[test]
    fn test_drop_step_on_entry_nests() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        let outcome = editor.propose_move(&doc, "to-2", "from-2").unwrap();
        let DragOutcome::Applied(edited) = outcome else {
            panic!("expected the step to nest under the entry");
        };
        assert_eq!(child_ids(&edited.document, "from-2", "steps"), vec!["log-3", "to-2"]);

        let outcome = editor.propose_move(&doc, "to-2", "route-2").unwrap();
        let DragOutcome::Applied(edited) = outcome else {
            panic!("expected the step to nest under the entry");
        };
        assert_eq!(child_ids(&edited.document, "from-2", "steps"), vec!["log-3", "to-2"]);
    }

    #[test]
    fn test_drop_into_own_subtree_fails() {
        let catalog = test_catalog();
        let ids = SequentialIds::default();
        let editor = TreeEditor::new(&catalog, &ids);
        let doc = sample_document();

        assert!(matches!(
            editor.propose_move(&doc, "choice-1", "to-1"),
            Err(RouteTreeError::CyclicMove { .. })
        ));
    }
}
