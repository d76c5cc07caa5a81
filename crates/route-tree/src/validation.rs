//! Document validation
//!
//! Edits made through the engine keep documents well formed. Documents
//! loaded from disk or built by hand are checked here before use.

use std::collections::HashSet;

use crate::ids::NodeId;
use crate::shape::{KindShape, NodeRole, ShapeCatalog};
use crate::types::{Document, Node};

/// Validation error with location context
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The same id appears on more than one node
    DuplicateId { node_id: NodeId },
    /// A node's kind is not in the catalog
    UnknownKind { node_id: NodeId, kind: String },
    /// A top-level node is not of a flow kind
    NotAFlow { node_id: NodeId, kind: String },
    /// A flow has nothing in its entry slot
    MissingEntry { flow_id: NodeId },
    /// An entry node sits outside a flow's entry slot
    MisplacedEntry { node_id: NodeId },
    /// A flow kind appears below the top level
    NestedFlow { node_id: NodeId },
    /// Children live in a slot the kind does not declare
    UndeclaredSlot { node_id: NodeId, slot: String },
    /// A single-valued slot holds more than one child
    SlotOverfilled {
        node_id: NodeId,
        slot: String,
        count: usize,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId { node_id } => write!(f, "Duplicate node id '{}'", node_id),
            Self::UnknownKind { node_id, kind } => {
                write!(f, "Unknown kind '{}' for node '{}'", kind, node_id)
            }
            Self::NotAFlow { node_id, kind } => {
                write!(f, "Top-level node '{}' has non-flow kind '{}'", node_id, kind)
            }
            Self::MissingEntry { flow_id } => {
                write!(f, "Flow '{}' has no entry node", flow_id)
            }
            Self::MisplacedEntry { node_id } => {
                write!(f, "Entry node '{}' is outside an entry slot", node_id)
            }
            Self::NestedFlow { node_id } => {
                write!(f, "Flow '{}' is nested inside another node", node_id)
            }
            Self::UndeclaredSlot { node_id, slot } => {
                write!(f, "Node '{}' has children in undeclared slot '{}'", node_id, slot)
            }
            Self::SlotOverfilled {
                node_id,
                slot,
                count,
            } => {
                write!(
                    f,
                    "Single slot '{}' on node '{}' holds {} children",
                    slot, node_id, count
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a document against a shape catalog
///
/// Returns all validation errors found (not just the first).
pub fn validate_document(doc: &Document, catalog: &dyn ShapeCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    validate_unique_ids(doc, &mut errors);
    for flow in doc.flows() {
        validate_flow(flow, catalog, &mut errors);
    }

    if !errors.is_empty() {
        log::debug!("Document failed validation with {} errors", errors.len());
    }
    errors
}

fn validate_unique_ids(doc: &Document, errors: &mut Vec<ValidationError>) {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    for id in doc.node_ids() {
        if !seen.insert(id.clone()) && reported.insert(id.clone()) {
            errors.push(ValidationError::DuplicateId { node_id: id });
        }
    }
}

fn validate_flow(flow: &Node, catalog: &dyn ShapeCatalog, errors: &mut Vec<ValidationError>) {
    let Some(shape) = catalog.shape(flow.kind()) else {
        errors.push(ValidationError::UnknownKind {
            node_id: flow.id().clone(),
            kind: flow.kind().to_string(),
        });
        return;
    };
    if !shape.is_flow() {
        errors.push(ValidationError::NotAFlow {
            node_id: flow.id().clone(),
            kind: flow.kind().to_string(),
        });
    }
    if let Some(entry_slot) = shape.entry_slot() {
        if flow.slot(&entry_slot.name).is_empty() {
            errors.push(ValidationError::MissingEntry {
                flow_id: flow.id().clone(),
            });
        }
    }
    validate_slots(flow, shape, catalog, errors);
}

fn validate_slots(
    node: &Node,
    shape: &KindShape,
    catalog: &dyn ShapeCatalog,
    errors: &mut Vec<ValidationError>,
) {
    for (slot_name, children) in node.slots() {
        let Some(slot) = shape.slot(slot_name) else {
            errors.push(ValidationError::UndeclaredSlot {
                node_id: node.id().clone(),
                slot: slot_name.to_string(),
            });
            continue;
        };
        if !slot.is_multi() && children.len() > 1 {
            errors.push(ValidationError::SlotOverfilled {
                node_id: node.id().clone(),
                slot: slot_name.to_string(),
                count: children.len(),
            });
        }
        for child in children {
            validate_child(child, slot.holds_entry, catalog, errors);
        }
    }
}

fn validate_child(
    node: &Node,
    in_entry_slot: bool,
    catalog: &dyn ShapeCatalog,
    errors: &mut Vec<ValidationError>,
) {
    let Some(shape) = catalog.shape(node.kind()) else {
        errors.push(ValidationError::UnknownKind {
            node_id: node.id().clone(),
            kind: node.kind().to_string(),
        });
        return;
    };
    match shape.role {
        NodeRole::Flow => errors.push(ValidationError::NestedFlow {
            node_id: node.id().clone(),
        }),
        NodeRole::Entry if !in_entry_slot => errors.push(ValidationError::MisplacedEntry {
            node_id: node.id().clone(),
        }),
        _ => {}
    }
    validate_slots(node, shape, catalog, errors);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DocumentBuilder;
    use crate::fixtures::{sample_document, test_catalog};

    #[test]
    fn test_sample_document_is_valid() {
        let errors = validate_document(&sample_document(), &test_catalog());
        assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
    }

    #[test]
    fn test_reports_every_problem() {
        let doc = DocumentBuilder::new()
            .flow("route-1", "route")
            .entry("from-1", "from")
            .step("log-1", "log")
            .step("log-1", "log")
            .step("mystery-1", "mystery")
            .step("from-9", "from")
            .leaf("branches", "to-1", "to")
            .flow("route-2", "route")
            .flow("log-2", "log")
            .build();

        let errors = validate_document(&doc, &test_catalog());
        assert!(errors.contains(&ValidationError::DuplicateId {
            node_id: NodeId::from("log-1")
        }));
        assert!(errors.contains(&ValidationError::UnknownKind {
            node_id: NodeId::from("mystery-1"),
            kind: "mystery".to_string()
        }));
        assert!(errors.contains(&ValidationError::MisplacedEntry {
            node_id: NodeId::from("from-9")
        }));
        assert!(errors.contains(&ValidationError::UndeclaredSlot {
            node_id: NodeId::from("from-1"),
            slot: "branches".to_string()
        }));
        assert!(errors.contains(&ValidationError::MissingEntry {
            flow_id: NodeId::from("route-2")
        }));
        assert!(errors.contains(&ValidationError::NotAFlow {
            node_id: NodeId::from("log-2"),
            kind: "log".to_string()
        }));
    }

    #[test]
    fn test_overfilled_single_slot() {
        let doc = DocumentBuilder::new()
            .flow("route-1", "route")
            .entry("from-1", "from")
            .step_into("choice-1", "choice")
            .leaf("otherwise", "otherwise-1", "otherwise")
            .leaf("otherwise", "otherwise-2", "otherwise")
            .build();

        let errors = validate_document(&doc, &test_catalog());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("holds 2 children"));
    }
}
