//! Shared test fixtures: a small kind catalog and a two-flow document.

use crate::builder::DocumentBuilder;
use crate::registry::ShapeRegistry;
use crate::shape::{KindShape, NodeRole, SlotShape};
use crate::types::Document;

pub(crate) fn test_catalog() -> ShapeRegistry {
    let mut registry = ShapeRegistry::new();
    registry.register(
        KindShape::new("route", "Route", NodeRole::Flow)
            .with_slot(SlotShape::single("from", "From").entry()),
    );
    registry.register(
        KindShape::new("from", "From", NodeRole::Entry)
            .with_slot(SlotShape::multi("steps", "Steps")),
    );
    registry.register(
        KindShape::new("choice", "Choice", NodeRole::Step)
            .with_slot(SlotShape::multi("when", "When"))
            .with_slot(SlotShape::single("otherwise", "Otherwise")),
    );
    for kind in ["when", "otherwise", "filter"] {
        registry.register(
            KindShape::new(kind, kind, NodeRole::Step)
                .with_slot(SlotShape::multi("steps", "Steps")),
        );
    }
    for kind in ["log", "to"] {
        registry.register(KindShape::new(kind, kind, NodeRole::Step));
    }
    registry
}

/// route-1
///   from-1
///     log-1
///     choice-1
///       when: when-1 [to-1], when-2
///       otherwise: otherwise-1 [log-2]
///     to-2
/// route-2
///   from-2
///     log-3
pub(crate) fn sample_document() -> Document {
    DocumentBuilder::new()
        .flow("route-1", "route")
        .entry("from-1", "from")
        .step("log-1", "log")
        .step_into("choice-1", "choice")
        .child("when", "when-1", "when")
        .step("to-1", "to")
        .up()
        .leaf("when", "when-2", "when")
        .child("otherwise", "otherwise-1", "otherwise")
        .step("log-2", "log")
        .up()
        .up()
        .step("to-2", "to")
        .flow("route-2", "route")
        .entry("from-2", "from")
        .step("log-3", "log")
        .build()
}

pub(crate) fn child_ids(doc: &Document, parent: &str, slot: &str) -> Vec<String> {
    doc.find(parent)
        .map(|node| node.slot(slot).iter().map(|n| n.id().to_string()).collect())
        .unwrap_or_default()
}
