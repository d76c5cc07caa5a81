//! Shared catalog and documents for integration tests

#![allow(dead_code)]

use route_tree::{Document, DocumentBuilder, KindShape, NodeRole, ShapeRegistry, SlotShape};

pub fn catalog() -> ShapeRegistry {
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
    for kind in ["when", "otherwise", "split", "filter"] {
        registry.register(
            KindShape::new(kind, kind, NodeRole::Step)
                .with_slot(SlotShape::multi("steps", "Steps")),
        );
    }
    for kind in ["log", "to", "set-body"] {
        registry.register(KindShape::new(kind, kind, NodeRole::Step));
    }
    registry
}

/// route-a
///   from-a
///     log-a
///     split-a [to-a, to-b]
///     set-body-a
/// route-b
///   from-b
///     choice-b
///       when: when-b [log-b]
///     to-c
pub fn document() -> Document {
    DocumentBuilder::new()
        .flow("route-a", "route")
        .entry("from-a", "from")
        .with_data(serde_json::json!({"uri": "timer:tick"}))
        .step("log-a", "log")
        .step_into("split-a", "split")
        .step("to-a", "to")
        .step("to-b", "to")
        .up()
        .step("set-body-a", "set-body")
        .flow("route-b", "route")
        .entry("from-b", "from")
        .step_into("choice-b", "choice")
        .child("when", "when-b", "when")
        .step("log-b", "log")
        .up()
        .up()
        .step("to-c", "to")
        .build()
}

pub fn child_ids(doc: &Document, parent: &str, slot: &str) -> Vec<String> {
    doc.find(parent)
        .map(|node| node.slot(slot).iter().map(|n| n.id().to_string()).collect())
        .unwrap_or_default()
}

/// Every id in the document is distinct
pub fn ids_unique(doc: &Document) -> bool {
    let ids = doc.node_ids();
    let set: std::collections::HashSet<_> = ids.iter().collect();
    set.len() == ids.len()
}
