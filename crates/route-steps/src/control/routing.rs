//! Routing blocks
//!
//! Steps that decide how many times, and whether, their nested steps run.

use route_tree::{KindShape, NodeRole, ShapeDescriptor, SlotShape};

fn block(kind: &str, label: &str, description: &str) -> KindShape {
    KindShape::new(kind, label, NodeRole::Step)
        .with_description(description)
        .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
}

/// Message filter kind
pub struct FilterStep;

impl FilterStep {
    pub const KIND: &'static str = "filter";
}

impl ShapeDescriptor for FilterStep {
    fn shape() -> KindShape {
        block(Self::KIND, "Filter", "Runs its steps only for matching messages")
    }
}

inventory::submit!(route_tree::ShapeFn(FilterStep::shape));

/// Splitter kind
pub struct SplitStep;

impl SplitStep {
    pub const KIND: &'static str = "split";
}

impl ShapeDescriptor for SplitStep {
    fn shape() -> KindShape {
        block(Self::KIND, "Split", "Runs its steps once per part of the message")
    }
}

inventory::submit!(route_tree::ShapeFn(SplitStep::shape));

/// Multicast kind
pub struct MulticastStep;

impl MulticastStep {
    pub const KIND: &'static str = "multicast";
}

impl ShapeDescriptor for MulticastStep {
    fn shape() -> KindShape {
        block(Self::KIND, "Multicast", "Sends a copy of the message down each step")
    }
}

inventory::submit!(route_tree::ShapeFn(MulticastStep::shape));
