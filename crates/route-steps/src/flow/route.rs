//! Route Flow
//!
//! Top-level container of one pipeline. Holds exactly one entry node.

use route_tree::{KindShape, NodeRole, ShapeDescriptor, SlotShape};

/// Route flow kind
pub struct RouteFlow;

impl RouteFlow {
    /// Kind identifier
    pub const KIND: &'static str = "route";
    /// Slot holding the entry endpoint
    pub const SLOT_FROM: &'static str = "from";
}

impl ShapeDescriptor for RouteFlow {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Route", NodeRole::Flow)
            .with_description("A single integration route")
            .with_slot(SlotShape::single(Self::SLOT_FROM, "From").entry())
    }
}

inventory::submit!(route_tree::ShapeFn(RouteFlow::shape));
