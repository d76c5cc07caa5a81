//! From Entry
//!
//! The consuming endpoint a route starts from. Its steps run in order for
//! every message the endpoint produces.

use route_tree::{KindShape, NodeRole, ShapeDescriptor, SlotShape};

/// Entry endpoint kind
pub struct FromEntry;

impl FromEntry {
    /// Kind identifier
    pub const KIND: &'static str = "from";
}

impl ShapeDescriptor for FromEntry {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "From", NodeRole::Entry)
            .with_description("Consumes messages from an endpoint uri")
            .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
    }
}

inventory::submit!(route_tree::ShapeFn(FromEntry::shape));
