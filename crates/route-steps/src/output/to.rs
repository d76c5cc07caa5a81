//! To
//!
//! Sends the message to a producing endpoint uri.

use route_tree::{KindShape, NodeRole, ShapeDescriptor};

/// Producer endpoint kind
pub struct ToStep;

impl ToStep {
    pub const KIND: &'static str = "to";
}

impl ShapeDescriptor for ToStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "To", NodeRole::Step)
            .with_description("Sends the message to an endpoint uri")
    }
}

inventory::submit!(route_tree::ShapeFn(ToStep::shape));
