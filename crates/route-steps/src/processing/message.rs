//! Message setters

use route_tree::{KindShape, NodeRole, ShapeDescriptor};

/// Header setter kind
pub struct SetHeaderStep;

impl SetHeaderStep {
    pub const KIND: &'static str = "set-header";
}

impl ShapeDescriptor for SetHeaderStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Set Header", NodeRole::Step)
            .with_description("Sets a header from an expression")
    }
}

inventory::submit!(route_tree::ShapeFn(SetHeaderStep::shape));

/// Body setter kind
pub struct SetBodyStep;

impl SetBodyStep {
    pub const KIND: &'static str = "set-body";
}

impl ShapeDescriptor for SetBodyStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Set Body", NodeRole::Step)
            .with_description("Replaces the body with an expression")
    }
}

inventory::submit!(route_tree::ShapeFn(SetBodyStep::shape));
