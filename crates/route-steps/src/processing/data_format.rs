//! Data format conversion
//!
//! Marshal turns the body into a wire format; unmarshal parses it back.

use route_tree::{KindShape, NodeRole, ShapeDescriptor};

/// Marshal kind
pub struct MarshalStep;

impl MarshalStep {
    pub const KIND: &'static str = "marshal";
}

impl ShapeDescriptor for MarshalStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Marshal", NodeRole::Step)
            .with_description("Encodes the body with a data format")
    }
}

inventory::submit!(route_tree::ShapeFn(MarshalStep::shape));

/// Unmarshal kind
pub struct UnmarshalStep;

impl UnmarshalStep {
    pub const KIND: &'static str = "unmarshal";
}

impl ShapeDescriptor for UnmarshalStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Unmarshal", NodeRole::Step)
            .with_description("Decodes the body with a data format")
    }
}

inventory::submit!(route_tree::ShapeFn(UnmarshalStep::shape));
