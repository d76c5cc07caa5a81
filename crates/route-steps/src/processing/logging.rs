//! Log
//!
//! Writes a message to the route's log.

use route_tree::{KindShape, NodeRole, ShapeDescriptor};

/// Log step kind
pub struct LogStep;

impl LogStep {
    pub const KIND: &'static str = "log";
}

impl ShapeDescriptor for LogStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Log", NodeRole::Step)
            .with_description("Logs a message built from the exchange")
    }
}

inventory::submit!(route_tree::ShapeFn(LogStep::shape));
