//! Error handling blocks
//!
//! `do-try` guards its steps; `do-catch` clauses handle failures in order and
//! an optional `do-finally` always runs last.

use route_tree::{KindShape, NodeRole, ShapeDescriptor, SlotShape};

/// Guarded block kind
pub struct DoTryStep;

impl DoTryStep {
    /// Kind identifier
    pub const KIND: &'static str = "do-try";
    /// Slot for catch clauses
    pub const SLOT_CATCH: &'static str = "doCatch";
    /// Slot for the finally clause
    pub const SLOT_FINALLY: &'static str = "doFinally";
}

impl ShapeDescriptor for DoTryStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Do Try", NodeRole::Step)
            .with_description("Runs its steps and handles their failures")
            .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
            .with_slot(SlotShape::multi(Self::SLOT_CATCH, "Catch"))
            .with_slot(SlotShape::single(Self::SLOT_FINALLY, "Finally"))
    }
}

inventory::submit!(route_tree::ShapeFn(DoTryStep::shape));

/// Catch clause kind
pub struct DoCatchStep;

impl DoCatchStep {
    pub const KIND: &'static str = "do-catch";
}

impl ShapeDescriptor for DoCatchStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Do Catch", NodeRole::Step)
            .with_description("Handles the listed exception types")
            .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
    }
}

inventory::submit!(route_tree::ShapeFn(DoCatchStep::shape));

/// Finally clause kind
pub struct DoFinallyStep;

impl DoFinallyStep {
    pub const KIND: &'static str = "do-finally";
}

impl ShapeDescriptor for DoFinallyStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Do Finally", NodeRole::Step)
            .with_description("Always runs after the guarded steps")
            .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
    }
}

inventory::submit!(route_tree::ShapeFn(DoFinallyStep::shape));
