//! Choice
//!
//! Content-based router: the first `when` whose predicate matches runs,
//! otherwise the `otherwise` branch does.

use route_tree::{KindShape, NodeRole, ShapeDescriptor, SlotShape};

/// Content-based router kind
pub struct ChoiceStep;

impl ChoiceStep {
    /// Kind identifier
    pub const KIND: &'static str = "choice";
    /// Slot for the ordered predicate branches
    pub const SLOT_WHEN: &'static str = "when";
    /// Slot for the fallback branch
    pub const SLOT_OTHERWISE: &'static str = "otherwise";
}

impl ShapeDescriptor for ChoiceStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Choice", NodeRole::Step)
            .with_description("Routes each message to the first matching branch")
            .with_slot(SlotShape::multi(Self::SLOT_WHEN, "When"))
            .with_slot(SlotShape::single(Self::SLOT_OTHERWISE, "Otherwise"))
    }
}

inventory::submit!(route_tree::ShapeFn(ChoiceStep::shape));

/// Predicate branch of a choice
pub struct WhenStep;

impl WhenStep {
    /// Kind identifier
    pub const KIND: &'static str = "when";
}

impl ShapeDescriptor for WhenStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "When", NodeRole::Step)
            .with_description("Runs its steps when the predicate matches")
            .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
    }
}

inventory::submit!(route_tree::ShapeFn(WhenStep::shape));

/// Fallback branch of a choice
pub struct OtherwiseStep;

impl OtherwiseStep {
    /// Kind identifier
    pub const KIND: &'static str = "otherwise";
}

impl ShapeDescriptor for OtherwiseStep {
    fn shape() -> KindShape {
        KindShape::new(Self::KIND, "Otherwise", NodeRole::Step)
            .with_description("Runs its steps when no branch matched")
            .with_slot(SlotShape::multi(crate::STEPS, "Steps"))
    }
}

inventory::submit!(route_tree::ShapeFn(OtherwiseStep::shape));
