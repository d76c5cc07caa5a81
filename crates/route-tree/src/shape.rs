//! Kind shapes and the shape catalog boundary
//!
//! A node's kind decides which child slots it has and how many children each
//! slot holds. The engine never hardcodes this; it asks a [`ShapeCatalog`].
//!
//! Kinds describe themselves with a [`KindShape`], and built-in kinds are
//! collected at link time through [`ShapeFn`]:
//!
//! ```ignore
//! inventory::submit!(route_tree::ShapeFn(ChoiceStep::shape));
//! ```

use serde::{Deserialize, Serialize};

/// Structural role of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    /// Top-level container of one pipeline
    Flow,
    /// Mandatory first node of a flow
    Entry,
    /// Any other node
    Step,
}

/// How many children a slot holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// At most one child
    Single,
    /// Ordered sequence of children
    Multi,
}

/// Named attachment point for children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotShape {
    /// Slot name, unique within its kind
    pub name: String,
    /// Human-readable label
    pub label: String,
    /// Child capacity
    pub multiplicity: Multiplicity,
    /// Whether this slot carries the flow's entry node
    #[serde(default)]
    pub holds_entry: bool,
}

impl SlotShape {
    /// Create a slot holding at most one child
    pub fn single(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            multiplicity: Multiplicity::Single,
            holds_entry: false,
        }
    }

    /// Create a slot holding an ordered sequence of children
    pub fn multi(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            multiplicity: Multiplicity::Multi,
            holds_entry: false,
        }
    }

    /// Mark this slot as the flow's entry slot
    pub fn entry(mut self) -> Self {
        self.holds_entry = true;
        self
    }

    /// Check if this slot accepts more than one child
    pub fn is_multi(&self) -> bool {
        self.multiplicity == Multiplicity::Multi
    }
}

/// Complete structural description of a node kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindShape {
    /// Unique kind identifier (e.g., "choice")
    pub kind: String,
    /// Human-readable label
    pub label: String,
    /// Description of the kind
    pub description: String,
    /// Structural role
    pub role: NodeRole,
    /// Child slots, in declaration order
    pub slots: Vec<SlotShape>,
}

impl KindShape {
    /// Create a shape with no slots
    pub fn new(kind: impl Into<String>, label: impl Into<String>, role: NodeRole) -> Self {
        Self {
            kind: kind.into(),
            label: label.into(),
            description: String::new(),
            role,
            slots: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a slot
    pub fn with_slot(mut self, slot: SlotShape) -> Self {
        self.slots.push(slot);
        self
    }

    /// Find a slot by name
    pub fn slot(&self, name: &str) -> Option<&SlotShape> {
        self.slots.iter().find(|s| s.name == name)
    }

    /// Check if this kind can contain children at all
    pub fn can_have_children(&self) -> bool {
        !self.slots.is_empty()
    }

    /// First multi-valued slot in declaration order
    pub fn first_multi_slot(&self) -> Option<&SlotShape> {
        self.slots.iter().find(|s| s.is_multi())
    }

    /// The slot holding the entry node (flows only)
    pub fn entry_slot(&self) -> Option<&SlotShape> {
        self.slots.iter().find(|s| s.holds_entry)
    }

    pub fn is_flow(&self) -> bool {
        self.role == NodeRole::Flow
    }

    pub fn is_entry(&self) -> bool {
        self.role == NodeRole::Entry
    }
}

/// Pure lookup from kind to shape
pub trait ShapeCatalog: Send + Sync {
    /// Get the shape of a kind, if the kind is known
    fn shape(&self, kind: &str) -> Option<&KindShape>;
}

/// Trait for step types that describe their own shape
pub trait ShapeDescriptor {
    /// Get the static shape for this kind
    fn shape() -> KindShape
    where
        Self: Sized;
}

/// Link-time registration of a built-in kind
pub struct ShapeFn(pub fn() -> KindShape);

inventory::collect!(ShapeFn);
