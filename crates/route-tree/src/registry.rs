//! Kind registry backing the shape catalog
//!
//! Maps kind strings to their [`KindShape`]. Built-in kinds register
//! themselves at link time (see [`crate::shape::ShapeFn`]); hosts can add or
//! override kinds at runtime.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = ShapeRegistry::with_builtins();
//! registry.register(MyStep::shape());
//! let editor = TreeEditor::new(&registry, &UuidIds);
//! ```

use std::collections::HashMap;

use crate::shape::{KindShape, NodeRole, ShapeCatalog, ShapeFn};

/// Registry of node kinds and their shapes
///
/// # Composability
///
/// Registries can be composed by merging:
/// ```ignore
/// let mut registry = ShapeRegistry::with_builtins();
/// registry.merge(plugin_registry); // Add plugin kinds
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    entries: HashMap<String, KindShape>,
}

impl ShapeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create a registry holding every kind submitted via `inventory`
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for shape_fn in inventory::iter::<ShapeFn> {
            registry.register((shape_fn.0)());
        }
        log::debug!("Collected {} built-in kinds", registry.entries.len());
        registry
    }

    /// Register a kind, replacing any previous shape for it
    pub fn register(&mut self, shape: KindShape) {
        if let Some(previous) = self.entries.insert(shape.kind.clone(), shape) {
            log::debug!("Replaced shape for kind '{}'", previous.kind);
        }
    }

    /// Check if a kind is registered
    pub fn has_kind(&self, kind: &str) -> bool {
        self.entries.contains_key(kind)
    }

    /// List all registered kind strings
    pub fn kinds(&self) -> Vec<&str> {
        self.entries.keys().map(|s| s.as_str()).collect()
    }

    /// Get all registered shapes
    pub fn all_shapes(&self) -> Vec<&KindShape> {
        self.entries.values().collect()
    }

    /// Get shapes grouped by structural role
    pub fn shapes_by_role(&self) -> HashMap<NodeRole, Vec<&KindShape>> {
        let mut grouped: HashMap<NodeRole, Vec<&KindShape>> = HashMap::new();
        for shape in self.entries.values() {
            grouped.entry(shape.role).or_default().push(shape);
        }
        grouped
    }

    /// Merge another registry into this one
    ///
    /// Entries from `other` override entries in `self` if they share the same kind.
    pub fn merge(&mut self, other: ShapeRegistry) {
        self.entries.extend(other.entries);
    }
}

impl ShapeCatalog for ShapeRegistry {
    fn shape(&self, kind: &str) -> Option<&KindShape> {
        self.entries.get(kind)
    }
}
