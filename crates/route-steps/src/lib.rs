//! Route Steps
//!
//! Built-in node kinds for the route-tree editing engine.
//! Each kind describes its own shape (role and child slots) and registers it
//! at link time, so `ShapeRegistry::with_builtins()` picks it up.
//!
//! # Categories
//!
//! - **Flow**: The top-level route and its entry endpoint
//! - **Control**: Branching, splitting and error-handling blocks
//! - **Processing**: Steps that act on the message in place
//! - **Output**: Steps that hand the message to an endpoint

pub mod control;
pub mod flow;
pub mod output;
pub mod processing;

// Re-export all kinds for convenience
pub use control::*;
pub use flow::*;
pub use output::*;
pub use processing::*;

use route_tree::ShapeRegistry;

/// Slot name for a sequence of nested steps
pub const STEPS: &str = "steps";

/// Registry holding every built-in kind
pub fn builtin_catalog() -> ShapeRegistry {
    let registry = ShapeRegistry::with_builtins();
    log::info!("Loaded {} built-in route kinds", registry.kinds().len());
    registry
}
