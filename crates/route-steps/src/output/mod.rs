//! Output kinds
//!
//! Steps that send the message to an endpoint.

mod to;

pub use to::ToStep;
