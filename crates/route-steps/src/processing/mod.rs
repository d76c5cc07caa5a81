//! Processing kinds
//!
//! Leaf steps that act on the current message.

mod data_format;
mod logging;
mod message;

pub use data_format::{MarshalStep, UnmarshalStep};
pub use logging::LogStep;
pub use message::{SetBodyStep, SetHeaderStep};
