//! Control kinds
//!
//! Blocks that branch, fan out or guard nested steps.

mod choice;
mod error_handling;
mod routing;

pub use choice::{ChoiceStep, OtherwiseStep, WhenStep};
pub use error_handling::{DoCatchStep, DoFinallyStep, DoTryStep};
pub use routing::{FilterStep, MulticastStep, SplitStep};
