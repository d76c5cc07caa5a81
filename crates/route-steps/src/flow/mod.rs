//! Flow kinds
//!
//! The route container and the endpoint that starts it.

mod from;
mod route;

pub use from::FromEntry;
pub use route::RouteFlow;
