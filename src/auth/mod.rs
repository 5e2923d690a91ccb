// Request identity and cross-cutting HTTP layers

pub mod context;
pub mod middleware;

pub use context::*;
pub use middleware::*;
