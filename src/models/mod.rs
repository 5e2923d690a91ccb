// Domain records and request validation

pub mod program;
pub mod journal;
pub mod vital;
pub mod validation;

pub use program::*;
pub use journal::*;
pub use vital::*;
pub use validation::*;
