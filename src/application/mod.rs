//! Application layer - assessment orchestration and use cases

pub mod assessor;
pub mod use_cases;

pub use assessor::*;
pub use use_cases::*;
