//! Infrastructure layer - HTTP link checks, authority lookups and storage

pub mod authority;
pub mod link_checker;
pub mod repositories;

pub use authority::*;
pub use link_checker::*;
pub use repositories::*;
