//! Core traits and types for resqa (result quality assessment)
//!
//! This crate defines the data model shared across the system together with the
//! capability-facing interfaces for link checking, domain authority lookups,
//! duplicate detection, claim verification and assessment storage. Keeping them
//! here lets the orchestrator be tested against fakes and lets real network
//! backed implementations be swapped in without touching the scoring logic.

pub mod authority;
pub mod claim_verifier;
pub mod config;
pub mod duplicate;
pub mod error;
pub mod link_checker;
pub mod store;
pub mod types;

pub use authority::AuthorityChecker;
pub use claim_verifier::ClaimVerifier;
pub use config::{CheckFrequency, QAConfig};
pub use duplicate::DuplicateDetector;
pub use error::{Error, Result};
pub use link_checker::{LinkCheck, LinkChecker};
pub use store::{AssessmentStore, QualityDistribution, QualityStatistics};
pub use types::*;
