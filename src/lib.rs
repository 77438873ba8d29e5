//! resqa - result quality assessment
//!
//! Scores retrieved results (search hits, fetched documents) across seven
//! quality dimensions, records the defects found along the way and keeps the
//! latest verdict per result so callers can filter, triage and schedule
//! re-checks.

pub mod analysis;
pub mod application;
pub mod cli;
pub mod infrastructure;
pub mod logging;

pub use application::{Freshness, QualityAssessor, QualityReport};
pub use infrastructure::{HttpLinkChecker, InMemoryAssessmentStore, StaticAuthorityChecker};
pub use resqa_core::*;
