//! Domain authority trait

use async_trait::async_trait;

use crate::Result;

/// Raw authority scores below this mark the source as low quality
pub const LOW_AUTHORITY_THRESHOLD: f64 = 30.0;

/// Trait for domain reputation lookups (e.g. a reputation API or a static table)
#[async_trait]
pub trait AuthorityChecker: Send + Sync {
    /// Authority of `host` on a 0-100 scale
    async fn authority(&self, host: &str) -> Result<f64>;
}
