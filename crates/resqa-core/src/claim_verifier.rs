//! Claim verification trait

/// Trait for checking an extracted factual claim against a verification source
pub trait ClaimVerifier: Send + Sync {
    fn verify(&self, claim: &str) -> bool;
}
