//! Link checker trait and types

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Outcome of a reachability check that got an HTTP answer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkCheck {
    pub valid: bool,
    pub status_code: Option<u16>,
}

impl LinkCheck {
    pub fn valid(status_code: u16) -> Self {
        Self {
            valid: true,
            status_code: Some(status_code),
        }
    }

    pub fn invalid(status_code: u16) -> Self {
        Self {
            valid: false,
            status_code: Some(status_code),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code == Some(404)
    }
}

/// Trait for link reachability checks
///
/// Implementations answer `Ok` whenever the target responded, valid or not.
/// Transport failures are returned as `Error::Network`, timeouts as
/// `Error::Timeout`; the assessor turns both into a `broken_link` issue.
#[async_trait]
pub trait LinkChecker: Send + Sync {
    async fn check(&self, url: &str) -> Result<LinkCheck>;
}
