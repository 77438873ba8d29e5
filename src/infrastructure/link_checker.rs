//! HTTP-backed link checker

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use resqa_core::{Error, LinkCheck, LinkChecker, Result};

const USER_AGENT: &str = concat!("resqa-link-checker/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 5;

/// Checks reachability with a `HEAD` request, retrying as `GET` for servers
/// that refuse `HEAD`. Redirects are followed; 2xx and 3xx count as valid.
pub struct HttpLinkChecker {
    client: Client,
}

impl HttpLinkChecker {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { client })
    }

    /// Use a preconfigured client (proxy settings, TLS roots, ...)
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn status(&self, method: Method, url: &str) -> Result<StatusCode> {
        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(map_request_error)?;
        Ok(response.status())
    }
}

#[async_trait]
impl LinkChecker for HttpLinkChecker {
    async fn check(&self, url: &str) -> Result<LinkCheck> {
        Url::parse(url).map_err(|e| Error::InvalidInput(format!("malformed url '{}': {}", url, e)))?;

        let mut status = self.status(Method::HEAD, url).await?;
        if status == StatusCode::METHOD_NOT_ALLOWED || status == StatusCode::NOT_IMPLEMENTED {
            status = self.status(Method::GET, url).await?;
        }

        debug!(url, status = status.as_u16(), "Link checked");

        if status.is_success() || status.is_redirection() {
            Ok(LinkCheck::valid(status.as_u16()))
        } else {
            Ok(LinkCheck::invalid(status.as_u16()))
        }
    }
}

fn map_request_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout(format!("link unreachable: {}", err))
    } else {
        Error::Network(err.to_string())
    }
}
