//! HTTP client capability used to execute built requests
//! and a configuration helper for constructing a `reqwest` client

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use reqwest::{Client, Response};

use crate::error::{Error, Result};

/// Anything able to transmit a prepared request and hand back the raw response.
///
/// Timeouts, redirects, TLS and pooling are the implementor's business.
pub trait HttpClient: Send + Sync {
    fn send(&self, request: reqwest::Request) -> BoxFuture<'_, reqwest::Result<Response>>;
}

impl HttpClient for Client {
    fn send(&self, request: reqwest::Request) -> BoxFuture<'_, reqwest::Result<Response>> {
        Box::pin(self.execute(request))
    }
}

impl<C: HttpClient + ?Sized> HttpClient for Arc<C> {
    fn send(&self, request: reqwest::Request) -> BoxFuture<'_, reqwest::Result<Response>> {
        (**self).send(request)
    }
}

/// Configuration for building a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    pub cookie_store: bool,
    pub gzip: bool,
    pub brotli: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_redirects: 10,
            user_agent: format!("request-builder/{}", env!("CARGO_PKG_VERSION")),
            cookie_store: true,
            gzip: true,
            brotli: true,
        }
    }
}

impl HttpClientConfig {
    /// Create a `reqwest::Client` with this configuration
    pub fn build_client(&self) -> Result<Client> {
        log::debug!(
            "Building HTTP client: timeout={:?}, max_redirects={}, user_agent={}",
            self.timeout,
            self.max_redirects,
            self.user_agent
        );

        Client::builder()
            .user_agent(self.user_agent.as_str())
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(self.max_redirects))
            .cookie_store(self.cookie_store)
            .gzip(self.gzip)
            .brotli(self.brotli)
            .build()
            .map_err(Error::ClientBuild)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.starts_with("request-builder/"));
    }

    #[test]
    fn test_build_client_from_config() {
        let config = HttpClientConfig {
            timeout: Duration::from_secs(5),
            max_redirects: 0,
            cookie_store: false,
            ..Default::default()
        };
        assert!(config.build_client().is_ok());
    }
}
