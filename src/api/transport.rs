//! Transport Layer - Core Trait
//!
//! Abstract GET interface so views can be driven by a real HTTP client or an
//! in-memory stand-in.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::domain::{FetchError, FetchResult};

/// Status line and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues GET requests
///
/// Only failures to obtain a response are errors here; status handling and
/// JSON parsing belong to the `Fetcher`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> FetchResult<RawResponse>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> FetchResult<RawResponse> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(network_error)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;
        Ok(RawResponse::new(status, body.to_vec()))
    }
}

fn network_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Network(format!("Request timed out: {}", err))
    } else {
        FetchError::Network(format!("Failed to fetch: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::ok("[]").is_success());
        assert!(RawResponse::new(204, "").is_success());
        assert!(!RawResponse::new(404, "").is_success());
        assert!(!RawResponse::new(302, "").is_success());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let config = ApiConfig {
            timeout_secs: 2,
            ..Default::default()
        };
        let transport = HttpTransport::new(&config).unwrap();
        // port 9 on loopback: nothing listens, connection is refused
        let result = transport.get("http://127.0.0.1:9/products").await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
