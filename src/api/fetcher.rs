//! Remote Data Fetcher
//!
//! Turns an `Endpoint` into parsed JSON: resolves the URL, issues the GET,
//! rejects non-2xx statuses and malformed bodies. Every failure comes back
//! as a `FetchError`; nothing here panics or escapes as a fault.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::endpoint::Endpoint;
use super::transport::Transport;
use crate::config::ApiConfig;
use crate::domain::FetchResult;

pub struct Fetcher {
    transport: Arc<dyn Transport>,
    config: ApiConfig,
}

impl Fetcher {
    pub fn new(transport: Arc<dyn Transport>, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GET an endpoint and parse its body as JSON
    ///
    /// An empty body parses as `Value::Null`.
    pub async fn fetch_value(&self, endpoint: &Endpoint) -> FetchResult<Value> {
        let url = endpoint.url(&self.config);
        log::debug!("[FETCH] GET {}", url);

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("[FETCH] {} unreachable: {}", url, e);
                return Err(e);
            }
        };

        if !response.is_success() {
            log::warn!("[FETCH] {} answered {}", url, response.status);
            return Err(endpoint.status_error(response.status));
        }

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        let value = serde_json::from_slice(&response.body).map_err(|e| {
            log::warn!("[FETCH] {} returned malformed JSON: {}", url, e);
            e
        })?;
        Ok(value)
    }
}

/// Decode a JSON value into the shape an endpoint promises
///
/// `null` from a single-entity endpoint means the entity does not exist.
pub fn decode_for<T: DeserializeOwned>(endpoint: &Endpoint, value: Value) -> FetchResult<T> {
    if value.is_null() && endpoint.is_single() {
        return Err(endpoint.missing());
    }
    Ok(serde_json::from_value(value)?)
}
