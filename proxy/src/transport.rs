//! Outbound transport boundary.
//!
//! `DeckService` never talks to the network directly; it hands the
//! `HttpRequest` built by `deck-core` to a `Transport`. Production uses
//! `ReqwestTransport`; tests register their own implementation.

use std::time::Duration;

use async_trait::async_trait;
use deck_core::{HttpRequest, HttpResponse, UpstreamError};

/// Executes one upstream round-trip.
///
/// Implementations must be shareable across concurrent requests and must
/// report non-2xx statuses as data, not as errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, UpstreamError>;
}

/// `reqwest`-backed transport over a single pooled client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }

    fn classify(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, UpstreamError> {
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
