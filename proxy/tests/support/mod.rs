//! Transports injected into `DeckService` by the integration tests.

#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use deck_core::{HttpRequest, HttpResponse, UpstreamClient, UpstreamError};
use deck_proxy::{AppState, DeckService, Transport};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const BASE_URL: &str = "http://upstream.test/api/";

/// Serves requests from an in-process `mock_upstream::app()` without a socket.
pub struct InProcessUpstream {
    router: Router,
    calls: AtomicUsize,
}

impl InProcessUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            router: mock_upstream::app(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for InProcessUpstream {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let inbound = Request::builder()
            .uri(request.url.as_str())
            .body(Body::empty())
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let response = self
            .router
            .clone()
            .oneshot(inbound)
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?
            .to_bytes();
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Returns the same canned outcome for every call, optionally after a delay,
/// and records the URLs it was asked for.
pub struct Canned {
    outcome: fn() -> Result<HttpResponse, UpstreamError>,
    delay: Option<Duration>,
    urls: std::sync::Mutex<Vec<String>>,
}

impl Canned {
    pub fn new(outcome: fn() -> Result<HttpResponse, UpstreamError>) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            delay: None,
            urls: Default::default(),
        })
    }

    pub fn delayed(outcome: fn() -> Result<HttpResponse, UpstreamError>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            delay: Some(delay),
            urls: Default::default(),
        })
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for Canned {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, UpstreamError> {
        self.urls.lock().unwrap().push(request.url);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.outcome)()
    }
}

/// Never answers in time. Records whether `execute` started, finished, and
/// whether its future was dropped.
#[derive(Default)]
pub struct Stalled {
    pub started: Arc<AtomicBool>,
    pub completed: Arc<AtomicBool>,
    pub dropped: Arc<AtomicBool>,
}

struct SetOnDrop(Arc<AtomicBool>);

impl Drop for SetOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for Stalled {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, UpstreamError> {
        let _guard = SetOnDrop(self.dropped.clone());
        self.started.store(true, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        self.completed.store(true, Ordering::SeqCst);
        json_ok(r#"{"success":true,"deck_id":"abc","shuffled":true,"remaining":52}"#)
    }
}

/// Panics inside the request path.
pub struct Panicking;

#[async_trait]
impl Transport for Panicking {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, UpstreamError> {
        panic!("transport exploded");
    }
}

pub fn json_ok(body: &'static str) -> Result<HttpResponse, UpstreamError> {
    Ok(HttpResponse {
        status: 200,
        headers: Vec::new(),
        body: body.to_string(),
    })
}

pub fn state_with(transport: Arc<dyn Transport>, timeout: Duration) -> AppState {
    let client = UpstreamClient::new(BASE_URL).unwrap();
    AppState::new(DeckService::new(client, transport, timeout))
}

pub fn state(transport: Arc<dyn Transport>) -> AppState {
    state_with(transport, Duration::from_secs(5))
}

pub async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
