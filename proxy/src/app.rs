//! Router assembly and shared state.

use std::{any::Any, path::PathBuf, sync::Arc};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{self, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, health::HealthRegistry, service::DeckService, status};

/// Shared, immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub deck: Arc<DeckService>,
    pub health: Arc<HealthRegistry>,
    pub log_dir: Option<PathBuf>,
    pub observability: bool,
}

impl AppState {
    pub fn new(deck: DeckService) -> Self {
        Self {
            deck: Arc::new(deck),
            health: Arc::new(HealthRegistry::with_defaults()),
            log_dir: None,
            observability: false,
        }
    }

    pub fn with_health(mut self, registry: HealthRegistry) -> Self {
        self.health = Arc::new(registry);
        self
    }

    pub fn with_log_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.log_dir = dir;
        self
    }

    /// Mount the `/status/*` routes.
    pub fn with_observability(mut self, enabled: bool) -> Self {
        self.observability = enabled;
        self
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/cards/deck/new", get(handlers::create_deck))
        .route("/cards/deck/{deck_id}/draw", get(handlers::draw_cards))
        .route("/cards/deck/{deck_id}/draw-five", get(handlers::draw_five))
        .route("/cards/deck/{deck_id}/shuffle", get(handlers::shuffle_deck))
        .route("/health/live", get(status::live))
        .route("/health/ready", get(status::ready));

    if state.observability {
        router = router
            .route("/status/health", get(status::health))
            .route("/status/logs", get(status::logs));
    }

    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    router
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(internal_error))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

fn internal_error(_panic: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "An internal server error occurred" })),
    )
        .into_response()
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
