//! Liveness, readiness, health report and log tail endpoints.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    app::AppState,
    handlers::ApiError,
    health::{HealthReport, HealthStatus},
    logs::{self, LogTail},
};

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<String>,
}

impl LogsQuery {
    /// Requested line count, clamped. Missing or unparsable values fall back
    /// to the default.
    pub fn limit(&self) -> usize {
        let requested = self
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .unwrap_or(logs::DEFAULT_LIMIT);
        logs::clamp_limit(requested)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogsBody {
    pub logs: Vec<String>,
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<Option<LogTail>> for LogsBody {
    fn from(tail: Option<LogTail>) -> Self {
        match tail {
            Some(tail) => LogsBody {
                logs: tail.lines,
                file: Some(tail.file),
                message: None,
            },
            None => LogsBody {
                logs: Vec::new(),
                file: None,
                message: Some("No log files found".to_string()),
            },
        }
    }
}

pub async fn live() -> impl IntoResponse {
    Json(json!({ "status": HealthStatus::Healthy }))
}

pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.health.report().await;
    let status = match report.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(report))
}

pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.health.report().await)
}

pub async fn logs(
    State(state): State<AppState>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<LogsBody>, ApiError> {
    let limit = match query {
        Ok(Query(query)) => query.limit(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected log query, using default limit");
            logs::clamp_limit(logs::DEFAULT_LIMIT)
        }
    };
    let Some(dir) = state.log_dir.clone() else {
        return Ok(Json(LogsBody::from(None)));
    };

    let tail = tokio::task::spawn_blocking(move || logs::tail_latest(&dir, limit))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "log tail task failed");
            ApiError::Problem("Failed to read log file".to_string())
        })?
        .map_err(|err| {
            tracing::error!(error = %err, "failed to read log file");
            ApiError::Problem("Failed to read log file".to_string())
        })?;
    Ok(Json(LogsBody::from(tail)))
}
