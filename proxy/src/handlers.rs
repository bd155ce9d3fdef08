//! Inbound deck endpoints.
//!
//! Each handler validates its parameters before any upstream call, then maps
//! the adapter's value-or-absence onto a status code. Absence means 500 for
//! create (there is no id to blame) and 404 for id-scoped operations.

use std::ops::RangeInclusive;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deck_core::{Deck, DrawResult};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::app::AppState;

pub const DECK_COUNT_RANGE: RangeInclusive<i64> = 1..=10;
pub const DRAW_COUNT_RANGE: RangeInclusive<i64> = 1..=52;
const DEFAULT_DECK_COUNT: i64 = 1;
const DEFAULT_DRAW_COUNT: i64 = 2;

/// Error outcomes of the inbound API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 400 with `{"error": ..}`.
    BadRequest(String),
    /// 404 with `{"error": ..}`.
    NotFound(String),
    /// 500 problem body with `detail`.
    Problem(String),
}

/// RFC 7807 style body used for server-side failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemBody {
    pub status: u16,
    pub title: String,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(error) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": error }))).into_response()
            }
            ApiError::NotFound(error) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": error }))).into_response()
            }
            ApiError::Problem(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ProblemBody {
                    status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                    title: "An error occurred while processing your request.".to_string(),
                    detail,
                }),
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeckQuery {
    pub deck_count: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DrawQuery {
    pub count: Option<String>,
}

/// Parse an optional integer query value and check it against `range`.
/// A value that is present but not an integer fails like an out-of-range one.
fn bounded(raw: Option<&str>, default: i64, range: RangeInclusive<i64>) -> Option<u32> {
    let value = match raw {
        None => default,
        Some(raw) => raw.trim().parse::<i64>().ok()?,
    };
    if !range.contains(&value) {
        return None;
    }
    u32::try_from(value).ok()
}

fn require_deck_id(deck_id: &str) -> Result<&str, ApiError> {
    if deck_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Deck ID cannot be empty".to_string()));
    }
    Ok(deck_id)
}

/// Path segments that axum cannot decode (invalid UTF-8) are a bad deck id.
fn deck_id_from(path: Result<Path<String>, PathRejection>) -> Result<String, ApiError> {
    path.map(|Path(deck_id)| deck_id).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected deck id");
        ApiError::BadRequest("Invalid deck ID".to_string())
    })
}

/// An undecodable query string (e.g. a repeated parameter) fails with the
/// same message as an out-of-range value.
fn query_from<T>(query: Result<Query<T>, QueryRejection>, message: &str) -> Result<T, ApiError> {
    query.map(|Query(query)| query).map_err(|rejection| {
        tracing::debug!(error = %rejection, "rejected query string");
        ApiError::BadRequest(message.to_string())
    })
}

fn deck_not_found(deck_id: &str) -> ApiError {
    ApiError::NotFound(format!("Deck '{deck_id}' not found or error occurred"))
}

/// Values carrying the upstream `success` flag.
trait Reported {
    fn succeeded(&self) -> bool;
}

impl Reported for Deck {
    fn succeeded(&self) -> bool {
        self.success
    }
}

impl Reported for DrawResult {
    fn succeeded(&self) -> bool {
        self.success
    }
}

/// Absence is 404 for an id-scoped operation; a value reporting failure is 500.
fn id_scoped_outcome<T: Reported>(deck_id: &str, value: Option<T>, failure: &str) -> Result<T, ApiError> {
    let value = value.ok_or_else(|| deck_not_found(deck_id))?;
    if !value.succeeded() {
        return Err(ApiError::Problem(failure.to_string()));
    }
    Ok(value)
}

const DECK_COUNT_MESSAGE: &str = "Deck count must be between 1 and 10";
const DRAW_COUNT_MESSAGE: &str = "Count must be between 1 and 52";

pub async fn create_deck(
    State(state): State<AppState>,
    query: Result<Query<NewDeckQuery>, QueryRejection>,
) -> Result<Json<Deck>, ApiError> {
    let query = query_from(query, DECK_COUNT_MESSAGE)?;
    let deck_count = bounded(query.deck_count.as_deref(), DEFAULT_DECK_COUNT, DECK_COUNT_RANGE)
        .ok_or_else(|| ApiError::BadRequest(DECK_COUNT_MESSAGE.to_string()))?;

    state
        .deck
        .create_deck(deck_count)
        .await
        .map(Json)
        .ok_or_else(|| ApiError::Problem("Failed to create new deck".to_string()))
}

pub async fn draw_cards(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<DrawQuery>, QueryRejection>,
) -> Result<Json<DrawResult>, ApiError> {
    let deck_id = deck_id_from(path)?;
    let deck_id = require_deck_id(&deck_id)?;
    let query = query_from(query, DRAW_COUNT_MESSAGE)?;
    let count = bounded(query.count.as_deref(), DEFAULT_DRAW_COUNT, DRAW_COUNT_RANGE)
        .ok_or_else(|| ApiError::BadRequest(DRAW_COUNT_MESSAGE.to_string()))?;

    let result = state.deck.draw_cards(deck_id, count).await;
    id_scoped_outcome(deck_id, result, "Failed to draw cards from deck").map(Json)
}

pub async fn draw_five(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<DrawResult>, ApiError> {
    let deck_id = deck_id_from(path)?;
    let deck_id = require_deck_id(&deck_id)?;

    let result = state.deck.draw_five(deck_id).await;
    id_scoped_outcome(deck_id, result, "Failed to draw five cards from deck").map(Json)
}

pub async fn shuffle_deck(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Deck>, ApiError> {
    let deck_id = deck_id_from(path)?;
    let deck_id = require_deck_id(&deck_id)?;

    let deck = state.deck.shuffle_deck(deck_id).await;
    id_scoped_outcome(deck_id, deck, "Failed to shuffle deck").map(Json)
}
