//! Backend proxy for the deck-of-cards API.
//!
//! # Overview
//! Exposes `/cards/deck/*` endpoints to a front end, forwards them to the
//! upstream deck API and remaps the upstream snake_case JSON onto the
//! camelCase model from `deck-core`.
//!
//! # Design
//! - `handlers` validates inbound parameters before any upstream call.
//! - `service::DeckService` is the only component that talks upstream. It
//!   reports every failure class as absence and logs the precise cause.
//! - `transport::Transport` is the network seam; tests plug their own in.
//! - `health`, `logs` and `status` hold the operational endpoints.

pub mod app;
pub mod config;
pub mod handlers;
pub mod health;
pub mod logging;
pub mod logs;
pub mod service;
pub mod status;
pub mod transport;

pub use app::{app, run, AppState};
pub use config::{Args, Config};
pub use service::DeckService;
pub use transport::{ReqwestTransport, Transport};
