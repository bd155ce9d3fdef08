//! Sans-IO contract for the upstream deck-of-cards API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network. The proxy crate executes the round-trip through its
//! transport, keeping this crate deterministic and testable.
//!
//! # Design
//! - `UpstreamClient` holds only the validated base URL.
//! - Each upstream operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response).
//! - Wire DTOs live in `wire` and never leave this crate's parse methods;
//!   callers only see the camelCase domain model in `types`.

pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod wire;

pub use client::UpstreamClient;
pub use error::{BaseUrlError, UpstreamError};
pub use http::{HttpRequest, HttpResponse};
pub use types::{Card, CardImages, Deck, DrawResult};
