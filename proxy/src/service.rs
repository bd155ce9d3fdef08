//! Upstream client adapter.
//!
//! # Design
//! Every operation funnels through `fetch`: build the request with
//! `UpstreamClient`, execute it through the `Transport` under the configured
//! timeout, and parse. Any `UpstreamError` is logged with its kind and then
//! collapsed to `None`, so handlers only ever see a value or its absence.
//! There are no retries.

use std::{sync::Arc, time::Duration};

use deck_core::{Deck, DrawResult, HttpRequest, HttpResponse, UpstreamClient, UpstreamError};
use tracing::{info, info_span, Instrument};

use crate::transport::Transport;

pub const DRAW_FIVE: u32 = 5;

pub struct DeckService {
    client: UpstreamClient,
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl DeckService {
    pub fn new(client: UpstreamClient, transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self {
            client,
            transport,
            timeout,
        }
    }

    /// Create a new shuffled deck made of `deck_count` standard decks.
    pub async fn create_deck(&self, deck_count: u32) -> Option<Deck> {
        let span = info_span!("upstream", op = "create_deck", deck_count);
        async {
            info!("creating new deck");
            let request = self.client.build_new_deck(deck_count);
            self.fetch(request, |r| self.client.parse_deck(r)).await
        }
        .instrument(span)
        .await
    }

    pub async fn draw_cards(&self, deck_id: &str, count: u32) -> Option<DrawResult> {
        let span = info_span!("upstream", op = "draw_cards", deck_id, count);
        async {
            info!("drawing cards");
            let request = self.client.build_draw(deck_id, count);
            self.fetch(request, |r| self.client.parse_draw(r)).await
        }
        .instrument(span)
        .await
    }

    pub async fn draw_five(&self, deck_id: &str) -> Option<DrawResult> {
        self.draw_cards(deck_id, DRAW_FIVE).await
    }

    pub async fn shuffle_deck(&self, deck_id: &str) -> Option<Deck> {
        let span = info_span!("upstream", op = "shuffle_deck", deck_id);
        async {
            info!("shuffling deck");
            let request = self.client.build_shuffle(deck_id);
            self.fetch(request, |r| self.client.parse_deck(r)).await
        }
        .instrument(span)
        .await
    }

    async fn fetch<T>(
        &self,
        request: HttpRequest,
        parse: impl FnOnce(HttpResponse) -> Result<T, UpstreamError>,
    ) -> Option<T> {
        match self.round_trip(request).await.and_then(parse) {
            Ok(value) => Some(value),
            Err(err) => {
                match &err {
                    UpstreamError::Status { status, .. } => {
                        tracing::warn!(kind = err.kind(), status, "upstream returned an error status")
                    }
                    UpstreamError::Rejected(_) => {
                        tracing::warn!(kind = err.kind(), error = %err, "upstream rejected the request")
                    }
                    _ => tracing::error!(kind = err.kind(), error = %err, "upstream call failed"),
                }
                None
            }
        }
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, UpstreamError> {
        tokio::time::timeout(self.timeout, self.transport.execute(request))
            .await
            .map_err(|_| UpstreamError::Timeout(self.timeout))?
    }
}
