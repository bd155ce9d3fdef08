//! Stateless request builder and response parser for the upstream deck API.
//!
//! # Design
//! `UpstreamClient` holds only a base URL and carries no mutable state
//! between calls. Each upstream operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{BaseUrlError, UpstreamError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Deck, DrawResult};
use crate::wire::{UpstreamDeck, UpstreamDraw, UpstreamStatus};

pub const USER_AGENT: &str = "DeckOfCardsAPI/1.0";

/// Synchronous, stateless client for the upstream deck API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    base_url: Url,
}

impl UpstreamClient {
    /// Parse and validate `base_url`, e.g. `https://deckofcardsapi.com/api/`.
    pub fn new(base_url: &str) -> Result<Self, BaseUrlError> {
        let base_url = Url::parse(base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(BaseUrlError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET {base}/deck/new/shuffle/?deck_count={n}`
    pub fn build_new_deck(&self, deck_count: u32) -> HttpRequest {
        let mut url = self.endpoint(&["deck", "new", "shuffle", ""]);
        url.query_pairs_mut()
            .append_pair("deck_count", &deck_count.to_string());
        request(url)
    }

    /// `GET {base}/deck/{id}/draw/?count={n}`
    pub fn build_draw(&self, deck_id: &str, count: u32) -> HttpRequest {
        let mut url = self.endpoint(&["deck", deck_id, "draw", ""]);
        url.query_pairs_mut().append_pair("count", &count.to_string());
        request(url)
    }

    /// `GET {base}/deck/{id}/shuffle/`
    pub fn build_shuffle(&self, deck_id: &str) -> HttpRequest {
        request(self.endpoint(&["deck", deck_id, "shuffle", ""]))
    }

    /// Parse the body of the new-deck or shuffle endpoint.
    pub fn parse_deck(&self, response: HttpResponse) -> Result<Deck, UpstreamError> {
        decode::<UpstreamDeck>(response).map(Deck::from)
    }

    /// Parse the body of the draw endpoint.
    pub fn parse_draw(&self, response: HttpResponse) -> Result<DrawResult, UpstreamError> {
        decode::<UpstreamDraw>(response).map(DrawResult::from)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn request(url: Url) -> HttpRequest {
    HttpRequest {
        url: url.into(),
        headers: vec![
            ("user-agent".to_string(), USER_AGENT.to_string()),
            ("accept".to_string(), "application/json".to_string()),
        ],
    }
}

/// Status check, then the `success` flag, then the full wire shape.
fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, UpstreamError> {
    if !response.is_success() {
        return Err(UpstreamError::Status {
            status: response.status,
            body: response.body,
        });
    }
    let status: UpstreamStatus = serde_json::from_str(&response.body)
        .map_err(|e| UpstreamError::Malformed(e.to_string()))?;
    if !status.success {
        return Err(UpstreamError::Rejected(status.error));
    }
    serde_json::from_str(&response.body).map_err(|e| UpstreamError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UpstreamClient {
        UpstreamClient::new("https://deckofcardsapi.com/api/").unwrap()
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_new_deck_produces_correct_request() {
        let req = client().build_new_deck(3);
        assert_eq!(req.url, "https://deckofcardsapi.com/api/deck/new/shuffle/?deck_count=3");
        assert!(req
            .headers
            .contains(&("user-agent".to_string(), "DeckOfCardsAPI/1.0".to_string())));
    }

    #[test]
    fn build_draw_produces_correct_request() {
        let req = client().build_draw("kxozasf3edqu", 2);
        assert_eq!(req.url, "https://deckofcardsapi.com/api/deck/kxozasf3edqu/draw/?count=2");
    }

    #[test]
    fn build_shuffle_produces_correct_request() {
        let req = client().build_shuffle("kxozasf3edqu");
        assert_eq!(req.url, "https://deckofcardsapi.com/api/deck/kxozasf3edqu/shuffle/");
    }

    #[test]
    fn base_without_trailing_slash_is_joined() {
        let client = UpstreamClient::new("http://localhost:3000/api").unwrap();
        let req = client.build_shuffle("abc");
        assert_eq!(req.url, "http://localhost:3000/api/deck/abc/shuffle/");

        let client = UpstreamClient::new("http://localhost:3000").unwrap();
        let req = client.build_shuffle("abc");
        assert_eq!(req.url, "http://localhost:3000/deck/abc/shuffle/");
    }

    #[test]
    fn deck_id_is_encoded_as_a_single_segment() {
        let req = client().build_draw("../new/shuffle", 1);
        assert_eq!(
            req.url,
            "https://deckofcardsapi.com/api/deck/..%2Fnew%2Fshuffle/draw/?count=1"
        );
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(
            UpstreamClient::new("ftp://example.com/"),
            Err(BaseUrlError::UnsupportedScheme(_))
        ));
        assert!(matches!(UpstreamClient::new("not a url"), Err(BaseUrlError::Parse(_))));
    }

    #[test]
    fn parse_deck_success() {
        let deck = client()
            .parse_deck(ok(r#"{"success":true,"deck_id":"abc","shuffled":true,"remaining":52}"#))
            .unwrap();
        assert_eq!(
            deck,
            Deck {
                success: true,
                deck_id: "abc".to_string(),
                shuffled: true,
                remaining: 52,
            }
        );
    }

    #[test]
    fn parse_deck_not_found() {
        let response = HttpResponse {
            status: 404,
            headers: Vec::new(),
            body: r#"{"success":false,"error":"Deck ID does not exist."}"#.to_string(),
        };
        let err = client().parse_deck(response).unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 404, .. }));
    }

    #[test]
    fn parse_deck_rejected_without_payload() {
        let err = client()
            .parse_deck(ok(r#"{"success":false,"error":"Deck ID does not exist."}"#))
            .unwrap_err();
        match err {
            UpstreamError::Rejected(reason) => {
                assert_eq!(reason.as_deref(), Some("Deck ID does not exist."))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_deck_bad_json() {
        let err = client().parse_deck(ok("<html>oops</html>")).unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
    }

    #[test]
    fn parse_deck_missing_field() {
        let err = client()
            .parse_deck(ok(r#"{"success":true,"shuffled":true,"remaining":52}"#))
            .unwrap_err();
        assert!(matches!(err, UpstreamError::Malformed(_)));
    }

    #[test]
    fn parse_draw_success() {
        let result = client()
            .parse_draw(ok(r#"{
                "success": true,
                "deck_id": "abc",
                "cards": [{"code":"KH","image":"https://deckofcardsapi.com/static/img/KH.png",
                           "images":{"svg":"https://deckofcardsapi.com/static/img/KH.svg",
                                     "png":"https://deckofcardsapi.com/static/img/KH.png"},
                           "value":"KING","suit":"HEARTS"}],
                "remaining": 51
            }"#))
            .unwrap();
        assert_eq!(result.cards.len(), 1);
        assert_eq!(result.cards[0].value, "KING");
        assert_eq!(result.remaining, 51);
    }

    #[test]
    fn parse_draw_passes_short_draw_through() {
        let result = client()
            .parse_draw(ok(r#"{"success":true,"deck_id":"abc","cards":[],"remaining":0}"#))
            .unwrap();
        assert!(result.cards.is_empty());
        assert_eq!(result.remaining, 0);
    }

    #[test]
    fn parse_draw_server_error() {
        let response = HttpResponse {
            status: 502,
            headers: Vec::new(),
            body: "bad gateway".to_string(),
        };
        let err = client().parse_draw(response).unwrap_err();
        assert!(matches!(err, UpstreamError::Status { status: 502, .. }));
    }
}
