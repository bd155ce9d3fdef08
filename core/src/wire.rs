//! Upstream wire shapes and their mapping onto the domain model.
//!
//! The upstream API speaks snake_case and may add fields (`piles`, `error`)
//! that the proxy ignores. Mapping is field renaming only.

use serde::{Deserialize, Serialize};

use crate::types::{Card, CardImages, Deck, DrawResult};

/// The fields every upstream body carries, checked before the full decode so
/// a `success: false` body is reported as a rejection even when the rest of
/// the payload is absent.
#[derive(Debug, Deserialize)]
pub struct UpstreamStatus {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of the new-deck and shuffle endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamDeck {
    pub success: bool,
    pub deck_id: String,
    pub shuffled: bool,
    pub remaining: u32,
}

/// Body of the draw endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamDraw {
    pub success: bool,
    pub deck_id: String,
    pub cards: Vec<UpstreamCard>,
    pub remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamCard {
    pub code: String,
    pub image: String,
    pub images: UpstreamCardImages,
    pub value: String,
    pub suit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamCardImages {
    pub svg: String,
    pub png: String,
}

impl From<UpstreamDeck> for Deck {
    fn from(wire: UpstreamDeck) -> Self {
        Deck {
            success: wire.success,
            deck_id: wire.deck_id,
            shuffled: wire.shuffled,
            remaining: wire.remaining,
        }
    }
}

impl From<UpstreamCardImages> for CardImages {
    fn from(wire: UpstreamCardImages) -> Self {
        CardImages {
            svg: wire.svg,
            png: wire.png,
        }
    }
}

impl From<UpstreamCard> for Card {
    fn from(wire: UpstreamCard) -> Self {
        Card {
            code: wire.code,
            image: wire.image,
            images: wire.images.into(),
            value: wire.value,
            suit: wire.suit,
        }
    }
}

impl From<UpstreamDraw> for DrawResult {
    fn from(wire: UpstreamDraw) -> Self {
        DrawResult {
            success: wire.success,
            deck_id: wire.deck_id,
            cards: wire.cards.into_iter().map(Card::from).collect(),
            remaining: wire.remaining,
        }
    }
}
