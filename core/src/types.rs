//! Local domain model returned to front-end callers.
//!
//! # Design
//! These types serialize in camelCase and are defined independently of the
//! upstream wire shapes in `wire`, so an upstream field rename only touches
//! the mapping there.

use serde::{Deserialize, Serialize};

/// A deck as reported by the upstream service after create or shuffle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub success: bool,
    pub deck_id: String,
    pub shuffled: bool,
    pub remaining: u32,
}

/// Alternate image renditions of a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardImages {
    pub svg: String,
    pub png: String,
}

/// A single drawn card. `code` is rank followed by suit, e.g. `AS` or `0H`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Card {
    pub code: String,
    pub image: String,
    pub images: CardImages,
    pub value: String,
    pub suit: String,
}

/// Result of drawing from a deck. `cards` is in draw order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DrawResult {
    pub success: bool,
    pub deck_id: String,
    pub cards: Vec<Card>,
    pub remaining: u32,
}
