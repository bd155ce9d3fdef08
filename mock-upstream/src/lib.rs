//! In-memory stand-in for the third-party deck-of-cards API.
//!
//! Speaks the upstream snake_case contract under `/api/`. Each call to
//! `app()` gets its own store, so tests never share decks.

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

pub const IMAGE_BASE: &str = "https://deckofcardsapi.com/static/img";

/// The hosted API refuses to build more than this many decks at once.
pub const MAX_DECK_COUNT: u32 = 20;

const SUITS: [(&str, &str); 4] = [("S", "SPADES"), ("D", "DIAMONDS"), ("C", "CLUBS"), ("H", "HEARTS")];
const RANKS: [(&str, &str); 13] = [
    ("A", "ACE"),
    ("2", "2"),
    ("3", "3"),
    ("4", "4"),
    ("5", "5"),
    ("6", "6"),
    ("7", "7"),
    ("8", "8"),
    ("9", "9"),
    ("0", "10"),
    ("J", "JACK"),
    ("Q", "QUEEN"),
    ("K", "KING"),
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
    pub svg: String,
    pub png: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub code: String,
    pub image: String,
    pub images: CardImages,
    pub value: String,
    pub suit: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeckBody {
    pub success: bool,
    pub deck_id: String,
    pub shuffled: bool,
    pub remaining: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DrawBody {
    pub success: bool,
    pub deck_id: String,
    pub cards: Vec<Card>,
    pub remaining: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
struct MockDeck {
    cards: VecDeque<Card>,
    shuffled: bool,
}

#[derive(Debug, Default)]
pub struct Store {
    decks: RwLock<HashMap<String, MockDeck>>,
    next_id: AtomicU64,
}

pub type Db = Arc<Store>;

#[derive(Deserialize)]
pub struct NewDeckQuery {
    pub deck_count: Option<u32>,
}

#[derive(Deserialize)]
pub struct DrawQuery {
    pub count: Option<u32>,
}

pub fn app() -> Router {
    let db: Db = Arc::new(Store::default());
    Router::new()
        .route("/api/deck/new/shuffle/", get(new_deck))
        .route("/api/deck/{deck_id}/draw/", get(draw))
        .route("/api/deck/{deck_id}/shuffle/", get(shuffle))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// One or more standard 52-card decks in suit-major order.
pub fn standard_cards(deck_count: u32) -> Vec<Card> {
    let mut cards = Vec::with_capacity(52 * deck_count as usize);
    for _ in 0..deck_count {
        for (suit_code, suit) in SUITS {
            for (rank_code, value) in RANKS {
                let code = format!("{rank_code}{suit_code}");
                cards.push(Card {
                    image: format!("{IMAGE_BASE}/{code}.png"),
                    images: CardImages {
                        svg: format!("{IMAGE_BASE}/{code}.svg"),
                        png: format!("{IMAGE_BASE}/{code}.png"),
                    },
                    value: value.to_string(),
                    suit: suit.to_string(),
                    code,
                });
            }
        }
    }
    cards
}

async fn new_deck(State(db): State<Db>, Query(query): Query<NewDeckQuery>) -> Json<DeckBody> {
    let deck_count = query.deck_count.unwrap_or(1).clamp(1, MAX_DECK_COUNT);
    let mut cards = standard_cards(deck_count);
    cards.shuffle(&mut rand::thread_rng());

    let deck_id = format!("mock-deck-{}", db.next_id.fetch_add(1, Ordering::Relaxed) + 1);
    let body = DeckBody {
        success: true,
        deck_id: deck_id.clone(),
        shuffled: true,
        remaining: cards.len(),
    };
    db.decks.write().await.insert(
        deck_id,
        MockDeck {
            cards: cards.into(),
            shuffled: true,
        },
    );
    Json(body)
}

async fn draw(
    State(db): State<Db>,
    Path(deck_id): Path<String>,
    Query(query): Query<DrawQuery>,
) -> Response {
    let count = query.count.unwrap_or(1) as usize;
    let mut decks = db.decks.write().await;
    let Some(deck) = decks.get_mut(&deck_id) else {
        return deck_not_found();
    };

    let take = count.min(deck.cards.len());
    let cards: Vec<Card> = deck.cards.drain(..take).collect();
    let error = (take < count).then(|| format!("Not enough cards remaining to draw {count} additional"));
    Json(DrawBody {
        success: error.is_none(),
        deck_id,
        cards,
        remaining: deck.cards.len(),
        error,
    })
    .into_response()
}

/// Reshuffles the cards still in the deck; drawn cards stay drawn.
async fn shuffle(State(db): State<Db>, Path(deck_id): Path<String>) -> Response {
    let mut decks = db.decks.write().await;
    let Some(deck) = decks.get_mut(&deck_id) else {
        return deck_not_found();
    };

    deck.cards.make_contiguous().shuffle(&mut rand::thread_rng());
    deck.shuffled = true;
    Json(DeckBody {
        success: true,
        deck_id,
        shuffled: deck.shuffled,
        remaining: deck.cards.len(),
    })
    .into_response()
}

fn deck_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Deck ID does not exist." })),
    )
        .into_response()
}
