// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Test doubles: an in-memory backend usable directly as a [`DeckApi`] or
//! served over HTTP in the shape of the real one.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use flashdeck_core::Card;
use flashdeck_core::CardFields;
use flashdeck_core::CardId;
use flashdeck_core::Deck;
use flashdeck_core::DeckFields;
use flashdeck_core::DeckId;
use flashdeck_core::ErrorReport;
use flashdeck_core::FetchError;
use flashdeck_core::FetchResult;
use portpicker::pick_unused_port;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::spawn;
use tokio::task::yield_now;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::api::DeckApi;
use crate::error::Fallible;
use crate::error::fail;
use crate::utils::wait_for_server;

const TEST_HOST: &str = "127.0.0.1";

#[derive(Default)]
struct Db {
    decks: Vec<Deck>,
    cards: Vec<Card>,
    last_deck_id: u64,
    last_card_id: u64,
}

#[derive(Clone, Default)]
pub struct MemoryBackend {
    db: Arc<Mutex<Db>>,
    calls: Arc<AtomicUsize>,
    stalled: Arc<AtomicBool>,
    ops: Arc<Mutex<Vec<&'static str>>>,
    read_delay_ms: Arc<AtomicU64>,
}

/// A deck with `n` cards whose ids start at `first_card`.
pub fn sample_deck(id: u64, name: &str, n: u64, first_card: u64) -> Deck {
    let deck_id = DeckId::new(id);
    let cards = (0..n)
        .map(|i| Card {
            id: CardId::new(first_card + i),
            deck_id,
            front: format!("{name} front {}", i + 1),
            back: format!("{name} back {}", i + 1),
        })
        .collect();
    Deck {
        id: deck_id,
        name: name.to_string(),
        description: format!("All about {name}"),
        cards,
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_decks(decks: Vec<Deck>) -> Self {
        let backend = Self::new();
        {
            let mut db = backend.lock();
            for mut deck in decks {
                db.last_deck_id = db.last_deck_id.max(deck.id.get());
                for card in deck.cards.drain(..) {
                    db.last_card_id = db.last_card_id.max(card.id.get());
                    db.cards.push(card);
                }
                db.decks.push(deck);
            }
        }
        backend
    }

    /// Number of requests served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// From now on, listing decks only finishes once its token is cancelled.
    pub fn stall_listing(&self) {
        self.stalled.store(true, Ordering::SeqCst);
    }

    /// Served over HTTP, reading a deck takes at least `delay`.
    pub fn delay_reads(&self, delay: Duration) {
        self.read_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    /// The [`DeckApi`] operations called so far, in order.
    pub fn ops(&self) -> Vec<&'static str> {
        self.ops.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn op(&self, name: &'static str) {
        self.ops
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(name);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Db> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn embed(db: &Db, deck: &Deck) -> Deck {
        Deck {
            cards: db
                .cards
                .iter()
                .filter(|card| card.deck_id == deck.id)
                .cloned()
                .collect(),
            ..deck.clone()
        }
    }

    pub fn all_decks(&self) -> Vec<Deck> {
        self.record();
        let db = self.lock();
        db.decks.iter().map(|deck| Self::embed(&db, deck)).collect()
    }

    pub fn deck(&self, id: DeckId) -> Option<Deck> {
        self.record();
        let db = self.lock();
        db.decks
            .iter()
            .find(|deck| deck.id == id)
            .map(|deck| Self::embed(&db, deck))
    }

    pub fn card(&self, id: CardId) -> Option<Card> {
        self.record();
        self.lock().cards.iter().find(|card| card.id == id).cloned()
    }

    fn insert_deck(&self, fields: &DeckFields) -> Deck {
        self.record();
        let mut db = self.lock();
        db.last_deck_id += 1;
        let deck = Deck {
            id: DeckId::new(db.last_deck_id),
            name: fields.name.clone(),
            description: fields.description.clone(),
            cards: Vec::new(),
        };
        db.decks.push(deck.clone());
        deck
    }

    fn insert_card(&self, deck_id: DeckId, fields: &CardFields) -> Card {
        self.record();
        let mut db = self.lock();
        db.last_card_id += 1;
        let card = Card {
            id: CardId::new(db.last_card_id),
            deck_id,
            front: fields.front.clone(),
            back: fields.back.clone(),
        };
        db.cards.push(card.clone());
        card
    }

    fn replace_deck(&self, id: DeckId, fields: &DeckFields) -> Option<Deck> {
        self.record();
        let mut db = self.lock();
        let deck = db.decks.iter_mut().find(|deck| deck.id == id)?;
        deck.name = fields.name.clone();
        deck.description = fields.description.clone();
        Some(deck.clone())
    }

    fn replace_card(&self, card: &Card) -> Option<Card> {
        self.record();
        let mut db = self.lock();
        let stored = db.cards.iter_mut().find(|c| c.id == card.id)?;
        *stored = card.clone();
        Some(card.clone())
    }

    fn remove_deck(&self, id: DeckId) -> Option<()> {
        self.record();
        let mut db = self.lock();
        let idx = db.decks.iter().position(|deck| deck.id == id)?;
        db.decks.remove(idx);
        db.cards.retain(|card| card.deck_id != id);
        Some(())
    }

    fn remove_card(&self, id: CardId) -> Option<()> {
        self.record();
        let mut db = self.lock();
        let idx = db.cards.iter().position(|card| card.id == id)?;
        db.cards.remove(idx);
        Some(())
    }
}

fn found<T>(value: Option<T>, what: &str, token: &CancellationToken) -> FetchResult<T> {
    if token.is_cancelled() {
        return Err(FetchError::Cancelled);
    }
    value.ok_or_else(|| FetchError::Failed(ErrorReport::new(format!("404: {what} not found"))))
}

fn guard(token: &CancellationToken) -> FetchResult<()> {
    if token.is_cancelled() {
        Err(FetchError::Cancelled)
    } else {
        Ok(())
    }
}

impl DeckApi for MemoryBackend {
    async fn list_decks(&self, token: &CancellationToken) -> FetchResult<Vec<Deck>> {
        guard(token)?;
        self.op("list_decks");
        if self.stalled.load(Ordering::SeqCst) {
            token.cancelled().await;
            return Err(FetchError::Cancelled);
        }
        Ok(self.all_decks())
    }

    async fn read_deck(&self, id: DeckId, token: &CancellationToken) -> FetchResult<Deck> {
        guard(token)?;
        self.op("read_deck");
        found(self.deck(id), "deck", token)
    }

    async fn read_card(&self, id: CardId, token: &CancellationToken) -> FetchResult<Card> {
        guard(token)?;
        self.op("read_card");
        found(self.card(id), "card", token)
    }

    async fn create_deck(&self, fields: &DeckFields, token: &CancellationToken) -> FetchResult<Deck> {
        guard(token)?;
        self.op("create_deck");
        yield_now().await;
        Ok(self.insert_deck(fields))
    }

    async fn create_card(
        &self,
        deck_id: DeckId,
        fields: &CardFields,
        token: &CancellationToken,
    ) -> FetchResult<Card> {
        guard(token)?;
        self.op("create_card");
        Ok(self.insert_card(deck_id, fields))
    }

    async fn update_deck(&self, deck: &Deck, token: &CancellationToken) -> FetchResult<Deck> {
        guard(token)?;
        self.op("update_deck");
        found(self.replace_deck(deck.id, &deck.fields()), "deck", token)
    }

    async fn update_card(&self, card: &Card, token: &CancellationToken) -> FetchResult<Card> {
        guard(token)?;
        self.op("update_card");
        found(self.replace_card(card), "card", token)
    }

    async fn delete_deck(&self, id: DeckId, token: &CancellationToken) -> FetchResult<()> {
        guard(token)?;
        self.op("delete_deck");
        found(self.remove_deck(id), "deck", token)
    }

    async fn delete_card(&self, id: CardId, token: &CancellationToken) -> FetchResult<()> {
        guard(token)?;
        self.op("delete_card");
        found(self.remove_card(id), "card", token)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewCard {
    front: String,
    back: String,
    deck_id: DeckId,
}

type Reply<T> = Result<Json<T>, StatusCode>;

fn reply<T>(value: Option<T>) -> Reply<T> {
    value.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_handler(State(backend): State<MemoryBackend>) -> Json<Vec<Deck>> {
    Json(backend.all_decks())
}

async fn create_deck_handler(
    State(backend): State<MemoryBackend>,
    Json(fields): Json<DeckFields>,
) -> (StatusCode, Json<Deck>) {
    (StatusCode::CREATED, Json(backend.insert_deck(&fields)))
}

async fn read_deck_handler(
    State(backend): State<MemoryBackend>,
    Path(id): Path<DeckId>,
) -> Reply<Deck> {
    let delay = backend.read_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        sleep(Duration::from_millis(delay)).await;
    }
    reply(backend.deck(id))
}

async fn update_deck_handler(
    State(backend): State<MemoryBackend>,
    Path(id): Path<DeckId>,
    Json(fields): Json<DeckFields>,
) -> Reply<Deck> {
    reply(backend.replace_deck(id, &fields))
}

async fn delete_deck_handler(
    State(backend): State<MemoryBackend>,
    Path(id): Path<DeckId>,
) -> StatusCode {
    match backend.remove_deck(id) {
        Some(()) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn create_card_handler(
    State(backend): State<MemoryBackend>,
    Json(card): Json<NewCard>,
) -> (StatusCode, Json<Card>) {
    let fields = CardFields {
        front: card.front,
        back: card.back,
    };
    (
        StatusCode::CREATED,
        Json(backend.insert_card(card.deck_id, &fields)),
    )
}

async fn read_card_handler(
    State(backend): State<MemoryBackend>,
    Path(id): Path<CardId>,
) -> Reply<Card> {
    reply(backend.card(id))
}

async fn update_card_handler(
    State(backend): State<MemoryBackend>,
    Path(id): Path<CardId>,
    Json(card): Json<Card>,
) -> Reply<Card> {
    reply(backend.replace_card(&Card { id, ..card }))
}

async fn delete_card_handler(
    State(backend): State<MemoryBackend>,
    Path(id): Path<CardId>,
) -> StatusCode {
    match backend.remove_card(id) {
        Some(()) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

/// Serve `backend` on a free local port and return its base URL.
pub async fn spawn_backend(backend: MemoryBackend) -> Fallible<String> {
    let Some(port) = pick_unused_port() else {
        return fail("no free port");
    };
    let app = Router::new()
        .route("/decks", get(list_handler).post(create_deck_handler))
        .route(
            "/decks/{id}",
            get(read_deck_handler)
                .put(update_deck_handler)
                .delete(delete_deck_handler),
        )
        .route("/cards", post(create_card_handler))
        .route(
            "/cards/{id}",
            get(read_card_handler)
                .put(update_card_handler)
                .delete(delete_card_handler),
        )
        .with_state(backend);
    let listener = TcpListener::bind(format!("{TEST_HOST}:{port}")).await?;
    spawn(async move { axum::serve(listener, app).await });
    wait_for_server(TEST_HOST, port).await?;
    Ok(format!("http://{TEST_HOST}:{port}"))
}
