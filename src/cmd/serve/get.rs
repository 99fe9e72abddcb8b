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

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::Uri;
use axum::http::header::REFERER;
use axum::response::Response;
use flashdeck_core::DeckId;
use flashdeck_core::Route;
use flashdeck_core::form::FormState;
use flashdeck_core::ignore_cancelled;
use flashdeck_core::study::Study;
use maud::Markup;

use crate::api::DeckApi;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::not_found;
use crate::cmd::serve::template::render;
use crate::cmd::serve::views;
use crate::error::Fallible;
use crate::form::load_form;
use crate::store::DELETE_CARD_PROMPT;
use crate::store::DELETE_DECK_PROMPT;

pub async fn get_handler(State(state): State<ServerState>, uri: Uri, headers: HeaderMap) -> Response {
    let Some(route) = Route::parse(uri.path()) else {
        return not_found();
    };
    log::debug!("GET {route}");
    match route {
        Route::Home => render(deck_list(&state).await),
        Route::Deck(id) => render(deck_view(&state, id).await),
        Route::Study(id) => render(study(&state, id).await),
        Route::DeleteDeck(id) => {
            let back = referring_route(&headers, route).unwrap_or(Route::Deck(id));
            render(Ok(Some(views::confirm(DELETE_DECK_PROMPT, back))))
        }
        Route::DeleteCard(deck, _) => {
            let back = referring_route(&headers, route).unwrap_or(Route::Deck(deck));
            render(Ok(Some(views::confirm(DELETE_CARD_PROMPT, back))))
        }
        Route::NewDeck | Route::EditDeck(_) | Route::NewCard(_) | Route::EditCard(_, _) => {
            match FormState::for_route(route) {
                Some(form) => render(form_page(&state, form).await),
                None => not_found(),
            }
        }
    }
}

async fn deck_list(state: &ServerState) -> Fallible<Option<Markup>> {
    let fetch = state.begin_fetch();
    let decks = state.store.load(fetch.token()).await?;
    Ok(decks.map(|decks| views::deck_list(&decks)))
}

async fn deck_view(state: &ServerState, id: DeckId) -> Fallible<Option<Markup>> {
    let fetch = state.begin_fetch();
    let deck = ignore_cancelled(state.store.api().read_deck(id, fetch.token()).await)?;
    Ok(deck.map(|deck| views::deck_view(&deck)))
}

/// Opening the study page always starts over from the first card.
async fn study(state: &ServerState, id: DeckId) -> Fallible<Option<Markup>> {
    let fetch = state.begin_fetch();
    let Some(deck) = ignore_cancelled(state.store.api().read_deck(id, fetch.token()).await)?
    else {
        return Ok(None);
    };
    let study = Study::for_deck(deck.card_count());
    {
        let mut sessions = state.sessions();
        match study {
            Study::Session(session) => {
                sessions.insert(id, session);
            }
            Study::NotEnoughCards { .. } => {
                sessions.remove(&id);
            }
        }
    }
    Ok(Some(views::study(&deck, &study)))
}

async fn form_page(state: &ServerState, form: FormState) -> Fallible<Option<Markup>> {
    let fetch = state.begin_fetch();
    let loaded = ignore_cancelled(load_form(state.store.api(), form, fetch.token()).await)?;
    Ok(loaded.map(|loaded| views::form(&loaded)))
}

/// The page the user came from, if it is one of ours and not `current`.
fn referring_route(headers: &HeaderMap, current: Route) -> Option<Route> {
    let referer = headers.get(REFERER)?.to_str().ok()?;
    let uri: Uri = referer.parse().ok()?;
    Route::parse(uri.path()).filter(|route| *route != current)
}
