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

use std::collections::HashMap;

use axum::Form;
use axum::extract::State;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use flashdeck_core::CardId;
use flashdeck_core::DeckId;
use flashdeck_core::Route;
use flashdeck_core::form::FormState;
use flashdeck_core::ignore_cancelled;
use flashdeck_core::study::Advance;
use flashdeck_core::study::Restart;
use flashdeck_core::study::Study;
use flashdeck_core::study::StudySession;

use crate::api::DeckApi;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::failure;
use crate::cmd::serve::template::not_found;
use crate::cmd::serve::template::render;
use crate::cmd::serve::views;
use crate::form::submit;
use crate::store::Removal;

type FormData = HashMap<String, String>;

pub async fn post_handler(
    State(state): State<ServerState>,
    uri: Uri,
    form: Result<Form<FormData>, FormRejection>,
) -> Response {
    let Some(route) = Route::parse(uri.path()) else {
        return not_found();
    };
    log::debug!("POST {route}");
    if let Route::Home | Route::Deck(_) = route {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    let Form(data) = match form {
        Ok(form) => form,
        Err(rejection) => return rejection.into_response(),
    };
    match route {
        Route::Study(id) => study_action(&state, id, &data).await,
        Route::DeleteDeck(id) => delete_deck(&state, id, &data).await,
        Route::DeleteCard(deck, card) => delete_card(&state, deck, card, &data).await,
        _ => match FormState::for_route(route) {
            Some(form) => submit_form(&state, form, &data).await,
            None => StatusCode::METHOD_NOT_ALLOWED.into_response(),
        },
    }
}

async fn submit_form(state: &ServerState, mut form: FormState, data: &FormData) -> Response {
    for key in form.kind().keys() {
        let value = data.get(key).cloned().unwrap_or_default();
        if let Err(e) = form.set(key, value) {
            return failure(e);
        }
    }
    match submit(state.store.as_ref(), form.submission()).await {
        Ok(next) => redirect(next),
        Err(e) => failure(e),
    }
}

/// Where Cancel (or a finished card deletion) goes: the page carrying the
/// delete button, as recorded in the confirmation form.
fn back(data: &FormData, default: Route) -> Route {
    data.get("back")
        .and_then(|path| Route::parse(path))
        .unwrap_or(default)
}

fn confirmed(data: &FormData) -> bool {
    data.get("answer").map(String::as_str) == Some("Delete")
}

async fn delete_deck(state: &ServerState, id: DeckId, data: &FormData) -> Response {
    let answer = confirmed(data);
    match state.store.remove_deck(id, |_: &str| answer).await {
        Ok(Removal::Removed) => {
            state.sessions().remove(&id);
            redirect(Route::Home)
        }
        Ok(Removal::Declined) => redirect(back(data, Route::Deck(id))),
        Err(e) => failure(e),
    }
}

async fn delete_card(state: &ServerState, deck: DeckId, card: CardId, data: &FormData) -> Response {
    let answer = confirmed(data);
    match state.store.remove_card(card, |_: &str| answer).await {
        Ok(_) => redirect(back(data, Route::Deck(deck))),
        Err(e) => failure(e),
    }
}

fn redirect(route: Route) -> Response {
    Redirect::to(&route.to_string()).into_response()
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum StudyAction {
    Flip,
    Next,
    Restart,
    Exit,
}

impl StudyAction {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "Flip" => Some(StudyAction::Flip),
            "Next" => Some(StudyAction::Next),
            "Restart" => Some(StudyAction::Restart),
            "Exit" => Some(StudyAction::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
enum StudyStep {
    Show(Study),
    Exit,
}

/// Apply `action` to the stored session. A session that no longer matches the
/// deck's size is replaced by a fresh one first. Transitions the session does
/// not allow are logged and leave it unchanged.
fn step(current: Option<StudySession>, card_count: usize, action: StudyAction) -> StudyStep {
    let current = current.filter(|session| session.card_count() == card_count);
    let mut session = match current.or_else(|| StudySession::new(card_count)) {
        Some(session) => session,
        None => return StudyStep::Show(Study::NotEnoughCards { count: card_count }),
    };
    let result = match action {
        StudyAction::Flip => session.flip(),
        StudyAction::Next => session.next().map(|advance| {
            if advance == Advance::PromptRestart {
                log::debug!("Reached the last card, asking to restart");
            }
        }),
        StudyAction::Restart | StudyAction::Exit => {
            match session.answer_restart(action == StudyAction::Restart) {
                Ok(Restart::Exit) => return StudyStep::Exit,
                Ok(Restart::Restarted) => Ok(()),
                Err(e) => Err(e),
            }
        }
    };
    if let Err(e) = result {
        log::debug!("Ignoring {action:?}: {e}");
    }
    StudyStep::Show(Study::Session(session))
}

async fn study_action(state: &ServerState, id: DeckId, data: &FormData) -> Response {
    let Some(action) = data.get("action").and_then(|a| StudyAction::parse(a)) else {
        return StatusCode::BAD_REQUEST.into_response();
    };
    let fetch = state.begin_fetch();
    let deck = match ignore_cancelled(state.store.api().read_deck(id, fetch.token()).await) {
        Ok(Some(deck)) => deck,
        Ok(None) => return render(Ok(None)),
        Err(e) => return failure(e),
    };
    let next = {
        let mut sessions = state.sessions();
        let next = step(sessions.get(&id).copied(), deck.card_count(), action);
        match &next {
            StudyStep::Show(Study::Session(session)) => {
                sessions.insert(id, *session);
            }
            StudyStep::Show(Study::NotEnoughCards { .. }) | StudyStep::Exit => {
                sessions.remove(&id);
            }
        }
        next
    };
    match next {
        StudyStep::Show(study) => render(Ok(Some(views::study(&deck, &study)))),
        StudyStep::Exit => redirect(Route::Home),
    }
}
