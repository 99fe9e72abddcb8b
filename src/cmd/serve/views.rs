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

//! Markup for every page. These functions only turn data into HTML.

use flashdeck_core::Card;
use flashdeck_core::Deck;
use flashdeck_core::Route;
use flashdeck_core::breadcrumb::Page;
use flashdeck_core::button::Button;
use flashdeck_core::button::ButtonStyle;
use flashdeck_core::button::Icon;
use flashdeck_core::study::MIN_STUDY_CARDS;
use flashdeck_core::study::Study;
use flashdeck_core::study::StudySession;
use maud::Markup;
use maud::html;

use crate::form::LoadedForm;

fn icon(icon: Icon) -> Markup {
    let d = match icon {
        Icon::Eye => {
            "M16 8s-3-5.5-8-5.5S0 8 0 8s3 5.5 8 5.5S16 8 16 8zM8 11a3 3 0 1 1 0-6 3 3 0 0 1 0 6z"
        }
        Icon::Journal => {
            "M3 0h10a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H3a1 1 0 0 1-1-1V1a1 1 0 0 1 1-1zm2 3v1h7V3H5z"
        }
        Icon::Trash => {
            "M5.5 5.5A.5.5 0 0 1 6 6v6a.5.5 0 0 1-1 0V6a.5.5 0 0 1 .5-.5zm2.5 0a.5.5 0 0 1 .5.5v6a.5.5 0 0 1-1 0V6a.5.5 0 0 1 .5-.5zm3 .5v6a.5.5 0 0 1-1 0V6a.5.5 0 0 1 1 0zM14.5 3a1 1 0 0 1-1 1H13v9a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V4h-.5a1 1 0 0 1 0-2H6a1 1 0 0 1 1-1h2a1 1 0 0 1 1 1h3.5a1 1 0 0 1 1 1z"
        }
        Icon::Pencil => {
            "M12.146.146a.5.5 0 0 1 .708 0l3 3a.5.5 0 0 1 0 .708l-10 10a.5.5 0 0 1-.168.11l-5 2a.5.5 0 0 1-.65-.65l2-5a.5.5 0 0 1 .11-.168l10-10z"
        }
        Icon::Plus => {
            "M8 2a.5.5 0 0 1 .5.5v5h5a.5.5 0 0 1 0 1h-5v5a.5.5 0 0 1-1 0v-5h-5a.5.5 0 0 1 0-1h5v-5A.5.5 0 0 1 8 2z"
        }
    };
    html! {
        svg.icon xmlns="http://www.w3.org/2000/svg" width="16" height="16" fill="currentColor" viewBox="0 0 16 16" aria-hidden="true" {
            path d=(d) {}
        }
    }
}

fn button(button: Button) -> Markup {
    let style = match button.style() {
        ButtonStyle::Primary => "btn-primary",
        ButtonStyle::Secondary => "btn-secondary",
        ButtonStyle::Danger => "btn-danger",
    };
    let class = if button.float_right() {
        format!("btn {style} float-right")
    } else {
        format!("btn {style}")
    };
    html! {
        @if button.icon_only() {
            a class=(class) href=(button.target().to_string()) title=(button.label()) aria-label=(button.label()) {
                (icon(button.icon()))
            }
        } @else {
            a class=(class) href=(button.target().to_string()) {
                (icon(button.icon()))
                " "
                (button.label())
            }
        }
    }
}

fn buttons(list: &[Button]) -> Markup {
    html! {
        div.buttons {
            @for b in list {
                (button(*b))
            }
        }
    }
}

/// Home, then the deck, then the page. The deck is the active crumb on its
/// own view; `deck` is absent on the create-deck form.
pub fn breadcrumb(deck: Option<&Deck>, page: Page) -> Markup {
    let label = page.label();
    html! {
        nav aria-label="breadcrumb" {
            ol.breadcrumb {
                li.breadcrumb-item { a href=(Route::Home.to_string()) { "Home" } }
                @if let Some(deck) = deck {
                    @if label.is_some() {
                        li.breadcrumb-item { a href=(Route::Deck(deck.id).to_string()) { (deck.name) } }
                    } @else {
                        li.breadcrumb-item.active aria-current="page" { (deck.name) }
                    }
                }
                @if let Some(label) = label {
                    li.breadcrumb-item.active aria-current="page" { (label) }
                }
            }
        }
    }
}

fn deck_preview(deck: &Deck) -> Markup {
    html! {
        div.deck-preview {
            div.card-count { (deck.card_count()) " cards" }
            h2 { (deck.name) }
            p { (deck.description) }
            (buttons(&[Button::View(deck.id), Button::Study(deck.id), Button::DeleteDeck(deck.id)]))
        }
    }
}

pub fn deck_list(decks: &[Deck]) -> Markup {
    html! {
        (buttons(&[Button::AddDeck]))
        div.deck-list {
            @for deck in decks {
                (deck_preview(deck))
            }
        }
    }
}

fn card_view(deck: &Deck, card: &Card) -> Markup {
    html! {
        div.card-view {
            div.card-sides {
                p.front { (card.front) }
                p.back { (card.back) }
            }
            (buttons(&[Button::DeleteCard(deck.id, card.id), Button::EditCard(deck.id, card.id)]))
        }
    }
}

pub fn deck_view(deck: &Deck) -> Markup {
    html! {
        (breadcrumb(Some(deck), Page::View))
        div.deck {
            h3 { (deck.name) }
            p { (deck.description) }
            (buttons(&[
                Button::EditDeck(deck.id),
                Button::Study(deck.id),
                Button::AddCard(deck.id),
                Button::DeleteDeck(deck.id),
            ]))
        }
        h2 { "Cards" }
        @for card in &deck.cards {
            (card_view(deck, card))
        }
    }
}

fn study_card(deck: &Deck, session: &StudySession) -> Markup {
    let index = session.card_index();
    let text = deck.cards.get(index).map(|card| {
        if session.flipped() {
            card.back.as_str()
        } else {
            card.front.as_str()
        }
    });
    html! {
        div.study-card {
            h5 { "Card " (index + 1) " of " (session.card_count()) }
            p.card-text { (text.unwrap_or_default()) }
            form method="post" {
                button.btn.btn-secondary id="flip" type="submit" name="action" value="Flip" { "Flip" }
                @if session.flipped() {
                    " "
                    button.btn.btn-primary id="next" type="submit" name="action" value="Next" { "Next" }
                }
            }
        }
    }
}

fn restart_prompt() -> Markup {
    html! {
        div.restart-prompt {
            h5 { "Restart cards?" }
            p { "Click 'cancel' to return to the home page." }
            form method="post" {
                button.btn.btn-primary type="submit" name="action" value="Restart" { "Restart" }
                " "
                button.btn.btn-secondary type="submit" name="action" value="Exit" { "Cancel" }
            }
        }
    }
}

fn not_enough_cards(deck: &Deck, count: usize) -> Markup {
    html! {
        div.not-enough {
            h3 { "Not enough cards." }
            p {
                "You need at least " (MIN_STUDY_CARDS) " cards to study. There are "
                (count) " cards in this deck."
            }
            (buttons(&[Button::AddCard(deck.id)]))
        }
    }
}

pub fn study(deck: &Deck, study: &Study) -> Markup {
    html! {
        (breadcrumb(Some(deck), Page::Study))
        h1 { "Study: " (deck.name) }
        @match study {
            Study::Session(session) if session.restart_pending() => {
                (restart_prompt())
            }
            Study::Session(session) => {
                (study_card(deck, session))
            }
            Study::NotEnoughCards { count } => {
                (not_enough_cards(deck, *count))
            }
        }
    }
}

fn field_label(key: &str) -> &'static str {
    match key {
        "name" => "Name",
        "description" => "Description",
        "front" => "Front",
        _ => "Back",
    }
}

pub fn form(loaded: &LoadedForm) -> Markup {
    let LoadedForm { form, deck } = loaded;
    let deck = deck.as_ref();
    html! {
        (breadcrumb(deck, form.page()))
        h1 { (form.heading(deck.map(|d| d.name.as_str()))) }
        form method="post" {
            @for (key, value) in form.fields() {
                div.form-group {
                    label for=(key) { (field_label(key)) }
                    @if key == "name" {
                        input.form-control type="text" id=(key) name=(key) value=(value);
                    } @else {
                        textarea.form-control id=(key) name=(key) rows="4" { (value) }
                    }
                }
            }
            a.btn.btn-secondary href=(Route::Home.to_string()) { "Cancel" }
            " "
            button.btn.btn-primary type="submit" { "Submit" }
        }
    }
}

/// The confirmation gate in front of a deletion. `back` is where Cancel goes.
pub fn confirm(prompt: &str, back: Route) -> Markup {
    html! {
        div.confirm {
            @for line in prompt.lines().filter(|line| !line.is_empty()) {
                p { (line) }
            }
            form method="post" {
                input type="hidden" name="back" value=(back.to_string());
                button.btn.btn-danger type="submit" name="answer" value="Delete" { "Delete" }
                " "
                button.btn.btn-secondary type="submit" name="answer" value="Cancel" { "Cancel" }
            }
        }
    }
}
