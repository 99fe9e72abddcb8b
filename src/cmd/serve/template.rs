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

use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use maud::DOCTYPE;
use maud::Markup;
use maud::html;

use crate::error::ErrorReport;
use crate::error::Fallible;

pub fn page_template(body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "flashdeck" }
                link rel="stylesheet" href="/style.css";
            }
            body {
                header.header {
                    div.container {
                        h1 { a href="/" { "flashdeck" } }
                        p.lead { "Discover the flashcard difference." }
                    }
                }
                div.container {
                    (body)
                }
                script src="/script.js" {};
            }
        }
    }
}

fn respond(status: StatusCode, body: Markup) -> Response {
    (status, Html(page_template(body).into_string())).into_response()
}

pub fn not_found() -> Response {
    respond(
        StatusCode::NOT_FOUND,
        html! {
            div.not-found {
                h1 { "Not Found" }
                p { a href="/" { "Back to your decks" } }
            }
        },
    )
}

/// The generic failure screen. The details only go to the log.
pub fn failure(error: ErrorReport) -> Response {
    log::error!("{error}");
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        html! {
            div.failure {
                h1 { "Something went wrong" }
                p { a href="/" { "Back to your decks" } }
            }
        },
    )
}

/// Turn a view's outcome into a response. `None` means the view's fetch was
/// cancelled: nothing is rendered.
pub fn render(page: Fallible<Option<Markup>>) -> Response {
    match page {
        Ok(Some(body)) => respond(StatusCode::OK, body),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => failure(e),
    }
}
