pub mod form;
pub mod responder;
pub mod webhook;

use axum::Router;
use axum::routing::post;

use crate::state::SharedState;

pub fn submission_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/.netlify/functions/kontakt",
            post(webhook::receive).fallback(responder::method_not_allowed),
        )
        .route(
            "/webhooks/kontakt",
            post(webhook::receive).fallback(responder::method_not_allowed),
        )
        .route(
            "/kontakt",
            post(form::submit).fallback(responder::method_not_allowed),
        )
}
