pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::LeadStore;
use crate::email::Mailer;
use crate::state::{AppState, SharedState};
use crate::submission::dispatcher::Dispatcher;

/// Wire the injected collaborators into shared state. Both are created once
/// per process and reused by every request.
pub fn build_state(
    config: Config,
    mailer: Arc<dyn Mailer>,
    store: Option<Arc<dyn LeadStore>>,
) -> SharedState {
    if store.is_none() {
        tracing::info!("DATABASE_URL not set, submissions will not be stored");
    }

    let dispatcher = Dispatcher::new(mailer, store, config.mail.clone());
    Arc::new(AppState { config, dispatcher })
}

pub fn build_app(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .merge(routes::submission_routes())
        .route("/health", axum::routing::get(health))
        .fallback(routes::responder::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(state.config.max_body_size))
                .layer(cors)
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                )),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
