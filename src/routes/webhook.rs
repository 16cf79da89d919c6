use std::time::Instant;

use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, SubmissionError};
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

use super::responder;

/// Inbound webhook from the forms relay.
pub async fn receive(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return AppError::from(rejection).into_response(),
    };
    let started = Instant::now();
    let environment = state.config.environment;

    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let raw = match parser::parse_body(content_type, &body) {
        Ok(raw) => raw,
        Err(e) => {
            return responder::error(&SubmissionError::MalformedPayload(e), environment);
        }
    };

    let result = pipeline::run(&state.dispatcher, &raw).await;
    responder::respond(result, started.elapsed(), environment)
}
