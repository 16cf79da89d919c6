use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;

use crate::error::{AppError, SubmissionError};
use crate::state::SharedState;
use crate::submission::pipeline::Handled;
use crate::submission::{form, parser, pipeline};

use super::responder;

/// Contact form posted directly from the site.
///
/// Browser posts (form-encoded) are redirected to the thank-you page on
/// success; JSON callers get the same body as the webhook.
pub async fn submit(
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
    let is_browser_post = content_type.is_some_and(|ct| ct.contains("form"));

    let raw = match parser::parse_body(content_type, &body) {
        Ok(raw) => raw,
        Err(e) => {
            return responder::error(&SubmissionError::MalformedPayload(e), environment);
        }
    };

    if let Err(errors) = form::validate(&raw) {
        tracing::debug!("Form validation failed: {errors:?}");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": "VALIDATION_FAILED",
                "message": "Vennligst fyll ut alle påkrevde felt korrekt.",
                "fields": errors,
            })),
        )
            .into_response();
    }

    let result = pipeline::run(&state.dispatcher, &raw).await;

    let accepted = match &result {
        Ok(Handled::Delivered(outcome)) => outcome.is_success(),
        Err(SubmissionError::SpamDetected) => true,
        _ => false,
    };
    if is_browser_post && accepted {
        return Redirect::to(&state.config.success_url).into_response();
    }

    responder::respond(result, started.elapsed(), environment)
}
