use std::time::Duration;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

use crate::config::Environment;
use crate::error::{AppError, SubmissionError};
use crate::models::DeliveryOutcome;
use crate::submission::pipeline::Handled;

const GENERIC_ERROR: &str = "An error occurred processing your request";

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

/// Map a pipeline result onto the status codes the webhook sender retries on.
///
/// Anything that should not be retried (spam, other forms) answers 200.
pub fn respond(
    result: Result<Handled, SubmissionError>,
    elapsed: Duration,
    environment: Environment,
) -> Response {
    match result {
        Ok(Handled::Ignored { form_name }) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "ignored": true,
                "message": "Form name mismatch, ignoring",
                "received": form_name,
            })),
        )
            .into_response(),
        Ok(Handled::Delivered(outcome)) => delivered(&outcome, elapsed, environment),
        Err(err) => error(&err, environment),
    }
}

pub fn delivered(outcome: &DeliveryOutcome, elapsed: Duration, environment: Environment) -> Response {
    let duration = format!("{}ms", elapsed.as_millis());

    if outcome.is_success() {
        let message = if outcome.auto_reply_sent() {
            "Emails sent successfully"
        } else {
            "Admin email sent, auto-reply failed"
        };
        let mut body = json!({
            "success": true,
            "message": message,
            "adminEmail": true,
            "autoReply": outcome.auto_reply_sent(),
            "database": outcome.database,
            "duration": duration,
        });
        if let Err(reason) = &outcome.auto_reply {
            body["autoReplyError"] = json!(reason);
        }
        tracing::info!("Submission delivered in {duration}");
        return (StatusCode::OK, Json(body)).into_response();
    }

    let mut body = json!({
        "success": false,
        "error": "EMAIL_DELIVERY_FAILED",
        "message": "Failed to send emails",
        "adminEmail": false,
        "autoReply": outcome.auto_reply_sent(),
        "database": outcome.database,
    });
    if environment.exposes_errors() {
        if let Err(reason) = &outcome.admin {
            body["adminEmailError"] = json!(reason);
        }
        if let Err(reason) = &outcome.auto_reply {
            body["autoReplyError"] = json!(reason);
        }
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

pub fn error(err: &SubmissionError, environment: Environment) -> Response {
    let status = err.status();

    if let SubmissionError::SpamDetected = err {
        return (
            status,
            Json(json!({ "success": true, "ignored": true, "message": "Submission received" })),
        )
            .into_response();
    }

    if status.is_server_error() {
        tracing::error!("Submission failed: {err}");
    }

    let message = if environment.exposes_errors() {
        err.to_string()
    } else {
        public_message(err).to_string()
    };

    let mut body = json!({
        "success": false,
        "error": err.code(),
        "message": message,
    });
    if let SubmissionError::MissingRequiredFields(fields) = err {
        body["fields"] = Value::from(fields.clone());
    }

    (status, Json(body)).into_response()
}

fn public_message(err: &SubmissionError) -> &'static str {
    match err {
        SubmissionError::InvalidEmail(_) => "Invalid email address",
        SubmissionError::MissingRequiredFields(_) => "Missing required fields",
        SubmissionError::SpamDetected => "Submission received",
        SubmissionError::MalformedPayload(_) | SubmissionError::Internal(_) => GENERIC_ERROR,
    }
}
