use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Everything that can stop a submission before or during delivery.
///
/// Per-channel email and persistence failures are not listed here: they are
/// recorded in [`crate::models::DeliveryOutcome`] and never short-circuit.
#[derive(Debug)]
pub enum SubmissionError {
    MalformedPayload(String),
    SpamDetected,
    InvalidEmail(String),
    MissingRequiredFields(Vec<&'static str>),
    Internal(String),
}

impl SubmissionError {
    pub fn code(&self) -> &'static str {
        match self {
            SubmissionError::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            SubmissionError::SpamDetected => "SPAM_DETECTED",
            SubmissionError::InvalidEmail(_) => "INVALID_EMAIL",
            SubmissionError::MissingRequiredFields(_) => "MISSING_REQUIRED_FIELDS",
            SubmissionError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SubmissionError::SpamDetected => StatusCode::OK,
            SubmissionError::InvalidEmail(_) | SubmissionError::MissingRequiredFields(_) => {
                StatusCode::BAD_REQUEST
            }
            SubmissionError::MalformedPayload(_) | SubmissionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl std::fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionError::MalformedPayload(msg) => write!(f, "Malformed payload: {msg}"),
            SubmissionError::SpamDetected => write!(f, "Honeypot field was filled"),
            SubmissionError::InvalidEmail(email) => write!(f, "Invalid email address: {email}"),
            SubmissionError::MissingRequiredFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            SubmissionError::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for SubmissionError {}

/// Routing-level errors outside the submission pipeline.
#[derive(Debug)]
pub enum AppError {
    MethodNotAllowed,
    NotFound,
    /// The body could not be read, e.g. it exceeded the size limit.
    BodyRejected(BytesRejection),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MethodNotAllowed => write!(f, "Method not allowed"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::BodyRejected(rejection) => write!(f, "{}", rejection.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BodyRejected(rejection) => {
                tracing::warn!("Request body rejected: {}", rejection.body_text());
                rejection.status()
            }
        };

        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}


impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::BodyRejected(rejection)
    }
}
