//! Error types for the gateway.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use codebay_engine::EngineError;
use std::fmt;

/// Gateway error type.
#[derive(Debug)]
pub enum Error {
    /// Engine-level failure; status code depends on the kind.
    Engine(EngineError),
    /// Malformed request before it reached the engine.
    BadRequest(String),
    /// Webhook signature missing, malformed, stale, or wrong.
    InvalidSignature(String),
    /// Configuration error.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Engine(e) => write!(f, "{e}"),
            Error::BadRequest(msg) => write!(f, "bad request: {msg}"),
            Error::InvalidSignature(msg) => write!(f, "invalid signature: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<EngineError> for Error {
    fn from(e: EngineError) -> Self {
        Error::Engine(e)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Engine(e) => engine_status(e),
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::InvalidSignature(_) => StatusCode::UNAUTHORIZED,
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "success": false,
            "error": self.to_string()
        });
        (status, Json(body)).into_response()
    }
}

fn engine_status(e: &EngineError) -> StatusCode {
    match e {
        EngineError::InvalidPrice(_)
        | EngineError::LicenseIncomplete(_)
        | EngineError::InvalidState(_)
        | EngineError::ProjectNotDraftable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::SellerNotPayable(_) | EngineError::DuplicatePurchase(_) => {
            StatusCode::CONFLICT
        }
        EngineError::IntentNotFound(_) | EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::PaymentDeclined(_) => StatusCode::PAYMENT_REQUIRED,
        EngineError::Unauthorized(_) => StatusCode::FORBIDDEN,
        EngineError::Processor(_) => StatusCode::BAD_GATEWAY,
        EngineError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
