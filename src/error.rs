//! Application error type and its HTTP representation.
//!
//! Every failure crossing the HTTP boundary is rendered as
//! `{"success": false, "message": "..."}`. Internal failures never expose
//! their details to the client; they are logged instead.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned to clients for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Failure envelope serialized for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing client input. No mutation happened.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// The requested resource does not exist.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Store or other internal failure. `message` is only logged.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing envelope. Internal details are replaced by a generic message.
    pub fn to_error_body(&self) -> ErrorBody {
        let message = match self {
            AppError::Validation { message, .. } | AppError::NotFound { message, .. } => {
                message.clone()
            }
            AppError::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        ErrorBody {
            success: false,
            message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Request failed with internal error");
            }
            AppError::Validation { message, details } => {
                tracing::debug!(%message, %details, "Rejected request");
            }
            AppError::NotFound { .. } => {}
        }

        (self.status_code(), Json(self.to_error_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface the first field message; the rest go into details for logging.
        let message = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid request".to_string());

        AppError::bad_request(message, json!({ "fields": errors.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON request body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
