use serde_json::json;

use crate::error::AppError;

/// Answers every unmatched route with 404 `Route not found`.
pub async fn fallback_handler() -> AppError {
    AppError::not_found("Route not found", json!({}))
}
