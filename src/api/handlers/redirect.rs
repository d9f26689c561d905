//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Answers **302 Found** with `Location` set to the original URL. The click
/// is counted asynchronously by the click worker and never delays the redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or the path
/// segment is not valid UTF-8 (no generated code can match it).
pub async fn redirect_handler(
    path: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Path(code) = path.map_err(|rejection| {
        AppError::not_found(
            "URL not found",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let original_url = state.redirect_service.resolve_and_count(&code).await?;

    tracing::debug!(code = %code, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
