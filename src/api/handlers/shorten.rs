//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ApiResponse;
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link, or returns the existing one for the same URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "example.com/some/page" }
/// ```
///
/// # Response
///
/// **201 Created** for a new link, **200 OK** when the URL was already registered:
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "originalUrl": "https://example.com/some/page",
///     "shortUrl": "http://localhost:5002/aB3dE_9x",
///     "shortCode": "aB3dE_9x"
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for a missing, malformed, or unsupported URL and
/// for an unparseable body.
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ShortenResponse>>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let outcome = state
        .link_service
        .shorten(payload.original_url.as_deref().unwrap_or_default())
        .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(ApiResponse::ok(outcome.link.into()))))
}
