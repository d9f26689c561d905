//! Handler for the analytics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::ApiResponse;
use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every link, newest first, with total link and click counts.
///
/// # Endpoint
///
/// `GET /api/analytics`
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "urls": [
///       {
///         "id": 1,
///         "originalUrl": "https://example.com",
///         "shortCode": "aB3dE_9x",
///         "shortUrl": "http://localhost:5002/aB3dE_9x",
///         "clicks": 4,
///         "createdAt": "2025-01-01T12:00:00Z",
///         "updatedAt": "2025-01-02T08:30:00Z"
///       }
///     ],
///     "totalUrls": 1,
///     "totalClicks": 4
///   }
/// }
/// ```
pub async fn analytics_handler(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AnalyticsResponse>>, AppError> {
    let catalog = state.link_service.list_all().await?;

    Ok(Json(ApiResponse::ok(catalog.into())))
}
