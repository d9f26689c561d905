//! Cross-origin policy for the browser frontend.

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allows a single frontend origin, with credentials.
///
/// Credentials rule out a wildcard origin, so `frontend_url` must be an
/// exact origin such as `http://localhost:3000`. Requests from any other
/// origin get no `Access-Control-Allow-Origin` header.
///
/// # Errors
///
/// Returns an error if `frontend_url` is not a valid header value.
pub fn layer(frontend_url: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))
        .with_context(|| format!("Invalid CORS origin '{frontend_url}'"))?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_origin() {
        assert!(layer("http://localhost:3000").is_ok());
        assert!(layer("http://bad\norigin").is_err());
    }
}
