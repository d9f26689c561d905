//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Link;

/// Upper bound on `originalUrl`, far above any real-world URL.
pub const MAX_URL_LENGTH: u64 = 65_536;

/// Request to shorten a single URL.
///
/// A missing or `null` `originalUrl` is accepted here and rejected by the
/// service with "Original URL is required".
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    #[serde(default)]
    #[validate(length(max = MAX_URL_LENGTH, message = "Please provide a valid URL"))]
    pub original_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub original_url: String,
    pub short_url: String,
    pub short_code: String,
}

impl From<Link> for ShortenResponse {
    fn from(link: Link) -> Self {
        Self {
            original_url: link.original_url,
            short_url: link.short_url,
            short_code: link.short_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_field_names() {
        let req: ShortenRequest =
            serde_json::from_str(r#"{"originalUrl": "https://example.com"}"#).unwrap();
        assert_eq!(req.original_url.as_deref(), Some("https://example.com"));

        let req: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(req.original_url.is_none());

        let req: ShortenRequest = serde_json::from_str(r#"{"originalUrl": null}"#).unwrap();
        assert!(req.original_url.is_none());
    }

    #[test]
    fn test_long_url_accepted() {
        let req = ShortenRequest {
            original_url: Some(format!("https://example.com/{}", "a".repeat(5000))),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_oversized_url_rejected() {
        let req = ShortenRequest {
            original_url: Some(format!(
                "https://example.com/{}",
                "a".repeat(MAX_URL_LENGTH as usize)
            )),
        };
        assert!(req.validate().is_err());
    }
}
