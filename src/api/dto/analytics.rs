//! DTOs for the analytics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::{Link, LinkCatalog};

/// All links with aggregate totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub urls: Vec<LinkItem>,
    pub total_urls: i64,
    pub total_clicks: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkItem {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Link> for LinkItem {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
            short_url: link.short_url,
            clicks: link.clicks,
            created_at: link.created_at,
            updated_at: link.updated_at,
        }
    }
}

impl From<LinkCatalog> for AnalyticsResponse {
    fn from(catalog: LinkCatalog) -> Self {
        Self {
            urls: catalog.links.into_iter().map(LinkItem::from).collect(),
            total_urls: catalog.total_urls,
            total_clicks: catalog.total_clicks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let now = Utc::now();
        let catalog = LinkCatalog::from_links(vec![Link::new(
            1,
            "https://example.com".to_string(),
            "abcd1234".to_string(),
            "http://localhost:5002/abcd1234".to_string(),
            3,
            now,
            now,
        )]);

        let value = serde_json::to_value(AnalyticsResponse::from(catalog)).unwrap();

        assert_eq!(value["totalUrls"], 1);
        assert_eq!(value["totalClicks"], 3);
        assert_eq!(value["urls"][0]["shortCode"], "abcd1234");
        assert_eq!(value["urls"][0]["originalUrl"], "https://example.com");
        assert!(value["urls"][0]["createdAt"].is_string());
        assert!(value["urls"][0]["updatedAt"].is_string());
    }
}
