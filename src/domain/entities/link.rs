//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its click counter.
///
/// `short_url` is denormalized at creation time from the configured base URL,
/// so changing `BASE_URL` later does not rewrite existing records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        short_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            short_url,
            clicks,
            created_at,
            updated_at,
        }
    }
}

/// Input data for creating a new link. Counters and timestamps are set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
}

/// Every stored link, newest first, with aggregates computed from the same snapshot.
#[derive(Debug, Clone)]
pub struct LinkCatalog {
    pub links: Vec<Link>,
    pub total_urls: i64,
    pub total_clicks: i64,
}

impl LinkCatalog {
    /// Builds the catalog and its aggregates from an already ordered list.
    pub fn from_links(links: Vec<Link>) -> Self {
        let total_urls = links.len() as i64;
        let total_clicks = links.iter().map(|l| l.clicks).sum();

        Self {
            links,
            total_urls,
            total_clicks,
        }
    }
}
