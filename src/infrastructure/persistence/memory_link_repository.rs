//! In-process implementation of link repository.
//!
//! Holds every link behind a single `RwLock`, so each operation (including
//! the uniqueness checks of `create` and the click increment) is atomic with
//! respect to every other. Data does not survive a restart.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{CreateLinkError, LinkRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    links: Vec<Link>,
    by_code: HashMap<String, usize>,
    by_url: HashMap<String, usize>,
}

/// Link repository kept in memory. Used with `STORAGE_BACKEND=memory` and in tests.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    store: RwLock<Store>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, CreateLinkError> {
        let mut store = self.store.write().await;

        if store.by_code.contains_key(&new_link.short_code) {
            return Err(CreateLinkError::CodeTaken);
        }
        if store.by_url.contains_key(&new_link.original_url) {
            return Err(CreateLinkError::UrlTaken);
        }

        store.next_id += 1;
        let now = Utc::now();
        let link = Link::new(
            store.next_id,
            new_link.original_url,
            new_link.short_code,
            new_link.short_url,
            0,
            now,
            now,
        );

        let index = store.links.len();
        store.by_code.insert(link.short_code.clone(), index);
        store.by_url.insert(link.original_url.clone(), index);
        store.links.push(link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let store = self.store.read().await;

        Ok(store.by_code.get(code).map(|&i| store.links[i].clone()))
    }

    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError> {
        let store = self.store.read().await;

        Ok(store.by_url.get(original_url).map(|&i| store.links[i].clone()))
    }

    async fn list_all(&self) -> Result<Vec<Link>, AppError> {
        let store = self.store.read().await;

        let mut links = store.links.clone();
        links.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(links)
    }

    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError> {
        let mut store = self.store.write().await;

        // Ids are handed out sequentially from 1 and links are never removed.
        let index = usize::try_from(id - 1).ok();

        match index.and_then(|i| store.links.get_mut(i)) {
            Some(link) => {
                link.clicks += 1;
                link.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
