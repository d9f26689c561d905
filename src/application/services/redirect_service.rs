//! Redirect resolution and click accounting.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Resolves short codes and counts each successful resolution.
///
/// Counting is best-effort: the click is handed to the background worker
/// (see [`crate::domain::click_worker`]) without waiting, and a full or
/// closed queue drops the click rather than failing the redirect.
pub struct RedirectService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl<R: LinkRepository + ?Sized> RedirectService<R> {
    pub fn new(repository: Arc<R>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            repository,
            click_sender,
        }
    }

    /// Returns the original URL for `code` and schedules one click increment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `code` is empty.
    /// Returns [`AppError::NotFound`] if no link has this code; nothing is counted.
    /// Returns [`AppError::Internal`] if the lookup itself fails.
    pub async fn resolve_and_count(&self, code: &str) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(AppError::bad_request("Short code is required", json!({})));
        }

        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))?;

        metrics::counter!("link_redirects_total").increment(1);
        self.record_click(ClickEvent::new(link.id, link.short_code));

        Ok(link.original_url)
    }

    /// Whether the click worker is still accepting events.
    pub fn is_accepting_clicks(&self) -> bool {
        !self.click_sender.is_closed()
    }

    /// Free slots in the click queue.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    fn record_click(&self, event: ClickEvent) {
        match self.click_sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::warn!(code = %event.short_code, "Click queue full, click dropped");
            }
            Err(TrySendError::Closed(event)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                tracing::error!(code = %event.short_code, "Click worker stopped, click dropped");
            }
        }
    }
}
