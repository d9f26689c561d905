//! Background worker applying click increments.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Consumes click events and issues one atomic increment per event.
///
/// Failures are logged and counted, never retried: a retried increment could
/// double count a click whose first attempt actually committed.
///
/// Returns once every sender has been dropped and the queue is drained.
pub async fn run_click_worker<R>(mut rx: mpsc::Receiver<ClickEvent>, repository: Arc<R>)
where
    R: LinkRepository + ?Sized,
{
    while let Some(event) = rx.recv().await {
        match repository.increment_clicks(event.link_id).await {
            Ok(true) => {
                tracing::debug!(code = %event.short_code, "Click recorded");
            }
            Ok(false) => {
                tracing::warn!(
                    link_id = event.link_id,
                    code = %event.short_code,
                    "Click for unknown link ignored"
                );
            }
            Err(e) => {
                metrics::counter!("click_increment_failures_total").increment(1);
                tracing::error!(
                    link_id = event.link_id,
                    code = %event.short_code,
                    error = %e,
                    "Failed to record click"
                );
            }
        }
    }

    tracing::info!("Click worker stopped");
}
