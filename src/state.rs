//! Shared application state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, LinkServiceSettings, RedirectService};
use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Repository trait object shared by both services.
pub type DynLinkRepository = dyn LinkRepository;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<DynLinkRepository>>,
    pub redirect_service: Arc<RedirectService<DynLinkRepository>>,
}

impl AppState {
    /// Wires both services around one repository and the click queue sender.
    pub fn new(
        repository: Arc<DynLinkRepository>,
        settings: LinkServiceSettings,
        click_sender: mpsc::Sender<ClickEvent>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository.clone(), settings)),
            redirect_service: Arc::new(RedirectService::new(repository, click_sender)),
        }
    }
}
