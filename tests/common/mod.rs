#![allow(dead_code)]

use axum::Router;
use shortlink::api::middleware::cors;
use shortlink::application::services::LinkServiceSettings;
use shortlink::domain::click_event::ClickEvent;
use shortlink::domain::click_worker::run_click_worker;
use shortlink::infrastructure::persistence::MemoryLinkRepository;
use shortlink::routes;
use shortlink::state::AppState;
use std::sync::Arc;
use tokio::sync::mpsc;

pub const BASE_URL: &str = "http://localhost:5002";
pub const FRONTEND_URL: &str = "http://localhost:3000";

pub struct TestContext {
    pub state: AppState,
    pub repository: Arc<MemoryLinkRepository>,
    pub click_rx: mpsc::Receiver<ClickEvent>,
}

impl TestContext {
    pub fn router(&self) -> Router {
        test_router(self.state.clone())
    }

    /// Applies every click queued so far through the real click worker.
    pub async fn drain_clicks(self) -> Arc<MemoryLinkRepository> {
        let TestContext {
            repository,
            mut click_rx,
            ..
        } = self;

        click_rx.close();
        run_click_worker(click_rx, repository.clone()).await;
        repository
    }
}

pub fn create_test_context() -> TestContext {
    create_test_context_with_capacity(1000)
}

pub fn create_test_context_with_capacity(capacity: usize) -> TestContext {
    let repository = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(capacity);

    let state = AppState::new(
        repository.clone(),
        LinkServiceSettings::new(BASE_URL),
        tx,
    );

    TestContext {
        state,
        repository,
        click_rx: rx,
    }
}

pub fn test_router(state: AppState) -> Router {
    routes::router(state, cors::layer(FRONTEND_URL).unwrap())
}
