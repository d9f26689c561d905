//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Why an insert was rejected.
///
/// Uniqueness is enforced by the store itself. The service treats
/// [`CreateLinkError::CodeTaken`] as a signal to retry with a fresh code and
/// [`CreateLinkError::UrlTaken`] as "another request registered this URL first".
#[derive(Debug, thiserror::Error)]
pub enum CreateLinkError {
    #[error("short code is already taken")]
    CodeTaken,

    #[error("original URL is already registered")]
    UrlTaken,

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<sqlx::Error> for CreateLinkError {
    fn from(e: sqlx::Error) -> Self {
        CreateLinkError::Store(e.into())
    }
}

/// Storage operations the link registry and redirect accounting rely on.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - in-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link with `clicks = 0`.
    ///
    /// # Errors
    ///
    /// - [`CreateLinkError::CodeTaken`] if the short code already exists
    /// - [`CreateLinkError::UrlTaken`] if the original URL already exists
    /// - [`CreateLinkError::Store`] on any other store failure
    async fn create(&self, new_link: NewLink) -> Result<Link, CreateLinkError>;

    /// Finds a link by exact short code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by exact (already normalized) original URL.
    async fn find_by_original_url(&self, original_url: &str) -> Result<Option<Link>, AppError>;

    /// Returns every link ordered by creation time, newest first.
    async fn list_all(&self) -> Result<Vec<Link>, AppError>;

    /// Atomically adds one to the click counter of the link with `id`.
    ///
    /// Returns `Ok(false)` if no such link exists.
    async fn increment_clicks(&self, id: i64) -> Result<bool, AppError>;

    /// Round-trips to the store. Used by the health check.
    async fn ping(&self) -> Result<(), AppError>;
}
