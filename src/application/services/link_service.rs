//! Link registry: shortening and listing.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkCatalog, NewLink};
use crate::domain::repositories::{CreateLinkError, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_normalizer::{UrlNormalizationError, normalize_url};
use serde_json::json;

/// Default number of insert attempts before giving up on code collisions.
pub const DEFAULT_MAX_ATTEMPTS: usize = 10;

/// Result of [`LinkService::shorten`].
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    pub link: Link,
    /// `false` when the URL was already registered and the existing link is returned.
    pub created: bool,
}

/// Settings the registry needs beyond its store.
#[derive(Debug, Clone)]
pub struct LinkServiceSettings {
    pub base_url: String,
    pub code_generator: CodeGenerator,
    pub max_attempts: usize,
}

impl LinkServiceSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            code_generator: CodeGenerator::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Service for creating and listing shortened links.
///
/// Handles URL normalization, deduplication and collision-free code
/// generation. Never mutates an existing record.
pub struct LinkService<R: LinkRepository + ?Sized> {
    repository: Arc<R>,
    settings: LinkServiceSettings,
}

impl<R: LinkRepository + ?Sized> LinkService<R> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, settings: LinkServiceSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Shortens `candidate_url`, or returns the existing link for it.
    ///
    /// # Code Generation
    ///
    /// Codes are generated optimistically: an existence check skips codes
    /// already in use, and the store's unique constraint catches codes taken
    /// concurrently, in which case a fresh code is tried. Gives up after
    /// `max_attempts` generated codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is missing or invalid.
    /// Returns [`AppError::Internal`] on store errors or when every attempt collided.
    pub async fn shorten(&self, candidate_url: &str) -> Result<ShortenOutcome, AppError> {
        let original_url = normalize_url(candidate_url).map_err(validation_error)?;

        if let Some(link) = self
            .repository
            .find_by_original_url(&original_url)
            .await?
        {
            return Ok(ShortenOutcome {
                link,
                created: false,
            });
        }

        for attempt in 1..=self.settings.max_attempts {
            let short_code = self.settings.code_generator.generate();

            if self.repository.find_by_code(&short_code).await?.is_some() {
                tracing::debug!(attempt, "Generated code already in use");
                continue;
            }

            let new_link = NewLink {
                original_url: original_url.clone(),
                short_url: self.short_url(&short_code),
                short_code,
            };

            match self.repository.create(new_link).await {
                Ok(link) => {
                    metrics::counter!("links_created_total").increment(1);
                    tracing::info!(code = %link.short_code, "Short link created");
                    return Ok(ShortenOutcome {
                        link,
                        created: true,
                    });
                }
                Err(CreateLinkError::CodeTaken) => {
                    tracing::debug!(attempt, "Code taken concurrently, retrying");
                }
                Err(CreateLinkError::UrlTaken) => {
                    return self.existing_after_race(&original_url).await;
                }
                Err(CreateLinkError::Store(e)) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "attempts": self.settings.max_attempts }),
        ))
    }

    /// Returns every link, newest first, with `total_urls` and `total_clicks`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_all(&self) -> Result<LinkCatalog, AppError> {
        let links = self.repository.list_all().await?;
        Ok(LinkCatalog::from_links(links))
    }

    /// Looks a link up by code without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_by_code(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }

    /// Round-trips the backing store.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    /// Another request registered the same URL between our lookup and insert.
    async fn existing_after_race(&self, original_url: &str) -> Result<ShortenOutcome, AppError> {
        let link = self
            .repository
            .find_by_original_url(original_url)
            .await?
            .ok_or_else(|| {
                AppError::internal(
                    "Link vanished after unique violation",
                    json!({ "original_url": original_url }),
                )
            })?;

        Ok(ShortenOutcome {
            link,
            created: false,
        })
    }
}

fn validation_error(e: UrlNormalizationError) -> AppError {
    let message = match &e {
        UrlNormalizationError::Empty => "Original URL is required",
        _ => "Please provide a valid URL",
    };

    AppError::bad_request(message, json!({ "reason": e.to_string() }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn create_test_link(id: i64, code: &str, url: &str) -> Link {
        let now = Utc::now();
        Link::new(
            id,
            url.to_string(),
            code.to_string(),
            format!("http://localhost:5002/{code}"),
            0,
            now,
            now,
        )
    }

    fn service(repo: MockLinkRepository) -> LinkService<MockLinkRepository> {
        LinkService::new(
            Arc::new(repo),
            LinkServiceSettings::new("http://localhost:5002"),
        )
    }

    fn echo_created(new_link: NewLink) -> Result<Link, CreateLinkError> {
        let now = Utc::now();
        Ok(Link::new(
            10,
            new_link.original_url,
            new_link.short_code,
            new_link.short_url,
            0,
            now,
            now,
        ))
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|l| {
                l.original_url == "https://example.com"
                    && l.short_code.len() == 8
                    && l.short_url == format!("http://localhost:5002/{}", l.short_code)
            })
            .times(1)
            .returning(echo_created);

        let outcome = service(mock_repo)
            .shorten("https://example.com")
            .await
            .unwrap();

        assert!(outcome.created);
        assert_eq!(outcome.link.original_url, "https://example.com");
        assert_eq!(outcome.link.clicks, 0);
    }

    #[tokio::test]
    async fn test_shorten_normalizes_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == "https://example.com/path")
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_find_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|l| l.original_url == "https://example.com/path")
            .times(1)
            .returning(echo_created);

        let result = service(mock_repo).shorten("example.com/path").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_deduplication() {
        let mut mock_repo = MockLinkRepository::new();
        let existing = create_test_link(5, "existing", "https://example.com");
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_repo.expect_create().times(0);

        let outcome = service(mock_repo)
            .shorten("https://example.com")
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.link.id, 5);
        assert_eq!(outcome.link.short_code, "existing");
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_urls() {
        for input in ["", "   ", "not a url", "ftp://example.com"] {
            let mut mock_repo = MockLinkRepository::new();
            mock_repo.expect_find_by_original_url().times(0);
            mock_repo.expect_create().times(0);

            let result = service(mock_repo).shorten(input).await;

            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_shorten_missing_url_message() {
        let err = service(MockLinkRepository::new())
            .shorten("")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Original URL is required");

        let err = service(MockLinkRepository::new())
            .shorten("not a url")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please provide a valid URL");
    }

    #[tokio::test]
    async fn test_shorten_skips_codes_found_in_store() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));
        mock_repo
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code| Ok(Some(create_test_link(1, code, "https://other.com"))));
        mock_repo
            .expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(echo_created);

        let outcome = service(mock_repo)
            .shorten("https://example.com")
            .await
            .unwrap();

        assert!(outcome.created);
    }

    #[tokio::test]
    async fn test_shorten_retries_on_code_race() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));
        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(CreateLinkError::CodeTaken));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(echo_created);

        let outcome = service(mock_repo)
            .shorten("https://example.com")
            .await
            .unwrap();

        assert!(outcome.created);
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_attempts() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));
        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(3)
            .returning(|_| Err(CreateLinkError::CodeTaken));

        let mut settings = LinkServiceSettings::new("http://localhost:5002");
        settings.max_attempts = 3;
        let service = LinkService::new(Arc::new(mock_repo), settings);

        let result = service.shorten("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_shorten_returns_winner_of_url_race() {
        let mut mock_repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        mock_repo.expect_find_by_code().returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(CreateLinkError::UrlTaken));
        let winner = create_test_link(42, "winner01", "https://example.com");
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(winner.clone())));

        let outcome = service(mock_repo)
            .shorten("https://example.com")
            .await
            .unwrap();

        assert!(!outcome.created);
        assert_eq!(outcome.link.short_code, "winner01");
    }

    #[tokio::test]
    async fn test_shorten_propagates_store_errors() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo).shorten("https://example.com").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_list_all_aggregates() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_list_all().times(1).returning(|| {
            let mut a = create_test_link(2, "code0002", "https://b.com");
            a.clicks = 3;
            let mut b = create_test_link(1, "code0001", "https://a.com");
            b.clicks = 4;
            Ok(vec![a, b])
        });

        let catalog = service(mock_repo).list_all().await.unwrap();

        assert_eq!(catalog.total_urls, 2);
        assert_eq!(catalog.total_clicks, 7);
        assert_eq!(catalog.links[0].short_code, "code0002");
    }

    #[tokio::test]
    async fn test_get_by_code_not_found() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_find_by_code().returning(|_| Ok(None));

        let result = service(mock_repo).get_by_code("missing1").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let service = LinkService::new(
            Arc::new(MockLinkRepository::new()),
            LinkServiceSettings::new("https://s.example.com/"),
        );

        assert_eq!(
            service.short_url("abc12345"),
            "https://s.example.com/abc12345"
        );
    }
}
