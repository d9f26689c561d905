//! Classification of PostgreSQL unique violations on the `links` table.

/// Unique constraint on `links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

/// Unique index on `md5(links.original_url)`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "links_original_url_key";

/// Which uniqueness rule an insert broke, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueViolation {
    ShortCode,
    OriginalUrl,
}

pub fn unique_violation(e: &sqlx::Error) -> Option<UniqueViolation> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    classify_constraint(db_err.constraint())
}

fn classify_constraint(constraint: Option<&str>) -> Option<UniqueViolation> {
    match constraint {
        Some(SHORT_CODE_CONSTRAINT) => Some(UniqueViolation::ShortCode),
        Some(ORIGINAL_URL_CONSTRAINT) => Some(UniqueViolation::OriginalUrl),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_constraints() {
        assert_eq!(
            classify_constraint(Some("links_short_code_key")),
            Some(UniqueViolation::ShortCode)
        );
        assert_eq!(
            classify_constraint(Some("links_original_url_key")),
            Some(UniqueViolation::OriginalUrl)
        );
    }

    #[test]
    fn test_classify_unknown_constraint() {
        assert_eq!(classify_constraint(Some("links_pkey")), None);
        assert_eq!(classify_constraint(None), None);
    }

    #[test]
    fn test_non_database_error_is_not_a_violation() {
        assert_eq!(unique_violation(&sqlx::Error::RowNotFound), None);
    }
}
