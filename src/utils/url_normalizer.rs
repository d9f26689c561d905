//! URL normalization and validation.
//!
//! Turns user input into the canonical string stored as `original_url`:
//! trimmed, with a lowercase `http://`/`https://` scheme, and with `https://`
//! prepended when no scheme was given. Apart from the scheme, the string is
//! stored as entered; it is only parsed to validate it.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Normalizes and validates a candidate URL.
///
/// # Rules
///
/// 1. Surrounding whitespace is removed; an empty result is rejected
/// 2. Input containing ASCII control characters (tab, newline, ...) is rejected
/// 3. Input starting with `http://` or `https://` (any case) is kept, with the scheme lowercased
/// 4. Input carrying another explicit scheme (`ftp://`, `file://`, ...) is rejected
/// 5. Anything else gets `https://` prepended
/// 6. The result must parse as an absolute URL with a host
///
/// # Errors
///
/// Returns a [`UrlNormalizationError`] describing the first rule violated.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com/x").unwrap(), "https://example.com/x");
/// assert_eq!(normalize_url("http://example.com").unwrap(), "http://example.com");
/// assert!(normalize_url("ftp://example.com").is_err());
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    // Url::parse strips tabs and newlines, so they must be caught before it runs.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlNormalizationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }

    let normalized = if let Some(prefix) = http_prefix(trimmed) {
        format!("{prefix}{}", &trimmed[prefix.len()..])
    } else if has_explicit_scheme(trimmed) {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("{HTTPS_PREFIX}{trimmed}")
    };

    let parsed =
        Url::parse(&normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(normalized),
        _ => Err(UrlNormalizationError::MissingHost),
    }
}

/// Returns the lowercase `http://` or `https://` prefix `s` starts with, ignoring case.
fn http_prefix(s: &str) -> Option<&'static str> {
    [HTTP_PREFIX, HTTPS_PREFIX].into_iter().find(|prefix| {
        s.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Detects a leading `scheme://` per RFC 3986 scheme syntax.
fn has_explicit_scheme(s: &str) -> bool {
    let Some((scheme, _)) = s.split_once("://") else {
        return false;
    };

    let mut chars = scheme.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
