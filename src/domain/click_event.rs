//! Click event model for asynchronous click accounting.

/// A redirect that still has to be counted.
///
/// Sent from [`crate::application::services::RedirectService`] to the
/// background worker over a bounded channel, so the redirect response never
/// waits for the counter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub link_id: i64,
    pub short_code: String,
}

impl ClickEvent {
    /// Creates a new click event.
    pub fn new(link_id: i64, short_code: impl Into<String>) -> Self {
        Self {
            link_id,
            short_code: short_code.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new(42, "abc12345");

        assert_eq!(event.link_id, 42);
        assert_eq!(event.short_code, "abc12345");
    }
}
