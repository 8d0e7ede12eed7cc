//! Title and content constraints checked before a post is created.

use tokenpost_core::error::DomainError;
use tokenpost_core::record::RecordId;

/// Character-count bounds applied to sanitized input.
///
/// Lengths are counted in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    /// Minimum title length.
    pub title_min_chars: usize,
    /// Maximum title length.
    pub title_max_chars: usize,
    /// Minimum content length.
    pub content_min_chars: usize,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            title_min_chars: 10,
            title_max_chars: 50,
            content_min_chars: 20,
        }
    }
}

impl ValidationRules {
    /// Checks that the title is present and within bounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTitle` otherwise.
    pub fn validate_title(&self, title: &str) -> Result<(), DomainError> {
        let invalid = DomainError::InvalidTitle {
            min: self.title_min_chars,
            max: self.title_max_chars,
        };
        if title.is_empty() {
            return Err(invalid);
        }
        let chars = title.chars().count();
        if chars < self.title_min_chars || chars > self.title_max_chars {
            return Err(invalid);
        }
        Ok(())
    }

    /// Checks that the content is present and long enough.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidContent` otherwise.
    pub fn validate_content(&self, content: &str) -> Result<(), DomainError> {
        if content.is_empty() || content.chars().count() < self.content_min_chars {
            return Err(DomainError::InvalidContent {
                min: self.content_min_chars,
            });
        }
        Ok(())
    }
}

/// Parses a post identifier taken from a request path.
///
/// Returns `Ok(None)` for digit strings too large to name any post.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdFormat` unless `raw` is a non-empty run of
/// ASCII digits.
pub fn parse_post_id(raw: &str) -> Result<Option<RecordId>, DomainError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidIdFormat);
    }
    Ok(raw.parse().ok())
}
