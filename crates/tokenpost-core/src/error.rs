//! Domain error types.

use thiserror::Error;

/// Every way a create or delete request can fail.
///
/// The display strings double as the `message` of the HTTP error envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Title is empty or its character count is out of bounds.
    #[error("Please provide a title with a length between {min} and {max} chars.")]
    InvalidTitle {
        /// Minimum number of characters.
        min: usize,
        /// Maximum number of characters.
        max: usize,
    },

    /// A record with the exact same title already exists.
    #[error("A post with this title has already been created.")]
    DuplicateTitle,

    /// Content is empty or too short.
    #[error("Please provide a content with at least {min} chars.")]
    InvalidContent {
        /// Minimum number of characters.
        min: usize,
    },

    /// The store refused to create the record.
    #[error("An error occured when trying to create your post.")]
    CreationFailed,

    /// The record identifier is not made of digits only.
    #[error("Post ID should only contain digits.")]
    InvalidIdFormat,

    /// No record exists with the requested identifier.
    #[error("Post not found.")]
    RecordNotFound,

    /// The presented token does not match the record's token.
    #[error("You cannot delete this post.")]
    DeletionDenied,

    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedRequest(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}
