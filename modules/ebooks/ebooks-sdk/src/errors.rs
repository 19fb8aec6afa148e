//! Public error types for the `ebooks` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Message returned when a user tries to review the same ebook twice.
pub const DUPLICATE_REVIEW_MESSAGE: &str = "You have already reviewed this book.";

/// Errors that can be returned by the `EbooksClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EbooksError {
    /// Resource with the specified ID was not found.
    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// The operation needs an authenticated identity.
    #[error("Authentication required")]
    Unauthenticated,

    /// Access denied (authorization failure).
    #[error("Access denied")]
    Forbidden,

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The requester already reviewed this ebook.
    #[error("You have already reviewed this book.")]
    DuplicateReview,

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl EbooksError {
    #[must_use]
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
