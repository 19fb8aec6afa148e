use ebooks_sdk::{DUPLICATE_REVIEW_MESSAGE, EbooksError};
use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Ebook not found: {id}")]
    EbookNotFound { id: i64 },

    #[error("Review not found: {id}")]
    ReviewNotFound { id: i64 },

    #[error("Authentication credentials were not provided.")]
    Unauthenticated,

    #[error("You do not have permission to perform this action.")]
    Forbidden,

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    /// Raised by the application-level guard and by the storage-level unique
    /// index on `(ebook_id, review_author)`; both mean the same thing.
    #[error("{}", DUPLICATE_REVIEW_MESSAGE)]
    DuplicateReview,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    #[must_use]
    pub fn ebook_not_found(id: i64) -> Self {
        Self::EbookNotFound { id }
    }

    #[must_use]
    pub fn review_not_found(id: i64) -> Self {
        Self::ReviewNotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

/// Convert domain errors to SDK errors for public API consumption.
impl From<DomainError> for EbooksError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::EbookNotFound { id } => EbooksError::not_found("Ebook", id),
            DomainError::ReviewNotFound { id } => EbooksError::not_found("Review", id),
            DomainError::Unauthenticated => EbooksError::Unauthenticated,
            DomainError::Forbidden => EbooksError::forbidden(),
            DomainError::Validation { field, message } => {
                EbooksError::validation(format!("{field}: {message}"))
            }
            DomainError::DuplicateReview => EbooksError::DuplicateReview,
            DomainError::Database { .. } => EbooksError::internal(),
        }
    }
}
