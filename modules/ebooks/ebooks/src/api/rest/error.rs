use axum::http::StatusCode;

use crate::api::rest::problem::Problem;
use crate::domain::error::DomainError;

/// Map domain error to RFC 9457 Problem
#[must_use]
pub fn domain_error_to_problem(e: &DomainError) -> Problem {
    match e {
        DomainError::EbookNotFound { id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("Ebook with id {id} was not found"),
        ),
        DomainError::ReviewNotFound { id } => Problem::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            format!("Review with id {id} was not found"),
        ),
        DomainError::Unauthenticated => {
            Problem::new(StatusCode::UNAUTHORIZED, "Unauthorized", e.to_string())
        }
        DomainError::Forbidden => Problem::new(StatusCode::FORBIDDEN, "Forbidden", e.to_string()),
        DomainError::Validation { field, message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", message.clone())
                .with_field(field.clone())
        }
        DomainError::DuplicateReview => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error", e.to_string())
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            Problem::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                "An internal database error occurred",
            )
        }
    }
}

/// Implement Into<Problem> for `DomainError` so `?` works in handlers
impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(&e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ebooks_sdk::DUPLICATE_REVIEW_MESSAGE;
    use tracing_test::traced_test;

    #[test]
    fn not_found_maps_to_404() {
        let p = Problem::from(DomainError::ebook_not_found(7));
        assert_eq!(p.status, 404);
        assert!(p.detail.contains('7'));
    }

    #[test]
    fn policy_denials_split_401_and_403() {
        assert_eq!(Problem::from(DomainError::Unauthenticated).status, 401);
        assert_eq!(Problem::from(DomainError::Forbidden).status, 403);
    }

    #[test]
    fn duplicate_review_is_a_validation_error() {
        let p = Problem::from(DomainError::DuplicateReview);
        assert_eq!(p.status, 400);
        assert_eq!(p.detail, DUPLICATE_REVIEW_MESSAGE);
    }

    #[test]
    fn validation_carries_field() {
        let p = Problem::from(DomainError::validation("review_rating", "out of range"));
        assert_eq!(p.status, 400);
        assert_eq!(p.field.as_deref(), Some("review_rating"));
        assert_eq!(p.detail, "out of range");
    }

    #[test]
    #[traced_test]
    fn database_errors_do_not_leak_details() {
        let p = Problem::from(DomainError::database("disk I/O error: secret_table"));
        assert_eq!(p.status, 500);
        assert!(!p.detail.contains("secret_table"));
        // The details only go to the log
        assert!(logs_contain("Database error occurred"));
        assert!(logs_contain("secret_table"));
    }
}
