//! Domain service layer - business logic and rules.
//!
//! Per-resource submodules:
//! - `ebooks` - Ebook CRUD guarded by [`AdminOrReadOnly`](crate::domain::policy::AdminOrReadOnly)
//! - `reviews` - Review CRUD guarded by
//!   [`ReviewAuthorOrReadOnly`](crate::domain::policy::ReviewAuthorOrReadOnly), the scoped
//!   list resolver and the one-review-per-user creation guard
//!
//! ## Layering Rules
//!
//! The domain layer:
//! - **MAY** import: `ebooks_sdk` (contract types), repository traits, `sea_orm` connection traits
//! - **MUST NOT** import: `api::*` (one-way dependency: API → Domain)
//!
//! ## Authorization
//!
//! Every public operation evaluates its policy before the store is touched
//! (request-scoped policies) or right after the target row is loaded
//! (object-scoped policies). Handlers never decide access themselves.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use time::OffsetDateTime;

use crate::domain::repos::{EbooksRepository, ReviewsRepository};

mod ebooks;
mod reviews;

pub(crate) use ebooks::EbooksService;
pub(crate) use reviews::ReviewsService;

/// Verb each service operation is authorized as.
pub(crate) mod actions {
    use http::Method;

    pub const LIST: Method = Method::GET;
    pub const GET: Method = Method::GET;
    pub const CREATE: Method = Method::POST;
    pub const REPLACE: Method = Method::PUT;
    pub const PATCH: Method = Method::PATCH;
    pub const DELETE: Method = Method::DELETE;
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_title_length: usize,
    pub max_author_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_title_length: 100,
            max_author_length: 100,
        }
    }
}

/// Current time truncated to whole milliseconds so values survive a
/// round-trip through every supported backend unchanged.
pub(crate) fn now_utc() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now.replace_millisecond(now.millisecond()).unwrap_or(now)
}

// DI Container - aggregates all domain services
pub(crate) struct AppServices<ER, RR>
where
    ER: EbooksRepository + 'static,
    RR: ReviewsRepository + 'static,
{
    pub(crate) ebooks: EbooksService<ER, RR>,
    pub(crate) reviews: ReviewsService<ER, RR>,
}

impl<ER, RR> AppServices<ER, RR>
where
    ER: EbooksRepository + 'static,
    RR: ReviewsRepository + 'static,
{
    pub fn new(
        ebooks_repo: ER,
        reviews_repo: RR,
        db: DatabaseConnection,
        config: ServiceConfig,
    ) -> Self {
        let ebooks_repo = Arc::new(ebooks_repo);
        let reviews_repo = Arc::new(reviews_repo);

        Self {
            ebooks: EbooksService::new(
                db.clone(),
                Arc::clone(&ebooks_repo),
                Arc::clone(&reviews_repo),
                config,
            ),
            reviews: ReviewsService::new(db, ebooks_repo, reviews_repo),
        }
    }
}

#[cfg(test)]
mod tests_ebooks;

#[cfg(test)]
mod tests_reviews;
