//! Ebooks Module
//!
//! A catalogue of ebooks with reader reviews, served over REST and usable
//! in-process through `EbooksClientV1`.
//!
//! ## Layering
//!
//! - `ebooks-sdk` - public contract: models, `EbooksError`, `EbooksClientV1`,
//!   `SecurityContext`
//! - `api` - axum handlers, DTOs, RFC 9457 problem mapping, bearer-token
//!   middleware and the `OpenAPI` document
//! - `domain` - services, access policies, repository traits and the
//!   in-process client. MUST NOT import `api::*`
//! - `infra` - `SeaORM` entities, repositories, migrations and the static
//!   token authenticator
//!
//! ## Access rules
//!
//! - Ebooks: anyone may read, only admins may write
//! - Reviews: any authenticated user may review an ebook once; only the
//!   author may change or delete a review
//! - The nested review list only shows the requester's own reviews
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// === PUBLIC API (from SDK) ===
pub use ebooks_sdk::{
    Ebook, EbookFull, EbookPatch, EbooksClientV1, EbooksError, NewEbook, NewReview, Review,
    ReviewPatch, SecurityContext,
};

// === MODULE DEFINITION ===
pub mod module;
pub use module::EbooksModule;

// === INTERNAL MODULES ===
// Exposed for the binary and integration tests. Only the SDK types are a
// stable API.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

#[cfg(test)]
mod test_support;
