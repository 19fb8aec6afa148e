//! Ebooks SDK
//!
//! Public contract of the `ebooks` module:
//! - `EbooksClientV1` - trait for in-process (or remote) consumers
//! - `Ebook`, `Review` and their create/patch types
//! - `SecurityContext` - requester identity passed into every call
//! - `EbooksError` - public error type
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod errors;
pub mod models;
pub mod security;

pub use api::EbooksClientV1;
pub use errors::{DUPLICATE_REVIEW_MESSAGE, EbooksError};
pub use models::{
    Ebook, EbookFull, EbookPatch, MAX_RATING, MIN_RATING, NewEbook, NewReview, Review,
    ReviewPatch,
};
pub use security::{SecurityContext, SecurityContextBuilder};
