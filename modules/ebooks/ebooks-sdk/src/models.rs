//! Contract models shared by the REST layer, the domain and other consumers.

use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Lowest accepted review rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted review rating.
pub const MAX_RATING: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ebook {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    pub publication_date: Date,
}

/// An ebook together with its reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EbookFull {
    pub ebook: Ebook,
    pub reviews: Vec<Review>,
}

#[derive(Debug, Clone)]
pub struct NewEbook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub publication_date: Date,
}

/// Partial update of an ebook; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct EbookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<Date>,
}

impl From<NewEbook> for EbookPatch {
    fn from(full: NewEbook) -> Self {
        Self {
            title: Some(full.title),
            author: Some(full.author),
            description: Some(full.description),
            publication_date: Some(full.publication_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i64,
    pub ebook_id: i64,
    /// `None` once the author's account has been removed.
    pub review_author: Option<Uuid>,
    pub review_date: OffsetDateTime,
    pub review_updt: OffsetDateTime,
    pub review_text: String,
    pub review_rating: i32,
}

/// Payload for creating a review. The ebook and the author are never part of
/// the payload; they come from the path and the security context.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub review_text: String,
    pub review_rating: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub review_text: Option<String>,
    pub review_rating: Option<i32>,
}

impl From<NewReview> for ReviewPatch {
    fn from(full: NewReview) -> Self {
        Self {
            review_text: Some(full.review_text),
            review_rating: Some(full.review_rating),
        }
    }
}
