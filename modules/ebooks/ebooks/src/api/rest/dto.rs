//! Wire representations.
//!
//! Reviews never carry their ebook back-reference; ebooks always embed
//! their reviews, read-only.

use ebooks_sdk::{Ebook, EbookFull, EbookPatch, NewEbook, NewReview, Review, ReviewPatch};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use utoipa::ToSchema;
use uuid::Uuid;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReviewDto {
    pub id: i64,
    /// `null` once the author has been detached.
    pub review_author: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub review_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub review_updt: OffsetDateTime,
    pub review_text: String,
    #[schema(minimum = 1, maximum = 5)]
    pub review_rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EbookDto {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "1965-08-01")]
    pub publication_date: Date,
    pub reviews: Vec<ReviewDto>,
}

/// Body of `POST /ebooks/` and `PUT /ebooks/{id}/`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EbookReq {
    pub title: String,
    pub author: String,
    pub description: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String, format = Date, example = "1965-08-01")]
    pub publication_date: Date,
}

/// Body of `PATCH /ebooks/{id}/`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EbookPatchReq {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "iso_date::option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub publication_date: Option<Date>,
}

/// Body of `POST /ebooks/{id}/reviews/`.
///
/// Any `ebook` or `review_author` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewReq {
    #[serde(default)]
    pub review_text: String,
    #[schema(minimum = 1, maximum = 5)]
    pub review_rating: i32,
}

/// Body of `PUT /reviews/{id}/`. Both fields are required.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReviewReplaceReq {
    pub review_text: String,
    #[schema(minimum = 1, maximum = 5)]
    pub review_rating: i32,
}

/// Body of `PATCH /reviews/{id}/`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReviewPatchReq {
    pub review_text: Option<String>,
    pub review_rating: Option<i32>,
}

/// Result of detaching a user from their reviews.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DetachAuthorDto {
    pub user_id: Uuid,
    pub detached: u64,
}

impl From<Review> for ReviewDto {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            review_author: r.review_author,
            review_date: r.review_date,
            review_updt: r.review_updt,
            review_text: r.review_text,
            review_rating: r.review_rating,
        }
    }
}

impl From<EbookFull> for EbookDto {
    fn from(full: EbookFull) -> Self {
        let EbookFull { ebook, reviews } = full;
        Self {
            reviews: reviews.into_iter().map(Into::into).collect(),
            ..Self::from(ebook)
        }
    }
}

impl From<Ebook> for EbookDto {
    fn from(e: Ebook) -> Self {
        Self {
            id: e.id,
            title: e.title,
            author: e.author,
            description: e.description,
            publication_date: e.publication_date,
            reviews: Vec::new(),
        }
    }
}

impl From<EbookReq> for NewEbook {
    fn from(req: EbookReq) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
            publication_date: req.publication_date,
        }
    }
}

impl From<EbookPatchReq> for EbookPatch {
    fn from(req: EbookPatchReq) -> Self {
        Self {
            title: req.title,
            author: req.author,
            description: req.description,
            publication_date: req.publication_date,
        }
    }
}

impl From<ReviewReq> for NewReview {
    fn from(req: ReviewReq) -> Self {
        Self {
            review_text: req.review_text,
            review_rating: req.review_rating,
        }
    }
}

impl From<ReviewReplaceReq> for NewReview {
    fn from(req: ReviewReplaceReq) -> Self {
        Self {
            review_text: req.review_text,
            review_rating: req.review_rating,
        }
    }
}

impl From<ReviewPatchReq> for ReviewPatch {
    fn from(req: ReviewPatchReq) -> Self {
        Self {
            review_text: req.review_text,
            review_rating: req.review_rating,
        }
    }
}
