//! One handler per verb. Each one only translates HTTP to a service call;
//! policies, guards and scoping are applied by the service.

use std::sync::Arc;

use axum::Extension;
use axum::http::StatusCode;
use ebooks_sdk::SecurityContext;
use uuid::Uuid;

use crate::api::rest::dto::{
    DetachAuthorDto, EbookDto, EbookPatchReq, EbookReq, ReviewDto, ReviewPatchReq,
    ReviewReplaceReq, ReviewReq,
};
use crate::api::rest::extract::{Json, Path};
use crate::api::rest::problem::ApiResult;
use crate::module::ConcreteAppServices;

// ==================== Ebook Handlers ====================

/// List all ebooks with their reviews
#[tracing::instrument(
    skip(svc, ctx),
    fields(requester.id = ?ctx.subject_id())
)]
pub(crate) async fn list_ebooks(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
) -> ApiResult<Json<Vec<EbookDto>>> {
    let ebooks = svc.ebooks.list_ebooks(&ctx).await?;
    Ok(Json(ebooks.into_iter().map(EbookDto::from).collect()))
}

/// Create a new ebook
#[tracing::instrument(
    skip(svc, ctx, req_body),
    fields(
        ebook.title = %req_body.title,
        creator.id = ?ctx.subject_id()
    )
)]
pub(crate) async fn create_ebook(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Json(req_body): Json<EbookReq>,
) -> ApiResult<(StatusCode, Json<EbookDto>)> {
    let created = svc.ebooks.create_ebook(&ctx, req_body.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a specific ebook with its reviews
#[tracing::instrument(
    skip(svc, ctx),
    fields(ebook.id = id, requester.id = ?ctx.subject_id())
)]
pub(crate) async fn get_ebook(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<EbookDto>> {
    let ebook = svc.ebooks.get_ebook(&ctx, id).await?;
    Ok(Json(ebook.into()))
}

/// Replace every writable field of an ebook
#[tracing::instrument(
    skip(svc, ctx, req_body),
    fields(ebook.id = id, updater.id = ?ctx.subject_id())
)]
pub(crate) async fn replace_ebook(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
    Json(req_body): Json<EbookReq>,
) -> ApiResult<Json<EbookDto>> {
    let ebook = svc.ebooks.replace_ebook(&ctx, id, req_body.into()).await?;
    Ok(Json(ebook.into()))
}

/// Update the supplied fields of an ebook
#[tracing::instrument(
    skip(svc, ctx, req_body),
    fields(ebook.id = id, updater.id = ?ctx.subject_id())
)]
pub(crate) async fn patch_ebook(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
    Json(req_body): Json<EbookPatchReq>,
) -> ApiResult<Json<EbookDto>> {
    let ebook = svc.ebooks.patch_ebook(&ctx, id, req_body.into()).await?;
    Ok(Json(ebook.into()))
}

/// Delete an ebook and its reviews
#[tracing::instrument(
    skip(svc, ctx),
    fields(ebook.id = id, deleter.id = ?ctx.subject_id())
)]
pub(crate) async fn delete_ebook(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    svc.ebooks.delete_ebook(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ==================== Review Handlers ====================

/// List the requester's own reviews of an ebook
#[tracing::instrument(
    skip(svc, ctx),
    fields(ebook.id = ebook_id, requester.id = ?ctx.subject_id())
)]
pub(crate) async fn list_reviews(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(ebook_id): Path<i64>,
) -> ApiResult<Json<Vec<ReviewDto>>> {
    let reviews = svc.reviews.list_reviews(&ctx, ebook_id).await?;
    Ok(Json(reviews.into_iter().map(ReviewDto::from).collect()))
}

/// Review an ebook as the requester
#[tracing::instrument(
    skip(svc, ctx, req_body),
    fields(
        ebook.id = ebook_id,
        review.rating = req_body.review_rating,
        creator.id = ?ctx.subject_id()
    )
)]
pub(crate) async fn create_review(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(ebook_id): Path<i64>,
    Json(req_body): Json<ReviewReq>,
) -> ApiResult<(StatusCode, Json<ReviewDto>)> {
    let created = svc
        .reviews
        .create_review(&ctx, ebook_id, req_body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a review by id
#[tracing::instrument(
    skip(svc, ctx),
    fields(review.id = id, requester.id = ?ctx.subject_id())
)]
pub(crate) async fn get_review(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<ReviewDto>> {
    let review = svc.reviews.get_review(&ctx, id).await?;
    Ok(Json(review.into()))
}

/// Replace the text and rating of the requester's review
#[tracing::instrument(
    skip(svc, ctx, req_body),
    fields(review.id = id, updater.id = ?ctx.subject_id())
)]
pub(crate) async fn replace_review(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
    Json(req_body): Json<ReviewReplaceReq>,
) -> ApiResult<Json<ReviewDto>> {
    let review = svc
        .reviews
        .replace_review(&ctx, id, req_body.into())
        .await?;
    Ok(Json(review.into()))
}

/// Update the supplied fields of the requester's review
#[tracing::instrument(
    skip(svc, ctx, req_body),
    fields(review.id = id, updater.id = ?ctx.subject_id())
)]
pub(crate) async fn patch_review(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
    Json(req_body): Json<ReviewPatchReq>,
) -> ApiResult<Json<ReviewDto>> {
    let review = svc.reviews.patch_review(&ctx, id, req_body.into()).await?;
    Ok(Json(review.into()))
}

/// Delete the requester's review
#[tracing::instrument(
    skip(svc, ctx),
    fields(review.id = id, deleter.id = ?ctx.subject_id())
)]
pub(crate) async fn delete_review(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    svc.reviews.delete_review(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Detach a removed user from every review they wrote
#[tracing::instrument(
    skip(svc, ctx),
    fields(user.id = %user_id, requester.id = ?ctx.subject_id())
)]
pub(crate) async fn detach_author(
    Extension(ctx): Extension<SecurityContext>,
    Extension(svc): Extension<Arc<ConcreteAppServices>>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Json<DetachAuthorDto>> {
    let detached = svc.reviews.detach_author(&ctx, user_id).await?;
    Ok(Json(DetachAuthorDto { user_id, detached }))
}
