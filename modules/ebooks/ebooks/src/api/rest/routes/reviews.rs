use axum::Router;
use axum::http::Method;
use axum::routing::{delete, get, patch, post, put};

use super::handlers;
use crate::api::rest::openapi::{OpenApiRegistry, OperationSpec, ResponseBody};

pub(super) fn register_review_routes(
    mut router: Router,
    openapi: &mut OpenApiRegistry,
) -> anyhow::Result<Router> {
    // GET /ebooks/{id}/reviews/ - The requester's own reviews of an ebook
    router = openapi.route(
        router,
        OperationSpec::new(Method::GET, "/ebooks/{id}/reviews/", "ebooks.list_reviews")
            .summary("List the requester's reviews of an ebook")
            .tag("reviews")
            .response(200, "Own reviews, empty when anonymous", ResponseBody::Many("ReviewDto"))
            .problem(500, "Internal server error"),
        get(handlers::list_reviews),
    )?;

    // POST /ebooks/{id}/reviews/ - Review an ebook
    router = openapi.route(
        router,
        OperationSpec::new(Method::POST, "/ebooks/{id}/reviews/", "ebooks.create_review")
            .summary("Review an ebook")
            .tag("reviews")
            .authenticated()
            .json_request("ReviewReq")
            .response(201, "Created review", ResponseBody::One("ReviewDto"))
            .problem(400, "Validation failed or ebook already reviewed")
            .problem(401, "Authentication required")
            .problem(404, "Ebook not found")
            .problem(500, "Internal server error"),
        post(handlers::create_review),
    )?;

    // GET /reviews/{id}/ - Get a review
    router = openapi.route(
        router,
        OperationSpec::new(Method::GET, "/reviews/{id}/", "ebooks.get_review")
            .summary("Get review by id")
            .tag("reviews")
            .response(200, "Review found", ResponseBody::One("ReviewDto"))
            .problem(404, "Review not found")
            .problem(500, "Internal server error"),
        get(handlers::get_review),
    )?;

    // PUT /reviews/{id}/ - Replace a review (author)
    router = openapi.route(
        router,
        OperationSpec::new(Method::PUT, "/reviews/{id}/", "ebooks.replace_review")
            .summary("Replace a review")
            .tag("reviews")
            .authenticated()
            .json_request("ReviewReplaceReq")
            .response(200, "Updated review", ResponseBody::One("ReviewDto"))
            .problem(400, "Validation failed")
            .problem(401, "Authentication required")
            .problem(403, "Only the author may change a review")
            .problem(404, "Review not found")
            .problem(500, "Internal server error"),
        put(handlers::replace_review),
    )?;

    // PATCH /reviews/{id}/ - Partially update a review (author)
    router = openapi.route(
        router,
        OperationSpec::new(Method::PATCH, "/reviews/{id}/", "ebooks.patch_review")
            .summary("Partially update a review")
            .tag("reviews")
            .authenticated()
            .json_request("ReviewPatchReq")
            .response(200, "Updated review", ResponseBody::One("ReviewDto"))
            .problem(400, "Validation failed")
            .problem(401, "Authentication required")
            .problem(403, "Only the author may change a review")
            .problem(404, "Review not found")
            .problem(500, "Internal server error"),
        patch(handlers::patch_review),
    )?;

    // DELETE /reviews/{id}/ - Delete a review (author)
    router = openapi.route(
        router,
        OperationSpec::new(Method::DELETE, "/reviews/{id}/", "ebooks.delete_review")
            .summary("Delete a review")
            .tag("reviews")
            .authenticated()
            .response(204, "Review deleted", ResponseBody::Empty)
            .problem(401, "Authentication required")
            .problem(403, "Only the author may delete a review")
            .problem(404, "Review not found")
            .problem(500, "Internal server error"),
        delete(handlers::delete_review),
    )?;

    // DELETE /authors/{user_id}/reviews-authorship/ - Detach a removed user (admin)
    router = openapi.route(
        router,
        OperationSpec::new(
            Method::DELETE,
            "/authors/{user_id}/reviews-authorship/",
            "ebooks.detach_author",
        )
        .summary("Detach a removed user from their reviews")
        .tag("reviews")
        .authenticated()
        .response(200, "Number of detached reviews", ResponseBody::One("DetachAuthorDto"))
        .problem(401, "Authentication required")
        .problem(403, "Admin privilege required")
        .problem(404, "Malformed user id")
        .problem(500, "Internal server error"),
        delete(handlers::detach_author),
    )?;

    Ok(router)
}
