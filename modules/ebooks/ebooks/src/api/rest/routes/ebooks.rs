use axum::Router;
use axum::http::Method;
use axum::routing::{delete, get, patch, post, put};

use super::handlers;
use crate::api::rest::openapi::{OpenApiRegistry, OperationSpec, ResponseBody};

pub(super) fn register_ebook_routes(
    mut router: Router,
    openapi: &mut OpenApiRegistry,
) -> anyhow::Result<Router> {
    // GET /ebooks/ - List ebooks with their reviews
    router = openapi.route(
        router,
        OperationSpec::new(Method::GET, "/ebooks/", "ebooks.list_ebooks")
            .summary("List ebooks with their reviews")
            .tag("ebooks")
            .response(200, "All ebooks", ResponseBody::Many("EbookDto"))
            .problem(500, "Internal server error"),
        get(handlers::list_ebooks),
    )?;

    // POST /ebooks/ - Create an ebook (admin)
    router = openapi.route(
        router,
        OperationSpec::new(Method::POST, "/ebooks/", "ebooks.create_ebook")
            .summary("Create an ebook")
            .tag("ebooks")
            .authenticated()
            .json_request("EbookReq")
            .response(201, "Created ebook", ResponseBody::One("EbookDto"))
            .problem(400, "Validation failed")
            .problem(401, "Authentication required")
            .problem(403, "Admin privilege required")
            .problem(500, "Internal server error"),
        post(handlers::create_ebook),
    )?;

    // GET /ebooks/{id}/ - Get an ebook with its reviews
    router = openapi.route(
        router,
        OperationSpec::new(Method::GET, "/ebooks/{id}/", "ebooks.get_ebook")
            .summary("Get ebook by id")
            .tag("ebooks")
            .response(200, "Ebook found", ResponseBody::One("EbookDto"))
            .problem(404, "Ebook not found")
            .problem(500, "Internal server error"),
        get(handlers::get_ebook),
    )?;

    // PUT /ebooks/{id}/ - Replace an ebook (admin)
    router = openapi.route(
        router,
        OperationSpec::new(Method::PUT, "/ebooks/{id}/", "ebooks.replace_ebook")
            .summary("Replace an ebook")
            .tag("ebooks")
            .authenticated()
            .json_request("EbookReq")
            .response(200, "Updated ebook", ResponseBody::One("EbookDto"))
            .problem(400, "Validation failed")
            .problem(401, "Authentication required")
            .problem(403, "Admin privilege required")
            .problem(404, "Ebook not found")
            .problem(500, "Internal server error"),
        put(handlers::replace_ebook),
    )?;

    // PATCH /ebooks/{id}/ - Partially update an ebook (admin)
    router = openapi.route(
        router,
        OperationSpec::new(Method::PATCH, "/ebooks/{id}/", "ebooks.patch_ebook")
            .summary("Partially update an ebook")
            .tag("ebooks")
            .authenticated()
            .json_request("EbookPatchReq")
            .response(200, "Updated ebook", ResponseBody::One("EbookDto"))
            .problem(400, "Validation failed")
            .problem(401, "Authentication required")
            .problem(403, "Admin privilege required")
            .problem(404, "Ebook not found")
            .problem(500, "Internal server error"),
        patch(handlers::patch_ebook),
    )?;

    // DELETE /ebooks/{id}/ - Delete an ebook and its reviews (admin)
    router = openapi.route(
        router,
        OperationSpec::new(Method::DELETE, "/ebooks/{id}/", "ebooks.delete_ebook")
            .summary("Delete an ebook and its reviews")
            .tag("ebooks")
            .authenticated()
            .response(204, "Ebook deleted", ResponseBody::Empty)
            .problem(401, "Authentication required")
            .problem(403, "Admin privilege required")
            .problem(404, "Ebook not found")
            .problem(500, "Internal server error"),
        delete(handlers::delete_ebook),
    )?;

    Ok(router)
}
