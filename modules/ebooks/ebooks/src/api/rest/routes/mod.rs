//! REST route definitions: axum routing plus `OpenAPI` metadata.
//!
//! - `ebooks` - catalogue endpoints (list, get, create, replace, patch, delete)
//! - `reviews` - nested review list/create, review detail, author detach
//!
//! Routes orchestrate only. Handlers call `domain::service` and use `dto`
//! types for serialization.

use std::sync::Arc;

use axum::Router;

use crate::api::rest::handlers;
use crate::api::rest::openapi::OpenApiRegistry;
use crate::module::ConcreteAppServices;

mod ebooks;
mod reviews;

/// Register all routes for the ebooks module.
#[allow(clippy::needless_pass_by_value)]
pub(crate) fn register_routes(
    mut router: Router,
    openapi: &mut OpenApiRegistry,
    services: Arc<ConcreteAppServices>,
) -> anyhow::Result<Router> {
    router = ebooks::register_ebook_routes(router, openapi)?;
    router = reviews::register_review_routes(router, openapi)?;

    router = router.layer(axum::Extension(services));

    Ok(router)
}
