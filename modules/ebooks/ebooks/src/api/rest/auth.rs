use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use ebooks_sdk::SecurityContext;

use crate::api::rest::problem::Problem;
use crate::infra::auth::StaticTokenAuthenticator;

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<StaticTokenAuthenticator>,
}

/// Resolves the requester identity and stores it as a request extension.
///
/// 1. Skips CORS preflight requests
/// 2. No `Authorization` header: inserts an anonymous `SecurityContext`
/// 3. Otherwise the header must carry a known bearer token, or the request
///    is rejected with 401
pub async fn authn_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let ctx = match req.headers().get(header::AUTHORIZATION) {
        None => SecurityContext::anonymous(),
        Some(value) => {
            let Some(token) = extract_bearer_token(value) else {
                return Problem::new(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                    "Missing or invalid Authorization header",
                )
                .into_response();
            };

            let Some(ctx) = state.authenticator.authenticate(token) else {
                tracing::debug!("AuthN rejected: unknown bearer token");
                return Problem::new(
                    StatusCode::UNAUTHORIZED,
                    "Unauthorized",
                    "Authentication failed",
                )
                .into_response();
            };
            ctx
        }
    };

    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn extract_bearer_token(value: &HeaderValue) -> Option<&str> {
    value
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// OPTIONS with both `Origin` and `Access-Control-Request-Method`.
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
