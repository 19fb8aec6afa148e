#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use ebooks::EbooksModule;
use ebooks::config::EbooksConfig;
use ebooks::infra::auth::{AuthConfig, TokenMapping};
use ebooks::infra::storage::db::{DbConfig, connect_db, run_migrations};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";

pub const ADMIN_ID: Uuid = Uuid::from_u128(0xad);
pub const ALICE_ID: Uuid = Uuid::from_u128(0xa1);
pub const BOB_ID: Uuid = Uuid::from_u128(0xb0);

fn auth_config() -> AuthConfig {
    let token = |token: &str, subject_id, is_admin| TokenMapping {
        token: token.to_owned(),
        subject_id,
        is_admin,
    };
    AuthConfig {
        tokens: vec![
            token(ADMIN_TOKEN, ADMIN_ID, true),
            token(ALICE_TOKEN, ALICE_ID, false),
            token(BOB_TOKEN, BOB_ID, false),
        ],
        ..AuthConfig::default()
    }
}

/// Fully initialized module over a fresh in-memory database.
pub async fn module() -> EbooksModule {
    let db = connect_db(&DbConfig {
        url: "sqlite::memory:".to_owned(),
        max_conns: 1,
        min_conns: 1,
        ..DbConfig::default()
    })
    .await
    .unwrap();
    run_migrations(&db).await.unwrap();

    let module = EbooksModule::default();
    module.init(db, &EbooksConfig::default());
    module
}

pub async fn app() -> Router {
    module()
        .await
        .register_rest(Router::new(), &auth_config())
        .unwrap()
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn dune() -> Value {
    serde_json::json!({
        "title": "Dune",
        "author": "Frank Herbert",
        "description": "Desert planet politics",
        "publication_date": "1965-08-01"
    })
}

/// Create an ebook as admin and return its id.
pub async fn seed_ebook(app: &Router) -> i64 {
    let (status, body) = send(app, Method::POST, "/ebooks/", Some(ADMIN_TOKEN), Some(dune())).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}
