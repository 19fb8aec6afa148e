//! CORS layer built from `server.cors`.

use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderName, HeaderValue, Method};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::config::ServerConfig;

/// Detailed CORS settings. `"*"` in origins or headers means any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub allow_credentials: bool,
    /// Max age for preflight caching in seconds
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
            allowed_methods: ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            allowed_headers: vec!["*".to_owned()],
            allow_credentials: false,
            max_age_seconds: 600,
        }
    }
}

fn is_wildcard(values: &[String]) -> bool {
    values.iter().any(|v| v == "*")
}

/// `None` when CORS is disabled. Without a `cors` section the layer is
/// permissive.
pub fn build_cors_layer(cfg: &ServerConfig) -> anyhow::Result<Option<CorsLayer>> {
    if !cfg.cors_enabled {
        return Ok(None);
    }
    let Some(cors) = &cfg.cors else {
        return Ok(Some(CorsLayer::permissive()));
    };

    if cors.allow_credentials
        && (is_wildcard(&cors.allowed_origins) || is_wildcard(&cors.allowed_headers))
    {
        anyhow::bail!("server.cors: allow_credentials cannot be combined with \"*\"");
    }

    let origins = if is_wildcard(&cors.allowed_origins) {
        AllowOrigin::any()
    } else {
        let list = cors
            .allowed_origins
            .iter()
            .map(|o| {
                HeaderValue::from_str(o).with_context(|| format!("server.cors: bad origin {o:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(list)
    };

    let methods = cors
        .allowed_methods
        .iter()
        .map(|m| {
            Method::from_bytes(m.as_bytes())
                .with_context(|| format!("server.cors: bad method {m:?}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let headers = if is_wildcard(&cors.allowed_headers) {
        AllowHeaders::any()
    } else {
        let list = cors
            .allowed_headers
            .iter()
            .map(|h| {
                HeaderName::from_bytes(h.as_bytes())
                    .with_context(|| format!("server.cors: bad header {h:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowHeaders::list(list)
    };

    Ok(Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(AllowMethods::list(methods))
            .allow_headers(headers)
            .allow_credentials(cors.allow_credentials)
            .max_age(Duration::from_secs(cors.max_age_seconds)),
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn server(cors: Option<CorsConfig>) -> ServerConfig {
        ServerConfig {
            cors_enabled: true,
            cors,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn disabled_by_default() {
        assert!(build_cors_layer(&ServerConfig::default()).unwrap().is_none());
    }

    #[test]
    fn enabled_without_details_is_permissive() {
        assert!(build_cors_layer(&server(None)).unwrap().is_some());
    }

    #[test]
    fn explicit_lists_are_accepted() {
        let cfg = server(Some(CorsConfig {
            allowed_origins: vec!["https://example.com".to_owned()],
            allowed_headers: vec!["content-type".to_owned(), "authorization".to_owned()],
            allow_credentials: true,
            ..CorsConfig::default()
        }));
        assert!(build_cors_layer(&cfg).unwrap().is_some());
    }

    #[test]
    fn credentials_with_wildcard_are_rejected() {
        let cfg = server(Some(CorsConfig {
            allow_credentials: true,
            ..CorsConfig::default()
        }));
        assert!(build_cors_layer(&cfg).is_err());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        let cfg = server(Some(CorsConfig {
            allowed_methods: vec!["NOT A METHOD".to_owned()],
            ..CorsConfig::default()
        }));
        assert!(build_cors_layer(&cfg).is_err());

        let cfg = server(Some(CorsConfig {
            allowed_headers: vec!["bad header".to_owned()],
            ..CorsConfig::default()
        }));
        assert!(build_cors_layer(&cfg).is_err());
    }
}
