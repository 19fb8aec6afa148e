//! Static bearer-token authentication.
//!
//! - `static_tokens`: specific tokens map to specific identities
//! - `accept_all`: any non-empty token maps to the default identity
//!   (development only)

use std::collections::HashMap;

use ebooks_sdk::SecurityContext;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subject returned by `accept_all` mode when none is configured.
pub const DEFAULT_SUBJECT_ID: Uuid = Uuid::from_u128(1);

/// Authentication configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    pub mode: AuthNMode,

    /// Identity returned in `accept_all` mode.
    pub default_identity: IdentityConfig,

    /// Token-to-identity mappings for `static_tokens` mode.
    pub tokens: Vec<TokenMapping>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthNMode {
    #[default]
    StaticTokens,
    AcceptAll,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    pub subject_id: Uuid,
    pub is_admin: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            subject_id: DEFAULT_SUBJECT_ID,
            is_admin: false,
        }
    }
}

/// Maps a static token to a specific identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenMapping {
    /// The bearer token value to match.
    pub token: String,
    pub subject_id: Uuid,
    #[serde(default)]
    pub is_admin: bool,
}

/// Resolves bearer tokens to security contexts.
#[derive(Debug, Clone)]
pub struct StaticTokenAuthenticator {
    mode: AuthNMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
}

impl StaticTokenAuthenticator {
    #[must_use]
    pub fn from_config(cfg: &AuthConfig) -> Self {
        let token_map = cfg
            .tokens
            .iter()
            .map(|m| {
                (
                    m.token.clone(),
                    IdentityConfig {
                        subject_id: m.subject_id,
                        is_admin: m.is_admin,
                    },
                )
            })
            .collect();

        Self {
            mode: cfg.mode.clone(),
            default_identity: cfg.default_identity.clone(),
            token_map,
        }
    }

    /// Returns `None` for an empty or unrecognized token.
    #[must_use]
    pub fn authenticate(&self, bearer_token: &str) -> Option<SecurityContext> {
        if bearer_token.is_empty() {
            return None;
        }

        let identity = match self.mode {
            AuthNMode::AcceptAll => &self.default_identity,
            AuthNMode::StaticTokens => self.token_map.get(bearer_token)?,
        };

        Some(
            SecurityContext::builder()
                .subject_id(identity.subject_id)
                .admin(identity.is_admin)
                .build(),
        )
    }
}
