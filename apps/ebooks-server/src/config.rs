//! Layered server configuration: built-in defaults, then an optional YAML
//! file, then `EBOOKS__`-prefixed environment variables.

use std::path::Path;

use anyhow::Context;
use ebooks::config::EbooksConfig;
use ebooks::infra::auth::AuthConfig;
use ebooks::infra::storage::db::DbConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

use crate::cors::CorsConfig;

pub const ENV_PREFIX: &str = "EBOOKS__";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DbConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub ebooks: EbooksConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Global request body size limit in bytes
    pub body_limit_bytes: usize,
    pub request_timeout_secs: u64,
    pub cors_enabled: bool,
    /// Detailed CORS settings; permissive when enabled without them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            body_limit_bytes: 1024 * 1024,
            request_timeout_secs: 30,
            cors_enabled: false,
            cors: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load defaults, then `path` (if any), then the environment.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::figment(path)
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        let figment = Figment::from(Serialized::defaults(Self::default()));
        match path {
            Some(path) => figment.merge(Yaml::file_exact(path)),
            None => figment,
        }
    }

    /// Copy safe to print: bearer tokens are masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for mapping in &mut copy.auth.tokens {
            mapping.token = "***".to_owned();
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use std::io::Write;

    use ebooks::infra::auth::AuthNMode;

    use super::*;

    fn from_yaml(yaml: &str) -> anyhow::Result<AppConfig> {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        AppConfig::figment(Some(file.path()))
            .extract()
            .context("invalid configuration")
    }

    #[test]
    fn defaults_apply_without_a_file() {
        let cfg: AppConfig = AppConfig::figment(None).extract().unwrap();
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:8087");
        assert_eq!(cfg.database.url, "sqlite://ebooks.db?mode=rwc");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.ebooks.max_title_length, 100);
        assert_eq!(cfg.auth.mode, AuthNMode::StaticTokens);
        assert!(cfg.auth.tokens.is_empty());
    }

    #[test]
    fn yaml_overrides_only_what_it_names() {
        let cfg = from_yaml(
            r#"
server:
  bind_addr: "0.0.0.0:9000"
logging:
  format: json
auth:
  tokens:
    - token: "t"
      subject_id: "00000000-0000-0000-0000-000000000001"
      is_admin: true
"#,
        )
        .unwrap();

        assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(cfg.server.request_timeout_secs, 30);
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.auth.tokens.len(), 1);
        assert!(cfg.auth.tokens[0].is_admin);
    }

    #[test]
    fn cors_section_is_merged_with_its_defaults() {
        let cfg = from_yaml(
            r#"
server:
  cors_enabled: true
  cors:
    allowed_origins: ["https://example.com"]
"#,
        )
        .unwrap();

        assert!(cfg.server.cors_enabled);
        let cors = cfg.server.cors.unwrap();
        assert_eq!(cors.allowed_origins, ["https://example.com"]);
        assert_eq!(cors.max_age_seconds, 600);
        assert!(cors.allowed_methods.iter().any(|m| m == "OPTIONS"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(from_yaml("server:\n  bind: \"x\"\n").is_err());
        assert!(from_yaml("surprise: 1\n").is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let res: Result<AppConfig, _> =
            AppConfig::figment(Some(Path::new("/nonexistent/ebooks.yaml"))).extract();
        assert!(res.is_err());
    }

    #[test]
    fn redacted_masks_tokens() {
        let cfg = from_yaml(
            r#"
auth:
  tokens:
    - token: "secret"
      subject_id: "00000000-0000-0000-0000-000000000001"
"#,
        )
        .unwrap();
        let shown = serde_json::to_string(&cfg.redacted()).unwrap();
        assert!(!shown.contains("secret"));
        assert!(shown.contains("***"));
    }
}
