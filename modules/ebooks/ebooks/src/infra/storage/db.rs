//! Connection pool and schema helpers.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, SqlErr};
use sea_orm_migration::MigratorTrait;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::migrations::Migrator;
use crate::domain::error::DomainError;

/// Database connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    /// `sqlite://...` or `postgres://...`
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_max_conns")]
    pub max_conns: u32,
    #[serde(default = "default_min_conns")]
    pub min_conns: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_conns: default_max_conns(),
            min_conns: default_min_conns(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

fn default_url() -> String {
    "sqlite://ebooks.db?mode=rwc".to_owned()
}

fn default_max_conns() -> u32 {
    10
}

fn default_min_conns() -> u32 {
    1
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

/// Map a storage error into the domain.
///
/// A unique-index violation can only come from the `(ebook_id, review_author)`
/// index, so it becomes [`DomainError::DuplicateReview`].
#[must_use]
#[allow(clippy::needless_pass_by_value)]
pub fn db_err(e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateReview,
        _ => DomainError::database(e.to_string()),
    }
}

/// Open a connection pool. SQLite connections enforce foreign keys.
pub async fn connect_db(cfg: &DbConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_conns)
        .min_connections(cfg.min_conns)
        .acquire_timeout(Duration::from_secs(cfg.acquire_timeout_secs))
        .sqlx_logging(false);

    let db = Database::connect(opts).await?;
    info!(backend = ?db.get_database_backend(), "Database connected");
    Ok(db)
}

/// Apply every pending migration.
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    Migrator::up(db, None).await?;
    info!("Ebooks migrations applied");
    Ok(())
}
