//! Ebooks API server.

mod config;
mod cors;
mod http;
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::{Parser, Subcommand};
use ebooks::EbooksModule;
use ebooks::infra::auth::AuthNMode;
use ebooks::infra::storage::db::{connect_db, run_migrations};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "ebooks-server", version)]
#[command(about = "Ebooks and reviews REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Command {
    /// Apply migrations and serve the API (default)
    #[default]
    Run,
    /// Apply migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config.redacted())?);
        return Ok(());
    }

    logging::init(&config.logging, cli.verbose)?;

    match cli.command.unwrap_or_default() {
        Command::Run => run(config).await,
        Command::Migrate => migrate(&config).await,
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let db = connect_db(&config.database)
        .await
        .context("failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("failed to apply migrations")?;

    if config.auth.mode == AuthNMode::AcceptAll {
        tracing::warn!("auth.mode=accept_all: every bearer token is accepted");
    }

    let module = EbooksModule::default();
    module.init(db, &config.ebooks);
    let router = module.register_rest(Router::new(), &config.auth)?;
    let router = http::with_middleware(router, &config.server)?;

    http::serve(router, &config.server.bind_addr).await
}

async fn migrate(config: &AppConfig) -> anyhow::Result<()> {
    let db = connect_db(&config.database)
        .await
        .context("failed to connect to database")?;
    run_migrations(&db)
        .await
        .context("failed to apply migrations")?;
    tracing::info!("Migrations complete");
    Ok(())
}
