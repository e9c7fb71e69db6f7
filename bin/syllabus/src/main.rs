//! Syllabus - training catalog GraphQL server.
//!
//! # Usage
//!
//! ```bash
//! # Start with an empty catalog
//! syllabus
//!
//! # Start with seed data and environment overrides
//! SEED_FILE=catalog.json GRAPHQL_PORT=8080 syllabus
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use syllabus_core::ports::Catalog;
use syllabus_graphql::{build_schema, serve_with_shutdown, ServerConfig};
use syllabus_storage::{CatalogSeed, MemoryCatalog};

/// Syllabus CLI - training catalog GraphQL server.
#[derive(Parser, Debug)]
#[command(name = "syllabus")]
#[command(about = "Syllabus - training catalog GraphQL server")]
#[command(version)]
struct Cli {
    /// Host to bind the GraphQL server to.
    #[arg(long, env = "GRAPHQL_HOST", default_value = "0.0.0.0")]
    host: String,

    /// GraphQL server port.
    #[arg(long, env = "GRAPHQL_PORT", default_value = "4000")]
    port: u16,

    /// JSON file with catalog seed data (trainings and discounts).
    #[arg(long, env = "SEED_FILE")]
    seed: Option<PathBuf>,

    /// Disable the GraphiQL playground.
    #[arg(long, default_value = "false")]
    no_playground: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let catalog = match &cli.seed {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading seed file {}", path.display()))?;
            let seed: CatalogSeed = serde_json::from_str(&raw)
                .with_context(|| format!("parsing seed file {}", path.display()))?;
            info!(
                trainings = seed.trainings.len(),
                discounts = seed.discounts.len(),
                "catalog seeded from file"
            );
            MemoryCatalog::from_seed(seed)
        }
        None => {
            warn!("no seed file given, starting with an empty catalog");
            MemoryCatalog::new()
        }
    };

    let schema = build_schema(Arc::new(catalog) as Arc<dyn Catalog>);
    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        enable_playground: !cli.no_playground,
    };

    serve_with_shutdown(schema, config, shutdown_signal())
        .await
        .context("GraphQL server failed")?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
