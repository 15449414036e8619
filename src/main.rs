//! Jyotish MCP Server - Entry Point
//!
//! This binary provides an MCP server via STDIO transport for Vedic chart calculations.

use anyhow::Result;
use rmcp::{transport::stdio, ServiceExt};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use jyotish::config::{Config, HIP_MAIN_DAT_ENV};
use jyotish::ephemeris::{catalog, init_ephemeris, install_local_catalog_override};
use jyotish::JyotishServer;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP communication)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Jyotish MCP Server");

    let config = Config::from_env();
    if let Some(path) = config.hip_main_dat.as_ref().filter(|p| !p.is_file()) {
        tracing::warn!("{} points to {}, which is not a file", HIP_MAIN_DAT_ENV, path.display());
    }

    // The catalog override must be in place before the first ayanamsa lookup
    install_local_catalog_override();
    init_ephemeris(config.ephe_path.as_deref());
    // Load Spica (downloading the catalog if needed) while the client connects
    tokio::task::spawn_blocking(catalog::spica);

    let server = JyotishServer::new();
    let service = server.serve(stdio()).await?;

    tracing::info!("Server initialized, waiting for requests...");

    service.waiting().await?;

    tracing::info!("Server shutting down");

    Ok(())
}
