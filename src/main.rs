use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod cli;
mod config;
mod error;
mod extract;
mod handlers;
mod router;
mod schemas;
mod services;

#[cfg(test)]
mod test_utils;

use cli::Cli;

/// Main entry point for the calcbook application.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calcbook=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // `.env` must be loaded before clap reads env-backed arguments
    dotenvy::dotenv().ok();

    info!("calcbook {} starting", env!("CARGO_PKG_VERSION"));
    Cli::parse().run().await
}
