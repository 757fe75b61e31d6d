//! # Quote Editor Server
//!
//! Binary that wires together all the components:
//! - Load `.env` and resolve configuration from the environment
//! - Initialize logging and trace export
//! - Derive the database connection options
//! - Start the HTTP server with request logging

mod telemetry;

use std::time::Duration;

use anyhow::Context;

use quotes_hex::inbound::HttpServer;
use quotes_types::{ConfigError, Configuration};

/// Address to bind, failing loudly on a malformed `PORT`.
fn listen_addr(config: &Configuration) -> Result<String, ConfigError> {
    let port = config.port.require()?;
    Ok(format!("0.0.0.0:{}", port))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Configuration::from_env();

    let telemetry = telemetry::init(&config.node_env)?;

    let result = serve(config).await;

    // Ensure traces are flushed before exit, whether or not the server failed
    telemetry.shutdown();
    result
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

async fn serve(config: Configuration) -> anyhow::Result<()> {
    let addr = listen_addr(&config).context("refusing to start")?;

    tracing::info!("Starting quote editor server in {} mode", config.node_env);

    let database = config.connection_options();
    tracing::info!(
        uri = %database.uri,
        retry_attempts = database.retry_attempts,
        retry_delay_ms = millis(database.retry_delay),
        socket_timeout_ms = millis(database.socket_timeout),
        "Database connection options"
    );

    let server = HttpServer::new(config);
    server.run(&addr).await
}
