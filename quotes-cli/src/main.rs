//! Quotes CLI
//!
//! Prints the configuration the server would resolve and checks a running
//! server.

use anyhow::Result;
use clap::{Parser, Subcommand};

use quotes_types::{Configuration, ConnectionOptions};

#[derive(Parser)]
#[command(name = "quotes")]
#[command(author, version, about = "Quote editor service CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration snapshot
    Config,
    /// Print the database connection options
    Database {
        /// Connection URI (defaults to the resolved DATABASE_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Check API health
    Health {
        /// Base URL of the quote editor API
        #[arg(
            long,
            env = "QUOTES_API_URL",
            default_value = "http://localhost:3000"
        )]
        api_url: String,
    },
}

fn connection_options(url: Option<String>, config: &Configuration) -> ConnectionOptions {
    match url {
        Some(url) => ConnectionOptions::from_url(url),
        None => config.connection_options(),
    }
}

fn health_url(api_url: &str) -> String {
    format!("{}/health", api_url.trim_end_matches('/'))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Configuration::from_env();

    match cli.command {
        Commands::Config => {
            if !config.port.is_valid() {
                eprintln!("warning: PORT is not a valid port number ({})", config.port);
            }
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        Commands::Database { url } => {
            let options = connection_options(url, &config);
            println!("{}", serde_json::to_string_pretty(&options)?);
        }

        Commands::Health { api_url } => {
            let resp = reqwest::get(health_url(&api_url)).await?;
            if resp.status().is_success() {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy ({})", resp.status());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
