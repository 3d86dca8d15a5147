//! Deskrail CLI, the main entry point.
//!
//! Commands:
//! - `query`:  Answer one message from the command line
//! - `serve`:  Start the HTTP gateway
//! - `ingest`: Load knowledge documents into the retrieval store
//! - `eval`:   Run the synthetic evaluation suite

use clap::{Parser, Subcommand};
use deskrail_config::AppConfig;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "deskrail",
    about = "Deskrail, a guardrailed customer support agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a config file (defaults to deskrail.toml, then built-ins)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one message through the support pipeline
    Query {
        /// The user message to answer
        message: String,

        /// Reuse an existing session instead of starting a fresh one
        #[arg(short, long)]
        session: Option<String>,
    },

    /// Start the HTTP gateway server
    Serve {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Collect documents from disk into the retrieval store
    Ingest {
        /// Subpath under the document root to ingest (defaults to the root)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Run the synthetic evaluation suite and print the report
    Eval,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => {
            AppConfig::load_from(path).map_err(|e| format!("Failed to load config: {e}"))?
        }
        None => AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?,
    };

    match cli.command {
        Commands::Query { message, session } => {
            commands::query::run(config, &message, session).await?
        }
        Commands::Serve { port } => commands::serve::run(config, port).await?,
        Commands::Ingest { path } => commands::ingest::run(config, path).await?,
        Commands::Eval => commands::eval::run(config).await?,
    }

    Ok(())
}
