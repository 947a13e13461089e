//! CLI binary for whereami.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use whereami_cli::payload::Payload;
use whereami_cli::{CONFIG_ENV, DEFAULT_CONFIG, load_resolver, server};

/// Where Am I: resolve a place description to coordinates through a
/// chain of geocoding services.
#[derive(Parser)]
#[command(name = "whereami", version, about)]
struct Cli {
    /// Path to the YAML service configuration.
    #[arg(short, long, global = true, env = CONFIG_ENV, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Command,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Resolve one query and print the JSON payload.
    Lookup {
        /// Free-text place description, e.g. "Empire State Building".
        query: String,
    },

    /// Serve `GET /geo/{address}` over HTTP.
    Serve {
        /// Address to bind.
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr so stdout stays a clean JSON payload.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("whereami=warn,whereami_core=warn,whereami_cli=info")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Lookup { query } => run_lookup(&cli.config, &query).await,
        Command::Serve { bind } => run_serve(&cli.config, bind).await,
    }
}

async fn run_lookup(config: &std::path::Path, query: &str) -> anyhow::Result<ExitCode> {
    let outcome = match load_resolver(config) {
        Ok(resolver) => resolver.resolve(query).await,
        Err(e) => Err(e),
    };
    let payload = Payload::from_outcome(&outcome);
    println!("{}", payload.to_json()?);
    Ok(if payload.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn run_serve(config: &std::path::Path, bind: SocketAddr) -> anyhow::Result<ExitCode> {
    let resolver = load_resolver(config)
        .with_context(|| format!("invalid configuration in {}", config.display()))?;
    server::serve(bind, Arc::new(resolver)).await?;
    Ok(ExitCode::SUCCESS)
}
