//! Redis IAM discovery - Main Binary
//!
//! Connects to a Redis Enterprise cluster and emits its users, roles,
//! entitlements and grants as one JSON graph.

use anyhow::Result;
use clap::{Parser, Subcommand};
use redis_iam_node::config::{NodeConfig, Overrides};
use redis_iam_node::driver;
use std::path::PathBuf;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Redis IAM discovery CLI
#[derive(Parser)]
#[command(name = "redis-iam")]
#[command(about = "Discover users, roles and grants of a Redis Enterprise cluster")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "REDIS_IAM_CONFIG")]
    config: Option<PathBuf>,

    /// Cluster host including scheme (overrides config)
    #[arg(long, env = "REDIS_CLUSTER_HOST")]
    cluster_host: Option<String>,

    /// REST API port (overrides config)
    #[arg(long, env = "REDIS_API_PORT")]
    api_port: Option<String>,

    /// API username (overrides config)
    #[arg(long, env = "REDIS_USERNAME")]
    username: Option<String>,

    /// API password (overrides config)
    #[arg(long, env = "REDIS_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Write the graph to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the graph
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one discovery pass and emit the graph (default)
    Sync,

    /// Check configuration and credentials
    Validate,

    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean JSON document.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let command = cli.command.unwrap_or(Command::Sync);
    if let Command::Version = command {
        println!("redis-iam v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut config = NodeConfig::load_or_default(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        info!("Loaded configuration from {:?}", path);
    }

    config.apply(Overrides {
        cluster_host: cli.cluster_host,
        api_port: cli.api_port,
        username: cli.username,
        password: cli.password,
        output: cli.output,
        pretty: cli.pretty,
    });
    config.validate()?;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("Received shutdown signal (Ctrl+C)");
            trigger.cancel();
        }
    });

    let result = match command {
        Command::Validate => driver::validate(&config, &cancel).await,
        _ => {
            info!("Starting discovery v{}", env!("CARGO_PKG_VERSION"));
            driver::sync(&config, &cancel).await.map(|_| ())
        }
    };

    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
