//! mlmeta CLI
//!
//! Command-line interface for querying an ML metadata store: pipelines,
//! their runs, and the artifacts they produce.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use output::OutputFormat;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mlmeta")]
#[command(about = "Query pipelines, runs and artifacts in an ML metadata store", long_about = None)]
struct Cli {
    /// Cloud project id
    #[arg(long, env = "MLMETA_PROJECT")]
    project: String,

    /// Region of the metadata store
    #[arg(long, env = "MLMETA_REGION")]
    region: String,

    /// Metadata store within the project/region
    #[arg(long, env = "MLMETA_STORE", default_value = mlmeta_core::resource::DEFAULT_STORE)]
    store: String,

    /// Service endpoint override (defaults to the store's regional endpoint)
    #[arg(long, env = "MLMETA_ENDPOINT")]
    endpoint: Option<String>,

    /// Bearer token attached to every request
    #[arg(long, env = "MLMETA_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Output format
    #[arg(long, value_enum, global = true, default_value = "table")]
    output: OutputFormat,

    /// Flatten nested metadata into dot-separated table columns
    #[arg(long, global = true)]
    normalize: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mlmeta_cli=info,mlmeta_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config {
        project: cli.project,
        region: cli.region,
        store: cli.store,
        endpoint: cli.endpoint,
        token: cli.token,
        output: cli.output,
        normalize: cli.normalize,
    };

    handle_command(cli.command, &config).await
}
