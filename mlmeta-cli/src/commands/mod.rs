//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod artifacts;
mod pipelines;
mod runs;

pub use artifacts::ArtifactCommands;
pub use pipelines::PipelineCommands;
pub use runs::RunCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline queries
    Pipelines {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Pipeline run queries
    Runs {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Artifact queries
    Artifacts {
        #[command(subcommand)]
        command: ArtifactCommands,
    },
}

/// Route a command to its handler module
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipelines { command } => {
            pipelines::handle_pipeline_command(command, config).await
        }
        Commands::Runs { command } => runs::handle_run_command(command, config).await,
        Commands::Artifacts { command } => {
            artifacts::handle_artifact_command(command, config).await
        }
    }
}
