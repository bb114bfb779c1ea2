//! Pipeline run command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use futures::TryStreamExt;
use mlmeta_core::model::PipelineRun;

use crate::config::Config;
use crate::output;

/// Pipeline run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// List the runs of a pipeline
    List {
        /// Pipeline whose runs to list
        pipeline: String,
    },
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, config: &Config) -> Result<()> {
    match command {
        RunCommands::List { pipeline } => list_runs(config, &pipeline).await,
    }
}

/// List the runs recorded under one pipeline
async fn list_runs(config: &Config, pipeline: &str) -> Result<()> {
    let client = config.client();
    let runs: Vec<PipelineRun> = client
        .list_pipeline_runs(pipeline)
        .try_collect()
        .await
        .with_context(|| format!("Failed to list runs of pipeline '{}'", pipeline))?;

    output::print_listing(&runs, "run", config.output, config.normalize, print_run_summary)
}

/// Print a run summary
fn print_run_summary(run: &PipelineRun) {
    println!("  {} {}", "▸".cyan(), run.display_name.bold());
    println!("    Pipeline: {}", run.pipeline_name.cyan());
    if let Some(created) = &run.create_time {
        println!(
            "    Created:  {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    if !run.metadata.is_empty() {
        println!(
            "    Metadata: {}",
            format!("{} entries", run.metadata.len()).dimmed()
        );
    }
    println!();
}
