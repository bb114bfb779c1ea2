//! Pipeline command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use futures::TryStreamExt;
use mlmeta_core::model::Pipeline;

use crate::config::Config;
use crate::output;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List the pipelines in the store
    List,
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    match command {
        PipelineCommands::List => list_pipelines(config).await,
    }
}

/// List all pipelines in the configured store
async fn list_pipelines(config: &Config) -> Result<()> {
    let client = config.client();
    let pipelines: Vec<Pipeline> = client
        .list_pipelines()
        .try_collect()
        .await
        .context("Failed to list pipelines")?;

    output::print_listing(
        &pipelines,
        "pipeline",
        config.output,
        config.normalize,
        print_pipeline_summary,
    )
}

/// Print a pipeline summary
fn print_pipeline_summary(pipeline: &Pipeline) {
    println!("  {} {}", "▸".cyan(), pipeline.display_name.bold());
    println!("    Name:    {}", pipeline.name.dimmed());
    if let Some(created) = &pipeline.create_time {
        println!(
            "    Created: {}",
            created.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        );
    }
    if !pipeline.schema_title.is_empty() {
        println!("    Schema:  {}", pipeline.schema_title.dimmed());
    }
    println!();
}
