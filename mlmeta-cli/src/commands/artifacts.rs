//! Artifact command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::{ColoredString, Colorize};
use futures::{StreamExt, TryStreamExt};
use mlmeta_core::filter::{Filter, schema_title};
use mlmeta_core::model::Artifact;
use mlmeta_core::record::ArtifactState;

use crate::config::Config;
use crate::output;

/// Artifact subcommands
#[derive(Subcommand)]
pub enum ArtifactCommands {
    /// List artifacts, optionally scoped to a pipeline or run
    List {
        /// Only artifacts under this pipeline's context
        #[arg(long, conflicts_with = "run")]
        pipeline: Option<String>,

        /// Only artifacts under this run's context
        #[arg(long)]
        run: Option<String>,

        /// Only artifacts with this schema title (e.g. system.Model)
        #[arg(long)]
        schema: Option<String>,

        /// Raw filter in the metadata query language, sent verbatim
        #[arg(long, conflicts_with_all = ["pipeline", "run", "schema"])]
        filter: Option<String>,

        /// Stop after this many artifacts
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// Handle artifact commands
pub async fn handle_artifact_command(command: ArtifactCommands, config: &Config) -> Result<()> {
    match command {
        ArtifactCommands::List {
            pipeline,
            run,
            schema,
            filter,
            limit,
        } => list_artifacts(config, pipeline, run, schema, filter, limit).await,
    }
}

/// List artifacts under the chosen scope
///
/// Pages are fetched only as far as `--limit` requires.
async fn list_artifacts(
    config: &Config,
    pipeline: Option<String>,
    run: Option<String>,
    schema: Option<String>,
    filter: Option<String>,
    limit: Option<usize>,
) -> Result<()> {
    let client = config.client();

    let stream = if let Some(pipeline) = &pipeline {
        client
            .list_artifacts_for_pipeline(pipeline, schema.as_deref())
            .boxed()
    } else if let Some(run) = &run {
        client.list_artifacts_for_run(run, schema.as_deref()).boxed()
    } else {
        let filter = match (&filter, &schema) {
            (Some(raw), _) => Some(Filter::from(raw.as_str())),
            (None, Some(title)) => Some(Filter::from(schema_title(title.as_str()))),
            (None, None) => None,
        };
        client.list_artifacts(filter).boxed()
    };

    let stream = match limit {
        Some(limit) => stream.take(limit).boxed(),
        None => stream,
    };

    let artifacts: Vec<Artifact> = stream
        .try_collect()
        .await
        .context("Failed to list artifacts")?;

    output::print_listing(
        &artifacts,
        "artifact",
        config.output,
        config.normalize,
        print_artifact_summary,
    )
}

/// Print an artifact summary
fn print_artifact_summary(artifact: &Artifact) {
    println!("  {} {}", "▸".cyan(), artifact.display_name.bold());
    println!("    URI:      {}", artifact.uri.dimmed());
    println!("    State:    {}", format_state(artifact.state));
    println!("    Run:      {}", artifact.pipeline_run.cyan());
    println!("    Pipeline: {}", artifact.pipeline_name.cyan());
    if !artifact.schema_title.is_empty() {
        println!("    Schema:   {}", artifact.schema_title.dimmed());
    }
    println!();
}

/// Colorize an artifact state for terminal output
fn format_state(state: ArtifactState) -> ColoredString {
    match state {
        ArtifactState::Live => "LIVE".green(),
        ArtifactState::Pending => "PENDING".yellow(),
        ArtifactState::Unspecified => "ARTIFACT_STATE_UNSPECIFIED".dimmed(),
    }
}
