//! Output rendering for listings

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::Colorize;
use mlmeta_core::table::Table;
use serde::Serialize;
use tabled::builder::Builder;

/// Output format for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned table, one column per field
    Table,
    /// Pretty-printed JSON
    Json,
    /// Per-item text summaries
    Text,
}

/// Print listed items in the requested format
///
/// `noun` names the entity in table/text messages; `summarize` prints one
/// item in text mode. JSON output is always emitted, even for an empty
/// listing, so scripted callers get a valid document.
pub fn print_listing<T: Serialize>(
    items: &[T],
    noun: &str,
    format: OutputFormat,
    normalize: bool,
    summarize: impl Fn(&T),
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(items)?);
        }
        OutputFormat::Table => {
            if items.is_empty() {
                println!("{}", format!("No {}s found.", noun).yellow());
                return Ok(());
            }
            let table = Table::from_items(items, normalize)
                .with_context(|| format!("Failed to project {}s into a table", noun))?;
            println!("{}", render(&table));
        }
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{}", format!("No {}s found.", noun).yellow());
                return Ok(());
            }
            println!("{}", format!("Found {} {}(s):", items.len(), noun).bold());
            println!();
            for item in items {
                summarize(item);
            }
        }
    }

    Ok(())
}

/// Render a projected table with a header row
fn render(table: &Table) -> tabled::Table {
    let mut builder = Builder::default();
    builder.push_record(table.columns().iter().cloned());
    for row in table.rows() {
        builder.push_record(row.iter().map(cell));
    }
    builder.build()
}

/// Text for one cell: bare scalars, JSON for anything nested
fn cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
