//! Tabular projection
//!
//! Projects any collection of serializable items into a column-oriented
//! table for display: one row per item, columns being the union of field
//! names across all items in order of first appearance. Items missing a
//! column get a null cell, so mixed shapes (say, differing `metadata`
//! keys) line up.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// An item could not be projected into a row
#[derive(Debug, Error)]
pub enum TableError {
    /// Serializing the item failed
    #[error("failed to serialize item {index}: {source}")]
    Serialize {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The item serialized to something other than a JSON object
    #[error("item {index} does not serialize to an object")]
    NotAnObject { index: usize },
}

/// Column-oriented view over a collection of items
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Project items into a table
    ///
    /// With `normalize`, nested objects are flattened into dot-separated
    /// columns (`metadata.framework`); otherwise nested values stay in a
    /// single cell. Builds the whole table eagerly.
    pub fn from_items<T, I>(items: I, normalize: bool) -> Result<Self, TableError>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let mut columns: Vec<String> = Vec::new();
        let mut keyed_rows: Vec<Map<String, Value>> = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            let value = serde_json::to_value(&item)
                .map_err(|source| TableError::Serialize { index, source })?;
            let Value::Object(fields) = value else {
                return Err(TableError::NotAnObject { index });
            };
            let fields = if normalize { flatten(fields) } else { fields };

            for key in fields.keys() {
                if !columns.iter().any(|column| column == key) {
                    columns.push(key.clone());
                }
            }
            keyed_rows.push(fields);
        }

        let rows = keyed_rows
            .into_iter()
            .map(|mut fields| {
                columns
                    .iter()
                    .map(|column| fields.remove(column).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Flatten nested objects into dot-separated keys
///
/// Non-object values keep their key; an empty nested object contributes
/// no columns at all.
fn flatten(fields: Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    for (key, value) in fields {
        flatten_into(&mut flat, key, value);
    }
    flat
}

fn flatten_into(flat: &mut Map<String, Value>, key: String, value: Value) {
    match value {
        Value::Object(nested) => {
            for (child_key, child) in nested {
                flatten_into(flat, format!("{}.{}", key, child_key), child);
            }
        }
        other => {
            flat.insert(key, other);
        }
    }
}
