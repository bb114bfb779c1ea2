//! Raw record types
//!
//! Wire-level shapes returned by the metadata service, with the camelCase
//! field names of its JSON dialect. Every field is optional on the wire;
//! absent fields deserialize to their defaults so partial responses still
//! parse. Typed views with derived fields live in [`crate::model`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A context record, as returned by the contexts list endpoint
///
/// The service models both pipelines and pipeline runs as contexts; the
/// `schema_title` attribute (`system.Pipeline`, `system.PipelineRun`) tells
/// them apart.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextRecord {
    pub name: String,
    pub display_name: String,
    pub etag: String,
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    pub parent_contexts: Vec<String>,
    pub schema_title: String,
    pub schema_version: String,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// An artifact record, as returned by the artifacts list endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtifactRecord {
    pub name: String,
    pub display_name: String,
    pub uri: String,
    pub etag: String,
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    pub state: ArtifactState,
    pub description: String,
    pub schema_title: String,
    pub schema_version: String,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Lifecycle state of an artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ArtifactState {
    #[default]
    #[serde(rename = "ARTIFACT_STATE_UNSPECIFIED")]
    Unspecified,
    Pending,
    Live,
}

impl ArtifactState {
    /// Wire name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactState::Unspecified => "ARTIFACT_STATE_UNSPECIFIED",
            ArtifactState::Pending => "PENDING",
            ArtifactState::Live => "LIVE",
        }
    }
}

impl fmt::Display for ArtifactState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
