//! Typed model types
//!
//! Views over the raw records in [`crate::record`], with extra fields
//! derived from the platform's naming conventions:
//!
//! - a run context's pipeline is the last path segment of its first parent
//!   context
//! - an artifact's resource name carries the project id as its second
//!   segment, its storage URI carries the run name right after the first
//!   `/{project}/` segment, and the run name minus its trailing
//!   hyphen-delimited token is the pipeline name
//!
//! Records that break a convention fail conversion with a
//! [`RecordError`] naming the broken rule.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::RecordError;
use crate::record::{ArtifactRecord, ArtifactState, ContextRecord};

/// A pipeline, projected from a `system.Pipeline` context record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub name: String,
    pub display_name: String,
    pub etag: String,
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    pub schema_title: String,
    pub schema_version: String,
}

impl Pipeline {
    /// Build a pipeline from a context record
    ///
    /// Pure field selection; nothing is derived, so this cannot fail.
    pub fn from_record(record: ContextRecord) -> Self {
        Self {
            name: record.name,
            display_name: record.display_name,
            etag: record.etag,
            create_time: record.create_time,
            update_time: record.update_time,
            schema_title: record.schema_title,
            schema_version: record.schema_version,
        }
    }

    /// Map records to pipelines lazily, in order
    pub fn from_records<I>(records: I) -> impl Iterator<Item = Self>
    where
        I: IntoIterator<Item = ContextRecord>,
    {
        records.into_iter().map(Self::from_record)
    }
}

/// A pipeline run, projected from a `system.PipelineRun` context record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub name: String,
    pub display_name: String,
    pub etag: String,
    pub create_time: Option<chrono::DateTime<chrono::Utc>>,
    pub update_time: Option<chrono::DateTime<chrono::Utc>>,
    pub parent_contexts: Vec<String>,
    pub schema_title: String,
    pub schema_version: String,
    pub metadata: HashMap<String, serde_json::Value>,
    /// Derived: last path segment of the first parent context
    pub pipeline_name: String,
}

impl PipelineRun {
    /// Build a run from a context record, deriving the pipeline name
    pub fn from_record(record: ContextRecord) -> Result<Self, RecordError> {
        let parent = record
            .parent_contexts
            .first()
            .ok_or_else(|| RecordError::NoParentContext {
                name: record.name.clone(),
            })?;
        let pipeline_name = last_segment(parent).to_string();

        Ok(Self {
            name: record.name,
            display_name: record.display_name,
            etag: record.etag,
            create_time: record.create_time,
            update_time: record.update_time,
            parent_contexts: record.parent_contexts,
            schema_title: record.schema_title,
            schema_version: record.schema_version,
            metadata: record.metadata,
            pipeline_name,
        })
    }

    /// Map records to runs lazily, in order
    ///
    /// Conversion failures surface as `Err` items in place; the iterator
    /// keeps going, so the caller chooses whether one bad record aborts
    /// the whole listing.
    pub fn from_records<I>(records: I) -> impl Iterator<Item = Result<Self, RecordError>>
    where
        I: IntoIterator<Item = ContextRecord>,
    {
        records.into_iter().map(Self::from_record)
    }
}

/// An artifact, projected from an artifact record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
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
    /// Derived: URI path segment right after the first `/{project}/`
    pub pipeline_run: String,
    /// Derived: run name with its trailing hyphen-delimited token stripped
    pub pipeline_name: String,
}

impl Artifact {
    /// Build an artifact from a record, deriving run and pipeline names
    pub fn from_record(record: ArtifactRecord) -> Result<Self, RecordError> {
        let project = project_segment(&record.name)?;
        let pipeline_run = run_segment(&record.uri, project)?.to_string();
        let pipeline_name = strip_run_suffix(&pipeline_run)?.to_string();

        Ok(Self {
            name: record.name,
            display_name: record.display_name,
            uri: record.uri,
            etag: record.etag,
            create_time: record.create_time,
            update_time: record.update_time,
            state: record.state,
            description: record.description,
            schema_title: record.schema_title,
            schema_version: record.schema_version,
            metadata: record.metadata,
            pipeline_run,
            pipeline_name,
        })
    }

    /// Map records to artifacts lazily, in order
    pub fn from_records<I>(records: I) -> impl Iterator<Item = Result<Self, RecordError>>
    where
        I: IntoIterator<Item = ArtifactRecord>,
    {
        records.into_iter().map(Self::from_record)
    }
}

/// Last `/`-separated segment, or the whole string when there is no slash
fn last_segment(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, last)| last)
}

/// Second segment of a `projects/{id}/...` resource name
fn project_segment(name: &str) -> Result<&str, RecordError> {
    name.split('/')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| RecordError::NoProjectSegment {
            name: name.to_string(),
        })
}

/// URI segment right after the first occurrence of `/{project}/`
fn run_segment<'a>(uri: &'a str, project: &str) -> Result<&'a str, RecordError> {
    let missing = || RecordError::NoRunSegment {
        uri: uri.to_string(),
        project: project.to_string(),
    };

    let marker = format!("/{}/", project);
    let (_, rest) = uri.split_once(marker.as_str()).ok_or_else(missing)?;
    let run = rest.split('/').next().unwrap_or("");
    if run.is_empty() {
        return Err(missing());
    }
    Ok(run)
}

/// Run name minus its trailing hyphen-delimited token
fn strip_run_suffix(run: &str) -> Result<&str, RecordError> {
    run.rsplit_once('-')
        .map(|(name, _)| name)
        .ok_or_else(|| RecordError::NoRunSuffix {
            run: run.to_string(),
        })
}
