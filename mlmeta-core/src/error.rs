//! Error types for record-to-model derivation

use thiserror::Error;

/// A record violated one of the naming conventions the models derive from
///
/// The derived fields (project id from resource names, run and pipeline
/// names from storage URIs, pipeline names from parent contexts) only exist
/// by convention. A record that does not follow the convention fails the
/// conversion with the specific rule it broke, rather than producing empty
/// derived fields.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Run context has no parent contexts to derive a pipeline name from
    #[error("context `{name}` has no parent contexts")]
    NoParentContext { name: String },

    /// Resource name is not of the form `projects/{id}/...`
    #[error("resource name `{name}` has no project segment")]
    NoProjectSegment { name: String },

    /// Artifact URI does not contain a `/{project}/` segment followed by a run name
    #[error("artifact uri `{uri}` has no run segment after project `{project}`")]
    NoRunSegment { uri: String, project: String },

    /// Run name has no hyphen-delimited suffix to strip
    #[error("run name `{run}` has no hyphen-delimited suffix")]
    NoRunSuffix { run: String },
}
