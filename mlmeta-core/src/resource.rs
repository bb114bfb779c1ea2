//! Resource names
//!
//! The metadata service addresses everything through slash-separated
//! resource paths rooted at a metadata store. Components are interpolated
//! as given; nothing checks them for embedded slashes.

use std::fmt;

/// Name of the store the service provisions per project/region
pub const DEFAULT_STORE: &str = "default";

/// Fully qualified name of a metadata store
///
/// A store is identified by the (project, region, store) triple and renders
/// as `projects/{project}/locations/{region}/metadataStores/{store}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreName {
    project: String,
    region: String,
    store: String,
}

impl StoreName {
    pub fn new(
        project: impl Into<String>,
        region: impl Into<String>,
        store: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            region: region.into(),
            store: store.into(),
        }
    }

    /// Store name using the service's default store for the project/region
    pub fn with_default_store(project: impl Into<String>, region: impl Into<String>) -> Self {
        Self::new(project, region, DEFAULT_STORE)
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    /// Full resource path of the store
    pub fn resource_path(&self) -> String {
        format!(
            "projects/{}/locations/{}/metadataStores/{}",
            self.project, self.region, self.store
        )
    }

    /// Full resource path of a context within the store
    ///
    /// Pipelines and pipeline runs are both contexts, so this covers either.
    pub fn context_path(&self, context: &str) -> String {
        format!("{}/contexts/{}", self.resource_path(), context)
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_path_has_expected_shape() {
        let store = StoreName::new("my-project", "europe-west4", "default");
        assert_eq!(
            store.resource_path(),
            "projects/my-project/locations/europe-west4/metadataStores/default"
        );
    }

    #[test]
    fn context_path_appends_contexts_segment() {
        let store = StoreName::new("my-project", "europe-west4", "default");
        assert_eq!(
            store.context_path("train-run-42"),
            "projects/my-project/locations/europe-west4/metadataStores/default/contexts/train-run-42"
        );
    }

    #[test]
    fn with_default_store_uses_default() {
        let store = StoreName::with_default_store("my-project", "europe-west4");
        assert_eq!(store.store(), DEFAULT_STORE);
        assert_eq!(
            store.resource_path(),
            "projects/my-project/locations/europe-west4/metadataStores/default"
        );
    }

    #[test]
    fn display_matches_resource_path() {
        let store = StoreName::new("p", "r", "s");
        assert_eq!(store.to_string(), store.resource_path());
    }
}
