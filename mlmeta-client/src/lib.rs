//! mlmeta HTTP Client
//!
//! A type-safe client for querying an ML metadata store: pipelines, their
//! runs, and the artifacts they produce.
//!
//! The typed surface builds filters in the service's query language, pages
//! through results lazily and maps raw records into the models from
//! `mlmeta-core`. The page-level [`MetadataService`] underneath stays
//! public for queries the typed surface does not cover.
//!
//! # Example
//!
//! ```no_run
//! use futures::TryStreamExt;
//! use mlmeta_client::MetadataClient;
//! use mlmeta_core::resource::StoreName;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = StoreName::with_default_store("my-project", "europe-west4");
//!     let client = MetadataClient::new(store);
//!
//!     let pipelines: Vec<_> = client.list_pipelines().try_collect().await?;
//!     for pipeline in pipelines {
//!         println!("{}", pipeline.display_name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod service;

mod artifacts;
mod pipelines;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use service::{ArtifactPage, ContextPage, ListRequest, MetadataService};

use mlmeta_core::resource::StoreName;

/// Typed client for one metadata store
///
/// Fixed to a single (project, region, store) triple at construction and
/// cheap to clone. List operations return `futures::Stream`s that fetch
/// pages from the service only as they are consumed; dropping a stream
/// early stops the paging.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    /// Store every query is scoped to
    store: StoreName,
    /// Page-level service access
    service: MetadataService,
}

impl MetadataClient {
    /// Create a client for a store, using the store's regional endpoint
    ///
    /// # Example
    /// ```
    /// use mlmeta_client::MetadataClient;
    /// use mlmeta_core::resource::StoreName;
    ///
    /// let store = StoreName::with_default_store("my-project", "europe-west4");
    /// let client = MetadataClient::new(store);
    /// ```
    pub fn new(store: StoreName) -> Self {
        let endpoint = regional_endpoint(store.region());
        Self {
            service: MetadataService::new(endpoint),
            store,
        }
    }

    /// Create a client against an explicit endpoint
    ///
    /// Useful for emulators, proxies and tests; the store still decides
    /// the resource paths sent to that endpoint.
    pub fn with_endpoint(store: StoreName, endpoint: impl Into<String>) -> Self {
        Self {
            service: MetadataService::new(endpoint),
            store,
        }
    }

    /// Create a client over a preconfigured service handle
    pub fn with_service(store: StoreName, service: MetadataService) -> Self {
        Self { store, service }
    }

    /// Attach a bearer token to every request
    pub fn bearer_token(self, token: impl Into<String>) -> Self {
        Self {
            service: self.service.bearer_token(token),
            store: self.store,
        }
    }

    /// Get the store this client is scoped to
    pub fn store(&self) -> &StoreName {
        &self.store
    }

    /// Get the underlying page-level service
    pub fn service(&self) -> &MetadataService {
        &self.service
    }
}

/// Regional endpoint the service expects store traffic on
fn regional_endpoint(region: &str) -> String {
    format!("https://{}-aiplatform.googleapis.com", region)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_regional_endpoint() {
        let client = MetadataClient::new(StoreName::with_default_store("p", "europe-west4"));
        assert_eq!(
            client.service().endpoint(),
            "https://europe-west4-aiplatform.googleapis.com"
        );
    }

    #[test]
    fn test_client_with_explicit_endpoint() {
        let store = StoreName::new("p", "r", "s");
        let client = MetadataClient::with_endpoint(store, "http://localhost:9090/");
        assert_eq!(client.service().endpoint(), "http://localhost:9090");
    }

    #[test]
    fn test_client_exposes_store() {
        let store = StoreName::new("p", "r", "s");
        let client = MetadataClient::with_endpoint(store.clone(), "http://localhost:9090");
        assert_eq!(client.store(), &store);
    }
}
