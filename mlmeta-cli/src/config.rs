//! Configuration module
//!
//! Carries the store coordinates and output settings assembled from CLI
//! flags and environment variables.

use mlmeta_client::MetadataClient;
use mlmeta_core::resource::StoreName;

use crate::output::OutputFormat;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Cloud project id
    pub project: String,
    /// Region of the metadata store
    pub region: String,
    /// Metadata store within the project/region
    pub store: String,
    /// Service endpoint override, if any
    pub endpoint: Option<String>,
    /// Bearer token attached to requests, if any
    pub token: Option<String>,
    /// Output format for listings
    pub output: OutputFormat,
    /// Flatten nested metadata in table output
    pub normalize: bool,
}

impl Config {
    /// Build the metadata client this invocation talks through
    pub fn client(&self) -> MetadataClient {
        let store = StoreName::new(
            self.project.clone(),
            self.region.clone(),
            self.store.clone(),
        );

        let client = match &self.endpoint {
            Some(endpoint) => MetadataClient::with_endpoint(store, endpoint.clone()),
            None => MetadataClient::new(store),
        };

        match &self.token {
            Some(token) => client.bearer_token(token.clone()),
            None => client,
        }
    }
}
