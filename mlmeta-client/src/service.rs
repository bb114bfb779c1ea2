//! Raw page-level access to the metadata service
//!
//! [`MetadataService`] speaks the REST dialect directly: one call fetches
//! one page, and the caller carries the page token between calls. Most
//! users want [`MetadataClient`](crate::MetadataClient), which layers
//! filter construction, record-to-model mapping and transparent
//! pagination on top; this type is the escape hatch for queries the
//! typed surface does not cover.

use mlmeta_core::record::{ArtifactRecord, ContextRecord};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};

/// Parameters accepted by the list endpoints
#[derive(Debug, Clone, Default)]
pub struct ListRequest {
    /// Filter in the metadata query language; unfiltered when absent
    pub filter: Option<String>,
    /// Server-side page size; the service picks its default when absent
    pub page_size: Option<u32>,
    /// Continuation token from a previous page
    pub page_token: Option<String>,
}

/// One page of context records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContextPage {
    pub contexts: Vec<ContextRecord>,
    pub next_page_token: Option<String>,
}

/// One page of artifact records
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtifactPage {
    pub artifacts: Vec<ArtifactRecord>,
    pub next_page_token: Option<String>,
}

/// Low-level HTTP client for the metadata service list endpoints
#[derive(Debug, Clone)]
pub struct MetadataService {
    /// Endpoint of the service (e.g., "https://europe-west4-aiplatform.googleapis.com")
    endpoint: String,
    /// Bearer token attached to every request, if any
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl MetadataService {
    /// Create a new service handle
    ///
    /// # Arguments
    /// * `endpoint` - The service endpoint, scheme included
    ///
    /// # Example
    /// ```
    /// use mlmeta_client::MetadataService;
    ///
    /// let service = MetadataService::new("https://europe-west4-aiplatform.googleapis.com");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(endpoint, Client::new())
    }

    /// Create a service handle with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use mlmeta_client::MetadataService;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let service = MetadataService::with_client("https://example.test", http_client);
    /// ```
    pub fn with_client(endpoint: impl Into<String>, client: Client) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach a bearer token to every request
    ///
    /// Token acquisition is the caller's concern; whatever is given here is
    /// sent as `Authorization: Bearer <token>`.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the endpoint this service talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// List one page of context records under a parent store
    ///
    /// # Arguments
    /// * `parent` - Resource path of the store
    ///   (`projects/{p}/locations/{r}/metadataStores/{s}`)
    /// * `request` - Filter and paging parameters
    pub async fn list_contexts(&self, parent: &str, request: &ListRequest) -> Result<ContextPage> {
        tracing::debug!(
            "Listing contexts under {} (filter: {:?})",
            parent,
            request.filter
        );
        let url = format!("{}/v1/{}/contexts", self.endpoint, parent);
        self.get_page(&url, request).await
    }

    /// List one page of artifact records under a parent store
    pub async fn list_artifacts(&self, parent: &str, request: &ListRequest) -> Result<ArtifactPage> {
        tracing::debug!(
            "Listing artifacts under {} (filter: {:?})",
            parent,
            request.filter
        );
        let url = format!("{}/v1/{}/artifacts", self.endpoint, parent);
        self.get_page(&url, request).await
    }

    // =============================================================================
    // Request Plumbing
    // =============================================================================

    /// Issue one GET against a list endpoint with the request's parameters
    async fn get_page<T: DeserializeOwned>(&self, url: &str, request: &ListRequest) -> Result<T> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(filter) = &request.filter {
            query.push(("filter", filter.clone()));
        }
        if let Some(size) = request.page_size {
            query.push(("pageSize", size.to_string()));
        }
        if let Some(token) = &request.page_token {
            query.push(("pageToken", token.clone()));
        }

        let mut builder = self.client.get(url).query(&query);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        self.handle_response(response).await
    }

    /// Handle a response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

/// Request for the page after the one that returned `token`
///
/// `None` (or an empty token, which the service uses to mean the same
/// thing) ends the sequence.
pub(crate) fn next_request(request: &ListRequest, token: Option<String>) -> Option<ListRequest> {
    let token = token.filter(|token| !token.is_empty())?;
    Some(ListRequest {
        page_token: Some(token),
        ..request.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const PARENT: &str = "projects/p/locations/r/metadataStores/default";

    #[tokio::test]
    async fn test_list_contexts_parses_page() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/projects/p/locations/r/metadataStores/default/contexts")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "contexts": [
                        {"name": "projects/p/x/contexts/a", "displayName": "a"},
                        {"name": "projects/p/x/contexts/b", "displayName": "b"}
                    ],
                    "nextPageToken": "tok-2"
                }"#,
            )
            .create_async()
            .await;

        let service = MetadataService::new(server.url());
        let page = service
            .list_contexts(PARENT, &ListRequest::default())
            .await
            .unwrap();

        assert_eq!(page.contexts.len(), 2);
        assert_eq!(page.contexts[0].display_name, "a");
        assert_eq!(page.next_page_token.as_deref(), Some("tok-2"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_request_params_are_sent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/projects/p/locations/r/metadataStores/default/artifacts")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("filter".into(), "schema_title=\"system.Model\"".into()),
                Matcher::UrlEncoded("pageSize".into(), "50".into()),
                Matcher::UrlEncoded("pageToken".into(), "tok-3".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"artifacts": []}"#)
            .create_async()
            .await;

        let service = MetadataService::new(server.url());
        let request = ListRequest {
            filter: Some("schema_title=\"system.Model\"".to_string()),
            page_size: Some(50),
            page_token: Some("tok-3".to_string()),
        };
        let page = service.list_artifacts(PARENT, &request).await.unwrap();

        assert!(page.artifacts.is_empty());
        assert!(page.next_page_token.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/projects/p/locations/r/metadataStores/default/contexts")
            .match_header("authorization", "Bearer sekret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"contexts": []}"#)
            .create_async()
            .await;

        let service = MetadataService::new(server.url()).bearer_token("sekret");
        service
            .list_contexts(PARENT, &ListRequest::default())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_becomes_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/projects/p/locations/r/metadataStores/default/contexts")
            .with_status(400)
            .with_body("cannot parse filter")
            .create_async()
            .await;

        let service = MetadataService::new(server.url());
        let err = service
            .list_contexts(PARENT, &ListRequest::default())
            .await
            .unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "cannot parse filter");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_becomes_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/projects/p/locations/r/metadataStores/default/contexts")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let service = MetadataService::new(server.url());
        let err = service
            .list_contexts(PARENT, &ListRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let service = MetadataService::new("https://example.test/");
        assert_eq!(service.endpoint(), "https://example.test");
    }

    #[test]
    fn test_next_request_carries_filter_forward() {
        let request = ListRequest {
            filter: Some("f".to_string()),
            page_size: Some(10),
            page_token: None,
        };

        let next = next_request(&request, Some("tok".to_string())).unwrap();
        assert_eq!(next.filter.as_deref(), Some("f"));
        assert_eq!(next.page_size, Some(10));
        assert_eq!(next.page_token.as_deref(), Some("tok"));
    }

    #[test]
    fn test_next_request_ends_on_missing_or_empty_token() {
        let request = ListRequest::default();
        assert!(next_request(&request, None).is_none());
        assert!(next_request(&request, Some(String::new())).is_none());
    }
}
