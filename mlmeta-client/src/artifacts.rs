//! Artifact queries

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use mlmeta_core::filter::{self, Expr, Filter};
use mlmeta_core::model::Artifact;
use mlmeta_core::record::ArtifactRecord;

use crate::MetadataClient;
use crate::error::{ClientError, Result};
use crate::service::{ListRequest, next_request};

impl MetadataClient {
    /// List artifacts in the store
    ///
    /// With no filter, everything in the store streams back. The filter is
    /// sent verbatim; build one from the expression types or pass raw query
    /// text through [`Filter::from`].
    ///
    /// # Example
    /// ```no_run
    /// # use futures::TryStreamExt;
    /// # use mlmeta_client::MetadataClient;
    /// # use mlmeta_core::{filter, resource::StoreName};
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = MetadataClient::new(StoreName::with_default_store("p", "europe-west4"));
    /// let models: Vec<_> = client
    ///     .list_artifacts(Some(filter::schema_title("system.Model").into()))
    ///     .try_collect()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_artifacts(
        &self,
        filter: Option<Filter>,
    ) -> impl Stream<Item = Result<Artifact>> + '_ {
        self.artifacts(filter).map(|result| {
            result.and_then(|record| Artifact::from_record(record).map_err(ClientError::from))
        })
    }

    /// List artifacts produced under a pipeline's context
    ///
    /// Optionally narrowed to one schema title (e.g. `system.Model`).
    pub fn list_artifacts_for_pipeline(
        &self,
        pipeline: &str,
        schema: Option<&str>,
    ) -> impl Stream<Item = Result<Artifact>> + '_ {
        let expr = scoped(self.store().context_path(pipeline), schema);
        self.list_artifacts(Some(expr.into()))
    }

    /// List artifacts produced under a run's context
    ///
    /// Optionally narrowed to one schema title.
    pub fn list_artifacts_for_run(
        &self,
        run: &str,
        schema: Option<&str>,
    ) -> impl Stream<Item = Result<Artifact>> + '_ {
        let expr = scoped(self.store().context_path(run), schema);
        self.list_artifacts(Some(expr.into()))
    }

    /// Stream raw artifact records matching a filter, page by page
    fn artifacts(&self, filter: Option<Filter>) -> impl Stream<Item = Result<ArtifactRecord>> + '_ {
        let parent = self.store().resource_path();
        let first = ListRequest {
            filter: filter.map(Filter::into_string),
            ..Default::default()
        };

        stream::try_unfold(Some(first), move |state| {
            let parent = parent.clone();
            async move {
                let request = match state {
                    Some(request) => request,
                    None => return Ok::<_, ClientError>(None),
                };
                let page = self.service().list_artifacts(&parent, &request).await?;
                let next = next_request(&request, page.next_page_token);
                let records = stream::iter(page.artifacts.into_iter().map(Ok::<_, ClientError>));
                Ok(Some((records, next)))
            }
        })
        .try_flatten()
    }
}

/// Context membership, optionally narrowed by schema title
fn scoped(context: String, schema: Option<&str>) -> Expr {
    let membership = filter::in_context(context);
    match schema {
        Some(title) => membership.and(filter::schema_title(title)),
        None => membership,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlmeta_core::resource::StoreName;
    use mockito::Matcher;

    const ARTIFACTS_PATH: &str = "/v1/projects/p/locations/r/metadataStores/default/artifacts";

    fn client_for(server: &mockito::Server) -> MetadataClient {
        let store = StoreName::new("p", "r", "default");
        MetadataClient::with_endpoint(store, server.url())
    }

    #[test]
    fn test_scope_composes_membership_and_schema() {
        let expr = scoped("projects/p/locations/r/metadataStores/s/contexts/run1".to_string(), Some("system.Dataset"));
        assert_eq!(
            expr.to_string(),
            "(in_context(\"projects/p/locations/r/metadataStores/s/contexts/run1\") AND schema_title=\"system.Dataset\")"
        );
    }

    #[test]
    fn test_scope_without_schema_is_bare_membership() {
        let expr = scoped("ctx".to_string(), None);
        assert_eq!(expr.to_string(), "in_context(\"ctx\")");
    }

    #[tokio::test]
    async fn test_pagination_walks_every_page() {
        let mut server = mockito::Server::new_async().await;
        // The "live" filter means raw query and encoded query coincide, so
        // exact matchers can tell the two page requests apart.
        let first_page = server
            .mock("GET", ARTIFACTS_PATH)
            .match_query(Matcher::Exact("filter=live".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "artifacts": [
                        {"name": "projects/p/a/1", "uri": "gs://b/p/run-x-1/f1"},
                        {"name": "projects/p/a/2", "uri": "gs://b/p/run-x-1/f2"}
                    ],
                    "nextPageToken": "next-1"
                }"#,
            )
            .create_async()
            .await;
        let second_page = server
            .mock("GET", ARTIFACTS_PATH)
            .match_query(Matcher::Exact("filter=live&pageToken=next-1".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "artifacts": [
                        {"name": "projects/p/a/3", "uri": "gs://b/p/run-y-2/f3"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let artifacts: Vec<Artifact> = client
            .list_artifacts(Some(Filter::from("live")))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].pipeline_run, "run-x-1");
        assert_eq!(artifacts[2].pipeline_run, "run-y-2");
        assert_eq!(artifacts[2].pipeline_name, "run-y");
        first_page.assert_async().await;
        second_page.assert_async().await;
    }

    #[tokio::test]
    async fn test_unconsumed_pages_are_never_fetched() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", ARTIFACTS_PATH)
            .match_query(Matcher::Exact("filter=live".to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "artifacts": [
                        {"name": "projects/p/a/1", "uri": "gs://b/p/run-x-1/f1"}
                    ],
                    "nextPageToken": "next-1"
                }"#,
            )
            .create_async()
            .await;
        let second_page = server
            .mock("GET", ARTIFACTS_PATH)
            .match_query(Matcher::Exact("filter=live&pageToken=next-1".to_string()))
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let mut stream = client.list_artifacts(Some(Filter::from("live"))).boxed();
        let first = stream.try_next().await.unwrap().unwrap();
        assert_eq!(first.pipeline_run, "run-x-1");
        drop(stream);

        second_page.assert_async().await;
    }

    #[tokio::test]
    async fn test_run_scope_sends_composed_filter() {
        let mut server = mockito::Server::new_async().await;
        let expected_filter = concat!(
            "(in_context(\"projects/p/locations/r/metadataStores/default/contexts/run-7\")",
            " AND schema_title=\"system.Model\")"
        );
        let mock = server
            .mock("GET", ARTIFACTS_PATH)
            .match_query(Matcher::UrlEncoded("filter".into(), expected_filter.into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "artifacts": [
                        {
                            "name": "projects/p/locations/r/metadataStores/default/artifacts/9",
                            "uri": "gs://bucket/p/run-abc-001/model",
                            "state": "LIVE",
                            "schemaTitle": "system.Model"
                        }
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let artifacts: Vec<Artifact> = client
            .list_artifacts_for_run("run-7", Some("system.Model"))
            .try_collect()
            .await
            .unwrap();

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].pipeline_run, "run-abc-001");
        assert_eq!(artifacts[0].pipeline_name, "run-abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unconventional_record_errors_in_place() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", ARTIFACTS_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "artifacts": [
                        {"name": "projects/p/a/1", "uri": "gs://b/p/run-x-1/f1"},
                        {"name": "projects/p/a/2", "uri": "gs://b/p/nohyphen/f2"},
                        {"name": "projects/p/a/3", "uri": "gs://b/p/run-y-2/f3"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = client_for(&server);
        let results: Vec<Result<Artifact>> = client.list_artifacts(None).collect().await;

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(
            results[1].as_ref().unwrap_err(),
            ClientError::Record(_)
        ));
        assert!(results[2].is_ok());
    }
}
