//! Pipeline and pipeline run queries
//!
//! Both are context records on the wire; the schema title tells them
//! apart and the filter composition below hides that detail.

use futures::stream::{self, Stream, StreamExt, TryStreamExt};
use mlmeta_core::filter::{self, Filter};
use mlmeta_core::model::{Pipeline, PipelineRun};
use mlmeta_core::record::ContextRecord;

use crate::MetadataClient;
use crate::error::{ClientError, Result};
use crate::service::{ListRequest, next_request};

impl MetadataClient {
    /// List the pipelines in the store
    ///
    /// Matches contexts whose schema title is `system.Pipeline`.
    ///
    /// # Example
    /// ```no_run
    /// # use futures::TryStreamExt;
    /// # use mlmeta_client::MetadataClient;
    /// # use mlmeta_core::resource::StoreName;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = MetadataClient::new(StoreName::with_default_store("p", "europe-west4"));
    /// let pipelines: Vec<_> = client.list_pipelines().try_collect().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn list_pipelines(&self) -> impl Stream<Item = Result<Pipeline>> + '_ {
        let expr = filter::schema_title("system.Pipeline");
        self.contexts(Some(expr.into()))
            .map_ok(Pipeline::from_record)
    }

    /// List the runs of one pipeline
    ///
    /// Matches contexts whose schema title is `system.PipelineRun` and
    /// whose parent contexts include the pipeline's context. Each run
    /// carries its derived `pipeline_name`; a run record without parent
    /// contexts yields an `Err` item in place.
    pub fn list_pipeline_runs(
        &self,
        pipeline: &str,
    ) -> impl Stream<Item = Result<PipelineRun>> + '_ {
        let scope = self.store().context_path(pipeline);
        let expr = filter::has_parent_context(scope)
            .and(filter::schema_title("system.PipelineRun"));
        self.contexts(Some(expr.into())).map(|result| {
            result.and_then(|record| PipelineRun::from_record(record).map_err(ClientError::from))
        })
    }

    /// Stream raw context records matching a filter, page by page
    ///
    /// The next page is requested only once the previous page's records
    /// have been consumed.
    pub(crate) fn contexts(
        &self,
        filter: Option<Filter>,
    ) -> impl Stream<Item = Result<ContextRecord>> + '_ {
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
                let page = self.service().list_contexts(&parent, &request).await?;
                let next = next_request(&request, page.next_page_token);
                let records = stream::iter(page.contexts.into_iter().map(Ok::<_, ClientError>));
                Ok(Some((records, next)))
            }
        })
        .try_flatten()
    }
}
