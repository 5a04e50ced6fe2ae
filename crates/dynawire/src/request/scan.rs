use std::sync::Arc;

use dynawire_model::input::ScanInput;
use dynawire_model::output::ItemPageOutput;
use dynawire_model::types::{CapacityDetail, ConsumedCapacity, Select};
use dynawire_model::{Document, IntoParams, ParamError};

use super::{bind_params, check_documents, check_params, impl_params};
use crate::cursor::resume_key;
use crate::error::Result;
use crate::executor::Executor;

/// Reads every item in a table or index.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct Scan {
    executor: Arc<dyn Executor>,
    input: ScanInput,
    param_error: Option<ParamError>,
}

impl Scan {
    pub(crate) fn new(executor: Arc<dyn Executor>, table: impl Into<String>) -> Self {
        Self {
            executor,
            input: ScanInput {
                table_name: table.into(),
                ..Default::default()
            },
            param_error: None,
        }
    }

    /// Scan a secondary index instead of the table.
    pub fn index_name(&self, index: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.input.index_name = Some(index.into());
        next
    }

    /// Drop scanned items for which `expression` is false.
    pub fn filter_expression(
        &self,
        expression: impl Into<String>,
        params: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        next.input.filter_expression = Some(expression.into());
        bind_params(
            &mut next.input.expression_attributes,
            &mut next.param_error,
            params,
        );
        next
    }

    /// Only return these attributes.
    pub fn projection_expression(
        &self,
        expression: impl Into<String>,
        params: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        next.input.projection_expression = Some(expression.into());
        bind_params(
            &mut next.input.expression_attributes,
            &mut next.param_error,
            params,
        );
        next
    }

    /// Which attributes, or only the count, to return.
    pub fn select(&self, select: Select) -> Self {
        let mut next = self.clone();
        next.input.select = Some(select);
        next
    }

    /// Evaluate at most `limit` items per page.
    pub fn limit(&self, limit: u32) -> Self {
        let mut next = self.clone();
        next.input.limit = Some(limit);
        next
    }

    /// Use a strongly consistent read.
    pub fn consistent_read(&self, consistent: bool) -> Self {
        let mut next = self.clone();
        next.input.consistent_read = consistent;
        next
    }

    /// Read only segment `segment` of `total_segments` for a parallel scan.
    pub fn segment(&self, segment: u32, total_segments: u32) -> Self {
        let mut next = self.clone();
        next.input.segment = Some(segment);
        next.input.total_segments = Some(total_segments);
        next
    }

    /// Resume after `key`.
    pub fn exclusive_start_key(&self, key: Document) -> Self {
        let mut next = self.clone();
        next.input.exclusive_start_key = Some(key);
        next
    }

    /// Ask for consumed capacity in the result.
    pub fn return_consumed_capacity(&self, detail: CapacityDetail) -> Self {
        let mut next = self.clone();
        next.input.return_consumed_capacity = Some(detail);
        next
    }

    /// The request as it will be sent.
    #[must_use]
    pub fn input(&self) -> &ScanInput {
        &self.input
    }

    /// Fetch one page.
    pub async fn execute(&self) -> Result<ScanResult> {
        check_params(self.param_error.as_ref())?;
        check_documents(
            self.input
                .exclusive_start_key
                .iter()
                .chain([self.input.expression_attributes.values()]),
        )?;
        self.executor.scan(self).await
    }
}

impl_params!(Scan);

/// One page of scan results.
#[derive(Debug, Clone)]
pub struct ScanResult {
    /// Items that passed the filter.
    pub items: Vec<Document>,
    /// Items returned after filtering.
    pub count: u64,
    /// Items evaluated before filtering.
    pub scanned_count: u64,
    /// Where this page stopped, when more may follow.
    pub last_evaluated_key: Option<Document>,
    /// Capacity consumed, when requested.
    pub consumed_capacity: Option<ConsumedCapacity>,
    request: Scan,
}

impl ScanResult {
    pub(crate) fn new(output: ItemPageOutput, request: Scan) -> Self {
        Self {
            items: output.items,
            count: output.count,
            scanned_count: output.scanned_count,
            last_evaluated_key: output.last_evaluated_key,
            consumed_capacity: output.consumed_capacity,
            request,
        }
    }

    /// The request for the following page, or `None` after the last page.
    #[must_use]
    pub fn next(&self) -> Option<Scan> {
        resume_key(self.last_evaluated_key.as_ref())
            .map(|key| self.request.exclusive_start_key(key.clone()))
    }

    /// The request that produced this page.
    #[must_use]
    pub fn request(&self) -> &Scan {
        &self.request
    }
}
