use std::sync::Arc;

use dynawire_model::input::QueryInput;
use dynawire_model::output::ItemPageOutput;
use dynawire_model::types::{CapacityDetail, ConsumedCapacity, Select};
use dynawire_model::{Document, IntoParams, ParamError};

use super::{bind_params, check_documents, check_params, impl_params};
use crate::cursor::resume_key;
use crate::error::Result;
use crate::executor::Executor;

/// Reads items that share a partition key.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct Query {
    executor: Arc<dyn Executor>,
    input: QueryInput,
    param_error: Option<ParamError>,
}

impl Query {
    pub(crate) fn new(executor: Arc<dyn Executor>, table: impl Into<String>) -> Self {
        Self {
            executor,
            input: QueryInput {
                table_name: table.into(),
                ..Default::default()
            },
            param_error: None,
        }
    }

    /// Query a secondary index instead of the table.
    pub fn index_name(&self, index: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.input.index_name = Some(index.into());
        next
    }

    /// Which partition, and optionally which range of sort keys, to read.
    pub fn key_condition_expression(
        &self,
        expression: impl Into<String>,
        params: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        next.input.key_condition_expression = Some(expression.into());
        bind_params(
            &mut next.input.expression_attributes,
            &mut next.param_error,
            params,
        );
        next
    }

    /// Drop matched items for which `expression` is false. Filtered items
    /// still count towards the limit.
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

    /// Walk the sort key ascending (`true`, the default) or descending.
    pub fn scan_index_forward(&self, forward: bool) -> Self {
        let mut next = self.clone();
        next.input.scan_index_forward = Some(forward);
        next
    }

    /// Walk the sort key descending.
    pub fn desc(&self) -> Self {
        self.scan_index_forward(false)
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
    pub fn input(&self) -> &QueryInput {
        &self.input
    }

    /// Fetch one page.
    pub async fn execute(&self) -> Result<QueryResult> {
        check_params(self.param_error.as_ref())?;
        check_documents(
            self.input
                .exclusive_start_key
                .iter()
                .chain([self.input.expression_attributes.values()]),
        )?;
        self.executor.query(self).await
    }
}

impl_params!(Query);

/// One page of query results.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// Matching items.
    pub items: Vec<Document>,
    /// Items returned after filtering.
    pub count: u64,
    /// Items evaluated before filtering.
    pub scanned_count: u64,
    /// Where this page stopped, when more may follow.
    pub last_evaluated_key: Option<Document>,
    /// Capacity consumed, when requested.
    pub consumed_capacity: Option<ConsumedCapacity>,
    request: Query,
}

impl QueryResult {
    pub(crate) fn new(output: ItemPageOutput, request: Query) -> Self {
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
    pub fn next(&self) -> Option<Query> {
        resume_key(self.last_evaluated_key.as_ref())
            .map(|key| self.request.exclusive_start_key(key.clone()))
    }

    /// The request that produced this page.
    #[must_use]
    pub fn request(&self) -> &Query {
        &self.request
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use dynawire_model::output::ItemPageOutput;
    use dynawire_model::{Document, Param, Value};

    use super::*;
    use crate::Client;
    use crate::mock::MockExecutor;

    fn base() -> Query {
        Client::with_executor(Arc::new(MockExecutor::new()))
            .query("Orders")
            .key_condition_expression("CustomerId = :c", Param::new(":c", "alice"))
    }

    #[test]
    fn test_should_fork_independent_params() {
        let q = base().param(":a", 0);
        let one = q.param(":a", 1);
        let two = q.param(":a", 2);

        let values = |query: &Query| {
            query.input().expression_attributes.values().get(":a").cloned()
        };
        assert_eq!(values(&q), Some(Value::from(0)));
        assert_eq!(values(&one), Some(Value::from(1)));
        assert_eq!(values(&two), Some(Value::from(2)));
        assert!(
            one.input()
                .expression_attributes
                .shares_names_with(&q.input().expression_attributes)
        );
    }

    #[test]
    fn test_should_fork_safely_across_threads() {
        let q = base();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let q = q.clone();
                thread::spawn(move || q.param(":a", i))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let forked = handle.join().unwrap();
            let value = forked.input().expression_attributes.values().get(":a").cloned();
            assert_eq!(value, Some(Value::from(i)));
        }
        assert!(q.input().expression_attributes.values().get(":a").is_none());
        assert_eq!(q.input().expression_attributes.values().len(), 1);
    }

    #[test]
    fn test_should_not_copy_on_zero_params() {
        let q = base();
        let same = q.params(());
        assert!(
            same.input()
                .expression_attributes
                .shares_values_with(&q.input().expression_attributes)
        );
    }

    #[test]
    fn test_should_set_ordering_and_limit() {
        let q = base().limit(10).desc().index_name("ByDate");
        assert_eq!(q.input().limit, Some(10));
        assert_eq!(q.input().scan_index_forward, Some(false));
        assert_eq!(q.input().index_name.as_deref(), Some("ByDate"));

        let body = serde_json::to_value(q.input()).unwrap();
        assert_eq!(body["ScanIndexForward"], serde_json::json!(false));
        assert_eq!(body["Limit"], serde_json::json!(10));
    }

    #[test]
    fn test_should_derive_next_page_from_last_key() {
        let q = base().limit(2);
        let last = Document::new().with("CustomerId", "alice").with("OrderId", 2);
        let result = QueryResult::new(
            ItemPageOutput {
                count: 2,
                scanned_count: 2,
                last_evaluated_key: Some(last.clone()),
                ..Default::default()
            },
            q.clone(),
        );

        let next = result.next().unwrap();
        assert_eq!(next.input().exclusive_start_key.as_ref(), Some(&last));
        assert_eq!(next.input().limit, q.input().limit);
        assert_eq!(next.input().key_condition_expression, q.input().key_condition_expression);
        assert_eq!(next.input().expression_attributes, q.input().expression_attributes);
    }

    #[test]
    fn test_should_end_pagination_without_last_key() {
        let q = base();
        let done = QueryResult::new(ItemPageOutput::default(), q.clone());
        assert!(done.next().is_none());

        let empty = QueryResult::new(
            ItemPageOutput {
                last_evaluated_key: Some(Document::new()),
                ..Default::default()
            },
            q,
        );
        assert!(empty.next().is_none());
    }
}
