//! An in-memory [`Executor`] for testing code that uses the client.
//!
//! [`MockExecutor`] never touches the network. It records every call with
//! the request body that would have been sent, and answers with whatever
//! result or error was configured for that operation (an empty result by
//! default).
//!
//! ```
//! # async fn demo() -> dynawire::Result<()> {
//! use std::sync::Arc;
//!
//! use dynawire::mock::MockExecutor;
//! use dynawire::{Client, Document, Operation};
//!
//! let mock = Arc::new(MockExecutor::new());
//! let client = Client::with_executor(mock.clone());
//! client.put_item("People", Document::hash_key("Id", 1)).execute().await?;
//!
//! assert!(mock.was_called(Operation::PutItem));
//! assert_eq!(mock.last_call(Operation::PutItem).unwrap().table(), Some("People"));
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use dynawire_model::Operation;
use dynawire_model::input::{
    BatchGetItemInput, BatchWriteItemInput, DeleteItemInput, GetItemInput, PutItemInput,
    QueryInput, ScanInput, UpdateItemInput,
};
use dynawire_model::output::{
    BatchGetItemOutput, BatchWriteItemOutput, GetItemOutput, ItemPageOutput, WriteItemOutput,
};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::{Result, ServiceError};
use crate::executor::{Executor, SchemaExecutor};
use crate::request::{
    BatchGet, BatchGetResult, BatchWrite, BatchWriteResult, DeleteItem, DeleteItemResult, GetItem,
    GetItemResult, PutItem, PutItemResult, Query, QueryResult, Scan, ScanResult, UpdateItem,
    UpdateItemResult,
};

/// The request recorded for one call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    /// A get.
    GetItem(GetItemInput),
    /// A put.
    PutItem(PutItemInput),
    /// An update.
    UpdateItem(UpdateItemInput),
    /// A delete.
    DeleteItem(DeleteItemInput),
    /// A query page.
    Query(QueryInput),
    /// A scan page.
    Scan(ScanInput),
    /// A batch get.
    BatchGetItem(BatchGetItemInput),
    /// A batch write.
    BatchWriteItem(BatchWriteItemInput),
}

impl MockCall {
    /// The operation this call was for.
    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::GetItem(_) => Operation::GetItem,
            Self::PutItem(_) => Operation::PutItem,
            Self::UpdateItem(_) => Operation::UpdateItem,
            Self::DeleteItem(_) => Operation::DeleteItem,
            Self::Query(_) => Operation::Query,
            Self::Scan(_) => Operation::Scan,
            Self::BatchGetItem(_) => Operation::BatchGetItem,
            Self::BatchWriteItem(_) => Operation::BatchWriteItem,
        }
    }

    /// The target table. Batch calls span several tables and return `None`.
    #[must_use]
    pub fn table(&self) -> Option<&str> {
        match self {
            Self::GetItem(input) => Some(&input.table_name),
            Self::PutItem(input) => Some(&input.table_name),
            Self::UpdateItem(input) => Some(&input.table_name),
            Self::DeleteItem(input) => Some(&input.table_name),
            Self::Query(input) => Some(&input.table_name),
            Self::Scan(input) => Some(&input.table_name),
            Self::BatchGetItem(_) | Self::BatchWriteItem(_) => None,
        }
    }

    /// The request as JSON, exactly as it would go on the wire.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let body = match self {
            Self::GetItem(input) => serde_json::to_value(input),
            Self::PutItem(input) => serde_json::to_value(input),
            Self::UpdateItem(input) => serde_json::to_value(input),
            Self::DeleteItem(input) => serde_json::to_value(input),
            Self::Query(input) => serde_json::to_value(input),
            Self::Scan(input) => serde_json::to_value(input),
            Self::BatchGetItem(input) => serde_json::to_value(input),
            Self::BatchWriteItem(input) => serde_json::to_value(input),
        };
        body.unwrap_or_else(|err| serde_json::Value::String(err.to_string()))
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    errors: HashMap<Operation, ServiceError>,
    get_item: GetItemOutput,
    put_item: WriteItemOutput,
    update_item: WriteItemOutput,
    delete_item: WriteItemOutput,
    query: ItemPageOutput,
    scan: ItemPageOutput,
    batch_get_item: BatchGetItemOutput,
    batch_write_item: BatchWriteItemOutput,
}

/// Records calls and returns canned results.
#[derive(Debug, Default)]
pub struct MockExecutor {
    state: Mutex<MockState>,
}

impl MockExecutor {
    /// A mock that answers every call with an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().calls.clone()
    }

    /// `true` if `operation` has been called.
    #[must_use]
    pub fn was_called(&self, operation: Operation) -> bool {
        self.state
            .lock()
            .calls
            .iter()
            .any(|call| call.operation() == operation)
    }

    /// The most recent call for `operation`.
    #[must_use]
    pub fn last_call(&self, operation: Operation) -> Option<MockCall> {
        self.state
            .lock()
            .calls
            .iter()
            .rev()
            .find(|call| call.operation() == operation)
            .cloned()
    }

    /// Forget recorded calls. Configured results and errors stay.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Fail every call to `operation` with `error`.
    pub fn set_error(&self, operation: Operation, error: ServiceError) {
        self.state.lock().errors.insert(operation, error);
    }

    /// Stop failing calls to `operation`.
    pub fn clear_error(&self, operation: Operation) {
        self.state.lock().errors.remove(&operation);
    }

    /// Answer gets with `output`.
    pub fn set_get_item_result(&self, output: GetItemOutput) {
        self.state.lock().get_item = output;
    }

    /// Answer puts with `output`.
    pub fn set_put_item_result(&self, output: WriteItemOutput) {
        self.state.lock().put_item = output;
    }

    /// Answer updates with `output`.
    pub fn set_update_item_result(&self, output: WriteItemOutput) {
        self.state.lock().update_item = output;
    }

    /// Answer deletes with `output`.
    pub fn set_delete_item_result(&self, output: WriteItemOutput) {
        self.state.lock().delete_item = output;
    }

    /// Answer queries with `output`. A zero count is filled in from the
    /// number of items, and a zero scanned count from the count.
    pub fn set_query_result(&self, output: ItemPageOutput) {
        self.state.lock().query = fill_counts(output);
    }

    /// Answer scans with `output`, filling in counts like
    /// [`set_query_result`](Self::set_query_result).
    pub fn set_scan_result(&self, output: ItemPageOutput) {
        self.state.lock().scan = fill_counts(output);
    }

    /// Answer batch gets with `output`.
    pub fn set_batch_get_item_result(&self, output: BatchGetItemOutput) {
        self.state.lock().batch_get_item = output;
    }

    /// Answer batch writes with `output`.
    pub fn set_batch_write_item_result(&self, output: BatchWriteItemOutput) {
        self.state.lock().batch_write_item = output;
    }

    fn record<T>(
        &self,
        call: MockCall,
        result: impl FnOnce(&MockState) -> T,
    ) -> Result<T> {
        let operation = call.operation();
        debug!(%operation, table = call.table().unwrap_or_default(), "mock call");
        let mut state = self.state.lock();
        state.calls.push(call);
        if let Some(error) = state.errors.get(&operation) {
            return Err(error.clone().into());
        }
        Ok(result(&state))
    }
}

fn fill_counts(mut output: ItemPageOutput) -> ItemPageOutput {
    if output.count == 0 {
        output.count = output.items.len() as u64;
    }
    if output.scanned_count == 0 {
        output.scanned_count = output.count;
    }
    output
}

#[async_trait]
impl Executor for MockExecutor {
    async fn get_item(&self, request: &GetItem) -> Result<GetItemResult> {
        self.record(MockCall::GetItem(request.input().clone()), |state| {
            state.get_item.clone()
        })
    }

    async fn put_item(&self, request: &PutItem) -> Result<PutItemResult> {
        self.record(MockCall::PutItem(request.input().clone()), |state| {
            state.put_item.clone()
        })
    }

    async fn update_item(&self, request: &UpdateItem) -> Result<UpdateItemResult> {
        self.record(MockCall::UpdateItem(request.input().clone()), |state| {
            state.update_item.clone()
        })
    }

    async fn delete_item(&self, request: &DeleteItem) -> Result<DeleteItemResult> {
        self.record(MockCall::DeleteItem(request.input().clone()), |state| {
            state.delete_item.clone()
        })
    }

    async fn query(&self, request: &Query) -> Result<QueryResult> {
        let output = self.record(MockCall::Query(request.input().clone()), |state| {
            state.query.clone()
        })?;
        Ok(QueryResult::new(output, request.clone()))
    }

    async fn scan(&self, request: &Scan) -> Result<ScanResult> {
        let output = self.record(MockCall::Scan(request.input().clone()), |state| {
            state.scan.clone()
        })?;
        Ok(ScanResult::new(output, request.clone()))
    }

    async fn batch_get_item(&self, request: &BatchGet) -> Result<BatchGetResult> {
        let output = self.record(MockCall::BatchGetItem(request.to_input()), |state| {
            state.batch_get_item.clone()
        })?;
        Ok(BatchGetResult::new(output, request.clone()))
    }

    async fn batch_write_item(&self, request: &BatchWrite) -> Result<BatchWriteResult> {
        let output = self.record(MockCall::BatchWriteItem(request.to_input()), |state| {
            state.batch_write_item.clone()
        })?;
        Ok(BatchWriteResult::new(output, request.clone()))
    }

    fn schema(&self) -> Option<&dyn SchemaExecutor> {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dynawire_model::{Document, ErrorKind, Param};

    use super::*;
    use crate::Client;
    use crate::error::Error;

    fn setup() -> (Client, Arc<MockExecutor>) {
        let mock = Arc::new(MockExecutor::new());
        (Client::with_executor(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_should_record_put_call() {
        let (client, mock) = setup();
        client
            .put_item("People", Document::new().with("Id", 1).with("Name", "Bob"))
            .condition_expression("attribute_not_exists(Id)", ())
            .execute()
            .await
            .unwrap();

        let Some(MockCall::PutItem(input)) = mock.last_call(Operation::PutItem) else {
            panic!("put was not recorded");
        };
        assert_eq!(input.table_name, "People");
        assert_eq!(input.item.get_string("Name").unwrap(), Some("Bob"));
        assert_eq!(
            input.condition_expression.as_deref(),
            Some("attribute_not_exists(Id)")
        );
        assert!(!mock.was_called(Operation::GetItem));
    }

    #[tokio::test]
    async fn test_should_return_configured_error() {
        let (client, mock) = setup();
        mock.set_error(
            Operation::UpdateItem,
            ServiceError::new(ErrorKind::ConditionCheckFailed, "nope"),
        );
        let err = client
            .update_item("t", Document::hash_key("Id", 1))
            .update_expression("SET A = :a", Param::new(":a", 1))
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Service(ref e) if e.kind == ErrorKind::ConditionCheckFailed));
        assert_eq!(mock.calls().len(), 1);

        mock.clear_error(Operation::UpdateItem);
        assert!(
            client
                .update_item("t", Document::hash_key("Id", 1))
                .execute()
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_should_default_query_counts() {
        let (client, mock) = setup();
        mock.set_query_result(ItemPageOutput {
            items: vec![Document::hash_key("Id", 1), Document::hash_key("Id", 2)],
            ..Default::default()
        });

        let page = client
            .query("t")
            .key_condition_expression("Id = :id", Param::new(":id", 1))
            .execute()
            .await
            .unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.scanned_count, 2);
        assert!(page.next().is_none());

        let call = mock.last_call(Operation::Query).unwrap();
        assert_eq!(
            call.to_json()["ExpressionAttributeValues"],
            serde_json::json!({":id": {"N": "1"}})
        );
    }

    #[tokio::test]
    async fn test_should_record_batch_calls() {
        let (client, mock) = setup();
        client
            .batch_write()
            .put("a", [Document::hash_key("Id", 1)])
            .delete("b", [Document::hash_key("Id", 2)])
            .execute()
            .await
            .unwrap();

        let Some(MockCall::BatchWriteItem(input)) = mock.last_call(Operation::BatchWriteItem)
        else {
            panic!("batch write was not recorded");
        };
        assert_eq!(input.request_items.len(), 2);
        assert!(mock.last_call(Operation::BatchWriteItem).unwrap().table().is_none());

        mock.clear_calls();
        assert!(mock.calls().is_empty());
    }
}
