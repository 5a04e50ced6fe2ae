//! The executor seam between builders and the wire.
//!
//! Builders never talk HTTP themselves. `execute()` hands the builder to an
//! [`Executor`], which for real traffic is an [`AwsExecutor`] over a
//! [`Requester`], and in tests is usually a [`MockExecutor`](crate::mock::MockExecutor).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use dynawire_model::Operation;
use dynawire_model::input::{CreateTableInput, DeleteTableInput, DescribeTableInput};
use dynawire_model::output::{
    BatchGetItemOutput, BatchWriteItemOutput, DescribeTableOutput, ItemPageOutput,
    ListTablesOutput, TableDescriptionOutput, WriteItemOutput,
};
use dynawire_model::types::{CapacityDetail, ReturnValues, TableDescription};
use serde::Serialize;
use tracing::trace;

use crate::dispatch::{Requester, make_request_unmarshal};
use crate::error::Result;
use crate::request::{
    BatchGet, BatchGetResult, BatchWrite, BatchWriteResult, DeleteItem, DeleteItemResult, GetItem,
    GetItemResult, ListTables, ListTablesResult, PutItem, PutItemResult, Query, QueryResult, Scan,
    ScanResult, UpdateItem, UpdateItemResult,
};

/// Runs item operations.
#[async_trait]
pub trait Executor: Send + Sync + fmt::Debug {
    /// Read one item.
    async fn get_item(&self, request: &GetItem) -> Result<GetItemResult>;
    /// Write one item.
    async fn put_item(&self, request: &PutItem) -> Result<PutItemResult>;
    /// Modify one item.
    async fn update_item(&self, request: &UpdateItem) -> Result<UpdateItemResult>;
    /// Remove one item.
    async fn delete_item(&self, request: &DeleteItem) -> Result<DeleteItemResult>;
    /// Read one page of a query.
    async fn query(&self, request: &Query) -> Result<QueryResult>;
    /// Read one page of a scan.
    async fn scan(&self, request: &Scan) -> Result<ScanResult>;
    /// Read items from several tables.
    async fn batch_get_item(&self, request: &BatchGet) -> Result<BatchGetResult>;
    /// Put and delete items in several tables.
    async fn batch_write_item(&self, request: &BatchWrite) -> Result<BatchWriteResult>;

    /// Table administration, when this executor supports it.
    fn schema(&self) -> Option<&dyn SchemaExecutor>;
}

/// Runs table administration operations.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    /// Create a table.
    async fn create_table(&self, input: &CreateTableInput) -> Result<TableDescription>;
    /// Delete a table.
    async fn delete_table(&self, input: &DeleteTableInput) -> Result<TableDescription>;
    /// Describe a table.
    async fn describe_table(&self, input: &DescribeTableInput) -> Result<TableDescription>;
    /// List one page of table names.
    async fn list_tables(&self, request: &ListTables) -> Result<ListTablesResult>;
}

/// Executor that sends every operation through a [`Requester`].
pub struct AwsExecutor {
    requester: Arc<dyn Requester>,
}

impl fmt::Debug for AwsExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsExecutor")
            .field("requester", &self.requester)
            .finish()
    }
}

impl AwsExecutor {
    /// Wrap a requester.
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// The underlying requester, for sub-clients sharing the connection.
    #[must_use]
    pub fn requester(&self) -> Arc<dyn Requester> {
        Arc::clone(&self.requester)
    }

    async fn call<I, O>(&self, operation: Operation, input: &I) -> Result<O>
    where
        I: Serialize + Sync,
        O: serde::de::DeserializeOwned,
    {
        trace!(%operation, "dispatching");
        make_request_unmarshal(self.requester.as_ref(), operation.as_str(), input).await
    }

    /// Single-item writes only carry a body worth decoding when attributes
    /// or capacity were asked for.
    async fn write_item<I>(
        &self,
        operation: Operation,
        input: &I,
        return_values: Option<ReturnValues>,
        capacity: Option<CapacityDetail>,
    ) -> Result<WriteItemOutput>
    where
        I: Serialize + Sync,
    {
        let wants_attributes = return_values.is_some_and(|rv| rv.returns_attributes());
        let wants_capacity = capacity.is_some_and(|detail| detail != CapacityDetail::None);
        if wants_attributes || wants_capacity {
            self.call(operation, input).await
        } else {
            let body = serde_json::to_vec(input).map_err(crate::error::Error::Marshal)?;
            self.requester
                .make_request(operation.as_str(), body.into())
                .await?;
            Ok(WriteItemOutput::default())
        }
    }
}

#[async_trait]
impl Executor for AwsExecutor {
    async fn get_item(&self, request: &GetItem) -> Result<GetItemResult> {
        self.call(Operation::GetItem, request.input()).await
    }

    async fn put_item(&self, request: &PutItem) -> Result<PutItemResult> {
        let input = request.input();
        self.write_item(
            Operation::PutItem,
            input,
            input.return_values,
            input.return_consumed_capacity,
        )
        .await
    }

    async fn update_item(&self, request: &UpdateItem) -> Result<UpdateItemResult> {
        let input = request.input();
        self.write_item(
            Operation::UpdateItem,
            input,
            input.return_values,
            input.return_consumed_capacity,
        )
        .await
    }

    async fn delete_item(&self, request: &DeleteItem) -> Result<DeleteItemResult> {
        let input = request.input();
        self.write_item(
            Operation::DeleteItem,
            input,
            input.return_values,
            input.return_consumed_capacity,
        )
        .await
    }

    async fn query(&self, request: &Query) -> Result<QueryResult> {
        let output: ItemPageOutput = self.call(Operation::Query, request.input()).await?;
        Ok(QueryResult::new(output, request.clone()))
    }

    async fn scan(&self, request: &Scan) -> Result<ScanResult> {
        let output: ItemPageOutput = self.call(Operation::Scan, request.input()).await?;
        Ok(ScanResult::new(output, request.clone()))
    }

    async fn batch_get_item(&self, request: &BatchGet) -> Result<BatchGetResult> {
        let output: BatchGetItemOutput = self
            .call(Operation::BatchGetItem, &request.to_input())
            .await?;
        Ok(BatchGetResult::new(output, request.clone()))
    }

    async fn batch_write_item(&self, request: &BatchWrite) -> Result<BatchWriteResult> {
        let output: BatchWriteItemOutput = self
            .call(Operation::BatchWriteItem, &request.to_input())
            .await?;
        Ok(BatchWriteResult::new(output, request.clone()))
    }

    fn schema(&self) -> Option<&dyn SchemaExecutor> {
        Some(self)
    }
}

#[async_trait]
impl SchemaExecutor for AwsExecutor {
    async fn create_table(&self, input: &CreateTableInput) -> Result<TableDescription> {
        let output: TableDescriptionOutput = self.call(Operation::CreateTable, input).await?;
        Ok(output.table_description)
    }

    async fn delete_table(&self, input: &DeleteTableInput) -> Result<TableDescription> {
        let output: TableDescriptionOutput = self.call(Operation::DeleteTable, input).await?;
        Ok(output.table_description)
    }

    async fn describe_table(&self, input: &DescribeTableInput) -> Result<TableDescription> {
        let output: DescribeTableOutput = self.call(Operation::DescribeTable, input).await?;
        Ok(output.table)
    }

    async fn list_tables(&self, request: &ListTables) -> Result<ListTablesResult> {
        let output: ListTablesOutput = self.call(Operation::ListTables, request.input()).await?;
        Ok(ListTablesResult::new(output, request.clone()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use bytes::Bytes;
    use dynawire_model::types::{AttributeType, ReturnValues};
    use dynawire_model::{Document, EncodeError, ErrorKind, Param, Value};
    use parking_lot::Mutex;

    use super::*;
    use crate::Client;
    use crate::error::{Error, ServiceError};

    /// Records every request and answers from a queue of canned bodies.
    #[derive(Debug, Default)]
    pub(crate) struct FakeRequester {
        pub(crate) sent: Mutex<Vec<(Operation, serde_json::Value)>>,
        responses: Mutex<Vec<Result<Bytes>>>,
    }

    impl FakeRequester {
        pub(crate) fn respond(&self, body: &str) {
            self.responses
                .lock()
                .push(Ok(Bytes::copy_from_slice(body.as_bytes())));
        }

        pub(crate) fn fail(&self, err: ServiceError) {
            self.responses.lock().push(Err(err.into()));
        }

        pub(crate) fn last_sent(&self) -> (Operation, serde_json::Value) {
            self.sent.lock().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Requester for FakeRequester {
        async fn make_request(&self, target: &str, body: Bytes) -> Result<Bytes> {
            let operation = Operation::from_name(target).unwrap();
            let json = serde_json::from_slice(&body).unwrap();
            self.sent.lock().push((operation, json));
            let mut responses = self.responses.lock();
            if responses.is_empty() {
                Ok(Bytes::from_static(b"{}"))
            } else {
                responses.remove(0)
            }
        }
    }

    pub(crate) fn fake_client() -> (Client, Arc<FakeRequester>) {
        let requester = Arc::new(FakeRequester::default());
        let executor = AwsExecutor::new(requester.clone());
        (Client::with_executor(Arc::new(executor)), requester)
    }

    #[tokio::test]
    async fn test_should_put_then_get_item() {
        let (client, requester) = fake_client();
        let item = Document::new().with("Id", 1).with("Name", "Bob");

        let put = client.put_item("People", item).execute().await.unwrap();
        assert!(put.attributes.is_none());
        let (operation, body) = requester.last_sent();
        assert_eq!(operation, Operation::PutItem);
        assert_eq!(
            body,
            serde_json::json!({
                "TableName": "People",
                "Item": {"Id": {"N": "1"}, "Name": {"S": "Bob"}}
            })
        );

        requester.respond(r#"{"Item":{"Id":{"N":"1"},"Name":{"S":"Bob"}}}"#);
        let got = client
            .get_item("People", Document::hash_key("Id", 1))
            .execute()
            .await
            .unwrap();
        let item = got.item.unwrap();
        assert_eq!(item.get_string("Name").unwrap(), Some("Bob"));
        assert_eq!(item.get_number("Id").unwrap().unwrap().to_i64().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_should_decode_write_attributes_only_when_requested() {
        let (client, requester) = fake_client();
        requester.respond(r#"{"Attributes":{"Count":{"N":"3"}}}"#);
        let result = client
            .update_item("t", Document::hash_key("Id", 1))
            .update_expression(
                "ADD #c :one",
                [Param::new("#c", "Count"), Param::new(":one", 1)],
            )
            .return_values(ReturnValues::AllNew)
            .execute()
            .await
            .unwrap();
        let attributes = result.attributes.unwrap();
        assert_eq!(attributes.get_number("Count").unwrap().unwrap().as_str(), "3");

        requester.respond(r#"{"Attributes":{"Count":{"N":"4"}}}"#);
        let result = client
            .delete_item("t", Document::hash_key("Id", 1))
            .execute()
            .await
            .unwrap();
        assert!(result.attributes.is_none());
    }

    #[tokio::test]
    async fn test_should_surface_service_errors() {
        let (client, requester) = fake_client();
        requester.fail(ServiceError::new(ErrorKind::ResourceNotFound, "no table"));
        let err = client
            .get_item("missing", Document::hash_key("Id", 1))
            .execute()
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::ResourceNotFound));
    }

    #[tokio::test]
    async fn test_should_reject_bad_param_before_sending() {
        let (client, requester) = fake_client();
        let err = client
            .query("t")
            .key_condition_expression("#k = :v", [Param::new("#k", 1), Param::new(":v", 1)])
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParam(_)));
        assert!(requester.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_unencodable_item_before_sending() {
        let (client, requester) = fake_client();
        let item = Document::new()
            .with("Id", 1)
            .with("Nested", vec![Value::List(Vec::new())]);

        let err = client.put_item("t", item.clone()).execute().await.unwrap_err();
        assert!(matches!(err, Error::Encode(EncodeError::EmptyCollection(_))));

        let err = client
            .batch_write()
            .put("t", [item])
            .execute()
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Encode(EncodeError::EmptyCollection(_))));
        assert!(requester.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn test_should_run_schema_operations() {
        let (client, requester) = fake_client();
        requester.respond(
            r#"{"TableDescription":{"TableName":"t","TableStatus":"CREATING","ItemCount":0}}"#,
        );
        let description = client
            .create_table(CreateTableInput::new("t").hash_key("Id", AttributeType::N))
            .await
            .unwrap();
        assert_eq!(description.table_name, "t");
        let (operation, body) = requester.last_sent();
        assert_eq!(operation, Operation::CreateTable);
        assert_eq!(
            body["ProvisionedThroughput"],
            serde_json::json!({"ReadCapacityUnits": 1, "WriteCapacityUnits": 1})
        );

        requester.respond(r#"{"Table":{"TableName":"t","TableStatus":"ACTIVE"}}"#);
        let description = client.describe_table("t").await.unwrap();
        assert_eq!(description.table_status, "ACTIVE");
    }
}
