//! The client entry point.

use std::sync::Arc;

use dynawire_model::Document;
use dynawire_model::input::{CreateTableInput, DeleteTableInput, DescribeTableInput};
use dynawire_model::types::TableDescription;

use crate::config::ClientConfig;
use crate::dispatch::RequestMaker;
use crate::error::{Error, Result};
use crate::executor::{AwsExecutor, Executor, SchemaExecutor};
use crate::request::{
    BatchGet, BatchWrite, DeleteItem, GetItem, ListTables, PutItem, Query, Scan, UpdateItem,
};

/// Entry point for building requests.
///
/// Cloning is cheap and every clone shares one executor.
#[derive(Debug, Clone)]
pub struct Client {
    executor: Arc<dyn Executor>,
}

impl Client {
    /// A client that signs and sends requests as described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let requester = RequestMaker::shared(config)?;
        Ok(Self::with_executor(Arc::new(AwsExecutor::new(requester))))
    }

    /// A client over any executor, such as a
    /// [`MockExecutor`](crate::mock::MockExecutor).
    pub fn with_executor(executor: Arc<dyn Executor>) -> Self {
        Self { executor }
    }

    /// The executor requests are handed to.
    #[must_use]
    pub fn executor(&self) -> &Arc<dyn Executor> {
        &self.executor
    }

    /// Read the item with `key` from `table`.
    pub fn get_item(&self, table: impl Into<String>, key: Document) -> GetItem {
        GetItem::new(self.executor.clone(), table, key)
    }

    /// Create or replace `item` in `table`.
    pub fn put_item(&self, table: impl Into<String>, item: Document) -> PutItem {
        PutItem::new(self.executor.clone(), table, item)
    }

    /// Modify the item with `key` in `table`.
    pub fn update_item(&self, table: impl Into<String>, key: Document) -> UpdateItem {
        UpdateItem::new(self.executor.clone(), table, key)
    }

    /// Remove the item with `key` from `table`.
    pub fn delete_item(&self, table: impl Into<String>, key: Document) -> DeleteItem {
        DeleteItem::new(self.executor.clone(), table, key)
    }

    /// Query `table`.
    pub fn query(&self, table: impl Into<String>) -> Query {
        Query::new(self.executor.clone(), table)
    }

    /// Scan `table`.
    pub fn scan(&self, table: impl Into<String>) -> Scan {
        Scan::new(self.executor.clone(), table)
    }

    /// Read items from several tables at once.
    pub fn batch_get(&self) -> BatchGet {
        BatchGet::new(self.executor.clone())
    }

    /// Put and delete items in several tables at once.
    pub fn batch_write(&self) -> BatchWrite {
        BatchWrite::new(self.executor.clone())
    }

    /// List table names.
    pub fn list_tables(&self) -> ListTables {
        ListTables::new(self.executor.clone())
    }

    /// Create a table.
    pub async fn create_table(&self, input: CreateTableInput) -> Result<TableDescription> {
        self.schema()?.create_table(&input).await
    }

    /// Delete a table.
    pub async fn delete_table(&self, table: impl Into<String>) -> Result<TableDescription> {
        let input = DeleteTableInput {
            table_name: table.into(),
        };
        self.schema()?.delete_table(&input).await
    }

    /// Describe a table.
    pub async fn describe_table(&self, table: impl Into<String>) -> Result<TableDescription> {
        let input = DescribeTableInput {
            table_name: table.into(),
        };
        self.schema()?.describe_table(&input).await
    }

    fn schema(&self) -> Result<&dyn SchemaExecutor> {
        self.executor
            .schema()
            .ok_or(Error::Unsupported("table operations"))
    }
}
