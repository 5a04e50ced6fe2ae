use std::collections::HashMap;
use std::sync::Arc;

use dynawire_model::Document;
use dynawire_model::input::BatchWriteItemInput;
use dynawire_model::output::BatchWriteItemOutput;
use dynawire_model::types::{CapacityDetail, ConsumedCapacity, WriteRequest, capacity_for_table};

use super::check_documents;
use crate::error::Result;
use crate::executor::Executor;

/// Puts and deletes items in one or more tables in a single request.
///
/// Writes are sent per table in the order they were added.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct BatchWrite {
    executor: Arc<dyn Executor>,
    tables: Vec<(String, Vec<WriteRequest>)>,
    return_consumed_capacity: Option<CapacityDetail>,
}

impl BatchWrite {
    pub(crate) fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            tables: Vec::new(),
            return_consumed_capacity: None,
        }
    }

    fn entry(&mut self, table: String) -> &mut Vec<WriteRequest> {
        let index = match self.tables.iter().position(|(name, _)| *name == table) {
            Some(index) => index,
            None => {
                self.tables.push((table, Vec::new()));
                self.tables.len() - 1
            }
        };
        &mut self.tables[index].1
    }

    /// Put `items` into `table`.
    pub fn put(&self, table: impl Into<String>, items: impl IntoIterator<Item = Document>) -> Self {
        let mut next = self.clone();
        next.entry(table.into())
            .extend(items.into_iter().map(|item| WriteRequest::Put { item }));
        next
    }

    /// Delete the items with `keys` from `table`.
    pub fn delete(
        &self,
        table: impl Into<String>,
        keys: impl IntoIterator<Item = Document>,
    ) -> Self {
        let mut next = self.clone();
        next.entry(table.into())
            .extend(keys.into_iter().map(|key| WriteRequest::Delete { key }));
        next
    }

    /// Ask for consumed capacity in the result.
    pub fn return_consumed_capacity(&self, detail: CapacityDetail) -> Self {
        let mut next = self.clone();
        next.return_consumed_capacity = Some(detail);
        next
    }

    /// Number of writes across all tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.iter().map(|(_, writes)| writes.len()).sum()
    }

    /// `true` when no writes have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the request body.
    #[must_use]
    pub fn to_input(&self) -> BatchWriteItemInput {
        BatchWriteItemInput {
            request_items: self.tables.iter().cloned().collect(),
            return_consumed_capacity: self.return_consumed_capacity,
        }
    }

    /// Send the request.
    pub async fn execute(&self) -> Result<BatchWriteResult> {
        check_documents(self.tables.iter().flat_map(|(_, writes)| {
            writes.iter().map(|write| match write {
                WriteRequest::Put { item } => item,
                WriteRequest::Delete { key } => key,
            })
        }))?;
        self.executor.batch_write_item(self).await
    }
}

/// Result of a batch write.
#[derive(Debug, Clone)]
pub struct BatchWriteResult {
    /// Writes the service did not get to, by table.
    pub unprocessed_items: HashMap<String, Vec<WriteRequest>>,
    /// Capacity consumed per table, when requested.
    pub consumed_capacity: Vec<ConsumedCapacity>,
    request: BatchWrite,
}

impl BatchWriteResult {
    pub(crate) fn new(output: BatchWriteItemOutput, request: BatchWrite) -> Self {
        Self {
            unprocessed_items: output.unprocessed_items,
            consumed_capacity: output.consumed_capacity,
            request,
        }
    }

    /// Unprocessed puts for `table`.
    #[must_use]
    pub fn puts(&self, table: &str) -> Vec<&Document> {
        self.unprocessed(table)
            .filter_map(|write| match write {
                WriteRequest::Put { item } => Some(item),
                WriteRequest::Delete { .. } => None,
            })
            .collect()
    }

    /// Keys of unprocessed deletes for `table`.
    #[must_use]
    pub fn delete_keys(&self, table: &str) -> Vec<&Document> {
        self.unprocessed(table)
            .filter_map(|write| match write {
                WriteRequest::Delete { key } => Some(key),
                WriteRequest::Put { .. } => None,
            })
            .collect()
    }

    fn unprocessed(&self, table: &str) -> impl Iterator<Item = &WriteRequest> {
        self.unprocessed_items.get(table).into_iter().flatten()
    }

    /// Capacity consumed by `table`.
    #[must_use]
    pub fn capacity(&self, table: &str) -> Option<&ConsumedCapacity> {
        capacity_for_table(&self.consumed_capacity, table)
    }

    /// A request for the unprocessed writes, or `None` when all were applied.
    #[must_use]
    pub fn retry(&self) -> Option<BatchWrite> {
        let order: Vec<&str> = self
            .request
            .tables
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        let mut tables: Vec<_> = self
            .unprocessed_items
            .iter()
            .filter(|(_, writes)| !writes.is_empty())
            .map(|(name, writes)| (name.clone(), writes.clone()))
            .collect();
        if tables.is_empty() {
            return None;
        }
        tables.sort_by_key(|(name, _)| order.iter().position(|known| *known == name.as_str()));
        Some(BatchWrite {
            tables,
            ..self.request.clone()
        })
    }
}
