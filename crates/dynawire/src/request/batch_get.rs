use std::collections::HashMap;
use std::sync::Arc;

use dynawire_model::input::BatchGetItemInput;
use dynawire_model::output::BatchGetItemOutput;
use dynawire_model::types::{
    CapacityDetail, ConsumedCapacity, KeysAndAttributes, capacity_for_table,
};
use dynawire_model::{Document, ExpressionAttributes, IntoParams, ParamError};

use super::{check_documents, check_params};
use crate::error::Result;
use crate::executor::Executor;

/// Reads items by key from one or more tables in a single request.
///
/// Tables appear in the order they were first named, and keys within a
/// table in the order they were added.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct BatchGet {
    executor: Arc<dyn Executor>,
    tables: Vec<(String, KeysAndAttributes)>,
    return_consumed_capacity: Option<CapacityDetail>,
    param_error: Option<ParamError>,
}

impl BatchGet {
    pub(crate) fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            tables: Vec::new(),
            return_consumed_capacity: None,
            param_error: None,
        }
    }

    fn entry(&mut self, table: String) -> &mut KeysAndAttributes {
        let index = match self.tables.iter().position(|(name, _)| *name == table) {
            Some(index) => index,
            None => {
                self.tables.push((table, KeysAndAttributes::default()));
                self.tables.len() - 1
            }
        };
        &mut self.tables[index].1
    }

    /// Fetch `keys` from `table`.
    pub fn get(&self, table: impl Into<String>, keys: impl IntoIterator<Item = Document>) -> Self {
        let mut next = self.clone();
        next.entry(table.into()).keys.extend(keys);
        next
    }

    /// Only return these attributes from `table`.
    ///
    /// Batch reads accept name aliases only, so a `:value` placeholder is
    /// rejected when the request is executed.
    pub fn projection_expression(
        &self,
        table: impl Into<String>,
        expression: impl Into<String>,
        names: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        let bound = ExpressionAttributes::new().add_params(names);
        let entry = next.entry(table.into());
        entry.projection_expression = Some(expression.into());
        let failure = match bound {
            Ok(bound) => match bound.values().keys().next() {
                Some(key) => Some(ParamError::ValueNotAccepted { key: key.clone() }),
                None => {
                    entry.expression_attribute_names.extend(
                        bound
                            .names()
                            .iter()
                            .map(|(alias, name)| (alias.clone(), name.clone())),
                    );
                    None
                }
            },
            Err(err) => Some(err),
        };
        if next.param_error.is_none() {
            next.param_error = failure;
        }
        next
    }

    /// Use strongly consistent reads for `table`.
    pub fn consistent_read(&self, table: impl Into<String>, consistent: bool) -> Self {
        let mut next = self.clone();
        next.entry(table.into()).consistent_read = consistent;
        next
    }

    /// Ask for consumed capacity in the result.
    pub fn return_consumed_capacity(&self, detail: CapacityDetail) -> Self {
        let mut next = self.clone();
        next.return_consumed_capacity = Some(detail);
        next
    }

    /// Names of the tables involved, in the order they were added.
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(name, _)| name.as_str())
    }

    /// `true` when no keys have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(|(_, entry)| entry.keys.is_empty())
    }

    /// Build the request body.
    #[must_use]
    pub fn to_input(&self) -> BatchGetItemInput {
        BatchGetItemInput {
            request_items: self.tables.iter().cloned().collect(),
            return_consumed_capacity: self.return_consumed_capacity,
        }
    }

    /// Send the request.
    pub async fn execute(&self) -> Result<BatchGetResult> {
        check_params(self.param_error.as_ref())?;
        check_documents(self.tables.iter().flat_map(|(_, entry)| &entry.keys))?;
        self.executor.batch_get_item(self).await
    }
}

/// Result of a batch get.
#[derive(Debug, Clone)]
pub struct BatchGetResult {
    /// Items found, by table.
    pub responses: HashMap<String, Vec<Document>>,
    /// Keys the service did not get to, by table.
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,
    /// Capacity consumed per table, when requested.
    pub consumed_capacity: Vec<ConsumedCapacity>,
    request: BatchGet,
}

impl BatchGetResult {
    pub(crate) fn new(output: BatchGetItemOutput, request: BatchGet) -> Self {
        Self {
            responses: output.responses,
            unprocessed_keys: output.unprocessed_keys,
            consumed_capacity: output.consumed_capacity,
            request,
        }
    }

    /// Items found in `table`.
    #[must_use]
    pub fn items(&self, table: &str) -> &[Document] {
        self.responses
            .get(table)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Capacity consumed by `table`.
    #[must_use]
    pub fn capacity(&self, table: &str) -> Option<&ConsumedCapacity> {
        capacity_for_table(&self.consumed_capacity, table)
    }

    /// A request for the unprocessed keys, or `None` when everything was read.
    #[must_use]
    pub fn retry(&self) -> Option<BatchGet> {
        let mut tables: Vec<_> = self
            .unprocessed_keys
            .iter()
            .filter(|(_, entry)| !entry.keys.is_empty())
            .map(|(name, entry)| (name.clone(), entry.clone()))
            .collect();
        if tables.is_empty() {
            return None;
        }
        let order: Vec<&str> = self.request.tables().collect();
        tables.sort_by_key(|(name, _)| order.iter().position(|known| *known == name.as_str()));
        Some(BatchGet {
            tables,
            param_error: None,
            ..self.request.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use dynawire_model::Param;

    use super::*;
    use crate::Client;
    use crate::error::Error;
    use crate::mock::MockExecutor;

    fn batch() -> BatchGet {
        Client::with_executor(Arc::new(MockExecutor::new())).batch_get()
    }

    #[test]
    fn test_should_group_keys_per_table_in_insertion_order() {
        let request = batch()
            .get("a", [Document::hash_key("Id", 1)])
            .get("b", [Document::hash_key("Id", 2)])
            .get("a", [Document::hash_key("Id", 3)])
            .consistent_read("b", true)
            .projection_expression("a", "#n", Param::new("#n", "Name"));

        assert_eq!(request.tables().collect::<Vec<_>>(), vec!["a", "b"]);
        let body = serde_json::to_value(request.to_input()).unwrap();
        assert_eq!(
            body["RequestItems"]["a"],
            serde_json::json!({
                "Keys": [{"Id": {"N": "1"}}, {"Id": {"N": "3"}}],
                "ProjectionExpression": "#n",
                "ExpressionAttributeNames": {"#n": "Name"}
            })
        );
        assert_eq!(
            body["RequestItems"]["b"],
            serde_json::json!({"Keys": [{"Id": {"N": "2"}}], "ConsistentRead": true})
        );
    }

    #[tokio::test]
    async fn test_should_reject_value_placeholder_in_projection() {
        let request = batch()
            .get("a", [Document::hash_key("Id", 1)])
            .projection_expression("a", "Name", Param::new(":v", 1));
        let err = request.execute().await.unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParam(ParamError::ValueNotAccepted { .. })
        ));
    }

    #[test]
    fn test_should_build_retry_from_unprocessed_keys() {
        let request = batch()
            .get("a", [Document::hash_key("Id", 1), Document::hash_key("Id", 2)])
            .return_consumed_capacity(CapacityDetail::Total);
        let mut unprocessed = HashMap::new();
        unprocessed.insert(
            "a".to_owned(),
            KeysAndAttributes {
                keys: vec![Document::hash_key("Id", 2)],
                ..Default::default()
            },
        );
        let result = BatchGetResult::new(
            BatchGetItemOutput {
                unprocessed_keys: unprocessed,
                ..Default::default()
            },
            request,
        );

        let retry = result.retry().unwrap();
        let input = retry.to_input();
        assert_eq!(input.request_items["a"].keys, vec![Document::hash_key("Id", 2)]);
        assert_eq!(input.return_consumed_capacity, Some(CapacityDetail::Total));

        let done = BatchGetResult::new(BatchGetItemOutput::default(), retry);
        assert!(done.retry().is_none());
        assert!(done.items("a").is_empty());
    }
}
