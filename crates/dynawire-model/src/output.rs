//! Response bodies for each operation.
//!
//! Every field defaults when absent, so partial responses (and `{}`) decode.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::types::{ConsumedCapacity, KeysAndAttributes, TableDescription, WriteRequest};

/// Output of `GetItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetItemOutput {
    /// The item, absent when no item has the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Document>,
    /// Capacity consumed, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Output of `PutItem`, `UpdateItem` and `DeleteItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WriteItemOutput {
    /// Attributes selected by `ReturnValues`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Document>,
    /// Capacity consumed, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Output of `Query` and `Scan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ItemPageOutput {
    /// Matching items in this page.
    pub items: Vec<Document>,
    /// Items returned after filtering.
    pub count: u64,
    /// Items evaluated before filtering.
    pub scanned_count: u64,
    /// Present when more pages exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_key: Option<Document>,
    /// Capacity consumed, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumed_capacity: Option<ConsumedCapacity>,
}

/// Output of `BatchGetItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchGetItemOutput {
    /// Items fetched, per table.
    pub responses: HashMap<String, Vec<Document>>,
    /// Keys that were not processed and should be retried.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub unprocessed_keys: HashMap<String, KeysAndAttributes>,
    /// Capacity consumed per table, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

/// Output of `BatchWriteItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BatchWriteItemOutput {
    /// Writes that were not processed and should be retried.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub unprocessed_items: HashMap<String, Vec<WriteRequest>>,
    /// Capacity consumed per table, when requested.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumed_capacity: Vec<ConsumedCapacity>,
}

/// Output of `CreateTable` and `DeleteTable`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TableDescriptionOutput {
    /// The affected table.
    pub table_description: TableDescription,
}

/// Output of `DescribeTable`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeTableOutput {
    /// The described table.
    pub table: TableDescription,
}

/// Output of `ListTables`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ListTablesOutput {
    /// Table names in this page.
    pub table_names: Vec<String>,
    /// Present when more pages exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_evaluated_table_name: Option<String>,
}
