//! Request bodies for each operation.
//!
//! Expression parameters are flattened into the body as
//! `ExpressionAttributeValues` / `ExpressionAttributeNames`.

use std::collections::HashMap;

use serde::Serialize;

use crate::document::Document;
use crate::params::ExpressionAttributes;
use crate::types::{
    AttributeDefinition, AttributeType, CapacityDetail, KeySchemaElement, KeyType,
    KeysAndAttributes, ProvisionedThroughput, ReturnValues, SecondaryIndex, Select,
    StreamSpecification, WriteRequest,
};

pub(crate) fn is_false(b: &bool) -> bool {
    !*b
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Input for `GetItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemInput {
    /// Table to read from.
    pub table_name: String,
    /// Primary key of the item.
    pub key: Document,
    /// Attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// Strongly consistent read.
    #[serde(skip_serializing_if = "is_false")]
    pub consistent_read: bool,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
    /// Name aliases for the projection.
    #[serde(flatten)]
    pub expression_attributes: ExpressionAttributes,
}

/// Input for `PutItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemInput {
    /// Table to write to.
    pub table_name: String,
    /// The full item.
    pub item: Document,
    /// Condition that must hold for the write to happen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Values to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
    /// Parameters for the condition.
    #[serde(flatten)]
    pub expression_attributes: ExpressionAttributes,
}

/// Input for `UpdateItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemInput {
    /// Table to write to.
    pub table_name: String,
    /// Primary key of the item.
    pub key: Document,
    /// `SET`/`REMOVE`/`ADD`/`DELETE` clauses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_expression: Option<String>,
    /// Condition that must hold for the update to happen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Values to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
    /// Parameters for both expressions.
    #[serde(flatten)]
    pub expression_attributes: ExpressionAttributes,
}

/// Input for `DeleteItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteItemInput {
    /// Table to delete from.
    pub table_name: String,
    /// Primary key of the item.
    pub key: Document,
    /// Condition that must hold for the delete to happen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
    /// Values to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_values: Option<ReturnValues>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
    /// Parameters for the condition.
    #[serde(flatten)]
    pub expression_attributes: ExpressionAttributes,
}

// ---------------------------------------------------------------------------
// Query / Scan
// ---------------------------------------------------------------------------

/// Input for `Query`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryInput {
    /// Table to query.
    pub table_name: String,
    /// Secondary index to query instead of the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    /// Condition on the key attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_condition_expression: Option<String>,
    /// Condition applied after reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    /// Attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// Which attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
    /// Maximum items evaluated per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Strongly consistent read.
    #[serde(skip_serializing_if = "is_false")]
    pub consistent_read: bool,
    /// `false` to read in descending range-key order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_index_forward: Option<bool>,
    /// Resume after this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Document>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
    /// Parameters for the expressions.
    #[serde(flatten)]
    pub expression_attributes: ExpressionAttributes,
}

/// Input for `Scan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ScanInput {
    /// Table to scan.
    pub table_name: String,
    /// Secondary index to scan instead of the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    /// Condition applied after reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,
    /// Attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// Which attributes to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<Select>,
    /// Maximum items evaluated per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Strongly consistent read.
    #[serde(skip_serializing_if = "is_false")]
    pub consistent_read: bool,
    /// This worker's segment of a parallel scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<u32>,
    /// Number of segments in a parallel scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_segments: Option<u32>,
    /// Resume after this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_key: Option<Document>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
    /// Parameters for the expressions.
    #[serde(flatten)]
    pub expression_attributes: ExpressionAttributes,
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Input for `BatchGetItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchGetItemInput {
    /// Keys to fetch, per table.
    pub request_items: HashMap<String, KeysAndAttributes>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
}

/// Input for `BatchWriteItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BatchWriteItemInput {
    /// Puts and deletes, per table, in the order they were added.
    pub request_items: HashMap<String, Vec<WriteRequest>>,
    /// Capacity reporting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_consumed_capacity: Option<CapacityDetail>,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Input for `CreateTable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTableInput {
    /// New table name.
    pub table_name: String,
    /// Declared key attributes.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Primary key.
    pub key_schema: Vec<KeySchemaElement>,
    /// Table throughput, one unit each by default.
    pub provisioned_throughput: ProvisionedThroughput,
    /// Global secondary indexes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global_secondary_indexes: Vec<SecondaryIndex>,
    /// Local secondary indexes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub local_secondary_indexes: Vec<SecondaryIndex>,
    /// Stream settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_specification: Option<StreamSpecification>,
}

impl CreateTableInput {
    /// A table definition with default throughput and no keys yet.
    #[must_use]
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Self::default()
        }
    }

    /// Add the partition key, declaring its attribute if needed.
    #[must_use]
    pub fn hash_key(self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.key(name.into(), attribute_type, KeyType::Hash)
    }

    /// Add the sort key, declaring its attribute if needed.
    #[must_use]
    pub fn range_key(self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.key(name.into(), attribute_type, KeyType::Range)
    }

    /// Declare an attribute used only by an index key.
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, attribute_type: AttributeType) -> Self {
        self.ensure_attribute(name.into(), attribute_type);
        self
    }

    fn key(mut self, name: String, attribute_type: AttributeType, key_type: KeyType) -> Self {
        self.ensure_attribute(name.clone(), attribute_type);
        self.key_schema.push(KeySchemaElement {
            attribute_name: name,
            key_type,
        });
        self
    }

    fn ensure_attribute(&mut self, name: String, attribute_type: AttributeType) {
        if self
            .attribute_definitions
            .iter()
            .any(|a| a.attribute_name == name)
        {
            return;
        }
        self.attribute_definitions.push(AttributeDefinition {
            attribute_name: name,
            attribute_type,
        });
    }
}

/// Input for `DeleteTable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeleteTableInput {
    /// Table to delete.
    pub table_name: String,
}

/// Input for `DescribeTable`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeTableInput {
    /// Table to describe.
    pub table_name: String,
}

/// Input for `ListTables`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ListTablesInput {
    /// Resume after this table name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_table_name: Option<String>,
    /// Maximum names per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}
