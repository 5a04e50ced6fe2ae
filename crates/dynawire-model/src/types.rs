//! Shared wire types: enums, key schema, capacity and batch entries.
//!
//! Structs use `#[serde(rename_all = "PascalCase")]` to match the DynamoDB
//! JSON field names. Enum variants map to the `SCREAMING_SNAKE_CASE` strings
//! on the wire.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::document::Document;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Key type within a key schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    /// Partition key.
    #[serde(rename = "HASH")]
    Hash,
    /// Sort key.
    #[serde(rename = "RANGE")]
    Range,
}

/// Scalar types allowed for key attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    /// String.
    S,
    /// Number.
    N,
    /// Binary.
    B,
}

/// Attributes copied into a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionType {
    /// Only the index and table keys.
    #[serde(rename = "KEYS_ONLY")]
    KeysOnly,
    /// Keys plus the listed non-key attributes.
    #[serde(rename = "INCLUDE")]
    Include,
    /// Every attribute.
    #[default]
    #[serde(rename = "ALL")]
    All,
}

/// What a stream record carries when an item changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StreamViewType {
    /// The key attributes only.
    #[serde(rename = "KEYS_ONLY")]
    KeysOnly,
    /// The item after the change.
    #[serde(rename = "NEW_IMAGE")]
    NewImage,
    /// The item before the change.
    #[serde(rename = "OLD_IMAGE")]
    OldImage,
    /// Both images.
    #[serde(rename = "NEW_AND_OLD_IMAGES")]
    NewAndOldImages,
}

/// Values returned by put, update and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReturnValues {
    /// Nothing is returned.
    #[default]
    #[serde(rename = "NONE")]
    None,
    /// The whole item as it was before the write.
    #[serde(rename = "ALL_OLD")]
    AllOld,
    /// Only updated attributes, as they were before.
    #[serde(rename = "UPDATED_OLD")]
    UpdatedOld,
    /// The whole item as it is after the write.
    #[serde(rename = "ALL_NEW")]
    AllNew,
    /// Only updated attributes, as they are now.
    #[serde(rename = "UPDATED_NEW")]
    UpdatedNew,
}

impl ReturnValues {
    /// `true` when the response will carry item attributes.
    #[must_use]
    pub fn returns_attributes(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// How much consumed-capacity detail a response should carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CapacityDetail {
    /// Table plus every index involved.
    #[serde(rename = "INDEXES")]
    Indexes,
    /// Only the total.
    #[serde(rename = "TOTAL")]
    Total,
    /// No capacity reporting.
    #[default]
    #[serde(rename = "NONE")]
    None,
}

/// Attributes returned by a query or scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Select {
    /// All attributes of each item.
    #[serde(rename = "ALL_ATTRIBUTES")]
    AllAttributes,
    /// All attributes projected into the queried index.
    #[serde(rename = "ALL_PROJECTED_ATTRIBUTES")]
    AllProjectedAttributes,
    /// Only those named in the projection expression.
    #[serde(rename = "SPECIFIC_ATTRIBUTES")]
    SpecificAttributes,
    /// Only the matching item count.
    #[serde(rename = "COUNT")]
    Count,
}

// ---------------------------------------------------------------------------
// Key schema
// ---------------------------------------------------------------------------

/// An element of a table or index key schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeySchemaElement {
    /// The key attribute.
    pub attribute_name: String,
    /// `HASH` or `RANGE`.
    pub key_type: KeyType,
}

/// A typed attribute declaration used by key schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AttributeDefinition {
    /// The attribute.
    pub attribute_name: String,
    /// Its scalar type.
    pub attribute_type: AttributeType,
}

/// Read and write capacity units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProvisionedThroughput {
    /// Strongly consistent reads per second.
    pub read_capacity_units: u64,
    /// Writes per second.
    pub write_capacity_units: u64,
}

impl Default for ProvisionedThroughput {
    fn default() -> Self {
        Self {
            read_capacity_units: 1,
            write_capacity_units: 1,
        }
    }
}

/// Index projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Projection {
    /// Which attributes are projected.
    pub projection_type: ProjectionType,
    /// Extra attributes for [`ProjectionType::Include`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_key_attributes: Vec<String>,
}

/// A secondary index definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SecondaryIndex {
    /// Index name.
    pub index_name: String,
    /// Index key schema.
    pub key_schema: Vec<KeySchemaElement>,
    /// Projected attributes.
    pub projection: Projection,
    /// Throughput, global indexes only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisioned_throughput: Option<ProvisionedThroughput>,
}

/// A secondary index as reported in a table description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecondaryIndexDescription {
    /// Index name.
    pub index_name: String,
    /// Index key schema.
    pub key_schema: Vec<KeySchemaElement>,
    /// Projected attributes.
    pub projection: Option<Projection>,
    /// Current status.
    pub index_status: Option<String>,
    /// Whether the index is still being backfilled.
    pub backfilling: Option<bool>,
    /// Approximate size.
    pub index_size_bytes: Option<u64>,
    /// Approximate item count.
    pub item_count: Option<u64>,
}

/// Stream settings on a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StreamSpecification {
    /// Whether the stream is on.
    pub stream_enabled: bool,
    /// Content of each record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_view_type: Option<StreamViewType>,
}

/// Table metadata returned by create, delete and describe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TableDescription {
    /// Table name.
    pub table_name: String,
    /// `CREATING`, `ACTIVE`, `DELETING` or `UPDATING`.
    pub table_status: String,
    /// Approximate size.
    pub table_size_bytes: u64,
    /// Approximate item count.
    pub item_count: u64,
    /// Creation time in epoch seconds.
    pub creation_date_time: f64,
    /// Table ARN.
    pub table_arn: Option<String>,
    /// Key schema.
    pub key_schema: Vec<KeySchemaElement>,
    /// Attribute definitions.
    pub attribute_definitions: Vec<AttributeDefinition>,
    /// Global secondary indexes.
    pub global_secondary_indexes: Vec<SecondaryIndexDescription>,
    /// Local secondary indexes.
    pub local_secondary_indexes: Vec<SecondaryIndexDescription>,
    /// Stream settings.
    pub stream_specification: Option<StreamSpecification>,
    /// ARN of the current stream, if any.
    pub latest_stream_arn: Option<String>,
}

// ---------------------------------------------------------------------------
// Consumed capacity
// ---------------------------------------------------------------------------

/// Capacity units consumed by one table or index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Capacity {
    /// Total units.
    pub capacity_units: f64,
}

/// Capacity consumed by an operation.
///
/// Fields are only filled in as far as the requested [`CapacityDetail`] asks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ConsumedCapacity {
    /// The table the units were charged to.
    pub table_name: String,
    /// Total units for the operation.
    pub capacity_units: f64,
    /// Units charged to the table itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Capacity>,
    /// Units per global secondary index.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub global_secondary_indexes: HashMap<String, Capacity>,
    /// Units per local secondary index.
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub local_secondary_indexes: HashMap<String, Capacity>,
}

/// Look up the capacity entry for one table in a batch response.
#[must_use]
pub fn capacity_for_table<'a>(
    entries: &'a [ConsumedCapacity],
    table: &str,
) -> Option<&'a ConsumedCapacity> {
    entries.iter().find(|c| c.table_name == table)
}

// ---------------------------------------------------------------------------
// Batch entries
// ---------------------------------------------------------------------------

/// Keys to fetch from one table in a batch get.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct KeysAndAttributes {
    /// Primary keys.
    pub keys: Vec<Document>,
    /// Attributes to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_expression: Option<String>,
    /// Name aliases used by the projection.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub expression_attribute_names: HashMap<String, String>,
    /// Strongly consistent read.
    #[serde(default, skip_serializing_if = "crate::input::is_false")]
    pub consistent_read: bool,
}

/// One put or delete in a batch write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WriteRequest {
    /// Put the item.
    #[serde(rename = "PutRequest")]
    Put {
        /// The item.
        #[serde(rename = "Item")]
        item: Document,
    },
    /// Delete the item with this key.
    #[serde(rename = "DeleteRequest")]
    Delete {
        /// The primary key.
        #[serde(rename = "Key")]
        key: Document,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_write_requests_as_tagged_objects() {
        let put = WriteRequest::Put {
            item: Document::hash_key("Id", 1),
        };
        assert_eq!(
            serde_json::to_value(&put).unwrap(),
            serde_json::json!({"PutRequest": {"Item": {"Id": {"N": "1"}}}})
        );

        let delete: WriteRequest =
            serde_json::from_str(r#"{"DeleteRequest":{"Key":{"Id":{"S":"a"}}}}"#).unwrap();
        assert_eq!(
            delete,
            WriteRequest::Delete {
                key: Document::hash_key("Id", "a")
            }
        );
    }

    #[test]
    fn test_should_omit_default_batch_get_fields() {
        let keys = KeysAndAttributes {
            keys: vec![Document::hash_key("Id", 1)],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&keys).unwrap(),
            serde_json::json!({"Keys": [{"Id": {"N": "1"}}]})
        );
    }

    #[test]
    fn test_should_find_table_capacity() {
        let entries: Vec<ConsumedCapacity> = serde_json::from_str(
            r#"[{"TableName":"a","CapacityUnits":1.5},{"TableName":"b","CapacityUnits":2}]"#,
        )
        .unwrap();
        let b = capacity_for_table(&entries, "b").unwrap();
        assert!((b.capacity_units - 2.0).abs() < f64::EPSILON);
        assert!(capacity_for_table(&entries, "c").is_none());
    }

    #[test]
    fn test_should_default_throughput_to_one_unit() {
        let t = ProvisionedThroughput::default();
        assert_eq!((t.read_capacity_units, t.write_capacity_units), (1, 1));
    }
}
