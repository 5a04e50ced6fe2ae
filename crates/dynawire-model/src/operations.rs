//! Operation names and the target header prefix.

use std::fmt;

/// Prefix of the `x-amz-target` header for the DynamoDB API version spoken here.
pub const TARGET_PREFIX: &str = "DynamoDB_20120810.";

/// DynamoDB operations issued by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Table management
    /// Create a table.
    CreateTable,
    /// Delete a table.
    DeleteTable,
    /// Describe a table.
    DescribeTable,
    /// List tables.
    ListTables,

    // Items
    /// Read one item.
    GetItem,
    /// Write one item.
    PutItem,
    /// Modify one item.
    UpdateItem,
    /// Remove one item.
    DeleteItem,

    // Query & Scan
    /// Read items by key condition.
    Query,
    /// Read every item.
    Scan,

    // Batch
    /// Read items from several tables.
    BatchGetItem,
    /// Put and delete items in several tables.
    BatchWriteItem,
}

impl Operation {
    /// The bare operation name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateTable => "CreateTable",
            Self::DeleteTable => "DeleteTable",
            Self::DescribeTable => "DescribeTable",
            Self::ListTables => "ListTables",
            Self::GetItem => "GetItem",
            Self::PutItem => "PutItem",
            Self::UpdateItem => "UpdateItem",
            Self::DeleteItem => "DeleteItem",
            Self::Query => "Query",
            Self::Scan => "Scan",
            Self::BatchGetItem => "BatchGetItem",
            Self::BatchWriteItem => "BatchWriteItem",
        }
    }

    /// Parse an operation name, with or without the target prefix.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.strip_prefix(TARGET_PREFIX).unwrap_or(name);
        Some(match name {
            "CreateTable" => Self::CreateTable,
            "DeleteTable" => Self::DeleteTable,
            "DescribeTable" => Self::DescribeTable,
            "ListTables" => Self::ListTables,
            "GetItem" => Self::GetItem,
            "PutItem" => Self::PutItem,
            "UpdateItem" => Self::UpdateItem,
            "DeleteItem" => Self::DeleteItem,
            "Query" => Self::Query,
            "Scan" => Self::Scan,
            "BatchGetItem" => Self::BatchGetItem,
            "BatchWriteItem" => Self::BatchWriteItem,
            _ => return None,
        })
    }

    /// The full `x-amz-target` value, e.g. `DynamoDB_20120810.GetItem`.
    #[must_use]
    pub fn target(&self) -> String {
        format!("{TARGET_PREFIX}{}", self.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
