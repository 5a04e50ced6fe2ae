//! Streams request, response and record shapes.

use dynawire_model::Document;
use dynawire_model::types::{KeySchemaElement, StreamViewType};
use serde::{Deserialize, Serialize};

/// Where a new shard iterator starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IteratorType {
    /// At the given sequence number.
    AtSequenceNumber,
    /// Right after the given sequence number.
    AfterSequenceNumber,
    /// At the oldest untrimmed record.
    TrimHorizon,
    /// After the newest record.
    Latest,
}

/// Identity of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Stream {
    /// Stream ARN.
    pub stream_arn: String,
    /// Timestamp label that tells streams of one table apart.
    pub stream_label: String,
    /// The table the stream belongs to.
    pub table_name: String,
}

/// A stream and its shards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StreamDescription {
    /// Identity.
    #[serde(flatten)]
    pub stream: Stream,
    /// Key schema of the table.
    pub key_schema: Vec<KeySchemaElement>,
    /// Shards on this page.
    pub shards: Vec<Shard>,
    /// `ENABLING`, `ENABLED`, `DISABLING` or `DISABLED`.
    pub stream_status: String,
    /// What each record carries.
    pub stream_view_type: Option<StreamViewType>,
    /// When the stream was requested, in epoch seconds.
    pub creation_request_date_time: f64,
    /// Set when more shards follow.
    pub last_evaluated_shard_id: Option<String>,
}

/// One shard of a stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Shard {
    /// Shard id.
    pub shard_id: String,
    /// The shard this one was split from.
    pub parent_shard_id: Option<String>,
    /// Records held by the shard.
    pub sequence_number_range: SequenceNumberRange,
}

/// First and last sequence numbers in a shard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SequenceNumberRange {
    /// First sequence number.
    pub starting_sequence_number: String,
    /// Last sequence number. Absent while the shard is open.
    pub ending_sequence_number: Option<String>,
}

/// The item-level change inside a [`Record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StreamRecord {
    /// Key attributes of the changed item.
    pub keys: Document,
    /// The item before the change, if the view type includes it.
    pub old_image: Option<Document>,
    /// The item after the change, if the view type includes it.
    pub new_image: Option<Document>,
    /// Position in the shard.
    pub sequence_number: String,
    /// Size of the record.
    pub size_bytes: u64,
    /// What this record carries.
    pub stream_view_type: Option<StreamViewType>,
    /// Approximate change time in epoch seconds.
    pub approximate_creation_date_time: Option<f64>,
}

/// One change event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    /// Region of the table.
    pub aws_region: String,
    /// Unique event id.
    #[serde(rename = "eventID")]
    pub event_id: String,
    /// `INSERT`, `MODIFY` or `REMOVE`.
    pub event_name: String,
    /// Always `aws:dynamodb`.
    pub event_source: String,
    /// Record format version.
    pub event_version: String,
    /// The change itself.
    pub dynamodb: StreamRecord,
}

/// Input for `DescribeStream`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeStreamInput {
    /// Stream ARN.
    pub stream_arn: String,
    /// Maximum shards per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Resume after this shard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_start_shard_id: Option<String>,
}

impl DescribeStreamInput {
    /// Describe `stream_arn` from its first shard.
    pub fn new(stream_arn: impl Into<String>) -> Self {
        Self {
            stream_arn: stream_arn.into(),
            ..Default::default()
        }
    }

    /// The request for the next page of shards, or `None` after the last.
    #[must_use]
    pub fn next_page(&self, description: &StreamDescription) -> Option<Self> {
        description
            .last_evaluated_shard_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| Self {
                exclusive_start_shard_id: Some(id.to_owned()),
                ..self.clone()
            })
    }
}

/// Output of `DescribeStream`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DescribeStreamOutput {
    /// The stream.
    pub stream_description: StreamDescription,
}

/// Input for `GetShardIterator`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetShardIteratorInput {
    /// Stream ARN.
    pub stream_arn: String,
    /// Shard to read.
    pub shard_id: String,
    /// Where to start.
    pub shard_iterator_type: IteratorType,
    /// Required for the sequence-number iterator types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<String>,
}

impl GetShardIteratorInput {
    fn new(
        stream_arn: impl Into<String>,
        shard_id: impl Into<String>,
        shard_iterator_type: IteratorType,
        sequence_number: Option<String>,
    ) -> Self {
        Self {
            stream_arn: stream_arn.into(),
            shard_id: shard_id.into(),
            shard_iterator_type,
            sequence_number,
        }
    }

    /// Start at the oldest record still in the shard.
    pub fn trim_horizon(stream_arn: impl Into<String>, shard_id: impl Into<String>) -> Self {
        Self::new(stream_arn, shard_id, IteratorType::TrimHorizon, None)
    }

    /// Start after the newest record.
    pub fn latest(stream_arn: impl Into<String>, shard_id: impl Into<String>) -> Self {
        Self::new(stream_arn, shard_id, IteratorType::Latest, None)
    }

    /// Start at `sequence_number`.
    pub fn at_sequence(
        stream_arn: impl Into<String>,
        shard_id: impl Into<String>,
        sequence_number: impl Into<String>,
    ) -> Self {
        Self::new(
            stream_arn,
            shard_id,
            IteratorType::AtSequenceNumber,
            Some(sequence_number.into()),
        )
    }

    /// Start right after `sequence_number`.
    pub fn after_sequence(
        stream_arn: impl Into<String>,
        shard_id: impl Into<String>,
        sequence_number: impl Into<String>,
    ) -> Self {
        Self::new(
            stream_arn,
            shard_id,
            IteratorType::AfterSequenceNumber,
            Some(sequence_number.into()),
        )
    }
}

/// Output of `GetShardIterator`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetShardIteratorOutput {
    /// The iterator, valid for 15 minutes.
    pub shard_iterator: Option<String>,
}

/// Input for `GetRecords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRecordsInput {
    /// Iterator to read from.
    pub shard_iterator: String,
    /// Maximum records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl GetRecordsInput {
    /// Read from `shard_iterator` with the service's default limit.
    pub fn new(shard_iterator: impl Into<String>) -> Self {
        Self {
            shard_iterator: shard_iterator.into(),
            limit: None,
        }
    }

    /// Return at most `limit` records.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Output of `GetRecords`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetRecordsOutput {
    /// Records read.
    pub records: Vec<Record>,
    /// Where to continue. Absent once the shard is closed and drained.
    pub next_shard_iterator: Option<String>,
}
