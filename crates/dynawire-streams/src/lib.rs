//! DynamoDB Streams client for dynawire.
//!
//! A low-level mapping of the three calls needed to follow a table's change
//! stream: describe the stream to find its shards, get an iterator into a
//! shard, and read records from the iterator. Requests travel through the
//! same signed [`Requester`](dynawire::Requester) as the table client, under
//! the `DynamoDBStreams_20120810.` target prefix.
//!
//! ```no_run
//! # async fn demo() -> dynawire::Result<()> {
//! use dynawire::ClientConfig;
//! use dynawire_streams::{
//!     DescribeStreamInput, GetRecordsInput, GetShardIteratorInput, StreamsClient,
//! };
//!
//! let streams = StreamsClient::from_config(&ClientConfig::from_env()?)?;
//! let arn = "arn:aws:dynamodb:us-east-1:123456789012:table/People/stream/2024-01-01T00:00:00.000";
//! let description = streams
//!     .describe_stream(&DescribeStreamInput::new(arn))
//!     .await?
//!     .stream_description;
//!
//! for shard in &description.shards {
//!     let mut iterator = streams
//!         .get_shard_iterator(&GetShardIteratorInput::trim_horizon(arn, &shard.shard_id))
//!         .await?
//!         .shard_iterator;
//!     while let Some(current) = iterator {
//!         let page = streams.get_records(&GetRecordsInput::new(current)).await?;
//!         if page.records.is_empty() {
//!             break;
//!         }
//!         iterator = page.next_shard_iterator;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod types;

pub use client::{STREAMS_TARGET_PREFIX, StreamsClient};
pub use types::{
    DescribeStreamInput, DescribeStreamOutput, GetRecordsInput, GetRecordsOutput,
    GetShardIteratorInput, GetShardIteratorOutput, IteratorType, Record, SequenceNumberRange,
    Shard, Stream, StreamDescription, StreamRecord,
};
