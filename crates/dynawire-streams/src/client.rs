//! The streams client.

use std::fmt;
use std::sync::Arc;

use dynawire::dispatch::make_request_unmarshal;
use dynawire::{ClientConfig, RequestMaker, Requester, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{
    DescribeStreamInput, DescribeStreamOutput, GetRecordsInput, GetRecordsOutput,
    GetShardIteratorInput, GetShardIteratorOutput,
};

/// Target prefix of the streams API version spoken here.
pub const STREAMS_TARGET_PREFIX: &str = "DynamoDBStreams_20120810.";

/// Low-level access to the streams API.
///
/// Expired iterators and trimmed records come back as service errors of
/// kind [`ErrorKind::ExpiredIterator`](dynawire::ErrorKind::ExpiredIterator)
/// and [`ErrorKind::TrimmedData`](dynawire::ErrorKind::TrimmedData).
#[derive(Clone)]
pub struct StreamsClient {
    requester: Arc<dyn Requester>,
}

impl fmt::Debug for StreamsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamsClient")
            .field("requester", &self.requester)
            .finish()
    }
}

impl StreamsClient {
    /// A client over an existing requester, for example one shared with a
    /// table client.
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// A client with its own signed requester for `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Ok(Self::new(RequestMaker::shared(config)?))
    }

    /// Describe a stream and list its shards.
    pub async fn describe_stream(
        &self,
        input: &DescribeStreamInput,
    ) -> Result<DescribeStreamOutput> {
        self.call("DescribeStream", input).await
    }

    /// Get an iterator into one shard.
    pub async fn get_shard_iterator(
        &self,
        input: &GetShardIteratorInput,
    ) -> Result<GetShardIteratorOutput> {
        self.call("GetShardIterator", input).await
    }

    /// Read records from a shard iterator.
    pub async fn get_records(&self, input: &GetRecordsInput) -> Result<GetRecordsOutput> {
        self.call("GetRecords", input).await
    }

    async fn call<I, O>(&self, operation: &str, input: &I) -> Result<O>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let target = format!("{STREAMS_TARGET_PREFIX}{operation}");
        debug!(%target, "streams request");
        make_request_unmarshal(self.requester.as_ref(), &target, input).await
    }
}
