//! Signed request dispatch.
//!
//! [`RequestMaker`] turns an operation target and a JSON body into a signed
//! `POST`, sends it, and hands back the raw response body. Everything above
//! this layer speaks typed inputs and outputs through
//! [`make_request_unmarshal`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use dynawire_auth::{Credentials, sign_request};
use dynawire_model::TARGET_PREFIX;
use http::header::{CONTENT_TYPE, HOST};
use http::{HeaderMap, HeaderValue, StatusCode, Uri};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{ClientConfig, DebugFlags, DebugSink};
use crate::error::{Error, Result, ServiceError};

/// Upper bound on a response body. A body of this size or larger is rejected.
pub const MAX_RESPONSE_SIZE: usize = 25 * 1024 * 1024;

/// Content type of every request.
pub const CONTENT_TYPE_JSON: &str = "application/x-amz-json-1.0";

const TARGET_HEADER: &str = "x-amz-target";

/// Sends one operation and returns the raw 200 response body.
#[async_trait]
pub trait Requester: Send + Sync + fmt::Debug {
    /// Send `body` to `target`.
    ///
    /// A bare operation name such as `GetItem` is expanded with the DynamoDB
    /// target prefix. A target that already contains a `.` is sent as is.
    async fn make_request(&self, target: &str, body: Bytes) -> Result<Bytes>;
}

/// Marshal `input`, send it, and unmarshal the response.
pub async fn make_request_unmarshal<I, O>(
    requester: &dyn Requester,
    target: &str,
    input: &I,
) -> Result<O>
where
    I: Serialize + ?Sized + Sync,
    O: DeserializeOwned,
{
    let body = serde_json::to_vec(input).map_err(Error::Marshal)?;
    let response = requester.make_request(target, Bytes::from(body)).await?;
    serde_json::from_slice(&response).map_err(Error::Unmarshal)
}

/// The signing HTTP requester.
pub struct RequestMaker {
    http: reqwest::Client,
    endpoint: String,
    host: String,
    path: String,
    query: String,
    credentials: Credentials,
    debug: DebugFlags,
    debug_sink: Option<DebugSink>,
}

impl fmt::Debug for RequestMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestMaker")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl RequestMaker {
    /// Build a requester for `config`.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let uri: Uri = config
            .endpoint
            .parse()
            .map_err(|err| Error::Config(format!("invalid endpoint {}: {err}", config.endpoint)))?;
        let host = uri
            .authority()
            .map(|authority| authority.as_str().to_owned())
            .ok_or_else(|| Error::Config(format!("endpoint {} has no host", config.endpoint)))?;
        let path = match uri.path() {
            "" => "/".to_owned(),
            path => path.to_owned(),
        };
        let query = uri.query().unwrap_or_default().to_owned();

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
            host,
            path,
            query,
            credentials: config.credentials.clone(),
            debug: config.debug,
            debug_sink: config.debug_sink.clone(),
        })
    }

    /// A shareable requester.
    pub fn shared(config: &ClientConfig) -> Result<Arc<Self>> {
        Self::new(config).map(Arc::new)
    }

    /// The endpoint requests are sent to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn dump(&self, flag: DebugFlags, message: impl FnOnce() -> String) {
        if !self.debug.contains(flag) {
            return;
        }
        let message = message();
        match &self.debug_sink {
            Some(sink) => sink(&message),
            None => debug!(target: "dynawire::wire", "{message}"),
        }
    }

    fn build_headers(&self, target: &str, body: &[u8]) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            TARGET_HEADER,
            HeaderValue::from_str(target)
                .map_err(|_| Error::Config(format!("invalid operation target: {target}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
        headers.insert(
            HOST,
            HeaderValue::from_str(&self.host)
                .map_err(|_| Error::Config(format!("invalid host: {}", self.host)))?,
        );
        sign_request(
            "POST",
            &self.path,
            &self.query,
            &mut headers,
            body,
            &self.credentials,
        )?;
        Ok(headers)
    }
}

#[async_trait]
impl Requester for RequestMaker {
    async fn make_request(&self, target: &str, body: Bytes) -> Result<Bytes> {
        let target = qualify_target(target);
        let headers = self.build_headers(&target, &body)?;

        self.dump(DebugFlags::AUTH, || format!("Signed headers: {headers:?}"));
        self.dump(DebugFlags::REQUESTS, || {
            format!(
                "Request: POST {} {target}\n{}",
                self.endpoint,
                String::from_utf8_lossy(&body)
            )
        });

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .body(body.clone())
            .send()
            .await?;
        let status = response.status();
        let response_body = read_limited(response, MAX_RESPONSE_SIZE).await?;

        self.dump(DebugFlags::RESPONSES, || {
            format!(
                "Response: {status} {target}\n{}",
                String::from_utf8_lossy(&response_body)
            )
        });
        debug!(%target, %status, bytes = response_body.len(), "request completed");

        if status != StatusCode::OK {
            let err = ServiceError::from_response(status, body, response_body);
            warn!(%target, kind = %err.kind, exception = %err.exception, "request failed");
            return Err(err.into());
        }
        Ok(response_body)
    }
}

fn qualify_target(target: &str) -> String {
    if target.contains('.') {
        target.to_owned()
    } else {
        format!("{TARGET_PREFIX}{target}")
    }
}

async fn read_limited(mut response: reqwest::Response, limit: usize) -> Result<Bytes> {
    let declared = response.content_length().unwrap_or(0);
    if declared >= limit as u64 {
        return Err(Error::ResponseTooLarge { limit });
    }

    #[allow(clippy::cast_possible_truncation)]
    let mut buf = BytesMut::with_capacity(declared as usize);
    while let Some(chunk) = response.chunk().await? {
        if buf.len() + chunk.len() >= limit {
            return Err(Error::ResponseTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}
