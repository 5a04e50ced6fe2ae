//! Client configuration.
//!
//! A [`ClientConfig`] names the endpoint, the signing credentials, an
//! optional request timeout and which parts of each exchange to dump for
//! debugging. [`ClientConfig::from_env`] reads the usual environment
//! variables.

use std::fmt;
use std::ops::BitOr;
use std::sync::Arc;
use std::time::Duration;

use dynawire_auth::Credentials;
use http::Uri;
use http::uri::PathAndQuery;

use crate::error::{Error, Result};

/// Endpoint override.
pub const ENDPOINT_ENV: &str = "DYNAWIRE_ENDPOINT_URL";
/// Comma-separated debug flags: `requests`, `responses`, `auth` or `all`.
pub const DEBUG_ENV: &str = "DYNAWIRE_DEBUG";
/// Request timeout in seconds.
pub const TIMEOUT_ENV: &str = "DYNAWIRE_TIMEOUT_SECS";

const DEFAULT_REGION: &str = "us-east-1";

/// Which parts of an exchange are written to the debug sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DebugFlags(u8);

impl DebugFlags {
    /// Nothing is dumped.
    pub const NONE: Self = Self(0);
    /// Request target and body.
    pub const REQUESTS: Self = Self(1);
    /// Response status and body.
    pub const RESPONSES: Self = Self(1 << 1);
    /// Signed request headers.
    pub const AUTH: Self = Self(1 << 2);
    /// Everything.
    pub const ALL: Self = Self(0b111);

    /// `true` if every flag in `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    /// `true` when no flag is set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse a comma-separated list. Unknown names are ignored.
    #[must_use]
    pub fn parse(list: &str) -> Self {
        list.split(',')
            .map(|name| match name.trim().to_ascii_lowercase().as_str() {
                "requests" | "request" => Self::REQUESTS,
                "responses" | "response" => Self::RESPONSES,
                "auth" | "signing" => Self::AUTH,
                "all" | "1" | "true" => Self::ALL,
                _ => Self::NONE,
            })
            .fold(Self::NONE, BitOr::bitor)
    }
}

impl BitOr for DebugFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Receives debug dumps. When unset they go to `tracing` at debug level.
pub type DebugSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Connection settings for a client.
#[derive(Clone)]
pub struct ClientConfig {
    /// Endpoint URL, e.g. `https://dynamodb.us-east-1.amazonaws.com/`.
    pub endpoint: String,
    /// Signing credentials and region.
    pub credentials: Credentials,
    /// Per-request timeout. `None` leaves it to the transport.
    pub timeout: Option<Duration>,
    /// What to dump per exchange.
    pub debug: DebugFlags,
    /// Where dumps go.
    pub debug_sink: Option<DebugSink>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .field("debug", &self.debug)
            .field("debug_sink", &self.debug_sink.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl ClientConfig {
    /// A config for `endpoint` with no timeout and no debug output.
    pub fn new(endpoint: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            endpoint: fix_endpoint_url(&endpoint.into()),
            credentials,
            timeout: None,
            debug: DebugFlags::NONE,
            debug_sink: None,
        }
    }

    /// A config for the public regional endpoint.
    pub fn for_region(
        region: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        let region = region.into();
        let endpoint = regional_endpoint(&region);
        Self::new(
            endpoint,
            Credentials::dynamodb(region, access_key, secret_key),
        )
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the debug flags.
    #[must_use]
    pub fn with_debug(mut self, flags: DebugFlags) -> Self {
        self.debug = flags;
        self
    }

    /// Send debug dumps to `sink` instead of `tracing`.
    #[must_use]
    pub fn with_debug_sink(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.debug_sink = Some(Arc::new(sink));
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `DYNAWIRE_ENDPOINT_URL` | Endpoint override (default: regional endpoint) |
    /// | `AWS_REGION` / `AWS_DEFAULT_REGION` | Region (default `us-east-1`) |
    /// | `AWS_ACCESS_KEY_ID` | Access key (required) |
    /// | `AWS_SECRET_ACCESS_KEY` | Secret key (required) |
    /// | `DYNAWIRE_DEBUG` | Debug flags |
    /// | `DYNAWIRE_TIMEOUT_SECS` | Request timeout |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let region = var("AWS_REGION")
            .or_else(|| var("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_owned());
        let access_key = var("AWS_ACCESS_KEY_ID")
            .ok_or_else(|| Error::Config("AWS_ACCESS_KEY_ID is not set".into()))?;
        let secret_key = var("AWS_SECRET_ACCESS_KEY")
            .ok_or_else(|| Error::Config("AWS_SECRET_ACCESS_KEY is not set".into()))?;
        let endpoint = var(ENDPOINT_ENV).unwrap_or_else(|| regional_endpoint(&region));

        let mut config = Self::new(
            endpoint,
            Credentials::dynamodb(region, access_key, secret_key),
        );
        if let Some(flags) = var(DEBUG_ENV) {
            config.debug = DebugFlags::parse(&flags);
        }
        if let Some(secs) = var(TIMEOUT_ENV) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| Error::Config(format!("{TIMEOUT_ENV} is not a number: {secs}")))?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

fn regional_endpoint(region: &str) -> String {
    format!("https://dynamodb.{region}.amazonaws.com/")
}

/// Give an endpoint without a path the root path `/`. Anything that does not
/// parse as an absolute URI is left for [`RequestMaker`] to reject.
///
/// [`RequestMaker`]: crate::dispatch::RequestMaker
fn fix_endpoint_url(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    let Ok(uri) = endpoint.parse::<Uri>() else {
        return endpoint.to_owned();
    };
    let (Some(scheme), Some(authority)) = (uri.scheme_str(), uri.authority()) else {
        return endpoint.to_owned();
    };
    let path_and_query = uri.path_and_query().map_or("/", PathAndQuery::as_str);
    if path_and_query.starts_with('/') {
        format!("{scheme}://{authority}{path_and_query}")
    } else {
        format!("{scheme}://{authority}/{path_and_query}")
    }
}
