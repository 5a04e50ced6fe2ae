//! Error types for SigV4 signing.

/// Errors that can occur while stamping a request with signature headers.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// A computed header value contains characters not allowed in HTTP headers.
    #[error("invalid header value for {name}")]
    InvalidHeaderValue {
        /// The header that could not be set.
        name: &'static str,
        /// The underlying `http` error.
        #[source]
        source: http::header::InvalidHeaderValue,
    },

    /// A header that participates in signing is not valid visible ASCII.
    #[error("header {0} is not valid visible ASCII and cannot be signed")]
    UnsignableHeader(String),
}
