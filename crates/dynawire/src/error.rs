//! Client error types.
//!
//! Every fallible call returns [`Error`]. Service-side failures keep the
//! raw exchange in [`ServiceError`] so callers can log exactly what was sent
//! and received.

use bytes::Bytes;
use dynawire_auth::SignError;
use dynawire_model::{EncodeError, ErrorKind, ErrorResponse, ParamError};
use http::StatusCode;

/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service answered with a non-200 status.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body reached the size ceiling.
    #[error("response exceeded the maximum size of {limit} bytes")]
    ResponseTooLarge {
        /// The ceiling in bytes.
        limit: usize,
    },

    /// A document in the request has no wire representation.
    #[error("failed to encode request: {0}")]
    Encode(#[from] EncodeError),

    /// The request body could not be encoded.
    #[error("failed to marshal request: {0}")]
    Marshal(#[source] serde_json::Error),

    /// The response body could not be decoded.
    #[error("failed to unmarshal response: {0}")]
    Unmarshal(#[source] serde_json::Error),

    /// A bound expression parameter was rejected.
    #[error(transparent)]
    InvalidParam(#[from] ParamError),

    /// Signing failed.
    #[error(transparent)]
    Sign(#[from] SignError),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The executor does not implement the requested operation family.
    #[error("{0} are not supported by this executor")]
    Unsupported(&'static str),
}

impl Error {
    /// The service error kind, if this is a service error.
    #[must_use]
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Service(err) => Some(err.kind),
            _ => None,
        }
    }

    /// `true` for service errors a caller may retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind().is_some_and(|kind| kind.is_retryable())
    }
}

/// Convenience result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A failed exchange with the service.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}: {message} (status {status})", self.display_name())]
pub struct ServiceError {
    /// Classified kind.
    pub kind: ErrorKind,
    /// The raw `__type` field, empty when the body could not be parsed.
    pub error_type: String,
    /// Exception name after the last `#`.
    pub exception: String,
    /// Message from the body, or the parse failure when there was none.
    pub message: String,
    /// HTTP status.
    pub status: StatusCode,
    /// The request body that was sent.
    pub request_body: Bytes,
    /// The response body that came back.
    pub response_body: Bytes,
}

impl ServiceError {
    /// Build a service error from a non-200 response.
    ///
    /// An unparseable body yields [`ErrorKind::Unknown`] with the parse
    /// failure as the message.
    #[must_use]
    pub fn from_response(status: StatusCode, request_body: Bytes, response_body: Bytes) -> Self {
        match serde_json::from_slice::<ErrorResponse>(&response_body) {
            Ok(parsed) => Self {
                kind: parsed.kind(),
                exception: parsed.exception().to_owned(),
                error_type: parsed.error_type,
                message: parsed.message,
                status,
                request_body,
                response_body,
            },
            Err(err) => Self {
                kind: ErrorKind::Unknown,
                error_type: String::new(),
                exception: String::new(),
                message: format!("could not parse error response: {err}"),
                status,
                request_body,
                response_body,
            },
        }
    }

    /// A bare error of the given kind, used by test executors.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let exception = kind.as_str().to_owned();
        Self {
            kind,
            error_type: exception.clone(),
            exception,
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
            request_body: Bytes::new(),
            response_body: Bytes::new(),
        }
    }

    /// `true` when the kind is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn display_name(&self) -> &str {
        if self.exception.is_empty() {
            self.kind.as_str()
        } else {
            &self.exception
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_classify_service_error_body() {
        let body = Bytes::from_static(
            br#"{"__type":"com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException","message":"The conditional request failed"}"#,
        );
        let err = ServiceError::from_response(StatusCode::BAD_REQUEST, Bytes::new(), body);
        assert_eq!(err.kind, ErrorKind::ConditionCheckFailed);
        assert_eq!(err.exception, "ConditionalCheckFailedException");
        assert_eq!(err.message, "The conditional request failed");
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_should_keep_unknown_exception_name() {
        let body = Bytes::from_static(br#"{"__type":"x#SomethingNewException","Message":"m"}"#);
        let err = ServiceError::from_response(StatusCode::BAD_REQUEST, Bytes::new(), body);
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert_eq!(err.exception, "SomethingNewException");
        assert_eq!(err.message, "m");
    }

    #[test]
    fn test_should_report_unparseable_body_as_unknown() {
        let err = ServiceError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            Bytes::from_static(b"{}"),
            Bytes::from_static(b"<html>oops</html>"),
        );
        assert_eq!(err.kind, ErrorKind::Unknown);
        assert!(err.message.contains("could not parse"));
        assert_eq!(err.request_body, Bytes::from_static(b"{}"));
        assert_eq!(err.response_body, Bytes::from_static(b"<html>oops</html>"));
    }

    #[test]
    fn test_should_expose_retryability_through_error() {
        let err = Error::from(ServiceError::new(ErrorKind::Throttling, "slow down"));
        assert!(err.is_retryable());
        assert_eq!(err.kind(), Some(ErrorKind::Throttling));
        assert!(!Error::Config("x".into()).is_retryable());
    }
}
