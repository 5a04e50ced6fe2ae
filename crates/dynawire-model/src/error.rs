//! Error types for the value model, the wire codec and the service error
//! taxonomy.
//!
//! DynamoDB errors arrive as JSON with a `__type` field holding a
//! `namespace#ExceptionName` string. [`ErrorKind::from_exception`] maps the
//! exception name onto the fixed taxonomy callers match on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A string could not be used as, or converted from, a [`Number`](crate::Number).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberError {
    /// The string is not a decimal number.
    #[error("invalid number: {0:?}")]
    Invalid(String),

    /// The number does not fit the requested native type.
    #[error("number {value} is not representable as {target}")]
    OutOfRange {
        /// The decimal string.
        value: String,
        /// The native type that was requested.
        target: &'static str,
    },

    /// NaN or infinity.
    #[error("non-finite float {0} has no decimal representation")]
    NonFinite(String),
}

/// A value could not be encoded to the wire format.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// An empty list or set where it cannot be omitted (inside a list, or as a
    /// standalone value).
    #[error("empty {0} cannot be sent on the wire")]
    EmptyCollection(&'static str),

    /// A native number with no decimal form.
    #[error(transparent)]
    Number(#[from] NumberError),

    /// The source value has no wire representation.
    #[error("unsupported value: {0}")]
    Unsupported(String),
}

/// A wire value could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// An `N` or `NS` element is not a decimal number.
    #[error("invalid number in wire value: {0}")]
    InvalidNumber(#[from] NumberError),

    /// The JSON is not a well-formed typed value (unknown tag, bad base64,
    /// non-object, more than one tag).
    #[error("malformed wire value: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// A document attribute does not have the type the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// The attribute exists but holds a different type.
    #[error("attribute {key:?} is {found}, expected {expected}")]
    WrongType {
        /// The attribute name or list index.
        key: String,
        /// The requested type.
        expected: &'static str,
        /// The type actually stored.
        found: &'static str,
    },

    /// A string attribute could not be parsed as a timestamp.
    #[error("attribute {key:?} is not a timestamp: {value:?}")]
    InvalidTime {
        /// The attribute name.
        key: String,
        /// The stored string.
        value: String,
    },
}

/// An expression parameter could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    /// `#name` aliases must map to a string attribute name.
    #[error("name alias {key} must be bound to a string, got {found}")]
    NameNotString {
        /// The `#`-prefixed key.
        key: String,
        /// The type that was supplied instead.
        found: &'static str,
    },
    /// Only `#name` aliases are accepted where no values can be sent.
    #[error("value placeholder {key} is not accepted here")]
    ValueNotAccepted {
        /// The offending key.
        key: String,
    },
}

/// Classified service error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A condition expression evaluated to false.
    ConditionCheckFailed,
    /// An item collection grew past its size limit.
    CollectionSizeExceeded,
    /// Provisioned throughput was exceeded.
    ThroughputExceeded,
    /// The table or index does not exist.
    ResourceNotFound,
    /// The service failed internally.
    InternalFailure,
    /// Authentication or signing was rejected.
    Auth,
    /// The request was malformed.
    InvalidParameter,
    /// The service is temporarily unavailable.
    ServiceUnavailable,
    /// The request rate is too high.
    Throttling,
    /// The resource is being created, updated or deleted.
    ResourceInUse,
    /// A streams shard iterator has expired.
    ExpiredIterator,
    /// Stream records were trimmed before they could be read.
    TrimmedData,
    /// Unmapped exception name, or an error body that could not be parsed.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Map an exception name (the part of `__type` after `#`) to a kind.
    ///
    /// ```
    /// use dynawire_model::ErrorKind;
    ///
    /// assert_eq!(
    ///     ErrorKind::from_exception("ConditionalCheckFailedException"),
    ///     ErrorKind::ConditionCheckFailed
    /// );
    /// assert_eq!(ErrorKind::from_exception("SomethingNew"), ErrorKind::Unknown);
    /// ```
    #[must_use]
    pub fn from_exception(name: &str) -> Self {
        match name {
            "ConditionalCheckFailedException" => Self::ConditionCheckFailed,
            "InternalFailure" | "InternalServerError" => Self::InternalFailure,
            "IncompleteSignature"
            | "IncompleteSignatureException"
            | "InvalidSignatureException"
            | "MissingAuthenticationToken"
            | "OptInRequired"
            | "RequestExpired"
            | "UnrecognizedClientException" => Self::Auth,
            "InvalidParameterCombination"
            | "InvalidParameterValue"
            | "InvalidQueryParameter"
            | "MalformedQueryString"
            | "MissingAction"
            | "MissingParameter"
            | "ValidationError"
            | "ValidationException" => Self::InvalidParameter,
            "ItemCollectionSizeLimitExceededException" => Self::CollectionSizeExceeded,
            "ProvisionedThroughputExceededException" => Self::ThroughputExceeded,
            "ResourceInUseException" => Self::ResourceInUse,
            "ResourceNotFoundException" => Self::ResourceNotFound,
            "ServiceUnavailable" | "ServiceUnavailableException" => Self::ServiceUnavailable,
            "ThrottlingException" | "LimitExceededException" => Self::Throttling,
            "ExpiredIteratorException" => Self::ExpiredIterator,
            "TrimmedDataAccessException" => Self::TrimmedData,
            _ => Self::Unknown,
        }
    }

    /// Whether a caller-side policy may reasonably retry this kind.
    ///
    /// The client never retries on its own.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Throttling | Self::ThroughputExceeded | Self::ServiceUnavailable
        )
    }

    /// Short name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConditionCheckFailed => "ConditionCheckFailed",
            Self::CollectionSizeExceeded => "CollectionSizeExceeded",
            Self::ThroughputExceeded => "ThroughputExceeded",
            Self::ResourceNotFound => "ResourceNotFound",
            Self::InternalFailure => "InternalFailure",
            Self::Auth => "Auth",
            Self::InvalidParameter => "InvalidParameter",
            Self::ServiceUnavailable => "ServiceUnavailable",
            Self::Throttling => "Throttling",
            Self::ResourceInUse => "ResourceInUse",
            Self::ExpiredIterator => "ExpiredIterator",
            Self::TrimmedData => "TrimmedData",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The JSON body of a non-200 response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Fully-qualified type, e.g. `com.amazonaws.dynamodb.v20120810#ResourceNotFoundException`.
    #[serde(rename = "__type")]
    pub error_type: String,
    /// Human-readable message.
    #[serde(default, alias = "Message")]
    pub message: String,
}

impl ErrorResponse {
    /// The exception name: everything after the last `#`, or the whole type
    /// when there is no namespace.
    #[must_use]
    pub fn exception(&self) -> &str {
        self.error_type
            .rsplit_once('#')
            .map_or(self.error_type.as_str(), |(_, name)| name)
    }

    /// The classified kind.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from_exception(self.exception())
    }
}
