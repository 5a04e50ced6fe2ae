//! AWS Signature Version 4 request signing for dynawire.
//!
//! This crate implements the client side of SigV4: given the parts of an
//! outgoing HTTP request and a set of [`Credentials`], it stamps the request
//! with an `x-amz-date` header and an `Authorization` header that the remote
//! service can verify.
//!
//! Signing is a pure function of its inputs plus the timestamp. The
//! [`sign_request_at`] entry point takes the timestamp explicitly so callers
//! (and tests) can reproduce a signature byte for byte; [`sign_request`] uses
//! the current wall-clock time.
//!
//! # Usage
//!
//! ```rust
//! use dynawire_auth::{Credentials, sign_request};
//!
//! let creds = Credentials::new("us-east-1", "AKID", "SECRET", "dynamodb");
//! let mut headers = http::HeaderMap::new();
//! headers.insert("host", http::HeaderValue::from_static("dynamodb.us-east-1.amazonaws.com"));
//! sign_request("POST", "/", "", &mut headers, b"{}", &creds).unwrap();
//! assert!(headers.contains_key("authorization"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction
//! - [`credentials`] - Signing credentials and credential scope
//! - [`error`] - Signing error types
//! - [`sigv4`] - Key derivation, string-to-sign and header generation

pub mod canonical;
pub mod credentials;
pub mod error;
pub mod sigv4;

pub use credentials::Credentials;
pub use error::SignError;
pub use sigv4::{hash_payload, sign_request, sign_request_at};
