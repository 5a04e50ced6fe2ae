//! AWS Signature Version 4 signing.
//!
//! 1. Stamp the request with an `x-amz-date` header.
//! 2. Build the canonical request from the method, path, query, headers and
//!    the SHA-256 of the body.
//! 3. Build the string to sign from the timestamp, credential scope and the
//!    canonical request hash.
//! 4. Derive the signing key with a chain of HMAC-SHA256 operations.
//! 5. Attach the `Authorization` header.
//!
//! The main entry points are [`sign_request`] and [`sign_request_at`].

use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use http::HeaderValue;
use http::header::AUTHORIZATION;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::canonical::{build_canonical_request, canonical_headers_from_map};
use crate::credentials::Credentials;
use crate::error::SignError;

/// The signing algorithm.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Name of the timestamp header added to every signed request.
pub const AMZ_DATE_HEADER: &str = "x-amz-date";

const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const DATE_FORMAT: &str = "%Y%m%d";

type HmacSha256 = Hmac<Sha256>;

/// Sign a request using the current UTC time.
///
/// Adds `x-amz-date` and `Authorization` to `headers`. Every header present
/// on entry (for example `host`, `content-type`, `x-amz-target`) is signed.
pub fn sign_request(
    method: &str,
    path: &str,
    query: &str,
    headers: &mut http::HeaderMap,
    body: &[u8],
    credentials: &Credentials,
) -> Result<(), SignError> {
    sign_request_at(method, path, query, headers, body, credentials, Utc::now())
}

/// Sign a request as of `now`.
///
/// Given the same inputs this produces byte-identical headers.
pub fn sign_request_at(
    method: &str,
    path: &str,
    query: &str,
    headers: &mut http::HeaderMap,
    body: &[u8],
    credentials: &Credentials,
    now: DateTime<Utc>,
) -> Result<(), SignError> {
    let timestamp = now.format(TIMESTAMP_FORMAT).to_string();
    let date = now.format(DATE_FORMAT).to_string();

    headers.remove(AUTHORIZATION);
    headers.insert(
        AMZ_DATE_HEADER,
        HeaderValue::from_str(&timestamp).map_err(|source| SignError::InvalidHeaderValue {
            name: AMZ_DATE_HEADER,
            source,
        })?,
    );

    let canonical_headers = canonical_headers_from_map(headers)?;
    let canonical_request = build_canonical_request(
        method,
        path,
        query,
        &canonical_headers,
        &hash_payload(body),
    );
    trace!(canonical_request, "Built canonical request");

    let canonical_hash = hash_payload(canonical_request.as_bytes());
    let credential_scope = credentials.scope(&date);
    let string_to_sign = build_string_to_sign(&timestamp, &credential_scope, &canonical_hash);
    trace!(string_to_sign, "Built string to sign");

    let signing_key = derive_signing_key(
        credentials.secret_key(),
        &date,
        credentials.region(),
        credentials.service(),
    );
    let signature = compute_signature(&signing_key, &string_to_sign);

    let authorization = build_authorization_header(
        credentials.access_key(),
        &credential_scope,
        &canonical_headers.signed_headers,
        &signature,
    );
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&authorization).map_err(|source| {
            SignError::InvalidHeaderValue {
                name: "authorization",
                source,
            }
        })?,
    );

    Ok(())
}

/// Format the `Authorization` header value.
///
/// ```
/// use dynawire_auth::sigv4::build_authorization_header;
///
/// let value = build_authorization_header(
///     "AKID",
///     "20130524/us-east-1/dynamodb/aws4_request",
///     "host;x-amz-date",
///     "abcd",
/// );
/// assert_eq!(
///     value,
///     "AWS4-HMAC-SHA256 Credential=AKID/20130524/us-east-1/dynamodb/aws4_request, \
///      SignedHeaders=host;x-amz-date, Signature=abcd"
/// );
/// ```
#[must_use]
pub fn build_authorization_header(
    access_key: &str,
    credential_scope: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{ALGORITHM} Credential={access_key}/{credential_scope}, \
         SignedHeaders={signed_headers}, Signature={signature}"
    )
}

/// Build the SigV4 string to sign.
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Derive the SigV4 signing key.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, service)
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let date_region_key = hmac_sha256(&date_key, region.as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, service.as_bytes());
    hmac_sha256(&date_region_service_key, b"aws4_request")
}

/// Hex-encoded HMAC-SHA256 of `data` under `signing_key`.
#[must_use]
pub fn compute_signature(signing_key: &[u8], data: &str) -> String {
    hex::encode(hmac_sha256(signing_key, data.as_bytes()))
}

/// Hex-encoded SHA-256 of a payload.
///
/// ```
/// use dynawire_auth::hash_payload;
///
/// assert_eq!(
///     hash_payload(b""),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    hex::encode(Sha256::digest(payload))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
