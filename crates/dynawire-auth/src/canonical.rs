//! Canonical request construction for AWS Signature Version 4.
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n\n
//! SignedHeaders\n
//! HashedPayload
//! ```
//!
//! The path and query are used exactly as they will be sent. Every header
//! present on the request at signing time participates in the signature.

use crate::error::SignError;

/// Canonical headers block plus the matching `SignedHeaders` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalHeaders {
    /// Newline-joined `name:value` lines, sorted, without a trailing newline.
    pub lines: String,
    /// Semicolon-joined, sorted, lower-cased header names.
    pub signed_headers: String,
}

/// Build the full canonical request string from its components.
///
/// # Examples
///
/// ```
/// use dynawire_auth::canonical::{build_canonical_headers, build_canonical_request};
///
/// let headers = build_canonical_headers(&[("Host", "example.com")]);
/// let canonical = build_canonical_request(
///     "POST",
///     "/",
///     "",
///     &headers,
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
/// );
/// assert!(canonical.starts_with("POST\n/\n\nhost:example.com\n\nhost\n"));
/// ```
#[must_use]
pub fn build_canonical_request(
    method: &str,
    path: &str,
    query: &str,
    headers: &CanonicalHeaders,
    payload_hash: &str,
) -> String {
    let path = if path.is_empty() { "/" } else { path };
    format!(
        "{method}\n{path}\n{query}\n{}\n\n{}\n{payload_hash}",
        headers.lines, headers.signed_headers
    )
}

/// Canonicalize a list of header name/value pairs.
///
/// Names are lower-cased and values trimmed of surrounding whitespace; inner
/// whitespace is left untouched. When a name repeats, only its first value is
/// used. Lines are sorted by the complete `name:value` string and the signed
/// header list is sorted by name.
#[must_use]
pub fn build_canonical_headers(headers: &[(&str, &str)]) -> CanonicalHeaders {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    let mut lines: Vec<String> = Vec::with_capacity(headers.len());

    for (name, value) in headers {
        let name = name.to_ascii_lowercase();
        if names.contains(&name) {
            continue;
        }
        lines.push(format!("{name}:{}", value.trim()));
        names.push(name);
    }

    lines.sort_unstable();
    names.sort_unstable();

    CanonicalHeaders {
        lines: lines.join("\n"),
        signed_headers: names.join(";"),
    }
}

/// Canonicalize every header in an [`http::HeaderMap`].
///
/// `HeaderMap` already stores names lower-cased; the first value of each name
/// is the one that gets signed.
pub fn canonical_headers_from_map(
    headers: &http::HeaderMap,
) -> Result<CanonicalHeaders, SignError> {
    let mut pairs = Vec::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let Some(value) = headers.get(name) else {
            continue;
        };
        let value = value
            .to_str()
            .map_err(|_| SignError::UnsignableHeader(name.as_str().to_owned()))?;
        pairs.push((name.as_str(), value));
    }
    Ok(build_canonical_headers(&pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_lowercase_and_trim_headers() {
        let headers = build_canonical_headers(&[
            ("X-Amz-Date", " 20130524T000000Z "),
            ("Host", "example.com"),
        ]);
        assert_eq!(headers.lines, "host:example.com\nx-amz-date:20130524T000000Z");
        assert_eq!(headers.signed_headers, "host;x-amz-date");
    }

    #[test]
    fn test_should_preserve_inner_whitespace() {
        let headers = build_canonical_headers(&[("x-custom", "  a   b  ")]);
        assert_eq!(headers.lines, "x-custom:a   b");
    }

    #[test]
    fn test_should_keep_first_value_of_repeated_header() {
        let headers = build_canonical_headers(&[("x-dup", "first"), ("X-Dup", "second")]);
        assert_eq!(headers.lines, "x-dup:first");
        assert_eq!(headers.signed_headers, "x-dup");
    }

    #[test]
    fn test_should_sort_lines_by_full_name_value_string() {
        // "x-a-b:1" sorts before "x-a:2" because '-' < ':'.
        let headers = build_canonical_headers(&[("x-a", "2"), ("x-a-b", "1")]);
        assert_eq!(headers.lines, "x-a-b:1\nx-a:2");
        assert_eq!(headers.signed_headers, "x-a;x-a-b");
    }

    #[test]
    fn test_should_build_canonical_request_matching_aws_example() {
        let headers = build_canonical_headers(&[
            ("host", "examplebucket.s3.amazonaws.com"),
            ("range", "bytes=0-9"),
            (
                "x-amz-content-sha256",
                "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            ),
            ("x-amz-date", "20130524T000000Z"),
        ]);
        let canonical = build_canonical_request(
            "GET",
            "/test.txt",
            "",
            &headers,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
        );
        let expected = "GET\n\
                        /test.txt\n\
                        \n\
                        host:examplebucket.s3.amazonaws.com\n\
                        range:bytes=0-9\n\
                        x-amz-content-sha256:e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855\n\
                        x-amz-date:20130524T000000Z\n\
                        \n\
                        host;range;x-amz-content-sha256;x-amz-date\n\
                        e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";
        assert_eq!(canonical, expected);
    }

    #[test]
    fn test_should_normalize_empty_path() {
        let headers = build_canonical_headers(&[("host", "h")]);
        let canonical = build_canonical_request("POST", "", "", &headers, "x");
        assert!(canonical.starts_with("POST\n/\n\n"));
    }

    #[test]
    fn test_should_canonicalize_header_map() {
        let mut map = http::HeaderMap::new();
        map.insert("Content-Type", http::HeaderValue::from_static("application/x-amz-json-1.0"));
        map.insert("host", http::HeaderValue::from_static("localhost:8000"));
        let headers = canonical_headers_from_map(&map).unwrap();
        assert_eq!(
            headers.lines,
            "content-type:application/x-amz-json-1.0\nhost:localhost:8000"
        );
        assert_eq!(headers.signed_headers, "content-type;host");
    }
}
