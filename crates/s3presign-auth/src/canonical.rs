//! Canonical request construction for presigned S3 URLs.
//!
//! The canonical request is the exact text that gets hashed and signed:
//!
//! ```text
//! HTTPRequestMethod\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! CanonicalHeaders\n
//! SignedHeaders\n
//! UNSIGNED-PAYLOAD
//! ```
//!
//! For presigned URLs the only signed header is `host`, the authentication
//! parameters travel in the query string, and the payload is never signed.

use std::fmt;

use http::Method;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::{Digest, Sha256};

use crate::credentials::Credentials;
use crate::sigv4::{ALGORITHM, CredentialScope};
use crate::spec::PresignSpec;

/// The set of characters that must be percent-encoded.
///
/// All characters except unreserved characters (A-Z, a-z, 0-9, `-`, `_`, `.`,
/// `~`) are encoded. This applies to path segments as well as query keys and
/// values.
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// The payload hash placeholder used for all presigned URLs.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// The signed headers list for presigned URLs.
pub const SIGNED_HEADERS: &str = "host";

/// Query parameter names used by presigned URLs.
pub mod params {
    /// Signing algorithm.
    pub const ALGORITHM: &str = "X-Amz-Algorithm";
    /// `AKID/date/region/s3/aws4_request`.
    pub const CREDENTIAL: &str = "X-Amz-Credential";
    /// Signing instant, ISO 8601 basic format.
    pub const DATE: &str = "X-Amz-Date";
    /// Validity in seconds.
    pub const EXPIRES: &str = "X-Amz-Expires";
    /// Signed header names.
    pub const SIGNED_HEADERS: &str = "X-Amz-SignedHeaders";
    /// Session token of temporary credentials.
    pub const SECURITY_TOKEN: &str = "X-Amz-Security-Token";
    /// Final signature, appended after signing.
    pub const SIGNATURE: &str = "X-Amz-Signature";
    /// Overrides the `Content-Type` of a GET response.
    pub const RESPONSE_CONTENT_TYPE: &str = "response-content-type";
    /// Overrides the `Content-Disposition` of a GET response.
    pub const RESPONSE_CONTENT_DISPOSITION: &str = "response-content-disposition";
}

/// A canonical request for a presigned URL.
///
/// Recomputed for every presign call and dropped once the URL is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// HTTP method the URL authorizes.
    pub method: Method,
    /// Endpoint host, the value of the single signed `host` header.
    pub host: String,
    /// Percent-encoded absolute path.
    pub canonical_uri: String,
    /// Sorted, percent-encoded query string without the signature.
    pub canonical_query_string: String,
}

impl CanonicalRequest {
    /// The canonical headers block, including its trailing newline.
    #[must_use]
    pub fn canonical_headers(&self) -> String {
        format!("host:{}\n", self.host)
    }

    /// Hex-encoded SHA-256 of the canonical request text.
    #[must_use]
    pub fn hashed(&self) -> String {
        hex::encode(Sha256::digest(self.to_string().as_bytes()))
    }
}

impl fmt::Display for CanonicalRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n{}\n{}\n{}\n{SIGNED_HEADERS}\n{UNSIGNED_PAYLOAD}",
            self.method,
            self.canonical_uri,
            self.canonical_query_string,
            self.canonical_headers(),
        )
    }
}

/// Build the canonical request for presigning `spec`.
///
/// `amz_date` is the signing instant in `YYYYMMDDTHHMMSSZ` form and `scope` the
/// credential scope for the same instant.
#[must_use]
pub fn build_presigned_canonical_request(
    spec: &PresignSpec,
    credentials: &Credentials,
    scope: &CredentialScope,
    amz_date: &str,
    expires_secs: u64,
) -> CanonicalRequest {
    let credential = format!("{}/{scope}", credentials.access_key_id());
    let expires = expires_secs.to_string();

    let mut query: Vec<(&str, &str)> = vec![
        (params::ALGORITHM, ALGORITHM),
        (params::CREDENTIAL, credential.as_str()),
        (params::DATE, amz_date),
        (params::EXPIRES, expires.as_str()),
        (params::SIGNED_HEADERS, SIGNED_HEADERS),
    ];
    if let Some(token) = credentials.session_token() {
        query.push((params::SECURITY_TOKEN, token));
    }
    if let Some(content_type) = spec.response_content_type() {
        query.push((params::RESPONSE_CONTENT_TYPE, content_type));
    }
    if let Some(disposition) = spec.response_content_disposition() {
        query.push((params::RESPONSE_CONTENT_DISPOSITION, disposition));
    }

    CanonicalRequest {
        method: spec.method().clone(),
        host: spec.region().s3_host(),
        canonical_uri: build_canonical_uri(spec.bucket(), spec.key()),
        canonical_query_string: build_canonical_query_string(&query),
    }
}

/// Build the canonical path-style URI `/<bucket>/<key>`.
///
/// The bucket is a single segment. The key is split on `/` and every segment
/// is encoded on its own, so the separators stay literal.
///
/// # Examples
///
/// ```
/// use s3presign_auth::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri("bucket", "a b/c#d"), "/bucket/a%20b/c%23d");
/// ```
#[must_use]
pub fn build_canonical_uri(bucket: &str, key: &str) -> String {
    format!("/{}/{}", uri_encode(bucket), encode_key(key))
}

/// Percent-encode an object key segment by segment, keeping `/` literal.
///
/// # Examples
///
/// ```
/// use s3presign_auth::canonical::encode_key;
///
/// assert_eq!(encode_key("tmp/My File.jpg"), "tmp/My%20File.jpg");
/// assert_eq!(encode_key("a//b"), "a//b");
/// ```
#[must_use]
pub fn encode_key(key: &str) -> String {
    key.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

/// Build the canonical query string from raw (unencoded) parameters.
///
/// Keys and values are percent-encoded individually, then the pairs are
/// sorted by encoded key in ascending byte order (by encoded value for equal
/// keys) and joined with `&`.
///
/// # Examples
///
/// ```
/// use s3presign_auth::canonical::build_canonical_query_string;
///
/// assert_eq!(build_canonical_query_string(&[]), "");
/// assert_eq!(
///     build_canonical_query_string(&[("b", "2"), ("a", "x/y")]),
///     "a=x%2Fy&b=2"
/// );
/// ```
#[must_use]
pub fn build_canonical_query_string(query: &[(&str, &str)]) -> String {
    let mut encoded: Vec<(String, String)> = query
        .iter()
        .map(|(k, v)| (uri_encode(k), uri_encode(v)))
        .collect();

    encoded.sort_unstable();

    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

/// Percent-encode a single segment.
///
/// Unreserved characters pass through; every other UTF-8 byte becomes an
/// uppercase `%XX` escape, including `/`.
///
/// # Examples
///
/// ```
/// use s3presign_auth::canonical::uri_encode;
///
/// assert_eq!(uri_encode("a-z_0.9~"), "a-z_0.9~");
/// assert_eq!(uri_encode("a b/ç"), "a%20b%2F%C3%A7");
/// ```
#[must_use]
pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}
