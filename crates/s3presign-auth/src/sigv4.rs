//! AWS Signature Version 4 signing.
//!
//! This module implements the signing half of a presign call:
//!
//! 1. Derive the request-scoped signing key from the secret key through the
//!    four-stage HMAC-SHA256 chain (date, region, service, terminator).
//! 2. Build the string to sign from the timestamp, credential scope, and
//!    canonical request hash.
//! 3. Compute the hex-encoded HMAC-SHA256 signature of the string to sign.
//!
//! The main entry points are [`derive_signing_key`] and [`sign`].

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use s3presign_core::AwsRegion;
use sha2::Sha256;
use tracing::debug;

use crate::canonical::CanonicalRequest;

/// The only algorithm supported by this implementation.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Service name in the credential scope.
pub const SERVICE: &str = "s3";

/// Final component of every credential scope.
pub const TERMINATOR: &str = "aws4_request";

/// `X-Amz-Date` format: ISO 8601 basic, UTC, second precision.
pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Date stamp format used in the credential scope.
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

type HmacSha256 = Hmac<Sha256>;

/// Format a signing instant as an `X-Amz-Date` value.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use s3presign_auth::sigv4::format_amz_date;
///
/// let instant = Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap();
/// assert_eq!(format_amz_date(&instant), "20130524T000000Z");
/// ```
#[must_use]
pub fn format_amz_date(instant: &DateTime<Utc>) -> String {
    instant.format(AMZ_DATE_FORMAT).to_string()
}

/// The `<date>/<region>/s3/aws4_request` scope binding a signature to one day
/// and one region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialScope {
    date_stamp: String,
    region: AwsRegion,
}

impl CredentialScope {
    /// Create the scope for a signing instant.
    #[must_use]
    pub fn new(instant: &DateTime<Utc>, region: AwsRegion) -> Self {
        Self {
            date_stamp: instant.format(DATE_STAMP_FORMAT).to_string(),
            region,
        }
    }

    /// The `YYYYMMDD` date stamp.
    #[must_use]
    pub fn date_stamp(&self) -> &str {
        &self.date_stamp
    }

    /// The region.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }
}

impl fmt::Display for CredentialScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{SERVICE}/{TERMINATOR}",
            self.date_stamp, self.region
        )
    }
}

/// A derived signing key.
///
/// Raw HMAC-SHA256 output. The bytes never appear in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// The raw key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Derive the SigV4 signing key using the HMAC-SHA256 chain.
///
/// ```text
/// DateKey              = HMAC-SHA256("AWS4" + secret_key, date)
/// DateRegionKey        = HMAC-SHA256(DateKey, region)
/// DateRegionServiceKey = HMAC-SHA256(DateRegionKey, "s3")
/// SigningKey           = HMAC-SHA256(DateRegionServiceKey, "aws4_request")
/// ```
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use s3presign_auth::sigv4::{CredentialScope, derive_signing_key};
/// use s3presign_core::AwsRegion;
///
/// let instant = Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap();
/// let scope = CredentialScope::new(&instant, AwsRegion::new("us-east-1"));
/// let key = derive_signing_key("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY", &scope);
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
#[must_use]
pub fn derive_signing_key(secret_key: &str, scope: &CredentialScope) -> SigningKey {
    let date_key = hmac_sha256(
        format!("AWS4{secret_key}").as_bytes(),
        scope.date_stamp.as_bytes(),
    );
    let date_region_key = hmac_sha256(&date_key, scope.region.as_str().as_bytes());
    let date_region_service_key = hmac_sha256(&date_region_key, SERVICE.as_bytes());
    SigningKey(hmac_sha256(&date_region_service_key, TERMINATOR.as_bytes()))
}

/// Build the SigV4 string to sign.
///
/// Format:
/// ```text
/// AWS4-HMAC-SHA256\n
/// <ISO8601 timestamp>\n
/// <credential_scope>\n
/// <hex(SHA256(canonical_request))>
/// ```
///
/// # Examples
///
/// ```
/// use s3presign_auth::sigv4::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     "20130524T000000Z",
///     "20130524/us-east-1/s3/aws4_request",
///     "3bfa292879f6447bbcda7001decf97f4a54dc650c8942174ae0a9121cf58ad04",
/// );
/// assert!(sts.starts_with("AWS4-HMAC-SHA256\n20130524T000000Z\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(
    timestamp: &str,
    credential_scope: &str,
    canonical_request_hash: &str,
) -> String {
    format!("{ALGORITHM}\n{timestamp}\n{credential_scope}\n{canonical_request_hash}")
}

/// Compute the HMAC-SHA256 signature of `data` using the given `signing_key`.
///
/// Returns the hex-encoded signature.
#[must_use]
pub fn compute_signature(signing_key: &SigningKey, data: &str) -> String {
    hex::encode(hmac_sha256(signing_key.as_bytes(), data.as_bytes()))
}

/// Sign a canonical request.
///
/// Hashes the canonical request, builds the string to sign for `timestamp`
/// and `scope`, and returns the hex-encoded signature. Deterministic for
/// identical inputs.
#[must_use]
pub fn sign(
    canonical_request: &CanonicalRequest,
    timestamp: &str,
    scope: &CredentialScope,
    signing_key: &SigningKey,
) -> String {
    let canonical_hash = canonical_request.hashed();
    let string_to_sign = build_string_to_sign(timestamp, &scope.to_string(), &canonical_hash);

    debug!(string_to_sign, "Built presigned string to sign");

    compute_signature(signing_key, &string_to_sign)
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
