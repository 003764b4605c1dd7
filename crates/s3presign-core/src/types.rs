//! Common AWS type definitions.

use std::fmt;

/// AWS Region identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct AwsRegion(String);

impl AwsRegion {
    /// The legacy global region, served from the bare `s3.amazonaws.com` endpoint.
    pub const US_EAST_1: &str = "us-east-1";

    /// Default region.
    pub const DEFAULT: &str = Self::US_EAST_1;

    /// Create a new region.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self(region.into())
    }

    /// Get the region as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the legacy global region.
    #[must_use]
    pub fn is_legacy_global(&self) -> bool {
        self.0 == Self::US_EAST_1
    }

    /// The S3 endpoint host for this region.
    ///
    /// The legacy global region maps to `s3.amazonaws.com`; every other region
    /// uses the dash form `s3-<region>.amazonaws.com`.
    ///
    /// # Examples
    ///
    /// ```
    /// use s3presign_core::AwsRegion;
    ///
    /// assert_eq!(AwsRegion::new("us-east-1").s3_host(), "s3.amazonaws.com");
    /// assert_eq!(AwsRegion::new("eu-west-1").s3_host(), "s3-eu-west-1.amazonaws.com");
    /// ```
    #[must_use]
    pub fn s3_host(&self) -> String {
        if self.is_legacy_global() {
            "s3.amazonaws.com".to_owned()
        } else {
            format!("s3-{}.amazonaws.com", self.0)
        }
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

impl fmt::Display for AwsRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AwsRegion {
    fn from(region: &str) -> Self {
        Self::new(region)
    }
}

impl From<String> for AwsRegion {
    fn from(region: String) -> Self {
        Self(region)
    }
}
