//! Presigning configuration.
//!
//! Provides [`PresignConfig`], the defaults applied to every presign call made
//! through one presigner. Values can be loaded from environment variables.

use serde::{Deserialize, Serialize};
use tracing::warn;
use typed_builder::TypedBuilder;

use crate::error::{CoreError, CoreResult};
use crate::types::AwsRegion;

/// Longest validity the service accepts for a presigned URL (7 days).
pub const MAX_PRESIGN_EXPIRES_SECS: u64 = 604_800;

/// Presigning configuration.
///
/// # Examples
///
/// ```
/// use s3presign_core::PresignConfig;
///
/// let config = PresignConfig::default();
/// assert_eq!(config.default_region.as_str(), "us-east-1");
/// assert_eq!(config.default_expires_secs, 604_800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PresignConfig {
    /// Region used when a presign request does not name one.
    #[builder(default)]
    pub default_region: AwsRegion,

    /// Validity (seconds) applied when a presign request has no signature duration.
    #[builder(default = MAX_PRESIGN_EXPIRES_SECS)]
    pub default_expires_secs: u64,

    /// Largest validity (seconds) accepted before signing; longer requests fail locally.
    #[builder(default = MAX_PRESIGN_EXPIRES_SECS)]
    pub max_expires_secs: u64,
}

impl Default for PresignConfig {
    fn default() -> Self {
        Self {
            default_region: AwsRegion::default(),
            default_expires_secs: MAX_PRESIGN_EXPIRES_SECS,
            max_expires_secs: MAX_PRESIGN_EXPIRES_SECS,
        }
    }
}

impl PresignConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `AWS_REGION` / `DEFAULT_REGION` | `us-east-1` |
    /// | `PRESIGN_DEFAULT_EXPIRES` | `604800` |
    /// | `PRESIGN_MAX_EXPIRES` | `604800` |
    ///
    /// Values that do not parse are ignored and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value. [`from_env`](Self::from_env) reads the process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup("AWS_REGION").or_else(|| lookup("DEFAULT_REGION")) {
            config.default_region = AwsRegion::new(v);
        }
        if let Some(v) = lookup("PRESIGN_DEFAULT_EXPIRES") {
            match v.parse::<u64>() {
                Ok(n) => config.default_expires_secs = n,
                Err(_) => warn!(value = %v, "ignoring invalid PRESIGN_DEFAULT_EXPIRES"),
            }
        }
        if let Some(v) = lookup("PRESIGN_MAX_EXPIRES") {
            match v.parse::<u64>() {
                Ok(n) => config.max_expires_secs = n,
                Err(_) => warn!(value = %v, "ignoring invalid PRESIGN_MAX_EXPIRES"),
            }
        }

        config
    }

    /// Check that the expiry bounds are usable.
    ///
    /// The maximum must lie in `1..=604800` and the default must not exceed it.
    pub fn validate(&self) -> CoreResult<()> {
        if self.default_region.as_str().is_empty() {
            return Err(CoreError::Config("default region is empty".to_owned()));
        }
        if self.max_expires_secs == 0 || self.max_expires_secs > MAX_PRESIGN_EXPIRES_SECS {
            return Err(CoreError::Config(format!(
                "max expires {} outside 1..={MAX_PRESIGN_EXPIRES_SECS}",
                self.max_expires_secs
            )));
        }
        if self.default_expires_secs == 0 || self.default_expires_secs > self.max_expires_secs {
            return Err(CoreError::Config(format!(
                "default expires {} outside 1..={}",
                self.default_expires_secs, self.max_expires_secs
            )));
        }
        Ok(())
    }
}
