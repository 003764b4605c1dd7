//! Error types for presigning.
//!
//! Every failure of a presign call is represented by [`PresignError`]. Failures
//! are returned to the caller and never logged or retried internally; no
//! partially signed URL is ever produced.

use chrono::{DateTime, Utc};
use s3presign_core::CoreError;

/// Errors that can occur while building a presign request or signing it.
#[derive(Debug, thiserror::Error)]
pub enum PresignError {
    /// A required field of the presign request was never set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A required field of the presign request was set to an empty value.
    #[error("required field is empty: {0}")]
    EmptyField(&'static str),

    /// The signature duration is zero or exceeds the allowed maximum.
    #[error("signature duration of {seconds}s outside 1..={max}s")]
    InvalidExpiration {
        /// Requested validity in whole seconds.
        seconds: u64,
        /// Largest accepted validity in seconds.
        max: u64,
    },

    /// The signing instant cannot be written as a four-digit-year `X-Amz-Date`.
    #[error("signing instant {0} outside the years 0000-9999")]
    InvalidSigningInstant(DateTime<Utc>),

    /// The credential provider could not supply usable credentials.
    #[error("failed to resolve credentials")]
    CredentialResolution(#[source] CredentialError),

    /// The presigner configuration is invalid.
    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Errors reported by a [`CredentialProvider`](crate::CredentialProvider).
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// No credentials are available from this provider.
    #[error("credentials not found: {0}")]
    NotFound(String),

    /// The resolved credentials are unusable (e.g. an empty secret key).
    #[error("incomplete credentials: {0}")]
    Incomplete(&'static str),

    /// A provider-specific failure.
    #[error(transparent)]
    Provider(Box<dyn std::error::Error + Send + Sync>),
}
