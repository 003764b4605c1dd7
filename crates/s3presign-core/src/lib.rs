//! Core types and configuration for S3 presigned URL generation.
//!
//! This crate holds the pieces shared by the signing crates: the region type
//! with its S3 endpoint mapping, the presigning configuration, and the core
//! error type.

mod config;
mod error;
mod types;

pub use config::{MAX_PRESIGN_EXPIRES_SECS, PresignConfig};
pub use error::{CoreError, CoreResult};
pub use types::AwsRegion;
