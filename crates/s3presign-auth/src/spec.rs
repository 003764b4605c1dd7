//! Presign request specification.
//!
//! A [`PresignSpec`] holds the inputs of one presign call. It is assembled with
//! a [`PresignSpecBuilder`] and only comes into existence through
//! [`PresignSpecBuilder::build`], which checks every required field, so the
//! signing stage never sees a partially filled request.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::Method;
use s3presign_core::{AwsRegion, MAX_PRESIGN_EXPIRES_SECS};

use crate::credentials::CredentialProvider;
use crate::error::PresignError;

/// The inputs of one presign call. Immutable once built.
#[derive(Clone)]
pub struct PresignSpec {
    method: Method,
    region: AwsRegion,
    bucket: String,
    key: String,
    signature_duration: Option<Duration>,
    response_content_type: Option<String>,
    response_content_disposition: Option<String>,
    credentials: Arc<dyn CredentialProvider>,
}

impl PresignSpec {
    /// Start an empty builder.
    #[must_use]
    pub fn builder() -> PresignSpecBuilder {
        PresignSpecBuilder::default()
    }

    /// A builder seeded with every field of this spec.
    ///
    /// Fields left untouched on the builder are carried over unchanged.
    #[must_use]
    pub fn to_builder(&self) -> PresignSpecBuilder {
        PresignSpecBuilder {
            method: Some(self.method.clone()),
            region: Some(self.region.clone()),
            bucket: Some(self.bucket.clone()),
            key: Some(self.key.clone()),
            signature_duration: self.signature_duration,
            response_content_type: self.response_content_type.clone(),
            response_content_disposition: self.response_content_disposition.clone(),
            credentials: Some(Arc::clone(&self.credentials)),
        }
    }

    /// HTTP method the URL authorizes.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Region of the bucket.
    #[must_use]
    pub fn region(&self) -> &AwsRegion {
        &self.region
    }

    /// Bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key, `/`-separated.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Requested validity; `None` means the presigner default.
    #[must_use]
    pub fn signature_duration(&self) -> Option<Duration> {
        self.signature_duration
    }

    /// `Content-Type` override for the response.
    #[must_use]
    pub fn response_content_type(&self) -> Option<&str> {
        self.response_content_type.as_deref()
    }

    /// `Content-Disposition` override for the response.
    #[must_use]
    pub fn response_content_disposition(&self) -> Option<&str> {
        self.response_content_disposition.as_deref()
    }

    /// Provider of the signing credentials.
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }
}

impl fmt::Debug for PresignSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresignSpec")
            .field("method", &self.method)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("signature_duration", &self.signature_duration)
            .field("response_content_type", &self.response_content_type)
            .field(
                "response_content_disposition",
                &self.response_content_disposition,
            )
            .finish_non_exhaustive()
    }
}

/// Builder for [`PresignSpec`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use http::Method;
/// use s3presign_auth::credentials::{Credentials, StaticCredentialProvider};
/// use s3presign_auth::spec::PresignSpec;
///
/// let spec = PresignSpec::builder()
///     .method(Method::GET)
///     .region("eu-west-1")
///     .bucket("my-bucket")
///     .key("tmp/test.jpg")
///     .signature_duration(Duration::from_secs(600))
///     .credentials(Arc::new(StaticCredentialProvider::new(Credentials::new("AKID", "secret"))))
///     .build()
///     .unwrap();
/// assert_eq!(spec.key(), "tmp/test.jpg");
/// ```
#[derive(Default, Clone)]
pub struct PresignSpecBuilder {
    method: Option<Method>,
    region: Option<AwsRegion>,
    bucket: Option<String>,
    key: Option<String>,
    signature_duration: Option<Duration>,
    response_content_type: Option<String>,
    response_content_disposition: Option<String>,
    credentials: Option<Arc<dyn CredentialProvider>>,
}

impl PresignSpecBuilder {
    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Set the region.
    #[must_use]
    pub fn region(mut self, region: impl Into<AwsRegion>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the bucket name.
    #[must_use]
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the object key.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Set how long the URL stays valid, counted from the signing instant.
    #[must_use]
    pub fn signature_duration(mut self, duration: Duration) -> Self {
        self.signature_duration = Some(duration);
        self
    }

    /// Set the `response-content-type` override.
    #[must_use]
    pub fn response_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.response_content_type = Some(content_type.into());
        self
    }

    /// Set the `response-content-disposition` override.
    ///
    /// The value is signed as opaque text; encode non-ASCII filenames first,
    /// e.g. with `s3presign_rfc5987::content_disposition`.
    #[must_use]
    pub fn response_content_disposition(mut self, disposition: impl Into<String>) -> Self {
        self.response_content_disposition = Some(disposition.into());
        self
    }

    /// Set the credential provider.
    #[must_use]
    pub fn credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Validate the fields and produce the immutable spec.
    ///
    /// # Errors
    ///
    /// Returns [`PresignError::MissingField`] if the method, region, bucket,
    /// key or credentials were never set, [`PresignError::EmptyField`] if the
    /// region, bucket or key is empty, and [`PresignError::InvalidExpiration`]
    /// if the signature duration is under one second or above seven days.
    pub fn build(self) -> Result<PresignSpec, PresignError> {
        let method = self.method.ok_or(PresignError::MissingField("method"))?;
        let region = self.region.ok_or(PresignError::MissingField("region"))?;
        let bucket = self.bucket.ok_or(PresignError::MissingField("bucket"))?;
        let key = self.key.ok_or(PresignError::MissingField("key"))?;
        let credentials = self
            .credentials
            .ok_or(PresignError::MissingField("credentials"))?;

        if region.as_str().is_empty() {
            return Err(PresignError::EmptyField("region"));
        }
        if bucket.is_empty() {
            return Err(PresignError::EmptyField("bucket"));
        }
        if key.is_empty() {
            return Err(PresignError::EmptyField("key"));
        }
        if let Some(duration) = self.signature_duration {
            check_expires(duration.as_secs(), MAX_PRESIGN_EXPIRES_SECS)?;
        }

        Ok(PresignSpec {
            method,
            region,
            bucket,
            key,
            signature_duration: self.signature_duration,
            response_content_type: self.response_content_type,
            response_content_disposition: self.response_content_disposition,
            credentials,
        })
    }
}

impl fmt::Debug for PresignSpecBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresignSpecBuilder")
            .field("method", &self.method)
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("signature_duration", &self.signature_duration)
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

/// Check a validity period against `1..=max` seconds.
pub(crate) fn check_expires(seconds: u64, max: u64) -> Result<(), PresignError> {
    if seconds == 0 || seconds > max {
        return Err(PresignError::InvalidExpiration { seconds, max });
    }
    Ok(())
}
