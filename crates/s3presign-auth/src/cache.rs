//! Optional cache of derived signing keys.
//!
//! A signing key only depends on the secret key, the date stamp and the region,
//! so callers presigning many URLs can reuse it for the rest of the UTC day.
//! Entries are keyed by access key ID and region. An entry is only returned
//! when both its date stamp and the SHA-256 of its secret key match the
//! request, so a rotated secret under the same access key ID is a miss.
//! Inserting a key for a new day drops every entry from earlier days.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::credentials::Credentials;
use crate::sigv4::{CredentialScope, SigningKey, derive_signing_key};

#[derive(Debug)]
struct CachedKey {
    date_stamp: String,
    secret_digest: Vec<u8>,
    key: SigningKey,
}

/// Signing keys bounded to one UTC day.
#[derive(Debug, Default)]
pub struct SigningKeyCache {
    entries: DashMap<(String, String), CachedKey>,
}

impl SigningKeyCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the signing key for `credentials` in `scope`, deriving it on a miss.
    #[must_use]
    pub fn get_or_derive(&self, credentials: &Credentials, scope: &CredentialScope) -> SigningKey {
        let id = (
            credentials.access_key_id().to_owned(),
            scope.region().as_str().to_owned(),
        );

        let secret_digest = Sha256::digest(credentials.secret_key().as_bytes()).to_vec();

        if let Some(entry) = self.entries.get(&id) {
            if entry.date_stamp == scope.date_stamp() && entry.secret_digest == secret_digest {
                trace!(access_key_id = %id.0, region = %id.1, "Signing key cache hit");
                return entry.key.clone();
            }
        }

        let key = derive_signing_key(credentials.secret_key(), scope);
        self.entries
            .retain(|_, cached| cached.date_stamp == scope.date_stamp());
        self.entries.insert(
            id,
            CachedKey {
                date_stamp: scope.date_stamp().to_owned(),
                secret_digest,
                key: key.clone(),
            },
        );
        key
    }

    /// Number of cached keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached key.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
