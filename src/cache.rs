//! Per-credential secret cache.
//!
//! One [`CacheEntry`] per credential: the presecret triple
//! (`hashed_password`, `decoded_salt`, `iterations`) that identifies a
//! particular server-issued salt/iteration pair for a password, and the
//! three keys `Hi`/HMAC derives from it. Attaching a cache entry to a fresh
//! [`crate::session::ScramSession`] against the same credential skips
//! PBKDF2 entirely.

use crate::crypto::ct_equal;
use crate::secret::{SecretBytes, SecretString};

/// A deep-copyable record of one credential's derived secrets.
///
/// Destruction zeroizes `hashed_password` and the three derived keys
/// (`SecretString`/`SecretBytes` do this via `ZeroizeOnDrop`).
#[derive(Clone)]
pub struct CacheEntry {
    hashed_password: SecretString,
    decoded_salt: Vec<u8>,
    iterations: u32,
    salted_password: SecretBytes,
    client_key: SecretBytes,
    server_key: SecretBytes,
}

impl CacheEntry {
    pub fn new(
        hashed_password: SecretString,
        decoded_salt: Vec<u8>,
        iterations: u32,
        salted_password: SecretBytes,
        client_key: SecretBytes,
        server_key: SecretBytes,
    ) -> Self {
        Self {
            hashed_password,
            decoded_salt,
            iterations,
            salted_password,
            client_key,
            server_key,
        }
    }

    /// True iff `(hashed_password, decoded_salt, iterations)` matches this
    /// entry's key. Both secret-bearing fields compare in constant time —
    /// `hashed_password` is password-equivalent for SCRAM-SHA-256, where it
    /// is the SASLprep'd password itself.
    pub fn matches(&self, hashed_password: &str, decoded_salt: &[u8], iterations: u32) -> bool {
        self.iterations == iterations
            && ct_equal(self.hashed_password.as_str().as_bytes(), hashed_password.as_bytes())
            && ct_equal(&self.decoded_salt, decoded_salt)
    }

    pub fn salted_password(&self) -> &SecretBytes {
        &self.salted_password
    }

    pub fn client_key(&self) -> &SecretBytes {
        &self.client_key
    }

    pub fn server_key(&self) -> &SecretBytes {
        &self.server_key
    }
}
