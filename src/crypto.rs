//! Crypto primitives façade.
//!
//! A thin capability set — hash, HMAC, cryptographic random bytes,
//! constant-time equality, base64 — polymorphic over the chosen hash
//! algorithm. Concrete primitives come from `sha1`/`sha2`/`hmac`/`pbkdf2`/
//! `rand`/`base64`/`subtle`; nothing here implements cryptography itself.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::{Result, ScramError};
use crate::secret::SecretBytes;

/// The SCRAM hash variant in use for a session. Carries its digest length
/// `H` so derivations never hard-code 20 or 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Digest length in bytes: 20 for SHA-1, 32 for SHA-256.
    pub const fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
        }
    }

    /// The SCRAM mechanism name this algorithm corresponds to, for callers
    /// that need to advertise it on the wire (outside this crate's scope,
    /// but a natural thing for the enclosing authenticator to ask for).
    pub const fn mechanism_name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SCRAM-SHA-1",
            HashAlgorithm::Sha256 => "SCRAM-SHA-256",
        }
    }

    /// `H(data)` — the underlying hash function.
    pub fn hash(self, data: &[u8]) -> SecretBytes {
        let digest = match self {
            HashAlgorithm::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(data);
                hasher.finalize().to_vec()
            }
            HashAlgorithm::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(data);
                hasher.finalize().to_vec()
            }
        };
        SecretBytes::new(digest)
    }

    /// `HMAC(key, data)`.
    pub fn hmac(self, key: &[u8], data: &[u8]) -> SecretBytes {
        let mac = match self {
            HashAlgorithm::Sha1 => {
                let mut mac = Hmac::<Sha1>::new_from_slice(key)
                    .expect("HMAC accepts a key of any length");
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
            HashAlgorithm::Sha256 => {
                let mut mac = Hmac::<Sha256>::new_from_slice(key)
                    .expect("HMAC accepts a key of any length");
                mac.update(data);
                mac.finalize().into_bytes().to_vec()
            }
        };
        SecretBytes::new(mac)
    }

    /// `Hi(password, salt, iterations)` — PBKDF2-HMAC with this algorithm,
    /// truncated to exactly `H` bytes of output.
    pub fn hi(self, password: &[u8], salt: &[u8], iterations: u32) -> SecretBytes {
        let mut output = vec![0u8; self.output_len()];
        match self {
            HashAlgorithm::Sha1 => {
                pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, iterations, &mut output)
                    .expect("output buffer is exactly H bytes");
            }
            HashAlgorithm::Sha256 => {
                pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut output)
                    .expect("output buffer is exactly H bytes");
            }
        }
        SecretBytes::new(output)
    }
}

/// Cryptographically strong random bytes, treated as an injected capability.
/// `rand::rngs::OsRng` is used directly — tests that need a deterministic
/// nonce construct the client-first message by hand instead of going
/// through [`random_bytes`].
pub fn random_bytes(n: usize) -> Result<Vec<u8>> {
    random_bytes_from(&mut rand::rngs::OsRng, n)
}

/// `random_bytes`'s implementation, generic over the RNG so a failing source
/// can be substituted in tests without touching the real entropy path.
fn random_bytes_from<R: RngCore>(rng: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    rng.try_fill_bytes(&mut buf)
        .map_err(|e| ScramError::Entropy(e.to_string()))?;
    Ok(buf)
}

/// Constant-time byte equality. Every secret/MAC comparison in this crate
/// (nonce prefix, server signature, cache key) goes through this rather
/// than `==`.
pub fn ct_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

pub fn b64_encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

pub fn b64_decode(ascii: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(ascii)
        .map_err(|e| ScramError::Encoding(format!("invalid base64: {e}")))
}
