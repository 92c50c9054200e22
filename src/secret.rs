//! Zeroizing wrappers for authentication secrets.
//!
//! `Session`, `CacheEntry`, and the client-proof derivation all hold
//! material that must be overwritten before it is freed:
//! the plaintext password, the presecret (`hashed_password`), and the three
//! derived keys. `SecretBytes`/`SecretString` centralize that instead of
//! scattering manual zero-writes through `session.rs`.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A fixed-length secret (a derived key). `H` is always 20 or 32 in this
/// crate, so this stays a plain `Vec<u8>` rather than a const-generic array —
/// the hash algorithm is chosen at runtime.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes({} bytes, redacted)", self.0.len())
    }
}

impl PartialEq for SecretBytes {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.0.ct_eq(&other.0).into()
    }
}
impl Eq for SecretBytes {}

/// A secret owned string (the plaintext password, or the `hashed_password`
/// presecret). Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretString(redacted)")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        use subtle::ConstantTimeEq;
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}
impl Eq for SecretString {}
