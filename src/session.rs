//! The SCRAM client state machine.
//!
//! `ScramSession` produces and consumes the three SCRAM messages, derives
//! the salted password and keys, enforces the protocol invariants, and
//! consults/updates an attached [`CacheEntry`]. It is single-owner and
//! single-threaded — the caller is responsible for moving bytes to and
//! from the wire between steps.

use crate::cache::CacheEntry;
use crate::crypto::{self, HashAlgorithm};
use crate::error::{Result, ScramError};
use crate::message::{escape_user, parse_attributes, require_attribute};
use crate::secret::{SecretBytes, SecretString};

/// Minimum PBKDF2 iteration count accepted from a server; below this the
/// conversation is aborted to prevent a downgrade attack.
pub const MIN_ITERATIONS: u32 = 4096;

/// Number of random bytes used to build the client nonce (base64 of 24 bytes
/// yields the 32 ASCII-character encoded nonce).
const NONCE_RANDOM_BYTES: usize = 24;

/// The SCRAM client conversation, one instance per authentication attempt.
pub struct ScramSession {
    algorithm: HashAlgorithm,
    step: u8,

    user: Option<String>,
    password: Option<SecretString>,

    client_nonce: String,

    auth_message: Vec<u8>,
    auth_message_max: usize,

    hashed_password: Option<SecretString>,
    decoded_salt: Option<Vec<u8>>,
    iterations: Option<u32>,

    salted_password: Option<SecretBytes>,
    client_key: Option<SecretBytes>,
    server_key: Option<SecretBytes>,

    cache: Option<CacheEntry>,
}

impl ScramSession {
    /// Creates a new session for the given hash algorithm. `step` starts at
    /// 0; nothing is derived until [`Self::step`] is called.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            step: 0,
            user: None,
            password: None,
            client_nonce: String::new(),
            auth_message: Vec::new(),
            auth_message_max: 0,
            hashed_password: None,
            decoded_salt: None,
            iterations: None,
            salted_password: None,
            client_key: None,
            server_key: None,
            cache: None,
        }
    }

    pub fn set_user(&mut self, user: &str) {
        self.user = Some(user.to_string());
    }

    pub fn set_password(&mut self, password: &str) {
        self.password = Some(SecretString::new(password.to_string()));
    }

    /// Attaches a cache entry (deep-copied) to this session, or detaches the
    /// current one if `entry` is `None`.
    pub fn attach_cache(&mut self, entry: Option<&CacheEntry>) {
        self.cache = entry.cloned();
    }

    /// Returns a deep copy of the currently attached cache entry, if any
    /// (transferable to another session).
    pub fn get_cache(&self) -> Option<CacheEntry> {
        self.cache.clone()
    }

    pub fn step_count(&self) -> u8 {
        self.step
    }

    /// Drives the conversation one step forward. `input` is ignored for the
    /// first step (there is no server message yet); `out_max` bounds both
    /// the emitted message and the internal `AuthMessage` buffer, which has a
    /// single fixed capacity chosen at step 1.
    ///
    /// Returns `Some(bytes)` to send to the server for steps 1 and 2, or
    /// `None` after step 3 (the conversation is complete — nothing more is
    /// sent).
    pub fn step(&mut self, input: &[u8], out_max: usize) -> Result<Option<Vec<u8>>> {
        match self.step {
            0 => self.client_first(out_max).map(Some),
            1 => self.server_first(input, out_max).map(Some),
            2 => self.server_final(input).map(|()| None),
            _ => Err(ScramError::MaxStepsExceeded),
        }
    }

    /// Step 0→1: emit `client-first-message`.
    pub fn client_first(&mut self, out_max: usize) -> Result<Vec<u8>> {
        if self.step != 0 {
            return Err(ScramError::InvalidState);
        }
        let user = self
            .user
            .as_deref()
            .filter(|u| !u.is_empty())
            .ok_or(ScramError::UserNotSet)?;
        if self.password.is_none() {
            return Err(ScramError::PasswordNotSet);
        }

        let nonce_bytes = crypto::random_bytes(NONCE_RANDOM_BYTES)?;
        self.client_nonce = crypto::b64_encode(&nonce_bytes);
        debug_assert_eq!(self.client_nonce.len(), 32);

        let bare = format!("n={},r={}", escape_user(user), self.client_nonce);
        let message = format!("n,,{bare}");

        if message.len() > out_max {
            return Err(ScramError::BufferOverflow(
                "client-first-message exceeds output buffer".to_string(),
            ));
        }

        self.auth_message_max = out_max;
        self.auth_message.clear();
        self.push_auth_message(bare.as_bytes())?;
        self.push_auth_message(b",")?;

        self.step = 1;
        Ok(message.into_bytes())
    }

    /// Step 1→2: consume `server-first-message`, emit `client-final-message`.
    pub fn server_first(&mut self, server_msg: &[u8], out_max: usize) -> Result<Vec<u8>> {
        if self.step != 1 {
            return Err(ScramError::InvalidState);
        }
        let password = self
            .password
            .as_ref()
            .ok_or(ScramError::PasswordNotSet)?
            .as_str()
            .to_string();
        let user = self.user.clone().ok_or(ScramError::UserNotSet)?;

        let server_str = std::str::from_utf8(server_msg)
            .map_err(|e| ScramError::Encoding(format!("server-first-message: {e}")))?;

        let attrs = parse_attributes(server_str, &['r', 's', 'i'])?;
        let combined_nonce = require_attribute(&attrs, 'r')?;
        let salt_b64 = require_attribute(&attrs, 's')?;
        let iterations_str = require_attribute(&attrs, 'i')?;

        // Aborts the step immediately on mismatch rather than recording an
        // error and continuing to parse — a nonce mismatch is fatal.
        let combined_nonce_bytes = combined_nonce.as_bytes();
        let client_nonce_bytes = self.client_nonce.as_bytes();
        if combined_nonce_bytes.len() < client_nonce_bytes.len()
            || !crypto::ct_equal(&combined_nonce_bytes[..client_nonce_bytes.len()], client_nonce_bytes)
        {
            return Err(ScramError::NonceMismatch);
        }

        let decoded_salt = crypto::b64_decode(&salt_b64)?;
        let expected_salt_len = self.algorithm.output_len() - 4;
        if decoded_salt.len() != expected_salt_len {
            return Err(ScramError::SaltLength {
                expected: expected_salt_len,
                actual: decoded_salt.len(),
            });
        }

        let iterations: u32 = iterations_str
            .parse::<i64>()
            .map_err(|_| ScramError::InvalidIterationCount(iterations_str.clone()))
            .and_then(|n| {
                if n < MIN_ITERATIONS as i64 {
                    Err(ScramError::InvalidIterationCount(iterations_str.clone()))
                } else if n > u32::MAX as i64 {
                    Err(ScramError::InvalidIterationCount(iterations_str.clone()))
                } else {
                    Ok(n as u32)
                }
            })?;

        self.push_auth_message(server_str.as_bytes())?;
        self.push_auth_message(b",")?;

        let hashed_password = self.compute_presecret(&user, &password)?;

        // Cache lookup: reuse SaltedPassword/ClientKey/ServerKey if this
        // credential's presecret triple matches what's attached.
        if let Some(cache) = &self.cache {
            if cache.matches(hashed_password.as_str(), &decoded_salt, iterations) {
                self.salted_password = Some(cache.salted_password().clone());
                self.client_key = Some(cache.client_key().clone());
                self.server_key = Some(cache.server_key().clone());
            }
        }

        self.hashed_password = Some(hashed_password.clone());
        self.decoded_salt = Some(decoded_salt.clone());
        self.iterations = Some(iterations);

        if self.salted_password.is_none() {
            self.salted_password = Some(self.algorithm.hi(
                hashed_password.as_str().as_bytes(),
                &decoded_salt,
                iterations,
            ));
        }
        let salted_password = self.salted_password.as_ref().unwrap();

        let client_key = match self.client_key.clone() {
            Some(k) => k,
            None => self.algorithm.hmac(salted_password.as_slice(), b"Client Key"),
        };
        self.client_key = Some(client_key.clone());

        // StoredKey and ClientSignature are transient: both are SecretBytes
        // and zeroize on drop at the end of this scope.
        let stored_key = self.algorithm.hash(client_key.as_slice());
        let client_signature = self.algorithm.hmac(stored_key.as_slice(), &self.auth_message);
        let client_proof = xor(client_key.as_slice(), client_signature.as_slice());

        let without_proof = format!("c=biws,r={combined_nonce}");
        self.push_auth_message(without_proof.as_bytes())?;

        let message = format!("{without_proof},p={}", crypto::b64_encode(client_proof.as_slice()));
        if message.len() > out_max {
            return Err(ScramError::BufferOverflow(
                "client-final-message exceeds output buffer".to_string(),
            ));
        }

        self.step = 2;
        Ok(message.into_bytes())
    }

    /// Step 2→3: consume `server-final-message`, verify `ServerSignature`.
    pub fn server_final(&mut self, server_msg: &[u8]) -> Result<()> {
        if self.step != 2 {
            return Err(ScramError::InvalidState);
        }

        let server_str = std::str::from_utf8(server_msg)
            .map_err(|e| ScramError::Encoding(format!("server-final-message: {e}")))?;
        let attrs = parse_attributes(server_str, &['e', 'v'])?;

        if let Some(err_text) = attrs.get(&'e') {
            return Err(ScramError::ServerRejected(err_text.clone()));
        }
        let verifier_b64 = attrs.get(&'v').ok_or(ScramError::MissingVerifier)?;
        let received = crypto::b64_decode(verifier_b64)?;

        let salted_password = self.salted_password.as_ref().ok_or(ScramError::InvalidState)?;
        let server_key = match self.server_key.clone() {
            Some(k) => k,
            None => self.algorithm.hmac(salted_password.as_slice(), b"Server Key"),
        };
        let server_signature = self.algorithm.hmac(server_key.as_slice(), &self.auth_message);

        if !crypto::ct_equal(server_signature.as_slice(), &received) {
            return Err(ScramError::ServerSignatureMismatch);
        }

        self.server_key = Some(server_key);
        self.update_cache();
        self.step = 3;
        Ok(())
    }

    /// Replaces the attached cache entry with one built from this session's
    /// current presecrets and derived secrets. Called automatically on a
    /// successful step 3.
    fn update_cache(&mut self) {
        if let (Some(hashed_password), Some(decoded_salt), Some(iterations), Some(salted), Some(ck), Some(sk)) = (
            self.hashed_password.clone(),
            self.decoded_salt.clone(),
            self.iterations,
            self.salted_password.clone(),
            self.client_key.clone(),
            self.server_key.clone(),
        ) {
            self.cache = Some(CacheEntry::new(hashed_password, decoded_salt, iterations, salted, ck, sk));
        }
    }

    /// Computes the presecret (`hashed_password`): for SHA-1 the legacy
    /// `user:mongo:password` MD5 hex digest, for SHA-256 the SASLprep of the
    /// password.
    fn compute_presecret(&self, user: &str, password: &str) -> Result<SecretString> {
        match self.algorithm {
            HashAlgorithm::Sha1 => {
                let digest = md5::compute(format!("{user}:mongo:{password}"));
                Ok(SecretString::new(format!("{digest:x}")))
            }
            HashAlgorithm::Sha256 => {
                crate::saslprep::prepare(password).map(SecretString::new)
            }
        }
    }

    fn push_auth_message(&mut self, bytes: &[u8]) -> Result<()> {
        if self.auth_message.len() + bytes.len() > self.auth_message_max {
            return Err(ScramError::BufferOverflow(
                "AuthMessage buffer would overflow its fixed capacity".to_string(),
            ));
        }
        self.auth_message.extend_from_slice(bytes);
        Ok(())
    }
}

fn xor(a: &[u8], b: &[u8]) -> SecretBytes {
    debug_assert_eq!(a.len(), b.len());
    SecretBytes::new(a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect())
}
