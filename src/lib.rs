//! Client-side SCRAM-SHA-1 / SCRAM-SHA-256 authentication engine.
//!
//! Implements RFC 5802 (SCRAM) for the client role, RFC 4013/3454
//! (SASLprep) for SCRAM-SHA-256 passwords, and the legacy
//! `user:mongo:password` MD5 presecret for SCRAM-SHA-1. Transport framing,
//! the outer SASL mechanism dispatcher, and the server role are out of
//! scope — this crate only produces and consumes the three SCRAM messages.
//!
//! ```no_run
//! use scramkit::{HashAlgorithm, ScramSession};
//!
//! let mut session = ScramSession::new(HashAlgorithm::Sha256);
//! session.set_user("user");
//! session.set_password("pencil");
//! let client_first = session.client_first(4096).unwrap();
//! // send client_first, receive server_first over the wire...
//! ```

mod cache;
mod codepoint;
mod crypto;
mod error;
mod message;
mod saslprep;
mod secret;
mod session;

pub use cache::CacheEntry;
pub use crypto::HashAlgorithm;
pub use error::{Result, ScramError};
pub use session::{ScramSession, MIN_ITERATIONS};

// Exposed for consumers that want to SASLprep a password independently of a
// session (e.g. to precompute a cache key offline).
pub use saslprep::{is_preparation_unnecessary, prepare as sasl_prepare};
