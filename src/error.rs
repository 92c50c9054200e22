//! Error types for the SCRAM client engine.

use thiserror::Error;

/// Result type for SCRAM operations.
pub type Result<T> = std::result::Result<T, ScramError>;

/// Errors that can occur while driving a [`crate::session::ScramSession`].
///
/// Every variant corresponds to one of the error kinds in the engine's error
/// taxonomy (configuration, entropy, encoding, protocol, verification,
/// buffer). A session is terminal after any of these — callers should drop it
/// rather than retry the same step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScramError {
    /// `set_user` was never called, or was called with an empty user name.
    #[error("configuration error: user not set")]
    UserNotSet,

    /// `set_password` was never called.
    #[error("configuration error: password not set")]
    PasswordNotSet,

    /// The random source did not return the requested number of bytes.
    #[error("entropy error: random number generator failed: {0}")]
    Entropy(String),

    /// Base64 encode/decode failure, or the password/user contains invalid UTF-8.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// SASLprep was required (SCRAM-SHA-256) but the full profile is
    /// unavailable and the input is not plain ASCII.
    #[error("encoding error: password preparation required but unavailable")]
    PreparationUnavailable,

    /// SASLprep rejected the password (prohibited output, unassigned
    /// codepoint, or a bidi rule violation).
    #[error("encoding error: SASLprep rejected the input: {0}")]
    SaslprepRejected(String),

    /// An attribute key in a server message was not one of the keys this
    /// step recognizes.
    #[error("protocol error: unknown attribute key '{0}'")]
    UnknownAttribute(char),

    /// A `key=value` pair could not be parsed.
    #[error("protocol error: malformed attribute: {0}")]
    MalformedAttribute(String),

    /// A required attribute was absent from a server message.
    #[error("protocol error: missing required attribute '{0}'")]
    MissingAttribute(char),

    /// The server's combined nonce does not begin with the client nonce.
    #[error("protocol error: server nonce does not extend client nonce")]
    NonceMismatch,

    /// The decoded salt length was not exactly `H - 4` bytes.
    #[error("protocol error: salt length {actual} does not match expected {expected}")]
    SaltLength { expected: usize, actual: usize },

    /// The iteration count was not parseable, negative, or below the
    /// minimum accepted value.
    #[error("protocol error: invalid iteration count: {0}")]
    InvalidIterationCount(String),

    /// `step` was invoked a fourth time (or beyond); the conversation is over.
    #[error("protocol error: maximum steps exceeded")]
    MaxStepsExceeded,

    /// The session was asked to do something out of order (e.g. proof
    /// derivation before a salted password exists).
    #[error("protocol error: session is not in the expected state")]
    InvalidState,

    /// The server's final message carried `e=<text>`.
    #[error("verification error: server reported authentication failure: {0}")]
    ServerRejected(String),

    /// The server's final message carried no `v=` verifier.
    #[error("verification error: server final message missing verifier")]
    MissingVerifier,

    /// `ServerSignature` did not match the received `v=` value.
    #[error("verification error: server signature mismatch")]
    ServerSignatureMismatch,

    /// A write would have overflowed the output buffer or the fixed-size
    /// `AuthMessage` buffer.
    #[error("buffer error: {0}")]
    BufferOverflow(String),
}
