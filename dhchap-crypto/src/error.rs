#![forbid(unsafe_code)]

//! Common error type for the DH-HMAC-CHAP core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Secret string or identifier name does not follow the expected shape.
    #[error("malformed secret or identifier string")]
    InvalidFormat,

    /// A key, challenge or decoded payload has a length the protocol
    /// does not allow.
    #[error("invalid length: {0} bytes")]
    InvalidLength(usize),

    /// CRC-32 embedded in the secret does not match its payload.
    #[error("secret checksum mismatch, key rejected")]
    KeyRejected,

    /// Hash or DH-group identifier unknown to this implementation.
    #[error("invalid algorithm identifier {0:#04x}")]
    InvalidAlgorithm(u8),

    /// Algorithm is known but disallowed for the requested operation.
    #[error("unsupported algorithm identifier {0:#04x}")]
    UnsupportedAlgorithm(u8),

    /// Base64 digest came out shorter than the protocol requires.
    #[error("encoded digest too short: expected {expected} chars, got {actual}")]
    EncodingShort { expected: usize, actual: usize },

    /// Underlying primitive failure (HMAC setkey, HKDF expand, DH step).
    #[error("crypto primitive failure: {0}")]
    CryptoFailure(String),

    /// Allocation failure reported by an external provider.
    #[error("out of memory")]
    OutOfMemory,
}

/// Convenient alias for results throughout the crate.
pub type Result<T> = std::result::Result<T, AuthError>;
