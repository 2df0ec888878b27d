#![forbid(unsafe_code)]

//! DHHC-1 secret codec and key container.
//!
//! Configured DH-HMAC-CHAP secrets travel as ASCII strings of the shape
//! `DHHC-1:<two decimal digits>:<base64 payload>:`. The decoded payload is a
//! 32/48/64-byte key followed by a 4-byte little-endian CRC-32 guarding
//! against configuration typos. [`extract_key`] validates the CRC and yields
//! the raw key; [`generate_secret`] is the inverse used by provisioning
//! tooling.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{AuthError, Result};
use crate::tables::HashAlgorithm;

/// Decoded payload sizes: 32/48/64-byte key plus the 4-byte CRC.
const PAYLOAD_LENS: [usize; 3] = [36, 52, 68];

const SECRET_PREFIX: &str = "DHHC-1:";

/// A DH-HMAC-CHAP key together with the hash identifier it was configured
/// with. `hash == 0` marks a raw key that needs no further transform.
///
/// Key bytes are scrubbed on drop.
#[derive(Clone, zeroize::ZeroizeOnDrop)]
pub struct DhchapKey {
    key: Vec<u8>,
    hash: u8,
}

// Key bytes are secret material; compare them in constant time.
impl PartialEq for DhchapKey {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && bool::from(self.key.ct_eq(&other.key))
    }
}

impl Eq for DhchapKey {}

impl DhchapKey {
    /// Allocate a zero-filled key of `len` bytes.
    pub fn new(len: usize, hash: u8) -> Self {
        Self {
            key: vec![0u8; len],
            hash,
        }
    }

    pub(crate) fn from_raw(key: Vec<u8>, hash: u8) -> Self {
        Self { key, hash }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Hash identifier this key was configured with; 0 means untransformed.
    pub fn hash(&self) -> u8 {
        self.hash
    }
}

// Never expose key bytes through Debug.
impl std::fmt::Debug for DhchapKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DhchapKey")
            .field("len", &self.key.len())
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

/// Decode and validate a secret payload, yielding the raw key.
///
/// `secret` is the Base64 token, optionally followed by `:<suffix>`; the
/// payload is everything before the last colon. The decoded payload must be
/// exactly 36, 52 or 68 bytes and its trailing 4 bytes must hold the
/// little-endian CRC-32 of the key bytes in front of them.
pub fn extract_key(secret: &str, hash_id: u8) -> Result<DhchapKey> {
    let payload = match secret.rfind(':') {
        Some(idx) => &secret[..idx],
        None => secret,
    };

    let decoded = Zeroizing::new(
        STANDARD
            .decode(payload)
            .map_err(|_| AuthError::InvalidFormat)?,
    );
    if !PAYLOAD_LENS.contains(&decoded.len()) {
        return Err(AuthError::InvalidLength(decoded.len()));
    }

    let key_len = decoded.len() - 4;
    let crc = crc32fast::hash(&decoded[..key_len]).to_le_bytes();
    if !bool::from(crc.ct_eq(&decoded[key_len..])) {
        warn!(key_len, "DHHC-1 secret CRC mismatch");
        return Err(AuthError::KeyRejected);
    }

    debug!(key_len, hash_id, "extracted DH-HMAC-CHAP key");
    Ok(DhchapKey::from_raw(decoded[..key_len].to_vec(), hash_id))
}

/// Split a full `DHHC-1:<id>:<base64>:` secret into its hash identifier and
/// Base64 payload. Any deviation from that exact shape is rejected.
pub fn parse_encoded_secret(text: &str) -> Result<(u8, &str)> {
    let rest = text
        .strip_prefix(SECRET_PREFIX)
        .ok_or(AuthError::InvalidFormat)?;
    let head = rest.as_bytes();
    if head.len() < 3 || !head[0].is_ascii_digit() || !head[1].is_ascii_digit() || head[2] != b':'
    {
        return Err(AuthError::InvalidFormat);
    }
    let hash_id = (head[0] - b'0') * 10 + (head[1] - b'0');

    let payload = rest[3..]
        .strip_suffix(':')
        .ok_or(AuthError::InvalidFormat)?;
    if payload.is_empty() || payload.contains(':') {
        return Err(AuthError::InvalidFormat);
    }
    Ok((hash_id, payload))
}

/// Produce a fresh `DHHC-1:<id>:<base64>:` secret with `key_len` random key
/// bytes. The inverse of [`parse_encoded_secret`] + [`extract_key`].
pub fn generate_secret(hash_id: u8, key_len: usize) -> Result<String> {
    if hash_id != 0 && HashAlgorithm::from_id(hash_id).is_none() {
        return Err(AuthError::InvalidAlgorithm(hash_id));
    }
    if !matches!(key_len, 32 | 48 | 64) {
        return Err(AuthError::InvalidLength(key_len));
    }

    let mut payload = Zeroizing::new(vec![0u8; key_len + 4]);
    OsRng.fill_bytes(&mut payload[..key_len]);
    let crc = crc32fast::hash(&payload[..key_len]).to_le_bytes();
    payload[key_len..].copy_from_slice(&crc);

    let mut encoded = STANDARD.encode(&payload[..]);
    let secret = format!("DHHC-1:{hash_id:02}:{encoded}:");
    encoded.zeroize();
    Ok(secret)
}
