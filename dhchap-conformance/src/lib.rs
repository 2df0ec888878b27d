#![forbid(unsafe_code)]

//! Shared helpers for the DH-HMAC-CHAP conformance suite.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Wrap raw key bytes into a valid decoded secret payload (key || CRC-32 LE)
/// and Base64-encode it, as configuration tooling would.
pub fn encode_secret_payload(key: &[u8]) -> String {
    let mut payload = key.to_vec();
    payload.extend_from_slice(&crc32fast::hash(key).to_le_bytes());
    STANDARD.encode(payload)
}

/// Full `DHHC-1:<id>:<base64>:` secret string for raw key bytes.
pub fn encode_secret(hash_id: u8, key: &[u8]) -> String {
    format!("DHHC-1:{hash_id:02}:{}:", encode_secret_payload(key))
}
