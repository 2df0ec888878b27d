#![forbid(unsafe_code)]

//! NQN-bound key transformation.
//!
//! A configured secret whose hash identifier is non-zero is never used
//! directly: it is first bound to the authenticating NVMe Qualified Name by
//! an HMAC over `nqn || "NVMe-over-Fabrics"`, so the same secret yields
//! distinct per-entity keys.

use crate::error::{AuthError, Result};
use crate::key::DhchapKey;
use crate::mac;
use crate::tables::HashAlgorithm;

/// 17-byte literal appended to the NQN, with no separator.
const TRANSFORM_SUFFIX: &[u8] = b"NVMe-over-Fabrics";

/// Derive the transformed key bound to `nqn`.
///
/// Keys configured with hash identifier 0 pass through as a byte-identical
/// copy. For all others the result has the digest length of the configured
/// hash and keeps the hash identifier.
pub fn transform_key(key: &DhchapKey, nqn: &str) -> Result<DhchapKey> {
    if key.hash() == 0 {
        return Ok(key.clone());
    }
    let alg =
        HashAlgorithm::from_id(key.hash()).ok_or(AuthError::InvalidAlgorithm(key.hash()))?;
    let digest = mac::hmac(alg, key.as_bytes(), &[nqn.as_bytes(), TRANSFORM_SUFFIX])?;
    Ok(DhchapKey::from_raw(digest.to_vec(), key.hash()))
}
