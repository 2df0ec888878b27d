#![forbid(unsafe_code)]

//! Augmented-challenge computation.
//!
//! When a DH group is negotiated, the controller challenge is bound to the
//! DH session key before the response HMAC is computed, preventing offline
//! dictionary attacks on the exchange: the challenge is replayed as
//! `HMAC(Hash(session_key), challenge)`.

use crate::error::{AuthError, Result};
use crate::mac;
use crate::tables::HashAlgorithm;

/// Compute the augmented challenge for a negotiated hash and DH session key.
///
/// `challenge` must be exactly the digest length of `hash_id`; the output
/// has the same length.
pub fn augmented_challenge(
    hash_id: u8,
    session_key: &[u8],
    challenge: &[u8],
) -> Result<Vec<u8>> {
    let alg = HashAlgorithm::from_id(hash_id).ok_or(AuthError::InvalidAlgorithm(hash_id))?;
    if challenge.len() != alg.digest_len() {
        return Err(AuthError::InvalidLength(challenge.len()));
    }

    // Plain digest of the session key, then keyed over the challenge.
    let hashed_key = mac::digest(alg, session_key);
    let augmented = mac::hmac(alg, &hashed_key, &[challenge])?;
    Ok(augmented.to_vec())
}
