#![forbid(unsafe_code)]

//! Diffie-Hellman exchange orchestration.
//!
//! The FFDHE arithmetic itself lives in an external provider (software or
//! hardware accelerator) behind the [`DhEngine`] capability trait; this
//! module drives the three-step exchange, validates output sizes and wraps
//! all shared secrets in zeroizing buffers. Provider calls are blocking and
//! have no cancellation: either they complete in full or fail with no
//! partial result.

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{AuthError, Result};
use crate::tables::DhGroup;

/// External Diffie-Hellman provider.
///
/// `PrivateKey` is an opaque handle; the key material may never leave the
/// provider (hardware-backed keys). The core never depends on a specific
/// backend.
pub trait DhEngine {
    type PrivateKey;

    /// Generate a fresh private key for `group`. The provider draws its own
    /// randomness. [`DhGroup::Null`] is a permitted degenerate path used
    /// when DH augmentation is not negotiated.
    fn generate_private_key(&self, group: DhGroup) -> Result<Self::PrivateKey>;

    /// Produce the local public value, exactly `out_len` bytes.
    fn public_key(&self, key: &Self::PrivateKey, out_len: usize) -> Result<Vec<u8>>;

    /// Combine the local private key with `peer_public` into a shared
    /// secret of exactly `out_len` bytes.
    fn shared_secret(
        &self,
        key: &Self::PrivateKey,
        peer_public: &[u8],
        out_len: usize,
    ) -> Result<Vec<u8>>;
}

/// Generate a private key for `group` via `engine`.
pub fn dh_generate_private_key<E: DhEngine>(engine: &E, group: DhGroup) -> Result<E::PrivateKey> {
    debug!(group = %group, "generating DH private key");
    engine.generate_private_key(group)
}

/// Generate the local public value; the provider must honour `out_len`.
pub fn dh_generate_public_key<E: DhEngine>(
    engine: &E,
    key: &E::PrivateKey,
    out_len: usize,
) -> Result<Vec<u8>> {
    let public = engine.public_key(key, out_len)?;
    if public.len() != out_len {
        return Err(AuthError::CryptoFailure(format!(
            "provider returned {}-byte public value, expected {out_len}",
            public.len()
        )));
    }
    Ok(public)
}

/// Compute the shared session key from the peer's public value.
///
/// Blocks until the provider completes; the result is scrubbed on drop.
pub fn dh_shared_secret<E: DhEngine>(
    engine: &E,
    key: &E::PrivateKey,
    peer_public: &[u8],
    out_len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let secret = Zeroizing::new(engine.shared_secret(key, peer_public, out_len)?);
    if secret.len() != out_len {
        return Err(AuthError::CryptoFailure(format!(
            "provider returned {}-byte shared secret, expected {out_len}",
            secret.len()
        )));
    }
    debug!(out_len, "computed DH shared secret");
    Ok(secret)
}
