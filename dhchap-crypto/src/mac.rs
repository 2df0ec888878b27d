#![forbid(unsafe_code)]

//! HMAC and plain-digest dispatch over the negotiated hash algorithm.
//!
//! All keyed outputs are returned in [`Zeroizing`] buffers so partially
//! consumed derivation chains scrub themselves on every exit path.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::{AuthError, Result};
use crate::tables::HashAlgorithm;

macro_rules! hmac_arm {
    ($hash:ty, $key:expr, $parts:expr) => {{
        let mut mac = Hmac::<$hash>::new_from_slice($key)
            .map_err(|e| AuthError::CryptoFailure(format!("hmac setkey: {e}")))?;
        for part in $parts {
            mac.update(part);
        }
        Ok(Zeroizing::new(mac.finalize().into_bytes().to_vec()))
    }};
}

/// `HMAC(key, parts[0] || parts[1] || ...)` with the digest of `alg`.
pub(crate) fn hmac(alg: HashAlgorithm, key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<Vec<u8>>> {
    match alg {
        HashAlgorithm::Sha256 => hmac_arm!(Sha256, key, parts),
        HashAlgorithm::Sha384 => hmac_arm!(Sha384, key, parts),
        HashAlgorithm::Sha512 => hmac_arm!(Sha512, key, parts),
    }
}

/// Plain (unkeyed) digest of `data`.
pub(crate) fn digest(alg: HashAlgorithm, data: &[u8]) -> Zeroizing<Vec<u8>> {
    match alg {
        HashAlgorithm::Sha256 => Zeroizing::new(Sha256::digest(data).to_vec()),
        HashAlgorithm::Sha384 => Zeroizing::new(Sha384::digest(data).to_vec()),
        HashAlgorithm::Sha512 => Zeroizing::new(Sha512::digest(data).to_vec()),
    }
}
