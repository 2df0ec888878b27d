#![forbid(unsafe_code)]

//! Generated-PSK computation and TLS-PSK derivation.
//!
//! After a successful DH-HMAC-CHAP exchange with a negotiated DH group,
//! host and controller derive a generated PSK from the session key and the
//! two exchanged challenges, publish its identity as a Base64 digest and
//! finally expand it into a TLS 1.3 external PSK (RFC 5869 HKDF with the
//! `tls13 nvme-tls-psk` info label) for NVMe/TCP secure channels.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hkdf::Hkdf;
use sha2::{Sha256, Sha384};
use zeroize::Zeroizing;

use crate::error::{AuthError, Result};
use crate::mac;
use crate::tables::HashAlgorithm;

/// ASCII label inside the HKDF info string, after the 2-byte length field.
const TLS_PSK_LABEL: &[u8] = b"tls13 nvme-tls-psk";

/// Expected Base64 digest length per hash: 44 chars for SHA-256, 64 for
/// SHA-384. SHA-512 PSK identities are not defined by the protocol.
fn digest_chars(alg: HashAlgorithm) -> Option<usize> {
    match alg {
        HashAlgorithm::Sha256 => Some(44),
        HashAlgorithm::Sha384 => Some(64),
        HashAlgorithm::Sha512 => None,
    }
}

/// Compute the generated PSK `HMAC(session_key, c1 || c2)`.
///
/// Both challenges must be exactly the digest length of `hash_id`; the
/// output has the same length and is scrubbed on drop.
pub fn generate_psk(
    hash_id: u8,
    session_key: &[u8],
    c1: &[u8],
    c2: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    let alg = HashAlgorithm::from_id(hash_id).ok_or(AuthError::InvalidAlgorithm(hash_id))?;
    let hlen = alg.digest_len();
    if c1.len() != hlen {
        return Err(AuthError::InvalidLength(c1.len()));
    }
    if c2.len() != hlen {
        return Err(AuthError::InvalidLength(c2.len()));
    }
    mac::hmac(alg, session_key, &[c1, c2])
}

/// Compute the Base64 PSK identity digest
/// `base64(HMAC(psk, hostnqn || " " || subsysnqn || " NVMe-over-Fabrics"))`.
///
/// Only SHA-256 (44 chars) and SHA-384 (64 chars) identities exist; any
/// other hash is rejected.
pub fn generate_digest(
    hash_id: u8,
    psk: &[u8],
    subsysnqn: &str,
    hostnqn: &str,
) -> Result<String> {
    let alg = HashAlgorithm::from_id(hash_id).ok_or(AuthError::InvalidAlgorithm(hash_id))?;
    let expected = digest_chars(alg).ok_or(AuthError::InvalidAlgorithm(hash_id))?;

    let raw = mac::hmac(
        alg,
        psk,
        &[
            hostnqn.as_bytes(),
            b" ",
            subsysnqn.as_bytes(),
            b" NVMe-over-Fabrics",
        ],
    )?;
    let encoded = STANDARD.encode(raw.as_slice());
    if encoded.len() < expected {
        return Err(AuthError::EncodingShort {
            expected,
            actual: encoded.len(),
        });
    }
    Ok(encoded)
}

/// Derive the TLS 1.3 external PSK from a generated PSK and its identity
/// digest.
///
/// `prk = HKDF-Extract(salt = hlen zero bytes, psk)`, then
/// `HKDF-Expand(prk, BE16(len(psk)) || "tls13 nvme-tls-psk" || "<id> " ||
/// digest, len(psk))`. SHA-512 is not supported for this step.
pub fn derive_tls_psk(hash_id: u8, psk: &[u8], psk_digest: &str) -> Result<Zeroizing<Vec<u8>>> {
    let alg = HashAlgorithm::from_id(hash_id).ok_or(AuthError::InvalidAlgorithm(hash_id))?;

    let mut info = Vec::with_capacity(2 + TLS_PSK_LABEL.len() + 3 + psk_digest.len());
    info.extend_from_slice(&(psk.len() as u16).to_be_bytes());
    info.extend_from_slice(TLS_PSK_LABEL);
    info.extend_from_slice(format!("{hash_id:02}").as_bytes());
    info.push(b' ');
    info.extend_from_slice(psk_digest.as_bytes());

    let salt = vec![0u8; alg.digest_len()];
    let mut tls_psk = Zeroizing::new(vec![0u8; psk.len()]);

    macro_rules! expand_arm {
        ($hash:ty) => {
            Hkdf::<$hash>::new(Some(&salt), psk)
                .expand(&info, &mut tls_psk)
                .map_err(|e| AuthError::CryptoFailure(format!("hkdf expand: {e}")))
        };
    }
    match alg {
        HashAlgorithm::Sha256 => expand_arm!(Sha256)?,
        HashAlgorithm::Sha384 => expand_arm!(Sha384)?,
        HashAlgorithm::Sha512 => return Err(AuthError::UnsupportedAlgorithm(hash_id)),
    }
    Ok(tls_psk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    const HOSTNQN: &str = "nqn.2014-08.org.nvmexpress:uuid:0c468c4d-a385-47e0-8299-6e95051277db";
    const SUBSYSNQN: &str = "nqn.2014-08.org.nvmexpress.discovery";

    #[test]
    fn psk_matches_independent_hmac() {
        let session_key = [0x33u8; 32];
        let c1 = [0x01u8; 32];
        let c2 = [0x02u8; 32];
        let psk = generate_psk(1, &session_key, &c1, &c2).unwrap();
        assert_eq!(psk.len(), 32);

        let mut mac = Hmac::<Sha256>::new_from_slice(&session_key).unwrap();
        mac.update(&c1);
        mac.update(&c2);
        assert_eq!(psk.as_slice(), mac.finalize().into_bytes().as_slice());
    }

    #[test]
    fn psk_rejects_wrong_challenge_lengths() {
        let session_key = [0u8; 32];
        assert!(matches!(
            generate_psk(1, &session_key, &[0u8; 31], &[0u8; 32]),
            Err(AuthError::InvalidLength(31))
        ));
        assert!(matches!(
            generate_psk(1, &session_key, &[0u8; 32], &[0u8; 48]),
            Err(AuthError::InvalidLength(48))
        ));
    }

    #[test]
    fn digest_lengths_and_base64_roundtrip() {
        for (hash_id, chars, hlen) in [(1u8, 44usize, 32usize), (2, 64, 48)] {
            let psk = vec![0x44u8; hlen];
            let digest = generate_digest(hash_id, &psk, SUBSYSNQN, HOSTNQN).unwrap();
            assert_eq!(digest.len(), chars);
            let decoded = STANDARD.decode(&digest).unwrap();
            assert_eq!(decoded.len(), hlen);
        }
    }

    #[test]
    fn digest_rejects_sha512_and_unknown() {
        assert!(matches!(
            generate_digest(3, &[0u8; 64], SUBSYSNQN, HOSTNQN),
            Err(AuthError::InvalidAlgorithm(3))
        ));
        assert!(matches!(
            generate_digest(0, &[0u8; 32], SUBSYSNQN, HOSTNQN),
            Err(AuthError::InvalidAlgorithm(0))
        ));
    }

    #[test]
    fn digest_binds_both_nqns() {
        let psk = [7u8; 32];
        let a = generate_digest(1, &psk, SUBSYSNQN, HOSTNQN).unwrap();
        let b = generate_digest(1, &psk, HOSTNQN, SUBSYSNQN).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn tls_psk_is_deterministic_and_psk_sized() {
        let psk = [0x55u8; 32];
        let digest = generate_digest(1, &psk, SUBSYSNQN, HOSTNQN).unwrap();
        let a = derive_tls_psk(1, &psk, &digest).unwrap();
        let b = derive_tls_psk(1, &psk, &digest).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.len(), psk.len());

        let psk384 = [0x66u8; 48];
        let digest384 = generate_digest(2, &psk384, SUBSYSNQN, HOSTNQN).unwrap();
        let out = derive_tls_psk(2, &psk384, &digest384).unwrap();
        assert_eq!(out.len(), 48);
    }

    #[test]
    fn tls_psk_depends_on_digest() {
        let psk = [0x55u8; 32];
        let a = derive_tls_psk(1, &psk, "digest-a").unwrap();
        let b = derive_tls_psk(1, &psk, "digest-b").unwrap();
        assert_ne!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn tls_psk_rejects_sha512() {
        assert!(matches!(
            derive_tls_psk(3, &[0u8; 64], "irrelevant"),
            Err(AuthError::UnsupportedAlgorithm(3))
        ));
        assert!(matches!(
            derive_tls_psk(9, &[0u8; 32], "irrelevant"),
            Err(AuthError::InvalidAlgorithm(9))
        ));
    }
}
