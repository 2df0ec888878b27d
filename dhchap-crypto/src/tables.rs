#![forbid(unsafe_code)]

//! Identifier tables for hash algorithms and Diffie-Hellman groups.
//!
//! The NVMe Base Specification assigns one-byte identifiers to the hash
//! functions and FFDHE groups negotiable during DH-HMAC-CHAP. This module
//! holds the immutable id ⇄ name maps and the typed enums built on top of
//! them. Lookups never return a null name; unknown identifiers surface as
//! [`AuthError::InvalidAlgorithm`].

use std::fmt;

use crate::error::{AuthError, Result};

/// Hash function negotiated for a DH-HMAC-CHAP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// Protocol identifier (NVMe Base Spec figure "DH-HMAC-CHAP hash functions").
    pub const fn id(self) -> u8 {
        match self {
            HashAlgorithm::Sha256 => 1,
            HashAlgorithm::Sha384 => 2,
            HashAlgorithm::Sha512 => 3,
        }
    }

    /// Resolve a protocol identifier. Identifier 0 means "no transform"
    /// and is deliberately not representable here.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(HashAlgorithm::Sha256),
            2 => Some(HashAlgorithm::Sha384),
            3 => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Digest length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Keyed-primitive name used by configuration surfaces.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "hmac(sha256)",
            HashAlgorithm::Sha384 => "hmac(sha384)",
            HashAlgorithm::Sha512 => "hmac(sha512)",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finite-field Diffie-Hellman group negotiated for the exchange.
///
/// `Null` is the degenerate "no DH" path used when augmentation is not
/// negotiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DhGroup {
    Null,
    Ffdhe2048,
    Ffdhe3072,
    Ffdhe4096,
    Ffdhe6144,
    Ffdhe8192,
}

impl DhGroup {
    pub const fn id(self) -> u8 {
        match self {
            DhGroup::Null => 0,
            DhGroup::Ffdhe2048 => 1,
            DhGroup::Ffdhe3072 => 2,
            DhGroup::Ffdhe4096 => 3,
            DhGroup::Ffdhe6144 => 4,
            DhGroup::Ffdhe8192 => 5,
        }
    }

    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0 => Some(DhGroup::Null),
            1 => Some(DhGroup::Ffdhe2048),
            2 => Some(DhGroup::Ffdhe3072),
            3 => Some(DhGroup::Ffdhe4096),
            4 => Some(DhGroup::Ffdhe6144),
            5 => Some(DhGroup::Ffdhe8192),
            _ => None,
        }
    }

    /// Primitive name used by configuration surfaces and providers.
    pub const fn name(self) -> &'static str {
        match self {
            DhGroup::Null => "null",
            DhGroup::Ffdhe2048 => "ffdhe2048",
            DhGroup::Ffdhe3072 => "ffdhe3072",
            DhGroup::Ffdhe4096 => "ffdhe4096",
            DhGroup::Ffdhe6144 => "ffdhe6144",
            DhGroup::Ffdhe8192 => "ffdhe8192",
        }
    }

    /// Modulus size in bits; 0 for the null group.
    pub const fn bits(self) -> usize {
        match self {
            DhGroup::Null => 0,
            DhGroup::Ffdhe2048 => 2048,
            DhGroup::Ffdhe3072 => 3072,
            DhGroup::Ffdhe4096 => 4096,
            DhGroup::Ffdhe6144 => 6144,
            DhGroup::Ffdhe8192 => 8192,
        }
    }
}

impl fmt::Display for DhGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const HASH_MAP: [HashAlgorithm; 3] = [
    HashAlgorithm::Sha256,
    HashAlgorithm::Sha384,
    HashAlgorithm::Sha512,
];

const DHGROUP_MAP: [DhGroup; 6] = [
    DhGroup::Null,
    DhGroup::Ffdhe2048,
    DhGroup::Ffdhe3072,
    DhGroup::Ffdhe4096,
    DhGroup::Ffdhe6144,
    DhGroup::Ffdhe8192,
];

/// HMAC primitive name for a hash identifier.
pub fn hmac_name(id: u8) -> Result<&'static str> {
    HashAlgorithm::from_id(id)
        .map(HashAlgorithm::name)
        .ok_or(AuthError::InvalidAlgorithm(id))
}

/// Digest length in bytes for a hash identifier.
pub fn hmac_hash_len(id: u8) -> Result<usize> {
    HashAlgorithm::from_id(id)
        .map(HashAlgorithm::digest_len)
        .ok_or(AuthError::InvalidAlgorithm(id))
}

/// Primitive name for a DH group identifier.
pub fn dhgroup_name(id: u8) -> Result<&'static str> {
    DhGroup::from_id(id)
        .map(DhGroup::name)
        .ok_or(AuthError::InvalidAlgorithm(id))
}

/// Resolve a hash identifier from a configuration string.
///
/// Walks the table in ascending id order and returns the first entry whose
/// name is a case-sensitive prefix of `name`. Empty names are rejected.
pub fn hmac_id(name: &str) -> Result<u8> {
    if name.is_empty() {
        return Err(AuthError::InvalidFormat);
    }
    for alg in HASH_MAP {
        if name.starts_with(alg.name()) {
            return Ok(alg.id());
        }
    }
    Err(AuthError::InvalidFormat)
}

/// Resolve a DH group identifier from a configuration string.
///
/// Same prefix-match contract as [`hmac_id`].
pub fn dhgroup_id(name: &str) -> Result<u8> {
    if name.is_empty() {
        return Err(AuthError::InvalidFormat);
    }
    for group in DHGROUP_MAP {
        if name.starts_with(group.name()) {
            return Ok(group.id());
        }
    }
    Err(AuthError::InvalidFormat)
}
