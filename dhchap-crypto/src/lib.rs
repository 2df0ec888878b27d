#![forbid(unsafe_code)]

//! NVMe-over-Fabrics DH-HMAC-CHAP cryptographic core.
//!
//! This crate provides:
//! 1. DHHC-1 secret string parsing, CRC validation and key extraction
//!    (see [`key`] module).
//! 2. NQN-bound key transformation and augmented-challenge computation
//!    per NVMe Base Specification §8.13.
//! 3. Generated-PSK computation, PSK identity digests and the HKDF-based
//!    TLS 1.3 PSK derivation used to bootstrap NVMe/TCP TLS sessions.
//! 4. Diffie-Hellman exchange orchestration over a pluggable provider
//!    (see [`dh`] module).
//!
//! The authentication message state machine, wire framing and network I/O
//! live in higher layers; this crate is the pure computation layer those
//! layers call into.

pub mod challenge;
pub mod dh;
pub mod error;
pub mod key;
pub mod psk;
pub mod seqnum;
pub mod tables;
pub mod transform;

mod mac;

pub use challenge::augmented_challenge;
pub use dh::{dh_generate_private_key, dh_generate_public_key, dh_shared_secret, DhEngine};
pub use error::{AuthError, Result};
pub use key::{extract_key, generate_secret, parse_encoded_secret, DhchapKey};
pub use psk::{derive_tls_psk, generate_digest, generate_psk};
pub use seqnum::SequenceGenerator;
pub use tables::{DhGroup, HashAlgorithm};
pub use transform::transform_key;
