//! Single-pass digest primitives.
//!
//! These are plain utilities with no algorithm parameter and no truncation;
//! the tree and proof code reach them through [`HashBackend`](super::HashBackend).

use sha2::{Digest, Sha256};
use sha3::Keccak256;

/// Natural output length of both supported primitives.
pub const PRIMITIVE_DIGEST_SIZE: usize = 32;

/// Computes `SHA-256(bytes)`.
pub fn sha256(bytes: &[u8]) -> [u8; PRIMITIVE_DIGEST_SIZE] {
    Sha256::digest(bytes).into()
}

/// Computes the original (pre-NIST) `Keccak-256(bytes)` used by Ethereum.
pub fn keccak256(bytes: &[u8]) -> [u8; PRIMITIVE_DIGEST_SIZE] {
    Keccak256::digest(bytes).into()
}
