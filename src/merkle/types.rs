use core::ops::Deref;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::hash::HashingAlgorithm;
use crate::ser::SerError;

/// Fixed-width digest stored in trees and carried in proofs.
///
/// The width is the configured `hash_size`; the type itself does not fix it,
/// so every entry point that accepts foreign bytes checks the length.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Digest {
    bytes: Vec<u8>,
}

impl Digest {
    /// Creates a digest from raw bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Returns a reference to the underlying bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the digest and returns the bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Lowercase hexadecimal rendering.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(self.bytes.len() * 2);
        for byte in &self.bytes {
            out.push_str(&format!("{:02x}", byte));
        }
        out
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest(0x{})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Deref for Digest {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for Digest {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<Digest> for Vec<u8> {
    fn from(digest: Digest) -> Self {
        digest.into_bytes()
    }
}

impl PartialEq<[u8]> for Digest {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl PartialEq<&[u8]> for Digest {
    fn eq(&self, other: &&[u8]) -> bool {
        self.bytes == *other
    }
}

/// Number of pairing levels between the leaves and the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TreeDepth(pub u32);

impl TreeDepth {
    /// Depth of a tree over `leaf_count` leaves: `ceil(log2(leaf_count))`.
    pub fn for_leaves(leaf_count: usize) -> Self {
        TreeDepth(leaf_count.max(1).next_power_of_two().trailing_zeros())
    }
}

/// Errors emitted by the Merkle layer.
///
/// Every variant is a caller input or call-sequencing mistake; nothing here is
/// transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    #[error("hash size {hash_size} is not supported by {algorithm}")]
    InvalidConfiguration {
        algorithm: HashingAlgorithm,
        hash_size: u8,
    },
    #[error("unknown hashing algorithm `{0}`")]
    UnknownAlgorithm(String),
    #[error("merkle tree is empty")]
    EmptyTree,
    #[error("merkle tree is not merklized")]
    NotSealed,
    #[error("merkle tree is already merklized")]
    AlreadySealed,
    #[error("leaf index {index} out of range for {leaf_count} leaves")]
    IndexOutOfRange { index: u32, leaf_count: usize },
    #[error("leaf not found")]
    LeafNotFound,
    #[error("digest length mismatch: expected {expected}, got {got}")]
    DigestLength { expected: usize, got: usize },
    #[error("malformed proof input: {reason}")]
    MalformedProofInput { reason: &'static str },
    #[error("proof serialization failed: {0}")]
    Serialization(#[from] SerError),
}

/// Result alias used by the tree, proof, codec and config layers.
pub type MerkleResult<T> = core::result::Result<T, MerkleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_is_ceil_log2() {
        let expected = [(1, 0), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (1024, 10)];
        for (leaves, depth) in expected {
            assert_eq!(TreeDepth::for_leaves(leaves), TreeDepth(depth), "{leaves} leaves");
        }
    }

    #[test]
    fn digest_formats_as_hex() {
        let digest = Digest::new(vec![0x00, 0xab, 0x10]);
        assert_eq!(digest.to_string(), "00ab10");
        assert_eq!(format!("{:?}", digest), "Digest(0x00ab10)");
        assert_eq!(digest, &[0x00u8, 0xab, 0x10][..]);
    }
}
