use serde::{Deserialize, Serialize};

use super::algorithm::HashingAlgorithm;
use crate::config::TreeConfig;
use crate::merkle::{Digest, MerkleError, MerkleResult};

/// Hashing front-end shared by trees and proofs.
///
/// Every digest produced here is exactly [`hash_size`](Self::hash_size) bytes:
/// the first `hash_size` bytes of the (single or double) primitive output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBackend", into = "RawBackend")]
pub struct HashBackend {
    algorithm: HashingAlgorithm,
    hash_size: u8,
}

impl HashBackend {
    /// Binds an algorithm to a digest size.
    ///
    /// Fails with [`MerkleError::InvalidConfiguration`] when `hash_size` is
    /// zero or exceeds the natural output length of the algorithm.
    pub fn new(algorithm: HashingAlgorithm, hash_size: u8) -> MerkleResult<Self> {
        let size = hash_size as usize;
        if size == 0 || size > algorithm.natural_digest_size() {
            return Err(MerkleError::InvalidConfiguration {
                algorithm,
                hash_size,
            });
        }
        Ok(Self {
            algorithm,
            hash_size,
        })
    }

    /// Builds a backend from a validated [`TreeConfig`].
    pub fn from_config(config: &TreeConfig) -> MerkleResult<Self> {
        Self::new(config.algorithm, config.hash_size)
    }

    pub fn algorithm(&self) -> HashingAlgorithm {
        self.algorithm
    }

    /// Digest length in bytes.
    pub fn hash_size(&self) -> usize {
        self.hash_size as usize
    }

    /// Hashes arbitrary bytes into a digest of `hash_size` bytes.
    pub fn hash(&self, bytes: &[u8]) -> Digest {
        let full = self.algorithm.digest(bytes);
        Digest::new(full[..self.hash_size()].to_vec())
    }

    /// Combines two sibling digests as `hash(left || right)`.
    ///
    /// No separator or length prefix is inserted; proof recomputation relies on
    /// this exact byte order.
    pub fn pair_hash(&self, left: &[u8], right: &[u8]) -> Digest {
        let mut message = Vec::with_capacity(left.len() + right.len());
        message.extend_from_slice(left);
        message.extend_from_slice(right);
        self.hash(&message)
    }

    /// Checks that `bytes` has the configured digest length.
    pub(crate) fn check_digest(&self, bytes: &[u8]) -> MerkleResult<()> {
        if bytes.len() != self.hash_size() {
            return Err(MerkleError::DigestLength {
                expected: self.hash_size(),
                got: bytes.len(),
            });
        }
        Ok(())
    }
}

/// Serde mirror of [`HashBackend`]; deserialisation goes through
/// [`HashBackend::new`].
#[derive(Serialize, Deserialize)]
struct RawBackend {
    algorithm: HashingAlgorithm,
    hash_size: u8,
}

impl TryFrom<RawBackend> for HashBackend {
    type Error = MerkleError;

    fn try_from(raw: RawBackend) -> Result<Self, Self::Error> {
        HashBackend::new(raw.algorithm, raw.hash_size)
    }
}

impl From<HashBackend> for RawBackend {
    fn from(backend: HashBackend) -> Self {
        RawBackend {
            algorithm: backend.algorithm,
            hash_size: backend.hash_size,
        }
    }
}
