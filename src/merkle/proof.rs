use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::hash::{HashBackend, HashingAlgorithm};

use super::types::{Digest, MerkleError, MerkleResult, TreeDepth};

/// Detached inclusion proof for a single leaf.
///
/// Holds the leaf index and the flat concatenation of sibling digests, bottom
/// level first. Bit `l` of the index says which side the running node sits on
/// at level `l`: `0` means it is the left input (`pair(current, sibling)`),
/// `1` means it is the right input (`pair(sibling, current)`).
///
/// The proof only recomputes roots; comparing against a trusted root is up to
/// the caller (see [`verify_proof`]).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawProof", into = "RawProof")]
pub struct MerkleProof {
    backend: HashBackend,
    index: u32,
    hashes: Vec<u8>,
}

impl MerkleProof {
    /// Builds a proof from its wire components.
    ///
    /// `hashes` must be a whole number of `hash_size` digests.
    pub fn new(
        algorithm: HashingAlgorithm,
        hash_size: u8,
        index: u32,
        hashes: Vec<u8>,
    ) -> MerkleResult<Self> {
        let backend = HashBackend::new(algorithm, hash_size)?;
        if hashes.len() % backend.hash_size() != 0 {
            return Err(MerkleError::MalformedProofInput {
                reason: "sibling bytes are not a multiple of the hash size",
            });
        }
        Ok(Self::from_parts(backend, index, hashes))
    }

    pub(crate) fn from_parts(backend: HashBackend, index: u32, hashes: Vec<u8>) -> Self {
        debug_assert_eq!(hashes.len() % backend.hash_size(), 0);
        Self {
            backend,
            index,
            hashes,
        }
    }

    pub fn algorithm(&self) -> HashingAlgorithm {
        self.backend.algorithm()
    }

    pub fn hash_size(&self) -> usize {
        self.backend.hash_size()
    }

    /// Index of the proven leaf.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of sibling digests, i.e. the depth of the originating tree.
    pub fn depth(&self) -> TreeDepth {
        TreeDepth((self.hashes.len() / self.hash_size()) as u32)
    }

    /// Sibling digests, bottom level first.
    pub fn siblings(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        self.hashes.chunks_exact(self.hash_size())
    }

    /// Raw flat sibling bytes as stored.
    pub fn get_pairing_hashes(&self) -> &[u8] {
        &self.hashes
    }

    /// Recomputes the root from raw leaf bytes.
    pub fn merklize(&self, leaf: &[u8]) -> MerkleResult<Digest> {
        let digest = self.backend.hash(leaf);
        Ok(self.climb(digest))
    }

    /// Recomputes the root from an already-hashed leaf.
    pub fn merklize_hash(&self, leaf_digest: &[u8]) -> MerkleResult<Digest> {
        if leaf_digest.len() != self.hash_size() {
            return Err(MerkleError::MalformedProofInput {
                reason: "leaf digest length does not match the hash size",
            });
        }
        Ok(self.climb(Digest::new(leaf_digest.to_vec())))
    }

    fn climb(&self, leaf: Digest) -> Digest {
        let mut current = leaf;
        for (level, sibling) in self.siblings().enumerate() {
            let right_side = self.index.checked_shr(level as u32).unwrap_or(0) & 1 == 1;
            current = if right_side {
                self.backend.pair_hash(sibling, &current)
            } else {
                self.backend.pair_hash(&current, sibling)
            };
        }
        trace!(index = self.index, depth = self.depth().0, "recomputed merkle root");
        current
    }
}

/// Checks `proof` against a trusted `root` starting from raw leaf bytes.
///
/// Returns `Ok(false)` on a root mismatch; errors are reserved for malformed
/// input.
pub fn verify_proof(proof: &MerkleProof, leaf: &[u8], root: &[u8]) -> MerkleResult<bool> {
    Ok(proof.merklize(leaf)?.as_bytes() == root)
}

/// Same as [`verify_proof`] for an already-hashed leaf.
pub fn verify_proof_hash(
    proof: &MerkleProof,
    leaf_digest: &[u8],
    root: &[u8],
) -> MerkleResult<bool> {
    Ok(proof.merklize_hash(leaf_digest)?.as_bytes() == root)
}

/// Serde mirror of [`MerkleProof`]; deserialisation goes through
/// [`MerkleProof::new`] so the size invariants hold.
#[derive(Serialize, Deserialize)]
struct RawProof {
    algorithm: HashingAlgorithm,
    hash_size: u8,
    index: u32,
    hashes: Vec<u8>,
}

impl TryFrom<RawProof> for MerkleProof {
    type Error = MerkleError;

    fn try_from(raw: RawProof) -> Result<Self, Self::Error> {
        MerkleProof::new(raw.algorithm, raw.hash_size, raw.index, raw.hashes)
    }
}

impl From<MerkleProof> for RawProof {
    fn from(proof: MerkleProof) -> Self {
        RawProof {
            algorithm: proof.algorithm(),
            hash_size: proof.hash_size() as u8,
            index: proof.index,
            hashes: proof.hashes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_path_returns_leaf_hash() {
        let proof = MerkleProof::new(HashingAlgorithm::Keccakd, 32, 0, Vec::new()).unwrap();
        let backend = HashBackend::new(HashingAlgorithm::Keccakd, 32).unwrap();
        assert_eq!(proof.depth(), TreeDepth(0));
        assert_eq!(proof.merklize(b"solo").unwrap(), backend.hash(b"solo"));
    }

    #[test]
    fn ragged_sibling_bytes_are_rejected() {
        let err = MerkleProof::new(HashingAlgorithm::Sha256, 16, 0, vec![0u8; 33]).unwrap_err();
        assert!(matches!(err, MerkleError::MalformedProofInput { .. }));
    }

    #[test]
    fn wrong_size_leaf_digest_is_rejected() {
        let proof = MerkleProof::new(HashingAlgorithm::Sha256, 16, 1, vec![7u8; 16]).unwrap();
        let err = proof.merklize_hash(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, MerkleError::MalformedProofInput { .. }));
    }

    #[test]
    fn index_bit_selects_pair_order() {
        let backend = HashBackend::new(HashingAlgorithm::Sha256, 32).unwrap();
        let leaf = backend.hash(b"leaf");
        let sibling = backend.hash(b"sibling");
        let left = MerkleProof::new(HashingAlgorithm::Sha256, 32, 0, sibling.to_vec()).unwrap();
        let right = MerkleProof::new(HashingAlgorithm::Sha256, 32, 1, sibling.to_vec()).unwrap();
        assert_eq!(left.merklize(b"leaf").unwrap(), backend.pair_hash(&leaf, &sibling));
        assert_eq!(right.merklize(b"leaf").unwrap(), backend.pair_hash(&sibling, &leaf));
    }

    #[test]
    fn deep_paths_do_not_overflow_the_index_shift() {
        let proof =
            MerkleProof::new(HashingAlgorithm::Keccak, 4, u32::MAX, vec![1u8; 4 * 40]).unwrap();
        assert_eq!(proof.depth(), TreeDepth(40));
        assert_eq!(proof.merklize(b"leaf").unwrap().len(), 4);
    }

    #[test]
    fn serde_rejects_ragged_siblings() {
        let json = r#"{"algorithm":"sha256","hash_size":32,"index":0,"hashes":[1,2,3]}"#;
        assert!(serde_json::from_str::<MerkleProof>(json).is_err());
    }
}
