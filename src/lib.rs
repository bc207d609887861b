//! Append-then-seal Merkle trees with detached inclusion proofs.
//!
//! A [`MerkleTree`] collects leaves (raw bytes or pre-hashed digests), is
//! sealed once with [`MerkleTree::merklize`], and then serves its root and
//! per-leaf [`MerkleProof`]s. Proofs are self-describing: they carry the
//! hashing algorithm, digest size, leaf index and sibling path, so a verifier
//! only needs the leaf and a trusted root.
//!
//! ```
//! use merkle_seal::{verify_proof, HashingAlgorithm, MerkleTree};
//!
//! let mut tree = MerkleTree::new(HashingAlgorithm::Sha256, 32)?;
//! for leaf in [b"a", b"b", b"c", b"d"] {
//!     tree.add_leaf(leaf)?;
//! }
//! tree.merklize()?;
//! let root = tree.get_merkle_root()?;
//! let proof = tree.merkle_proof_index(2)?;
//! assert!(verify_proof(&proof, b"c", &root)?);
//! assert!(!verify_proof(&proof, b"x", &root)?);
//! # Ok::<(), merkle_seal::MerkleError>(())
//! ```
//!
//! Supported algorithms are SHA-256 and Keccak-256, each in a single and a
//! double-hashed variant (the latter matching Bitcoin's transaction trees).
//! Digests may be truncated to any size between 1 and 32 bytes.

pub mod config;
pub mod hash;
pub mod merkle;
pub mod ser;
pub mod utils;

pub use config::{BuiltinProfile, TreeConfig};
pub use hash::{keccak256, sha256, HashBackend, HashingAlgorithm};
pub use merkle::{
    decode_proof, encode_proof, verify_proof, verify_proof_hash, Digest, MerkleError, MerkleProof,
    MerkleResult, MerkleTree, TreeDepth,
};
