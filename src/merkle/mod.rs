//! Append-then-seal binary Merkle trees.
//!
//! The module fixes the following layout rules:
//!
//! * **Leaves:** every leaf is hashed on insertion with the configured
//!   [`HashBackend`](crate::hash::HashBackend). Pre-hashed leaves are accepted
//!   as-is after a length check.
//! * **Pairing:** internal nodes are `hash(left || right)` with no tag or
//!   separator. The digest is truncated to `hash_size` at every level,
//!   including the root.
//! * **Odd levels:** the last unpaired node is paired with itself.
//! * **Proofs:** a proof carries the leaf index plus one sibling per level.
//!   Bit `l` of the index selects the pairing order at level `l`.
//!
//! Proofs are detached from the tree and can be replayed against any trusted
//! root with [`verify_proof`] or re-encoded with [`encode_proof`].

mod proof;
mod ser;
mod tree;
mod types;

pub use proof::{verify_proof, verify_proof_hash, MerkleProof};
pub use ser::{decode_proof, encode_proof, PROOF_VERSION};
pub use tree::MerkleTree;
pub use types::{Digest, MerkleError, MerkleResult, TreeDepth};
