//! Hashing layer for the Merkle commitment code.
//!
//! * [`primitives`] exposes the raw single-pass [`sha256`] and [`keccak256`]
//!   digests.
//! * [`HashingAlgorithm`] selects the primitive and whether it is applied once
//!   or twice per invocation.
//! * [`HashBackend`] binds an algorithm to a digest size and provides the leaf
//!   hash and the ordered pairing hash used by trees and proofs.

mod algorithm;
mod backend;
pub mod primitives;

pub use algorithm::HashingAlgorithm;
pub use backend::HashBackend;
pub use primitives::{keccak256, sha256, PRIMITIVE_DIGEST_SIZE};
