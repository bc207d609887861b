//! Tree configuration shared by tree builders and proof verifiers.
//!
//! A [`TreeConfig`] pins the two knobs that every party must agree on before
//! a root is meaningful: the [`HashingAlgorithm`] and the digest size. Both
//! sides of a proof exchange typically load the same configuration (or one of
//! the [`BuiltinProfile`]s) and build their [`HashBackend`] from it.
//!
//! Configurations deserialize with serde; missing fields fall back to the
//! defaults below.
//!
//! | Field | Default |
//! |-------|---------|
//! | `algorithm` | [`HashingAlgorithm::Sha256`] |
//! | `hash_size` | `32` |

use serde::{Deserialize, Serialize};

use crate::hash::{HashBackend, HashingAlgorithm, PRIMITIVE_DIGEST_SIZE};
use crate::merkle::MerkleResult;

/// Default digest size in bytes.
pub const DEFAULT_HASH_SIZE: u8 = PRIMITIVE_DIGEST_SIZE as u8;

/// Algorithm and digest size for a tree or proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub algorithm: HashingAlgorithm,
    pub hash_size: u8,
}

impl TreeConfig {
    pub const fn new(algorithm: HashingAlgorithm, hash_size: u8) -> Self {
        Self {
            algorithm,
            hash_size,
        }
    }

    /// Loads one of the built-in profiles.
    ///
    /// | Profile | Algorithm | Hash size | Typical use |
    /// |---------|-----------|-----------|-------------|
    /// | `SHA256` | `Sha256` | 32 | Generic commitments |
    /// | `BITCOIN` | `Sha256d` | 32 | Bitcoin transaction trees / SPV |
    /// | `KECCAK` | `Keccak` | 32 | EVM-side verification |
    /// | `KECCAK_D` | `Keccakd` | 32 | Double-pass Keccak commitments |
    pub const fn from_profile(profile: BuiltinProfile) -> Self {
        match profile {
            BuiltinProfile::SHA256 => Self::new(HashingAlgorithm::Sha256, DEFAULT_HASH_SIZE),
            BuiltinProfile::BITCOIN => Self::new(HashingAlgorithm::Sha256d, DEFAULT_HASH_SIZE),
            BuiltinProfile::KECCAK => Self::new(HashingAlgorithm::Keccak, DEFAULT_HASH_SIZE),
            BuiltinProfile::KECCAK_D => Self::new(HashingAlgorithm::Keccakd, DEFAULT_HASH_SIZE),
        }
    }

    /// Checks the digest size against the algorithm's natural output length.
    pub fn validate(&self) -> MerkleResult<()> {
        HashBackend::new(self.algorithm, self.hash_size).map(|_| ())
    }

    /// Validates the configuration and returns the bound backend.
    pub fn backend(&self) -> MerkleResult<HashBackend> {
        HashBackend::from_config(self)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::from_profile(BuiltinProfile::SHA256)
    }
}

/// Supported built-in profiles.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinProfile {
    /// Single-pass SHA-256, full width.
    SHA256,
    /// Double SHA-256, full width.
    BITCOIN,
    /// Single-pass Keccak-256, full width.
    KECCAK,
    /// Double Keccak-256, full width.
    KECCAK_D,
}
