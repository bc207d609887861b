use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use super::primitives::{keccak256, sha256, PRIMITIVE_DIGEST_SIZE};
use crate::merkle::MerkleError;

/// Digest algorithm selecting both the primitive and the number of passes.
///
/// | Variant | Primitive | Passes | Code | Name |
/// |---------|-----------|--------|------|------|
/// | `Sha256` | SHA-256 | 1 | `0` | `sha256` |
/// | `Sha256d` | SHA-256 | 2 | `1` | `sha256d` |
/// | `Keccak` | Keccak-256 | 1 | `2` | `keccak` |
/// | `Keccakd` | Keccak-256 | 2 | `3` | `keccakd` |
///
/// The codes are part of the proof wire format and must not be reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HashingAlgorithm {
    #[default]
    Sha256 = 0,
    Sha256d = 1,
    Keccak = 2,
    Keccakd = 3,
}

impl HashingAlgorithm {
    /// All variants in code order.
    pub const ALL: [HashingAlgorithm; 4] = [
        HashingAlgorithm::Sha256,
        HashingAlgorithm::Sha256d,
        HashingAlgorithm::Keccak,
        HashingAlgorithm::Keccakd,
    ];

    /// Returns the canonical single-byte code.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase name used in configuration files.
    pub const fn name(self) -> &'static str {
        match self {
            HashingAlgorithm::Sha256 => "sha256",
            HashingAlgorithm::Sha256d => "sha256d",
            HashingAlgorithm::Keccak => "keccak",
            HashingAlgorithm::Keccakd => "keccakd",
        }
    }

    /// Whether the primitive is applied twice per hash.
    pub const fn is_double(self) -> bool {
        matches!(self, HashingAlgorithm::Sha256d | HashingAlgorithm::Keccakd)
    }

    /// Output length of the underlying primitive before truncation.
    pub const fn natural_digest_size(self) -> usize {
        PRIMITIVE_DIGEST_SIZE
    }

    /// Applies the primitive once for single variants, `primitive(primitive(bytes))`
    /// for double variants. The output is not truncated.
    pub fn digest(self, bytes: &[u8]) -> [u8; PRIMITIVE_DIGEST_SIZE] {
        let primitive: fn(&[u8]) -> [u8; PRIMITIVE_DIGEST_SIZE] = match self {
            HashingAlgorithm::Sha256 | HashingAlgorithm::Sha256d => sha256,
            HashingAlgorithm::Keccak | HashingAlgorithm::Keccakd => keccak256,
        };
        let once = primitive(bytes);
        if self.is_double() {
            primitive(&once)
        } else {
            once
        }
    }
}

impl From<HashingAlgorithm> for u8 {
    fn from(value: HashingAlgorithm) -> Self {
        value.code()
    }
}

impl TryFrom<u8> for HashingAlgorithm {
    type Error = MerkleError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(HashingAlgorithm::Sha256),
            1 => Ok(HashingAlgorithm::Sha256d),
            2 => Ok(HashingAlgorithm::Keccak),
            3 => Ok(HashingAlgorithm::Keccakd),
            other => Err(MerkleError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl FromStr for HashingAlgorithm {
    type Err = MerkleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HashingAlgorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MerkleError::UnknownAlgorithm(s.to_owned()))
    }
}

impl fmt::Display for HashingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip_and_reject_unknown() {
        for algorithm in HashingAlgorithm::ALL {
            assert_eq!(HashingAlgorithm::try_from(algorithm.code()), Ok(algorithm));
            assert_eq!(algorithm.name().parse::<HashingAlgorithm>(), Ok(algorithm));
        }
        assert!(matches!(
            HashingAlgorithm::try_from(4),
            Err(MerkleError::UnknownAlgorithm(_))
        ));
        assert!("blake3".parse::<HashingAlgorithm>().is_err());
    }

    #[test]
    fn double_variants_apply_primitive_twice() {
        let doubles: Vec<_> = HashingAlgorithm::ALL
            .into_iter()
            .filter(|algorithm| algorithm.is_double())
            .collect();
        assert_eq!(doubles, [HashingAlgorithm::Sha256d, HashingAlgorithm::Keccakd]);

        let once = HashingAlgorithm::Sha256.digest(b"payload");
        assert_eq!(HashingAlgorithm::Sha256d.digest(b"payload"), sha256(&once));
        let once = HashingAlgorithm::Keccak.digest(b"payload");
        assert_eq!(HashingAlgorithm::Keccakd.digest(b"payload"), keccak256(&once));
    }
}
