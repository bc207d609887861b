use super::proof::MerkleProof;
use super::types::MerkleResult;
use crate::hash::HashingAlgorithm;
use crate::ser::{
    ensure_consumed, ensure_u32, read_u32, read_u8, write_bytes, write_u32, write_u8, ByteReader,
    SerError, SerKind,
};

/// Layout version written as the first byte of every encoded proof.
pub const PROOF_VERSION: u8 = 1;

/// Serialises a [`MerkleProof`] into the canonical byte layout:
///
/// ```text
/// version u8 | algorithm u8 | hash_size u8 | index u32 LE | count u32 LE | siblings
/// ```
pub fn encode_proof(proof: &MerkleProof) -> MerkleResult<Vec<u8>> {
    let siblings = proof.get_pairing_hashes();
    let count = ensure_u32(proof.depth().0 as usize, SerKind::Proof, "sibling_count")?;

    let mut out = Vec::with_capacity(11 + siblings.len());
    write_u8(&mut out, PROOF_VERSION);
    write_u8(&mut out, proof.algorithm().code());
    write_u8(&mut out, proof.hash_size() as u8);
    write_u32(&mut out, proof.index());
    write_u32(&mut out, count);
    write_bytes(&mut out, siblings);
    Ok(out)
}

/// Deserialises a [`MerkleProof`] from its canonical byte representation.
///
/// The whole input must be consumed.
pub fn decode_proof(bytes: &[u8]) -> MerkleResult<MerkleProof> {
    let mut cursor = ByteReader::new(bytes);

    let version = read_u8(&mut cursor, SerKind::Proof, "version")?;
    if version != PROOF_VERSION {
        return Err(SerError::invalid_value(SerKind::Proof, "version").into());
    }
    let code = read_u8(&mut cursor, SerKind::Proof, "algorithm")?;
    let algorithm = HashingAlgorithm::try_from(code)?;
    let hash_size = read_u8(&mut cursor, SerKind::Proof, "hash_size")?;
    let index = read_u32(&mut cursor, SerKind::Proof, "index")?;
    let count = read_u32(&mut cursor, SerKind::Proof, "sibling_count")?;

    let len = (count as usize)
        .checked_mul(hash_size as usize)
        .ok_or_else(|| SerError::invalid_length(SerKind::Siblings, "siblings"))?;
    let siblings = cursor.read_vec(SerKind::Siblings, "siblings", len)?;
    ensure_consumed(&cursor, SerKind::Proof)?;

    MerkleProof::new(algorithm, hash_size, index, siblings)
}
