use tracing::{debug, trace};

use crate::config::TreeConfig;
use crate::hash::{HashBackend, HashingAlgorithm};
#[cfg(feature = "parallel")]
use crate::utils::parallel::{preferred_chunk_size, should_parallelize};

use super::proof::MerkleProof;
use super::types::{Digest, MerkleError, MerkleResult, TreeDepth};

#[derive(Debug, Clone)]
enum TreeState {
    /// Accepting leaves; no levels derived yet.
    Open(Vec<Digest>),
    /// `levels[0]` holds the leaf digests, the last level holds only the root.
    Sealed(Vec<Vec<Digest>>),
}

/// Append-then-seal binary Merkle tree.
///
/// Leaves are hashed on insertion and only their digests are kept. Calling
/// [`merklize`](Self::merklize) derives the level pyramid; from then on the
/// tree is read-only and serves the root and inclusion proofs.
///
/// When a level has an odd number of nodes the last node is paired with
/// itself. Proofs record that node as its own sibling so recomputation follows
/// the same rule.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    backend: HashBackend,
    state: TreeState,
}

impl MerkleTree {
    /// Creates an empty, open tree.
    pub fn new(algorithm: HashingAlgorithm, hash_size: u8) -> MerkleResult<Self> {
        Ok(Self::with_backend(HashBackend::new(algorithm, hash_size)?))
    }

    pub fn from_config(config: &TreeConfig) -> MerkleResult<Self> {
        Ok(Self::with_backend(config.backend()?))
    }

    pub fn with_backend(backend: HashBackend) -> Self {
        Self {
            backend,
            state: TreeState::Open(Vec::new()),
        }
    }

    pub fn backend(&self) -> &HashBackend {
        &self.backend
    }

    pub fn algorithm(&self) -> HashingAlgorithm {
        self.backend.algorithm()
    }

    pub fn hash_size(&self) -> usize {
        self.backend.hash_size()
    }

    pub fn is_sealed(&self) -> bool {
        matches!(self.state, TreeState::Sealed(_))
    }

    /// Number of leaves added so far.
    pub fn leaf_count(&self) -> usize {
        self.leaves().len()
    }

    /// Depth the tree has (or will have once sealed) for its current leaves.
    pub fn depth(&self) -> TreeDepth {
        TreeDepth::for_leaves(self.leaf_count())
    }

    fn leaves(&self) -> &[Digest] {
        match &self.state {
            TreeState::Open(leaves) => leaves,
            TreeState::Sealed(levels) => levels.first().map(Vec::as_slice).unwrap_or(&[]),
        }
    }

    fn open_leaves(&mut self) -> MerkleResult<&mut Vec<Digest>> {
        match &mut self.state {
            TreeState::Open(leaves) => Ok(leaves),
            TreeState::Sealed(_) => Err(MerkleError::AlreadySealed),
        }
    }

    fn sealed_levels(&self) -> MerkleResult<&[Vec<Digest>]> {
        match &self.state {
            TreeState::Sealed(levels) => Ok(levels),
            TreeState::Open(_) => Err(MerkleError::NotSealed),
        }
    }

    /// Hashes `leaf` and appends its digest.
    pub fn add_leaf(&mut self, leaf: &[u8]) -> MerkleResult<()> {
        let digest = self.backend.hash(leaf);
        self.open_leaves()?.push(digest);
        Ok(())
    }

    /// Hashes and appends a batch of leaves in iteration order.
    pub fn add_leaves<I, B>(&mut self, leaves: I) -> MerkleResult<()>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]> + Sync,
    {
        self.open_leaves()?;
        let leaves: Vec<B> = leaves.into_iter().collect();
        let backend = self.backend;
        #[cfg(feature = "parallel")]
        let hashed: Vec<Digest> = if should_parallelize(leaves.len()) {
            use rayon::prelude::*;
            let chunk = preferred_chunk_size(leaves.len());
            leaves
                .par_iter()
                .with_min_len(chunk)
                .map(|leaf| backend.hash(leaf.as_ref()))
                .collect()
        } else {
            leaves.iter().map(|leaf| backend.hash(leaf.as_ref())).collect()
        };
        #[cfg(not(feature = "parallel"))]
        let hashed: Vec<Digest> = leaves.iter().map(|leaf| backend.hash(leaf.as_ref())).collect();
        self.open_leaves()?.extend(hashed);
        Ok(())
    }

    /// Appends an already-hashed leaf after checking its length.
    pub fn add_hash(&mut self, digest: &[u8]) -> MerkleResult<()> {
        self.backend.check_digest(digest)?;
        self.open_leaves()?.push(Digest::new(digest.to_vec()));
        Ok(())
    }

    /// Appends a batch of already-hashed leaves. Nothing is appended if any
    /// digest has the wrong length.
    pub fn add_hashes<I, B>(&mut self, digests: I) -> MerkleResult<()>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        self.open_leaves()?;
        let digests = digests
            .into_iter()
            .map(|digest| {
                let bytes = digest.as_ref();
                self.backend.check_digest(bytes)?;
                Ok(Digest::new(bytes.to_vec()))
            })
            .collect::<MerkleResult<Vec<_>>>()?;
        self.open_leaves()?.extend(digests);
        Ok(())
    }

    /// Seals the tree and derives every level up to the root.
    ///
    /// Fails with [`MerkleError::EmptyTree`] when no leaves were added; the
    /// tree stays open in that case. Calling it again on a sealed tree is a
    /// no-op.
    pub fn merklize(&mut self) -> MerkleResult<()> {
        let leaves = match &mut self.state {
            TreeState::Sealed(_) => return Ok(()),
            TreeState::Open(leaves) if leaves.is_empty() => return Err(MerkleError::EmptyTree),
            TreeState::Open(leaves) => std::mem::take(leaves),
        };
        let leaf_count = leaves.len();
        let levels = build_levels(&self.backend, leaves);
        debug!(
            algorithm = %self.backend.algorithm(),
            hash_size = self.backend.hash_size(),
            leaf_count,
            depth = levels.len() - 1,
            "merklized tree"
        );
        self.state = TreeState::Sealed(levels);
        Ok(())
    }

    /// Drops the derived levels and reopens the tree, keeping its leaves.
    pub fn reset(&mut self) {
        if let TreeState::Sealed(levels) = &mut self.state {
            let leaves = std::mem::take(levels).into_iter().next().unwrap_or_default();
            debug!(leaf_count = leaves.len(), "reopened merklized tree");
            self.state = TreeState::Open(leaves);
        }
    }

    /// Returns the root digest of a sealed tree.
    pub fn get_merkle_root(&self) -> MerkleResult<Digest> {
        self.sealed_levels()?
            .last()
            .and_then(|level| level.first())
            .cloned()
            .ok_or(MerkleError::EmptyTree)
    }

    /// Returns the digest stored for leaf `index`.
    pub fn get_leaf_hash(&self, index: u32) -> MerkleResult<Digest> {
        let leaves = self.leaves();
        leaves
            .get(index as usize)
            .cloned()
            .ok_or(MerkleError::IndexOutOfRange {
                index,
                leaf_count: leaves.len(),
            })
    }

    /// Extracts the inclusion proof for the leaf at `index`.
    ///
    /// The sibling at each level is the other half of the node's pair, or the
    /// node itself when it is the unpaired last element of an odd level.
    pub fn merkle_proof_index(&self, index: u32) -> MerkleResult<MerkleProof> {
        let levels = self.sealed_levels()?;
        let leaf_count = levels.first().map_or(0, Vec::len);
        if index as usize >= leaf_count {
            return Err(MerkleError::IndexOutOfRange { index, leaf_count });
        }

        let depth = levels.len() - 1;
        let mut siblings = Vec::with_capacity(depth * self.hash_size());
        let mut position = index as usize;
        for level in &levels[..depth] {
            let sibling = if position % 2 == 0 {
                level.get(position + 1).unwrap_or(&level[position])
            } else {
                &level[position - 1]
            };
            siblings.extend_from_slice(sibling.as_bytes());
            position /= 2;
        }
        trace!(index, depth, "extracted merkle proof");

        Ok(MerkleProof::from_parts(self.backend, index, siblings))
    }

    /// Extracts the inclusion proof for the first leaf whose digest equals
    /// `digest`.
    ///
    /// Duplicate leaf digests are allowed; the proof is built for the lowest
    /// matching index.
    pub fn merkle_proof_hash(&self, digest: &[u8]) -> MerkleResult<MerkleProof> {
        let levels = self.sealed_levels()?;
        let index = levels
            .first()
            .and_then(|leaves| leaves.iter().position(|leaf| leaf.as_bytes() == digest))
            .ok_or(MerkleError::LeafNotFound)?;
        self.merkle_proof_index(index as u32)
    }
}

fn build_levels(backend: &HashBackend, leaves: Vec<Digest>) -> Vec<Vec<Digest>> {
    let mut levels = Vec::with_capacity(TreeDepth::for_leaves(leaves.len()).0 as usize + 1);
    levels.push(leaves);
    while let Some(current) = levels.last().filter(|level| level.len() > 1) {
        let next = pair_level(backend, current);
        levels.push(next);
    }
    levels
}

fn pair_level(backend: &HashBackend, level: &[Digest]) -> Vec<Digest> {
    let pair = |chunk: &[Digest]| match chunk {
        [left, right] => backend.pair_hash(left, right),
        [single] => backend.pair_hash(single, single),
        _ => unreachable!("chunks(2) yields one or two nodes"),
    };
    #[cfg(feature = "parallel")]
    {
        if should_parallelize(level.len()) {
            use rayon::prelude::*;
            let chunk = preferred_chunk_size(level.len() / 2);
            return level.par_chunks(2).with_min_len(chunk).map(pair).collect();
        }
    }
    level.chunks(2).map(pair).collect()
}
