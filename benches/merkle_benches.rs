use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use merkle_seal::{verify_proof, HashingAlgorithm, MerkleTree};

const LEAF_WIDTH: usize = 32;

fn make_leaves(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let mut bytes = vec![0u8; LEAF_WIDTH];
            bytes[..8].copy_from_slice(&(i as u64).to_le_bytes());
            bytes
        })
        .collect()
}

fn sealed(algorithm: HashingAlgorithm, leaves: &[Vec<u8>]) -> MerkleTree {
    let mut tree = MerkleTree::new(algorithm, 32).unwrap();
    tree.add_leaves(leaves).unwrap();
    tree.merklize().unwrap();
    tree
}

fn bench_merklize(c: &mut Criterion) {
    let sizes = [1024usize, 16_384, 65_536];
    for algorithm in [HashingAlgorithm::Sha256d, HashingAlgorithm::Keccak] {
        let mut group = c.benchmark_group(format!("merklize_{algorithm}"));
        for &size in &sizes {
            let leaves = make_leaves(size);
            group.throughput(Throughput::Bytes((size * LEAF_WIDTH) as u64));
            group.bench_with_input(BenchmarkId::from_parameter(size), &leaves, |b, leaves| {
                b.iter_batched(
                    || leaves.clone(),
                    |leaves| {
                        let _ = sealed(algorithm, &leaves);
                    },
                    BatchSize::SmallInput,
                );
            });
        }
        group.finish();
    }
}

fn bench_proofs(c: &mut Criterion) {
    let leaves = make_leaves(1 << 14);
    let tree = sealed(HashingAlgorithm::Sha256d, &leaves);
    let root = tree.get_merkle_root().unwrap();
    let indices = [0u32, 4_095, 16_383];

    for &index in &indices {
        c.bench_with_input(BenchmarkId::new("extract_proof", index), &index, |b, &index| {
            b.iter(|| tree.merkle_proof_index(index).unwrap());
        });

        let proof = tree.merkle_proof_index(index).unwrap();
        let leaf = &leaves[index as usize];
        c.bench_with_input(BenchmarkId::new("verify_proof", index), &index, |b, _| {
            b.iter(|| assert!(verify_proof(&proof, leaf, &root).unwrap()));
        });
    }
}

fn merkle_benches(c: &mut Criterion) {
    bench_merklize(c);
    bench_proofs(c);
}

criterion_group!(benches, merkle_benches);
criterion_main!(benches);
