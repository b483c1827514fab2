use criterion::{criterion_group, criterion_main, Criterion};
use ledger_core::{
    pow::{proof_of_work, proof_of_work_parallel, valid_proof},
    Block, Transaction,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn bench_pow(c: &mut Criterion) {
    c.bench_function("proof_of_work_genesis", |b| {
        b.iter(|| proof_of_work(black_box(100)));
    });

    c.bench_function("proof_of_work_parallel_genesis", |b| {
        b.iter(|| proof_of_work_parallel(black_box(100)));
    });

    c.bench_function("valid_proof", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| valid_proof(black_box(100), rng.gen()));
    });
}

fn bench_block_hash(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let transactions: Vec<Transaction> = (0..100)
        .map(|i| Transaction::new(format!("alice-{i}"), "bob", rng.gen_range(1..10)))
        .collect();
    let block = Block {
        index: 2,
        timestamp: 1_600_000_000,
        transactions,
        proof: 35_293,
        previous_hash: "0".repeat(64),
    };

    c.bench_function("block_hash_100_txs", |b| {
        b.iter(|| black_box(&block).hash());
    });
}

criterion_group!(benches, bench_pow, bench_block_hash);
criterion_main!(benches);
