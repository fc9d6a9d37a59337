//! # Node Rewards Benchmarks
//!
//! | Operation | Target |
//! |-----------|--------|
//! | `compute_reward` | < 1µs |
//! | attest + finalize, 1000 keys | < 10ms |
//! | batch claim, 1000 keys | < 10ms |

use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};
use nr_01_node_key::NodeKeyApi;
use nr_03_node_rewards::{compute_reward, RewardConfig};
use nr_tests::fixtures::{Deployment, OWNER};
use shared_types::NodeKeyId;

fn bench_compute_reward(c: &mut Criterion) {
    let mut group = c.benchmark_group("reward-accrual");
    let config = RewardConfig::default();

    for attestations in [1u64, 3, 1_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("compute_reward", attestations),
            &attestations,
            |b, &n| b.iter(|| compute_reward(black_box(1_000), black_box(2_500), n, &config)),
        );
    }
    group.finish();
}

fn bench_round(c: &mut Criterion) {
    let mut group = c.benchmark_group("reward-round");
    let operator: [u8; 20] = [0x42; 20];

    for size in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(size));
        group.bench_with_input(BenchmarkId::new("attest_finalize_claim", size), &size, |b, &n| {
            b.iter_batched(
                || {
                    let d = Deployment::new();
                    let keys = d
                        .container
                        .node_keys
                        .mint(OWNER, operator, n)
                        .expect("mint");
                    d.api
                        .add_kyc_wallets(&[operator], OWNER)
                        .expect("kyc");
                    (d, keys)
                },
                |(d, keys): (Deployment, Vec<NodeKeyId>)| {
                    d.api.batch_attest(1, &keys, operator).expect("attest");
                    d.clock.advance(600);
                    d.api.finalize(1, OWNER).expect("finalize");
                    black_box(d.api.batch_claim_reward(&keys, 1, operator).expect("claim"))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute_reward, bench_round);
criterion_main!(benches);
