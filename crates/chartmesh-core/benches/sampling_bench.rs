// File: crates/chartmesh-core/benches/sampling_bench.rs
// Summary: Sampling throughput over dense series for each reduction kind.

use chartmesh_core::downsample::{data_average, sample_rate, sample_value, sampled_indices, SampleType};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn gen_values(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i as f64 * 0.01).sin() * 10.0 + (i as f64 * 0.0001)).collect()
}

fn bench_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_value");
    let kinds = [
        ("average", SampleType::Average),
        ("peak", SampleType::Peak),
        ("max", SampleType::Max),
        ("moving_avg", SampleType::MovingAverage { period: 8 }),
    ];
    for &n in &[50_000usize, 100_000usize] {
        let values = gen_values(n);
        let avg = data_average(&values, 0..n);
        for &target in &[1_000usize, 5_000usize] {
            let rate = sample_rate(n, target);
            for (name, kind) in kinds {
                group.bench_with_input(BenchmarkId::new(name, format!("n{n}_t{target}")), &rate, |b, &rate| {
                    b.iter(|| {
                        let mut acc = 0.0;
                        for i in sampled_indices(0, n, rate) {
                            acc += sample_value(&values, kind, rate, 0, n, avg, i);
                        }
                        black_box(acc)
                    });
                });
            }
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
