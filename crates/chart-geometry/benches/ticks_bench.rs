use chart_geometry::{align_domain_to_nice_values, generate_linear_ticks, Domain};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn domains() -> Vec<Domain> {
    (0..1_000)
        .map(|i| {
            let base = (i as f64 * 0.37).sin() * 10f64.powi(i % 7);
            Domain::new(base, base + 1.0 + (i as f64 * 1.3))
        })
        .collect()
}

fn bench_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("ticks");
    let ds = domains();
    for &count in &[5usize, 10usize] {
        group.bench_with_input(BenchmarkId::new("generate", count), &count, |b, &n| {
            b.iter(|| {
                for d in &ds {
                    black_box(generate_linear_ticks(*d, n));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("align", count), &count, |b, &n| {
            b.iter(|| {
                for d in &ds {
                    black_box(align_domain_to_nice_values(*d, n));
                }
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_ticks);
criterion_main!(benches);
