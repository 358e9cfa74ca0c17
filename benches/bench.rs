// Criterion benchmarks for the corretores directory core

use corretores_api::core::{infer_specialty, sanitize_search_term, RateLimiter};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

fn bench_sanitize_term(c: &mut Criterion) {
    let clean = "corretora de seguros aldeota fortaleza";
    let dirty = "<script>seguro 'auto' % (barato); &mais+</script>".repeat(3);

    let mut group = c.benchmark_group("sanitize_search_term");
    group.bench_function("clean", |b| {
        b.iter(|| sanitize_search_term(black_box(Some(clean))));
    });
    group.bench_function("dirty", |b| {
        b.iter(|| sanitize_search_term(black_box(Some(&dirty))));
    });
    group.finish();
}

fn bench_infer_specialty(c: &mut Criterion) {
    c.bench_function("infer_specialty_hit", |b| {
        b.iter(|| infer_specialty(black_box("preciso de seguro para viagem internacional")));
    });
    c.bench_function("infer_specialty_miss", |b| {
        b.iter(|| infer_specialty(black_box("corretor recomendado perto de mim")));
    });
}

fn bench_rate_limiter(c: &mut Criterion) {
    let mut group = c.benchmark_group("rate_limiter");

    for key_count in [1usize, 100, 1000].iter() {
        let limiter = RateLimiter::new(u32::MAX, Duration::from_secs(60), 100_000);
        let keys: Vec<String> = (0..*key_count).map(|i| format!("10.0.{}.{}", i / 256, i % 256)).collect();

        group.bench_with_input(BenchmarkId::new("check", key_count), key_count, |b, _| {
            let mut i = 0usize;
            b.iter(|| {
                let key = &keys[i % keys.len()];
                i += 1;
                limiter.check(black_box(key))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sanitize_term, bench_infer_specialty, bench_rate_limiter);
criterion_main!(benches);
