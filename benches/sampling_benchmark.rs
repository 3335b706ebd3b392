use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gpuhpc::delta::compute_deltas;
use gpuhpc::{classify_adreno, classify_mali, counters::encode_all, AdrenoCounter, AdrenoSeries};

pub fn bench_classification(c: &mut Criterion) {
    c.bench_function("classify_adreno", |b| {
        b.iter(|| (400..800u32).map(|id| classify_adreno(black_box(id))).count())
    });
    c.bench_function("classify_mali", |b| {
        b.iter(|| (0..=u16::MAX).filter(|&id| classify_mali(black_box(id)) != gpuhpc::MaliLayout::Unknown).count())
    });
}

pub fn bench_encoding(c: &mut Criterion) {
    c.bench_function("encode_all_adreno_a6xx", |b| {
        b.iter(|| encode_all(black_box(AdrenoCounter::ALL), AdrenoSeries::A6xx))
    });
}

pub fn bench_deltas(c: &mut Criterion) {
    let raw: Vec<u64> = (0..359u64).map(|i| i * 1_000 + 7).collect();
    let mut previous: Vec<u64> = (0..359u64).map(|i| i * 900).collect();
    let mut out = vec![0u64; raw.len()];

    c.bench_function("compute_deltas_359", |b| {
        b.iter(|| compute_deltas(black_box(&raw), &mut previous, &mut out))
    });
}

criterion_group!(benches, bench_classification, bench_encoding, bench_deltas);
criterion_main!(benches);
