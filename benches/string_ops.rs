//! Benchmarks for the dual-encoding string engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bistr::{BiStr, SplitOptions};

fn random_ascii(rng: &mut StdRng, len: usize) -> BiStr {
    let bytes: Vec<u8> = (0..len).map(|_| rng.gen_range(b'a'..=b'z')).collect();
    BiStr::from_ascii(&bytes).unwrap()
}

fn random_wide(rng: &mut StdRng, len: usize) -> BiStr {
    let units: Vec<u16> = (0..len).map(|_| rng.gen_range(0x3040..0x30A0)).collect();
    BiStr::from_units(&units)
}

fn bench_search(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let compact = random_ascii(&mut rng, 4096);
    let wide = random_wide(&mut rng, 4096);
    let last_compact = compact.unit_at(compact.len() - 1).unwrap_or(0);
    let last_wide = wide.unit_at(wide.len() - 1).unwrap_or(0);

    let mut group = c.benchmark_group("search");
    group.bench_function("find_unit_compact_4k", |b| {
        b.iter(|| black_box(&compact).rfind_unit(black_box(last_compact)))
    });
    group.bench_function("find_unit_wide_4k", |b| {
        b.iter(|| black_box(&wide).rfind_unit(black_box(last_wide)))
    });
    let needle = compact.substring_range(4000, 24).unwrap();
    group.bench_function("find_substring_compact_4k", |b| {
        b.iter(|| black_box(&compact).find(black_box(&needle)))
    });
    group.finish();
}

fn bench_mutate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_ascii(&mut rng, 1024);
    let b_str = random_ascii(&mut rng, 1024);
    let wide = random_wide(&mut rng, 1024);

    let mut group = c.benchmark_group("mutate");
    group.bench_function("concat_compact_1k", |bench| {
        bench.iter(|| black_box(&a).concat(black_box(&b_str)).unwrap())
    });
    group.bench_function("concat_mixed_1k", |bench| {
        bench.iter(|| black_box(&a).concat(black_box(&wide)).unwrap())
    });
    group.bench_function("substring_half_1k", |bench| {
        bench.iter(|| black_box(&a).substring_range(256, 512).unwrap())
    });
    group.bench_function("replace_unit_1k", |bench| {
        bench.iter(|| {
            black_box(&a)
                .replace_unit(b'a' as u16, b'z' as u16)
                .unwrap()
        })
    });
    group.finish();
}

fn bench_split_join(c: &mut Criterion) {
    let parts: Vec<BiStr> = (0..64).map(|i| BiStr::from(format!("field{i}"))).collect();
    let sep = BiStr::from(",");
    let joined = BiStr::join(&sep, &parts).unwrap();

    let mut group = c.benchmark_group("split_join");
    group.bench_function("join_64_fields", |b| {
        b.iter(|| BiStr::join(black_box(&sep), black_box(&parts)).unwrap())
    });
    group.bench_function("split_64_fields", |b| {
        b.iter(|| {
            black_box(&joined)
                .split(std::slice::from_ref(&sep), SplitOptions::empty())
                .unwrap()
        })
    });
    group.finish();
}

fn bench_compare_hash(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(99);
    let a = random_ascii(&mut rng, 2048);
    let b_str = a.substring_range(0, a.len()).unwrap().concat(&BiStr::from("x")).unwrap();

    let mut group = c.benchmark_group("compare_hash");
    group.bench_function("compare_equal_prefix_2k", |bench| {
        bench.iter(|| bistr::compare_ordinal(black_box(&a), black_box(&b_str)))
    });
    group.bench_function("hash_code_2k", |bench| {
        bench.iter(|| black_box(&a).hash_code())
    });
    group.bench_function("hash_code_ignore_case_2k", |bench| {
        bench.iter(|| black_box(&a).hash_code_ignore_case())
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_search,
    bench_mutate,
    bench_split_join,
    bench_compare_hash
);
criterion_main!(benches);
