//! UTF-8 validation benchmarks.
//!
//! Compares the table-driven validators with `std::str::from_utf8` on ASCII,
//! mixed-width text, and random bytes (which fail almost immediately).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tessera_bench::{SIZES, ascii_text, mixed_text, random_bytes};
use tessera_verify::{Utf8Validator, is_valid_utf8, is_valid_utf8_prefix};

// ============================================================================
// Validation Benchmarks
// ============================================================================

fn bench_corpus(c: &mut Criterion, name: &str, corpus: fn(usize) -> Vec<u8>) {
    let mut group = c.benchmark_group(name);

    for size in SIZES {
        group.throughput(Throughput::Bytes(size as u64));
        let data = corpus(size);

        group.bench_with_input(BenchmarkId::new("strict", size), &data, |b, data| {
            b.iter(|| black_box(is_valid_utf8(black_box(data))));
        });

        group.bench_with_input(BenchmarkId::new("prefix", size), &data, |b, data| {
            b.iter(|| black_box(is_valid_utf8_prefix(black_box(data))));
        });

        group.bench_with_input(BenchmarkId::new("std", size), &data, |b, data| {
            b.iter(|| black_box(std::str::from_utf8(black_box(data)).is_ok()));
        });
    }

    group.finish();
}

fn bench_utf8_ascii(c: &mut Criterion) {
    bench_corpus(c, "utf8_ascii", ascii_text);
}

fn bench_utf8_mixed(c: &mut Criterion) {
    bench_corpus(c, "utf8_mixed", mixed_text);
}

fn bench_utf8_random(c: &mut Criterion) {
    bench_corpus(c, "utf8_random", random_bytes);
}

fn bench_utf8_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf8_streaming");

    let data = mixed_text(65536);
    group.throughput(Throughput::Bytes(data.len() as u64));

    // Odd chunk sizes so characters straddle chunk boundaries.
    for chunk in [61, 1021, 16381] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut validator = Utf8Validator::new();
                for part in black_box(&data).chunks(chunk) {
                    let _ = validator.update(part);
                }
                black_box(validator.finish().is_ok());
            });
        });
    }

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    utf8_benches,
    bench_utf8_ascii,
    bench_utf8_mixed,
    bench_utf8_random,
    bench_utf8_streaming
);

criterion_main!(utf8_benches);
