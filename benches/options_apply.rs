//! Benchmarks for request assembly.
//!
//! Measures plain option application against validated application, which
//! runs the inner options twice and parses every source.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spiff_request::options::{self, get_request, RequestOption};

const SCHEMA: &str = "type: object\nrequired: [name]\nproperties:\n  name:\n    type: string\n";

fn stub_options(count: usize) -> Vec<RequestOption> {
    (0..count)
        .map(|i| options::stub_data(format!("stub-{}", i), format!("name: s{}\nindex: {}\n", i, i)))
        .collect()
}

fn bench_plain(c: &mut Criterion) {
    let mut group = c.benchmark_group("plain_options");
    for count in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| get_request(black_box(stub_options(count))).unwrap())
        });
    }
    group.finish();
}

fn bench_validated(c: &mut Criterion) {
    let mut group = c.benchmark_group("validated_options");
    for count in [1, 10, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                get_request([options::validated(SCHEMA, black_box(stub_options(count)))]).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_plain, bench_validated);
criterion_main!(benches);
