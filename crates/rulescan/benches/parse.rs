//! Benchmark – `rulescan::JsonParser` against `serde_json`
#![allow(missing_docs)]

use std::{fmt::Write, hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rulescan::JsonParser;

/// A deterministic array of `records` small objects mixing every token kind.
fn make_records(records: usize) -> String {
    let mut s = String::from("[");
    for i in 0..records {
        if i > 0 {
            s.push_str(",\n  ");
        }
        write!(
            s,
            r#"{{"id": {i}, "name": "item é{i}", "ratio": {}.5e-1, "tags": ["a", "b"], "ok": {}, "parent": null}}"#,
            i % 97,
            i % 2 == 0
        )
        .unwrap();
    }
    s.push(']');
    s
}

/// A single string of `len` characters with an escape every 16 bytes.
fn make_long_string(len: usize) -> String {
    let mut s = String::with_capacity(len + 2);
    s.push('"');
    for i in 0..len {
        s.push_str(if i % 16 == 0 { "\\n" } else { "x" });
    }
    s.push('"');
    s
}

fn bench_parse(c: &mut Criterion) {
    let parser = JsonParser::default();
    let mut group = c.benchmark_group("parse");

    for &records in &[10usize, 100, 1_000] {
        let payload = make_records(records);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("rulescan", records), &payload, |b, p| {
            b.iter(|| black_box(parser.parse(black_box(p)).unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("serde_json", records), &payload, |b, p| {
            b.iter(|| black_box(serde_json::from_str::<serde_json::Value>(black_box(p)).unwrap()));
        });
    }

    let payload = make_long_string(10_000);
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("rulescan/long_string", |b| {
        b.iter(|| black_box(parser.parse(black_box(&payload)).unwrap()));
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(5))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_parse }
criterion_main!(benches);
