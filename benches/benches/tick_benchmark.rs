//! Tick and rollup hot-path benchmarks.
//!
//! Run with: `cargo bench --package tickroll-bench`

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tickroll_bench::{EngineFixture, fill_log};
use tickroll_lib::{Granularity, Sample, encode_line, parse_line};

fn tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    // Every 60th tick also appends a minute sample per instrument.
    let mut fixture = EngineFixture::new();
    group.throughput(Throughput::Elements(fixture.engine.catalog().len() as u64));
    group.bench_function("steady_state", |b| {
        b.iter(|| black_box(fixture.engine.tick().unwrap()));
    });

    // A full minute ends with one append per instrument.
    group.throughput(Throughput::Elements(Granularity::Minute.period_ticks()));
    group.bench_function("minute", |b| {
        b.iter_batched(
            EngineFixture::new,
            |mut fixture| {
                black_box(fixture.engine.advance(Granularity::Minute.period_ticks()).unwrap());
                fixture
            },
            BatchSize::PerIteration,
        );
    });

    group.finish();
}

fn rollup_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("rollup");
    let fixture = EngineFixture::new();
    fill_log(fixture.engine.store(), "NOVO", 300);

    for granularity in [Granularity::FifteenMinutes, Granularity::Hour, Granularity::Day] {
        group.bench_with_input(
            BenchmarkId::from_parameter(granularity),
            &granularity,
            |b, granularity| {
                b.iter(|| black_box(fixture.engine.rollup("NOVO", *granularity).unwrap()));
            },
        );
    }

    group.finish();
}

fn codec_benchmark(c: &mut Criterion) {
    let sample = Sample::new(Granularity::FifteenMinutes, 751.525, 753.0, 750.05);
    let line = encode_line(&sample);

    let mut group = c.benchmark_group("codec");
    group.bench_function("encode", |b| b.iter(|| black_box(encode_line(black_box(&sample)))));
    group.bench_function("parse", |b| b.iter(|| black_box(parse_line(black_box(&line)))));
    group.finish();
}

fn trim_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("trim");
    group.sample_size(20);

    for per_granularity in [300usize, 600, 1_200] {
        group.throughput(Throughput::Elements((per_granularity * 4) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(per_granularity),
            &per_granularity,
            |b, &per_granularity| {
                b.iter_batched(
                    || {
                        let fixture = EngineFixture::new();
                        fill_log(fixture.engine.store(), "NOVO", per_granularity);
                        fixture
                    },
                    |fixture| {
                        black_box(fixture.engine.store().trim("NOVO", 300).unwrap());
                        fixture
                    },
                    BatchSize::PerIteration,
                );
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    tick_benchmark,
    rollup_benchmark,
    codec_benchmark,
    trim_benchmark
);
criterion_main!(benches);
