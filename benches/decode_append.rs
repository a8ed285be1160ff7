//! Benchmarks for line decoding and series accumulation
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use doseview::decoder::decode;
use doseview::types::{DoseSeries, Sample};

fn sample_for(i: u64) -> Sample {
    Sample {
        time_ms: 2000 * i,
        count: i as i64,
        cpm: 2.0,
        dose: 0.05 + (i as f64).sin() * 0.01,
        dose_error: 0.01,
    }
}

fn bench_line_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_decoding");
    group.throughput(Throughput::Elements(1));

    group.bench_function("data_row", |b| {
        b.iter(|| black_box(decode(black_box("123456,17,34.0,0.408,0.099"))));
    });

    group.bench_function("header_row", |b| {
        b.iter(|| black_box(decode(black_box("time(ms),count,cpm,uSv/h,uSv/hError"))));
    });

    group.bench_function("malformed_row", |b| {
        b.iter(|| black_box(decode(black_box("123456,17,34.0,##garbage##,0.099"))));
    });

    group.finish();
}

fn bench_series_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("series_append");

    for size in [1000, 10_000, 100_000].iter() {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("append", size), size, |b, &size| {
            let mut series = DoseSeries::new();
            for i in 0..size as u64 {
                series.append(&sample_for(i));
            }
            let mut i = size as u64;
            b.iter(|| {
                series.append(black_box(&sample_for(i)));
                i = i.wrapping_add(1);
            });
        });
    }

    group.finish();
}

fn bench_plot_points_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("plot_points_conversion");

    for size in [1000, 10_000, 50_000].iter() {
        let mut series = DoseSeries::new();
        for i in 0..*size as u64 {
            series.append(&sample_for(i));
        }

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("dose_points", size), &series, |b, series| {
            b.iter(|| black_box(series.dose_points()));
        });
        group.bench_with_input(BenchmarkId::new("band_points", size), &series, |b, series| {
            b.iter(|| black_box(series.band_points()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_line_decoding,
    bench_series_append,
    bench_plot_points_conversion,
);

criterion_main!(benches);
