//! Benchmarks for per-frame filter bank throughput.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kalman::{FilterBank, FilterConfig, FrameDesc, FrameFilter};
use rand::prelude::*;

const RESOLUTIONS: &[(usize, usize)] = &[(640, 480), (1920, 1080)];

fn random_frame(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(1);
    (0..len).map(|_| rng.random()).collect()
}

fn bench_steady_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_bank_steady_state");
    for &(width, height) in RESOLUTIONS {
        let len = width * height;
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &len,
            |b, &len| {
                let mut bank = FilterBank::new(FilterConfig::new(100.0, 100.0));
                let source = random_frame(len);
                let mut frame = source.clone();
                bank.process(&mut frame, width, height).unwrap();
                b.iter(|| {
                    frame.copy_from_slice(&source);
                    bank.process(black_box(&mut frame), width, height).unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_reseed(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_bank_reseed");
    for &(width, height) in RESOLUTIONS {
        let len = width * height;
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &len,
            |b, &len| {
                let mut bank = FilterBank::new(FilterConfig::new(100.0, 100.0));
                let mut frame = random_frame(len);
                b.iter(|| {
                    bank.reset();
                    bank.process(black_box(&mut frame), width, height).unwrap()
                });
            },
        );
    }
    group.finish();
}

fn bench_rgb_frame(c: &mut Criterion) {
    let (width, height) = (1920, 1080);
    let desc = FrameDesc::packed(width, height, 3);
    let source = random_frame(desc.required_len());

    c.bench_function("frame_filter_rgb_1920x1080", |b| {
        let mut filter = FrameFilter::<u8>::new(FilterConfig::new(100.0, 100.0));
        let mut frame = source.clone();
        filter.process(&mut frame, desc).unwrap();
        b.iter(|| {
            frame.copy_from_slice(&source);
            filter.process(black_box(&mut frame), desc).unwrap()
        });
    });
}

criterion_group!(benches, bench_steady_state, bench_reseed, bench_rgb_frame);
criterion_main!(benches);
