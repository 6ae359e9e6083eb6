use blocklinear::surface::block_linear_layer_size;
use blocklinear::{copy_block_linear_to_pitch, copy_pitch_to_block_linear};
use blocklinear::{BlockDepth, BlockHeight, Dimensions};
use criterion::{criterion_group, criterion_main, Criterion};

use criterion::BenchmarkId;
use criterion::Throughput;

fn copy_block_linear_to_pitch_benchmark(c: &mut Criterion) {
    let block_height = BlockHeight::Sixteen;
    let bytes_per_block = 4;
    // We'll allocate the size needed by the largest run.
    // This avoids including the allocation time in the benchmark.
    let block_linear = vec![
        0u8;
        block_linear_layer_size(
            Dimensions::new_2d(512, 512),
            1,
            1,
            bytes_per_block,
            block_height,
            BlockDepth::One
        )
    ];
    let mut pitch_data = vec![0u8; 512 * 512 * bytes_per_block];

    let mut group = c.benchmark_group("copy_block_linear_to_pitch");
    for size in [64, 128, 256, 320, 448, 512] {
        group.throughput(Throughput::Bytes((size * size * bytes_per_block) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                copy_block_linear_to_pitch(
                    Dimensions::new_2d(size, size),
                    1,
                    1,
                    bytes_per_block,
                    0,
                    block_height,
                    BlockDepth::One,
                    &block_linear,
                    &mut pitch_data,
                )
            });
        });
    }
    group.finish();
}

fn copy_pitch_to_block_linear_benchmark(c: &mut Criterion) {
    let block_height = BlockHeight::Sixteen;
    let bytes_per_block = 4;
    let pitch_data = vec![0u8; 512 * 512 * bytes_per_block];
    let mut block_linear = vec![
        0u8;
        block_linear_layer_size(
            Dimensions::new_2d(512, 512),
            1,
            1,
            bytes_per_block,
            block_height,
            BlockDepth::One
        )
    ];

    let mut group = c.benchmark_group("copy_pitch_to_block_linear");
    for size in [64, 128, 256, 320, 448, 512] {
        group.throughput(Throughput::Bytes((size * size * bytes_per_block) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                copy_pitch_to_block_linear(
                    Dimensions::new_2d(size, size),
                    1,
                    1,
                    bytes_per_block,
                    0,
                    block_height,
                    BlockDepth::One,
                    &pitch_data,
                    &mut block_linear,
                )
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    copy_block_linear_to_pitch_benchmark,
    copy_pitch_to_block_linear_benchmark
);
criterion_main!(benches);
