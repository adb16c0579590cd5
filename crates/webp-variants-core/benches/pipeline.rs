//! Benchmarks for the per-variant stages of a batch.
//!
//! Run with: cargo bench -p webp-variants-core

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, ImageFormat};
use webp_variants_core::config::{EncodingConfig, ResizeConfig};
use webp_variants_core::pipeline::{ImageDecoder, Resizer, WebpEncoder};

fn benchmark_decode(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.jpg");
    DynamicImage::new_rgb8(1920, 1080)
        .save_with_format(&path, ImageFormat::Jpeg)
        .unwrap();

    c.bench_function("decode_jpeg_1080p", |b| {
        b.iter(|| {
            let _ = ImageDecoder::decode_sync(black_box(&path));
        })
    });
}

fn benchmark_resize(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(1920, 1080);
    let resizer = Resizer::new(ResizeConfig::default());

    c.bench_function("resize_1080p_to_400", |b| {
        b.iter(|| {
            let _ = resizer.resize(black_box(&img), 400);
        })
    });
}

fn benchmark_encode(c: &mut Criterion) {
    let img = DynamicImage::new_rgb8(800, 450);
    let encoder = WebpEncoder::new(EncodingConfig::default());

    c.bench_function("encode_webp_800_q80", |b| {
        b.iter(|| {
            let _ = encoder.encode(black_box(&img), 80);
        })
    });
}

criterion_group!(benches, benchmark_decode, benchmark_resize, benchmark_encode);
criterion_main!(benches);
