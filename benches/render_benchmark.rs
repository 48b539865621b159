use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ditherbot::{minify, render_html, rle_encode, transform, RasterImage};
use std::hint::black_box;

// Generate test images of different sizes
fn generate_gradient(width: usize, height: usize) -> RasterImage {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.push(((x * 255) / width.max(1)) as u8);
            pixels.push(((y * 255) / height.max(1)) as u8);
            pixels.push(128);
            pixels.push(255);
        }
    }
    RasterImage::new(width, height, pixels).unwrap()
}

fn generate_checkerboard(width: usize, height: usize, cell_size: usize) -> RasterImage {
    let mut pixels = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let is_white = ((x / cell_size) + (y / cell_size)) % 2 == 0;
            let color = if is_white { 255 } else { 0 };
            pixels.extend_from_slice(&[color, color, color, 255]);
        }
    }
    RasterImage::new(width, height, pixels).unwrap()
}

fn bench_rle_encode(c: &mut Criterion) {
    let image = generate_checkerboard(200, 200, 8);

    c.bench_function("rle_encode_checkerboard_200x200", |b| {
        b.iter(|| rle_encode(black_box(&image)))
    });
}

fn bench_render_and_minify(c: &mut Criterion) {
    let rle = rle_encode(&generate_checkerboard(200, 200, 8));

    c.bench_function("render_minify_checkerboard_200x200", |b| {
        b.iter(|| minify(&render_html(black_box(&rle), 8)))
    });
}

fn bench_transform_varying_widths(c: &mut Criterion) {
    let source = generate_gradient(400, 300);
    let mut group = c.benchmark_group("transform_varying_widths");

    for width in [24, 48, 96, 192] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &w| {
            b.iter(|| {
                let result = transform(black_box(&source), w, 16);
                assert!(result.is_ok());
                result
            })
        });
    }
    group.finish();
}

fn bench_single_trial(c: &mut Criterion) {
    // One full search trial: transform, encode, render, minify.
    let source = generate_gradient(400, 300);

    c.bench_function("trial_gradient_400x300_at_48", |b| {
        b.iter(|| {
            let quantized = transform(black_box(&source), 48, 16).unwrap();
            minify(&render_html(&rle_encode(&quantized), 8))
        })
    });
}

criterion_group!(
    benches,
    bench_rle_encode,
    bench_render_and_minify,
    bench_transform_varying_widths,
    bench_single_trial
);
criterion_main!(benches);
