use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use img_batcher::batch::{run_batch, NullProgress};
use img_batcher::model::SourceImage;
use img_batcher::probe::DimensionCache;
use img_batcher::sink::BufferSink;
use img_batcher::transform::{transform_image, TargetFormat, TransformSpec};
use std::io::Cursor;

fn test_source(name: &str, width: u32, height: u32, format: ImageFormat) -> SourceImage {
    let img = DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
    let mime = match format {
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Png => "image/png",
        _ => "application/octet-stream",
    };
    SourceImage::new(name, mime, bytes)
}

fn bench_spec_creation(c: &mut Criterion) {
    c.bench_function("spec_creation", |b| {
        b.iter(|| {
            TransformSpec::resize(
                black_box(50),
                black_box(TargetFormat::WebP),
                black_box(Some(85)),
            )
        })
    });
}

fn bench_convert_to_webp(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_to_webp");
    let spec = TransformSpec::convert_only(TargetFormat::WebP, Some(80)).unwrap();

    for (width, height) in [(320u32, 240u32), (800, 600), (1920, 1080)] {
        let source = test_source("bench.jpg", width, height, ImageFormat::Jpeg);

        group.bench_with_input(
            BenchmarkId::new("jpeg", format!("{}x{}", width, height)),
            &source,
            |b, source| {
                b.iter(|| {
                    let mut cache = DimensionCache::new();
                    transform_image(black_box(source), black_box(&spec), &mut cache)
                })
            },
        );
    }

    group.finish();
}

fn bench_resize_half(c: &mut Criterion) {
    let source = test_source("bench.jpg", 1920, 1080, ImageFormat::Jpeg);
    let spec = TransformSpec::resize(50, TargetFormat::WebP, Some(80)).unwrap();

    c.bench_function("resize_half_1080p", |b| {
        b.iter(|| {
            let mut cache = DimensionCache::new();
            transform_image(black_box(&source), black_box(&spec), &mut cache)
        })
    });
}

fn bench_batch_orchestration(c: &mut Criterion) {
    let sources: Vec<_> = (0..10)
        .map(|i| test_source(&format!("img{}.jpg", i), 320, 240, ImageFormat::Jpeg))
        .collect();
    let spec = TransformSpec::convert_only(TargetFormat::WebP, Some(80)).unwrap();

    c.bench_function("batch_ten_images", |b| {
        b.iter(|| {
            let mut sink = BufferSink::new();
            run_batch(
                black_box(&sources),
                black_box(&spec),
                &mut sink,
                &NullProgress,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_spec_creation,
    bench_convert_to_webp,
    bench_resize_half,
    bench_batch_orchestration
);
criterion_main!(benches);
