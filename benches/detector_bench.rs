use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use content_forensics::pixel::PixelBuffer;
use content_forensics::{AnalyzeRequest, ContentDetector};

fn sample_text() -> String {
    "Furthermore, a comprehensive review can revolutionize workflows and unlock the potential \
     of robust, cutting-edge systems. It is worth noting that substantial gains follow. "
        .repeat(20)
}

fn sample_buffer() -> PixelBuffer {
    let (width, height) = (1024u32, 768u32);
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    let mut state = 0x1234_5678u32;
    for _ in 0..width * height {
        state = state.wrapping_mul(1664525).wrapping_add(1013904223);
        let v = (state >> 24) as u8;
        data.extend_from_slice(&[v, v.wrapping_add(7), v.wrapping_add(13), 255]);
    }
    PixelBuffer::new(width, height, data).unwrap()
}

fn bench_text(c: &mut Criterion) {
    let detector = ContentDetector::new();
    let text = sample_text();
    c.bench_function("analyze_text", |b| {
        b.iter(|| detector.analyze_text(black_box(&text)))
    });
}

fn bench_image(c: &mut Criterion) {
    let detector = ContentDetector::new();
    let buffer = sample_buffer();
    c.bench_function("analyze_image", |b| {
        b.iter(|| detector.analyze_image(black_box(&buffer)))
    });
}

fn bench_combined(c: &mut Criterion) {
    let detector = ContentDetector::new();
    let text = sample_text();
    let buffer = sample_buffer();
    c.bench_function("analyze_combined", |b| {
        b.iter(|| {
            detector.analyze(black_box(AnalyzeRequest {
                text: Some(&text),
                image: Some(&buffer),
            }))
        })
    });
}

criterion_group!(benches, bench_text, bench_image, bench_combined);
criterion_main!(benches);
