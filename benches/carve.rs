#[macro_use]
extern crate criterion;

use criterion::Criterion;
use image::{ImageBuffer, Rgb, RgbImage};
use seamcarve::{ProtectionMask, RgbWeights, SeamsCarver};

fn noisy(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([
            ((x * 7 + y * 13) % 251) as u8,
            ((x * y) % 241) as u8,
            ((x ^ y) % 256) as u8,
        ])
    })
}

fn shrink(c: &mut Criterion) {
    let image = noisy(96, 64);
    let mask = ProtectionMask::new(96, 64);
    c.bench_function("shrink 96x64 by 16", move |b| {
        b.iter(|| {
            SeamsCarver::new(&image, 80, RgbWeights::default(), &mask)
                .map(|carver| carver.into_resized())
        })
    });
}

fn enlarge(c: &mut Criterion) {
    let image = noisy(96, 64);
    let mask = ProtectionMask::new(96, 64);
    c.bench_function("enlarge 96x64 by 16", move |b| {
        b.iter(|| {
            SeamsCarver::new(&image, 112, RgbWeights::default(), &mask)
                .map(|carver| carver.into_resized())
        })
    });
}

criterion_group!(benches, shrink, enlarge);
criterion_main!(benches);
