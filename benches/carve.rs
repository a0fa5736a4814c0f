use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use seamshift::{calculate_energy, PixelBuffer, Retargeter, SeamCarver, SeamFinder};
use std::hint::black_box;

fn synthetic(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[(x ^ y) as u8, (x * 3 + y) as u8, (y * 7) as u8, 255]);
        }
    }
    PixelBuffer::from_raw(width, height, data).unwrap()
}

fn carve_benchmark(c: &mut Criterion) {
    let image = synthetic(320, 240);
    let energy = calculate_energy(&image);

    c.bench_function("energy 320x240", |b| b.iter(|| calculate_energy(black_box(&image))));
    c.bench_function("vertical seam 320x240", |b| {
        b.iter(|| black_box(&energy).find_vertical_seam())
    });
    c.bench_function("shrink one column 320x240", |b| {
        b.iter_batched(
            || SeamCarver::new(&image),
            |mut carver| carver.shrink_horizontal(1).unwrap(),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, carve_benchmark);
criterion_main!(benches);
