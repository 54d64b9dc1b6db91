use criterion::{criterion_group, criterion_main, Criterion};
use sbx::world::{PlockBox, PlockId};
use std::hint::black_box;

fn filled_box(width: u16, height: u16) -> PlockBox {
    let mut plock_box = PlockBox::create();
    plock_box.init(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            plock_box
                .set_plock_id(x, y, PlockId(y as u32 * width as u32 + x as u32 + 1))
                .unwrap();
        }
    }
    plock_box
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("box_resize");

    group.bench_function("grow_256_to_512", |b| {
        b.iter_batched(
            || filled_box(256, 256),
            |mut plock_box| {
                plock_box.set_size(black_box(512), black_box(512)).unwrap();
                plock_box
            },
            criterion::BatchSize::LargeInput,
        )
    });

    group.bench_function("shrink_512_to_128", |b| {
        b.iter_batched(
            || filled_box(512, 512),
            |mut plock_box| {
                plock_box.set_size(black_box(128), black_box(128)).unwrap();
                plock_box
            },
            criterion::BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_resize);
criterion_main!(benches);
