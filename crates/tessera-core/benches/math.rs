//! Benchmarks for the tessellation math helpers.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tessera_core::math::{Vec2, cubic_bezier, line_intersection, rotate_around, signed_area};

fn bench_bezier_sampling(c: &mut Criterion) {
    c.bench_function("cubic_bezier_100_samples", |b| {
        b.iter(|| {
            let mut acc = Vec2::ZERO;
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                acc += cubic_bezier(
                    black_box(Vec2::ZERO),
                    black_box(Vec2::new(10.0, 50.0)),
                    black_box(Vec2::new(90.0, 50.0)),
                    black_box(Vec2::new(100.0, 0.0)),
                    t,
                );
            }
            acc
        });
    });
}

fn bench_intersections(c: &mut Criterion) {
    c.bench_function("line_intersection", |b| {
        b.iter(|| {
            line_intersection(
                black_box(Vec2::new(0.0, 0.0)),
                black_box(Vec2::new(10.0, 1.0)),
                black_box(Vec2::new(5.0, -5.0)),
                black_box(Vec2::new(6.0, 5.0)),
            )
        });
    });
}

fn bench_ring_ops(c: &mut Criterion) {
    let ring: Vec<Vec2> = (0..64)
        .map(|i| Vec2::from_angle(i as f32 / 64.0 * std::f32::consts::TAU) * 50.0)
        .collect();

    c.bench_function("signed_area_64", |b| b.iter(|| signed_area(black_box(&ring))));
    c.bench_function("rotate_ring_64", |b| {
        b.iter(|| {
            ring.iter()
                .map(|p| rotate_around(*p, Vec2::ZERO, black_box(33.0)))
                .collect::<Vec<_>>()
        });
    });
}

criterion_group!(benches, bench_bezier_sampling, bench_intersections, bench_ring_ops);
criterion_main!(benches);
