#[macro_use]
extern crate criterion;

use boolpath::clip::{ClipOp, ClipOptions, PathClipper};
use boolpath::math::{point, rect};
use boolpath::path::FillRule;
use boolpath_tests::{random_path, star};
use criterion::Criterion;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn stars(bench: &mut Criterion) {
    let first = star(point(0.0, 0.0), 50, 80.0, 100.0);
    let second = star(point(30.0, 20.0), 40, 60.0, 110.0);
    let mut clipper = PathClipper::new();

    for &(name, op) in &[
        ("stars union", ClipOp::Or),
        ("stars intersection", ClipOp::And),
        ("stars difference", ClipOp::Sub),
    ] {
        bench.bench_function(name, |b| {
            b.iter(|| {
                let result = clipper.clip(&first, &second, op, &ClipOptions::DEFAULT).unwrap();
                criterion::black_box(result);
            })
        });
    }
}

fn self_intersecting(bench: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let path = random_path(&mut rng, &rect(0.0, 0.0, 1000.0, 1000.0), 4, 30, FillRule::NonZero);
    let mut clipper = PathClipper::new();

    bench.bench_function("simplify random path", |b| {
        b.iter(|| {
            let result = clipper.simplify(&path, &ClipOptions::DEFAULT).unwrap();
            criterion::black_box(result);
        })
    });
}

fn queries(bench: &mut Criterion) {
    let outer = star(point(0.0, 0.0), 50, 80.0, 100.0);
    let inner = star(point(0.0, 0.0), 20, 30.0, 50.0);
    let mut clipper = PathClipper::new();

    bench.bench_function("contains", |b| {
        b.iter(|| {
            criterion::black_box(clipper.contains(&outer, &inner, &ClipOptions::DEFAULT).unwrap());
        })
    });
}

criterion_group!(clipping, stars, self_intersecting, queries);
criterion_main!(clipping);
