use crate::{check_fill, random_path, star};
use boolpath::clip::{ClipOp, ClipOptions, PathClipper};
use boolpath::math::{point, rect, Box2D};
use boolpath::path::{FillRule, Path};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OPS: [ClipOp; 3] = [ClipOp::And, ClipOp::Or, ClipOp::Sub];

fn random_fill_rule<R: Rng>(rng: &mut R) -> FillRule {
    if rng.gen() {
        FillRule::EvenOdd
    } else {
        FillRule::NonZero
    }
}

fn check_clip(
    clipper: &mut PathClipper,
    subject: &Path,
    clip: &Path,
    op: ClipOp,
    options: &ClipOptions,
    bounds: &Box2D,
) {
    let result = clipper.clip(subject, clip, op, options).unwrap();
    if let Err(mismatch) = check_fill(&result, subject, clip, op, bounds, 32, 1e-3) {
        panic!(
            "{:?} with {:?}\n subject: {:?}\n clip: {:?}\n result: {:?}\n mismatch: {:?}",
            op, options, subject, clip, result, mismatch
        );
    }
}

#[test]
fn random_polygons() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut clipper = PathClipper::new();
    let shapes = rect(0.0, 0.0, 10.0, 10.0);
    let bounds = rect(-1.0, -1.0, 11.0, 11.0);

    for _ in 0..200 {
        let num_sub_paths = rng.gen_range(1..=2);
        let fill_rule = random_fill_rule(&mut rng);
        let subject = random_path(&mut rng, &shapes, num_sub_paths, 6, fill_rule);
        let num_sub_paths = rng.gen_range(1..=2);
        let fill_rule = random_fill_rule(&mut rng);
        let clip = random_path(&mut rng, &shapes, num_sub_paths, 6, fill_rule);

        for &op in &OPS {
            check_clip(&mut clipper, &subject, &clip, op, &ClipOptions::DEFAULT, &bounds);
        }
    }
}

#[test]
fn random_simplification() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut clipper = PathClipper::new();
    let shapes = rect(0.0, 0.0, 10.0, 10.0);
    let bounds = rect(-1.0, -1.0, 11.0, 11.0);
    let options = ClipOptions::DEFAULT;

    for _ in 0..200 {
        let fill_rule = random_fill_rule(&mut rng);
        let path = random_path(&mut rng, &shapes, 1, 10, fill_rule);

        let result = clipper.simplify(&path, &options).unwrap();
        assert_eq!(result.fill_rule(), FillRule::EvenOdd);
        if let Err(mismatch) = check_fill(&result, &path, &Path::new(), ClipOp::Simplify, &bounds, 32, 1e-3) {
            panic!("{:?}\n result: {:?}\n mismatch: {:?}", path, result, mismatch);
        }

        // Simplifying is idempotent.
        let again = clipper.simplify(&result, &options).unwrap();
        if let Err(mismatch) = check_fill(&again, &result, &Path::new(), ClipOp::Simplify, &bounds, 32, 1e-3) {
            panic!("{:?}\n result: {:?}\n mismatch: {:?}", result, again, mismatch);
        }
    }
}

#[test]
fn fast_paths_agree_with_the_general_case() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut clipper = PathClipper::new();
    let bounds = rect(-1.0, -1.0, 11.0, 11.0);
    let without_fast_paths = ClipOptions::DEFAULT.with_fast_paths(false);

    for _ in 0..100 {
        // Axis-aligned rectangles often trigger the fast paths.
        let mut builder = Path::builder();
        let x0 = rng.gen_range(0.0..5.0);
        let y0 = rng.gen_range(0.0..5.0);
        builder.add_rectangle(
            &rect(x0, y0, x0 + rng.gen_range(0.5..5.0), y0 + rng.gen_range(0.5..5.0)),
            boolpath::path::Winding::Positive,
        );
        let rectangle = builder.build();

        let fill_rule = random_fill_rule(&mut rng);
        let other = random_path(&mut rng, &rect(2.0, 2.0, 8.0, 8.0), 1, 5, fill_rule);

        for &op in &OPS {
            for options in &[ClipOptions::DEFAULT, without_fast_paths] {
                check_clip(&mut clipper, &rectangle, &other, op, options, &bounds);
                check_clip(&mut clipper, &other, &rectangle, op, options, &bounds);
            }
        }
    }
}

#[test]
fn overlapping_stars() {
    let mut clipper = PathClipper::new();
    let bounds = rect(-1.0, -1.0, 11.0, 11.0);

    let a = star(point(4.0, 4.0), 7, 1.5, 3.5);
    for i in 0..10 {
        let offset = i as f32 * 0.2;
        let b = star(point(5.0 + offset, 5.0 - offset * 0.5), 5, 1.2, 4.0);
        for &op in &OPS {
            check_clip(&mut clipper, &a, &b, op, &ClipOptions::DEFAULT, &bounds);
        }

        assert!(clipper.intersects(&a, &b, &ClipOptions::DEFAULT).unwrap());
    }
}

#[test]
fn queries_match_clipping() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;

    for _ in 0..200 {
        let a = random_path(&mut rng, &rect(0.0, 0.0, 10.0, 10.0), 1, 5, FillRule::EvenOdd);
        let b = random_path(&mut rng, &rect(4.0, 4.0, 14.0, 14.0), 1, 5, FillRule::EvenOdd);

        let intersects = clipper.intersects(&a, &b, &options).unwrap();
        let intersection = clipper.clip(&a, &b, ClipOp::And, &options).unwrap();
        // A non-empty intersection implies that the shapes intersect. The converse does not
        // hold since touching shapes intersect with an empty intersection.
        if !intersection.is_empty() {
            assert!(intersects, "{:?} {:?} {:?}", a, b, intersection);
        }

        if clipper.contains(&a, &b, &options).unwrap() {
            assert!(intersects);
            let difference = clipper.clip(&b, &a, ClipOp::Sub, &options).unwrap();
            assert!(difference.is_empty(), "{:?} {:?} {:?}", a, b, difference);
        }
    }
}
