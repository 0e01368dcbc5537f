use crate::algorithms::area::SignedAreas;
use crate::algorithms::hit_test::hit_test_path;
use crate::math::{point, rect, Box2D, Point};
use crate::path::{FillRule, Path, Winding};
use crate::{ClipError, ClipOp, ClipOptions, PathClipper};

use std::vec::Vec;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn polygon(points: &[(f32, f32)]) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(points[0].0, points[0].1));
    for &(x, y) in &points[1..] {
        builder.line_to(point(x, y));
    }
    builder.close();
    builder.build()
}

fn rectangle(x0: f32, y0: f32, x1: f32, y1: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_rectangle(&rect(x0, y0, x1, y1), Winding::Positive);
    builder.build()
}

fn no_fast_paths() -> ClipOptions {
    ClipOptions::DEFAULT.with_fast_paths(false)
}

fn is_in(path: &Path, p: &Point) -> bool {
    hit_test_path(p, path, path.fill_rule())
}

// Samples a grid over `bounds` and checks that the fill of `result` matches `expected`.
// The sample offsets are chosen to stay away from the axis-aligned and diagonal edges
// used in these tests.
fn check_fill(result: &Path, bounds: Box2D, expected: &dyn Fn(&Point) -> bool) {
    let steps = 40;
    let w = bounds.max.x - bounds.min.x;
    let h = bounds.max.y - bounds.min.y;
    for j in 0..steps {
        for i in 0..steps {
            let p = point(
                bounds.min.x + (i as f32 + 0.37) * w / steps as f32,
                bounds.min.y + (j as f32 + 0.61) * h / steps as f32,
            );
            assert_eq!(
                is_in(result, &p),
                expected(&p),
                "wrong fill at {:?} for {:?}",
                p,
                result
            );
        }
    }
}

fn check_op(subject: &Path, clip: &Path, op: ClipOp, options: &ClipOptions) -> Path {
    init_logging();

    let mut clipper = PathClipper::new();
    let result = clipper.clip(subject, clip, op, options).unwrap();

    let bounds = rect(-1.0, -1.0, 5.0, 5.0);
    check_fill(&result, bounds, &|p| {
        op.combine(is_in(subject, p), is_in(clip, p))
    });

    result
}

fn total_area(path: &Path) -> f32 {
    SignedAreas(path.iter()).map(f32::abs).sum()
}

fn assert_approx_eq(a: f32, b: f32) {
    assert!((a - b).abs() < 1e-5, "{} != {}", a, b);
}

#[test]
fn overlapping_squares() {
    let a = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let b = polygon(&[(0.5, 0.5), (1.5, 0.5), (1.5, 1.5), (0.5, 1.5)]);

    for options in &[ClipOptions::DEFAULT, no_fast_paths()] {
        let and = check_op(&a, &b, ClipOp::And, options);
        assert_eq!(and.num_sub_paths(), 1);
        assert_approx_eq(total_area(&and), 0.25);

        let or = check_op(&a, &b, ClipOp::Or, options);
        assert_eq!(or.num_sub_paths(), 1);
        assert_approx_eq(total_area(&or), 1.75);
        assert_eq!(or.fill_rule(), FillRule::EvenOdd);

        let sub = check_op(&a, &b, ClipOp::Sub, options);
        assert_eq!(sub.num_sub_paths(), 1);
        assert_approx_eq(total_area(&sub), 0.75);
    }
}

#[test]
fn nested_squares() {
    let outer = rectangle(0.0, 0.0, 4.0, 4.0);
    let inner = polygon(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)]);

    for options in &[ClipOptions::DEFAULT, no_fast_paths()] {
        let frame = check_op(&outer, &inner, ClipOp::Sub, options);
        assert_eq!(frame.num_sub_paths(), 2);

        let and = check_op(&outer, &inner, ClipOp::And, options);
        assert_approx_eq(total_area(&and), 4.0);

        let or = check_op(&outer, &inner, ClipOp::Or, options);
        assert_approx_eq(total_area(&or), 16.0);

        let empty = check_op(&inner, &outer, ClipOp::Sub, options);
        assert!(empty.is_empty());
    }
}

#[test]
fn bowtie() {
    let even_odd = polygon(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)]);
    let non_zero = even_odd.clone().with_fill_rule(FillRule::NonZero);

    for path in &[even_odd, non_zero] {
        let result = check_op(path, &Path::new(), ClipOp::Simplify, &ClipOptions::DEFAULT);
        assert_eq!(result.num_sub_paths(), 2);
        assert_eq!(result.fill_rule(), FillRule::EvenOdd);
        assert_approx_eq(total_area(&result), 8.0);
    }
}

#[test]
fn double_wound_square() {
    let points = [
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
        (0.0, 0.0),
        (1.0, 0.0),
        (1.0, 1.0),
        (0.0, 1.0),
    ];
    let even_odd = polygon(&points);
    let non_zero = even_odd.clone().with_fill_rule(FillRule::NonZero);

    let mut clipper = PathClipper::new();

    let result = clipper.simplify(&even_odd, &ClipOptions::DEFAULT).unwrap();
    assert!(result.is_empty());

    let result = clipper.simplify(&non_zero, &ClipOptions::DEFAULT).unwrap();
    assert_eq!(result.num_sub_paths(), 1);
    assert_approx_eq(total_area(&result), 1.0);
}

#[test]
fn simplify_keeps_simple_polygons() {
    let square = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);

    let result = PathClipper::new()
        .simplify(&square, &ClipOptions::DEFAULT)
        .unwrap();

    assert_eq!(result, square);
}

#[test]
fn disjoint_squares() {
    let a = rectangle(0.0, 0.0, 1.0, 1.0);
    let b = rectangle(3.0, 3.0, 4.0, 4.0);

    for options in &[ClipOptions::DEFAULT, no_fast_paths()] {
        let or = check_op(&a, &b, ClipOp::Or, options);
        assert_eq!(or.num_sub_paths(), 2);

        let and = check_op(&a, &b, ClipOp::And, options);
        assert!(and.is_empty());

        let sub = check_op(&a, &b, ClipOp::Sub, options);
        assert_eq!(sub.num_sub_paths(), 1);
    }

    // The fast path returns the inputs unchanged.
    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;
    assert_eq!(clipper.clip(&a, &b, ClipOp::Sub, &options).unwrap(), a);
    assert_eq!(
        clipper.clip(&a, &b, ClipOp::Or, &options).unwrap(),
        a.concatenated(&b)
    );
}

#[test]
fn disjoint_union_with_different_fill_rules() {
    // Winds twice around its center.
    let a = polygon(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
        (0.0, 0.0),
        (2.0, 0.0),
        (2.0, 2.0),
        (0.0, 2.0),
    ])
    .with_fill_rule(FillRule::NonZero);
    let b = rectangle(3.0, 3.0, 4.0, 4.0);

    let result = check_op(&a, &b, ClipOp::Or, &ClipOptions::DEFAULT);
    assert_eq!(result.fill_rule(), FillRule::EvenOdd);
    assert_eq!(result.num_sub_paths(), 2);
}

#[test]
fn identical_operands() {
    let a = polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;

    assert!(clipper.clip(&a, &a, ClipOp::Sub, &options).unwrap().is_empty());
    assert_eq!(clipper.clip(&a, &a, ClipOp::And, &options).unwrap(), a);
    assert_eq!(clipper.clip(&a, &a, ClipOp::Or, &options).unwrap(), a);

    for &op in &[ClipOp::And, ClipOp::Or, ClipOp::Sub] {
        check_op(&a, &a, op, &no_fast_paths());
    }
}

#[test]
fn squares_sharing_an_edge() {
    let a = polygon(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let b = polygon(&[(1.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0)]);

    let or = check_op(&a, &b, ClipOp::Or, &no_fast_paths());
    assert_eq!(or.num_sub_paths(), 1);
    assert_approx_eq(total_area(&or), 2.0);

    let and = check_op(&a, &b, ClipOp::And, &no_fast_paths());
    assert!(and.is_empty());

    let sub = check_op(&a, &b, ClipOp::Sub, &no_fast_paths());
    assert_approx_eq(total_area(&sub), 1.0);
}

#[test]
fn triangles() {
    let a = polygon(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]);
    let b = polygon(&[(0.0, 3.0), (2.0, 0.5), (4.0, 3.0)]);

    for &op in &[ClipOp::And, ClipOp::Or, ClipOp::Sub] {
        check_op(&a, &b, op, &ClipOptions::DEFAULT);
        check_op(&b, &a, op, &ClipOptions::DEFAULT);
    }
}

#[test]
fn operand_order_does_not_matter() {
    // Several edges meet at (2, 3) in the mesh.
    let a = polygon(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]);
    let b = polygon(&[(0.0, 3.0), (2.0, 0.5), (4.0, 3.0)]);
    let options = no_fast_paths();

    let ab = check_op(&a, &b, ClipOp::And, &options);
    let ba = check_op(&b, &a, ClipOp::And, &options);
    let intersection = total_area(&ab);
    assert!((intersection - total_area(&ba)).abs() < 1e-4);
    assert!(intersection > 2.0 && intersection < 2.5, "{}", intersection);

    // area(a) = 6, area(b) = 5.
    for union in &[
        check_op(&a, &b, ClipOp::Or, &options),
        check_op(&b, &a, ClipOp::Or, &options),
    ] {
        assert!((total_area(union) - (11.0 - intersection)).abs() < 1e-4);
    }

    let a_minus_b = check_op(&a, &b, ClipOp::Sub, &options);
    assert!((total_area(&a_minus_b) - (6.0 - intersection)).abs() < 1e-4);
}

#[test]
fn non_zero_operands() {
    // Two overlapping squares in a single non-zero path, both positively wound.
    let mut builder = Path::builder();
    builder.set_fill_rule(FillRule::NonZero);
    builder.add_rectangle(&rect(0.0, 0.0, 2.0, 2.0), Winding::Positive);
    builder.add_rectangle(&rect(1.0, 1.0, 3.0, 3.0), Winding::Positive);
    let a = builder.build();

    let b = polygon(&[(0.5, 2.5), (2.5, 0.5), (3.5, 3.5)]);

    for &op in &[ClipOp::And, ClipOp::Or, ClipOp::Sub] {
        check_op(&a, &b, op, &ClipOptions::DEFAULT);
        check_op(&b, &a, op, &ClipOptions::DEFAULT);
    }

    let simplified = check_op(&a, &Path::new(), ClipOp::Simplify, &ClipOptions::DEFAULT);
    assert_eq!(simplified.num_sub_paths(), 1);
    assert_approx_eq(total_area(&simplified), 7.0);
}

#[test]
fn rectangle_fast_paths() {
    let big = rectangle(0.0, 0.0, 4.0, 4.0);
    let small = rectangle(1.0, 1.0, 2.0, 3.0);
    let triangle = polygon(&[(1.0, 1.0), (3.0, 1.0), (2.0, 3.0)]);
    let non_zero_triangle = triangle.clone().with_fill_rule(FillRule::NonZero);
    let overlapping = rectangle(2.0, 2.0, 5.0, 3.0);

    let pairs = [
        (&big, &small),
        (&small, &big),
        (&big, &triangle),
        (&triangle, &big),
        (&big, &non_zero_triangle),
        (&big, &overlapping),
        (&small, &overlapping),
    ];

    for &(a, b) in &pairs {
        for &op in &[ClipOp::And, ClipOp::Or, ClipOp::Sub] {
            check_op(a, b, op, &ClipOptions::DEFAULT);
            check_op(a, b, op, &no_fast_paths());
        }
    }

    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;
    assert_eq!(clipper.clip(&big, &triangle, ClipOp::And, &options).unwrap(), triangle);
    assert_eq!(clipper.clip(&triangle, &big, ClipOp::Or, &options).unwrap(), big);
    assert_eq!(
        clipper.clip(&big, &overlapping, ClipOp::And, &options).unwrap(),
        rectangle(2.0, 2.0, 4.0, 3.0)
    );
}

#[test]
fn queries() {
    let outer = rectangle(0.0, 0.0, 4.0, 4.0);
    let inner = polygon(&[(1.0, 1.0), (3.0, 1.0), (2.0, 3.0)]);
    let overlapping = polygon(&[(3.0, 3.0), (5.0, 3.0), (4.0, 5.0)]);
    let touching = rectangle(4.0, 0.0, 5.0, 1.0);
    let far = rectangle(10.0, 10.0, 11.0, 11.0);

    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;

    assert!(clipper.contains(&outer, &inner, &options).unwrap());
    assert!(clipper.intersects(&outer, &inner, &options).unwrap());
    assert!(clipper.intersects(&inner, &outer, &options).unwrap());
    assert!(!clipper.contains(&inner, &outer, &options).unwrap());

    assert!(clipper.intersects(&outer, &overlapping, &options).unwrap());
    assert!(!clipper.contains(&outer, &overlapping, &options).unwrap());

    assert!(clipper.intersects(&outer, &touching, &options).unwrap());
    assert!(!clipper.contains(&outer, &touching, &options).unwrap());

    assert!(!clipper.intersects(&outer, &far, &options).unwrap());
    assert!(!clipper.contains(&outer, &far, &options).unwrap());

    assert!(clipper.contains(&outer, &outer, &options).unwrap());
    assert!(clipper.intersects(&outer, &outer, &options).unwrap());
}

#[test]
fn queries_without_boundary_contact() {
    // Same bounding box, no overlap.
    let a = polygon(&[(0.0, 0.0), (4.0, 0.0), (0.0, 4.0)]);
    let b = polygon(&[(4.0, 4.0), (4.0, 1.0), (1.0, 4.0)]);

    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;
    assert!(!clipper.intersects(&a, &b, &options).unwrap());
    assert!(!clipper.contains(&a, &b, &options).unwrap());

    // A square with a hole, and a shape inside of the hole.
    let mut builder = Path::builder();
    builder.add_rectangle(&rect(0.0, 0.0, 6.0, 6.0), Winding::Positive);
    builder.add_rectangle(&rect(1.0, 1.0, 5.0, 5.0), Winding::Positive);
    let frame = builder.build();
    let island = polygon(&[(2.0, 2.0), (4.0, 2.0), (3.0, 4.0)]);

    assert!(!clipper.intersects(&frame, &island, &options).unwrap());
    assert!(!clipper.contains(&frame, &island, &options).unwrap());

    let filled = frame.clone().with_fill_rule(FillRule::NonZero);
    assert!(clipper.intersects(&filled, &island, &options).unwrap());
    assert!(clipper.contains(&filled, &island, &options).unwrap());
}

#[test]
fn non_finite_coordinates() {
    let square = rectangle(0.0, 0.0, 1.0, 1.0);
    let broken = polygon(&[(0.0, 0.0), (f32::INFINITY, 0.0), (1.0, 1.0)]);

    let mut clipper = PathClipper::new();
    let options = ClipOptions::DEFAULT;
    assert_eq!(
        clipper.clip(&square, &broken, ClipOp::Or, &options),
        Err(ClipError::NonFiniteCoordinate)
    );
    assert_eq!(
        clipper.clip(&broken, &square, ClipOp::Simplify, &options),
        Err(ClipError::NonFiniteCoordinate)
    );
    assert_eq!(
        clipper.intersects(&square, &broken, &options),
        Err(ClipError::NonFiniteCoordinate)
    );
}

#[test]
fn open_sub_paths_are_closed() {
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(2.0, 0.0));
    builder.line_to(point(2.0, 2.0));
    builder.line_to(point(0.0, 2.0));
    builder.end(false);
    let open = builder.build();

    let closed = rectangle(1.0, 1.0, 3.0, 3.0);

    for &op in &[ClipOp::And, ClipOp::Or, ClipOp::Sub] {
        check_op(&open, &closed, op, &no_fast_paths());
    }
}

#[test]
fn degenerate_input() {
    // All points on a line.
    let flat = polygon(&[(0.0, 1.0), (2.0, 1.0), (4.0, 1.0)]);
    let square = rectangle(0.0, 0.0, 2.0, 2.0);

    let result = check_op(&flat, &Path::new(), ClipOp::Simplify, &ClipOptions::DEFAULT);
    assert!(result.is_empty());

    let result = check_op(&square, &flat, ClipOp::Or, &no_fast_paths());
    assert_approx_eq(total_area(&result), 4.0);
}

#[test]
fn logging() {
    init_logging();

    let a = polygon(&[(0.0, 0.0), (2.0, 0.0), (1.0, 2.0)]);
    let b = polygon(&[(0.0, 1.0), (2.0, 1.0), (1.0, 3.0)]);

    let mut clipper = PathClipper::new();
    clipper.set_logging(true);
    let result = clipper.clip(&a, &b, ClipOp::And, &ClipOptions::DEFAULT).unwrap();
    clipper.set_logging(false);
    let quiet = clipper.clip(&a, &b, ClipOp::And, &ClipOptions::DEFAULT).unwrap();

    assert_eq!(result, quiet);
}

#[test]
fn segment_tree_parameters() {
    // Enough edges to build a non-trivial segment tree.
    let mut star = Vec::new();
    for i in 0..40 {
        let angle = i as f32 * core::f32::consts::PI * 2.0 / 40.0;
        let radius = if i % 2 == 0 { 2.0 } else { 1.1 };
        star.push((2.0 + radius * angle.cos(), 2.0 + radius * angle.sin()));
    }
    let star = polygon(&star);
    let square = rectangle(0.5, 0.5, 2.5, 2.5);

    let mut clipper = PathClipper::new();
    for &(depth, leaf) in &[(0, 10), (24, 1), (3, 2)] {
        let options = ClipOptions::DEFAULT
            .with_segment_tree_max_depth(depth)
            .with_segment_tree_leaf_size(leaf);
        let result = clipper.clip(&star, &square, ClipOp::Sub, &options).unwrap();
        check_fill(&result, rect(-1.0, -1.0, 5.0, 5.0), &|p| {
            is_in(&star, p) && !is_in(&square, p)
        });
    }
}
