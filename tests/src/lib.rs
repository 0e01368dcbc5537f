//! Shared helpers for the clipping tests and benchmarks.

use boolpath::algorithms::hit_test::hit_test_path;
use boolpath::clip::ClipOp;
use boolpath::math::{point, Box2D, Point};
use boolpath::path::{FillRule, Path};
use rand::Rng;

#[cfg(test)]
mod fuzz;

fn random_point<R: Rng>(rng: &mut R, bounds: &Box2D) -> Point {
    point(
        rng.gen_range(bounds.min.x..bounds.max.x),
        rng.gen_range(bounds.min.y..bounds.max.y),
    )
}

/// Generates a path made of `num_sub_paths` random polygons with `3..=max_points`
/// points each.
pub fn random_path<R: Rng>(
    rng: &mut R,
    bounds: &Box2D,
    num_sub_paths: usize,
    max_points: usize,
    fill_rule: FillRule,
) -> Path {
    let mut builder = Path::builder().with_fill_rule(fill_rule);
    for _ in 0..num_sub_paths {
        let num_points = rng.gen_range(3..=max_points.max(3));
        builder.begin(random_point(rng, bounds));
        for _ in 1..num_points {
            builder.line_to(random_point(rng, bounds));
        }
        builder.close();
    }

    builder.build()
}

/// A star with `branches` tips, alternating between the inner and outer radius.
pub fn star(center: Point, branches: usize, inner_radius: f32, outer_radius: f32) -> Path {
    let mut builder = Path::builder();
    let n = branches * 2;
    for i in 0..n {
        let angle = i as f32 * std::f32::consts::PI * 2.0 / n as f32;
        let radius = if i % 2 == 0 { outer_radius } else { inner_radius };
        let p = center + boolpath::math::vector(angle.cos(), angle.sin()) * radius;
        if i == 0 {
            builder.begin(p);
        } else {
            builder.line_to(p);
        }
    }
    builder.close();

    builder.build()
}

/// A point where the fill of a clipping result differs from what the inputs predict.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FillMismatch {
    pub position: Point,
    pub expected: bool,
}

/// Samples a `resolution` x `resolution` grid over `bounds` and checks that each sample
/// is inside of `result` exactly when `op` says it is given the insideness relative
/// to `subject` and `clip`.
///
/// Samples closer than `tolerance` to the boundary of an input are skipped.
pub fn check_fill(
    result: &Path,
    subject: &Path,
    clip: &Path,
    op: ClipOp,
    bounds: &Box2D,
    resolution: u32,
    tolerance: f32,
) -> Result<(), FillMismatch> {
    let size = bounds.size();
    for j in 0..resolution {
        for i in 0..resolution {
            let position = point(
                bounds.min.x + (i as f32 + 0.5) * size.width / resolution as f32,
                bounds.min.y + (j as f32 + 0.5) * size.height / resolution as f32,
            );

            if near_boundary(subject, &position, tolerance)
                || near_boundary(clip, &position, tolerance)
            {
                continue;
            }

            let expected = op.combine(
                hit_test_path(&position, subject, subject.fill_rule()),
                hit_test_path(&position, clip, clip.fill_rule()),
            );
            let actual = hit_test_path(&position, result, result.fill_rule());

            if actual != expected {
                return Err(FillMismatch { position, expected });
            }
        }
    }

    Ok(())
}

/// Returns true if `position` is within `tolerance` of one of the edges of `path`.
pub fn near_boundary(path: &Path, position: &Point, tolerance: f32) -> bool {
    for polygon in sub_paths(path) {
        for i in 0..polygon.len() {
            let a = polygon[i];
            let b = polygon[(i + 1) % polygon.len()];
            if distance_to_segment(position, a, b) < tolerance {
                return true;
            }
        }
    }

    false
}

fn sub_paths(path: &Path) -> Vec<Vec<Point>> {
    use boolpath::path::PathEvent;

    let mut polygons = Vec::new();
    let mut current = Vec::new();
    for event in path.iter() {
        match event {
            PathEvent::Begin { at } => {
                current.clear();
                current.push(at);
            }
            PathEvent::Line { to, .. } => {
                current.push(to);
            }
            PathEvent::End { .. } => {
                polygons.push(std::mem::take(&mut current));
            }
        }
    }

    polygons
}

fn distance_to_segment(p: &Point, a: Point, b: Point) -> f32 {
    let ab = b - a;
    let ap = *p - a;
    let len2 = ab.square_length();
    if len2 == 0.0 {
        return ap.length();
    }

    let t = (ap.dot(ab) / len2).max(0.0).min(1.0);
    (a + ab * t - *p).length()
}

#[test]
fn fill_checker_detects_mismatches() {
    use boolpath::math::rect;
    use boolpath::path::Winding;

    let mut builder = Path::builder();
    builder.add_rectangle(&rect(0.0, 0.0, 2.0, 2.0), Winding::Positive);
    let a = builder.build();

    let mut builder = Path::builder();
    builder.add_rectangle(&rect(1.0, 1.0, 3.0, 3.0), Winding::Positive);
    let b = builder.build();

    let bounds = rect(-1.0, -1.0, 4.0, 4.0);

    assert_eq!(check_fill(&a, &a, &b, ClipOp::Sub, &bounds, 20, 0.01).is_err(), true);
    assert_eq!(check_fill(&a, &a, &b, ClipOp::Or, &bounds, 20, 0.01).is_err(), true);
    assert_eq!(check_fill(&a, &a, &Path::new(), ClipOp::Or, &bounds, 20, 0.01), Ok(()));
}

#[test]
fn star_shape() {
    let path = star(point(0.0, 0.0), 5, 1.0, 2.0);
    // The closing point is stored too.
    assert_eq!(path.endpoints().len(), 11);
    let lines = path
        .iter()
        .filter(|event| matches!(event, boolpath::path::PathEvent::Line { .. }))
        .count();
    assert_eq!(lines, 9);
    assert_eq!(path.num_sub_paths(), 1);
    assert!(hit_test_path(&point(0.0, 0.0), &path, FillRule::EvenOdd));
}
