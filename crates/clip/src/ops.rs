//! Boolean operations with default options.
//!
//! These functions handle empty operands without running the clipper and treat
//! operands made of a single point as hit tests.
//!
//! ## Example
//!
//! ```
//! use boolpath_clip::ops;
//! use boolpath_clip::path::{Path, Winding};
//! use boolpath_clip::math::rect;
//!
//! let mut builder = Path::builder();
//! builder.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0), Winding::Positive);
//! let square = builder.build();
//!
//! let mut builder = Path::builder();
//! builder.add_rectangle(&rect(20.0, 0.0, 30.0, 10.0), Winding::Positive);
//! let other = builder.build();
//!
//! assert!(!ops::intersects(&square, &other).unwrap());
//! assert!(ops::intersected(&square, &other).unwrap().is_empty());
//! assert_eq!(ops::united(&square, &other).unwrap().num_sub_paths(), 2);
//! ```

use crate::algorithms::hit_test::hit_test_path;
use crate::clipper::{validate, PathClipper};
use crate::error::ClipResult;
use crate::math::Point;
use crate::path::Path;
use crate::{ClipOp, ClipOptions};

/// Union of two paths.
pub fn united(a: &Path, b: &Path) -> ClipResult<Path> {
    if a.is_empty() {
        validate(b)?;
        return Ok(b.clone());
    }
    if b.is_empty() {
        validate(a)?;
        return Ok(a.clone());
    }

    PathClipper::new().clip(a, b, ClipOp::Or, &ClipOptions::DEFAULT)
}

/// Intersection of two paths.
pub fn intersected(a: &Path, b: &Path) -> ClipResult<Path> {
    if a.is_empty() || b.is_empty() {
        validate(a)?;
        validate(b)?;
        return Ok(Path::new());
    }

    PathClipper::new().clip(a, b, ClipOp::And, &ClipOptions::DEFAULT)
}

/// The area of `a` that is not in `b`.
pub fn subtracted(a: &Path, b: &Path) -> ClipResult<Path> {
    if a.is_empty() || b.is_empty() {
        validate(a)?;
        validate(b)?;
        return Ok(a.clone());
    }

    PathClipper::new().clip(a, b, ClipOp::Sub, &ClipOptions::DEFAULT)
}

/// Removes the self-intersections of a path.
pub fn simplified(path: &Path) -> ClipResult<Path> {
    if path.is_empty() {
        return Ok(Path::new());
    }

    PathClipper::new().simplify(path, &ClipOptions::DEFAULT)
}

/// Returns true if the filled areas of both paths overlap or touch.
///
/// If `b` is a single point, returns whether the point is inside of `a`.
pub fn intersects(a: &Path, b: &Path) -> ClipResult<bool> {
    if let Some(point) = single_point(b) {
        validate(a)?;
        validate(b)?;
        return Ok(hit_test_path(&point, a, a.fill_rule()));
    }

    PathClipper::new().intersects(a, b, &ClipOptions::DEFAULT)
}

/// Returns true if the filled area of `b` is entirely inside of the filled
/// area of `a`.
///
/// If `b` is a single point, returns whether the point is inside of `a`.
pub fn contains(a: &Path, b: &Path) -> ClipResult<bool> {
    if let Some(point) = single_point(b) {
        validate(a)?;
        validate(b)?;
        return Ok(hit_test_path(&point, a, a.fill_rule()));
    }

    PathClipper::new().contains(a, b, &ClipOptions::DEFAULT)
}

fn single_point(path: &Path) -> Option<Point> {
    match path.endpoints() {
        &[point] => Some(point),
        _ => None,
    }
}

#[cfg(test)]
use crate::math::{point, rect};
#[cfg(test)]
use crate::path::{FillRule, Winding};

#[cfg(test)]
fn rectangle(x0: f32, y0: f32, x1: f32, y1: f32) -> Path {
    let mut builder = Path::builder();
    builder.add_rectangle(&rect(x0, y0, x1, y1), Winding::Positive);
    builder.build()
}

#[test]
fn empty_operands() {
    let square = rectangle(0.0, 0.0, 1.0, 1.0);
    let empty = Path::new();

    assert_eq!(united(&square, &empty).unwrap(), square);
    assert_eq!(united(&empty, &square).unwrap(), square);
    assert!(intersected(&square, &empty).unwrap().is_empty());
    assert!(intersected(&empty, &square).unwrap().is_empty());
    assert_eq!(subtracted(&square, &empty).unwrap(), square);
    assert!(subtracted(&empty, &square).unwrap().is_empty());
    assert!(simplified(&empty).unwrap().is_empty());
    assert!(!intersects(&square, &empty).unwrap());
    assert!(!contains(&square, &empty).unwrap());
    assert!(!contains(&empty, &square).unwrap());
}

#[test]
fn single_point_operands() {
    let square = rectangle(0.0, 0.0, 2.0, 2.0);

    let mut builder = Path::builder();
    builder.begin(point(1.0, 1.0));
    builder.end(false);
    let inside = builder.build();

    let mut builder = Path::builder();
    builder.begin(point(3.0, 1.0));
    builder.end(false);
    let outside = builder.build();

    assert!(intersects(&square, &inside).unwrap());
    assert!(contains(&square, &inside).unwrap());
    assert!(!intersects(&square, &outside).unwrap());
    assert!(!contains(&square, &outside).unwrap());
}

#[test]
fn single_point_uses_fill_rule() {
    // Two nested squares with the same orientation.
    let mut builder = Path::builder();
    builder.add_rectangle(&rect(0.0, 0.0, 4.0, 4.0), Winding::Positive);
    builder.add_rectangle(&rect(1.0, 1.0, 3.0, 3.0), Winding::Positive);
    let even_odd = builder.build();
    let non_zero = even_odd.clone().with_fill_rule(FillRule::NonZero);

    let mut builder = Path::builder();
    builder.begin(point(2.0, 2.0));
    builder.end(false);
    let center = builder.build();

    assert!(!contains(&even_odd, &center).unwrap());
    assert!(contains(&non_zero, &center).unwrap());
}

#[test]
fn non_finite_input() {
    let square = rectangle(0.0, 0.0, 1.0, 1.0);
    let mut builder = Path::builder();
    builder.begin(point(0.0, 0.0));
    builder.line_to(point(f32::NAN, 1.0));
    builder.line_to(point(1.0, 1.0));
    builder.close();
    let broken = builder.build();

    assert_eq!(
        united(&square, &broken),
        Err(crate::ClipError::NonFiniteCoordinate)
    );
    assert_eq!(
        intersected(&Path::new(), &broken),
        Err(crate::ClipError::NonFiniteCoordinate)
    );
    assert_eq!(
        simplified(&broken),
        Err(crate::ClipError::NonFiniteCoordinate)
    );
    assert_eq!(
        contains(&square, &broken),
        Err(crate::ClipError::NonFiniteCoordinate)
    );
}
