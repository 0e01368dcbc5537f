//! Tolerant comparisons.

use crate::scalar::Scalar;
use crate::Point;

/// Returns true if `v` is within `epsilon` of zero.
#[inline]
pub fn fuzzy_is_null<S: Scalar>(v: S, epsilon: S) -> bool {
    v.abs() <= epsilon
}

/// Returns true if `a` and `b` are within `epsilon` of each other.
#[inline]
pub fn fuzzy_eq<S: Scalar>(a: S, b: S, epsilon: S) -> bool {
    fuzzy_is_null(a - b, epsilon)
}

/// Component-wise absolute comparison of two points.
#[inline]
pub fn fuzzy_eq_point<S: Scalar>(a: Point<S>, b: Point<S>, epsilon: S) -> bool {
    fuzzy_eq(a.x, b.x, epsilon) && fuzzy_eq(a.y, b.y, epsilon)
}

/// Relative comparison, scaled by the magnitude of the smallest operand.
///
/// Unlike the absolute comparisons above, zero is only equal to zero.
#[inline]
pub fn fuzzy_compare<S: Scalar>(a: S, b: S) -> bool {
    (a - b).abs() * S::FUZZY_RELATIVE <= S::min(a.abs(), b.abs())
}

#[test]
fn absolute_comparisons() {
    use crate::point;

    assert!(fuzzy_is_null(1e-13f64, f64::FUZZY_EPSILON));
    assert!(!fuzzy_is_null(1e-11f64, f64::FUZZY_EPSILON));
    assert!(fuzzy_is_null(-1e-6f32, f32::FUZZY_EPSILON));

    assert!(fuzzy_eq_point(
        point(1.0, 2.0),
        point(1.0 + 1e-13, 2.0 - 1e-13),
        f64::FUZZY_EPSILON
    ));
    assert!(!fuzzy_eq_point(
        point(1.0, 2.0),
        point(1.0, 2.0 + 1e-9),
        f64::FUZZY_EPSILON
    ));
}

#[test]
fn relative_comparisons() {
    assert!(fuzzy_compare(0.0f64, 0.0));
    assert!(!fuzzy_compare(0.0f64, 1e-300));
    assert!(fuzzy_compare(1e6f64, 1e6 + 1e-7));
    assert!(!fuzzy_compare(1.0f64, 1.0 + 1e-9));
    assert!(fuzzy_compare(100.0f32, 100.0001));
}
