use crate::fuzzy::{fuzzy_eq_point, fuzzy_is_null};
use crate::scalar::Scalar;
use crate::utils::min_max;
use crate::{point, Box2D, Point, Vector};

use arrayvec::ArrayVec;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment<S> {
    pub from: Point<S>,
    pub to: Point<S>,
}

/// A point where two segments meet.
///
/// `t_self` and `t_other` are the parameters of the intersection along each
/// segment, in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SegmentIntersection<S> {
    pub t_self: S,
    pub t_other: S,
    pub position: Point<S>,
}

/// Two segments produce at most four intersections (when they overlap, every
/// endpoint can lie inside the other segment).
pub type SegmentIntersections<S> = ArrayVec<SegmentIntersection<S>, 4>;

impl<S: Scalar> LineSegment<S> {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: S) -> Point<S> {
        self.from.lerp(self.to, t)
    }

    /// Returns an inverted version of this segment where the beginning and the end
    /// points are swapped.
    #[inline]
    pub fn flip(&self) -> Self {
        LineSegment {
            from: self.to,
            to: self.from,
        }
    }

    /// Return the smallest rectangle containing this segment.
    #[inline]
    pub fn bounding_box(&self) -> Box2D<S> {
        let (min_x, max_x) = min_max(self.from.x, self.to.x);
        let (min_y, max_y) = min_max(self.from.y, self.to.y);

        Box2D {
            min: point(min_x, min_y),
            max: point(max_x, max_y),
        }
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector<S> {
        self.to - self.from
    }

    /// Returns true if both endpoints are within `epsilon` of each other.
    #[inline]
    pub fn is_degenerate(&self, epsilon: S) -> bool {
        fuzzy_eq_point(self.from, self.to, epsilon)
    }

    /// Returns true if the two segments have the same endpoints, in either order.
    #[inline]
    pub fn fuzzy_same_endpoints(&self, other: &Self, epsilon: S) -> bool {
        (fuzzy_eq_point(self.from, other.from, epsilon)
            && fuzzy_eq_point(self.to, other.to, epsilon))
            || (fuzzy_eq_point(self.from, other.to, epsilon)
                && fuzzy_eq_point(self.to, other.from, epsilon))
    }

    /// Computes the points where this segment needs to be split to account
    /// for `other`.
    ///
    /// Contacts that do not require a split on either segment are not reported:
    /// degenerate or identical segments, segments sharing an endpoint, and
    /// crossings located at an endpoint of both segments.
    ///
    /// When the segments overlap along a common line, each endpoint lying
    /// strictly inside the other segment is reported, at its own coordinates.
    ///
    /// Crossings that land within `epsilon` of an endpoint (in parameter space)
    /// are snapped onto that endpoint.
    pub fn fuzzy_intersections(&self, other: &Self, epsilon: S) -> SegmentIntersections<S> {
        let mut result = ArrayVec::new();

        if self.is_degenerate(epsilon) || other.is_degenerate(epsilon) {
            return result;
        }

        if self.fuzzy_same_endpoints(other, epsilon) {
            return result;
        }

        let p1 = self.from;
        let p2 = self.to;
        let q1 = other.from;
        let q2 = other.to;
        let pd = self.to_vector();
        let qd = other.to_vector();

        let par = pd.cross(qd);

        if fuzzy_is_null(par, epsilon) {
            let normal = Vector::new(-pd.y, pd.x);
            if fuzzy_is_null(normal.dot(q1 - p1), epsilon) {
                // Overlapping.
                let dp = pd.dot(pd);
                let tq1 = pd.dot(q1 - p1) / dp;
                let tq2 = pd.dot(q2 - p1) / dp;
                if tq1 > S::ZERO && tq1 < S::ONE {
                    result.push(SegmentIntersection {
                        t_self: tq1,
                        t_other: S::ZERO,
                        position: q1,
                    });
                }
                if tq2 > S::ZERO && tq2 < S::ONE {
                    result.push(SegmentIntersection {
                        t_self: tq2,
                        t_other: S::ONE,
                        position: q2,
                    });
                }

                let dq = qd.dot(qd);
                let tp1 = qd.dot(p1 - q1) / dq;
                let tp2 = qd.dot(p2 - q1) / dq;
                if tp1 > S::ZERO && tp1 < S::ONE {
                    result.push(SegmentIntersection {
                        t_self: S::ZERO,
                        t_other: tp1,
                        position: p1,
                    });
                }
                if tp2 > S::ZERO && tp2 < S::ONE {
                    result.push(SegmentIntersection {
                        t_self: S::ONE,
                        t_other: tp2,
                        position: p2,
                    });
                }
            }

            return result;
        }

        if fuzzy_eq_point(p1, q1, epsilon)
            || fuzzy_eq_point(p1, q2, epsilon)
            || fuzzy_eq_point(p2, q1, epsilon)
            || fuzzy_eq_point(p2, q2, epsilon)
        {
            return result;
        }

        let v = q1 - p1;
        let tp = (qd.y * v.x - qd.x * v.y) / par;
        let tq = (pd.y * v.x - pd.x * v.y) / par;

        if tp < S::ZERO || tp > S::ONE || tq < S::ZERO || tq > S::ONE {
            return result;
        }

        let p_zero = fuzzy_is_null(tp, epsilon);
        let p_one = fuzzy_is_null(tp - S::ONE, epsilon);
        let q_zero = fuzzy_is_null(tq, epsilon);
        let q_one = fuzzy_is_null(tq - S::ONE, epsilon);

        if (q_zero || q_one) && (p_zero || p_one) {
            return result;
        }

        let position = if p_zero {
            p1
        } else if p_one {
            p2
        } else if q_zero {
            q1
        } else if q_one {
            q2
        } else {
            q1 + qd * tq
        };

        result.push(SegmentIntersection {
            t_self: tp,
            t_other: tq,
            position,
        });

        result
    }

    /// Returns true if the two segments touch or cross.
    ///
    /// Unlike `fuzzy_intersections`, shared endpoints and identical segments
    /// count as contact. Collinear segments only touch if they overlap over
    /// more than a single point.
    pub fn fuzzy_intersects(&self, other: &Self, epsilon: S) -> bool {
        if self.is_degenerate(epsilon) || other.is_degenerate(epsilon) {
            return false;
        }

        if self.fuzzy_same_endpoints(other, epsilon) {
            return true;
        }

        let p1 = self.from;
        let p2 = self.to;
        let q1 = other.from;
        let q2 = other.to;
        let pd = self.to_vector();
        let qd = other.to_vector();

        let par = pd.cross(qd);

        if fuzzy_is_null(par, epsilon) {
            let normal = Vector::new(-pd.y, pd.x);
            if fuzzy_is_null(normal.dot(q1 - p1), epsilon) {
                let dp = pd.dot(pd);
                let tq1 = pd.dot(q1 - p1);
                let tq2 = pd.dot(q2 - p1);
                if (tq1 > S::ZERO && tq1 < dp) || (tq2 > S::ZERO && tq2 < dp) {
                    return true;
                }

                let dq = qd.dot(qd);
                let tp1 = qd.dot(p1 - q1);
                let tp2 = qd.dot(p2 - q1);
                if (tp1 > S::ZERO && tp1 < dq) || (tp2 > S::ZERO && tp2 < dq) {
                    return true;
                }
            }

            return false;
        }

        let v = q1 - p1;
        let inv_par = S::ONE / par;
        let tp = (qd.y * v.x - qd.x * v.y) * inv_par;
        if tp < S::ZERO || tp > S::ONE {
            return false;
        }

        let tq = (pd.y * v.x - pd.x * v.y) * inv_par;

        tq >= S::ZERO && tq <= S::ONE
    }

    #[inline]
    pub fn to_f32(&self) -> LineSegment<f32> {
        LineSegment {
            from: self.from.to_f32(),
            to: self.to.to_f32(),
        }
    }

    #[inline]
    pub fn to_f64(&self) -> LineSegment<f64> {
        LineSegment {
            from: self.from.to_f64(),
            to: self.to.to_f64(),
        }
    }
}

#[cfg(test)]
fn segment(x0: f64, y0: f64, x1: f64, y1: f64) -> LineSegment<f64> {
    LineSegment {
        from: point(x0, y0),
        to: point(x1, y1),
    }
}

#[test]
fn intersection_rotated() {
    use core::f64::consts::PI;
    let epsilon = 1e-9;
    let count: u32 = 100;

    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f64 / (count as f64) * 2.0 * PI;
            let angle2 = j as f64 / (count as f64) * 2.0 * PI;

            let l1 = segment(
                10.0 * angle1.cos(),
                10.0 * angle1.sin(),
                -10.0 * angle1.cos(),
                -10.0 * angle1.sin(),
            );
            let l2 = segment(
                10.0 * angle2.cos(),
                10.0 * angle2.sin(),
                -10.0 * angle2.cos(),
                -10.0 * angle2.sin(),
            );

            assert!(l1.fuzzy_intersects(&l2, f64::FUZZY_EPSILON));

            let intersections = l1.fuzzy_intersections(&l2, f64::FUZZY_EPSILON);
            assert_eq!(intersections.len(), 1);
            let isect = intersections[0];
            assert!(fuzzy_eq_point(isect.position, point(0.0, 0.0), epsilon));
            assert!(fuzzy_eq_point(l1.sample(isect.t_self), point(0.0, 0.0), epsilon));
            assert!(fuzzy_eq_point(l2.sample(isect.t_other), point(0.0, 0.0), epsilon));
        }
    }
}

#[test]
fn crossing() {
    let a = segment(0.0, 0.0, 10.0, 10.0);
    let b = segment(0.0, 10.0, 10.0, 0.0);

    let intersections = a.fuzzy_intersections(&b, f64::FUZZY_EPSILON);
    assert_eq!(intersections.len(), 1);
    assert_eq!(intersections[0].t_self, 0.5);
    assert_eq!(intersections[0].t_other, 0.5);
    assert_eq!(intersections[0].position, point(5.0, 5.0));
}

#[test]
fn touching() {
    // T junction: the crossing is at an endpoint of b but inside a.
    let a = segment(0.0, 0.0, 10.0, 0.0);
    let b = segment(5.0, 0.0, 5.0, 5.0);
    let intersections = a.fuzzy_intersections(&b, f64::FUZZY_EPSILON);
    assert_eq!(intersections.len(), 1);
    assert_eq!(intersections[0].t_self, 0.5);
    assert_eq!(intersections[0].t_other, 0.0);
    assert_eq!(intersections[0].position, point(5.0, 0.0));

    // Shared endpoint: nothing to split.
    let c = segment(10.0, 0.0, 10.0, 10.0);
    assert!(a.fuzzy_intersections(&c, f64::FUZZY_EPSILON).is_empty());
    assert!(a.fuzzy_intersects(&c, f64::FUZZY_EPSILON));
}

#[test]
fn overlapping() {
    let a = segment(0.0, 0.0, 10.0, 0.0);
    let b = segment(5.0, 0.0, 15.0, 0.0);

    let intersections = a.fuzzy_intersections(&b, f64::FUZZY_EPSILON);
    assert_eq!(intersections.len(), 2);
    assert_eq!(intersections[0].t_self, 0.5);
    assert_eq!(intersections[0].t_other, 0.0);
    assert_eq!(intersections[0].position, point(5.0, 0.0));
    assert_eq!(intersections[1].t_self, 1.0);
    assert_eq!(intersections[1].t_other, 0.5);
    assert_eq!(intersections[1].position, point(10.0, 0.0));

    assert!(a.fuzzy_intersects(&b, f64::FUZZY_EPSILON));

    // Collinear but disjoint.
    let c = segment(11.0, 0.0, 15.0, 0.0);
    assert!(a.fuzzy_intersections(&c, f64::FUZZY_EPSILON).is_empty());
    assert!(!a.fuzzy_intersects(&c, f64::FUZZY_EPSILON));

    // Collinear, sharing a single endpoint.
    let e = segment(10.0, 0.0, 15.0, 0.0);
    assert!(!a.fuzzy_intersects(&e, f64::FUZZY_EPSILON));

    // Shared endpoint, not parallel.
    let f = segment(10.0, 0.0, 12.0, 3.0);
    assert!(a.fuzzy_intersects(&f, f64::FUZZY_EPSILON));

    // Parallel.
    let d = segment(0.0, 1.0, 10.0, 1.0);
    assert!(a.fuzzy_intersections(&d, f64::FUZZY_EPSILON).is_empty());
    assert!(!a.fuzzy_intersects(&d, f64::FUZZY_EPSILON));
}

#[test]
fn identical_and_degenerate() {
    let a = segment(0.0, 0.0, 10.0, 5.0);
    assert!(a.fuzzy_intersections(&a, f64::FUZZY_EPSILON).is_empty());
    assert!(a.fuzzy_intersections(&a.flip(), f64::FUZZY_EPSILON).is_empty());
    assert!(a.fuzzy_intersects(&a.flip(), f64::FUZZY_EPSILON));

    let p = segment(5.0, 2.5, 5.0, 2.5);
    assert!(a.fuzzy_intersections(&p, f64::FUZZY_EPSILON).is_empty());
    assert!(!a.fuzzy_intersects(&p, f64::FUZZY_EPSILON));
}

#[test]
fn disjoint() {
    let a = segment(0.0, 0.0, 1.0, 1.0);
    let b = segment(2.0, 0.0, 3.0, -1.0);
    assert!(a.fuzzy_intersections(&b, f64::FUZZY_EPSILON).is_empty());
    assert!(!a.fuzzy_intersects(&b, f64::FUZZY_EPSILON));
}

#[test]
fn bounding_box() {
    let a = segment(3.0, -1.0, -2.0, 4.0);
    let bb = a.bounding_box();
    assert_eq!(bb.min, point(-2.0, -1.0));
    assert_eq!(bb.max, point(3.0, 4.0));
}
