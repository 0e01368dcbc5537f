#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::excessive_precision)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Simple 2D geometric primitives on top of euclid.
//!
//! This crate is reexported in [boolpath](https://docs.rs/boolpath/).
//!
//! # Overview.
//!
//! This crate implements the bits of math the boolean path operations are built on:
//!
//! - line segments and their pairwise intersections,
//! - fuzzy comparisons of coordinates and points,
//! - a cheap, monotonic replacement for `atan2` used to sort edges around a vertex.
//!
//! # Fuzzy comparisons
//!
//! Intersection points computed with floating point arithmetic rarely land exactly
//! on the coordinates they are geometrically equal to. Most of the comparisons in
//! this crate therefore take an absolute `epsilon` parameter. The [`Scalar`] trait
//! provides a default value tuned separately for `f32` and `f64`
//! ([`Scalar::FUZZY_EPSILON`]).

#[cfg(any(test, feature = "std"))]
extern crate std;

// Reexport dependencies.
pub use arrayvec;
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod angle;
mod fuzzy;
mod line;

#[doc(inline)]
pub use crate::angle::pseudo_angle;
#[doc(inline)]
pub use crate::fuzzy::{fuzzy_compare, fuzzy_eq, fuzzy_eq_point, fuzzy_is_null};
#[doc(inline)]
pub use crate::line::{LineSegment, SegmentIntersection, SegmentIntersections};

pub use crate::scalar::Scalar;

mod scalar {
    pub(crate) use num_traits::{Float, NumCast};

    use core::fmt::{Debug, Display};
    use core::ops::{AddAssign, DivAssign, MulAssign, SubAssign};

    pub trait Scalar:
        Float + NumCast + Sized + Display + Debug + AddAssign + SubAssign + MulAssign + DivAssign
    {
        const HALF: Self;
        const ZERO: Self;
        const ONE: Self;
        const TWO: Self;

        const MIN: Self;
        const MAX: Self;

        /// Absolute tolerance under which two coordinates are considered equal.
        const FUZZY_EPSILON: Self;

        /// Two values `a` and `b` compare equal relatively to each other if
        /// `|a - b| * FUZZY_RELATIVE <= min(|a|, |b|)`.
        const FUZZY_RELATIVE: Self;

        fn value(v: f32) -> Self;
    }

    impl Scalar for f32 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;

        const MIN: Self = f32::MIN;
        const MAX: Self = f32::MAX;

        const FUZZY_EPSILON: Self = 1e-5;
        const FUZZY_RELATIVE: Self = 1e5;

        #[inline]
        fn value(v: f32) -> Self {
            v
        }
    }

    impl Scalar for f64 {
        const HALF: Self = 0.5;
        const ZERO: Self = 0.0;
        const ONE: Self = 1.0;
        const TWO: Self = 2.0;

        const MIN: Self = f64::MIN;
        const MAX: Self = f64::MAX;

        const FUZZY_EPSILON: Self = 1e-12;
        const FUZZY_RELATIVE: Self = 1e12;

        #[inline]
        fn value(v: f32) -> Self {
            v as f64
        }
    }
}

/// Alias for `euclid::default::Point2D`.
pub use euclid::default::Point2D as Point;

/// Alias for `euclid::default::Vector2D`.
pub use euclid::default::Vector2D as Vector;

/// Alias for `euclid::default::Box2D`
pub use euclid::default::Box2D;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector<S>(x: S, y: S) -> Vector<S> {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point<S>(x: S, y: S) -> Point<S> {
    Point::new(x, y)
}

pub(crate) mod utils {
    #[inline]
    pub fn min_max<S: PartialOrd>(a: S, b: S) -> (S, S) {
        if a < b {
            (a, b)
        } else {
            (b, a)
        }
    }
}
