#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::needless_range_loop)]
#![no_std]

//! Boolean operations on polyline paths.
//!
//! This crate is reexported in [boolpath](https://docs.rs/boolpath/).
//!
//! ## Overview
//!
//! The most interesting types and functions of this crate are:
//!
//! * [PathClipper](struct.PathClipper.html) - Computes the union, intersection or difference
//!   of two paths, simplifies self-intersecting paths and answers intersection and containment
//!   queries.
//! * The [ops module](ops/index.html) - Convenience functions with default options.
//!
//! ## The clipping pipeline
//!
//! 1. The segments of both input paths are collected into a single pool of points
//!    ([PathSegments](segments/struct.PathSegments.html)).
//! 2. The intersections between all segments are computed with the help of a segment tree
//!    ([intersections module](intersections/index.html)).
//! 3. Points that are within epsilon of each other are merged.
//! 4. The split segments are inserted into a planar winged-edge graph
//!    ([WingedEdge](mesh/struct.WingedEdge.html)) that keeps track of the faces they delimit
//!    and of the winding contributions of each input path.
//! 5. Horizontal sweep lines classify each face as being part of the result or not.
//!    The boundary between retained and discarded faces is emitted as the output path.
//!
//! The output always uses the `EvenOdd` fill rule, has no self-intersections and is made of
//! closed sub-paths only. The orientation and starting points of the output sub-paths are
//! not specified.
//!
//! ## Precision
//!
//! Paths store `f32` coordinates while all of the computation above happens on `f64`.
//! Intersection points and merged points are snapped with an absolute tolerance, see
//! [ClipOptions::epsilon](struct.ClipOptions.html#structfield.epsilon).
//!
//! ## Examples
//!
//! ```
//! use boolpath_clip::{PathClipper, ClipOp, ClipOptions};
//! use boolpath_clip::path::{Path, Winding};
//! use boolpath_clip::math::rect;
//!
//! let mut builder = Path::builder();
//! builder.add_rectangle(&rect(0.0, 0.0, 2.0, 2.0), Winding::Positive);
//! let a = builder.build();
//!
//! let mut builder = Path::builder();
//! builder.add_rectangle(&rect(1.0, 1.0, 3.0, 3.0), Winding::Positive);
//! let b = builder.build();
//!
//! let mut clipper = PathClipper::new();
//! let union = clipper.clip(&a, &b, ClipOp::Or, &ClipOptions::DEFAULT).unwrap();
//! assert_eq!(union.num_sub_paths(), 1);
//! ```

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub extern crate boolpath_algorithms as algorithms;
pub extern crate boolpath_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub use crate::path::geom;
pub use crate::path::math;

mod clipper;
mod error;
mod merge;

pub mod intersections;
pub mod mesh;
pub mod ops;
pub mod segments;

#[cfg(test)]
mod clip_tests;

#[doc(inline)]
pub use crate::clipper::PathClipper;
#[doc(inline)]
pub use crate::error::{ClipError, ClipResult, InternalError};

pub use crate::path::{FillRule, Path};

/// The boolean operation to perform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ClipOp {
    /// Intersection: inside both paths.
    And,
    /// Union: inside either path.
    Or,
    /// Difference: inside the subject and not inside the clip path.
    Sub,
    /// Removes the self-intersections of the subject. The clip path is ignored.
    Simplify,
}

impl ClipOp {
    /// Combines the insideness of a point relative to each operand.
    #[inline]
    pub fn combine(self, in_subject: bool, in_clip: bool) -> bool {
        match self {
            ClipOp::And => in_subject && in_clip,
            ClipOp::Or | ClipOp::Simplify => in_subject || in_clip,
            ClipOp::Sub => in_subject && !in_clip,
        }
    }
}

/// Parameters for the clipper.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct ClipOptions {
    /// Absolute tolerance under which coordinates are considered equal.
    ///
    /// Intersections this close to a segment endpoint are snapped onto the
    /// endpoint and points this close to each other are merged.
    ///
    /// Default value: `ClipOptions::DEFAULT_EPSILON`.
    pub epsilon: f64,

    /// Whether to take shortcuts for trivial configurations such as identical,
    /// disjoint or rectangular operands.
    ///
    /// The shortcuts produce the same fill as the general algorithm but the
    /// output may be shaped differently. For example it may keep the fill rule
    /// of an input or contain overlapping sub-paths.
    ///
    /// Default value: `true`.
    pub fast_paths: bool,

    /// Depth at which the segment tree stops splitting.
    ///
    /// Default value: `ClipOptions::DEFAULT_SEGMENT_TREE_MAX_DEPTH`.
    pub segment_tree_max_depth: u32,

    /// Number of segments under which a segment tree node is not split.
    ///
    /// Default value: `ClipOptions::DEFAULT_SEGMENT_TREE_LEAF_SIZE`.
    pub segment_tree_leaf_size: usize,
}

impl ClipOptions {
    /// Default coordinate tolerance.
    pub const DEFAULT_EPSILON: f64 = 1e-12;
    /// Default maximum depth of the segment tree.
    pub const DEFAULT_SEGMENT_TREE_MAX_DEPTH: u32 = 24;
    /// Default maximum number of segments in a segment tree leaf.
    pub const DEFAULT_SEGMENT_TREE_LEAF_SIZE: usize = 10;

    pub const DEFAULT: Self = ClipOptions {
        epsilon: Self::DEFAULT_EPSILON,
        fast_paths: true,
        segment_tree_max_depth: Self::DEFAULT_SEGMENT_TREE_MAX_DEPTH,
        segment_tree_leaf_size: Self::DEFAULT_SEGMENT_TREE_LEAF_SIZE,
    };

    #[inline]
    pub fn epsilon(epsilon: f64) -> Self {
        Self::DEFAULT.with_epsilon(epsilon)
    }

    #[inline]
    pub const fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    #[inline]
    pub const fn with_fast_paths(mut self, fast_paths: bool) -> Self {
        self.fast_paths = fast_paths;
        self
    }

    #[inline]
    pub const fn with_segment_tree_max_depth(mut self, depth: u32) -> Self {
        self.segment_tree_max_depth = depth;
        self
    }

    #[inline]
    pub const fn with_segment_tree_leaf_size(mut self, size: usize) -> Self {
        self.segment_tree_leaf_size = size;
        self
    }
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn clip_op_truth_table() {
    let cases = [(false, false), (false, true), (true, false), (true, true)];
    let expected = [
        (ClipOp::And, [false, false, false, true]),
        (ClipOp::Or, [false, true, true, true]),
        (ClipOp::Sub, [false, false, true, false]),
        (ClipOp::Simplify, [false, true, true, true]),
    ];

    for &(op, results) in &expected {
        for (&(a, b), &result) in cases.iter().zip(results.iter()) {
            assert_eq!(op.combine(a, b), result, "{:?}({}, {})", op, a, b);
        }
    }
}

#[test]
fn options_builder() {
    let options = ClipOptions::epsilon(1e-9)
        .with_fast_paths(false)
        .with_segment_tree_leaf_size(4);

    assert_eq!(options.epsilon, 1e-9);
    assert!(!options.fast_paths);
    assert_eq!(options.segment_tree_leaf_size, 4);
    assert_eq!(options.segment_tree_max_depth, 24);
    assert_eq!(ClipOptions::default(), ClipOptions::DEFAULT);
}
