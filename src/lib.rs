#![deny(bare_trait_objects)]
#![no_std]

//! Boolean operations on 2D polygonal paths.
//!
//! # Crates
//!
//! This meta-crate (`boolpath`) reexports the following sub-crates for convenience:
//!
//! * **boolpath_clip** - Union, intersection, difference and simplification of paths,
//!   intersection and containment queries.
//! * **boolpath_path** - Tools to build and iterate over polyline paths.
//! * **boolpath_algorithms** - Bounding boxes, rectangle detection, hit testing and area.
//! * **boolpath_geom** - Line segments, fuzzy comparisons and pseudo-angles.
//!
//! Each `boolpath_<name>` crate is reexported as a `<name>` module in `boolpath`. For example:
//!
//! ```ignore
//! extern crate boolpath_clip;
//! use boolpath_clip::PathClipper;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! extern crate boolpath;
//! use boolpath::clip::PathClipper;
//! ```
//!
//! # Feature flags
//!
//! serialization using serde can be enabled on each crate using the
//! `serialization` feature flag (disabled by default).
//!
//! All crates are `no_std` compatible when the default `std` feature is disabled.
//!
//! # Examples
//!
//! ## Subtracting a triangle from a square
//!
//! ```
//! use boolpath::math::{point, rect};
//! use boolpath::path::{Path, Winding};
//! use boolpath::clip::ops;
//!
//! let mut builder = Path::builder();
//! builder.add_rectangle(&rect(0.0, 0.0, 10.0, 10.0), Winding::Positive);
//! let square = builder.build();
//!
//! let mut builder = Path::builder();
//! builder.begin(point(5.0, 2.0));
//! builder.line_to(point(15.0, 5.0));
//! builder.line_to(point(5.0, 8.0));
//! builder.close();
//! let triangle = builder.build();
//!
//! let result = ops::subtracted(&square, &triangle).unwrap();
//!
//! assert!(ops::contains(&result, &single_point(2.0, 5.0)).unwrap());
//! assert!(!ops::contains(&result, &single_point(8.0, 5.0)).unwrap());
//!
//! fn single_point(x: f32, y: f32) -> Path {
//!     let mut builder = Path::builder();
//!     builder.begin(point(x, y));
//!     builder.end(false);
//!     builder.build()
//! }
//! ```
//!
//! ## Removing self-intersections
//!
//! ```
//! use boolpath::math::point;
//! use boolpath::path::{FillRule, Path};
//! use boolpath::clip::{PathClipper, ClipOptions};
//!
//! // A bow tie.
//! let mut builder = Path::builder().with_fill_rule(FillRule::NonZero);
//! builder.begin(point(0.0, 0.0));
//! builder.line_to(point(10.0, 10.0));
//! builder.line_to(point(10.0, 0.0));
//! builder.line_to(point(0.0, 10.0));
//! builder.close();
//! let bow_tie = builder.build();
//!
//! let mut clipper = PathClipper::new();
//! let simplified = clipper.simplify(&bow_tie, &ClipOptions::DEFAULT).unwrap();
//!
//! assert_eq!(simplified.fill_rule(), FillRule::EvenOdd);
//! assert_eq!(simplified.num_sub_paths(), 2);
//! ```

pub extern crate boolpath_clip;

pub use boolpath_clip as clip;
pub use clip::algorithms;
pub use clip::geom;
pub use clip::path;

pub use path::math;
