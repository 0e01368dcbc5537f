#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![no_std]

//! Path algorithms used by the clipper and its users.
//!
//! This crate is reexported in [boolpath](https://docs.rs/boolpath/).

#[cfg(any(test, feature = "std"))]
extern crate std;

pub extern crate boolpath_path as path;

pub mod aabb;
pub mod area;
pub mod hit_test;
pub mod rect;

pub use crate::path::geom;
pub use crate::path::math;
