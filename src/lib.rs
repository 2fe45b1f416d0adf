/*!
voxgrid
=======

**voxgrid** is a dense 3-dimensional voxel grid library written with
the rust programming language.

A [`VoxelGrid`](voxels::VoxelGrid) stores one value per cell of a regular
grid mapped onto an axis-aligned box, and provides indexing, boundary
padding, convolution, rebinning, thresholding, slicing and statistics
over it.

*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::module_inception)]
#![allow(clippy::manual_range_contains)] // This usually makes it way more verbose that it could be.
#![allow(clippy::type_complexity)] // Complains about closures that are fairly simple.
#![deny(unused_qualifications)]

#[cfg(all(feature = "f32", feature = "f64"))]
std::compile_error!("The `f32` and `f64` features are mutually exclusive.");

#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;
#[macro_use]
extern crate approx;
extern crate num_traits as num;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod utils;
pub mod voxels;

mod real {
    /// The scalar type used for every spatial quantity of this crate.
    #[cfg(feature = "f64")]
    pub use f64 as Real;

    /// The scalar type used for every spatial quantity of this crate.
    #[cfg(feature = "f32")]
    pub use f32 as Real;
}

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use super::real::*;
    pub use na::{Matrix3, Point3, Vector3};

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;

    /// The matrix type.
    pub use Matrix3 as Matrix;
}

pub use crate::voxels::{BoundMode, ClipMode, VoxelGrid, VoxelsError};
