//! Dense 3D voxel grids and the numerical algorithms operating on them.
//!
//! The central type is [`VoxelGrid`]: a flat buffer of cell values with a spatial
//! [`Aabb`](crate::bounding_volume::Aabb) it is mapped onto. Every operation is a method of the
//! grid, grouped by concern in the sub-modules of this one:
//!
//! - indexing, bounds mapping and allocation ([`VoxelGrid::resize`], [`VoxelGrid::point_to_index`]),
//! - boundary padding ([`BoundMode`], [`VoxelGrid::padded_data`]),
//! - convolutions and kernel construction ([`VoxelGrid::convolve`],
//!   [`VoxelGrid::separable_convolve`], [`VoxelGrid::set_gaussian_kernel_cube`]),
//! - statistics ([`VoxelGrid::min_max`], [`VoxelGrid::histogram`], [`VoxelGrid::find_n_extrema`]),
//! - resampling and thresholding ([`VoxelGrid::rebin`], [`VoxelGrid::binarise`]),
//! - 2D slices ([`VoxelSlice`]) and shared-edge numbering ([`VoxelEdge`]),
//! - raw binary files ([`VoxelGrid::load_file`], [`VoxelGrid::write_file`]).

pub use self::boundary::{BoundMode, ClipMode};
pub use self::conversion::{cast_voxels, sum_voxels};
pub use self::edges::{VoxelEdge, EDGES_PER_CELL};
pub use self::slicing::{SliceInterp, VoxelSlice};
pub use self::voxel_grid::VoxelGrid;
pub use self::voxel_value::VoxelValue;
pub use self::voxels_error::VoxelsError;

mod boundary;
mod conversion;
mod convolution;
mod counting;
mod edges;
mod features;
mod io;
mod kernels;
mod resampling;
mod slicing;
mod statistics;
mod voxel_grid;
mod voxel_value;
mod voxels_error;
