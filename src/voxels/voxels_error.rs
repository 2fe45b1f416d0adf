use super::{BoundMode, ClipMode};
use std::io;

/// Errors that can occur while allocating, reading, writing, or processing a
/// [`VoxelGrid`](super::VoxelGrid).
///
/// Operations aborted on request of a [`ProgressCallback`](crate::utils::ProgressCallback)
/// return [`VoxelsError::Aborted`], which signals an incomplete result rather than a corrupted
/// one.
#[derive(thiserror::Error, Debug)]
pub enum VoxelsError {
    /// The backing store of the grid could not be allocated.
    ///
    /// The grid is left empty and must be resized again before use.
    #[error("failed to allocate a voxel grid of {len} cells")]
    OutOfMemory {
        /// The number of cells that were requested.
        len: usize,
    },
    /// The file could not be opened (or created, when writing).
    #[error("failed to open the voxel file: {0}")]
    FileOpen(#[source] io::Error),
    /// The file size does not match the requested dimensions.
    #[error("the voxel file is {actual} bytes long, expected {expected} bytes")]
    FileSize {
        /// The expected size, in bytes.
        expected: u64,
        /// The actual size of the file, in bytes.
        actual: u64,
    },
    /// An I/O error occurred while reading the file content.
    #[error("failed to read the voxel file: {0}")]
    FileRead(#[source] io::Error),
    /// An I/O error occurred while writing the file content.
    #[error("failed to write the voxel file: {0}")]
    FileWrite(#[source] io::Error),
    /// The operation was cancelled by its progress callback.
    #[error("the operation was aborted by its progress callback")]
    Aborted,
    /// The kernel is larger than the data along at least one axis.
    #[error("incompatible sizes: the kernel {kernel:?} does not fit in the data {data:?}")]
    IncompatibleSizes {
        /// The dimensions of the data grid.
        data: [usize; 3],
        /// The dimensions of the kernel grid.
        kernel: [usize; 3],
    },
    /// A padded convolution was requested with a kernel that has an even side.
    #[error("padded convolutions require odd kernel dimensions, got {dims:?}")]
    EvenKernel {
        /// The dimensions of the kernel grid.
        dims: [usize; 3],
    },
    /// The boundary mode is reserved, or not implemented by this operation.
    #[error("the boundary mode {0:?} is not supported by this operation")]
    UnsupportedBoundMode(BoundMode),
    /// The clipping mode is not implemented by this operation.
    #[error("the clipping mode {0:?} is not supported by this operation")]
    UnsupportedClipMode(ClipMode),
    /// The grid dimensions are not suitable for this operation.
    #[error("invalid grid dimensions {dims:?}: {reason}")]
    InvalidDimensions {
        /// The offending dimensions.
        dims: [usize; 3],
        /// Why they are invalid.
        reason: &'static str,
    },
    /// Two grids expected to have the same dimensions do not.
    #[error("grid size mismatch: expected {expected:?}, got {actual:?}")]
    SizeMismatch {
        /// The dimensions of the receiving grid.
        expected: [usize; 3],
        /// The dimensions of the other grid.
        actual: [usize; 3],
    },
    /// The separable kernel has a zero value at its center.
    #[error("the separable kernel has a zero value at its center")]
    DegenerateKernel,
    /// An argument is outside of its valid range.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
