use super::{BoundMode, VoxelGrid, VoxelValue, VoxelsError};
use crate::math::{Real, DIM};

/// Interpolation used to extract a slice at a fractional position.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SliceInterp {
    /// Use the nearest integer slice.
    #[default]
    None,
    /// Linearly interpolate between the two integer slices bracketing the position.
    Linear,
}

/// A 2D plane of cells extracted from a [`VoxelGrid`].
///
/// The two axes of the slice are the two axes of the grid orthogonal to the slicing axis, in
/// increasing order: `(y, z)` for slices along `x`, `(x, z)` along `y`, and `(x, y)` along
/// `z`. The first one varies fastest in [`Self::data`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct VoxelSlice<T> {
    dims: [usize; 2],
    data: Vec<T>,
}

impl<T: Copy> VoxelSlice<T> {
    /// The number of cells along each axis of this slice.
    #[inline]
    pub fn dims(&self) -> [usize; 2] {
        self.dims
    }

    /// The cells of this slice, the first axis varying fastest.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes this slice, returning its cells.
    #[inline]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// The value of the cell `(u, v)` of this slice.
    ///
    /// # Panics
    /// Panics if the cell is out of the bounds of this slice.
    #[inline]
    pub fn get(&self, u: usize, v: usize) -> T {
        assert!(
            u < self.dims[0] && v < self.dims[1],
            "Slice cell ({}, {}) out of the bounds {:?}.",
            u,
            v,
            self.dims
        );
        self.data[v * self.dims[0] + u]
    }
}

/// The grid axes spanned by a slice orthogonal to `axis`.
#[inline]
fn slice_axes(axis: usize) -> [usize; 2] {
    match axis {
        0 => [1, 2],
        1 => [0, 2],
        _ => [0, 1],
    }
}

impl<T: VoxelValue> VoxelGrid<T> {
    /// Extracts the plane of cells with coordinate `index` along `axis`.
    ///
    /// `index` may lie outside of the grid, in which case the plane is synthesized with the
    /// padding policy `mode`. Fails if `index` is out of range and `mode` does not pad.
    pub fn slice_at_index(
        &self,
        axis: usize,
        index: isize,
        mode: BoundMode,
    ) -> Result<VoxelSlice<T>, VoxelsError> {
        if axis >= DIM {
            return Err(VoxelsError::InvalidArgument("the slice axis must be 0, 1 or 2"));
        }
        if self.is_empty() {
            return Err(VoxelsError::InvalidDimensions {
                dims: self.dims,
                reason: "cannot slice an empty grid",
            });
        }

        let in_range = index >= 0 && (index as usize) < self.dims[axis];
        if !in_range && !mode.is_padding() {
            return Err(VoxelsError::UnsupportedBoundMode(mode));
        }

        let [a, b] = slice_axes(axis);
        let dims = [self.dims[a], self.dims[b]];
        let mut data = Vec::with_capacity(dims[0] * dims[1]);
        let mut p = [0; DIM];
        p[axis] = index;

        for v in 0..dims[1] {
            p[b] = v as isize;
            for u in 0..dims[0] {
                p[a] = u as isize;
                data.push(self.padded_data(p[0], p[1], p[2], mode));
            }
        }

        Ok(VoxelSlice { dims, data })
    }

    /// Extracts a plane orthogonal to `axis` at the fractional position `offset`.
    ///
    /// `offset` ranges over `[0, 1]` and maps linearly to `[0, dims[axis]]`. With
    /// [`SliceInterp::None`] the nearest integer plane is extracted. With
    /// [`SliceInterp::Linear`] the two planes bracketing the position are blended, in
    /// [`Real`]. Since `offset == 1` maps one past the last plane, it needs a padding `mode`.
    pub fn slice_at_offset(
        &self,
        axis: usize,
        offset: Real,
        interp: SliceInterp,
        mode: BoundMode,
    ) -> Result<VoxelSlice<T>, VoxelsError> {
        if axis >= DIM {
            return Err(VoxelsError::InvalidArgument("the slice axis must be 0, 1 or 2"));
        }
        if !(0.0..=1.0).contains(&offset) {
            return Err(VoxelsError::InvalidArgument(
                "the slice offset must lie in [0, 1]",
            ));
        }

        let pos = offset * self.dims[axis] as Real;

        match interp {
            SliceInterp::None => self.slice_at_index(axis, pos.round() as isize, mode),
            SliceInterp::Linear => {
                let lower = self.slice_at_index(axis, pos.floor() as isize, mode)?;
                let upper = self.slice_at_index(axis, pos.ceil() as isize, mode)?;
                let delta = pos.fract();

                let data = lower
                    .data
                    .iter()
                    .zip(&upper.data)
                    .map(|(l, u)| {
                        let l = l.to_real();
                        T::from_real(delta * (u.to_real() - l) + l)
                    })
                    .collect();

                Ok(VoxelSlice {
                    dims: lower.dims,
                    data,
                })
            }
        }
    }
}
