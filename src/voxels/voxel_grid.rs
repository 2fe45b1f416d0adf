use super::{ClipMode, VoxelValue, VoxelsError};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DEFAULT_EPSILON, DIM};
use crate::utils::parallel::{self, CHUNK_LEN};
use crate::utils::{CancelToken, ProgressCallback};
use std::ops::{Index, IndexMut};

/// A dense 3D grid of values of type `T`, mapped uniformly onto an axis-aligned box.
///
/// The cells are stored in a single flat buffer where the cell `(x, y, z)` lives at the
/// linear offset `z * ny * nx + y * nx + x` (`x` varies fastest). The grid is mapped onto
/// its [`Aabb`] so that cell `(0, 0, 0)` has its lowest corner at `bounds.mins` and the cell
/// `(nx - 1, ny - 1, nz - 1)` has its highest corner at `bounds.maxs`.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use voxgrid3d::VoxelGrid;
///
/// let mut grid = VoxelGrid::<f32>::init([3, 3, 3]).unwrap();
/// grid.fill(2.0);
///
/// assert_eq!(grid.len(), 27);
/// assert_eq!(grid.sum(), 54.0);
/// assert_eq!(grid.count(1.0), 27);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct VoxelGrid<T> {
    pub(crate) dims: [usize; DIM],
    pub(crate) data: Vec<T>,
    pub(crate) bounds: Aabb,
}

impl<T> Default for VoxelGrid<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two grids are equal if they have the same dimensions and equal cells.
///
/// The spatial bounds are not compared.
impl<T: PartialEq> PartialEq for VoxelGrid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.dims == other.dims && self.data == other.data
    }
}

/// Computes `nx * ny * nz`, checking for overflows.
pub(crate) fn cell_count(dims: [usize; DIM]) -> Result<usize, VoxelsError> {
    dims[0]
        .checked_mul(dims[1])
        .and_then(|n| n.checked_mul(dims[2]))
        .ok_or(VoxelsError::InvalidDimensions {
            dims,
            reason: "the number of cells overflows the address space",
        })
}

/// Allocates a buffer of `len` copies of `value`, reporting allocation failures.
pub(crate) fn try_alloc<T: Clone>(len: usize, value: T) -> Result<Vec<T>, VoxelsError> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| VoxelsError::OutOfMemory { len })?;
    data.resize(len, value);
    Ok(data)
}

impl<T> VoxelGrid<T> {
    /// Creates an empty grid with zero cells, mapped onto the unit cube.
    pub fn new() -> Self {
        Self {
            dims: [0; DIM],
            data: Vec::new(),
            bounds: Aabb::unit(),
        }
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn dims(&self) -> [usize; DIM] {
        self.dims
    }

    /// The total number of cells, `nx * ny * nz`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Does this grid have zero cells?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The spatial box this grid is mapped onto.
    #[inline]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Maps this grid onto a new spatial box, without touching its cells.
    #[inline]
    pub fn set_bounds(&mut self, bounds: Aabb) {
        self.bounds = bounds;
    }

    /// The cells of this grid, in linear order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// The cells of this grid, in linear order.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Releases the cells of this grid. Its dimensions become zero and its bounds are kept.
    pub fn clear(&mut self) {
        self.data = Vec::new();
        self.dims = [0; DIM];
    }

    /// Exchanges the content of `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// The size in bytes of a single cell value.
    #[inline]
    pub fn size_of_value_type() -> usize {
        size_of::<T>()
    }

    /// The linear offset of the cell `(x, y, z)` in [`Self::data`].
    #[inline]
    pub fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        (z * self.dims[1] + y) * self.dims[0] + x
    }

    /// The cell coordinates of the given linear offset.
    #[inline]
    pub fn coords_of(&self, linear_index: usize) -> [usize; DIM] {
        let [nx, ny, _] = self.dims;
        [
            linear_index % nx,
            (linear_index / nx) % ny,
            linear_index / (nx * ny),
        ]
    }

    #[inline]
    fn checked_linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        assert!(
            x < self.dims[0] && y < self.dims[1] && z < self.dims[2],
            "Voxel ({}, {}, {}) out of the bounds {:?}.",
            x,
            y,
            z,
            self.dims
        );
        self.linear_index(x, y, z)
    }

    /// The size of a single cell along each axis.
    pub fn pitch(&self) -> Vector<Real> {
        self.bounds.extents().component_div(&Vector::new(
            self.dims[0] as Real,
            self.dims[1] as Real,
            self.dims[2] as Real,
        ))
    }

    /// The volume of a single cell.
    pub fn bin_volume(&self) -> Real {
        self.pitch().product()
    }

    /// The lowest corner of the cell `(x, y, z)`.
    ///
    /// Coordinates equal to the dimensions are accepted and yield the upper corners of the
    /// last cells, which is useful to address the lattice of cell corners.
    pub fn index_to_point(&self, x: usize, y: usize, z: usize) -> Point<Real> {
        let idx = Vector::new(x as Real, y as Real, z as Real);
        self.bounds.mins + idx.component_mul(&self.pitch())
    }

    /// The center of the cell `(x, y, z)`.
    pub fn cell_center(&self, x: usize, y: usize, z: usize) -> Point<Real> {
        self.index_to_point(x, y, z) + self.pitch() / 2.0
    }

    /// The coordinates of the cell containing the point `p`.
    ///
    /// Returns `None` if `p` lies outside of the bounds of this grid, or if the grid is empty.
    /// A point lying exactly on an upper face of the bounds yields a coordinate equal to the
    /// corresponding dimension, i.e., one past the last cell. Use
    /// [`Self::point_to_index_with_upper`] to assign these points to the last cell instead.
    pub fn point_to_index(&self, p: &Point<Real>) -> Option<[usize; DIM]> {
        if self.is_empty() || !self.bounds.contains_local_point(p) {
            return None;
        }

        let mut idx = [0; DIM];
        for i in 0..DIM {
            idx[i] = self.axis_coordinate(i, p[i]);
        }

        Some(idx)
    }

    /// The coordinates of the cell containing the point `p`, the upper faces being part of
    /// the last cells.
    ///
    /// Points within `sqrt(DEFAULT_EPSILON)` of an upper face are snapped onto the last cell
    /// of that axis. Returns `None` for any other point outside of the bounds.
    pub fn point_to_index_with_upper(&self, p: &Point<Real>) -> Option<[usize; DIM]> {
        if self.is_empty() {
            return None;
        }

        let eps = DEFAULT_EPSILON.sqrt();
        let mut idx = [0; DIM];
        for i in 0..DIM {
            if abs_diff_eq!(p[i], self.bounds.maxs[i], epsilon = eps) {
                idx[i] = self.dims[i] - 1;
            } else if p[i] < self.bounds.mins[i] || p[i] > self.bounds.maxs[i] {
                return None;
            } else {
                idx[i] = self.axis_coordinate(i, p[i]).min(self.dims[i] - 1);
            }
        }

        Some(idx)
    }

    #[inline]
    fn axis_coordinate(&self, axis: usize, coord: Real) -> usize {
        let frac = (coord - self.bounds.mins[axis])
            / (self.bounds.maxs[axis] - self.bounds.mins[axis]);
        (frac * self.dims[axis] as Real).floor() as usize
    }
}

impl<T: VoxelValue> VoxelGrid<T> {
    /// Creates a zero-filled grid with the given dimensions, mapped onto `bounds`.
    pub fn with_dims(dims: [usize; DIM], bounds: Aabb) -> Result<Self, VoxelsError> {
        let mut result = Self::new();
        result.resize(dims, bounds)?;
        Ok(result)
    }

    /// Creates a zero-filled grid with the given dimensions, with one unit of length per cell.
    ///
    /// The grid is mapped onto the box `(0, 0, 0) - (nx, ny, nz)`.
    pub fn init(dims: [usize; DIM]) -> Result<Self, VoxelsError> {
        Self::with_dims(dims, Aabb::from_dims(dims))
    }

    /// Discards the content of this grid, then reallocates it with the given dimensions.
    ///
    /// Every cell is set to zero. If the allocation fails, [`VoxelsError::OutOfMemory`] is
    /// returned and the grid is left empty.
    pub fn resize(&mut self, dims: [usize; DIM], bounds: Aabb) -> Result<(), VoxelsError> {
        let len = cell_count(dims)?;

        self.clear();
        self.bounds = bounds;
        self.data = try_alloc(len, T::zero())?;
        self.dims = dims;

        log::debug!("Allocated voxel grid {:?} ({} cells).", dims, len);
        Ok(())
    }

    /// Reallocates this grid with the given dimensions, preserving the overlapping cells.
    ///
    /// With [`ClipMode::LowerSouthWest`], the cell `(x, y, z)` of the new grid keeps its old
    /// value if `(x, y, z)` was a valid cell before resizing. Every other cell is set to
    /// `fill`. The other clipping modes are not supported.
    ///
    /// The `progress` callback is polled while copying. If it requests a cancellation, this
    /// returns [`VoxelsError::Aborted`] and the grid is left unchanged.
    pub fn resize_keep_data(
        &mut self,
        dims: [usize; DIM],
        clip: ClipMode,
        bounds: Aabb,
        fill: T,
        progress: &dyn ProgressCallback,
    ) -> Result<(), VoxelsError> {
        if clip != ClipMode::LowerSouthWest {
            return Err(VoxelsError::UnsupportedClipMode(clip));
        }

        let len = cell_count(dims)?;
        let mut new_data = try_alloc(len, fill)?;
        let token = CancelToken::new(progress);
        let [ox, oy, oz] = self.dims;
        let [nx, ny, _] = dims;
        let old_data = &self.data;

        parallel::for_each_slab_mut(&mut new_data, nx * ny, |z, slab| {
            if z >= oz || !token.check() {
                return;
            }

            for y in 0..ny.min(oy) {
                let src = (z * oy + y) * ox;
                let dst = y * nx;
                let n = nx.min(ox);
                slab[dst..dst + n].copy_from_slice(&old_data[src..src + n]);
            }
        });

        if token.is_aborted() {
            return Err(VoxelsError::Aborted);
        }

        self.data = new_data;
        self.dims = dims;
        self.bounds = bounds;
        Ok(())
    }

    /// Sets every cell of this grid to `value`.
    pub fn fill(&mut self, value: T) {
        parallel::for_each_slab_mut(&mut self.data, CHUNK_LEN, |_, chunk| chunk.fill(value));
    }

    /// The value of the cell `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the cell is out of the bounds of this grid.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> T {
        self.data[self.checked_linear_index(x, y, z)]
    }

    /// Sets the value of the cell `(x, y, z)`.
    ///
    /// # Panics
    /// Panics if the cell is out of the bounds of this grid.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, z: usize, value: T) {
        let i = self.checked_linear_index(x, y, z);
        self.data[i] = value;
    }

    /// The value of the cell at the given linear offset.
    #[inline]
    pub fn get_linear(&self, linear_index: usize) -> T {
        self.data[linear_index]
    }

    /// Sets the value of the cell at the given linear offset.
    #[inline]
    pub fn set_linear(&mut self, linear_index: usize, value: T) {
        self.data[linear_index] = value;
    }

    /// The value of the cell containing the point `p`, if it lies within the bounds.
    pub fn value_at_point(&self, p: &Point<Real>) -> Option<T> {
        self.point_to_index_with_upper(p)
            .map(|[x, y, z]| self.data[self.linear_index(x, y, z)])
    }

    /// Sets the value of the cell containing the point `p`.
    ///
    /// Returns `false`, without modifying anything, if `p` lies outside of the bounds.
    pub fn set_at_point(&mut self, p: &Point<Real>, value: T) -> bool {
        match self.point_to_index_with_upper(p) {
            Some([x, y, z]) => {
                let i = self.linear_index(x, y, z);
                self.data[i] = value;
                true
            }
            None => false,
        }
    }
}

impl<T> Index<[usize; DIM]> for VoxelGrid<T> {
    type Output = T;

    #[inline]
    fn index(&self, [x, y, z]: [usize; DIM]) -> &T {
        &self.data[self.checked_linear_index(x, y, z)]
    }
}

impl<T> IndexMut<[usize; DIM]> for VoxelGrid<T> {
    #[inline]
    fn index_mut(&mut self, [x, y, z]: [usize; DIM]) -> &mut T {
        let i = self.checked_linear_index(x, y, z);
        &mut self.data[i]
    }
}
