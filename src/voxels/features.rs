use super::voxel_grid::try_alloc;
use super::{VoxelGrid, VoxelValue, VoxelsError};
use crate::math::{Matrix, Real, Vector, DIM};
use crate::utils::parallel;
use na::SymmetricEigen;

impl<T: VoxelValue> VoxelGrid<T> {
    /// Computes the eigenvalues of the Moravec-Harris structure matrix of every interior cell.
    ///
    /// For each cell not lying on the boundary of this grid, the gradient `g` is estimated
    /// with central differences, then the three eigenvalues of `g gᵀ` are written, in
    /// ascending order, to the three returned grids. They have two cells less than this grid
    /// along each axis, and its bounds shrunk by one pitch on every face.
    pub fn moravec_harris_features(&self) -> Result<[VoxelGrid<Real>; 3], VoxelsError> {
        if self.dims.iter().any(|d| *d < 3) {
            return Err(VoxelsError::InvalidDimensions {
                dims: self.dims,
                reason: "central differences need at least three cells per axis",
            });
        }

        let pitch = self.pitch();
        let out_dims = self.dims.map(|d| d - 2);
        let bounds = self.bounds.shrunk(&pitch);
        let [nx, ny, _] = self.dims;
        let [ox, oy, _] = out_dims;
        let strides = [1, nx, nx * ny];

        let mut eigenvalues = try_alloc(out_dims.iter().product(), [0.0; DIM])?;
        parallel::for_each_indexed_mut(&mut eigenvalues, |id, eig| {
            let (i, j, k) = (id % ox, (id / ox) % oy, id / (ox * oy));
            let center = self.linear_index(i + 1, j + 1, k + 1);

            let mut grad = Vector::zeros();
            for axis in 0..DIM {
                let next = self.data[center + strides[axis]].to_real();
                let prev = self.data[center - strides[axis]].to_real();
                grad[axis] = (next - prev) / (2.0 * pitch[axis]);
            }

            let structure: Matrix<Real> = grad * grad.transpose();
            let vals = SymmetricEigen::new(structure).eigenvalues;
            *eig = [vals.x, vals.y, vals.z];
            eig.sort_by(|a, b| a.total_cmp(b));
        });

        let mut result = [
            VoxelGrid::with_dims(out_dims, bounds)?,
            VoxelGrid::with_dims(out_dims, bounds)?,
            VoxelGrid::with_dims(out_dims, bounds)?,
        ];
        for (id, eig) in eigenvalues.iter().enumerate() {
            for (grid, val) in result.iter_mut().zip(eig) {
                grid.data[id] = *val;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use crate::voxels::{VoxelGrid, VoxelsError};

    #[test]
    fn linear_ramp_has_a_single_nonzero_eigenvalue() {
        let mut grid = VoxelGrid::<f64>::init([5, 4, 3]).unwrap();
        for z in 0..3 {
            for y in 0..4 {
                for x in 0..5 {
                    grid.set(x, y, z, (2 * x + y) as f64);
                }
            }
        }

        let [a, b, c] = grid.moravec_harris_features().unwrap();
        assert_eq!(c.dims(), [3, 2, 1]);
        for i in 0..c.len() {
            assert_relative_eq!(a.get_linear(i), 0.0, epsilon = 1.0e-9);
            assert_relative_eq!(b.get_linear(i), 0.0, epsilon = 1.0e-9);
            // |g|² = 2² + 1²
            assert_relative_eq!(c.get_linear(i), 5.0, epsilon = 1.0e-5);
        }
    }

    #[test]
    fn too_small_grids_are_rejected() {
        let grid = VoxelGrid::<f32>::init([3, 2, 3]).unwrap();
        assert!(matches!(
            grid.moravec_harris_features(),
            Err(VoxelsError::InvalidDimensions { .. })
        ));
    }
}
