use super::{VoxelGrid, VoxelValue, VoxelsError};
use crate::math::{Point, Real};
use crate::utils::parallel::{self, CHUNK_LEN};
use crate::utils::{CancelToken, ProgressCallback, CALLBACK_INTERVAL};

impl<T: VoxelValue> VoxelGrid<T> {
    /// Builds an occupancy histogram of a point cloud: each point increments the cell
    /// containing it.
    ///
    /// Points outside of the bounds, or lying on their upper faces, are ignored. If
    /// `do_erase` is `true` the grid is zeroed first.
    ///
    /// A cell already holding `T::max_value()` is never incremented past it. With `no_wrap`
    /// it stays saturated, otherwise integer cells wrap around to `T::min_value()`.
    /// Floating-point cells absorb the increment and keep their value.
    ///
    /// The `progress` callback is polled every [`CALLBACK_INTERVAL`] points. If it requests
    /// a cancellation this returns [`VoxelsError::Aborted`], and the points counted so far
    /// stay counted.
    pub fn count_points(
        &mut self,
        points: &[Point<Real>],
        no_wrap: bool,
        do_erase: bool,
        progress: &dyn ProgressCallback,
    ) -> Result<(), VoxelsError> {
        if do_erase {
            self.fill(T::zero());
        }

        let token = CancelToken::new(progress);
        let (min, max) = (T::min_value(), T::max_value());
        // Only integers overflow at `max`: floats absorb the unit at that magnitude.
        let wraps = !no_wrap && max - T::one() != max;

        for (i, pt) in points.iter().enumerate() {
            if i != 0 && i % CALLBACK_INTERVAL == 0 && !token.check() {
                return Err(VoxelsError::Aborted);
            }

            let Some([x, y, z]) = self.point_to_index(pt) else {
                continue;
            };
            if x >= self.dims[0] || y >= self.dims[1] || z >= self.dims[2] {
                continue;
            }

            let id = self.linear_index(x, y, z);
            let cell = &mut self.data[id];
            if *cell < max {
                *cell = *cell + T::one();
            } else if wraps {
                *cell = min;
            }
        }

        Ok(())
    }

    /// Divides every cell by the volume of a cell, turning counts into densities.
    pub fn calculate_density(&mut self) -> Result<(), VoxelsError> {
        let volume = self.bin_volume();
        if !(volume > 0.0 && volume.is_finite()) {
            return Err(VoxelsError::InvalidArgument(
                "the volume of a cell must be positive and finite",
            ));
        }

        parallel::for_each_slab_mut(&mut self.data, CHUNK_LEN, |_, chunk| {
            for v in chunk {
                *v = T::from_real(v.to_real() / volume);
            }
        });

        Ok(())
    }
}
