use super::voxel_value::{partial_max, partial_min};
use super::{VoxelGrid, VoxelValue, VoxelsError};
use crate::math::{Real, DIM};
use crate::utils::parallel;
use crate::utils::{CancelToken, ProgressCallback};
use std::cmp::Ordering;

impl<T: VoxelValue> VoxelGrid<T> {
    /// The smallest cell value, or `None` if the grid is empty.
    pub fn min(&self) -> Option<T> {
        self.min_max().map(|(min, _)| min)
    }

    /// The largest cell value, or `None` if the grid is empty.
    pub fn max(&self) -> Option<T> {
        self.min_max().map(|(_, max)| max)
    }

    /// The smallest and largest cell values, or `None` if the grid is empty.
    pub fn min_max(&self) -> Option<(T, T)> {
        let first = *self.data.first()?;

        Some(parallel::fold_chunks(
            &self.data,
            || (first, first),
            |(mut min, mut max), _, chunk| {
                for v in chunk {
                    min = partial_min(min, *v);
                    max = partial_max(max, *v);
                }
                (min, max)
            },
            |a, b| (partial_min(a.0, b.0), partial_max(a.1, b.1)),
        ))
    }

    /// The sum of every cell value.
    ///
    /// With the `parallel` feature, floating-point sums are not bit-reproducible across
    /// thread counts.
    pub fn sum(&self) -> T {
        parallel::fold_chunks(
            &self.data,
            T::zero,
            |acc, _, chunk| chunk.iter().fold(acc, |acc, v| acc + *v),
            |a, b| a + b,
        )
    }

    /// The number of cells with a value greater than or equal to `thresh`.
    pub fn count(&self, thresh: T) -> usize {
        parallel::fold_chunks(
            &self.data,
            || 0,
            |acc, _, chunk| acc + chunk.iter().filter(|v| **v >= thresh).count(),
            |a, b| a + b,
        )
    }

    /// The sum of every cell value multiplied by the volume of a cell.
    ///
    /// This is a midpoint (Riemann) approximation of the volume integral, assuming the value
    /// is constant over each cell, not a trapezoidal one.
    pub fn trapez_integral(&self) -> Real {
        self.sum().to_real() * self.bin_volume()
    }

    /// Counts the cells falling into each of `num_bins` linear bins spanning `[min, max]`.
    ///
    /// A value `v` falls into the bin `(v - min) / (max - min) * (num_bins - 1)`, truncated.
    /// If every cell has the same value, they all fall into the first bin.
    ///
    /// The `progress` callback is polled while counting. If it requests a cancellation, this
    /// returns [`VoxelsError::Aborted`].
    pub fn histogram(
        &self,
        num_bins: usize,
        progress: &dyn ProgressCallback,
    ) -> Result<Vec<usize>, VoxelsError> {
        if num_bins == 0 {
            return Err(VoxelsError::InvalidArgument(
                "a histogram needs at least one bin",
            ));
        }

        let (min, max) = match self.min_max() {
            Some(min_max) => min_max,
            None => return Ok(vec![0; num_bins]),
        };

        let lo = min.to_real();
        let span = max.to_real() - lo;
        let degenerate = !(span > 0.0);
        if degenerate {
            log::warn!(
                "Degenerate histogram range: every cell is equal to {:?}.",
                min
            );
        }

        let scale = (num_bins - 1) as Real;
        let token = CancelToken::new(progress);
        let counts = parallel::fold_chunks(
            &self.data,
            || vec![0; num_bins],
            |mut counts, _, chunk| {
                if !token.check() {
                    return counts;
                }

                for v in chunk {
                    let bin = if degenerate {
                        0
                    } else {
                        ((v.to_real() - lo) / span * scale) as usize
                    };
                    counts[bin.min(num_bins - 1)] += 1;
                }
                counts
            },
            |mut a, b| {
                a.iter_mut().zip(b).for_each(|(a, b)| *a += b);
                a
            },
        );

        if token.is_aborted() {
            return Err(VoxelsError::Aborted);
        }

        Ok(counts)
    }

    /// The coordinates of the `n` largest (or smallest) cells, most extreme first.
    ///
    /// Ties are ordered by linear index. Fewer than `n` coordinates are returned if the grid
    /// has fewer than `n` cells.
    pub fn find_n_extrema(&self, n: usize, largest: bool) -> Vec<[usize; DIM]> {
        let mut order: Vec<usize> = (0..self.data.len()).collect();
        // Stable sort, so ties keep the scan order.
        order.sort_by(|a, b| {
            let (a, b) = (&self.data[*a], &self.data[*b]);
            let ord = if largest {
                b.partial_cmp(a)
            } else {
                a.partial_cmp(b)
            };
            ord.unwrap_or(Ordering::Equal)
        });
        order.truncate(n);

        order.into_iter().map(|i| self.coords_of(i)).collect()
    }
}
