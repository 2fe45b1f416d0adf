use super::{ClipMode, VoxelGrid, VoxelValue, VoxelsError};
use crate::math::{Point, Real};
use crate::utils::parallel::{self, CHUNK_LEN};

impl<T: VoxelValue> VoxelGrid<T> {
    /// Downsamples this grid by averaging non-overlapping `rate × rate × rate` blocks.
    ///
    /// `result` has `dims / rate` cells per axis and the same bounds as this grid. Only
    /// [`ClipMode::None`] is supported: every dimension must be a multiple of `rate`. The
    /// averages are computed in [`Real`] then converted back to `T`.
    pub fn rebin(
        &self,
        result: &mut Self,
        rate: usize,
        clip: ClipMode,
    ) -> Result<(), VoxelsError> {
        if clip != ClipMode::None {
            return Err(VoxelsError::UnsupportedClipMode(clip));
        }
        if rate == 0 || self.dims.iter().any(|d| *d < rate) {
            return Err(VoxelsError::InvalidDimensions {
                dims: self.dims,
                reason: "the rebin rate must be between one and the grid dimensions",
            });
        }
        if self.dims.iter().any(|d| d % rate != 0) {
            return Err(VoxelsError::InvalidDimensions {
                dims: self.dims,
                reason: "the grid dimensions must be multiples of the rebin rate",
            });
        }

        let out_dims = self.dims.map(|d| d / rate);
        log::debug!("Rebinning {:?} into {:?}.", self.dims, out_dims);
        result.resize(out_dims, self.bounds)?;

        let inv_block = 1.0 / (rate * rate * rate) as Real;
        let [ox, oy, _] = out_dims;
        parallel::for_each_slab_mut(&mut result.data, ox * oy, |k, slab| {
            for j in 0..oy {
                for i in 0..ox {
                    let mut acc = 0.0;
                    for c in k * rate..(k + 1) * rate {
                        for b in j * rate..(j + 1) * rate {
                            let start = self.linear_index(i * rate, b, c);
                            acc += self.data[start..start + rate]
                                .iter()
                                .map(|v| v.to_real())
                                .sum::<Real>();
                        }
                    }
                    slab[j * ox + i] = T::from_real(acc * inv_block);
                }
            }
        });

        Ok(())
    }

    /// Classifies every cell: `result` gets `off` where this grid is below `thresh`, and `on`
    /// everywhere else.
    pub fn binarise(
        &self,
        result: &mut Self,
        thresh: T,
        on: T,
        off: T,
    ) -> Result<(), VoxelsError> {
        result.resize(self.dims, self.bounds)?;

        let src = &self.data;
        parallel::for_each_slab_mut(&mut result.data, CHUNK_LEN, |id, chunk| {
            let base = id * CHUNK_LEN;
            for (v, s) in chunk.iter_mut().zip(&src[base..]) {
                *v = if *s < thresh { off } else { on };
            }
        });

        Ok(())
    }

    /// The centers of the cells passing a comparison against `thresh`, in linear order.
    ///
    /// With `lower == true` the cells strictly below `thresh` are kept, otherwise the cells
    /// strictly above it.
    pub fn threshold_for_position(&self, thresh: T, lower: bool) -> Vec<Point<Real>> {
        let ids = parallel::fold_chunks(
            &self.data,
            Vec::new,
            |mut ids, base, chunk| {
                for (i, v) in chunk.iter().enumerate() {
                    let keep = if lower { *v < thresh } else { *v > thresh };
                    if keep {
                        ids.push(base + i);
                    }
                }
                ids
            },
            |mut a, b| {
                a.extend(b);
                a
            },
        );

        ids.into_iter()
            .map(|i| {
                let [x, y, z] = self.coords_of(i);
                self.cell_center(x, y, z)
            })
            .collect()
    }

    /// Divides every cell of this grid by the matching cell of `other`.
    ///
    /// Cells where `other` is zero are set to zero.
    pub fn divide_by(&mut self, other: &Self) -> Result<(), VoxelsError> {
        if self.dims != other.dims {
            return Err(VoxelsError::SizeMismatch {
                expected: self.dims,
                actual: other.dims,
            });
        }

        let divisor = &other.data;
        parallel::for_each_indexed_mut(&mut self.data, |i, v| {
            let d = divisor[i];
            *v = if d == T::zero() { T::zero() } else { *v / d };
        });

        Ok(())
    }

    /// Divides every cell of this grid by `divisor`.
    ///
    /// Fails, leaving the grid untouched, if `divisor` is zero.
    pub fn divide_by_scalar(&mut self, divisor: T) -> Result<(), VoxelsError> {
        if divisor == T::zero() {
            return Err(VoxelsError::InvalidArgument("cannot divide a grid by zero"));
        }

        parallel::for_each_indexed_mut(&mut self.data, |_, v| *v = *v / divisor);
        Ok(())
    }
}
