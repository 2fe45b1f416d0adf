use super::{BoundMode, VoxelGrid, VoxelValue, VoxelsError};
use crate::math::{Real, Vector, DIM};
use crate::utils::parallel;

impl<T: VoxelValue> VoxelGrid<T> {
    /// Correlates this grid with `kernel` and writes the result into `result`.
    ///
    /// Despite its name, this computes a cross-correlation: the kernel is not flipped. Every
    /// output cell accumulates `source(i + a, j + b, k + c) * kernel(a, b, c)` over the
    /// kernel footprint, starting from `T::zero()`.
    ///
    /// - With [`BoundMode::Clip`] only placements fully inside of this grid are computed and
    ///   `result` has `dims - kernel_dims + 1` cells per axis. Its bounds are this grid's
    ///   bounds scaled by `(n - k + 1) / n` on each axis.
    /// - With [`BoundMode::Hold`], [`BoundMode::Mirror`] or [`BoundMode::Zero`], `result` has
    ///   the same dimensions and bounds as this grid and the kernel is centered on each output
    ///   cell. The kernel dimensions must be odd.
    ///
    /// Fails if the kernel is empty or larger than this grid along any axis.
    pub fn convolve(
        &self,
        kernel: &Self,
        result: &mut Self,
        mode: BoundMode,
    ) -> Result<(), VoxelsError> {
        self.check_kernel(kernel)?;

        log::debug!(
            "Convolving {:?} with the kernel {:?} ({:?}).",
            self.dims,
            kernel.dims,
            mode
        );

        match mode {
            BoundMode::Clip => self.convolve_clipped(kernel, result),
            BoundMode::Hold | BoundMode::Mirror | BoundMode::Zero => {
                if kernel.dims.iter().any(|d| d % 2 == 0) {
                    return Err(VoxelsError::EvenKernel { dims: kernel.dims });
                }
                self.convolve_padded(kernel, result, mode)
            }
            BoundMode::DerivHold => Err(VoxelsError::UnsupportedBoundMode(mode)),
        }
    }

    /// Convolves this grid with a separable kernel, as three successive 1D passes.
    ///
    /// The kernel must be cubic with an odd side. The passes use the three lines of the kernel
    /// crossing its center, and the output is divided by the square of the central value
    /// once all passes are done. This is equal to [`Self::convolve`] only if the kernel is the
    /// outer product of three 1D profiles (like an isotropic Gaussian). Separability is not
    /// checked. With integer cells the final division truncates, so the output matches
    /// [`Self::convolve`] exactly when no intermediate pass overflows `T`.
    ///
    /// The passes run along X, then Y, then Z, swapping buffers between `self` and `result`.
    /// After the call `result` holds the convolved grid and `self` holds the intermediate
    /// grid filtered along X and Y only.
    ///
    /// Only the padding modes ([`BoundMode::Hold`], [`BoundMode::Mirror`],
    /// [`BoundMode::Zero`]) are supported.
    pub fn separable_convolve(
        &mut self,
        kernel: &Self,
        result: &mut Self,
        mode: BoundMode,
    ) -> Result<(), VoxelsError> {
        self.check_kernel(kernel)?;

        let [kx, ky, kz] = kernel.dims;
        if kx != ky || ky != kz {
            return Err(VoxelsError::InvalidDimensions {
                dims: kernel.dims,
                reason: "separable kernels must be cubic",
            });
        }
        if kx % 2 == 0 {
            return Err(VoxelsError::EvenKernel { dims: kernel.dims });
        }
        if !mode.is_padding() {
            return Err(VoxelsError::UnsupportedBoundMode(mode));
        }

        let h = kx / 2;
        let center = kernel.get(h, h, h);
        if center == T::zero() {
            return Err(VoxelsError::DegenerateKernel);
        }

        let profile_x: Vec<T> = (0..kx).map(|a| kernel.get(a, h, h)).collect();
        let profile_y: Vec<T> = (0..kx).map(|b| kernel.get(h, b, h)).collect();
        let profile_z: Vec<T> = (0..kx).map(|c| kernel.get(h, h, c)).collect();

        log::debug!(
            "Separable convolution of {:?} with the kernel {:?} ({:?}).",
            self.dims,
            kernel.dims,
            mode
        );

        result.resize(self.dims, self.bounds)?;
        self.convolve_axis(&profile_x, 0, result, mode);
        self.swap(result);
        self.convolve_axis(&profile_y, 1, result, mode);
        self.swap(result);
        self.convolve_axis(&profile_z, 2, result, mode);

        // Two truncating divisions by `center` equal one by `center²`, without overflowing it.
        parallel::for_each_indexed_mut(&mut result.data, |_, v| *v = *v / center / center);

        Ok(())
    }

    /// Computes the discrete Laplacian of this grid with 7-point central differences.
    ///
    /// Only [`BoundMode::Clip`] is supported: the outermost cells have no neighbors to
    /// difference with so `result` has two cells less along each axis, and its bounds are
    /// this grid's bounds shrunk by one pitch on every face. The differences are evaluated in
    /// [`Real`] then converted back to `T`.
    pub fn second_difference(
        &self,
        result: &mut Self,
        mode: BoundMode,
    ) -> Result<(), VoxelsError> {
        if mode != BoundMode::Clip {
            return Err(VoxelsError::UnsupportedBoundMode(mode));
        }
        if self.dims.iter().any(|d| *d < 3) {
            return Err(VoxelsError::InvalidDimensions {
                dims: self.dims,
                reason: "central differences need at least three cells per axis",
            });
        }

        let pitch = self.pitch();
        let inv_sq: Vector<Real> = pitch.map(|p| 1.0 / (p * p));
        let [nx, ny, nz] = self.dims;
        let out_dims = [nx - 2, ny - 2, nz - 2];
        result.resize(out_dims, self.bounds.shrunk(&pitch))?;

        let [ox, oy, _] = out_dims;
        let strides = [1, nx, nx * ny];
        parallel::for_each_slab_mut(&mut result.data, ox * oy, |k, slab| {
            for j in 0..oy {
                for i in 0..ox {
                    let center = self.linear_index(i + 1, j + 1, k + 1);
                    let twice = self.data[center].to_real() * 2.0;
                    let mut lapl = 0.0;
                    for axis in 0..DIM {
                        let next = self.data[center + strides[axis]].to_real();
                        let prev = self.data[center - strides[axis]].to_real();
                        lapl += (next - twice + prev) * inv_sq[axis];
                    }
                    slab[j * ox + i] = T::from_real(lapl);
                }
            }
        });

        Ok(())
    }

    fn check_kernel(&self, kernel: &Self) -> Result<(), VoxelsError> {
        if kernel.is_empty() {
            return Err(VoxelsError::InvalidDimensions {
                dims: kernel.dims,
                reason: "the kernel has no cells",
            });
        }
        if (0..DIM).any(|i| kernel.dims[i] > self.dims[i]) {
            return Err(VoxelsError::IncompatibleSizes {
                data: self.dims,
                kernel: kernel.dims,
            });
        }

        Ok(())
    }

    fn convolve_clipped(&self, kernel: &Self, result: &mut Self) -> Result<(), VoxelsError> {
        let out_dims = [
            self.dims[0] - kernel.dims[0] + 1,
            self.dims[1] - kernel.dims[1] + 1,
            self.dims[2] - kernel.dims[2] + 1,
        ];
        let scale = Vector::new(
            out_dims[0] as Real / self.dims[0] as Real,
            out_dims[1] as Real / self.dims[1] as Real,
            out_dims[2] as Real / self.dims[2] as Real,
        );
        result.resize(out_dims, self.bounds.scaled(&scale))?;

        let [ox, oy, _] = out_dims;
        parallel::for_each_slab_mut(&mut result.data, ox * oy, |k, slab| {
            for j in 0..oy {
                for i in 0..ox {
                    slab[j * ox + i] = self.correlate_inside(kernel, [i, j, k]);
                }
            }
        });

        Ok(())
    }

    fn convolve_padded(
        &self,
        kernel: &Self,
        result: &mut Self,
        mode: BoundMode,
    ) -> Result<(), VoxelsError> {
        result.resize(self.dims, self.bounds)?;

        let half = kernel.dims.map(|k| (k / 2) as isize);
        let [nx, ny, _] = self.dims;
        parallel::for_each_slab_mut(&mut result.data, nx * ny, |k, slab| {
            for j in 0..ny {
                for i in 0..nx {
                    let origin = [
                        i as isize - half[0],
                        j as isize - half[1],
                        k as isize - half[2],
                    ];
                    let inside = (0..DIM).all(|a| {
                        origin[a] >= 0
                            && origin[a] as usize + kernel.dims[a] <= self.dims[a]
                    });

                    slab[j * nx + i] = if inside {
                        self.correlate_inside(kernel, origin.map(|o| o as usize))
                    } else {
                        self.correlate_padded(kernel, origin, mode)
                    };
                }
            }
        });

        Ok(())
    }

    /// Correlation with the kernel placed at `origin`, the whole footprint being inside.
    #[inline]
    fn correlate_inside(&self, kernel: &Self, origin: [usize; DIM]) -> T {
        let [kx, ky, kz] = kernel.dims;
        let mut acc = T::zero();

        for c in 0..kz {
            for b in 0..ky {
                let src = self.linear_index(origin[0], origin[1] + b, origin[2] + c);
                let row = &self.data[src..src + kx];
                let kbase = kernel.linear_index(0, b, c);
                let krow = &kernel.data[kbase..kbase + kx];

                for (s, w) in row.iter().zip(krow) {
                    acc = acc + *s * *w;
                }
            }
        }

        acc
    }

    fn correlate_padded(&self, kernel: &Self, origin: [isize; DIM], mode: BoundMode) -> T {
        let [kx, ky, kz] = kernel.dims;
        let mut acc = T::zero();

        for c in 0..kz {
            for b in 0..ky {
                for a in 0..kx {
                    let w = kernel.data[kernel.linear_index(a, b, c)];
                    let s = self.padded_data(
                        origin[0] + a as isize,
                        origin[1] + b as isize,
                        origin[2] + c as isize,
                        mode,
                    );
                    acc = acc + s * w;
                }
            }
        }

        acc
    }

    /// One 1D pass of a separable convolution along `axis`, centered on each output cell.
    fn convolve_axis(&self, profile: &[T], axis: usize, result: &mut Self, mode: BoundMode) {
        let half = (profile.len() / 2) as isize;
        let [nx, ny, _] = self.dims;

        parallel::for_each_slab_mut(&mut result.data, nx * ny, |k, slab| {
            for j in 0..ny {
                for i in 0..nx {
                    let mut p = [i as isize, j as isize, k as isize];
                    p[axis] -= half;

                    let mut acc = T::zero();
                    for w in profile {
                        acc = acc + self.padded_data(p[0], p[1], p[2], mode) * *w;
                        p[axis] += 1;
                    }
                    slab[j * nx + i] = acc;
                }
            }
        });
    }
}
