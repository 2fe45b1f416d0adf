use super::{VoxelGrid, VoxelValue, VoxelsError};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::utils::parallel;
use std::f64::consts::PI;

/// A sub-cell of a straddling cell, pending classification.
struct SubCell {
    center: Point<Real>,
    half_side: Real,
    level: u32,
}

/// Offsets of the 8 corners of a cube with unit half-side.
const CORNER_SIGNS: [[Real; DIM]; 8] = [
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
];

/// Where a cube lies wrt. a sphere, judging from its corners only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Coverage {
    Inside,
    Outside,
    Straddling,
}

fn coverage(
    center: &Point<Real>,
    half_side: Real,
    sphere: &Point<Real>,
    sq_radius: Real,
) -> Coverage {
    let mut num_inside = 0;
    for signs in &CORNER_SIGNS {
        let corner = center + Vector::from(*signs) * half_side;
        if na::distance_squared(&corner, sphere) <= sq_radius {
            num_inside += 1;
        }
    }

    match num_inside {
        0 => Coverage::Outside,
        8 => Coverage::Inside,
        _ => Coverage::Straddling,
    }
}

/// Estimates the fraction of the unit cell centered at `center` covered by the sphere.
///
/// Straddling sub-cells are split into octants until `max_level` is reached. The sub-cells
/// still straddling at that point are counted as half covered.
fn covered_fraction(
    center: Point<Real>,
    sphere: &Point<Real>,
    sq_radius: Real,
    max_level: u32,
) -> Real {
    let mut fraction = 0.0;
    let mut stack = vec![SubCell {
        center,
        half_side: 0.5,
        level: 0,
    }];

    while let Some(cell) = stack.pop() {
        let weight = (0.125 as Real).powi(cell.level as i32);

        match coverage(&cell.center, cell.half_side, sphere, sq_radius) {
            Coverage::Inside => fraction += weight,
            Coverage::Outside => {}
            Coverage::Straddling if cell.level >= max_level => fraction += weight * 0.5,
            Coverage::Straddling => {
                let half_side = cell.half_side * 0.5;
                for signs in &CORNER_SIGNS {
                    stack.push(SubCell {
                        center: cell.center + Vector::from(*signs) * half_side,
                        half_side,
                        level: cell.level + 1,
                    });
                }
            }
        }
    }

    fraction
}

impl<T: VoxelValue> VoxelGrid<T> {
    /// Turns this grid into a cubic isotropic Gaussian kernel.
    ///
    /// The grid is resized to `side_len` cells per axis, mapped onto `[-bound / 2, bound / 2]`
    /// on each axis. Every cell is set to the density of a centered trivariate normal
    /// distribution with covariance `std_dev * I`, sampled at the cell center. Note that
    /// `std_dev` is used as the per-axis variance.
    pub fn set_gaussian_kernel_cube(
        &mut self,
        std_dev: Real,
        bound: Real,
        side_len: usize,
    ) -> Result<(), VoxelsError> {
        if side_len == 0 {
            return Err(VoxelsError::InvalidDimensions {
                dims: [0; DIM],
                reason: "a kernel needs at least one cell",
            });
        }
        if std_dev <= 0.0 || bound <= 0.0 {
            return Err(VoxelsError::InvalidArgument(
                "the standard deviation and the bound must be positive",
            ));
        }

        let half_extents = Vector::repeat(bound / 2.0);
        self.resize(
            [side_len; DIM],
            Aabb::from_half_extents(Point::origin(), half_extents),
        )?;

        let two_pi: Real = na::convert(2.0 * PI);
        // det(std_dev * I) == std_dev^3
        let norm = 1.0 / (two_pi * std_dev).powf(1.5);
        let inv_two_var = 1.0 / (2.0 * std_dev);

        let dims = self.dims;
        let origin = self.bounds.mins;
        let pitch = self.pitch();
        parallel::for_each_indexed_mut(&mut self.data, |i, v| {
            let [x, y, z] = coords(dims, i);
            let p = Vector::new(
                (x as Real + 0.5) * pitch.x,
                (y as Real + 0.5) * pitch.y,
                (z as Real + 0.5) * pitch.z,
            );
            let r = origin + p;
            *v = T::from_real(norm * (-r.coords.norm_squared() * inv_two_var).exp());
        });

        Ok(())
    }

    /// Rasterizes a solid sphere into this grid.
    ///
    /// The grid is resized to `side_len` cells per axis, mapped onto `[-bound / 2, bound / 2]`
    /// on each axis. The sphere is inscribed in the grid: its center is the center of the
    /// grid and its diameter is `side_len` cells.
    ///
    /// With `antialias_level == 0`, cells with a center inside of the sphere are set to
    /// `val` and the others to zero. Otherwise, cells with corners on both sides of the
    /// sphere surface are recursively split into octants, up to `antialias_level` times, to
    /// estimate the covered fraction `f` of the cell, which is then set to `f * val`.
    pub fn make_spherical_kernel(
        &mut self,
        side_len: usize,
        bound: Real,
        val: T,
        antialias_level: u32,
    ) -> Result<(), VoxelsError> {
        if side_len == 0 {
            return Err(VoxelsError::InvalidDimensions {
                dims: [0; DIM],
                reason: "a kernel needs at least one cell",
            });
        }

        let half_extents = Vector::repeat(bound / 2.0);
        self.resize(
            [side_len; DIM],
            Aabb::from_half_extents(Point::origin(), half_extents),
        )?;

        // Index space, cell (i, j, k) being centered at (i, j, k).
        let center = Point::from(Vector::repeat((side_len as Real - 1.0) / 2.0));
        let radius = side_len as Real / 2.0;
        let sq_radius = radius * radius;
        let dims = self.dims;
        let val_real = val.to_real();

        parallel::for_each_indexed_mut(&mut self.data, |i, v| {
            let [x, y, z] = coords(dims, i);
            let cell = Point::new(x as Real, y as Real, z as Real);

            *v = if antialias_level == 0 {
                if na::distance_squared(&cell, &center) <= sq_radius {
                    val
                } else {
                    T::zero()
                }
            } else {
                match coverage(&cell, 0.5, &center, sq_radius) {
                    Coverage::Inside => val,
                    Coverage::Outside => T::zero(),
                    Coverage::Straddling => T::from_real(
                        val_real * covered_fraction(cell, &center, sq_radius, antialias_level),
                    ),
                }
            };
        });

        Ok(())
    }

    /// Stamps a sphere of the given `radius` centered on each of the `positions`.
    ///
    /// Every cell whose center offset from the cell containing a position lies within
    /// `radius` is set to `value`. The offsets are computed once, in physical units, so the
    /// stamp is an ellipsoid in index space when the pitch is not the same along every axis.
    /// The stamps are clipped to the grid, and positions outside of the bounds still stamp
    /// the cells they reach. A radius smaller than the pitch only stamps the central cell.
    ///
    /// If `do_erase` is `true`, the grid is zeroed first.
    pub fn fill_spheres_by_position(
        &mut self,
        positions: &[Point<Real>],
        radius: Real,
        value: T,
        do_erase: bool,
    ) {
        if do_erase {
            self.fill(T::zero());
        }
        if self.is_empty() {
            return;
        }

        let pitch = self.pitch();
        let half_counts = pitch.map(|p| (radius.max(0.0) / p) as isize);
        let sq_radius = radius * radius;

        let mut stamp = Vec::new();
        for dz in -half_counts.z..=half_counts.z {
            for dy in -half_counts.y..=half_counts.y {
                for dx in -half_counts.x..=half_counts.x {
                    let d = Vector::new(dx as Real, dy as Real, dz as Real).component_mul(&pitch);
                    if (dx, dy, dz) == (0, 0, 0) || d.norm_squared() <= sq_radius {
                        stamp.push([dx, dy, dz]);
                    }
                }
            }
        }

        let dims = self.dims.map(|d| d as isize);
        for pos in positions {
            let rel = (pos - self.bounds.mins).component_div(&pitch);
            let center = [
                rel.x.floor() as isize,
                rel.y.floor() as isize,
                rel.z.floor() as isize,
            ];

            for offset in &stamp {
                let p = [
                    center[0] + offset[0],
                    center[1] + offset[1],
                    center[2] + offset[2],
                ];
                if (0..DIM).all(|i| p[i] >= 0 && p[i] < dims[i]) {
                    let i = self.linear_index(p[0] as usize, p[1] as usize, p[2] as usize);
                    self.data[i] = value;
                }
            }
        }
    }
}

#[inline]
fn coords(dims: [usize; DIM], i: usize) -> [usize; DIM] {
    [i % dims[0], (i / dims[0]) % dims[1], i / (dims[0] * dims[1])]
}

#[cfg(test)]
mod test {
    use super::covered_fraction;
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real};
    use crate::voxels::VoxelGrid;

    #[test]
    fn gaussian_kernel_is_normalized() {
        let mut kernel = VoxelGrid::<Real>::new();
        kernel.set_gaussian_kernel_cube(1.0, 8.0, 33).unwrap();

        assert_eq!(kernel.dims(), [33, 33, 33]);
        assert_eq!(kernel.bounds().mins, Point::new(-4.0, -4.0, -4.0));
        assert_relative_eq!(kernel.trapez_integral(), 1.0, epsilon = 1.0e-3);

        // Peak at the center, symmetric around it.
        let (_, max) = kernel.min_max().unwrap();
        assert_eq!(kernel.get(16, 16, 16), max);
        assert_relative_eq!(
            kernel.get(10, 16, 16),
            kernel.get(22, 16, 16),
            max_relative = 1.0e-4
        );
        assert_relative_eq!(
            kernel.get(16, 3, 16),
            kernel.get(16, 16, 29),
            max_relative = 1.0e-4
        );
    }

    #[test]
    fn gaussian_kernel_uses_std_dev_as_variance() {
        let mut kernel = VoxelGrid::<Real>::new();
        kernel.set_gaussian_kernel_cube(2.0, 0.01, 1).unwrap();
        // 1 / (2 pi * 2)^(3/2)
        assert_relative_eq!(kernel.get(0, 0, 0), 0.022448, epsilon = 1.0e-5);

        // Unit pitch: neighbors of the center sit at distance 1.
        kernel.set_gaussian_kernel_cube(2.0, 5.0, 5).unwrap();
        let ratio = kernel.get(3, 2, 2) / kernel.get(2, 2, 2);
        assert_relative_eq!(ratio, (-0.25 as Real).exp(), max_relative = 1.0e-4);
        let ratio = kernel.get(3, 3, 2) / kernel.get(2, 2, 2);
        assert_relative_eq!(ratio, (-0.5 as Real).exp(), max_relative = 1.0e-4);
    }

    #[test]
    fn binary_sphere() {
        let mut kernel = VoxelGrid::<u8>::new();
        kernel.make_spherical_kernel(3, 1.0, 4, 0).unwrap();

        assert_eq!(kernel.get(1, 1, 1), 4);
        assert_eq!(kernel.get(0, 1, 1), 4);
        assert_eq!(kernel.get(0, 0, 1), 4);
        assert_eq!(kernel.get(0, 0, 0), 0);
        assert_eq!(kernel.count(1), 27 - 8);
    }

    #[test]
    fn antialiased_sphere_volume() {
        let side = 16;
        let mut kernel = VoxelGrid::<f64>::new();
        kernel
            .make_spherical_kernel(side, side as Real, 1.0, 3)
            .unwrap();

        let r = side as f64 / 2.0;
        let exact = 4.0 / 3.0 * std::f64::consts::PI * r * r * r;
        assert_relative_eq!(kernel.sum(), exact, max_relative = 0.01);
        assert!(kernel
            .data()
            .iter()
            .any(|v| *v > 0.0 && *v < 1.0));
    }

    #[test]
    fn covered_fraction_extremes() {
        let sphere = Point::origin();
        assert_eq!(covered_fraction(Point::origin(), &sphere, 100.0, 4), 1.0);
        assert_eq!(
            covered_fraction(Point::new(20.0, 0.0, 0.0), &sphere, 1.0, 4),
            0.0
        );
        // A huge sphere, locally a plane at x = 0.3 covering 20% of the cell.
        let far = Point::new(1000.3, 0.0, 0.0);
        let frac = covered_fraction(Point::origin(), &far, 1.0e6, 6);
        assert_relative_eq!(frac, 0.2, epsilon = 1.0e-2);
    }

    #[test]
    fn fill_spheres_clips_to_the_grid() {
        let mut grid = VoxelGrid::<i32>::with_dims(
            [10, 10, 10],
            Aabb::new(Point::origin(), Point::new(10.0, 10.0, 10.0)),
        )
        .unwrap();
        grid.fill(9);

        grid.fill_spheres_by_position(&[Point::new(0.5, 0.5, 0.5)], 1.0, 1, true);
        // Center, plus its 3 in-range face neighbors.
        assert_eq!(grid.sum(), 4);
        assert_eq!(grid.get(0, 0, 0), 1);
        assert_eq!(grid.get(1, 0, 0), 1);
        assert_eq!(grid.get(1, 1, 0), 0);

        grid.fill_spheres_by_position(&[Point::new(5.5, 5.5, 5.5)], 1.0, 2, false);
        assert_eq!(grid.sum(), 4 + 7 * 2);

        grid.fill_spheres_by_position(&[Point::new(5.5, 5.5, 5.5)], 0.2, 3, true);
        assert_eq!(grid.sum(), 3);
        assert_eq!(grid.get(5, 5, 5), 3);
    }
}
