//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector, DIM};

/// An Axis-Aligned Bounding Box (AABB).
///
/// This is the physical extent a [`VoxelGrid`](crate::voxels::VoxelGrid) is mapped onto: cell
/// `(0, 0, 0)` has its lowest corner at `mins` and the last cell has its highest corner at
/// `maxs`.
///
/// # Structure
///
/// - **mins**: The point with the smallest coordinates on each axis.
/// - **maxs**: The point with the largest coordinates on each axis.
/// - **Invariant**: `mins.x < maxs.x`, `mins.y < maxs.y` and `mins.z < maxs.z` is expected by
///   every pitch computation. It is not enforced.
///
/// # Example
///
/// ```rust
/// # #[cfg(feature = "f32")] {
/// use voxgrid3d::bounding_volume::Aabb;
/// use nalgebra::Point3;
///
/// let aabb = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(0.5, 0.5, 0.5));
///
/// assert!(aabb.contains_local_point(&Point3::origin()));
/// assert_eq!(aabb.extents().x, 1.0);
/// # }
/// ```
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::unit()
    }
}

impl Aabb {
    /// Creates a new AABB from its minimum and maximum corners.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// The unit cube `[0, 1]^3`.
    ///
    /// This is the bounds of a freshly created, empty, grid.
    #[inline]
    pub fn unit() -> Aabb {
        Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0))
    }

    /// The box `[0, dims[0]] x [0, dims[1]] x [0, dims[2]]`, i.e., one unit of length per cell.
    #[inline]
    pub fn from_dims(dims: [usize; DIM]) -> Aabb {
        Aabb::new(
            Point::origin(),
            Point::new(dims[0] as Real, dims[1] as Real, dims[2] as Real),
        )
    }

    /// Creates a new AABB from its center and half-extents.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The extents of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Multiplies both corners component-wise by `scale`.
    ///
    /// Unlike a scaling wrt. the center, this scales wrt. the origin so `mins` and `maxs` both
    /// move. Negative scale components swap the corners on that axis.
    #[inline]
    #[must_use]
    pub fn scaled(self, scale: &Vector<Real>) -> Self {
        let a = self.mins.coords.component_mul(scale);
        let b = self.maxs.coords.component_mul(scale);
        Self {
            mins: a.inf(&b).into(),
            maxs: a.sup(&b).into(),
        }
    }

    /// Moves every face of this AABB inward by `amount`, on each axis.
    #[inline]
    #[must_use]
    pub fn shrunk(self, amount: &Vector<Real>) -> Self {
        Self::new(self.mins + amount, self.maxs - amount)
    }

    /// Does this AABB contains a point expressed in the same coordinate frame as `self`?
    ///
    /// Points lying exactly on a face are considered inside.
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        for i in 0..DIM {
            if point[i] < self.mins[i] || point[i] > self.maxs[i] {
                return false;
            }
        }

        true
    }
}
