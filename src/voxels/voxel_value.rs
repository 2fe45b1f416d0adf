use crate::math::Real;
use num::{Bounded, NumCast, One, Zero};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// The numeric capabilities required from the values stored in a [`VoxelGrid`](super::VoxelGrid).
///
/// This is implemented automatically for every type providing a zero, a one, the four basic
/// arithmetic operators, a partial ordering, bounds, and numeric casts. All the primitive
/// integer and floating-point types qualify.
pub trait VoxelValue:
    Copy
    + Send
    + Sync
    + Debug
    + PartialOrd
    + Zero
    + One
    + Bounded
    + NumCast
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    /// Converts this value to the spatial scalar type.
    ///
    /// Values that cannot be represented are mapped to zero.
    #[inline]
    fn to_real(self) -> Real {
        num::cast(self).unwrap_or(0.0)
    }

    /// Converts a spatial scalar to a voxel value.
    ///
    /// Values that cannot be represented (NaN, or out of range for integer types) are mapped
    /// to zero. Fractional parts are truncated for integer types.
    #[inline]
    fn from_real(val: Real) -> Self {
        num::cast(val).unwrap_or_else(Self::zero)
    }
}

impl<T> VoxelValue for T where
    T: Copy
        + Send
        + Sync
        + Debug
        + PartialOrd
        + Zero
        + One
        + Bounded
        + NumCast
        + Add<Output = T>
        + Sub<Output = T>
        + Mul<Output = T>
        + Div<Output = T>
        + 'static
{
}

/// The smallest of two partially-ordered values, `a` if they are not comparable.
#[inline]
pub(crate) fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}

/// The largest of two partially-ordered values, `a` if they are not comparable.
#[inline]
pub(crate) fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}
