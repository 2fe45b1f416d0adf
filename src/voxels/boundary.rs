use super::{VoxelGrid, VoxelValue};

/// Boundary policy used to synthesize values for coordinates outside of a grid.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundMode {
    /// No padding: the operation only reads inside of the grid and shrinks its output
    /// accordingly. Reading out of range with this mode is a programming error.
    #[default]
    Clip,
    /// Out-of-range coordinates read the nearest cell on the grid boundary.
    Hold,
    /// Reserved: extrapolation holding the boundary derivative. Not implemented.
    DerivHold,
    /// Out-of-range coordinates are reflected about the nearest face, repeating the boundary
    /// cell: `-1` reads `0` and `n` reads `n - 1`.
    Mirror,
    /// Out-of-range coordinates read zero.
    Zero,
}

impl BoundMode {
    /// Does this mode synthesize values outside of the grid?
    #[inline]
    pub fn is_padding(self) -> bool {
        matches!(self, BoundMode::Hold | BoundMode::Mirror | BoundMode::Zero)
    }
}

/// Region preserved, or cut away, when a grid changes size.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ClipMode {
    /// No clipping at all: the operation must divide the grid exactly.
    #[default]
    None,
    /// Keep the cells with the lowest indices, anchoring the grid at cell `(0, 0, 0)`.
    LowerSouthWest,
    /// Keep the cells with the highest indices. Not implemented.
    UpperNorthEast,
}

/// Maps a possibly out-of-range coordinate along an axis of `len` cells to a valid one.
///
/// Returns `None` if the coordinate reads zero (with [`BoundMode::Zero`]).
///
/// # Panics
/// Panics if the coordinate is out of range and `mode` is [`BoundMode::Clip`] or
/// [`BoundMode::DerivHold`], or if `len` is zero.
#[inline]
pub(crate) fn padded_coordinate(i: isize, len: usize, mode: BoundMode) -> Option<usize> {
    assert!(len > 0, "Cannot pad an empty axis.");
    let n = len as isize;

    if i >= 0 && i < n {
        return Some(i as usize);
    }

    match mode {
        BoundMode::Hold => Some(i.clamp(0, n - 1) as usize),
        BoundMode::Mirror => {
            let period = 2 * n;
            let m = i.rem_euclid(period);
            let reflected = if m < n { m } else { period - 1 - m };
            Some(reflected as usize)
        }
        BoundMode::Zero => None,
        BoundMode::Clip => panic!(
            "Coordinate {} out of the range [0, {}) with BoundMode::Clip.",
            i, len
        ),
        BoundMode::DerivHold => panic!("BoundMode::DerivHold is reserved and not implemented."),
    }
}

impl<T: VoxelValue> VoxelGrid<T> {
    /// Reads the cell `(x, y, z)`, which may lie outside of the grid.
    ///
    /// Out-of-range coordinates are resolved with the boundary policy `mode`. This is the
    /// single access path of every boundary-sensitive algorithm of this crate.
    ///
    /// # Panics
    /// Panics if the grid is empty, or if the coordinates are out of range and `mode` is
    /// [`BoundMode::Clip`] or [`BoundMode::DerivHold`].
    pub fn padded_data(&self, x: isize, y: isize, z: isize, mode: BoundMode) -> T {
        let [nx, ny, nz] = self.dims;
        match (
            padded_coordinate(x, nx, mode),
            padded_coordinate(y, ny, mode),
            padded_coordinate(z, nz, mode),
        ) {
            (Some(x), Some(y), Some(z)) => self.data[self.linear_index(x, y, z)],
            _ => T::zero(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{padded_coordinate, BoundMode};
    use crate::voxels::VoxelGrid;

    #[test]
    fn mirror_reflects_with_edge_repetition() {
        assert_eq!(padded_coordinate(-1, 4, BoundMode::Mirror), Some(0));
        assert_eq!(padded_coordinate(-2, 4, BoundMode::Mirror), Some(1));
        assert_eq!(padded_coordinate(4, 4, BoundMode::Mirror), Some(3));
        assert_eq!(padded_coordinate(5, 4, BoundMode::Mirror), Some(2));
        // Far away coordinates keep bouncing between the faces.
        assert_eq!(padded_coordinate(9, 4, BoundMode::Mirror), Some(1));
        assert_eq!(padded_coordinate(-1, 1, BoundMode::Mirror), Some(0));
    }

    #[test]
    fn hold_clamps_to_the_faces() {
        assert_eq!(padded_coordinate(-10, 4, BoundMode::Hold), Some(0));
        assert_eq!(padded_coordinate(10, 4, BoundMode::Hold), Some(3));
        assert_eq!(padded_coordinate(2, 4, BoundMode::Hold), Some(2));
    }

    #[test]
    fn padded_data_policies() {
        let mut grid = VoxelGrid::<f32>::init([3, 3, 3]).unwrap();
        for (i, v) in grid.data_mut().iter_mut().enumerate() {
            *v = i as f32;
        }

        assert_eq!(grid.padded_data(-1, 0, 0, BoundMode::Zero), 0.0);
        assert_eq!(grid.padded_data(-1, 1, 2, BoundMode::Hold), grid.get(0, 1, 2));
        assert_eq!(grid.padded_data(3, 1, 2, BoundMode::Mirror), grid.get(2, 1, 2));
        assert_eq!(grid.padded_data(1, 1, 1, BoundMode::Clip), grid.get(1, 1, 1));
    }

    #[test]
    #[should_panic]
    fn clip_out_of_range_panics() {
        let grid = VoxelGrid::<f32>::init([2, 2, 2]).unwrap();
        let _ = grid.padded_data(2, 0, 0, BoundMode::Clip);
    }
}
