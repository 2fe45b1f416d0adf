use super::{VoxelGrid, VoxelValue};
use crate::math::{Point, Real, DIM};

/// The number of edges of a single cell.
pub const EDGES_PER_CELL: usize = 12;

/// Offset from a cell to the lattice point owning each of its 12 local edges.
///
/// Local edges `0..4` are aligned with `x`, `4..8` with `y`, and `8..12` with `z`. The
/// first edge of each group starts at the lowest corner of the cell.
const LOCAL_EDGE_OFFSETS: [[usize; DIM]; EDGES_PER_CELL] = [
    [0, 0, 0],
    [0, 1, 0],
    [0, 0, 1],
    [0, 1, 1],
    [0, 0, 0],
    [0, 0, 1],
    [1, 0, 0],
    [1, 0, 1],
    [0, 0, 0],
    [0, 1, 0],
    [1, 0, 0],
    [1, 1, 0],
];

/// A cell edge, identified by its lowest end on the lattice of cell corners and its axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoxelEdge {
    /// The lattice point at the lowest end of the edge. Each coordinate ranges over
    /// `0..=dims[i]`.
    pub owner: [usize; DIM],
    /// The axis the edge is aligned with (0, 1 or 2).
    pub axis: usize,
}

impl<T> VoxelGrid<T> {
    /// A unique id for the `local`-th edge of the cell `(x, y, z)`.
    ///
    /// Edges shared by adjacent cells get the same id: each id is owned by the lattice point
    /// at the lowest end of the edge. See [`EDGES_PER_CELL`] for the local edge numbering.
    ///
    /// # Panics
    /// Panics if `local >= 12`.
    pub fn edge_index(&self, x: usize, y: usize, z: usize, local: usize) -> usize {
        assert!(local < EDGES_PER_CELL, "Invalid local edge index {}.", local);

        let [dx, dy, dz] = LOCAL_EDGE_OFFSETS[local];
        let (x, y, z) = (x + dx, y + dy, z + dz);
        let [_, ny, nz] = self.dims;

        EDGES_PER_CELL * (z + y * (nz + 1) + x * (nz + 1) * (ny + 1)) + 4 * (local / 4)
    }

    /// Decodes an id computed by [`Self::edge_index`].
    pub fn edge_owner(&self, edge: usize) -> VoxelEdge {
        let [_, ny, nz] = self.dims;
        let axis = (edge % EDGES_PER_CELL) / 4;
        let lattice = edge / EDGES_PER_CELL;
        let plane = (nz + 1) * (ny + 1);

        let x = lattice / plane;
        let y = (lattice % plane) / (nz + 1);
        let z = lattice % (nz + 1);

        VoxelEdge {
            owner: [x, y, z],
            axis,
        }
    }

    /// The spatial end points of an edge, lowest first.
    pub fn edge_ends(&self, edge: usize) -> (Point<Real>, Point<Real>) {
        let VoxelEdge { owner, axis } = self.edge_owner(edge);
        let mut upper = owner;
        upper[axis] += 1;

        (
            self.index_to_point(owner[0], owner[1], owner[2]),
            self.index_to_point(upper[0], upper[1], upper[2]),
        )
    }
}

impl<T: VoxelValue> VoxelGrid<T> {
    /// The values of the two cells joined by an edge of the dual grid of cell samples.
    ///
    /// The cell `(x, y, z)` is seen as a sample located at the lattice point `(x, y, z)`, so
    /// the edge owned by `(x, y, z)` along `axis` joins the samples of `(x, y, z)` and of the
    /// next cell along `axis`. Returns `None` if either of them is outside of the grid.
    pub fn edge_end_values(&self, edge: usize) -> Option<(T, T)> {
        let VoxelEdge { owner, axis } = self.edge_owner(edge);
        let mut upper = owner;
        upper[axis] += 1;

        if (0..DIM).any(|i| upper[i] >= self.dims[i]) {
            return None;
        }

        Some((
            self.data[self.linear_index(owner[0], owner[1], owner[2])],
            self.data[self.linear_index(upper[0], upper[1], upper[2])],
        ))
    }
}
