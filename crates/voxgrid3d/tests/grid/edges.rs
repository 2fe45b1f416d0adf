use oorandom::Rand32;
use voxgrid3d::voxels::{VoxelEdge, EDGES_PER_CELL};
use voxgrid3d::VoxelGrid;

#[test]
fn edge_ids_decode_to_their_owner() {
    let mut rng = Rand32::new(3);
    let dims = [4, 3, 5];
    let mut grid = VoxelGrid::<u16>::init(dims).unwrap();
    for v in grid.data_mut() {
        *v = rng.rand_range(0..1000) as u16;
    }

    for z in 0..dims[2] {
        for y in 0..dims[1] {
            for x in 0..dims[0] {
                for local in 0..EDGES_PER_CELL {
                    let id = grid.edge_index(x, y, z, local);
                    let VoxelEdge { owner, axis } = grid.edge_owner(id);
                    assert_eq!(axis, local / 4);

                    // Re-encoding from the owner, with the first edge of the axis group, is
                    // the identity.
                    assert_eq!(grid.edge_index(owner[0], owner[1], owner[2], axis * 4), id);

                    let (a, b) = grid.edge_ends(id);
                    assert_eq!(a, grid.index_to_point(owner[0], owner[1], owner[2]));
                    assert_relative_eq!((b - a).norm(), grid.pitch()[axis]);

                    let mut upper = owner;
                    upper[axis] += 1;
                    let expected = if (0..3).all(|i| upper[i] < dims[i]) {
                        Some((
                            grid.get(owner[0], owner[1], owner[2]),
                            grid.get(upper[0], upper[1], upper[2]),
                        ))
                    } else {
                        None
                    };
                    assert_eq!(grid.edge_end_values(id), expected);
                }
            }
        }
    }
}
