use na::Point3;
use oorandom::Rand32;
use voxgrid3d::bounding_volume::Aabb;
use voxgrid3d::{ClipMode, VoxelGrid};

#[test]
fn resize_then_fill_round_trip() {
    let mut rng = Rand32::new(42);
    let mut grid = VoxelGrid::<f32>::new();

    for _ in 0..20 {
        let dims = [
            rng.rand_range(1..12) as usize,
            rng.rand_range(1..12) as usize,
            rng.rand_range(1..12) as usize,
        ];
        let value = rng.rand_float() * 100.0 - 50.0;

        grid.resize(dims, Aabb::from_dims(dims)).unwrap();
        grid.fill(value);

        assert_eq!(grid.dims(), dims);
        assert_eq!(grid.len(), dims[0] * dims[1] * dims[2]);
        for z in 0..dims[2] {
            for y in 0..dims[1] {
                for x in 0..dims[0] {
                    assert_eq!(grid.get(x, y, z), value);
                }
            }
        }
    }
}

#[test]
fn resize_keep_data_preserves_the_overlap() {
    let mut grid = VoxelGrid::<u32>::init([6, 5, 4]).unwrap();
    for (i, v) in grid.data_mut().iter_mut().enumerate() {
        *v = i as u32 * 3 + 1;
    }
    let original = grid.clone();

    let bounds = Aabb::new(Point3::origin(), Point3::new(3.0, 2.0, 2.0));
    grid.resize_keep_data([3, 2, 2], ClipMode::LowerSouthWest, bounds, 0, &|_: bool| true)
        .unwrap();

    assert_eq!(grid.dims(), [3, 2, 2]);
    assert_eq!(*grid.bounds(), bounds);
    for z in 0..2 {
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid.get(x, y, z), original.get(x, y, z));
            }
        }
    }
}

#[test]
fn clone_swap_and_equality() {
    let mut a = VoxelGrid::<f64>::init([2, 3, 4]).unwrap();
    a.fill(1.5);
    let mut b = VoxelGrid::<f64>::new();
    assert_ne!(a, b);

    let copy = a.clone();
    assert_eq!(copy, a);

    a.swap(&mut b);
    assert!(a.is_empty());
    assert_eq!(b, copy);

    // Same number of cells, different shapes.
    let mut c = VoxelGrid::<f64>::init([4, 3, 2]).unwrap();
    c.fill(1.5);
    assert_eq!(c.data(), copy.data());
    assert_ne!(c, copy);
}
