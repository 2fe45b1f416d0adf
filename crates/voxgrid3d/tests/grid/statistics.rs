use na::Point3;
use std::sync::atomic::{AtomicUsize, Ordering};
use voxgrid3d::bounding_volume::Aabb;
use voxgrid3d::{VoxelGrid, VoxelsError};

#[test]
fn trapez_integral_over_unit_and_scaled_bounds() {
    let mut grid = VoxelGrid::<f32>::with_dims([5, 5, 5], Aabb::unit()).unwrap();
    grid.fill(1.0);
    assert_relative_eq!(grid.trapez_integral(), 1.0, epsilon = 1.0e-3);

    grid.set_bounds(Aabb::new(Point3::origin(), Point3::new(5.0, 5.0, 5.0)));
    assert_relative_eq!(grid.trapez_integral(), 125.0, epsilon = 1.0e-3);
}

#[test]
fn sum_and_count_of_a_constant_grid() {
    let mut grid = VoxelGrid::<f32>::init([3, 3, 3]).unwrap();
    grid.fill(2.0);

    assert_relative_eq!(grid.sum(), 54.0);
    assert_eq!(grid.count(1.0), 27);
    assert_eq!(grid.count(2.0), 27);
    assert_eq!(grid.count(2.5), 0);
    assert_eq!(grid.min_max(), Some((2.0, 2.0)));
}

#[test]
fn histogram_can_be_cancelled_midway() {
    let mut grid = VoxelGrid::<f32>::init([64, 64, 16]).unwrap();
    for (i, v) in grid.data_mut().iter_mut().enumerate() {
        *v = (i % 100) as f32;
    }

    let hist = grid.histogram(100, &|_: bool| true).unwrap();
    assert_eq!(hist.iter().sum::<usize>(), grid.len());

    let polls = AtomicUsize::new(0);
    let cancel_later = |_: bool| polls.fetch_add(1, Ordering::SeqCst) < 3;
    assert!(matches!(
        grid.histogram(100, &cancel_later),
        Err(VoxelsError::Aborted)
    ));
    // The callback is not called anymore once it asked for a cancellation.
    assert_eq!(polls.load(Ordering::SeqCst), 4);
}

#[test]
fn extrema_and_thresholds() {
    let mut grid = VoxelGrid::<i32>::init([4, 4, 4]).unwrap();
    grid.set(1, 2, 3, 10);
    grid.set(3, 0, 0, 10);
    grid.set(0, 1, 0, -5);

    assert_eq!(grid.find_n_extrema(2, true), vec![[3, 0, 0], [1, 2, 3]]);
    assert_eq!(grid.find_n_extrema(1, false), vec![[0, 1, 0]]);
    assert_eq!(
        grid.threshold_for_position(0, false),
        vec![Point3::new(3.5, 0.5, 0.5), Point3::new(1.5, 2.5, 3.5)]
    );
}
