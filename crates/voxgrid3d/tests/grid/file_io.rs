use voxgrid3d::{VoxelGrid, VoxelsError};

#[test]
fn raw_file_round_trip() {
    let path = std::env::temp_dir().join(format!("voxgrid3d-it-{}.raw", std::process::id()));

    let mut grid = VoxelGrid::<f32>::init([7, 3, 2]).unwrap();
    for (i, v) in grid.data_mut().iter_mut().enumerate() {
        *v = i as f32 * 0.25 - 3.0;
    }
    grid.write_file(&path).unwrap();

    let mut loaded = VoxelGrid::<f32>::new();
    loaded.load_file(&path, [7, 3, 2]).unwrap();
    assert_eq!(loaded, grid);
    assert_eq!(
        std::fs::metadata(&path).unwrap().len() as usize,
        grid.len() * VoxelGrid::<f32>::size_of_value_type()
    );

    // Reading the same bytes as a narrower type doubles the cell count.
    let mut halves = VoxelGrid::<u16>::new();
    halves.load_file(&path, [14, 3, 2]).unwrap();
    assert!(matches!(
        halves.load_file(&path, [7, 3, 2]),
        Err(VoxelsError::FileSize { .. })
    ));

    std::fs::remove_file(&path).unwrap();
}
