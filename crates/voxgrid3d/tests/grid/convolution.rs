use oorandom::Rand32;
use voxgrid3d::{BoundMode, VoxelGrid};

#[test]
fn unit_kernel_is_the_identity() {
    let mut data = VoxelGrid::<f32>::init([4, 5, 6]).unwrap();
    data.fill(1.0);
    let mut kernel = VoxelGrid::<f32>::init([1, 1, 1]).unwrap();
    kernel.fill(1.0);

    let mut result = VoxelGrid::new();
    data.convolve(&kernel, &mut result, BoundMode::Clip).unwrap();

    assert_eq!(result, data);
    assert_eq!(result.bounds(), data.bounds());
}

#[test]
fn clipped_convolution_of_constants() {
    let mut data = VoxelGrid::<f32>::init([3, 3, 3]).unwrap();
    data.fill(2.0);
    let mut kernel = VoxelGrid::<f32>::init([3, 3, 3]).unwrap();
    kernel.fill(2.0);

    let mut result = VoxelGrid::new();
    data.convolve(&kernel, &mut result, BoundMode::Clip).unwrap();

    assert_eq!(result.dims(), [1, 1, 1]);
    assert_eq!(result.get(0, 0, 0), 108.0);

    let mut data = VoxelGrid::<f32>::init([7, 6, 5]).unwrap();
    data.fill(2.0);
    data.convolve(&kernel, &mut result, BoundMode::Clip).unwrap();
    assert_eq!(result.dims(), [5, 4, 3]);
    assert!(result.data().iter().all(|v| *v == 108.0));
}

#[test]
fn gaussian_response_to_an_impulse() {
    let mut kernel = VoxelGrid::<f32>::new();
    kernel.set_gaussian_kernel_cube(1.0, 5.0, 5).unwrap();

    let mut data = VoxelGrid::<f32>::init([9, 9, 9]).unwrap();
    data.set(4, 4, 4, 1.0);

    let mut result = VoxelGrid::new();
    data.convolve(&kernel, &mut result, BoundMode::Zero).unwrap();

    let result_max = result.max().unwrap();
    assert_relative_eq!(result_max, kernel.max().unwrap(), epsilon = 1.0e-6);
    assert!(result_max > 0.0 && result_max < 1.0);
    assert_relative_eq!(result.sum(), kernel.sum(), epsilon = 1.0e-5);
}

#[test]
fn separable_gaussian_matches_full_convolution() {
    let mut rng = Rand32::new(7);
    let mut data = VoxelGrid::<f32>::init([10, 8, 7]).unwrap();
    for v in data.data_mut() {
        *v = rng.rand_float();
    }

    let mut kernel = VoxelGrid::<f32>::new();
    kernel.set_gaussian_kernel_cube(0.8, 2.5, 5).unwrap();

    for mode in [BoundMode::Hold, BoundMode::Mirror, BoundMode::Zero] {
        let mut full = VoxelGrid::new();
        data.convolve(&kernel, &mut full, mode).unwrap();

        let mut receiver = data.clone();
        let mut separable = VoxelGrid::new();
        receiver
            .separable_convolve(&kernel, &mut separable, mode)
            .unwrap();

        assert_eq!(separable.dims(), data.dims());
        for (a, b) in separable.data().iter().zip(full.data()) {
            assert_relative_eq!(*a, *b, epsilon = 1.0e-4, max_relative = 1.0e-3);
        }
    }
}
