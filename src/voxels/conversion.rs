use super::voxel_grid::try_alloc;
use super::{VoxelGrid, VoxelValue, VoxelsError};
use crate::utils::parallel;

/// Converts every cell of `src` to another value type.
///
/// Values that cannot be represented by `U` (e.g. negative values cast to an unsigned type)
/// become `U::zero()`. The dimensions and bounds are copied.
pub fn cast_voxels<T: VoxelValue, U: VoxelValue>(
    src: &VoxelGrid<T>,
) -> Result<VoxelGrid<U>, VoxelsError> {
    let mut data = try_alloc(src.len(), U::zero())?;
    parallel::for_each_indexed_mut(&mut data, |i, v| {
        *v = num::cast(src.data[i]).unwrap_or_else(U::zero);
    });

    Ok(VoxelGrid {
        dims: src.dims,
        data,
        bounds: src.bounds,
    })
}

/// Sums every cell of `src` into an accumulator of type `U`.
///
/// This avoids overflowing narrow cell types, e.g. summing a `u8` grid as `u64`. Cells that
/// cannot be represented by `U` are skipped.
pub fn sum_voxels<T: VoxelValue, U: VoxelValue>(src: &VoxelGrid<T>) -> U {
    parallel::fold_chunks(
        &src.data,
        U::zero,
        |acc, _, chunk| {
            chunk
                .iter()
                .filter_map(|v| num::cast::<T, U>(*v))
                .fold(acc, |acc, v| acc + v)
        },
        |a, b| a + b,
    )
}
