//! Raw binary dumps of the cells of a grid.
//!
//! The file format has no header: it is the `nx * ny * nz` cell values in linear order,
//! each encoded with the native byte order and layout of `T`. The dimensions must be known
//! by the reader.

use super::voxel_grid::cell_count;
use super::{VoxelGrid, VoxelValue, VoxelsError};
use crate::bounding_volume::Aabb;
use crate::math::DIM;
use bytemuck::Pod;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

impl<T: VoxelValue + Pod> VoxelGrid<T> {
    /// Replaces the content of this grid with the raw cell values stored at `path`.
    ///
    /// The file must contain exactly `nx * ny * nz` values of type `T`. The grid is resized
    /// to `dims`, with the bounds `(0, 0, 0) - (nx, ny, nz)`.
    ///
    /// Opening failures, size mismatches, and read failures are reported as
    /// [`VoxelsError::FileOpen`], [`VoxelsError::FileSize`], and [`VoxelsError::FileRead`].
    /// After a read failure the cells of the grid are unspecified.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        dims: [usize; DIM],
    ) -> Result<(), VoxelsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(VoxelsError::FileOpen)?;
        let actual = file.metadata().map_err(VoxelsError::FileOpen)?.len();
        let expected =
            (cell_count(dims)? as u64).saturating_mul(Self::size_of_value_type() as u64);

        if actual != expected {
            return Err(VoxelsError::FileSize { expected, actual });
        }

        self.resize(dims, Aabb::from_dims(dims))?;
        let mut reader = BufReader::new(file);
        reader
            .read_exact(bytemuck::cast_slice_mut(&mut self.data))
            .map_err(VoxelsError::FileRead)?;

        log::debug!("Loaded {:?} voxels from {}.", dims, path.display());
        Ok(())
    }

    /// Writes the raw cell values of this grid to `path`, creating or truncating it.
    pub fn write_file(&self, path: impl AsRef<Path>) -> Result<(), VoxelsError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(VoxelsError::FileOpen)?;
        let mut writer = BufWriter::new(file);

        writer
            .write_all(bytemuck::cast_slice(&self.data))
            .map_err(VoxelsError::FileWrite)?;
        writer.flush().map_err(VoxelsError::FileWrite)?;

        log::debug!("Wrote {:?} voxels to {}.", self.dims, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::voxels::{VoxelGrid, VoxelsError};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("voxgrid-{}-{}.raw", std::process::id(), name))
    }

    #[test]
    fn write_then_load() {
        let path = temp_path("write_then_load");
        let mut grid = VoxelGrid::<u16>::init([3, 2, 5]).unwrap();
        for (i, v) in grid.data_mut().iter_mut().enumerate() {
            *v = (i * 31) as u16;
        }
        grid.write_file(&path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert_eq!(metadata.len(), 30 * 2);

        let mut loaded = VoxelGrid::<u16>::new();
        loaded.load_file(&path, [3, 2, 5]).unwrap();
        assert_eq!(loaded, grid);

        // Same byte count, different layout: accepted.
        loaded.load_file(&path, [5, 3, 2]).unwrap();
        assert_eq!(loaded.dims(), [5, 3, 2]);

        assert!(matches!(
            loaded.load_file(&path, [3, 2, 4]),
            Err(VoxelsError::FileSize {
                expected: 48,
                actual: 60
            })
        ));

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(
            loaded.load_file(&path, [3, 2, 5]),
            Err(VoxelsError::FileOpen(_))
        ));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let path = temp_path("missing").join("nested").join("grid.raw");
        let grid = VoxelGrid::<f32>::init([1, 1, 1]).unwrap();
        assert!(matches!(
            grid.write_file(path),
            Err(VoxelsError::FileOpen(_))
        ));
    }
}
