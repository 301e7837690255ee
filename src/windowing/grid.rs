//! Mesh-block, patch and stride shapes.
//!
//! A flat data array is a sequence of mesh blocks, one per simulation time
//! step, each stored row-major with x3 fastest. These types describe the
//! block extent and the patch tiling within it. Axis numbering in errors is
//! `1, 2, 3` for x1, x2, x3.
use crate::windowing::errors::{WindowError, WindowResult};

/// Spatial extent `(nx1, nx2, nx3)` of one mesh block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeshGrid {
    pub nx1: usize,
    pub nx2: usize,
    pub nx3: usize,
}

impl MeshGrid {
    /// Build a grid with strictly positive extents whose volume fits in `usize`.
    ///
    /// # Errors
    /// - `InvalidGridExtent` for the first zero extent.
    /// - `GridVolumeOverflow` when `nx1·nx2·nx3` overflows.
    pub fn new(nx1: usize, nx2: usize, nx3: usize) -> WindowResult<Self> {
        if let Some((axis, extent)) = first_zero([nx1, nx2, nx3]) {
            return Err(WindowError::InvalidGridExtent { axis, extent });
        }
        let grid = MeshGrid { nx1, nx2, nx3 };
        grid.checked_volume()?;
        Ok(grid)
    }

    /// Cubic grid `(n, n, n)`.
    pub fn cube(n: usize) -> WindowResult<Self> {
        Self::new(n, n, n)
    }

    /// Number of samples in one block.
    ///
    /// Exact for grids built through [`MeshGrid::new`]; saturates at
    /// `usize::MAX` for hand-built grids whose volume overflows.
    pub fn volume(&self) -> usize {
        self.checked_volume().unwrap_or(usize::MAX)
    }

    /// # Errors
    /// `GridVolumeOverflow` when `nx1·nx2·nx3` overflows.
    pub fn checked_volume(&self) -> WindowResult<usize> {
        self.nx1
            .checked_mul(self.nx2)
            .and_then(|v| v.checked_mul(self.nx3))
            .ok_or(WindowError::GridVolumeOverflow { nx1: self.nx1, nx2: self.nx2, nx3: self.nx3 })
    }

    /// Flat-index distance between neighbouring x1 planes (`nx2·nx3`).
    pub fn x1_stride(&self) -> usize {
        self.nx2 * self.nx3
    }

    /// Flat-index distance between neighbouring x2 rows (`nx3`).
    pub fn x2_stride(&self) -> usize {
        self.nx3
    }

    /// Row-major flat offset of `(i1, i2, i3)` within a block.
    pub fn offset(&self, i1: usize, i2: usize, i3: usize) -> usize {
        i1 * self.x1_stride() + i2 * self.x2_stride() + i3
    }

    /// Number of whole blocks in a flat array of length `len`.
    ///
    /// # Errors
    /// - `EmptyData` when `len == 0`.
    /// - `NotBlockAligned` when `len` is not a multiple of the volume.
    pub fn num_blocks(&self, len: usize) -> WindowResult<usize> {
        if len == 0 {
            return Err(WindowError::EmptyData);
        }
        let volume = self.checked_volume()?;
        if volume == 0 || len % volume != 0 {
            return Err(WindowError::NotBlockAligned { len, volume });
        }
        Ok(len / volume)
    }

    pub(crate) fn extents(&self) -> [usize; 3] {
        [self.nx1, self.nx2, self.nx3]
    }
}

/// Patch extent `(x1, x2, x3)` within a mesh block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchShape {
    pub x1: usize,
    pub x2: usize,
    pub x3: usize,
}

impl PatchShape {
    /// # Errors
    /// `InvalidPatchExtent` for the first zero extent.
    pub fn new(x1: usize, x2: usize, x3: usize) -> WindowResult<Self> {
        first_zero([x1, x2, x3])
            .map_or(Ok(PatchShape { x1, x2, x3 }), |(axis, extent)| {
                Err(WindowError::InvalidPatchExtent { axis, extent })
            })
    }

    /// Number of samples in one patch snapshot.
    pub fn volume(&self) -> usize {
        self.x1 * self.x2 * self.x3
    }

    pub(crate) fn extents(&self) -> [usize; 3] {
        [self.x1, self.x2, self.x3]
    }
}

impl Default for PatchShape {
    fn default() -> Self {
        PatchShape { x1: 4, x2: 4, x3: 4 }
    }
}

/// Step `(s1, s2, s3)` between neighbouring overlapping patch origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchStride {
    pub s1: usize,
    pub s2: usize,
    pub s3: usize,
}

impl PatchStride {
    /// # Errors
    /// `InvalidStride` for the first zero step.
    pub fn new(s1: usize, s2: usize, s3: usize) -> WindowResult<Self> {
        first_zero([s1, s2, s3]).map_or(Ok(PatchStride { s1, s2, s3 }), |(axis, stride)| {
            Err(WindowError::InvalidStride { axis, stride })
        })
    }

    pub(crate) fn extents(&self) -> [usize; 3] {
        [self.s1, self.s2, self.s3]
    }
}

impl Default for PatchStride {
    fn default() -> Self {
        PatchStride { s1: 1, s2: 1, s3: 1 }
    }
}

/// First zero entry as `(1-based axis, value)`.
fn first_zero(extents: [usize; 3]) -> Option<(usize, usize)> {
    extents.iter().position(|&e| e == 0).map(|i| (i + 1, extents[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Check volume, strides and row-major offsets.
    //
    // Given
    // -----
    // - Grid (2, 3, 4).
    //
    // Expect
    // ------
    // - volume 24, x1 stride 12, x2 stride 4, offset(1, 2, 3) = 12 + 8 + 3.
    fn grid_offsets_are_row_major_with_x3_fastest() {
        let g = MeshGrid::new(2, 3, 4).unwrap();

        assert_eq!(g.volume(), 24);
        assert_eq!(g.x1_stride(), 12);
        assert_eq!(g.x2_stride(), 4);
        assert_eq!(g.offset(1, 2, 3), 23);
        assert_eq!(g.offset(0, 0, 1), 1);
    }

    #[test]
    // Purpose
    // -------
    // Block counting accepts aligned lengths and rejects the rest.
    //
    // Given
    // -----
    // - Grid (2, 2, 2) and lengths 40, 41, 0.
    //
    // Expect
    // ------
    // - 5 blocks; `NotBlockAligned`; `EmptyData`.
    fn num_blocks_requires_alignment() {
        let g = MeshGrid::cube(2).unwrap();

        assert_eq!(g.num_blocks(40), Ok(5));
        assert_eq!(g.num_blocks(41), Err(WindowError::NotBlockAligned { len: 41, volume: 8 }));
        assert_eq!(g.num_blocks(0), Err(WindowError::EmptyData));
    }

    #[test]
    // Purpose
    // -------
    // Zero extents are rejected with the offending axis.
    //
    // Given
    // -----
    // - A zero in the second grid axis, third patch axis, first stride axis.
    //
    // Expect
    // ------
    // - Matching `axis` payloads.
    fn zero_extents_report_axis() {
        assert_eq!(
            MeshGrid::new(4, 0, 4).unwrap_err(),
            WindowError::InvalidGridExtent { axis: 2, extent: 0 }
        );
        assert_eq!(
            PatchShape::new(1, 1, 0).unwrap_err(),
            WindowError::InvalidPatchExtent { axis: 3, extent: 0 }
        );
        assert_eq!(PatchStride::new(0, 1, 1).unwrap_err(), WindowError::InvalidStride { axis: 1, stride: 0 });
        assert_eq!(PatchShape::new(2, 2, 2).unwrap().volume(), 8);
    }

    #[test]
    // Purpose
    // -------
    // Extents whose product overflows `usize` are rejected at construction.
    //
    // Given
    // -----
    // - Grid (2²², 2²², 2²²), volume 2⁶⁶; then the same extents as a struct
    //   literal passed to `num_blocks`.
    //
    // Expect
    // ------
    // - `GridVolumeOverflow` from `new` and from `num_blocks`; `volume()`
    //   saturates instead of panicking.
    fn overflowing_volume_is_rejected() {
        let n = 1usize << 22;
        let overflow = WindowError::GridVolumeOverflow { nx1: n, nx2: n, nx3: n };

        assert_eq!(MeshGrid::new(n, n, n).unwrap_err(), overflow);

        let g = MeshGrid { nx1: n, nx2: n, nx3: n };
        assert_eq!(g.num_blocks(64).unwrap_err(), overflow);
        assert_eq!(g.volume(), usize::MAX);
        assert_eq!(MeshGrid::new(1 << 10, 1 << 10, 1 << 10).unwrap().volume(), 1 << 30);
    }
}
