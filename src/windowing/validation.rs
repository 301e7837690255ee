//! windowing::validation — precondition checks for plans and splits.
//!
//! Purpose
//! -------
//! Reject invalid window configurations and split settings before any
//! window is materialized, so that the engine either produces a complete
//! result or none at all.
//!
//! Key behaviors
//! -------------
//! - [`validate_window_config`]: sizes, patch extents, strides, and the
//!   per-strategy geometry rules (divisibility under `patch`, fit under
//!   `patch_overlap`).
//! - [`validate_split_options`]: proportion ranges and noise parameters.
//! - [`check_proportion_sum`]: logs a warning when proportions do not sum
//!   to one; never fails.
//!
//! Conventions
//! -----------
//! - The grid is only checked for strategies that read it (`time`, `patch`,
//!   `patch_overlap`).
use tracing::warn;

use crate::windowing::{
    errors::{WindowError, WindowResult},
    grid::{MeshGrid, PatchShape, PatchStride},
    options::{SplitOptions, WindowConfig, WindowOption},
};

/// Tolerance on `train + val + test == 1` before a warning is logged.
pub const PROPORTION_SUM_TOL: f64 = 1e-6;

/// Validate a window configuration against a mesh grid.
///
/// Errors
/// ------
/// - `InvalidWindowSize` / `InvalidPredSize` for zero sizes.
/// - `InvalidGridExtent` for a zero grid extent (grid-based strategies).
/// - `GridVolumeOverflow` when the grid volume overflows `usize`.
/// - `InvalidPatchExtent` / `InvalidStride` for zero patch extents or steps.
/// - `PredExceedsWindow` when `pred_size > window_size` under `patch`.
/// - `PatchNotDividing` when `nx_i % x_i != 0` under `patch`.
/// - `PatchExceedsGrid` when `x_i > nx_i` under `patch_overlap`.
pub fn validate_window_config(grid: &MeshGrid, config: &WindowConfig) -> WindowResult<()> {
    if config.window_size == 0 {
        return Err(WindowError::InvalidWindowSize { window_size: config.window_size });
    }
    if config.pred_size == 0 {
        return Err(WindowError::InvalidPredSize { pred_size: config.pred_size });
    }
    if config.option == WindowOption::Space {
        return Ok(());
    }
    MeshGrid::new(grid.nx1, grid.nx2, grid.nx3)?;

    match config.option {
        WindowOption::Patch => {
            if config.pred_size > config.window_size {
                return Err(WindowError::PredExceedsWindow {
                    pred_size: config.pred_size,
                    window_size: config.window_size,
                });
            }
            let patch = validated_patch(&config.patch_size)?;
            for (i, (g, p)) in grid.extents().into_iter().zip(patch.extents()).enumerate() {
                if g % p != 0 {
                    return Err(WindowError::PatchNotDividing { axis: i + 1, grid: g, patch: p });
                }
            }
        }
        WindowOption::PatchOverlap => {
            let patch = validated_patch(&config.patch_size)?;
            let s = &config.patch_stride;
            PatchStride::new(s.s1, s.s2, s.s3)?;
            for (i, (g, p)) in grid.extents().into_iter().zip(patch.extents()).enumerate() {
                if p > g {
                    return Err(WindowError::PatchExceedsGrid { axis: i + 1, grid: g, patch: p });
                }
            }
        }
        WindowOption::Space | WindowOption::Time => {}
    }
    Ok(())
}

/// Validate split proportions and the optional noise specification.
///
/// Errors
/// ------
/// - `InvalidProportion` for a non-finite proportion or one outside `[0, 1]`.
/// - `InvalidNoise` for a non-finite mean, or a non-finite / negative std.
pub fn validate_split_options(opts: &SplitOptions) -> WindowResult<()> {
    for (name, value) in [
        ("train_proportion", opts.train_proportion),
        ("val_proportion", opts.val_proportion),
        ("test_proportion", opts.test_proportion),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(WindowError::InvalidProportion { name, value });
        }
    }
    if let Some(noise) = opts.noise {
        if !noise.mean.is_finite() || !noise.std.is_finite() || noise.std < 0.0 {
            return Err(WindowError::InvalidNoise { mean: noise.mean, std: noise.std });
        }
    }
    Ok(())
}

/// Warn when the proportions do not sum to one. Returns `true` if they do.
///
/// The remainder (positive or negative) is absorbed by the test split.
pub fn check_proportion_sum(opts: &SplitOptions) -> bool {
    let sum = opts.train_proportion + opts.val_proportion + opts.test_proportion;
    let ok = (sum - 1.0).abs() <= PROPORTION_SUM_TOL;
    if !ok {
        warn!(
            train = opts.train_proportion,
            val = opts.val_proportion,
            test = opts.test_proportion,
            sum,
            "split proportions do not sum to 1; the test split takes the remainder"
        );
    }
    ok
}

fn validated_patch(patch: &PatchShape) -> WindowResult<PatchShape> {
    PatchShape::new(patch.x1, patch.x2, patch.x3)
}
