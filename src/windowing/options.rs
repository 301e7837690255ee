//! Windowing options — addressing strategy, window extents and split settings.
//!
//! Purpose
//! -------
//! Collect every knob of the windowing pipeline in plain, cloneable structs
//! so that data, coordinates and timestamps can be windowed with one shared
//! configuration value.
//!
//! Key behaviors
//! -------------
//! - [`WindowOption`] is the closed set of addressing strategies, parsed from
//!   and printed as `space`, `time`, `patch`, `patch_overlap`.
//! - [`WindowConfig`] bundles window/prediction sizes, patch shape, stride
//!   and the strategy.
//! - [`SplitOptions`] bundles split proportions, standardization and
//!   training-set noise ([`NoiseSpec`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - These types are intent only; validation happens in
//!   [`crate::windowing::validation`] when a plan or split is built.
//! - `patch_stride` is read only by [`WindowOption::PatchOverlap`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover option parsing, display round trips, and defaults.
use std::{fmt, str::FromStr};

use crate::windowing::{
    errors::WindowError,
    grid::{PatchShape, PatchStride},
};

/// Addressing strategy mapping a flat array to windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WindowOption {
    /// Contiguous runs of raw samples; the grid is ignored.
    Space,
    /// One spatial index sampled at consecutive time steps.
    Time,
    /// Non-overlapping patches tiling each block.
    #[default]
    Patch,
    /// Strided, possibly overlapping patches.
    PatchOverlap,
}

impl WindowOption {
    /// Whether windows are anchored on blocks and split at block granularity.
    pub fn is_patch_based(&self) -> bool {
        matches!(self, WindowOption::Patch | WindowOption::PatchOverlap)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WindowOption::Space => "space",
            WindowOption::Time => "time",
            WindowOption::Patch => "patch",
            WindowOption::PatchOverlap => "patch_overlap",
        }
    }
}

impl fmt::Display for WindowOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowOption {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "space" => Ok(WindowOption::Space),
            "time" => Ok(WindowOption::Time),
            "patch" => Ok(WindowOption::Patch),
            "patch_overlap" => Ok(WindowOption::PatchOverlap),
            other => Err(WindowError::UnknownOption { name: other.to_string() }),
        }
    }
}

/// WindowConfig — shape of each window and the addressing strategy.
///
/// Fields
/// ------
/// - `window_size`: time steps per window (raw samples under `space`).
/// - `pred_size`: forecast offset between feature and target.
/// - `patch_size`: patch extent for the patch strategies.
/// - `patch_stride`: origin step for `patch_overlap`.
/// - `option`: the [`WindowOption`].
///
/// Defaults: `window_size = 10`, `pred_size = 1`, patch `(4, 4, 4)`,
/// stride `(1, 1, 1)`, [`WindowOption::Patch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowConfig {
    pub window_size: usize,
    pub pred_size: usize,
    pub patch_size: PatchShape,
    pub patch_stride: PatchStride,
    pub option: WindowOption,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            window_size: 10,
            pred_size: 1,
            patch_size: PatchShape::default(),
            patch_stride: PatchStride::default(),
            option: WindowOption::default(),
        }
    }
}

impl WindowConfig {
    /// Config with the given strategy and sizes; patch shape and stride keep
    /// their defaults.
    pub fn new(option: WindowOption, window_size: usize, pred_size: usize) -> WindowConfig {
        WindowConfig { window_size, pred_size, option, ..WindowConfig::default() }
    }

    pub fn with_patch_size(mut self, patch_size: PatchShape) -> WindowConfig {
        self.patch_size = patch_size;
        self
    }

    pub fn with_patch_stride(mut self, patch_stride: PatchStride) -> WindowConfig {
        self.patch_stride = patch_stride;
        self
    }
}

/// Gaussian noise `N(mean, std²)` added to the training partition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseSpec {
    pub mean: f64,
    pub std: f64,
}

impl NoiseSpec {
    pub fn new(mean: f64, std: f64) -> NoiseSpec {
        NoiseSpec { mean, std }
    }
}

/// SplitOptions — train/validation/test proportions and post-split transforms.
///
/// Fields
/// ------
/// - `train_proportion`, `val_proportion`, `test_proportion`: each in
///   `[0, 1]`; expected to sum to 1. Any remainder goes to the test split.
/// - `scale`: standardize using statistics of the training features.
/// - `noise`: optional training-only Gaussian noise.
///
/// Defaults: `(0.6, 0.2, 0.2)`, no scaling, no noise.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitOptions {
    pub train_proportion: f64,
    pub val_proportion: f64,
    pub test_proportion: f64,
    pub scale: bool,
    pub noise: Option<NoiseSpec>,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            train_proportion: 0.6,
            val_proportion: 0.2,
            test_proportion: 0.2,
            scale: false,
            noise: None,
        }
    }
}

impl SplitOptions {
    pub fn new(train_proportion: f64, val_proportion: f64, test_proportion: f64) -> SplitOptions {
        SplitOptions { train_proportion, val_proportion, test_proportion, ..SplitOptions::default() }
    }

    pub fn with_scale(mut self, scale: bool) -> SplitOptions {
        self.scale = scale;
        self
    }

    pub fn with_noise(mut self, noise: Option<NoiseSpec>) -> SplitOptions {
        self.noise = noise;
        self
    }

    /// Same proportions with scaling and noise switched off; used for the
    /// coordinate and timestamp runs.
    pub fn without_transforms(&self) -> SplitOptions {
        SplitOptions { scale: false, noise: None, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Every textual option parses and prints back to itself.
    //
    // Given
    // -----
    // - The four recognized names.
    //
    // Expect
    // ------
    // - `name.parse::<WindowOption>()?.to_string() == name`.
    fn option_names_round_trip() {
        for name in ["space", "time", "patch", "patch_overlap"] {
            let opt: WindowOption = name.parse().unwrap();
            assert_eq!(opt.to_string(), name);
        }
        assert!(WindowOption::Patch.is_patch_based());
        assert!(!WindowOption::Time.is_patch_based());
    }

    #[test]
    // Purpose
    // -------
    // Unknown names are configuration errors that keep the name.
    //
    // Given
    // -----
    // - "Patch" (wrong case).
    //
    // Expect
    // ------
    // - `UnknownOption { name: "Patch" }`.
    fn unknown_option_is_rejected() {
        let err = "Patch".parse::<WindowOption>().unwrap_err();

        assert_eq!(err, WindowError::UnknownOption { name: "Patch".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Defaults and builders set the documented fields.
    //
    // Given
    // -----
    // - `WindowConfig::new` with a custom patch; `SplitOptions` with noise.
    //
    // Expect
    // ------
    // - Fields preserved; `without_transforms` clears scale and noise only.
    fn builders_preserve_fields() {
        let cfg = WindowConfig::new(WindowOption::Time, 2, 1)
            .with_patch_size(PatchShape { x1: 1, x2: 2, x3: 2 });
        assert_eq!(cfg.window_size, 2);
        assert_eq!(cfg.patch_size.volume(), 4);
        assert_eq!(cfg.patch_stride, PatchStride::default());

        let split = SplitOptions::new(0.5, 0.25, 0.25)
            .with_scale(true)
            .with_noise(Some(NoiseSpec::new(0.0, 1e-2)));
        let plain = split.without_transforms();
        assert!(!plain.scale && plain.noise.is_none());
        assert_eq!(plain.train_proportion, 0.5);
    }
}
