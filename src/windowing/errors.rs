//! windowing::errors — error type for window extraction and splitting.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the grid types, window
//! plans, splits, scaling and augmentation steps, together with a Python
//! bridge for PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`WindowError`] and [`WindowResult`].
//! - Classify each variant as a configuration or a data-shape failure via
//!   [`WindowError::kind`].
//! - Map errors to Python `ValueError` when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every error is raised before any window is emitted; there are no
//!   partial results and no retryable variants.
//! - Axis payloads use `1`, `2`, `3` for x1, x2, x3.
//!
//! Testing notes
//! -------------
//! - Unit tests check payload embedding and the kind classification.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

use crate::ErrorKind;

pub type WindowResult<T> = Result<T, WindowError>;

/// WindowError — invalid parameters or malformed input for the windowing engine.
///
/// Configuration variants
/// ----------------------
/// - `InvalidWindowSize`, `InvalidPredSize`: zero sizes.
/// - `PredExceedsWindow`: `pred_size > window_size` under `patch`, which would
///   leave no feature steps.
/// - `InvalidGridExtent`, `InvalidPatchExtent`, `InvalidStride`: zero extents.
/// - `GridVolumeOverflow`: `nx1·nx2·nx3` does not fit in `usize`.
/// - `WindowSpanOverflow`: the samples one window spans do not fit in `usize`.
/// - `PatchNotDividing`: `nx_i % x_i != 0` under `patch`.
/// - `PatchExceedsGrid`: `x_i > nx_i` under `patch_overlap`.
/// - `InvalidProportion`: a split proportion outside `[0, 1]` or non-finite.
/// - `InsufficientTrainingBlocks`: `⌊T·train⌋ − ((w − 1) + p)` is negative.
/// - `InvalidNoise`: non-finite mean or non-finite / negative std.
/// - `EmptyTrainingSplit`: scaling requested but the training split is empty.
/// - `UnknownOption`: an addressing option name that is not recognized.
/// - `InvalidBatchSize`: a zero batch size.
///
/// Data-shape variants
/// -------------------
/// - `EmptyData`: no samples.
/// - `NotBlockAligned`: `len % volume != 0`.
/// - `InsufficientData`: fewer samples than one window needs.
/// - `LengthMismatch`: data / coordinates / timestamps differ in length.
/// - `WindowOutOfRange`: a window index past the end of the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    // ---- Configuration ----
    InvalidWindowSize { window_size: usize },
    InvalidPredSize { pred_size: usize },
    PredExceedsWindow { pred_size: usize, window_size: usize },
    InvalidGridExtent { axis: usize, extent: usize },
    GridVolumeOverflow { nx1: usize, nx2: usize, nx3: usize },
    WindowSpanOverflow { window_size: usize, pred_size: usize },
    InvalidPatchExtent { axis: usize, extent: usize },
    InvalidStride { axis: usize, stride: usize },
    PatchNotDividing { axis: usize, grid: usize, patch: usize },
    PatchExceedsGrid { axis: usize, grid: usize, patch: usize },
    InvalidProportion { name: &'static str, value: f64 },
    InsufficientTrainingBlocks { total_blocks: usize, train_blocks: usize, reserved: usize },
    InvalidNoise { mean: f64, std: f64 },
    EmptyTrainingSplit,
    UnknownOption { name: String },
    InvalidBatchSize { batch_size: usize },

    // ---- Data shape ----
    EmptyData,
    NotBlockAligned { len: usize, volume: usize },
    InsufficientData { len: usize, required: usize },
    LengthMismatch { name: &'static str, expected: usize, actual: usize },
    WindowOutOfRange { index: usize, len: usize },
}

impl WindowError {
    /// Error class of this variant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            WindowError::EmptyData
            | WindowError::NotBlockAligned { .. }
            | WindowError::InsufficientData { .. }
            | WindowError::LengthMismatch { .. }
            | WindowError::WindowOutOfRange { .. } => ErrorKind::DataShape,
            _ => ErrorKind::Configuration,
        }
    }
}

impl std::error::Error for WindowError {}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Configuration ----
            WindowError::InvalidWindowSize { window_size } => {
                write!(f, "window_size must be ≥ 1; got {window_size}.")
            }
            WindowError::InvalidPredSize { pred_size } => {
                write!(f, "pred_size must be ≥ 1; got {pred_size}.")
            }
            WindowError::PredExceedsWindow { pred_size, window_size } => write!(
                f,
                "pred_size ({pred_size}) must not exceed window_size ({window_size}) for the patch option."
            ),
            WindowError::InvalidGridExtent { axis, extent } => {
                write!(f, "Mesh block extent nx{axis} must be ≥ 1; got {extent}.")
            }
            WindowError::GridVolumeOverflow { nx1, nx2, nx3 } => {
                write!(f, "Mesh block volume {nx1}·{nx2}·{nx3} overflows usize.")
            }
            WindowError::WindowSpanOverflow { window_size, pred_size } => write!(
                f,
                "Window span overflows usize for window_size {window_size} and pred_size {pred_size}."
            ),
            WindowError::InvalidPatchExtent { axis, extent } => {
                write!(f, "Patch extent x{axis} must be ≥ 1; got {extent}.")
            }
            WindowError::InvalidStride { axis, stride } => {
                write!(f, "Patch stride s{axis} must be ≥ 1; got {stride}.")
            }
            WindowError::PatchNotDividing { axis, grid, patch } => write!(
                f,
                "Patch extent x{axis} = {patch} does not divide mesh block extent nx{axis} = {grid}."
            ),
            WindowError::PatchExceedsGrid { axis, grid, patch } => write!(
                f,
                "Patch extent x{axis} = {patch} exceeds mesh block extent nx{axis} = {grid}."
            ),
            WindowError::InvalidProportion { name, value } => {
                write!(f, "{name} must be finite and within [0, 1]; got {value}.")
            }
            WindowError::InsufficientTrainingBlocks { total_blocks, train_blocks, reserved } => {
                write!(
                    f,
                    "Training split holds {train_blocks} of {total_blocks} blocks, fewer than the {reserved} blocks reserved at the split boundary."
                )
            }
            WindowError::InvalidNoise { mean, std } => {
                write!(f, "Noise must have a finite mean and a finite std ≥ 0; got mean {mean}, std {std}.")
            }
            WindowError::EmptyTrainingSplit => {
                write!(f, "Cannot fit a scaler on an empty training split.")
            }
            WindowError::UnknownOption { name } => write!(
                f,
                "Unknown windowing option {name:?} (expected 'space', 'time', 'patch', or 'patch_overlap')."
            ),
            WindowError::InvalidBatchSize { batch_size } => {
                write!(f, "batch_size must be ≥ 1; got {batch_size}.")
            }
            // ---- Data shape ----
            WindowError::EmptyData => write!(f, "Input data is empty."),
            WindowError::NotBlockAligned { len, volume } => write!(
                f,
                "Data length {len} is not a multiple of the mesh block volume {volume}."
            ),
            WindowError::InsufficientData { len, required } => write!(
                f,
                "Data length {len} is too short; at least {required} samples are needed for one window."
            ),
            WindowError::LengthMismatch { name, expected, actual } => {
                write!(f, "{name} has length {actual}; expected {expected} to match the data.")
            }
            WindowError::WindowOutOfRange { index, len } => {
                write!(f, "Window index {index} is out of range for {len} windows.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<WindowError> for PyErr {
    fn from(err: WindowError) -> PyErr {
        PyValueError::new_err(format!("WindowError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding for representative variants.
    // - The configuration / data-shape split of `kind()`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a divisibility failure names the axis and both extents.
    //
    // Given
    // -----
    // - `PatchNotDividing { axis: 3, grid: 16, patch: 5 }`.
    //
    // Expect
    // ------
    // - The message contains "x3", "16" and "5".
    fn patch_not_dividing_includes_axis_and_extents() {
        let msg = WindowError::PatchNotDividing { axis: 3, grid: 16, patch: 5 }.to_string();

        assert!(msg.contains("x3") && msg.contains("16") && msg.contains('5'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that block-alignment failures report length and volume.
    //
    // Given
    // -----
    // - `NotBlockAligned { len: 41, volume: 8 }`.
    //
    // Expect
    // ------
    // - The message contains "41" and "8".
    fn not_block_aligned_includes_len_and_volume() {
        let msg = WindowError::NotBlockAligned { len: 41, volume: 8 }.to_string();

        assert!(msg.contains("41") && msg.contains('8'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the taxonomy separates configuration from data-shape errors.
    //
    // Given
    // -----
    // - A sample of variants from both groups.
    //
    // Expect
    // ------
    // - Configuration variants map to `Configuration`, the rest to `DataShape`.
    fn kind_separates_configuration_from_data_shape() {
        assert_eq!(
            WindowError::PatchNotDividing { axis: 1, grid: 4, patch: 3 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(WindowError::InvalidWindowSize { window_size: 0 }.kind(), ErrorKind::Configuration);
        assert_eq!(
            WindowError::GridVolumeOverflow { nx1: 1, nx2: 1, nx3: 1 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            WindowError::UnknownOption { name: "cube".into() }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(WindowError::NotBlockAligned { len: 9, volume: 8 }.kind(), ErrorKind::DataShape);
        assert_eq!(WindowError::EmptyData.kind(), ErrorKind::DataShape);
        assert_eq!(
            WindowError::LengthMismatch { name: "coords", expected: 8, actual: 7 }.kind(),
            ErrorKind::DataShape
        );
    }
}
