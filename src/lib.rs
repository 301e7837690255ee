//! turbulence_windows — synthetic long-memory series and spatiotemporal
//! windowing for turbulence forecasting, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the generator and the windowing engine to Python via the
//! `_turbulence_windows` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core modules: [`process`] (ARFIMA generation) and
//!   [`windowing`] (window plans, splits, scaling, noise).
//! - Define [`ErrorKind`], the shared configuration / data-shape taxonomy
//!   reported by every error type in the crate.
//! - When `python-bindings` is enabled, define the `#[pymodule]` initializer
//!   with `process` and `windowing` submodules registered in `sys.modules`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, argument defaults and error mapping.
//! - Randomness is always explicit: Rust callers pass an RNG, Python callers
//!   pass an optional seed.
//!
//! Conventions
//! -----------
//! - Windows cross the FFI boundary as `(n_windows, 2, window_len)` float64
//!   arrays, index 1 selecting feature (0) or target (1).
//! - Errors are raised in Python as `ValueError` carrying the Rust message.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_window_pipeline.rs`.

pub mod process;
pub mod utils;
pub mod windowing;

/// Broad class of a failure, shared by [`process::ArfimaError`] and
/// [`windowing::WindowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid parameters; fixable by changing the call.
    Configuration,
    /// Input arrays whose length or layout cannot be windowed.
    DataShape,
}

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArray3};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    process::{arfima, ArfimaOptions},
    utils::{extract_f64_array, seeded_rng, windows_to_array3},
    windowing::{
        MeshGrid, NoiseSpec, PatchShape, PatchStride, SplitOptions, WindowConfig, WindowOption,
    },
};

#[cfg(feature = "python-bindings")]
type Triple = (usize, usize, usize);

#[cfg(feature = "python-bindings")]
fn window_config(
    window_size: usize, pred_size: usize, patch_size: Triple, patch_stride: Triple, option: &str,
) -> PyResult<WindowConfig> {
    let option: WindowOption = option.parse()?;
    Ok(WindowConfig::new(option, window_size, pred_size)
        .with_patch_size(PatchShape::new(patch_size.0, patch_size.1, patch_size.2)?)
        .with_patch_stride(PatchStride::new(patch_stride.0, patch_stride.1, patch_stride.2)?))
}

/// Simulate an ARFIMA(p, d, q) path of exactly `n_points` samples.
///
/// `noise_alpha = 2.0` selects Gaussian innovations with standard deviation
/// `noise_std`; smaller values draw symmetric alpha-stable innovations.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "arfima")]
#[pyo3(signature = (
    ar, d, ma, n_points, noise_std = 1.0, noise_alpha = 2.0, warmup = 0, seed = None
))]
#[allow(clippy::too_many_arguments)]
fn py_arfima<'py>(
    py: Python<'py>, ar: Vec<f64>, d: f64, ma: Vec<f64>, n_points: usize, noise_std: f64,
    noise_alpha: f64, warmup: usize, seed: Option<u64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let opts = ArfimaOptions { noise_std, noise_alpha, warmup, seed };
    let mut rng = seeded_rng(seed);
    let series = arfima(&ar, d, &ma, n_points, &opts, &mut rng)?;
    Ok(series.into_pyarray(py))
}

/// Window a flat array. Returns `(windows, patches_per_block)`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "to_windowed")]
#[pyo3(signature = (
    data, meshed_blocks, window_size = 10, pred_size = 1, patch_size = (4, 4, 4),
    patch_stride = (1, 1, 1), option = "patch"
))]
#[allow(clippy::too_many_arguments)]
fn py_to_windowed<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, meshed_blocks: Triple, window_size: usize,
    pred_size: usize, patch_size: Triple, patch_stride: Triple, option: &str,
) -> PyResult<(Bound<'py, PyArray3<f64>>, Option<usize>)> {
    let arr = extract_f64_array(py, data)?;
    let slice = arr.as_slice()?;
    let grid = MeshGrid::new(meshed_blocks.0, meshed_blocks.1, meshed_blocks.2)?;
    let config = window_config(window_size, pred_size, patch_size, patch_stride, option)?;
    let (windows, ppb) = windowing::to_windowed(slice, grid, config)?;
    Ok((windows_to_array3(&windows).into_pyarray(py), ppb))
}

/// Window, split, scale and perturb a flat array.
///
/// Returns `(train, val, test, scaler)` where `scaler` is `(mean, std)` when
/// `scale=True` and `None` otherwise.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "train_val_test_split")]
#[pyo3(signature = (
    data, meshed_blocks, train_proportion = 0.6, val_proportion = 0.2, test_proportion = 0.2,
    pred_size = 1, scale = false, window_size = 10, patch_size = (4, 4, 4),
    patch_stride = (1, 1, 1), option = "patch", noise = None, seed = None
))]
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
fn py_train_val_test_split<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, meshed_blocks: Triple, train_proportion: f64,
    val_proportion: f64, test_proportion: f64, pred_size: usize, scale: bool, window_size: usize,
    patch_size: Triple, patch_stride: Triple, option: &str, noise: Option<(f64, f64)>,
    seed: Option<u64>,
) -> PyResult<(
    Bound<'py, PyArray3<f64>>,
    Bound<'py, PyArray3<f64>>,
    Bound<'py, PyArray3<f64>>,
    Option<(f64, f64)>,
)> {
    let arr = extract_f64_array(py, data)?;
    let slice = arr.as_slice()?;
    let grid = MeshGrid::new(meshed_blocks.0, meshed_blocks.1, meshed_blocks.2)?;
    let config = window_config(window_size, pred_size, patch_size, patch_stride, option)?;
    let opts = SplitOptions::new(train_proportion, val_proportion, test_proportion)
        .with_scale(scale)
        .with_noise(noise.map(|(mean, std)| NoiseSpec::new(mean, std)));
    let mut rng = seeded_rng(seed);

    let out = windowing::train_val_test_split(slice, grid, config, &opts, &mut rng)?;
    let splits = out.splits;
    Ok((
        windows_to_array3(&splits.train).into_pyarray(py),
        windows_to_array3(&splits.val).into_pyarray(py),
        windows_to_array3(&splits.test).into_pyarray(py),
        out.scaler.map(|s| (s.mean, s.std)),
    ))
}

/// _turbulence_windows — PyO3 module initializer for the Python extension.
///
/// Creates the `process` and `windowing` submodules, attaches them to the
/// parent module and registers them in `sys.modules` so dotted imports work.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _turbulence_windows<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let process_mod = PyModule::new(py, "process")?;
    let windowing_mod = PyModule::new(py, "windowing")?;
    process_module(m, &process_mod)?;
    windowing_module(m, &windowing_mod)?;

    let modules = py.import("sys")?.getattr("modules")?;
    modules.set_item("turbulence_windows.process", process_mod)?;
    modules.set_item("turbulence_windows.windowing", windowing_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn process_module<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_arfima, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn windowing_module<'py>(parent: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_to_windowed, m)?)?;
    m.add_function(wrap_pyfunction!(py_train_val_test_split, m)?)?;
    parent.add_submodule(m)?;
    Ok(())
}
