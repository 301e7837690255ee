//! Shared helpers: seeded RNG construction and Python array conversion.
#[cfg(feature = "python-bindings")]
use ndarray::Array3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::windowing::Window;

/// `ChaCha8Rng` from an explicit seed, or from OS entropy when `None`.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Read the flat field passed as `data` to the windowing bindings.
///
/// Contiguous float64 numpy arrays are borrowed; anything else exposing
/// `to_numpy()` is converted first, and plain sequences are copied.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    let contiguous = |obj: &Bound<'py, PyAny>| {
        obj.extract::<PyReadonlyArray1<f64>>().ok().filter(|arr| arr.as_slice().is_ok())
    };
    if let Some(field) = contiguous(data) {
        return Ok(field);
    }
    if let Some(field) = data.call_method0("to_numpy").ok().and_then(|obj| contiguous(&obj)) {
        return Ok(field);
    }

    let flat: Vec<f64> = data.extract().map_err(|_| {
        PyTypeError::new_err(
            "data must be a flat float64 field of whole mesh blocks (1-D array, Series or sequence)",
        )
    })?;
    Ok(flat.into_pyarray(py).readonly())
}

/// Stack windows into an `(n_windows, 2, window_len)` array; index 1 selects
/// feature (0) or target (1).
#[cfg(feature = "python-bindings")]
pub fn windows_to_array3(windows: &[Window<f64>]) -> Array3<f64> {
    let len = windows.first().map_or(0, |w| w.feature.len());
    let mut out = Array3::<f64>::zeros((windows.len(), 2, len));
    for (i, w) in windows.iter().enumerate() {
        for (k, (&f, &t)) in w.feature.iter().zip(&w.target).enumerate() {
            out[[i, 0, k]] = f;
            out[[i, 1, k]] = t;
        }
    }
    out
}
