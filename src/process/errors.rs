//! process::errors — error type for the ARFIMA series generator.
//!
//! Purpose
//! -------
//! Provide a single error enum and result alias for every stage of the
//! process generator (noise laws, MA filtering, fractional differencing,
//! AR recursion, and the composed ARFIMA driver).
//!
//! Key behaviors
//! -------------
//! - Define [`ArfimaError`] and [`ArfimaResult`] as the canonical error and
//!   result types for `crate::process`.
//! - Attach human-readable `Display` messages that embed the offending value.
//! - Classify every variant as a configuration error via [`ArfimaError::kind`].
//! - Map errors into Python `ValueError`s when `python-bindings` is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Generation is a pure function of its inputs and the supplied RNG, so
//!   every failure is caused by invalid configuration; there are no
//!   transient or retryable variants.
//! - Errors are raised before any sample is drawn (fail fast).
//!
//! Testing notes
//! -------------
//! - Unit tests verify payload embedding in `Display` and the error kind.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};

use crate::ErrorKind;

pub type ArfimaResult<T> = Result<T, ArfimaError>;

/// ArfimaError — validation failures of the process generator.
///
/// Variants
/// --------
/// - `TooFewPoints { n_points }`
///   The requested output length is ≤ 1; the FFT length is undefined.
/// - `NonFiniteCoefficient { name, index, value }`
///   An AR or MA coefficient is NaN or ±∞.
/// - `NonFiniteOrder { d }`
///   The fractional order is NaN or ±∞.
/// - `InvalidNoiseScale { scale }`
///   The noise scale is not finite and strictly positive.
/// - `InvalidStability { alpha }`
///   The alpha-stable stability parameter lies outside `(0, 2]`.
/// - `FracDiffTooShort { len }`
///   Fractional differencing was requested on fewer than two samples.
/// - `LengthOverflow { n_points, extra }`
///   `n_points` plus the warm-up or pre-sample length overflows `usize`.
#[derive(Debug, Clone, PartialEq)]
pub enum ArfimaError {
    // ---- Shape ----
    TooFewPoints { n_points: usize },
    FracDiffTooShort { len: usize },
    LengthOverflow { n_points: usize, extra: usize },

    // ---- Coefficients ----
    NonFiniteCoefficient { name: &'static str, index: usize, value: f64 },
    NonFiniteOrder { d: f64 },

    // ---- Noise law ----
    InvalidNoiseScale { scale: f64 },
    InvalidStability { alpha: f64 },
}

impl ArfimaError {
    /// Error class of this variant. All generator failures are configuration errors.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl std::error::Error for ArfimaError {}

impl std::fmt::Display for ArfimaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArfimaError::TooFewPoints { n_points } => {
                write!(f, "n_points must be greater than 1; got {n_points}.")
            }
            ArfimaError::FracDiffTooShort { len } => {
                write!(f, "Fractional differencing needs at least 2 samples; got {len}.")
            }
            ArfimaError::LengthOverflow { n_points, extra } => {
                write!(f, "Simulation length overflows: n_points = {n_points} plus {extra} extra samples.")
            }
            ArfimaError::NonFiniteCoefficient { name, index, value } => {
                write!(f, "{name} coefficient at index {index} is non-finite: {value}")
            }
            ArfimaError::NonFiniteOrder { d } => {
                write!(f, "Fractional order d must be finite; got {d}.")
            }
            ArfimaError::InvalidNoiseScale { scale } => {
                write!(f, "Noise scale must be finite and > 0; got {scale}.")
            }
            ArfimaError::InvalidStability { alpha } => {
                write!(f, "Stability parameter alpha must satisfy 0 < alpha ≤ 2; got {alpha}.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<ArfimaError> for PyErr {
    fn from(err: ArfimaError) -> PyErr {
        PyValueError::new_err(format!("ArfimaError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Payload embedding in `Display` messages.
    // - Classification via `kind()`.
    //
    // They intentionally DO NOT cover:
    // - The PyO3 conversion, which needs a Python interpreter.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `TooFewPoints` reports the offending length.
    //
    // Given
    // -----
    // - `ArfimaError::TooFewPoints { n_points: 1 }`.
    //
    // Expect
    // ------
    // - The message mentions "1" and "n_points".
    fn too_few_points_includes_payload_in_display() {
        let msg = ArfimaError::TooFewPoints { n_points: 1 }.to_string();

        assert!(msg.contains("n_points") && msg.contains('1'), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that coefficient errors name the coefficient family and index.
    //
    // Given
    // -----
    // - A non-finite MA coefficient at index 2.
    //
    // Expect
    // ------
    // - The message contains "MA", "2" and "NaN".
    fn non_finite_coefficient_names_family_and_index() {
        let err = ArfimaError::NonFiniteCoefficient { name: "MA", index: 2, value: f64::NAN };

        let msg = err.to_string();

        assert!(msg.contains("MA") && msg.contains('2') && msg.contains("NaN"), "Got: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure every variant is classified as a configuration error.
    //
    // Given
    // -----
    // - One value of each variant.
    //
    // Expect
    // ------
    // - `kind()` returns `ErrorKind::Configuration` for all of them.
    fn every_variant_is_a_configuration_error() {
        let errs = [
            ArfimaError::TooFewPoints { n_points: 0 },
            ArfimaError::FracDiffTooShort { len: 1 },
            ArfimaError::LengthOverflow { n_points: usize::MAX, extra: 1 },
            ArfimaError::NonFiniteCoefficient { name: "AR", index: 0, value: f64::INFINITY },
            ArfimaError::NonFiniteOrder { d: f64::NAN },
            ArfimaError::InvalidNoiseScale { scale: 0.0 },
            ArfimaError::InvalidStability { alpha: 2.5 },
        ];

        for err in errs {
            assert_eq!(err.kind(), ErrorKind::Configuration, "{err}");
        }
    }
}
