//! process::validation — input guards for the ARFIMA generator.
//!
//! Purpose
//! -------
//! Centralize the precondition checks shared by the noise laws, the filter
//! stages, and the composed ARFIMA driver so that each stage reports the same
//! [`ArfimaError`] for the same violation.
//!
//! Conventions
//! -----------
//! - Functions return the validated value (or `()`) and never panic.
//! - Coefficient families are named `"AR"` and `"MA"` in error payloads.

use crate::process::errors::{ArfimaError, ArfimaResult};

/// Ensure every coefficient in `coefs` is finite.
///
/// Errors
/// ------
/// - `ArfimaError::NonFiniteCoefficient` for the first NaN/±∞ entry.
pub fn validate_coefficients(name: &'static str, coefs: &[f64]) -> ArfimaResult<()> {
    match coefs.iter().position(|c| !c.is_finite()) {
        Some(index) => {
            Err(ArfimaError::NonFiniteCoefficient { name, index, value: coefs[index] })
        }
        None => Ok(()),
    }
}

/// Ensure the fractional order `d` is finite.
pub fn validate_order(d: f64) -> ArfimaResult<f64> {
    if d.is_finite() {
        Ok(d)
    } else {
        Err(ArfimaError::NonFiniteOrder { d })
    }
}

/// Ensure the requested output length admits an FFT length (`n_points > 1`).
pub fn validate_n_points(n_points: usize) -> ArfimaResult<usize> {
    if n_points > 1 {
        Ok(n_points)
    } else {
        Err(ArfimaError::TooFewPoints { n_points })
    }
}

/// Ensure a noise scale is finite and strictly positive.
pub fn validate_noise_scale(scale: f64) -> ArfimaResult<f64> {
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(ArfimaError::InvalidNoiseScale { scale })
    }
}

/// Ensure an alpha-stable stability parameter satisfies `0 < alpha ≤ 2`.
pub fn validate_stability(alpha: f64) -> ArfimaResult<f64> {
    if alpha.is_finite() && alpha > 0.0 && alpha <= 2.0 {
        Ok(alpha)
    } else {
        Err(ArfimaError::InvalidStability { alpha })
    }
}
