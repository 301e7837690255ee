//! Autoregressive stage of the ARFIMA generator.
//!
//! `x[t] = φ₁ x[t-1] + … + φ_p x[t-p] + e[t]`, seeded with `p` zero samples
//! that are dropped from the returned path.
use ndarray::{s, Array1, ArrayView1};

use crate::process::{errors::ArfimaResult, validation::validate_coefficients};

/// Run the AR(p) recursion over the driving series `e`.
///
/// Returns a path of the same length as `e`; with `p == 0` it is `e` itself.
///
/// # Errors
/// `NonFiniteCoefficient` if any φ is NaN/±∞.
pub fn ar_filter(phi: &[f64], e: ArrayView1<f64>) -> ArfimaResult<Array1<f64>> {
    validate_coefficients("AR", phi)?;
    let p = phi.len();
    if p == 0 {
        return Ok(e.to_owned());
    }

    let mut path = Array1::<f64>::zeros(e.len() + p);
    for (t, &shock) in e.iter().enumerate() {
        let now = t + p;
        let ar: f64 = phi.iter().enumerate().map(|(i, ph)| ph * path[now - 1 - i]).sum();
        path[now] = ar + shock;
    }
    Ok(path.slice_move(s![p..]))
}
