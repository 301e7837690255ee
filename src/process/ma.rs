//! Moving-average stage of the ARFIMA generator.
//!
//! `x[t] = ε[t] + θ₁ ε[t-1] + … + θ_q ε[t-q]`, evaluated as a sliding dot
//! product of `[1, θ₁, …, θ_q]` over the `q + 1` most recent innovations.
use ndarray::{Array1, ArrayView1};
use rand::Rng;

use crate::process::{
    errors::{ArfimaError, ArfimaResult},
    noise::NoiseLaw,
    validation::validate_coefficients,
};

/// Apply the MA(q) filter to a pre-drawn innovation path.
///
/// `noise` must hold `n + q` samples, where the first `q` act as pre-sample
/// innovations; the result has length `n = noise.len() - q`. With `q == 0`
/// the innovations are returned unchanged. If `noise` is shorter than `q`
/// the result is empty.
pub fn ma_filter(noise: ArrayView1<f64>, theta: &[f64]) -> Array1<f64> {
    let q = theta.len();
    if q == 0 {
        return noise.to_owned();
    }
    let n = noise.len().saturating_sub(q);
    Array1::from_shape_fn(n, |j| {
        let now = j + q;
        noise[now] + theta.iter().enumerate().map(|(i, th)| th * noise[now - 1 - i]).sum::<f64>()
    })
}

/// Draw `n + q` innovations from `law` and return the length-`n` MA(q) path.
///
/// # Errors
/// `NonFiniteCoefficient` if any θ is NaN/±∞; `LengthOverflow` if `n + q`
/// does not fit in `usize`.
pub fn moving_average<R: Rng + ?Sized>(
    theta: &[f64], n: usize, law: &NoiseLaw, rng: &mut R,
) -> ArfimaResult<Array1<f64>> {
    validate_coefficients("MA", theta)?;
    let q = theta.len();
    let total = n.checked_add(q).ok_or(ArfimaError::LengthOverflow { n_points: n, extra: q })?;
    let noise = law.sample_n(total, rng);
    Ok(ma_filter(noise.view(), theta))
}
