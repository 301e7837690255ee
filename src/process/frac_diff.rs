//! Fractional differencing via FFT convolution.
//!
//! Purpose
//! -------
//! Apply the operator `(1 − L)^d` to a finite series, truncated at the
//! series start. With `d < 0` this is fractional integration, which is how
//! the ARFIMA driver injects long memory into the MA path.
//!
//! Key behaviors
//! -------------
//! - [`frac_diff_coefficients`] builds the binomial weights
//!   `c₀ = 1, c_k = c_{k−1}·(k − 1 − d)/k`.
//! - [`frac_diff`] convolves the series with those weights through a
//!   zero-padded FFT (Jensen & Nielsen, 2014), O(n log n).
//! - [`frac_diff_direct`] is the O(n²) lower-triangular convolution, kept as
//!   the numerical reference.
//!
//! Invariants & assumptions
//! ------------------------
//! - The FFT length is the next power of two ≥ `2n − 1`, so the circular
//!   convolution never wraps into the first `n` outputs.
//! - Only the real part of the first `n` inverse-transform samples is kept.
//! - Because both operators are lower-triangular Toeplitz truncations,
//!   `frac_diff(frac_diff(x, d), −d)` recovers `x` up to rounding.
//!
//! Testing notes
//! -------------
//! - FFT output is compared to the direct convolution, and the `d`/`−d`
//!   round trip is checked at n = 256.
use ndarray::{Array1, ArrayView1};
use num_complex::Complex;
use rustfft::FftPlanner;

use crate::process::{
    errors::{ArfimaError, ArfimaResult},
    validation::validate_order,
};

/// Binomial weights of `(1 − L)^d` truncated to `n` terms.
pub fn frac_diff_coefficients(n: usize, d: f64) -> Array1<f64> {
    let mut coefs = Array1::<f64>::zeros(n);
    if n == 0 {
        return coefs;
    }
    coefs[0] = 1.0;
    for k in 1..n {
        let kf = k as f64;
        coefs[k] = coefs[k - 1] * (kf - 1.0 - d) / kf;
    }
    coefs
}

/// Fractionally difference `x` with order `d` using an FFT convolution.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView1<f64>`
///   Input series; at least two samples.
/// - `d`: `f64`
///   Differencing order. `(-0.5, 0.5)` gives stationary, invertible output,
///   but any finite value is accepted.
///
/// Returns
/// -------
/// `ArfimaResult<Array1<f64>>`
///   A series of the same length as `x`.
///
/// Errors
/// ------
/// - `ArfimaError::FracDiffTooShort` when `x.len() < 2`.
/// - `ArfimaError::NonFiniteOrder` when `d` is NaN/±∞.
pub fn frac_diff(x: ArrayView1<f64>, d: f64) -> ArfimaResult<Array1<f64>> {
    let n = x.len();
    if n < 2 {
        return Err(ArfimaError::FracDiffTooShort { len: n });
    }
    let d = validate_order(d)?;
    let fft_len = (2 * n - 1).next_power_of_two();

    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(fft_len);
    let inverse = planner.plan_fft_inverse(fft_len);

    let mut x_hat = zero_padded(x.iter().copied(), fft_len);
    let mut c_hat = zero_padded(frac_diff_coefficients(n, d).iter().copied(), fft_len);
    forward.process(&mut x_hat);
    forward.process(&mut c_hat);

    for (xh, ch) in x_hat.iter_mut().zip(&c_hat) {
        *xh *= *ch;
    }
    inverse.process(&mut x_hat);

    // rustfft leaves the inverse unnormalized.
    let norm = 1.0 / fft_len as f64;
    Ok(x_hat.iter().take(n).map(|c| c.re * norm).collect())
}

/// Reference O(n²) fractional differencing: `y[t] = Σ_{k ≤ t} c_k x[t − k]`.
///
/// # Errors
/// `NonFiniteOrder` when `d` is NaN/±∞.
pub fn frac_diff_direct(x: ArrayView1<f64>, d: f64) -> ArfimaResult<Array1<f64>> {
    let d = validate_order(d)?;
    let coefs = frac_diff_coefficients(x.len(), d);
    Ok(Array1::from_shape_fn(x.len(), |t| (0..=t).map(|k| coefs[k] * x[t - k]).sum()))
}

fn zero_padded<I>(values: I, len: usize) -> Vec<Complex<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let mut buf: Vec<Complex<f64>> = values.into_iter().map(|v| Complex::new(v, 0.0)).collect();
    buf.resize(len, Complex::new(0.0, 0.0));
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form coefficients for small k.
    // - Agreement between the FFT and direct convolutions.
    // - The d / −d round trip.
    // - Length guards.
    // -------------------------------------------------------------------------

    fn gaussian_series(n: usize, seed: u64) -> Array1<f64> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Array1::from_shape_fn(n, |_| rng.sample::<f64, _>(StandardNormal))
    }

    #[test]
    // Purpose
    // -------
    // Check the recursion against the binomial expansion of (1 − L)^d.
    //
    // Given
    // -----
    // - d = 0.4, n = 3.
    //
    // Expect
    // ------
    // - c = [1, −d, −d(1 − d)/2].
    fn coefficients_match_binomial_expansion() {
        let d = 0.4;
        let c = frac_diff_coefficients(3, d);

        assert_abs_diff_eq!(c[0], 1.0);
        assert_abs_diff_eq!(c[1], -d, epsilon = 1e-15);
        assert_abs_diff_eq!(c[2], -d * (1.0 - d) / 2.0, epsilon = 1e-15);
        assert!(frac_diff_coefficients(0, d).is_empty());
    }

    #[test]
    // Purpose
    // -------
    // The FFT path must agree with the brute-force convolution.
    //
    // Given
    // -----
    // - A seeded Gaussian series of odd length 77 and d ∈ {−0.3, 0.25, 1.0}.
    //
    // Expect
    // ------
    // - Element-wise agreement to 1e-9.
    fn fft_matches_direct_convolution() {
        let x = gaussian_series(77, 42);

        for d in [-0.3, 0.25, 1.0] {
            let fast = frac_diff(x.view(), d).unwrap();
            let slow = frac_diff_direct(x.view(), d).unwrap();

            assert_eq!(fast.len(), x.len());
            for (a, b) in fast.iter().zip(&slow) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-9);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Differencing then integrating with the same order is the identity.
    //
    // Given
    // -----
    // - A seeded Gaussian series of length 256, d = 0.3.
    //
    // Expect
    // ------
    // - `frac_diff(frac_diff(x, d), −d) ≈ x` to 1e-8.
    fn round_trip_recovers_series() {
        let x = gaussian_series(256, 9);

        let y = frac_diff(x.view(), 0.3).unwrap();
        let back = frac_diff(y.view(), -0.3).unwrap();

        for (a, b) in back.iter().zip(&x) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8);
        }
    }

    #[test]
    // Purpose
    // -------
    // Integer order 1 reduces to the first difference with x[−1] = 0.
    //
    // Given
    // -----
    // - x = [1, 3, 6, 10], d = 1.
    //
    // Expect
    // ------
    // - [1, 2, 3, 4].
    fn order_one_is_first_difference() {
        let y = frac_diff(array![1.0, 3.0, 6.0, 10.0].view(), 1.0).unwrap();

        for (a, b) in y.iter().zip([1.0, 2.0, 3.0, 4.0]) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Degenerate sizes and orders are rejected.
    //
    // Given
    // -----
    // - A single sample; a NaN order.
    //
    // Expect
    // ------
    // - `FracDiffTooShort` and `NonFiniteOrder` respectively.
    fn guards_reject_degenerate_inputs() {
        assert_eq!(
            frac_diff(array![1.0].view(), 0.2).unwrap_err(),
            ArfimaError::FracDiffTooShort { len: 1 }
        );
        assert!(matches!(
            frac_diff(array![1.0, 2.0].view(), f64::NAN).unwrap_err(),
            ArfimaError::NonFiniteOrder { .. }
        ));
    }
}
