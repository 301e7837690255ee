//! ARFIMA(p, d, q) path simulation.
//!
//! Purpose
//! -------
//! Compose the three generator stages into a synthetic long-memory series
//! that can stand in for simulation data when exercising the windowing
//! engine.
//!
//! Key behaviors
//! -------------
//! - [`ArfimaSpec`] holds validated AR coefficients φ, fractional order `d`
//!   and MA coefficients θ.
//! - [`ArfimaSpec::simulate`] runs, in this fixed order:
//!   1. MA(q) over `n_points + warmup + q` innovations,
//!   2. fractional integration of order `−d` (FFT convolution),
//!   3. the AR(p) recursion,
//!   and returns the last `n_points` samples.
//! - [`ArfimaOptions`] carries noise scale, stability, warm-up length and an
//!   optional seed; randomness enters only through the RNG argument.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n_points > 1`; the output always has exactly `n_points` samples.
//! - Coefficients and `d` are finite. `d ∈ (−0.5, 0.5)` is recommended for a
//!   stationary, invertible process; values outside are accepted with a
//!   warning.
//! - No AR stationarity check is performed; explosive φ produce explosive
//!   paths.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use turbulence_windows::process::{ArfimaOptions, ArfimaSpec};
//!
//! let spec = ArfimaSpec::new(vec![0.5, 0.4], 0.3, vec![0.2, 0.1]).unwrap();
//! let opts = ArfimaOptions { warmup: 1024, ..ArfimaOptions::default() };
//! let mut rng = ChaCha8Rng::seed_from_u64(505);
//! let series = spec.simulate(10_000, &opts, &mut rng).unwrap();
//! assert_eq!(series.len(), 10_000);
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests cover output length over a grid of orders, warm-up
//!   discarding, seeded reproducibility, and reduction to pure stages.
use ndarray::{s, Array1};
use rand::Rng;
use tracing::{debug, warn};

use crate::{
    process::{
        ar::ar_filter,
        errors::{ArfimaError, ArfimaResult},
        frac_diff::frac_diff,
        ma::moving_average,
        noise::NoiseLaw,
        validation::{validate_coefficients, validate_n_points, validate_order},
    },
    utils::seeded_rng,
};

/// ArfimaOptions — noise and warm-up configuration for a simulation run.
///
/// Fields
/// ------
/// - `noise_std`: scale of the innovations (standard deviation when Gaussian).
/// - `noise_alpha`: stability parameter; `2.0` selects Gaussian noise.
/// - `warmup`: number of leading samples generated and then discarded.
/// - `seed`: seed for [`ArfimaSpec::simulate_seeded`]; `None` uses OS entropy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArfimaOptions {
    pub noise_std: f64,
    pub noise_alpha: f64,
    pub warmup: usize,
    pub seed: Option<u64>,
}

impl Default for ArfimaOptions {
    fn default() -> Self {
        ArfimaOptions { noise_std: 1.0, noise_alpha: 2.0, warmup: 0, seed: None }
    }
}

impl ArfimaOptions {
    /// Resolve the configured innovation law.
    pub fn noise_law(&self) -> ArfimaResult<NoiseLaw> {
        NoiseLaw::from_alpha(self.noise_alpha, self.noise_std)
    }
}

/// Coefficients of an ARFIMA(p, d, q) process.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArfimaSpec {
    /// AR coefficients φ₁..φ_p.
    pub ar: Vec<f64>,
    /// Fractional differencing order.
    pub d: f64,
    /// MA coefficients θ₁..θ_q.
    pub ma: Vec<f64>,
}

impl ArfimaSpec {
    /// Validate and bundle ARFIMA coefficients.
    ///
    /// # Errors
    /// - `NonFiniteCoefficient` for NaN/±∞ in `ar` or `ma`.
    /// - `NonFiniteOrder` if `d` is not finite.
    pub fn new(ar: Vec<f64>, d: f64, ma: Vec<f64>) -> ArfimaResult<Self> {
        validate_coefficients("AR", &ar)?;
        validate_coefficients("MA", &ma)?;
        let d = validate_order(d)?;
        if d <= -0.5 || d >= 0.5 {
            warn!(d, "fractional order outside (-0.5, 0.5); the process is non-stationary or non-invertible");
        }
        Ok(ArfimaSpec { ar, d, ma })
    }

    /// AR order p.
    pub fn p(&self) -> usize {
        self.ar.len()
    }

    /// MA order q.
    pub fn q(&self) -> usize {
        self.ma.len()
    }

    /// Simulate `n_points` samples of the process.
    ///
    /// Parameters
    /// ----------
    /// - `n_points`: `usize`
    ///   Output length; must exceed 1.
    /// - `opts`: [`ArfimaOptions`]
    ///   Noise law and warm-up. `opts.seed` is ignored here; the caller owns
    ///   the RNG.
    /// - `rng`: any [`rand::Rng`].
    ///
    /// Returns
    /// -------
    /// `ArfimaResult<Array1<f64>>` of length exactly `n_points`.
    ///
    /// Errors
    /// ------
    /// - `TooFewPoints` if `n_points <= 1`.
    /// - `LengthOverflow` if `n_points + warmup` (plus q) overflows `usize`.
    /// - `InvalidNoiseScale` / `InvalidStability` for a bad noise law.
    /// - Coefficient errors if the struct was built without [`ArfimaSpec::new`].
    pub fn simulate<R: Rng + ?Sized>(
        &self, n_points: usize, opts: &ArfimaOptions, rng: &mut R,
    ) -> ArfimaResult<Array1<f64>> {
        let n_points = validate_n_points(n_points)?;
        validate_coefficients("AR", &self.ar)?;
        let d = validate_order(self.d)?;
        let law = opts.noise_law()?;
        let total = n_points
            .checked_add(opts.warmup)
            .ok_or(ArfimaError::LengthOverflow { n_points, extra: opts.warmup })?;
        debug!(p = self.p(), d, q = self.q(), n_points, warmup = opts.warmup, "simulating ARFIMA path");

        let ma_path = moving_average(&self.ma, total, &law, rng)?;
        let integrated = frac_diff(ma_path.view(), -d)?;
        let series = ar_filter(&self.ar, integrated.view())?;

        Ok(series.slice_move(s![total - n_points..]))
    }

    /// Simulate with a fresh `ChaCha8Rng` seeded from `opts.seed`.
    pub fn simulate_seeded(&self, n_points: usize, opts: &ArfimaOptions) -> ArfimaResult<Array1<f64>> {
        let mut rng = seeded_rng(opts.seed);
        self.simulate(n_points, opts, &mut rng)
    }
}

/// Free-function form of [`ArfimaSpec::simulate`].
pub fn arfima<R: Rng + ?Sized>(
    ar: &[f64], d: f64, ma: &[f64], n_points: usize, opts: &ArfimaOptions, rng: &mut R,
) -> ArfimaResult<Array1<f64>> {
    ArfimaSpec::new(ar.to_vec(), d, ma.to_vec())?.simulate(n_points, opts, rng)
}
