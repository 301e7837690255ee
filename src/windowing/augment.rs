//! Training-set noise injection.
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::windowing::{
    errors::{WindowError, WindowResult},
    options::NoiseSpec,
    plan::Window,
};

/// Add i.i.d. `N(mean, std²)` noise to every feature and target value.
///
/// Values are perturbed window by window, feature before target, so a
/// seeded `rng` reproduces the same draws.
///
/// # Errors
/// `InvalidNoise` for a non-finite mean or a negative / non-finite std.
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    windows: &mut [Window<f64>], noise: NoiseSpec, rng: &mut R,
) -> WindowResult<()> {
    let invalid = WindowError::InvalidNoise { mean: noise.mean, std: noise.std };
    if !noise.mean.is_finite() || !noise.std.is_finite() || noise.std < 0.0 {
        return Err(invalid);
    }
    let normal = Normal::new(noise.mean, noise.std).map_err(|_| invalid)?;
    for w in windows {
        for x in w.feature.iter_mut().chain(w.target.iter_mut()) {
            *x += normal.sample(rng);
        }
    }
    Ok(())
}
