//! Zero-mean / unit-variance standardization fit on the training split.
use statrs::statistics::Statistics;

use crate::windowing::{
    errors::{WindowError, WindowResult},
    plan::Window,
};

/// StandardScaler — `(x − mean) / std` with population statistics.
///
/// A zero (or non-finite) standard deviation is replaced by `1.0` so that a
/// constant training split maps to zeros instead of NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StandardScaler {
    pub mean: f64,
    pub std: f64,
}

impl StandardScaler {
    /// Fit mean and population standard deviation of `values`.
    ///
    /// # Errors
    /// `EmptyTrainingSplit` when `values` is empty.
    pub fn fit(values: &[f64]) -> WindowResult<Self> {
        if values.is_empty() {
            return Err(WindowError::EmptyTrainingSplit);
        }
        let mean = values.mean();
        let std = values.population_std_dev();
        let std = if std > 0.0 && std.is_finite() { std } else { 1.0 };
        Ok(StandardScaler { mean, std })
    }

    /// Fit on the feature values of `windows` (targets are not read).
    pub fn fit_features(windows: &[Window<f64>]) -> WindowResult<Self> {
        let values: Vec<f64> = windows.iter().flat_map(|w| w.feature.iter().copied()).collect();
        Self::fit(&values)
    }

    pub fn transform(&self, x: f64) -> f64 {
        (x - self.mean) / self.std
    }

    pub fn inverse_transform(&self, z: f64) -> f64 {
        z * self.std + self.mean
    }

    pub fn transform_slice(&self, xs: &mut [f64]) {
        xs.iter_mut().for_each(|x| *x = self.transform(*x));
    }

    pub fn inverse_transform_slice(&self, zs: &mut [f64]) {
        zs.iter_mut().for_each(|z| *z = self.inverse_transform(*z));
    }

    /// Standardize features and targets of every window in place.
    pub fn transform_windows(&self, windows: &mut [Window<f64>]) {
        for w in windows {
            self.transform_slice(&mut w.feature);
            self.transform_slice(&mut w.target);
        }
    }
}
