//! Aligned windowing of a field with its coordinates and timestamps.
//!
//! The data, coordinate and timestamp arrays share one [`WindowPlan`] and one
//! [`SplitPlan`], so window `k` of every partition refers to the same flat
//! indices in all three. Scaling and noise apply to the data only.
use rand::Rng;
use tracing::debug;

use crate::windowing::{
    errors::{WindowError, WindowResult},
    grid::MeshGrid,
    options::{SplitOptions, WindowConfig},
    plan::{Window, WindowPlan},
    scaling::StandardScaler,
    split::{train_val_test_split, Partition, SplitPlan, Splits},
};

/// Coordinates of one sample, `(x1, x2, x3)`.
pub type Coord = [f64; 3];

/// WindowedDataset — split data windows with parallel coordinate and
/// timestamp windows.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedDataset {
    pub data: Splits<f64>,
    pub coords: Option<Splits<Coord>>,
    pub timestamps: Option<Splits<f64>>,
    pub scaler: Option<StandardScaler>,
    pub split: SplitPlan,
    pub patches_per_block: Option<usize>,
}

impl WindowedDataset {
    /// Window and split `data`, and optionally `coords` / `timestamps`, with
    /// identical parameters.
    ///
    /// Errors
    /// ------
    /// - `LengthMismatch` when `coords` or `timestamps` differ in length from
    ///   `data`.
    /// - Any error of [`train_val_test_split`].
    pub fn build<R: Rng + ?Sized>(
        data: &[f64], coords: Option<&[Coord]>, timestamps: Option<&[f64]>, grid: MeshGrid,
        config: WindowConfig, opts: &SplitOptions, rng: &mut R,
    ) -> WindowResult<Self> {
        check_len("coords", data.len(), coords.map(<[Coord]>::len))?;
        check_len("timestamps", data.len(), timestamps.map(<[f64]>::len))?;

        let outcome = train_val_test_split(data, grid, config, opts, rng)?;
        let plan = WindowPlan::new(data.len(), grid, config)?;
        let coords = coords.map(|c| outcome.plan.materialize(&plan, c)).transpose()?;
        let timestamps = timestamps.map(|t| outcome.plan.materialize(&plan, t)).transpose()?;
        debug!(
            with_coords = coords.is_some(),
            with_timestamps = timestamps.is_some(),
            "built windowed dataset"
        );

        Ok(WindowedDataset {
            data: outcome.splits,
            coords,
            timestamps,
            scaler: outcome.scaler,
            split: outcome.plan,
            patches_per_block: outcome.patches_per_block,
        })
    }

    /// Number of windows in `partition`.
    pub fn len(&self, partition: Partition) -> usize {
        self.data.get(partition).len()
    }

    /// Collapse validation and test in all three arrays (validation first).
    pub fn merge_val_test(self) -> MergedDataset {
        let (train, eval) = self.data.merge_val_test();
        let (coords_train, coords_eval) = self.coords.map(Splits::merge_val_test).unzip();
        let (ts_train, ts_eval) = self.timestamps.map(Splits::merge_val_test).unzip();
        MergedDataset {
            train,
            eval,
            coords_train,
            coords_eval,
            timestamps_train: ts_train,
            timestamps_eval: ts_eval,
            scaler: self.scaler,
        }
    }
}

/// Train/eval view produced by [`WindowedDataset::merge_val_test`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergedDataset {
    pub train: Vec<Window<f64>>,
    pub eval: Vec<Window<f64>>,
    pub coords_train: Option<Vec<Window<Coord>>>,
    pub coords_eval: Option<Vec<Window<Coord>>>,
    pub timestamps_train: Option<Vec<Window<f64>>>,
    pub timestamps_eval: Option<Vec<Window<f64>>>,
    pub scaler: Option<StandardScaler>,
}

fn check_len(name: &'static str, expected: usize, actual: Option<usize>) -> WindowResult<()> {
    match actual {
        Some(actual) if actual != expected => {
            Err(WindowError::LengthMismatch { name, expected, actual })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::windowing::{grid::PatchShape, options::WindowOption};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid_inputs(blocks: usize) -> (Vec<f64>, Vec<Coord>, Vec<f64>) {
        let grid = MeshGrid::cube(4).unwrap();
        let mut data = Vec::new();
        let mut coords = Vec::new();
        let mut ts = Vec::new();
        for t in 0..blocks {
            for i1 in 0..4 {
                for i2 in 0..4 {
                    for i3 in 0..4 {
                        data.push((t * grid.volume() + grid.offset(i1, i2, i3)) as f64);
                        coords.push([i1 as f64, i2 as f64, i3 as f64]);
                        ts.push(t as f64 * 0.5);
                    }
                }
            }
        }
        (data, coords, ts)
    }

    fn patch_config() -> WindowConfig {
        WindowConfig::new(WindowOption::Patch, 3, 1)
            .with_patch_size(PatchShape { x1: 2, x2: 2, x3: 2 })
    }

    #[test]
    // Purpose
    // -------
    // Coordinates and timestamps line up element for element with data.
    //
    // Given
    // -----
    // - 20 blocks of a 4³ grid; data equals the flat index, so the
    //   coordinate and time of every data element can be recomputed.
    //
    // Expect
    // ------
    // - For every partition and element, decoding the data value yields the
    //   coordinate and timestamp stored at the same position.
    fn parallel_arrays_align() {
        let (data, coords, ts) = grid_inputs(20);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let ds = WindowedDataset::build(
            &data,
            Some(coords.as_slice()),
            Some(ts.as_slice()),
            MeshGrid::cube(4).unwrap(),
            patch_config(),
            &SplitOptions::default(),
            &mut rng,
        )
        .unwrap();

        let c = ds.coords.as_ref().unwrap();
        let t = ds.timestamps.as_ref().unwrap();
        for part in [Partition::Train, Partition::Val, Partition::Test] {
            assert_eq!(ds.data.get(part).len(), c.get(part).len());
            for ((dw, cw), tw) in ds.data.get(part).iter().zip(c.get(part)).zip(t.get(part)) {
                for k in 0..dw.feature.len() {
                    let idx = dw.feature[k] as usize;
                    let r = idx % 64;
                    assert_eq!(cw.feature[k], [(r / 16) as f64, ((r / 4) % 4) as f64, (r % 4) as f64]);
                    assert_eq!(tw.feature[k], (idx / 64) as f64 * 0.5);
                }
            }
        }
        assert_eq!(ds.len(Partition::Train), 72);
    }

    #[test]
    // Purpose
    // -------
    // Mismatched parallel arrays are rejected before windowing.
    //
    // Given
    // -----
    // - Timestamps one element short.
    //
    // Expect
    // ------
    // - `LengthMismatch { name: "timestamps" }`.
    fn mismatched_timestamps_fail() {
        let (data, _, ts) = grid_inputs(20);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let err = WindowedDataset::build(
            &data,
            None,
            Some(&ts[1..]),
            MeshGrid::cube(4).unwrap(),
            patch_config(),
            &SplitOptions::default(),
            &mut rng,
        )
        .unwrap_err();

        assert_eq!(
            err,
            WindowError::LengthMismatch { name: "timestamps", expected: 1280, actual: 1279 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Merging keeps the three arrays aligned.
    //
    // Given
    // -----
    // - The 20-block dataset with coordinates only.
    //
    // Expect
    // ------
    // - Eval data and eval coordinates have equal length; timestamps absent.
    fn merge_keeps_alignment() {
        let (data, coords, _) = grid_inputs(20);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let ds = WindowedDataset::build(
            &data,
            Some(coords.as_slice()),
            None,
            MeshGrid::cube(4).unwrap(),
            patch_config(),
            &SplitOptions::default(),
            &mut rng,
        )
        .unwrap();

        let merged = ds.merge_val_test();

        assert_eq!(merged.eval.len(), merged.coords_eval.as_ref().unwrap().len());
        assert_eq!(merged.train.len(), merged.coords_train.unwrap().len());
        assert!(merged.timestamps_eval.is_none());
    }
}
