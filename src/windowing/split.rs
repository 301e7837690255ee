//! Train / validation / test splitting of window sequences.
//!
//! Purpose
//! -------
//! Partition the windows of a [`WindowPlan`] into three disjoint,
//! order-preserving ranges, then apply the optional training-set transforms
//! (standardization and noise).
//!
//! Key behaviors
//! -------------
//! - [`SplitPlan::new`] computes window-index ranges only; it never touches
//!   data, so one split plan serves data, coordinates and timestamps.
//! - Patch strategies split at block granularity:
//!   `train_blocks = ⌊T·train⌋ − ((w − 1) + p)`, `val_blocks = ⌊T·val⌋`,
//!   boundaries at multiples of `patches_per_block`. Every window anchored on
//!   a given block lands in exactly one partition.
//! - `space` / `time` split the window sequence directly by proportion.
//! - [`train_val_test_split`] windows, splits, scales (train statistics) and
//!   perturbs the training partition in that order.
//!
//! Invariants & assumptions
//! ------------------------
//! - Ranges are contiguous, cover `0..plan.len()` and are clamped to it, like
//!   slice semantics on the materialized sequence.
//! - The test partition takes whatever remains after train and validation,
//!   including any proportion remainder.
//! - Validation and test windows are never modified by noise.
//!
//! Testing notes
//! -------------
//! - Unit tests pin boundaries for both split modes, the error path for a
//!   too-small training share, and the transform ordering.
use std::ops::Range;

use rand::Rng;
use tracing::debug;

use crate::windowing::{
    augment::add_gaussian_noise,
    errors::{WindowError, WindowResult},
    grid::MeshGrid,
    options::{SplitOptions, WindowConfig},
    plan::{Window, WindowPlan},
    scaling::StandardScaler,
    validation::{check_proportion_sum, validate_split_options},
};

/// Which partition of a [`Splits`] to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Train,
    Val,
    Test,
}

/// SplitPlan — window-index ranges of the three partitions.
///
/// `sums_to_one` is `false` when the proportions missed 1 by more than
/// [`PROPORTION_SUM_TOL`](crate::windowing::validation::PROPORTION_SUM_TOL);
/// the test range then holds the remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPlan {
    pub train: Range<usize>,
    pub val: Range<usize>,
    pub test: Range<usize>,
    pub sums_to_one: bool,
}

impl SplitPlan {
    /// Compute partition boundaries for `plan` under `opts`.
    ///
    /// Errors
    /// ------
    /// - `InvalidProportion` for a proportion outside `[0, 1]`.
    /// - `InsufficientTrainingBlocks` when the training share of blocks is
    ///   smaller than the `(w − 1) + p` blocks reserved at the boundary
    ///   (patch strategies only).
    ///
    /// Notes
    /// -----
    /// - Proportions that do not sum to one only log a warning.
    pub fn new(plan: &WindowPlan, opts: &SplitOptions) -> WindowResult<Self> {
        validate_split_options(opts)?;
        let sums_to_one = check_proportion_sum(opts);

        let n = plan.len();
        let (train_len, val_len) = match plan.patches_per_block() {
            Some(ppb) => {
                let total_blocks = plan.data_len() / plan.grid().volume();
                let config = plan.config();
                let reserved = (config.window_size - 1) + config.pred_size;
                let train_share = floor_share(total_blocks, opts.train_proportion);
                if train_share < reserved {
                    return Err(WindowError::InsufficientTrainingBlocks {
                        total_blocks,
                        train_blocks: train_share,
                        reserved,
                    });
                }
                let train_blocks = train_share - reserved;
                let val_blocks = floor_share(total_blocks, opts.val_proportion);
                debug!(total_blocks, train_blocks, val_blocks, reserved, "block split");
                (train_blocks * ppb, val_blocks * ppb)
            }
            None => (floor_share(n, opts.train_proportion), floor_share(n, opts.val_proportion)),
        };

        let train_end = train_len.min(n);
        let val_end = (train_end + val_len).min(n);
        let split = SplitPlan {
            train: 0..train_end,
            val: train_end..val_end,
            test: val_end..n,
            sums_to_one,
        };
        debug!(
            windows = n,
            train = split.train.len(),
            val = split.val.len(),
            test = split.test.len(),
            sums_to_one,
            "window split"
        );
        Ok(split)
    }

    pub fn range(&self, partition: Partition) -> Range<usize> {
        match partition {
            Partition::Train => self.train.clone(),
            Partition::Val => self.val.clone(),
            Partition::Test => self.test.clone(),
        }
    }

    /// Materialize all three partitions of `data` under `plan`.
    pub fn materialize<T: Copy>(&self, plan: &WindowPlan, data: &[T]) -> WindowResult<Splits<T>> {
        Ok(Splits {
            train: plan.iter_range(data, self.train.clone())?.collect(),
            val: plan.iter_range(data, self.val.clone())?.collect(),
            test: plan.iter_range(data, self.test.clone())?.collect(),
        })
    }
}

fn floor_share(total: usize, proportion: f64) -> usize {
    (total as f64 * proportion).floor() as usize
}

/// Materialized partitions.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Splits<T> {
    pub train: Vec<Window<T>>,
    pub val: Vec<Window<T>>,
    pub test: Vec<Window<T>>,
}

impl<T> Splits<T> {
    pub fn get(&self, partition: Partition) -> &[Window<T>] {
        match partition {
            Partition::Train => &self.train,
            Partition::Val => &self.val,
            Partition::Test => &self.test,
        }
    }

    pub fn lens(&self) -> (usize, usize, usize) {
        (self.train.len(), self.val.len(), self.test.len())
    }

    /// Collapse validation and test into one evaluation set, validation
    /// first. Returns `(train, eval)`.
    pub fn merge_val_test(self) -> (Vec<Window<T>>, Vec<Window<T>>) {
        let Splits { train, mut val, test } = self;
        val.extend(test);
        (train, val)
    }

    /// Fixed-size batches over one partition; the last batch may be short.
    ///
    /// # Errors
    /// `InvalidBatchSize` when `batch_size == 0`.
    pub fn batches(
        &self, partition: Partition, batch_size: usize,
    ) -> WindowResult<std::slice::Chunks<'_, Window<T>>> {
        if batch_size == 0 {
            return Err(WindowError::InvalidBatchSize { batch_size });
        }
        Ok(self.get(partition).chunks(batch_size))
    }
}

/// Result of [`train_val_test_split`].
///
/// - `splits`: the (possibly scaled / perturbed) partitions.
/// - `scaler`: fitted scaler when scaling was requested.
/// - `plan`: the index ranges, reusable for parallel arrays.
/// - `patches_per_block`: `None` for `space` and `time`.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitOutcome {
    pub splits: Splits<f64>,
    pub scaler: Option<StandardScaler>,
    pub plan: SplitPlan,
    pub patches_per_block: Option<usize>,
}

/// Window `data`, split the windows, then standardize and perturb.
///
/// Parameters
/// ----------
/// - `data`: flat scalar field.
/// - `grid`, `config`: passed to [`WindowPlan::new`].
/// - `opts`: proportions, scaling and noise.
/// - `rng`: source for training noise; untouched when `opts.noise` is `None`.
///
/// Errors
/// ------
/// - Any [`WindowPlan::new`] or [`SplitPlan::new`] error.
/// - `EmptyTrainingSplit` when scaling an empty training partition.
pub fn train_val_test_split<R: Rng + ?Sized>(
    data: &[f64], grid: MeshGrid, config: WindowConfig, opts: &SplitOptions, rng: &mut R,
) -> WindowResult<SplitOutcome> {
    let window_plan = WindowPlan::new(data.len(), grid, config)?;
    let plan = SplitPlan::new(&window_plan, opts)?;
    let mut splits = plan.materialize(&window_plan, data)?;

    let scaler = if opts.scale {
        let scaler = StandardScaler::fit_features(&splits.train)?;
        debug!(mean = scaler.mean, std = scaler.std, "fitted scaler on training features");
        scaler.transform_windows(&mut splits.train);
        scaler.transform_windows(&mut splits.val);
        scaler.transform_windows(&mut splits.test);
        Some(scaler)
    } else {
        None
    };

    if let Some(noise) = opts.noise {
        add_gaussian_noise(&mut splits.train, noise, rng)?;
    }

    Ok(SplitOutcome {
        splits,
        scaler,
        plan,
        patches_per_block: window_plan.patches_per_block(),
    })
}
