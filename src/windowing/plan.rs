//! Window plans — index arithmetic for the four addressing strategies.
//!
//! Purpose
//! -------
//! Turn a flat array length, a mesh grid and a [`WindowConfig`] into a
//! validated, restartable description of every (feature, target) window,
//! without touching the data until a window is requested.
//!
//! Key behaviors
//! -------------
//! - [`WindowPlan::new`] validates the configuration and data length and
//!   precomputes the relative feature offsets shared by all windows.
//! - Window `i` reads `origin(i) + offset[k]` for its feature and
//!   `origin(i) + offset[k] + shift` for its target, where `shift` is
//!   `pred_size` samples (`space`) or `pred_size` blocks (all others).
//! - [`WindowPlan::iter`] yields windows lazily; the iterator is `Clone`,
//!   so a sequence can be restarted without rebuilding the plan.
//! - The element type is generic, so data, coordinates and timestamps
//!   share one plan and line up index for index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Flat layout is time slowest, then x1, x2, x3 fastest. Under the patch
//!   strategies every index equals
//!   `block_origin + Δt·V + Δ1·nx2·nx3 + Δ2·nx3 + Δ3` with `V = nx1·nx2·nx3`.
//! - Patch origins enumerate time offset slowest, then x1, x2, x3; within a
//!   window, elements enumerate Δt slowest, then Δ1, Δ2, Δ3.
//! - Every target index is `< data_len`; the window count is the largest
//!   for which this holds.
//!
//! Window counts (`w = window_size`, `p = pred_size`, `T = len / V`)
//! -----------------------------------------------------------------
//! - `space`: `len − w − p + 1`, each window `w` samples.
//! - `time`: `len − V·(w + p − 1)`, each window `w` samples strided by `V`.
//! - `patch`: `ppb·(T − w)`, each window `w − p + 1` patch snapshots.
//! - `patch_overlap`: `ppb·(T − w − p + 1)`, each window `w` patch snapshots.
//!
//! Testing notes
//! -------------
//! - Unit tests pin counts and exact indices for small grids for every
//!   strategy, and check laziness/restartability of the iterator.
use std::ops::Range;

use tracing::debug;

use crate::windowing::{
    errors::{WindowError, WindowResult},
    grid::MeshGrid,
    options::{WindowConfig, WindowOption},
    validation::validate_window_config,
};

/// One training example: a feature window and the target window `pred_size`
/// steps ahead over the same spatial footprint.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window<T> {
    pub feature: Vec<T>,
    pub target: Vec<T>,
}

impl<T> Window<T> {
    pub fn len(&self) -> usize {
        self.feature.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feature.is_empty()
    }
}

/// Origin enumeration for the patch strategies.
#[derive(Debug, Clone, PartialEq)]
struct PatchOrigins {
    /// Origins per axis.
    counts: [usize; 3],
    /// Grid cells between neighbouring origins per axis.
    steps: [usize; 3],
}

impl PatchOrigins {
    fn per_block(&self) -> usize {
        self.counts.iter().product()
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Origins {
    /// Window `i` starts at flat index `i`.
    Linear,
    Patches(PatchOrigins),
}

/// WindowPlan — validated index layout of every window over a flat array.
///
/// Fields
/// ------
/// - `grid`, `config`: the inputs the plan was built from.
/// - `data_len`: length of the flat arrays this plan may be applied to.
/// - `num_windows`: total number of windows.
/// - `offsets`: feature offsets relative to a window origin.
/// - `shift`: distance from a feature index to its target index.
///
/// Performance
/// -----------
/// - Construction is O(window length); producing a window is O(window
///   length) with one allocation each for feature and target.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowPlan {
    grid: MeshGrid,
    config: WindowConfig,
    data_len: usize,
    num_windows: usize,
    time_offsets: usize,
    origins: Origins,
    offsets: Vec<usize>,
    shift: usize,
}

impl WindowPlan {
    /// Build the plan for a flat array of length `data_len`.
    ///
    /// Parameters
    /// ----------
    /// - `data_len`: `usize`
    ///   Length of the flat array. Must be a whole number of blocks for
    ///   every strategy except `space`.
    /// - `grid`: [`MeshGrid`]
    ///   Block extent; ignored by `space`.
    /// - `config`: [`WindowConfig`]
    ///   Strategy and window extents.
    ///
    /// Errors
    /// ------
    /// - Configuration errors from [`validate_window_config`].
    /// - `EmptyData` / `NotBlockAligned` for malformed lengths.
    /// - `InsufficientData` when not even one window fits.
    /// - `WindowSpanOverflow` when the samples one window spans overflow `usize`.
    pub fn new(data_len: usize, grid: MeshGrid, config: WindowConfig) -> WindowResult<Self> {
        validate_window_config(&grid, &config)?;
        let w = config.window_size;
        let p = config.pred_size;
        let span_overflow = WindowError::WindowSpanOverflow { window_size: w, pred_size: p };
        let steps = w.checked_add(p).ok_or_else(|| span_overflow.clone())?;

        let plan = match config.option {
            WindowOption::Space => {
                if data_len == 0 {
                    return Err(WindowError::EmptyData);
                }
                let required = steps;
                if data_len < required {
                    return Err(WindowError::InsufficientData { len: data_len, required });
                }
                let num_windows = data_len - required + 1;
                WindowPlan {
                    grid,
                    config,
                    data_len,
                    num_windows,
                    time_offsets: num_windows,
                    origins: Origins::Linear,
                    offsets: (0..w).collect(),
                    shift: p,
                }
            }
            WindowOption::Time => {
                grid.num_blocks(data_len)?;
                let volume = grid.volume();
                let span = volume.checked_mul(steps - 1).ok_or(span_overflow)?;
                if data_len <= span {
                    return Err(WindowError::InsufficientData { len: data_len, required: span + 1 });
                }
                let num_windows = data_len - span;
                WindowPlan {
                    grid,
                    config,
                    data_len,
                    num_windows,
                    time_offsets: num_windows,
                    origins: Origins::Linear,
                    offsets: (0..w).map(|k| k * volume).collect(),
                    shift: p * volume,
                }
            }
            WindowOption::Patch | WindowOption::PatchOverlap => {
                let blocks = grid.num_blocks(data_len)?;
                let volume = grid.volume();
                let patch = config.patch_size.extents();
                let (steps_in_window, blocks_needed, origins) = if config.option == WindowOption::Patch
                {
                    let counts = [0, 1, 2].map(|a| grid.extents()[a] / patch[a]);
                    (w - p + 1, w + 1, PatchOrigins { counts, steps: patch })
                } else {
                    let stride = config.patch_stride.extents();
                    let counts = [0, 1, 2].map(|a| (grid.extents()[a] - patch[a]) / stride[a] + 1);
                    (w, steps, PatchOrigins { counts, steps: stride })
                };
                if blocks < blocks_needed {
                    return Err(WindowError::InsufficientData {
                        len: data_len,
                        required: blocks_needed.saturating_mul(volume),
                    });
                }
                let time_offsets = blocks - blocks_needed + 1;
                let num_windows = time_offsets * origins.per_block();

                let mut offsets = Vec::with_capacity(steps_in_window * config.patch_size.volume());
                for dt in 0..steps_in_window {
                    for d1 in 0..patch[0] {
                        for d2 in 0..patch[1] {
                            for d3 in 0..patch[2] {
                                offsets.push(dt * volume + grid.offset(d1, d2, d3));
                            }
                        }
                    }
                }
                WindowPlan {
                    grid,
                    config,
                    data_len,
                    num_windows,
                    time_offsets,
                    origins: Origins::Patches(origins),
                    offsets,
                    shift: p * volume,
                }
            }
        };

        debug!(
            option = %plan.config.option,
            data_len,
            windows = plan.num_windows,
            window_len = plan.offsets.len(),
            patches_per_block = ?plan.patches_per_block(),
            "built window plan"
        );
        Ok(plan)
    }

    pub fn grid(&self) -> MeshGrid {
        self.grid
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    pub fn option(&self) -> WindowOption {
        self.config.option
    }

    pub fn data_len(&self) -> usize {
        self.data_len
    }

    /// Total number of windows.
    pub fn len(&self) -> usize {
        self.num_windows
    }

    pub fn is_empty(&self) -> bool {
        self.num_windows == 0
    }

    /// Elements per feature (and per target) window.
    pub fn window_len(&self) -> usize {
        self.offsets.len()
    }

    /// Patches anchored on each block; `None` for `space` and `time`.
    pub fn patches_per_block(&self) -> Option<usize> {
        match &self.origins {
            Origins::Linear => None,
            Origins::Patches(o) => Some(o.per_block()),
        }
    }

    /// Number of distinct window start times (blocks for the patch strategies,
    /// raw start indices otherwise).
    pub fn time_offsets(&self) -> usize {
        self.time_offsets
    }

    /// Flat index of the first feature element of window `i`.
    fn origin(&self, i: usize) -> usize {
        match &self.origins {
            Origins::Linear => i,
            Origins::Patches(o) => {
                let per_block = o.per_block();
                let (t, r) = (i / per_block, i % per_block);
                let [_, c2, c3] = o.counts;
                let (a, b, c) = (r / (c2 * c3), (r / c3) % c2, r % c3);
                t * self.grid.volume()
                    + self.grid.offset(a * o.steps[0], b * o.steps[1], c * o.steps[2])
            }
        }
    }

    /// Block that window `i` is anchored on (patch strategies only).
    pub fn origin_block(&self, i: usize) -> Option<usize> {
        self.patches_per_block().map(|ppb| i / ppb)
    }

    /// Flat feature and target indices of window `i`.
    ///
    /// # Errors
    /// `WindowOutOfRange` when `i >= self.len()`.
    pub fn indices(&self, i: usize) -> WindowResult<(Vec<usize>, Vec<usize>)> {
        self.check_index(i)?;
        let origin = self.origin(i);
        let feature: Vec<usize> = self.offsets.iter().map(|o| origin + o).collect();
        let target = feature.iter().map(|f| f + self.shift).collect();
        Ok((feature, target))
    }

    /// Materialize window `i` from `data`.
    ///
    /// # Errors
    /// - `LengthMismatch` if `data.len() != self.data_len()`.
    /// - `WindowOutOfRange` when `i >= self.len()`.
    pub fn window<T: Copy>(&self, data: &[T], i: usize) -> WindowResult<Window<T>> {
        self.check_data(data)?;
        self.check_index(i)?;
        Ok(self.gather(data, i))
    }

    /// Lazy iterator over all windows.
    ///
    /// # Errors
    /// `LengthMismatch` if `data.len() != self.data_len()`.
    pub fn iter<'a, T: Copy>(&'a self, data: &'a [T]) -> WindowResult<Windows<'a, T>> {
        self.iter_range(data, 0..self.num_windows)
    }

    /// Lazy iterator over the windows with indices in `range`.
    ///
    /// # Errors
    /// - `LengthMismatch` if `data.len() != self.data_len()`.
    /// - `WindowOutOfRange` if `range` extends past `self.len()`.
    pub fn iter_range<'a, T: Copy>(
        &'a self, data: &'a [T], range: Range<usize>,
    ) -> WindowResult<Windows<'a, T>> {
        self.check_data(data)?;
        if range.end > self.num_windows {
            return Err(WindowError::WindowOutOfRange { index: range.end, len: self.num_windows });
        }
        let front = range.start.min(range.end);
        Ok(Windows { plan: self, data, front, back: range.end })
    }

    /// Materialize every window.
    pub fn windows<T: Copy>(&self, data: &[T]) -> WindowResult<Vec<Window<T>>> {
        Ok(self.iter(data)?.collect())
    }

    fn gather<T: Copy>(&self, data: &[T], i: usize) -> Window<T> {
        let origin = self.origin(i);
        let feature = self.offsets.iter().map(|o| data[origin + o]).collect();
        let target = self.offsets.iter().map(|o| data[origin + o + self.shift]).collect();
        Window { feature, target }
    }

    fn check_data<T>(&self, data: &[T]) -> WindowResult<()> {
        if data.len() != self.data_len {
            return Err(WindowError::LengthMismatch {
                name: "data",
                expected: self.data_len,
                actual: data.len(),
            });
        }
        Ok(())
    }

    fn check_index(&self, i: usize) -> WindowResult<()> {
        if i >= self.num_windows {
            return Err(WindowError::WindowOutOfRange { index: i, len: self.num_windows });
        }
        Ok(())
    }
}

/// Lazy, restartable sequence of windows produced by [`WindowPlan::iter`].
#[derive(Debug, Clone)]
pub struct Windows<'a, T> {
    plan: &'a WindowPlan,
    data: &'a [T],
    front: usize,
    back: usize,
}

impl<T: Copy> Iterator for Windows<'_, T> {
    type Item = Window<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let w = self.plan.gather(self.data, self.front);
        self.front += 1;
        Some(w)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl<T: Copy> DoubleEndedIterator for Windows<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.plan.gather(self.data, self.back))
    }
}

impl<T: Copy> ExactSizeIterator for Windows<'_, T> {}

/// Window a flat array in one call.
///
/// Returns the materialized windows and `patches_per_block` (`None` for
/// `space` and `time`).
pub fn to_windowed<T: Copy>(
    data: &[T], grid: MeshGrid, config: WindowConfig,
) -> WindowResult<(Vec<Window<T>>, Option<usize>)> {
    let plan = WindowPlan::new(data.len(), grid, config)?;
    Ok((plan.windows(data)?, plan.patches_per_block()))
}
