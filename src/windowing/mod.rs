//! windowing — spatiotemporal window extraction and train/val/test splits.
//!
//! Purpose
//! -------
//! Turn a flat array of mesh blocks (one block per simulation time step) into
//! (feature, target) window pairs under one of four addressing strategies,
//! and partition them without leaking blocks across partitions.
//!
//! Key behaviors
//! -------------
//! - [`grid`]: block, patch and stride shapes.
//! - [`options`]: [`WindowOption`], [`WindowConfig`], [`SplitOptions`].
//! - [`plan`]: [`WindowPlan`] index arithmetic and the lazy [`Windows`]
//!   iterator.
//! - [`split`]: [`SplitPlan`] boundaries and [`train_val_test_split`].
//! - [`scaling`], [`augment`]: training-statistics standardization and
//!   training-only noise.
//! - [`dataset`]: aligned data / coordinate / timestamp windowing.
//!
//! Invariants & assumptions
//! ------------------------
//! - Flat layout is time slowest, then x1, x2, x3 fastest.
//! - Plans are validated once; window production afterwards cannot fail on
//!   index arithmetic.
//! - Nothing is cached between calls; every split is recomputed from its
//!   inputs.
//!
//! Testing notes
//! -------------
//! - Index rules are pinned by small-grid unit tests in [`plan`]; split
//!   boundaries and alignment are covered in [`split`] and [`dataset`], and
//!   end to end in `tests/integration_window_pipeline.rs`.

pub mod augment;
pub mod dataset;
pub mod errors;
pub mod grid;
pub mod options;
pub mod plan;
pub mod scaling;
pub mod split;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::augment::add_gaussian_noise;
pub use self::dataset::{Coord, MergedDataset, WindowedDataset};
pub use self::errors::{WindowError, WindowResult};
pub use self::grid::{MeshGrid, PatchShape, PatchStride};
pub use self::options::{NoiseSpec, SplitOptions, WindowConfig, WindowOption};
pub use self::plan::{to_windowed, Window, WindowPlan, Windows};
pub use self::scaling::StandardScaler;
pub use self::split::{train_val_test_split, Partition, SplitOutcome, SplitPlan, Splits};

pub mod prelude {
    pub use super::dataset::WindowedDataset;
    pub use super::errors::{WindowError, WindowResult};
    pub use super::grid::{MeshGrid, PatchShape, PatchStride};
    pub use super::options::{NoiseSpec, SplitOptions, WindowConfig, WindowOption};
    pub use super::plan::{to_windowed, Window, WindowPlan};
    pub use super::split::{train_val_test_split, Partition};
}
