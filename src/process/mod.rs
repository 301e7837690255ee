//! process — synthetic ARFIMA series generation.
//!
//! Purpose
//! -------
//! Produce synthetic scalar time series with long memory, used to exercise
//! and validate the windowing pipeline independently of simulation output.
//!
//! Key behaviors
//! -------------
//! - [`noise`]: Gaussian and symmetric alpha-stable innovation laws.
//! - [`ma`]: the MA(q) sliding dot product over innovations.
//! - [`frac_diff`]: FFT-based fractional differencing with an O(n²)
//!   reference implementation.
//! - [`ar`]: the zero-seeded AR(p) recursion.
//! - [`arfima`]: the composed ARFIMA(p, d, q) driver and its options.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every function is pure apart from the RNG passed in by the caller;
//!   there is no global random state.
//! - Stage order is fixed: MA noise, then fractional integration of order
//!   `−d`, then the AR recursion.
//! - Validation happens before any sample is drawn and reports
//!   [`ArfimaError`].
//!
//! Conventions
//! -----------
//! - Series are stored oldest-first; index 0 is the first retained sample.
//! - Every stage borrows an `ArrayView1<f64>` and returns an owned
//!   `Array1<f64>`, so the driver chains `.view()` calls without copies.
//!
//! Testing notes
//! -------------
//! - Each stage is unit tested against hand computations; the driver is
//!   tested for exact output length, stage order, and reproducibility.

pub mod ar;
pub mod arfima;
pub mod errors;
pub mod frac_diff;
pub mod ma;
pub mod noise;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::ar::ar_filter;
pub use self::arfima::{arfima, ArfimaOptions, ArfimaSpec};
pub use self::errors::{ArfimaError, ArfimaResult};
pub use self::frac_diff::{frac_diff, frac_diff_coefficients, frac_diff_direct};
pub use self::ma::{ma_filter, moving_average};
pub use self::noise::NoiseLaw;

pub mod prelude {
    pub use super::arfima::{arfima, ArfimaOptions, ArfimaSpec};
    pub use super::errors::{ArfimaError, ArfimaResult};
    pub use super::noise::NoiseLaw;
}
