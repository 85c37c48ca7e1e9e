//! Series extraction and derivation.
//!
//! This module turns a loaded snapshot sequence into charts-ready series.
//!
//! ## Submodules
//!
//! - [`series`]: the [`Series`] type, extraction by [`SeriesSpec`], and the
//!   memoising [`SeriesStore`]
//! - [`transform`]: counter deltas, ratios, linear combinations, scaling
//! - [`growth`]: step growth and windowed average growth
//!
//! ## Data Flow
//!
//! ```text
//! Vec<Snapshot>
//!        │
//!        ▼
//! extract(path, stat) ──▶ Series ──┬──▶ delta (raw | clamped)
//!                                  ├──▶ chunked_growth
//!                                  ├──▶ ratio
//!                                  └──▶ linear_combination
//! ```

pub mod growth;
pub mod series;
pub mod transform;

pub use growth::{chunked_growth, step_growth};
pub use series::{extract, Series, SeriesSpec, SeriesStore};
pub use transform::{delta, linear_combination, ratio, scale, DeltaMode};
