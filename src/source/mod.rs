//! Snapshot sources.
//!
//! This module provides a trait-based abstraction for loading a complete,
//! time-ordered sequence of metric snapshots, plus the snapshot record type
//! itself and the lookup of one statistic inside one snapshot.

mod file;
mod reader;
mod snapshot;

pub use file::FileSource;
pub use reader::ReaderSource;
pub use snapshot::{parse_records, MetricValues, Snapshot};

use std::fmt::Debug;

use crate::error::Result;

/// Trait for loading a metrics log from some backend.
///
/// # Example
///
/// ```no_run
/// use metric_dashboard::{FileSource, SnapshotSource};
///
/// let mut source = FileSource::new("metrics.log");
/// let snapshots = source.load().unwrap();
/// println!("Loaded {} ticks", snapshots.len());
/// ```
pub trait SnapshotSource: Debug {
    /// Load every snapshot, in time order.
    ///
    /// Fails on the first unreadable or malformed record; there is no
    /// partial result.
    fn load(&mut self) -> Result<Vec<Snapshot>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI header.
    fn description(&self) -> &str;
}
