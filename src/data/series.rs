//! Per-tick numeric series and their extraction from snapshots.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::source::Snapshot;

/// An immutable, indexable sequence of values, one per tick.
///
/// Clones share the same buffer, so a series can be handed to any number of
/// transforms and panels without copying or drifting.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Series(Arc<[f64]>);

impl Series {
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Smallest and largest value, or `None` for an empty series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        let mut values = self.0.iter().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::from(Vec::new())
    }
}

impl Deref for Series {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self(values.into())
    }
}

impl From<Series> for Vec<f64> {
    fn from(series: Series) -> Self {
        series.0.to_vec()
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Debug for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Identifies one series: a metric path and one of its statistic keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub path: String,
    pub stat: String,
}

impl SeriesSpec {
    pub fn new(path: impl Into<String>, stat: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            stat: stat.into(),
        }
    }
}

impl fmt::Display for SeriesSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.path, self.stat)
    }
}

/// Extract the series named by `spec`, one value per snapshot, in order.
///
/// Fails on the first tick where the metric or statistic is missing.
pub fn extract(snapshots: &[Snapshot], spec: &SeriesSpec) -> Result<Series> {
    snapshots
        .iter()
        .enumerate()
        .map(|(i, snapshot)| {
            snapshot
                .resolve(&spec.path, &spec.stat)
                .map_err(|source| PipelineError::Lookup { tick: i + 1, source })
        })
        .collect()
}

/// Extracted series keyed by spec, over one borrowed snapshot sequence.
///
/// Each spec is extracted at most once per run.
#[derive(Debug)]
pub struct SeriesStore<'a> {
    snapshots: &'a [Snapshot],
    series: HashMap<SeriesSpec, Series>,
}

impl<'a> SeriesStore<'a> {
    pub fn new(snapshots: &'a [Snapshot]) -> Self {
        Self {
            snapshots,
            series: HashMap::new(),
        }
    }

    /// Number of ticks in the underlying snapshot sequence.
    pub fn ticks(&self) -> usize {
        self.snapshots.len()
    }

    /// Get the series for `spec`, extracting it on first use.
    pub fn get(&mut self, spec: &SeriesSpec) -> Result<Series> {
        if let Some(series) = self.series.get(spec) {
            return Ok(series.clone());
        }

        let series = extract(self.snapshots, spec)?;
        debug!(series = %spec, ticks = series.len(), "extracted series");
        self.series.insert(spec.clone(), series.clone());
        Ok(series)
    }

    /// Number of distinct series extracted so far.
    pub fn extracted(&self) -> usize {
        self.series.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::source::parse_records;

    fn snapshots() -> Vec<Snapshot> {
        parse_records(
            "{\"hyper.add\":{\"95%\":10,\"count\":5}}\n\
             {\"hyper.add\":{\"95%\":20,\"count\":5}}\n\
             {\"hyper.add\":{\"95%\":15,\"count\":12}}\n",
        )
        .unwrap()
    }

    #[test]
    fn test_extract_preserves_tick_order() {
        let series = extract(&snapshots(), &SeriesSpec::new("hyper.add", "95%")).unwrap();
        assert_eq!(series.values(), &[10.0, 20.0, 15.0]);
    }

    #[test]
    fn test_extract_length_matches_snapshots() {
        let snapshots = snapshots();
        for n in 0..=snapshots.len() {
            let series = extract(&snapshots[..n], &SeriesSpec::new("hyper.add", "count")).unwrap();
            assert_eq!(series.len(), n);
        }
    }

    #[test]
    fn test_extract_is_pure() {
        let snapshots = snapshots();
        let before = snapshots.clone();
        let spec = SeriesSpec::new("hyper.add", "95%");

        let first = extract(&snapshots, &spec).unwrap();
        let second = extract(&snapshots, &spec).unwrap();
        assert_eq!(first, second);
        assert_eq!(snapshots, before);
    }

    #[test]
    fn test_extract_reports_failing_tick() {
        let snapshots = parse_records(
            "{\"m\":{\"value\":1}}\n{\"m\":{\"value\":2}}\n{\"n\":{\"value\":3}}\n",
        )
        .unwrap();
        match extract(&snapshots, &SeriesSpec::new("m", "value")) {
            Err(PipelineError::Lookup { tick, source }) => {
                assert_eq!(tick, 3);
                assert!(matches!(source, LookupError::MetricNotFound { .. }));
            }
            other => panic!("expected lookup error, got {:?}", other),
        }

        match extract(&snapshots[..2], &SeriesSpec::new("m", "count")) {
            Err(PipelineError::Lookup { tick, source }) => {
                assert_eq!(tick, 1);
                assert!(matches!(source, LookupError::StatisticNotFound { .. }));
            }
            other => panic!("expected lookup error, got {:?}", other),
        }
    }

    #[test]
    fn test_series_is_reusable() {
        let series = extract(&snapshots(), &SeriesSpec::new("hyper.add", "95%")).unwrap();
        let sum_a: f64 = series.iter().sum();
        let paired: Vec<f64> = series.iter().zip(series.iter().skip(1)).map(|(a, b)| b - a).collect();
        let sum_b: f64 = series.iter().sum();
        assert_eq!(sum_a, sum_b);
        assert_eq!(paired, vec![10.0, -5.0]);
    }

    #[test]
    fn test_series_bounds() {
        assert_eq!(Series::from(vec![3.0, -1.0, 7.5]).bounds(), Some((-1.0, 7.5)));
        assert_eq!(Series::default().bounds(), None);
    }

    #[test]
    fn test_store_extracts_once() {
        let snapshots = snapshots();
        let mut store = SeriesStore::new(&snapshots);
        let spec = SeriesSpec::new("hyper.add", "count");

        let a = store.get(&spec).unwrap();
        let b = store.get(&spec).unwrap();
        assert_eq!(a, b);
        assert_eq!(store.extracted(), 1);
        assert_eq!(store.ticks(), 3);

        store.get(&SeriesSpec::new("hyper.add", "95%")).unwrap();
        assert_eq!(store.extracted(), 2);
    }

    #[test]
    fn test_store_does_not_cache_failures() {
        let snapshots = snapshots();
        let mut store = SeriesStore::new(&snapshots);
        assert!(store.get(&SeriesSpec::new("missing", "count")).is_err());
        assert_eq!(store.extracted(), 0);
    }

    #[test]
    fn test_spec_display() {
        assert_eq!(SeriesSpec::new("cache.size", "value").to_string(), "cache.size[value]");
    }
}
