//! Snapshot records as written by the metrics reporter.
//!
//! Each line of a metrics log is one JSON object mapping metric paths to
//! their statistics, e.g.
//!
//! ```json
//! {"hyper.add": {"count": 42, "95%": 1830.5}, "cache.size": {"value": 1024}}
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LookupError, PipelineError, Result};

/// Statistic key to value, e.g. `"95%" -> 1830.5` or `"value" -> 1024`.
pub type MetricValues = BTreeMap<String, f64>;

/// All metric readings taken at one sampling instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    metrics: BTreeMap<String, MetricValues>,
}

impl Snapshot {
    /// Look up one statistic of one metric.
    ///
    /// The value is returned in whatever unit the reporter used (bytes,
    /// nanoseconds, counts...). Nothing is defaulted: an absent metric or
    /// statistic is an error.
    pub fn resolve(&self, path: &str, stat: &str) -> Result<f64, LookupError> {
        let values = self
            .metrics
            .get(path)
            .ok_or_else(|| LookupError::MetricNotFound { path: path.to_string() })?;

        values.get(stat).copied().ok_or_else(|| LookupError::StatisticNotFound {
            path: path.to_string(),
            stat: stat.to_string(),
        })
    }

    /// Number of metrics in this snapshot.
    pub fn metric_count(&self) -> usize {
        self.metrics.len()
    }
}

impl FromIterator<(String, MetricValues)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, MetricValues)>>(iter: I) -> Self {
        Self {
            metrics: iter.into_iter().collect(),
        }
    }
}

/// Parse newline-delimited snapshot records.
///
/// Line order is time order. Every line must hold one record; a blank or
/// malformed line fails the whole parse with its 1-based line number.
pub fn parse_records(content: &str) -> Result<Vec<Snapshot>> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| parse_record(i + 1, line))
        .collect()
}

pub(crate) fn parse_record(line_number: usize, line: &str) -> Result<Snapshot> {
    serde_json::from_str(line).map_err(|source| PipelineError::RecordParse {
        line: line_number,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "hyper.add": { "count": 42, "95%": 1830.5, "99%": 2100 },
            "cache.size": { "value": 1024 },
            "hyper.test_add": { "1m.rate": 12.5, "5m.rate": 11.0, "15m.rate": 10.25 }
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.metric_count(), 3);
        assert_eq!(snapshot.resolve("hyper.add", "count").unwrap(), 42.0);
        assert_eq!(snapshot.resolve("hyper.add", "99%").unwrap(), 2100.0);
        assert_eq!(snapshot.resolve("cache.size", "value").unwrap(), 1024.0);
        assert_eq!(snapshot.resolve("hyper.test_add", "15m.rate").unwrap(), 10.25);
    }

    #[test]
    fn test_resolve_missing_metric() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"a.b": {"value": 1}}"#).unwrap();
        let err = snapshot.resolve("a.c", "value").unwrap_err();
        assert_eq!(
            err,
            LookupError::MetricNotFound {
                path: "a.c".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_missing_statistic() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"a.b": {"value": 1}}"#).unwrap();
        let err = snapshot.resolve("a.b", "95%").unwrap_err();
        assert_eq!(
            err,
            LookupError::StatisticNotFound {
                path: "a.b".to_string(),
                stat: "95%".to_string()
            }
        );
    }

    #[test]
    fn test_paths_are_not_split_on_dots() {
        // "hyper.pruning" and "hyper.pruning.after_cache" are distinct metrics
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"hyper.pruning": {"95%": 1}, "hyper.pruning.after_cache": {"95%": 2}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.resolve("hyper.pruning", "95%").unwrap(), 1.0);
        assert_eq!(snapshot.resolve("hyper.pruning.after_cache", "95%").unwrap(), 2.0);
        assert!(snapshot.resolve("hyper", "95%").is_err());
    }

    #[test]
    fn test_parse_records_keeps_line_order() {
        let content = "{\"m\":{\"value\":3}}\n{\"m\":{\"value\":1}}\n{\"m\":{\"value\":2}}\n";
        let snapshots = parse_records(content).unwrap();
        let values: Vec<f64> =
            snapshots.iter().map(|s| s.resolve("m", "value").unwrap()).collect();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_parse_records_rejects_blank_line() {
        let content = "{\"m\":{\"value\":3}}\n\n{\"m\":{\"value\":2}}\n";
        match parse_records(content) {
            Err(PipelineError::RecordParse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_records_rejects_non_numeric_statistic() {
        let content = r#"{"m":{"value":"high"}}"#;
        assert!(matches!(
            parse_records(content),
            Err(PipelineError::RecordParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_parse_records_empty_input() {
        assert!(parse_records("").unwrap().is_empty());
    }
}
