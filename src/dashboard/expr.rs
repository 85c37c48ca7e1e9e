//! Series expressions: how a trace's values are derived from snapshots.

use serde::{Deserialize, Serialize};

use crate::data::{
    chunked_growth, delta, linear_combination, ratio, scale, DeltaMode, Series, SeriesSpec,
    SeriesStore,
};
use crate::error::Result;

/// A derivation tree over extracted series.
///
/// In a definition file each node is a table tagged by `op`:
///
/// ```toml
/// series = { op = "delta", mode = "clamped", of = { op = "metric", path = "runtime.MemStats.NumGC", stat = "value" } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SeriesExpr {
    /// A raw series read straight from the snapshots.
    Metric { path: String, stat: String },
    /// Per-tick increments of a cumulative counter.
    Delta {
        #[serde(default)]
        mode: DeltaMode,
        of: Box<SeriesExpr>,
    },
    /// Percent growth averaged over windows of `chunk` steps.
    Growth { chunk: usize, of: Box<SeriesExpr> },
    Ratio {
        numerator: Box<SeriesExpr>,
        denominator: Box<SeriesExpr>,
    },
    /// Weighted sum of several series.
    Combine { terms: Vec<Term> },
    Scale { factor: f64, of: Box<SeriesExpr> },
}

/// One weighted operand of [`SeriesExpr::Combine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub coef: f64,
    pub of: SeriesExpr,
}

impl SeriesExpr {
    pub fn metric(path: impl Into<String>, stat: impl Into<String>) -> Self {
        SeriesExpr::Metric {
            path: path.into(),
            stat: stat.into(),
        }
    }

    /// Append every metric this expression reads to `out`.
    pub fn collect_specs(&self, out: &mut Vec<SeriesSpec>) {
        match self {
            SeriesExpr::Metric { path, stat } => out.push(SeriesSpec::new(path, stat)),
            SeriesExpr::Delta { of, .. }
            | SeriesExpr::Growth { of, .. }
            | SeriesExpr::Scale { of, .. } => of.collect_specs(out),
            SeriesExpr::Ratio {
                numerator,
                denominator,
            } => {
                numerator.collect_specs(out);
                denominator.collect_specs(out);
            }
            SeriesExpr::Combine { terms } => {
                for term in terms {
                    term.of.collect_specs(out);
                }
            }
        }
    }

    /// Compute this expression's series.
    ///
    /// Leaf series come from `store`, so a metric referenced by several
    /// expressions is extracted once.
    pub fn evaluate(&self, store: &mut SeriesStore<'_>) -> Result<Series> {
        match self {
            SeriesExpr::Metric { path, stat } => store.get(&SeriesSpec::new(path, stat)),
            SeriesExpr::Delta { mode, of } => Ok(delta(&of.evaluate(store)?, *mode)),
            SeriesExpr::Growth { chunk, of } => chunked_growth(&of.evaluate(store)?, *chunk),
            SeriesExpr::Ratio {
                numerator,
                denominator,
            } => {
                let numerator = numerator.evaluate(store)?;
                let denominator = denominator.evaluate(store)?;
                ratio(&numerator, &denominator)
            }
            SeriesExpr::Combine { terms } => {
                let evaluated = terms
                    .iter()
                    .map(|term| -> Result<(f64, Series)> {
                        Ok((term.coef, term.of.evaluate(store)?))
                    })
                    .collect::<Result<Vec<_>>>()?;
                let borrowed: Vec<(f64, &Series)> =
                    evaluated.iter().map(|(coef, series)| (*coef, series)).collect();
                linear_combination(&borrowed)
            }
            SeriesExpr::Scale { factor, of } => Ok(scale(&of.evaluate(store)?, *factor)),
        }
    }
}
