//! Elementwise transforms over aligned series.
//!
//! Every transform returns a new [`Series`]; inputs are never modified. All
//! outputs stay aligned to the snapshot ticks of their inputs.

use serde::{Deserialize, Serialize};

use super::Series;
use crate::error::{PipelineError, Result};

/// How a cumulative counter is turned into per-tick increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaMode {
    /// Plain differences. A counter reset shows up as a negative delta.
    #[default]
    Raw,
    /// Differences floored at zero, hiding restarts and rollovers.
    Clamped,
}

/// Convert a cumulative counter into per-tick increments.
///
/// A zero baseline is assumed before the first tick, so the output has the
/// same length as the input and its first element is the first reading.
pub fn delta(series: &Series, mode: DeltaMode) -> Series {
    let mut prev = 0.0;
    series
        .iter()
        .map(|&cur| {
            let diff = cur - prev;
            prev = cur;
            match mode {
                DeltaMode::Raw => diff,
                DeltaMode::Clamped => diff.max(0.0),
            }
        })
        .collect()
}

/// Elementwise `numerator[i] / denominator[i]`.
///
/// A zero denominator is an error; no substitute value is produced.
pub fn ratio(numerator: &Series, denominator: &Series) -> Result<Series> {
    ensure_len(numerator.len(), denominator.len())?;

    numerator
        .iter()
        .zip(denominator.iter())
        .enumerate()
        .map(|(index, (&n, &d))| {
            if d == 0.0 {
                Err(PipelineError::DivisionByZero {
                    context: "ratio denominator",
                    index,
                })
            } else {
                Ok(n / d)
            }
        })
        .collect()
}

/// Elementwise weighted sum `Σ coef_j * series_j[i]`.
///
/// E.g. `[(1.0, total), (-1.0, a), (-1.0, b)]` derives the part of `total`
/// not covered by `a` and `b`.
pub fn linear_combination(terms: &[(f64, &Series)]) -> Result<Series> {
    let (_, first) = terms.first().ok_or(PipelineError::EmptyCombination)?;
    let len = first.len();
    for (_, series) in &terms[1..] {
        ensure_len(len, series.len())?;
    }

    Ok((0..len)
        .map(|i| terms.iter().map(|(coef, series)| coef * series[i]).sum())
        .collect())
}

/// Multiply every element by `factor`, e.g. `1e-6` for nanoseconds to
/// milliseconds.
pub fn scale(series: &Series, factor: f64) -> Series {
    series.iter().map(|v| v * factor).collect()
}

pub(crate) fn ensure_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(PipelineError::LengthMismatch { expected, actual })
    }
}
