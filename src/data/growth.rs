//! Growth rates between consecutive ticks, averaged over fixed windows.

use super::Series;
use crate::error::{PipelineError, Result};

/// Percent change between each pair of consecutive ticks.
///
/// Output has one element less than the input (none for fewer than two
/// ticks). A zero baseline is an error.
pub fn step_growth(series: &Series) -> Result<Series> {
    series
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (base, next) = (pair[0], pair[1]);
            if base == 0.0 {
                return Err(PipelineError::DivisionByZero {
                    context: "growth baseline",
                    index,
                });
            }
            Ok((next - base) / base * 100.0)
        })
        .collect()
}

/// Average step growth over consecutive windows of `chunk` steps.
///
/// The last window keeps whatever is left over and may be shorter than
/// `chunk`; it is neither dropped nor padded. For `n` input ticks the result
/// has `ceil((n - 1) / chunk)` elements.
pub fn chunked_growth(series: &Series, chunk: usize) -> Result<Series> {
    if chunk == 0 {
        return Err(PipelineError::InvalidChunkSize);
    }

    let steps = step_growth(series)?;
    Ok(steps
        .chunks(chunk)
        .map(|window| window.iter().sum::<f64>() / window.len() as f64)
        .collect())
}
