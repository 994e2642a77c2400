use serde::Serialize;

/// Value of the run distribution at one percentile.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct PercentileValue {
    pub percentile: u8,
    pub value: f64,
}

/// Decile summary of ascending trial results.
///
/// Yields the 0th through 90th percentiles, plus the 100th when
/// `include_max` is set. Each value is the run at index
/// `min(floor(p / 100 * n), n - 1)`, so the sequence never decreases.
pub fn summarize(sorted_runs: &[f64], include_max: bool) -> Vec<PercentileValue> {
    let Some(last) = sorted_runs.len().checked_sub(1) else {
        return Vec::new();
    };
    let top = if include_max { 100 } else { 90 };
    (0..=top)
        .step_by(10)
        .map(|percentile: u8| {
            let index = (usize::from(percentile) * sorted_runs.len() / 100).min(last);
            PercentileValue {
                percentile,
                value: sorted_runs[index],
            }
        })
        .collect()
}
