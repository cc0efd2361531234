use serde::Serialize;

use crate::analysis::AggregateError;
use crate::store::dataset::{Dataset, TIME_COLUMN};

/// Sample statistics for one numeric series.
///
/// `count == 0` is the explicit empty sentinel; every other field is absent.
/// `std` uses the sample denominator (n - 1) and is absent for a single
/// observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl DescriptiveStats {
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: None,
            std: None,
            min: None,
            p25: None,
            p50: None,
            p75: None,
            max: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Describe the parseable values of `column`.
///
/// Unparseable and empty cells are skipped; a column with no usable values
/// yields the empty sentinel. Only a missing column is an error.
pub fn describe(dataset: &Dataset, column: &str) -> Result<DescriptiveStats, AggregateError> {
    let cells = dataset
        .numeric_column(column)
        .ok_or_else(|| AggregateError::missing_column(column))?;
    let values: Vec<f64> = cells.into_iter().flatten().collect();
    Ok(describe_values(&values))
}

/// Describe an already extracted numeric series
pub fn describe_values(values: &[f64]) -> DescriptiveStats {
    if values.is_empty() {
        return DescriptiveStats::empty();
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let std = if count > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        Some(var.sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    DescriptiveStats {
        count,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        p25: Some(percentile(&sorted, 0.25)),
        p50: Some(percentile(&sorted, 0.50)),
        p75: Some(percentile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

/// First differences of the Time column over row order as stored.
///
/// Rows are NOT re-sorted by timestamp; a capture whose rows arrive out of
/// order produces negative differences rather than silently reordered ones.
/// The first row has no predecessor, and a difference with an unparseable
/// operand is dropped.
pub fn inter_arrival(dataset: &Dataset) -> Result<Vec<f64>, AggregateError> {
    let cells = dataset
        .numeric_column(TIME_COLUMN)
        .ok_or_else(|| AggregateError::missing_column(TIME_COLUMN))?;

    Ok(cells
        .windows(2)
        .filter_map(|pair| match (pair[0], pair[1]) {
            (Some(prev), Some(next)) => Some(next - prev),
            _ => None,
        })
        .collect())
}

/// Linear-interpolation percentile over a sorted slice, pandas style
fn percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
    }
}
