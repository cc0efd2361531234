use serde::Serialize;

/// Largest evaluation grid a single curve may occupy. Beyond this the grid
/// step widens instead of the point count growing.
pub const MAX_GRID_POINTS: usize = 2048;

const SQRT_TAU: f64 = 2.506_628_274_631_000_5;

/// Smoothed distribution curve for one numeric series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityEstimate {
    /// (x, density) pairs over a regular grid
    pub points: Vec<(f64, f64)>,
    pub bin_width: f64,
    pub bandwidth: f64,
    pub sample_count: usize,
}

impl DensityEstimate {
    pub fn empty(bin_width: f64) -> Self {
        Self {
            points: Vec::new(),
            bin_width,
            bandwidth: 0.0,
            sample_count: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Gaussian kernel density estimate evaluated on a regular grid.
///
/// The bandwidth follows Scott's rule (sigma * n^(-1/5)); input with zero
/// spread falls back to the bin width so the kernel stays well defined.
/// The grid steps by the bin width from the sample minimum and ends exactly
/// at the maximum, widened when the span would need more than
/// [`MAX_GRID_POINTS`] points.
pub fn density_estimate(values: &[f64], bin_width: f64) -> DensityEstimate {
    let samples: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if samples.is_empty() || bin_width <= 0.0 {
        return DensityEstimate::empty(bin_width);
    }

    let bandwidth = match scott_bandwidth(&samples) {
        Some(h) if h > 0.0 => h,
        _ => bin_width,
    };

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let mut step = bin_width;
    let mut count = (span / step).ceil() as usize + 1;
    if count > MAX_GRID_POINTS {
        step = span / (MAX_GRID_POINTS - 1) as f64;
        count = MAX_GRID_POINTS;
    }

    let norm = 1.0 / (samples.len() as f64 * bandwidth * SQRT_TAU);
    let points = (0..count)
        .map(|i| {
            // rounding the interval count up can overshoot by a partial bin
            let x = (min + step * i as f64).min(max);
            let y = norm
                * samples
                    .iter()
                    .map(|s| (-0.5 * ((x - s) / bandwidth).powi(2)).exp())
                    .sum::<f64>();
            (x, y)
        })
        .collect();

    DensityEstimate {
        points,
        bin_width,
        bandwidth,
        sample_count: samples.len(),
    }
}

/// Scott's-rule bandwidth; None when the spread is zero or undefined
fn scott_bandwidth(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sigma = var.sqrt();
    if sigma > 0.0 {
        Some(sigma * (n as f64).powf(-0.2))
    } else {
        None
    }
}
