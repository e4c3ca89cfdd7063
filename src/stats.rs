use crate::data::DataSet;
use crate::error::{Result, WindError};
use crate::rose;
use serde::{Deserialize, Serialize};

/// Air density at sea level and 15 °C in kg/m³.
pub const DEFAULT_AIR_DENSITY: f64 = 1.225;

/// Streaming mean, sample variance and range (Welford's algorithm).
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            n_vals: 0,
            mean: 0.0,
            diff_2_sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;

        self.min = self.min.min(val);
        self.max = self.max.max(val);
    }

    pub fn n_vals(&self) -> usize {
        self.n_vals
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation; zero for fewer than two values.
    pub fn std_dev(&self) -> f64 {
        if self.n_vals > 1 {
            (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
        } else {
            0.0
        }
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of wind speeds in m/s.
///
/// `std_speed` is the sample standard deviation (denominator `n - 1`) and is
/// reported as `0.0` for a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub mean_speed: f64,
    pub median_speed: f64,
    pub std_speed: f64,
    pub min_speed: f64,
    pub max_speed: f64,
}

impl SummaryStatistics {
    /// Summarize a set of speeds, ignoring non-finite values.
    ///
    /// Returns `None` if no finite value remains.
    pub fn from_speeds(speeds: &[f64]) -> Option<Self> {
        let speeds: Vec<f64> = speeds.iter().copied().filter(|v| v.is_finite()).collect();
        if speeds.is_empty() {
            return None;
        }

        let mut acc = Accumulator::new();
        speeds.iter().for_each(|&val| acc.add(val));

        Some(Self {
            // Clamp against rounding so that min <= mean <= max holds.
            mean_speed: acc.mean().clamp(acc.min, acc.max),
            median_speed: compute_median(&speeds),
            std_speed: acc.std_dev(),
            min_speed: acc.min,
            max_speed: acc.max,
        })
    }
}

fn compute_median(vals: &[f64]) -> f64 {
    let mut sorted = vals.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n_vals = sorted.len();
    if n_vals % 2 == 0 {
        (sorted[n_vals / 2 - 1] + sorted[n_vals / 2]) / 2.0
    } else {
        sorted[n_vals / 2]
    }
}

/// Compute mean, median, standard deviation and range of the wind speed.
///
/// # Errors
/// Returns [`WindError::EmptyDataset`] if there are no observations.
pub fn basic_statistics(dataset: &DataSet) -> Result<SummaryStatistics> {
    let speeds: Vec<f64> = dataset.speeds().collect();
    SummaryStatistics::from_speeds(&speeds).ok_or(WindError::EmptyDataset)
}

/// Most frequent direction sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrevailingDirection {
    pub sector: usize,
    pub label: String,
    /// Share of all observations in this sector, in percent.
    pub percentage: f64,
}

/// Find the sector with the most observations.
///
/// Sectors are the same half-open ranges used by [`rose::wind_rose`]; ties go
/// to the lowest sector index.
pub fn prevailing_direction(
    dataset: &DataSet,
    num_sectors: usize,
) -> Result<PrevailingDirection> {
    if dataset.is_empty() {
        return Err(WindError::EmptyDataset);
    }
    let counts = rose::sector_counts(dataset, num_sectors)?;

    let (sector, &count) = counts
        .iter()
        .enumerate()
        .rev()
        .max_by_key(|&(_, count)| count)
        .ok_or(WindError::EmptyDataset)?;

    Ok(PrevailingDirection {
        sector,
        label: rose::sector_label(sector, num_sectors),
        percentage: 100.0 * count as f64 / dataset.len() as f64,
    })
}

/// Ratio of the maximum to the mean wind speed over the whole dataset.
///
/// Returns `Ok(None)` when the mean speed is zero and the ratio is undefined.
pub fn gust_factor(dataset: &DataSet) -> Result<Option<f64>> {
    let stats = basic_statistics(dataset)?;
    Ok(ratio(stats.max_speed, stats.mean_speed))
}

/// Gust factor over a trailing window of `window` observations.
///
/// The output is aligned with the observations. Entries are `None` until the
/// window is full and wherever the window mean is zero.
pub fn rolling_gust_factor(dataset: &DataSet, window: usize) -> Result<Vec<Option<f64>>> {
    if window == 0 {
        return Err(WindError::validation(0, "gust window must be at least 1"));
    }
    let speeds: Vec<f64> = dataset.speeds().collect();

    let mut factors = vec![None; speeds.len().min(window - 1)];
    factors.extend(speeds.windows(window).map(|win| {
        let max = win.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = win.iter().sum::<f64>() / window as f64;
        ratio(max, mean)
    }));
    Ok(factors)
}

fn ratio(max: f64, mean: f64) -> Option<f64> {
    (mean > 0.0).then(|| max / mean)
}

/// Wind power density `0.5 * rho * v^3` in W/m² for each observation.
pub fn power_density(dataset: &DataSet, air_density: f64) -> Vec<f64> {
    dataset
        .speeds()
        .map(|speed| 0.5 * air_density * speed.powi(3))
        .collect()
}

/// Mean and peak of a power density series, in W/m².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerSummary {
    pub mean: f64,
    pub max: f64,
}

impl PowerSummary {
    pub fn from_series(power: &[f64]) -> Option<Self> {
        if power.is_empty() {
            return None;
        }
        Some(Self {
            mean: power.iter().sum::<f64>() / power.len() as f64,
            max: power.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        })
    }
}
