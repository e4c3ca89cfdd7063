use crate::rose::DEFAULT_NUM_SECTORS;
use crate::stats::DEFAULT_AIR_DENSITY;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Parameters of the wind analysis.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of direction sectors for the wind rose and prevailing direction.
    pub num_sectors: usize,
    /// Air density in kg/m³ used for the power density.
    pub air_density: f64,

    /// Speed (m/s) at or below which the wind counts as calm.
    pub calm_threshold: f64,
    /// Speed (m/s) at or above which the wind counts as strong.
    pub strong_threshold: f64,

    /// Number of observations in the rolling gust factor window.
    pub gust_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            num_sectors: DEFAULT_NUM_SECTORS,
            air_density: DEFAULT_AIR_DENSITY,
            calm_threshold: 2.0,
            strong_threshold: 10.0,
            gust_window: 10,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        check_num(self.num_sectors, 1..=360).context("invalid number of sectors")?;
        check_num(self.air_density, 0.0..10.0).context("invalid air density")?;
        if self.air_density == 0.0 {
            bail!("air density must be positive");
        }
        check_num(self.calm_threshold, 0.0..100.0).context("invalid calm threshold")?;
        check_num(self.strong_threshold, 0.0..100.0).context("invalid strong threshold")?;
        if self.strong_threshold <= self.calm_threshold {
            bail!(
                "strong threshold must exceed calm threshold, but {} <= {}",
                self.strong_threshold,
                self.calm_threshold
            );
        }
        check_num(self.gust_window, 1..=10_000).context("invalid gust window")?;
        Ok(())
    }
}

/// Parameters of the synthetic data generator.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Number of observations per generated file.
    pub n_samples: usize,
    /// Timestamp of the first observation.
    pub start: String,
    /// Minutes between consecutive observations.
    pub step_minutes: u32,
    /// Mean wind direction in degrees.
    pub prevailing_direction: f64,
    /// Seed of the random number generator.
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            n_samples: 720,
            start: "2024-01-01T00:00:00".to_string(),
            step_minutes: 60,
            prevailing_direction: 225.0,
            seed: 42,
        }
    }
}

impl SampleConfig {
    pub fn validate(&self) -> Result<()> {
        check_num(self.n_samples, 1..=1_000_000).context("invalid number of samples")?;
        if crate::data::parse_timestamp(&self.start).is_none() {
            bail!("start timestamp {:?} is not parsable", self.start);
        }
        check_num(self.step_minutes, 1..=1440).context("invalid step in minutes")?;
        check_num(self.prevailing_direction, 0.0..360.0)
            .context("invalid prevailing direction")?;
        Ok(())
    }
}

/// Configuration of a data directory.
///
/// Loaded from a TOML file; missing sections and fields take their defaults.
/// See [`Config::from_file`] for loading.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub analysis: AnalysisConfig,
    pub sample: SampleConfig,
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// Performs validation on all parameters before returning.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.analysis
            .validate()
            .context("invalid analysis parameters")?;
        self.sample.validate().context("invalid sample parameters")?;
        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
