use crate::config::AnalysisConfig;
use crate::data::DataSet;
use crate::error::{Result, WindError};
use crate::events::{self, HourlyStatistics, WindEvent};
use crate::rose::{self, DirectionalBin};
use crate::stats::{self, PowerSummary, PrevailingDirection, SummaryStatistics};
use chrono::NaiveDateTime;
use rmp_serde::encode;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

/// Everything computed for one dataset.
///
/// Plain values meant for the text report and for external plot renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResults {
    pub config: AnalysisConfig,

    pub n_obs: usize,
    pub time_span: Option<(NaiveDateTime, NaiveDateTime)>,

    pub summary: SummaryStatistics,
    pub prevailing: PrevailingDirection,
    /// `None` if the mean speed is zero.
    pub gust_factor: Option<f64>,
    pub rolling_gust_factor: Vec<Option<f64>>,

    pub power_density: Vec<f64>,
    pub power_summary: Option<PowerSummary>,

    pub calm_periods: Vec<WindEvent>,
    pub strong_wind_events: Vec<WindEvent>,

    pub wind_rose: Vec<DirectionalBin>,
    pub daily_pattern: Vec<HourlyStatistics>,
}

impl AnalysisResults {
    /// Save the results as MessagePack.
    pub fn save<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let file = File::create(file)?;
        let mut writer = BufWriter::new(file);
        encode::write_named(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

/// Runs every analysis with one set of parameters.
pub struct Analyzer {
    cfg: AnalysisConfig,
}

impl Analyzer {
    pub fn new(cfg: AnalysisConfig) -> Self {
        Self { cfg }
    }

    pub fn cfg(&self) -> &AnalysisConfig {
        &self.cfg
    }

    /// Analyze a dataset.
    ///
    /// # Errors
    /// Returns [`WindError::EmptyDataset`] if the dataset has no observations
    /// and [`WindError::Validation`] for invalid parameters.
    pub fn analyze(&self, dataset: &DataSet) -> Result<AnalysisResults> {
        if dataset.is_empty() {
            return Err(WindError::EmptyDataset);
        }
        let cfg = &self.cfg;

        let summary = stats::basic_statistics(dataset)?;
        let prevailing = stats::prevailing_direction(dataset, cfg.num_sectors)?;
        let gust_factor = stats::gust_factor(dataset)?;
        let rolling_gust_factor = stats::rolling_gust_factor(dataset, cfg.gust_window)?;

        let power_density = stats::power_density(dataset, cfg.air_density);
        let power_summary = PowerSummary::from_series(&power_density);

        let calm_periods = events::detect_calm_periods(dataset, cfg.calm_threshold);
        let strong_wind_events = events::detect_strong_wind_events(dataset, cfg.strong_threshold);

        let wind_rose = rose::wind_rose(dataset, cfg.num_sectors)?;
        let daily_pattern = events::daily_pattern(dataset);

        log::info!(
            "analyzed {} observations: {} calm periods, {} strong wind events",
            dataset.len(),
            calm_periods.len(),
            strong_wind_events.len()
        );

        Ok(AnalysisResults {
            config: cfg.clone(),
            n_obs: dataset.len(),
            time_span: dataset.time_span(),
            summary,
            prevailing,
            gust_factor,
            rolling_gust_factor,
            power_density,
            power_summary,
            calm_periods,
            strong_wind_events,
            wind_rose,
            daily_pattern,
        })
    }
}
