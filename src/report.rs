//! Plain-text rendering of [`AnalysisResults`].

use crate::analysis::AnalysisResults;
use crate::events::WindEvent;
use crate::rose;
use std::fmt::{self, Display, Formatter};

const RULE_WIDTH: usize = 50;

/// Render the results as a human-readable report.
pub fn format_report(results: &AnalysisResults) -> String {
    results.to_string()
}

fn fmt_opt(val: Option<f64>, precision: usize) -> String {
    match val {
        Some(val) if val.is_finite() => format!("{val:.precision$}"),
        _ => "N/A".to_string(),
    }
}

fn longest(events: &[WindEvent]) -> Option<&WindEvent> {
    events.iter().max_by_key(|event| event.end - event.start)
}

fn write_events(f: &mut Formatter<'_>, title: &str, events: &[WindEvent]) -> fmt::Result {
    write!(f, "  {title}: {}", events.len())?;
    if let Some(event) = longest(events) {
        write!(
            f,
            " (longest {} to {}, {} obs)",
            event.start, event.end, event.n_obs
        )?;
    }
    writeln!(f)
}

impl Display for AnalysisResults {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let cfg = &self.config;

        writeln!(f, "Wind Data Analysis Report")?;
        writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(f)?;

        writeln!(f, "Data Summary:")?;
        writeln!(f, "  Total Observations: {}", self.n_obs)?;
        match self.time_span {
            Some((first, last)) => writeln!(f, "  Period: {first} to {last}")?,
            None => writeln!(f, "  Period: N/A")?,
        }
        writeln!(f)?;

        let s = &self.summary;
        writeln!(f, "Wind Speed Statistics:")?;
        writeln!(f, "  Mean Speed: {:.2} m/s", s.mean_speed)?;
        writeln!(f, "  Median Speed: {:.2} m/s", s.median_speed)?;
        writeln!(f, "  Std Deviation: {:.2} m/s", s.std_speed)?;
        writeln!(f, "  Min Speed: {:.2} m/s", s.min_speed)?;
        writeln!(f, "  Max Speed: {:.2} m/s", s.max_speed)?;
        writeln!(f, "  Gust Factor: {}", fmt_opt(self.gust_factor, 2))?;
        writeln!(f)?;

        let p = &self.prevailing;
        writeln!(f, "Wind Direction:")?;
        writeln!(
            f,
            "  Prevailing Direction: {} (from {:.1}°)",
            p.label,
            rose::sector_start(p.sector, cfg.num_sectors)
        )?;
        writeln!(f, "  Prevailing Frequency: {:.1}%", p.percentage)?;
        writeln!(f)?;

        writeln!(f, "Wind Events:")?;
        write_events(
            f,
            &format!("Calm Periods (<= {:.2} m/s)", cfg.calm_threshold),
            &self.calm_periods,
        )?;
        write_events(
            f,
            &format!("Strong Wind Events (>= {:.2} m/s)", cfg.strong_threshold),
            &self.strong_wind_events,
        )?;
        writeln!(f)?;

        writeln!(f, "Power Density (air density {} kg/m³):", cfg.air_density)?;
        writeln!(
            f,
            "  Average: {} W/m²",
            fmt_opt(self.power_summary.map(|p| p.mean), 2)
        )?;
        writeln!(
            f,
            "  Max: {} W/m²",
            fmt_opt(self.power_summary.map(|p| p.max), 2)
        )?;
        writeln!(f)?;

        writeln!(f, "Wind Rose ({} sectors):", self.wind_rose.len())?;
        writeln!(
            f,
            "  {:<8} {:>7} {:>7} {:>7} {:>10}",
            "Sector", "Start", "Count", "Share", "Mean"
        )?;
        for bin in &self.wind_rose {
            writeln!(
                f,
                "  {:<8} {:>6.1}° {:>7} {:>6.1}% {:>10}",
                bin.sector_label,
                bin.start_deg,
                bin.frequency,
                bin.percentage,
                fmt_opt(bin.mean_speed, 2)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Daily Pattern:")?;
        writeln!(
            f,
            "  {:<4} {:>7} {:>7} {:>7} {:>7}",
            "Hour", "Mean", "Std", "Min", "Max"
        )?;
        for entry in &self.daily_pattern {
            match &entry.stats {
                Some(stats) => writeln!(
                    f,
                    "  {:<4} {:>7.2} {:>7.2} {:>7.2} {:>7.2}",
                    format!("{:02}", entry.hour),
                    stats.mean_speed,
                    stats.std_speed,
                    stats.min_speed,
                    stats.max_speed
                )?,
                None => writeln!(f, "  {:<4} {:>7}", format!("{:02}", entry.hour), "no data")?,
            }
        }

        Ok(())
    }
}
