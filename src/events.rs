use crate::data::{DataSet, Observation};
use crate::stats::SummaryStatistics;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    Calm,
    Strong,
}

/// A maximal run of consecutive observations on one side of a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindEvent {
    pub kind: EventKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Minimum speed of a calm period, maximum speed of a strong-wind event.
    pub peak_or_min_speed: f64,
    /// Number of observations in the run.
    pub n_obs: usize,
}

/// Maximal runs of calm wind (speed at or below `threshold`).
///
/// Returns an empty list for an empty dataset.
pub fn detect_calm_periods(dataset: &DataSet, threshold: f64) -> Vec<WindEvent> {
    detect_runs(dataset.observations(), EventKind::Calm, |speed| {
        speed <= threshold
    })
}

/// Maximal runs of strong wind (speed at or above `threshold`).
///
/// Returns an empty list for an empty dataset.
pub fn detect_strong_wind_events(dataset: &DataSet, threshold: f64) -> Vec<WindEvent> {
    detect_runs(dataset.observations(), EventKind::Strong, |speed| {
        speed >= threshold
    })
}

fn detect_runs<F>(observations: &[Observation], kind: EventKind, in_run: F) -> Vec<WindEvent>
where
    F: Fn(f64) -> bool,
{
    let extreme = |acc: f64, speed: f64| match kind {
        EventKind::Calm => acc.min(speed),
        EventKind::Strong => acc.max(speed),
    };

    let mut events = Vec::new();
    let mut current: Option<WindEvent> = None;

    for obs in observations {
        if !in_run(obs.speed) {
            events.extend(current.take());
            continue;
        }
        match current.as_mut() {
            Some(event) => {
                event.end = obs.timestamp;
                event.peak_or_min_speed = extreme(event.peak_or_min_speed, obs.speed);
                event.n_obs += 1;
            }
            None => {
                current = Some(WindEvent {
                    kind,
                    start: obs.timestamp,
                    end: obs.timestamp,
                    peak_or_min_speed: obs.speed,
                    n_obs: 1,
                });
            }
        }
    }
    events.extend(current);

    log::debug!("detected {} {kind:?} events", events.len());
    events
}

/// Speed statistics of one hour of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyStatistics {
    pub hour: u32,
    /// `None` if no observation falls into this hour.
    pub stats: Option<SummaryStatistics>,
}

/// Group observations by hour of day (date ignored) and summarize each hour.
///
/// Always returns 24 entries ordered by hour.
pub fn daily_pattern(dataset: &DataSet) -> Vec<HourlyStatistics> {
    let mut speeds_by_hour = vec![Vec::new(); HOURS_PER_DAY];
    for obs in dataset.observations() {
        speeds_by_hour[obs.timestamp.hour() as usize].push(obs.speed);
    }

    speeds_by_hour
        .iter()
        .zip(0..)
        .map(|(speeds, hour)| HourlyStatistics {
            hour,
            stats: SummaryStatistics::from_speeds(speeds),
        })
        .collect()
}
