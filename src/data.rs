//! Wind observations and the validated [`DataSet`] they are stored in.
//!
//! Input arrives either as raw rows (timestamp string, speed, direction),
//! as three named columns, or as a CSV file with the header
//!
//! ```text
//! timestamp,wind_speed,wind_direction
//! 2024-01-01 00:00:00,3.42,221.7
//! 2024-01-01 01:00:00,2.96,240.1
//! ```
//!
//! Loading rejects the whole input on the first malformed row.

use crate::error::{Result, WindError};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::{io::Read, path::Path};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Parse a timestamp string.
///
/// RFC 3339 values keep their local wall-clock time and drop the offset; the
/// remaining year-first layouts are taken as they are. Bare dates map to
/// midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Map a direction onto [0, 360), accepting exactly 360 as North.
fn normalize_direction(direction: f64) -> Option<f64> {
    if direction == 360.0 {
        return Some(0.0);
    }
    (0.0..360.0).contains(&direction).then_some(direction)
}

/// A single validated wind observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    /// Wind speed in m/s, never negative.
    pub speed: f64,
    /// Direction the wind blows from, degrees clockwise from North in [0, 360).
    pub direction: f64,
}

impl Observation {
    fn validated(row: usize, timestamp: NaiveDateTime, speed: f64, direction: f64) -> Result<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(WindError::validation(
                row,
                format!("speed must be a non-negative number, but is {speed}"),
            ));
        }
        let direction = normalize_direction(direction).ok_or_else(|| {
            WindError::validation(
                row,
                format!("direction must be in the range [0, 360], but is {direction}"),
            )
        })?;
        Ok(Self {
            timestamp,
            speed,
            direction,
        })
    }
}

/// Unvalidated input row, also the CSV record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    pub timestamp: String,
    pub wind_speed: f64,
    pub wind_direction: f64,
}

impl<S: Into<String>> From<(S, f64, f64)> for RawObservation {
    fn from((timestamp, wind_speed, wind_direction): (S, f64, f64)) -> Self {
        Self {
            timestamp: timestamp.into(),
            wind_speed,
            wind_direction,
        }
    }
}

impl From<&Observation> for RawObservation {
    fn from(obs: &Observation) -> Self {
        Self {
            timestamp: obs.timestamp.format(WRITE_FORMAT).to_string(),
            wind_speed: obs.speed,
            wind_direction: obs.direction,
        }
    }
}

/// Columnar input with the same three named fields as the CSV layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Columns {
    pub timestamp: Vec<String>,
    pub wind_speed: Vec<f64>,
    pub wind_direction: Vec<f64>,
}

/// Ordered collection of wind observations.
///
/// Observations are expected in ascending timestamp order; this is assumed by
/// the event detection but not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSet {
    observations: Vec<Observation>,
}

impl DataSet {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dataset from already typed observations.
    ///
    /// # Errors
    /// Returns [`WindError::Validation`] for a negative speed or an
    /// out-of-range direction.
    pub fn from_observations(observations: Vec<Observation>) -> Result<Self> {
        let observations = observations
            .into_iter()
            .enumerate()
            .map(|(idx, obs)| {
                Observation::validated(idx + 1, obs.timestamp, obs.speed, obs.direction)
            })
            .collect::<Result<Vec<_>>>()?;
        warn_if_unsorted(&observations);
        Ok(Self { observations })
    }

    /// Replace the current contents with the given rows.
    ///
    /// On error the dataset keeps its previous contents.
    ///
    /// # Errors
    /// Returns [`WindError::Validation`] for the first row with a negative
    /// speed, an out-of-range direction or an unparsable timestamp.
    pub fn load<I, R>(&mut self, rows: I) -> Result<()>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawObservation>,
    {
        let mut observations = Vec::new();
        for (idx, raw) in rows.into_iter().enumerate() {
            let raw = raw.into();
            let row = idx + 1;
            let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| {
                WindError::validation(row, format!("unparsable timestamp {:?}", raw.timestamp))
            })?;
            observations.push(Observation::validated(
                row,
                timestamp,
                raw.wind_speed,
                raw.wind_direction,
            )?);
        }
        warn_if_unsorted(&observations);
        log::debug!("loaded {} observations", observations.len());

        self.observations = observations;
        Ok(())
    }

    /// Replace the current contents with columnar data.
    ///
    /// # Errors
    /// Returns [`WindError::Validation`] if the columns differ in length or
    /// any row is malformed.
    pub fn load_columns(&mut self, columns: Columns) -> Result<()> {
        let Columns {
            timestamp,
            wind_speed,
            wind_direction,
        } = columns;
        let len = timestamp.len();
        if wind_speed.len() != len || wind_direction.len() != len {
            return Err(WindError::validation(
                0,
                format!(
                    "column lengths differ: timestamp {len}, wind_speed {}, wind_direction {}",
                    wind_speed.len(),
                    wind_direction.len()
                ),
            ));
        }
        let rows = timestamp
            .into_iter()
            .zip(wind_speed)
            .zip(wind_direction)
            .map(|((ts, speed), direction)| (ts, speed, direction));
        self.load(rows)
    }

    /// Read a dataset from CSV with a `timestamp,wind_speed,wind_direction` header.
    ///
    /// Extra columns are ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for (idx, record) in reader.deserialize::<RawObservation>().enumerate() {
            let raw = record.map_err(|err| {
                if matches!(err.kind(), csv::ErrorKind::Io(_)) {
                    WindError::Csv(err)
                } else {
                    WindError::validation(idx + 1, err.to_string())
                }
            })?;
            rows.push(raw);
        }

        let mut dataset = Self::new();
        dataset.load(rows)?;
        Ok(dataset)
    }

    /// Read a dataset from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = std::fs::File::open(file)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    /// Write the dataset as CSV in the layout accepted by [`DataSet::from_csv_path`].
    pub fn write_csv<P: AsRef<Path>>(&self, file: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(file)?;
        for obs in &self.observations {
            writer.serialize(RawObservation::from(obs))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn speeds(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|obs| obs.speed)
    }

    /// First and last timestamp, if any.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.observations.first()?;
        let last = self.observations.last()?;
        Some((first.timestamp, last.timestamp))
    }
}

fn warn_if_unsorted(observations: &[Observation]) {
    if let Some(idx) = observations
        .windows(2)
        .position(|pair| pair[1].timestamp < pair[0].timestamp)
    {
        log::warn!("timestamps are not ascending at row {}", idx + 2);
    }
}
