//! Directional binning of observations into compass sectors (wind-rose data).
//!
//! `n` sectors partition [0, 360) into half-open ranges
//! `[i * 360 / n, (i + 1) * 360 / n)`, so sector 0 starts at North.

use crate::data::DataSet;
use crate::error::{Result, WindError};
use crate::stats::Accumulator;
use serde::{Deserialize, Serialize};

/// Number of sectors of a standard 16-point wind rose.
pub const DEFAULT_NUM_SECTORS: usize = 16;

const COMPASS_16: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sector index of a direction in [0, 360).
///
/// The estimate is checked against [`sector_start`] so that a direction equal
/// to a reported sector start always falls into that sector.
pub fn sector_index(direction: f64, num_sectors: usize) -> usize {
    let idx = (direction * num_sectors as f64 / 360.0).floor() as usize;
    let idx = idx.min(num_sectors - 1);
    if idx + 1 < num_sectors && direction >= sector_start(idx + 1, num_sectors) {
        idx + 1
    } else if idx > 0 && direction < sector_start(idx, num_sectors) {
        idx - 1
    } else {
        idx
    }
}

/// Start of a sector in degrees.
pub fn sector_start(sector: usize, num_sectors: usize) -> f64 {
    sector as f64 * 360.0 / num_sectors as f64
}

/// Compass point for 4, 8 or 16 sectors, otherwise the sector start in degrees.
pub fn sector_label(sector: usize, num_sectors: usize) -> String {
    match num_sectors {
        4 | 8 | 16 => COMPASS_16[sector * (16 / num_sectors)].to_string(),
        _ => format!("{:.1}°", sector_start(sector, num_sectors)),
    }
}

fn check_num_sectors(num_sectors: usize) -> Result<()> {
    if num_sectors == 0 {
        return Err(WindError::validation(0, "number of sectors must be at least 1"));
    }
    Ok(())
}

pub(crate) fn sector_counts(dataset: &DataSet, num_sectors: usize) -> Result<Vec<usize>> {
    check_num_sectors(num_sectors)?;
    let mut counts = vec![0; num_sectors];
    for obs in dataset.observations() {
        counts[sector_index(obs.direction, num_sectors)] += 1;
    }
    Ok(counts)
}

/// One sector of a wind rose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionalBin {
    pub sector_label: String,
    /// Sector start in degrees clockwise from North.
    pub start_deg: f64,
    /// Number of observations in the sector.
    pub frequency: usize,
    /// Share of all observations, in percent.
    pub percentage: f64,
    /// Mean speed of the sector, `None` for an empty sector.
    pub mean_speed: Option<f64>,
}

/// Bucket all observations into `num_sectors` sectors.
///
/// Returns one bin per sector in index order, empty sectors included.
///
/// # Errors
/// Returns [`WindError::Validation`] if `num_sectors` is zero.
pub fn wind_rose(dataset: &DataSet, num_sectors: usize) -> Result<Vec<DirectionalBin>> {
    check_num_sectors(num_sectors)?;

    let mut acc_vec = Vec::new();
    acc_vec.resize_with(num_sectors, Accumulator::new);
    for obs in dataset.observations() {
        acc_vec[sector_index(obs.direction, num_sectors)].add(obs.speed);
    }

    let n_obs = dataset.len();
    let bins = acc_vec
        .iter()
        .enumerate()
        .map(|(sector, acc)| DirectionalBin {
            sector_label: sector_label(sector, num_sectors),
            start_deg: sector_start(sector, num_sectors),
            frequency: acc.n_vals(),
            percentage: if n_obs > 0 {
                100.0 * acc.n_vals() as f64 / n_obs as f64
            } else {
                0.0
            },
            mean_speed: (acc.n_vals() > 0).then(|| acc.mean()),
        })
        .collect();
    Ok(bins)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(directions: &[f64]) -> DataSet {
        let mut dataset = DataSet::new();
        dataset
            .load(
                directions
                    .iter()
                    .map(|&direction| ("2024-01-01 00:00", 5.0, direction)),
            )
            .unwrap();
        dataset
    }

    #[test]
    fn test_sector_index_boundaries() {
        assert_eq!(sector_index(0.0, 16), 0);
        assert_eq!(sector_index(22.4999, 16), 0);
        assert_eq!(sector_index(22.5, 16), 1);
        assert_eq!(sector_index(359.999, 16), 15);
        assert_eq!(sector_index(359.999, 1), 0);
    }

    #[test]
    fn test_sector_start_maps_to_own_sector() {
        for num_sectors in 1..=360 {
            for sector in 0..num_sectors {
                let start = sector_start(sector, num_sectors);
                assert_eq!(sector_index(start, num_sectors), sector, "{num_sectors} {sector}");
            }
        }
    }

    #[test]
    fn test_wind_rose_counts_direction_at_sector_start() {
        let start = sector_start(11, 14);
        let bins = wind_rose(&dataset(&[start]), 14).unwrap();
        assert_eq!(bins[11].start_deg, start);
        assert_eq!(bins[11].frequency, 1);
        assert_eq!(bins[10].frequency, 0);
    }

    #[test]
    fn test_sector_labels() {
        assert_eq!(sector_label(0, 16), "N");
        assert_eq!(sector_label(10, 16), "SW");
        assert_eq!(sector_label(3, 8), "SE");
        assert_eq!(sector_label(3, 4), "W");
        assert_eq!(sector_label(1, 12), "30.0°");
    }

    #[test]
    fn test_wind_rose_four_sectors() {
        let data = dataset(&[0.0, 90.0, 180.0, 270.0]);
        let bins = wind_rose(&data, 4).unwrap();
        assert_eq!(bins.len(), 4);
        for bin in &bins {
            assert_eq!(bin.frequency, 1);
            assert_eq!(bin.percentage, 25.0);
            assert_eq!(bin.mean_speed, Some(5.0));
        }
        let labels: Vec<_> = bins.iter().map(|bin| bin.sector_label.as_str()).collect();
        assert_eq!(labels, ["N", "E", "S", "W"]);
    }

    #[test]
    fn test_wind_rose_keeps_empty_sectors() {
        let data = dataset(&[10.0, 20.0, 360.0]);
        let bins = wind_rose(&data, 16).unwrap();
        assert_eq!(bins.len(), 16);
        assert_eq!(bins[0].frequency, 3);
        assert!(bins[1..].iter().all(|bin| bin.frequency == 0));
        assert!(bins[1..].iter().all(|bin| bin.mean_speed.is_none()));
    }

    #[test]
    fn test_wind_rose_empty_dataset() {
        let bins = wind_rose(&DataSet::new(), 8).unwrap();
        assert_eq!(bins.len(), 8);
        assert!(bins.iter().all(|bin| bin.frequency == 0 && bin.percentage == 0.0));
    }

    #[test]
    fn test_zero_sectors_rejected() {
        assert!(matches!(
            wind_rose(&dataset(&[10.0]), 0),
            Err(WindError::Validation { .. })
        ));
    }
}
