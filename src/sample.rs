//! Synthetic wind observations with a daily cycle, random gusts and a
//! prevailing direction.

use crate::config::SampleConfig;
use crate::data::{DataSet, Observation, parse_timestamp};
use anyhow::{Context, Result};
use chrono::{Duration, Timelike};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::{Bernoulli, Normal, Uniform};
use std::f64::consts::PI;

const PROB_GUST: f64 = 0.05;
const SPEED_NOISE_STD_DEV: f64 = 1.5;
const DIRECTION_STD_DEV: f64 = 45.0;

/// Mean speed for an hour of the day, peaking in the afternoon.
fn daily_cycle(hour: u32) -> f64 {
    3.0 + 2.0 * (2.0 * PI * (hour as f64 - 6.0) / 24.0).sin()
}

/// Generate a dataset from the sample parameters.
///
/// The output only depends on the configuration, including its seed.
pub fn generate_sample_data(cfg: &SampleConfig) -> Result<DataSet> {
    let mut rng = ChaCha12Rng::seed_from_u64(cfg.seed);

    let start = parse_timestamp(&cfg.start)
        .with_context(|| format!("failed to parse start {:?}", cfg.start))?;
    let step = Duration::minutes(cfg.step_minutes.into());

    let noise_dist = Normal::new(0.0, SPEED_NOISE_STD_DEV)?;
    let gust_dist = Bernoulli::new(PROB_GUST)?;
    let gust_size_dist = Uniform::new(3.0, 8.0)?;
    let direction_dist = Normal::new(cfg.prevailing_direction, DIRECTION_STD_DEV)?;

    let mut observations = Vec::with_capacity(cfg.n_samples);
    let mut timestamp = start;
    for _ in 0..cfg.n_samples {
        let mut speed = daily_cycle(timestamp.hour()) + noise_dist.sample(&mut rng);
        if gust_dist.sample(&mut rng) {
            speed += gust_size_dist.sample(&mut rng);
        }

        // Rounding in rem_euclid can land exactly on 360.
        let direction = direction_dist.sample(&mut rng).rem_euclid(360.0) % 360.0;

        observations.push(Observation {
            timestamp,
            speed: speed.max(0.0),
            direction,
        });
        timestamp += step;
    }

    let dataset =
        DataSet::from_observations(observations).context("generated invalid observations")?;
    log::info!("generated {} observations", dataset.len());
    Ok(dataset)
}
