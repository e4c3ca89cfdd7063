use windstat::config::SampleConfig;
use windstat::events::{WindEvent, daily_pattern, detect_calm_periods, detect_strong_wind_events};
use windstat::rose::wind_rose;
use windstat::sample::generate_sample_data;
use windstat::stats::{
    basic_statistics, gust_factor, power_density, prevailing_direction, rolling_gust_factor,
};
use windstat::{Columns, DataSet, WindError};

fn sample(n_samples: usize, seed: u64) -> DataSet {
    generate_sample_data(&SampleConfig {
        n_samples,
        seed,
        ..SampleConfig::default()
    })
    .expect("failed to generate sample data")
}

#[test]
fn summary_is_ordered() {
    for seed in 0..5 {
        let stats = basic_statistics(&sample(200, seed)).unwrap();
        assert!(stats.min_speed <= stats.mean_speed && stats.mean_speed <= stats.max_speed);
        assert!(stats.min_speed <= stats.median_speed && stats.median_speed <= stats.max_speed);
        assert!(stats.std_speed >= 0.0);
    }
}

#[test]
fn gust_factor_is_max_over_mean() {
    let data = sample(300, 3);
    let stats = basic_statistics(&data).unwrap();
    assert!(stats.mean_speed > 0.0);
    assert_eq!(
        gust_factor(&data).unwrap(),
        Some(stats.max_speed / stats.mean_speed)
    );
}

#[test]
fn wind_rose_frequencies_sum_to_len() {
    let data = sample(250, 11);
    for num_sectors in [1, 3, 4, 8, 16, 36, 360] {
        let bins = wind_rose(&data, num_sectors).unwrap();
        assert_eq!(bins.len(), num_sectors);
        let total: usize = bins.iter().map(|bin| bin.frequency).sum();
        assert_eq!(total, data.len());
    }
}

fn assert_maximal_runs<F>(data: &DataSet, events: &[WindEvent], in_run: F)
where
    F: Fn(f64) -> bool,
{
    let obs = data.observations();
    let mut covered = vec![false; obs.len()];
    let mut idx = 0;
    for event in events {
        let start = (idx..obs.len())
            .find(|&i| obs[i].timestamp == event.start)
            .expect("event start not found");
        let end = start + event.n_obs - 1;
        assert_eq!(obs[end].timestamp, event.end);
        assert!(obs[start..=end].iter().all(|o| in_run(o.speed)));
        if start > 0 {
            assert!(!in_run(obs[start - 1].speed));
        }
        if end + 1 < obs.len() {
            assert!(!in_run(obs[end + 1].speed));
        }
        for flag in &mut covered[start..=end] {
            assert!(!*flag, "events overlap");
            *flag = true;
        }
        idx = end + 1;
    }
    let uncovered_in_run = obs
        .iter()
        .zip(&covered)
        .any(|(o, &flag)| !flag && in_run(o.speed));
    assert!(!uncovered_in_run, "observation missing from events");
}

#[test]
fn events_are_disjoint_maximal_runs() {
    let data = sample(500, 5);
    let calm = detect_calm_periods(&data, 2.0);
    let strong = detect_strong_wind_events(&data, 6.0);
    assert!(!calm.is_empty());
    assert!(!strong.is_empty());
    assert_maximal_runs(&data, &calm, |speed| speed <= 2.0);
    assert_maximal_runs(&data, &strong, |speed| speed >= 6.0);
}

#[test]
fn operations_are_idempotent() {
    let data = sample(120, 9);
    assert_eq!(basic_statistics(&data).unwrap(), basic_statistics(&data).unwrap());
    assert_eq!(
        prevailing_direction(&data, 16).unwrap(),
        prevailing_direction(&data, 16).unwrap()
    );
    assert_eq!(gust_factor(&data).unwrap(), gust_factor(&data).unwrap());
    assert_eq!(
        rolling_gust_factor(&data, 10).unwrap(),
        rolling_gust_factor(&data, 10).unwrap()
    );
    assert_eq!(detect_calm_periods(&data, 2.0), detect_calm_periods(&data, 2.0));
    assert_eq!(
        detect_strong_wind_events(&data, 6.0),
        detect_strong_wind_events(&data, 6.0)
    );
    assert_eq!(daily_pattern(&data), daily_pattern(&data));
    assert_eq!(wind_rose(&data, 16).unwrap(), wind_rose(&data, 16).unwrap());
    assert_eq!(power_density(&data, 1.225), power_density(&data, 1.225));
}

#[test]
fn three_observation_scenario() {
    let mut data = DataSet::new();
    data.load_columns(Columns {
        timestamp: vec![
            "2024-01-01T00:00:00".into(),
            "2024-01-01T01:00:00".into(),
            "2024-01-01T02:00:00".into(),
        ],
        wind_speed: vec![0.0, 1.0, 20.0],
        wind_direction: vec![0.0, 90.0, 180.0],
    })
    .unwrap();

    let calm = detect_calm_periods(&data, 2.0);
    assert_eq!(calm.len(), 1);
    assert_eq!(calm[0].start, data.observations()[0].timestamp);
    assert_eq!(calm[0].end, data.observations()[1].timestamp);

    let stats = basic_statistics(&data).unwrap();
    assert_eq!(stats.mean_speed, 7.0);
    assert_eq!(stats.min_speed, 0.0);
    assert_eq!(stats.max_speed, 20.0);
}

#[test]
fn single_observation_has_zero_std() {
    let mut data = DataSet::new();
    data.load([("2024-01-01 12:00:00", 6.5, 45.0)]).unwrap();
    assert_eq!(basic_statistics(&data).unwrap().std_speed, 0.0);
}

#[test]
fn higher_air_density_gives_more_power() {
    let data = sample(100, 1);
    let dense: f64 = power_density(&data, 1.225).iter().sum();
    let thin: f64 = power_density(&data, 1.0).iter().sum();
    assert!(dense > thin);
    assert_eq!(power_density(&data, 1.0).len(), data.len());
}

#[test]
fn csv_round_trip_preserves_observations() {
    let data = sample(24, 2);
    let file = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("round_trip.csv");
    data.write_csv(&file).unwrap();
    let loaded = DataSet::from_csv_path(&file).unwrap();
    assert_eq!(loaded, data);
    std::fs::remove_file(&file).ok();
}

#[test]
fn missing_file_is_io_error() {
    let err = DataSet::from_csv_path("/nonexistent/wind.csv").unwrap_err();
    assert!(matches!(err, WindError::Io(_)));
}
