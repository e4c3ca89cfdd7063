use crate::analysis::Analyzer;
use crate::config::Config;
use crate::data::DataSet;
use crate::report::format_report;
use crate::sample::generate_sample_data;
use anyhow::{Context, Result};
use glob::glob;
use std::{
    fs,
    path::{Path, PathBuf},
};

const RESULTS_SUFFIX: &str = "results.msgpack";
const REPORT_SUFFIX: &str = "report.txt";

/// Runs the commands of the binary over a data directory.
///
/// The directory holds a `config.toml`, the input CSV files, and the
/// results and reports written next to them.
pub struct Manager {
    data_dir: PathBuf,
    cfg: Config,
}

impl Manager {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        let cfg =
            Config::from_file(data_dir.join("config.toml")).context("failed to construct cfg")?;
        log::info!("{cfg:#?}");

        Ok(Self { data_dir, cfg })
    }

    /// Write a new sample file, seeded by the configured seed plus its index.
    pub fn generate_sample(&self) -> Result<PathBuf> {
        let file_idx = self
            .glob_files("sample-*.csv")
            .context("failed to count sample files")?
            .len();

        let mut sample_cfg = self.cfg.sample.clone();
        sample_cfg.seed = sample_cfg.seed.wrapping_add(file_idx as u64);
        let dataset = generate_sample_data(&sample_cfg).context("failed to generate data")?;

        let file = self.sample_file(file_idx);
        dataset
            .write_csv(&file)
            .with_context(|| format!("failed to write {file:?}"))?;
        log::info!("created {file:?}");

        Ok(file)
    }

    /// Analyze every CSV file of the directory and write results and reports.
    pub fn analyze_data(&self) -> Result<()> {
        let analyzer = Analyzer::new(self.cfg.analysis.clone());

        let files = self.glob_files("*.csv").context("failed to list data files")?;
        if files.is_empty() {
            log::warn!("no CSV files found in {:?}", self.data_dir);
        }

        for file in files {
            let dataset = DataSet::from_csv_path(&file)
                .with_context(|| format!("failed to load {file:?}"))?;

            let results = analyzer
                .analyze(&dataset)
                .with_context(|| format!("failed to analyze {file:?}"))?;

            let results_file = file.with_extension(RESULTS_SUFFIX);
            results
                .save(&results_file)
                .with_context(|| format!("failed to save {results_file:?}"))?;

            let report = format_report(&results);
            let report_file = file.with_extension(REPORT_SUFFIX);
            fs::write(&report_file, &report)
                .with_context(|| format!("failed to write {report_file:?}"))?;
            log::info!("analyzed {file:?}");

            println!("{report}");
        }

        Ok(())
    }

    /// Remove all results and reports.
    pub fn clean_data(&self) -> Result<()> {
        for suffix in [RESULTS_SUFFIX, REPORT_SUFFIX] {
            let files = self
                .glob_files(&format!("*.{suffix}"))
                .context("failed to list output files")?;
            for file in files {
                fs::remove_file(&file).with_context(|| format!("failed to remove {file:?}"))?;
                log::info!("removed {file:?}");
            }
        }
        Ok(())
    }

    fn glob_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let pattern = self.data_dir.join(pattern);
        let pattern = pattern.to_str().context("pattern is not valid UTF-8")?;
        let mut files: Vec<_> = glob(pattern)
            .context("failed to glob files")?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();
        files.sort();
        Ok(files)
    }

    fn sample_file(&self, file_idx: usize) -> PathBuf {
        self.data_dir.join(format!("sample-{file_idx:04}.csv"))
    }
}
