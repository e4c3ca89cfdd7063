use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use windstat::manager::Manager;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    #[arg(long)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a new synthetic sample file.
    Generate,

    /// Analyze every CSV file and write results and reports.
    Analyze,

    /// Remove results and reports.
    Clean,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = Cli::parse();
    log::info!("{args:#?}");

    let mgr = Manager::new(args.data_dir).context("failed to construct mgr")?;

    match args.command {
        Command::Generate => {
            mgr.generate_sample()?;
        }
        Command::Analyze => mgr.analyze_data()?,
        Command::Clean => mgr.clean_data()?,
    }

    Ok(())
}
