//! Ronda CLI binary.
//!
//! Command-line driver for momentum strategy research: loads a monthly
//! return panel and sweeps winner-minus-loser decile strategies over the
//! requested formation/holding window grid.

mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ronda_core::RondaError;
use ronda_momentum::TrailingMomentum;
use ronda_strategy::{StrategySummary, aggregate_strategy};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ronda")]
#[command(about = "Momentum portfolio research over monthly return panels", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the formation/holding strategy sweep
    Run {
        /// Path to the monthly returns CSV (permno, date, ret)
        #[arg(long)]
        data: PathBuf,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Formation windows J in months
        #[arg(short = 'J', long, value_delimiter = ',', default_value = "3,6,9,12")]
        formation: Vec<usize>,

        /// Holding windows K in months
        #[arg(short = 'K', long, value_delimiter = ',', default_value = "3,6,9,12")]
        holding: Vec<usize>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Export the cleaned panel to a spreadsheet-importable CSV
    Export {
        /// Path to the monthly returns CSV (permno, date, ret)
        #[arg(long)]
        data: PathBuf,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            start,
            end,
            formation,
            holding,
            format,
        } => run_sweep(&data, &start, &end, &formation, &holding, &format),
        Commands::Export {
            data,
            start,
            end,
            output,
        } => export_panel(&data, &start, &end, &output),
    }
}

fn run_sweep(
    data_path: &Path,
    start: &str,
    end: &str,
    formation: &[usize],
    holding: &[usize],
    format: &str,
) -> Result<()> {
    let start = data::parse_date(start)?;
    let end = data::parse_date(end)?;

    println!("Loading and preparing data...");
    let panel = data::load_panel(data_path, start, end)?;
    println!("Loaded {} observations.", panel.len());

    for &j in formation {
        println!("Calculating {j}-month momentum...");
        let with_momentum = TrailingMomentum::new(j).compute(&panel)?;

        for &k in holding {
            println!("Running {j}-month formation / {k}-month holding period strategy...");
            let started = Instant::now();

            match aggregate_strategy(&with_momentum, j, k) {
                Ok(aggregates) => {
                    println!(
                        "Calculation finished in {:.2} seconds.",
                        started.elapsed().as_secs_f64()
                    );
                    let summary = StrategySummary::from_aggregates(j, k, &aggregates)?;
                    if format == "json" {
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    } else {
                        println!("\n{summary}\n");
                    }
                }
                Err(RondaError::NoUsableReturns) => {
                    println!("Could not generate any returns for J={j}, K={k}.");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

fn export_panel(data_path: &Path, start: &str, end: &str, output: &Path) -> Result<()> {
    let start = data::parse_date(start)?;
    let end = data::parse_date(end)?;

    println!("Loading and preparing data...");
    let panel = data::load_panel(data_path, start, end)?;

    data::write_spreadsheet(&panel, output)?;
    println!("Wrote {} observations to {}.", panel.len(), output.display());

    Ok(())
}
