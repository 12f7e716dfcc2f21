//! Deckforge batch simulator.
//!
//! Runs one matchup many times and prints a balance report.
//!
//! Usage:
//!   deckforge-sim --scenario scenario.json [OPTIONS]
//!
//! Examples:
//!   deckforge-sim --scenario duel.json                        # 100 runs, seed 42
//!   deckforge-sim --scenario duel.json -n 1000 --shuffle      # shuffled decks
//!   deckforge-sim --scenario duel.json --randomize-stats 50 150 --output report.json

mod report;
mod scenario;

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use deckforge_core::{run_batch, AnalyticsConfig, BatchConfig, StatSampling, DEFAULT_MAX_TURNS};
use tracing_subscriber::filter::LevelFilter;

use crate::report::BalanceReport;
use crate::scenario::Scenario;

#[derive(Parser, Debug)]
#[command(name = "deckforge-sim")]
#[command(about = "Run a deck matchup in bulk and report card balance", long_about = None)]
struct Cli {
    /// Scenario JSON: characteristics, cards, decks and hero settings
    #[arg(long)]
    scenario: PathBuf,

    /// Number of battles
    #[arg(short = 'n', long, default_value_t = 100)]
    runs: u32,

    /// Batch seed; run i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Turn cap per battle
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Shuffle both decks before every battle
    #[arg(long)]
    shuffle: bool,

    /// Draw starting stats per battle between MIN_PCT and MAX_PCT of hero 1's settings
    #[arg(long, num_args = 2, value_names = ["MIN_PCT", "MAX_PCT"])]
    randomize_stats: Option<Vec<u32>>,

    /// Analytics thresholds JSON; missing keys keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the full report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Grid size per axis for the balanced range search
    #[arg(long, default_value_t = 5)]
    buckets: u32,

    /// Rows per report table
    #[arg(long, default_value_t = 10)]
    top: usize,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::WARN,
        (false, 0) => LevelFilter::INFO,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(path: &Path) -> Result<AnalyticsConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let loaded = Scenario::load(&cli.scenario)?.into_loaded()?;
    let analytics_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AnalyticsConfig::default(),
    };

    let sampling = match cli.randomize_stats.as_deref() {
        Some(&[min_pct, max_pct]) => {
            if loaded.matchup.hero1 != loaded.matchup.hero2 {
                log::warn!("--randomize-stats samples both heroes around hero 1's settings");
            }
            StatSampling::around(loaded.matchup.hero1, min_pct, max_pct)
        }
        _ => StatSampling::Fixed,
    };
    let batch_config = BatchConfig {
        runs: cli.runs,
        seed: cli.seed,
        max_turns: cli.max_turns,
        shuffle_decks: cli.shuffle,
        sampling,
    };

    let step = (batch_config.runs / 10).max(1);
    let results = run_batch(
        &loaded.matchup,
        &loaded.cards,
        &loaded.catalog,
        &batch_config,
        |progress| {
            if progress.completed % step == 0 || progress.completed == progress.total {
                log::info!("{}/{} battles", progress.completed, progress.total);
            }
            ControlFlow::Continue(())
        },
    )
    .context("batch failed")?;

    let report = BalanceReport::build(&loaded, &results, cli.buckets, &analytics_config)?;
    println!("{}", report.to_text(cli.top));

    if let Some(path) = &cli.output {
        fs::write(path, report.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }

    Ok(())
}
