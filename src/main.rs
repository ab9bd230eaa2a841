//! Brinkmanship match runner.
//!
//! Plays batches of games between two decision sources and optionally
//! writes one JSON record per match.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use brinkmanship::catalog::{load_catalog, load_catalog_from_env};
use brinkmanship::config::{load_config, load_config_from_env};
use brinkmanship::selfplay::{self, MatchConfig, MatchSummary, SourceKind};
use brinkmanship::GameEngine;

#[derive(Parser)]
#[command(name = "brinkmanship")]
#[command(about = "Fog-of-war grid wargame engine", version)]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Worker threads for concurrent games
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Base random seed, 0 for entropy
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Abandon a game after this many applied actions
    #[arg(long, default_value_t = 10_000)]
    max_actions: usize,

    /// Decision source for Red
    #[arg(long, value_enum, default_value_t = SourceKind::Random)]
    red: SourceKind,

    /// Decision source for Blue
    #[arg(long, value_enum, default_value_t = SourceKind::Random)]
    blue: SourceKind,

    /// Sampling temperature for heuristic players, 0 for greedy
    #[arg(long, default_value_t = 0.0)]
    temperature: f32,

    /// Asset catalog JSON (defaults to $ASSET_DEF, then the standard catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Game config JSON (defaults to $GAME_CONF, then built-in defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write match records as JSONL to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Debug-level logging unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn build_engine(cli: &Cli) -> Result<GameEngine, Box<dyn std::error::Error>> {
    let catalog = match &cli.catalog {
        Some(path) => load_catalog(path)?,
        None => load_catalog_from_env()?,
    };
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_config_from_env()?,
    };
    Ok(GameEngine::new(Arc::new(catalog), config)?)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let engine = build_engine(&cli)?;
    let config = MatchConfig {
        games: cli.games,
        threads: cli.threads.max(1),
        seed: cli.seed,
        max_actions: cli.max_actions,
        red: cli.red,
        blue: cli.blue,
        temperature: cli.temperature,
    };
    info!(
        games = config.games,
        threads = config.threads,
        red = ?config.red,
        blue = ?config.blue,
        "starting matches"
    );

    let mut out = match &cli.output {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };
    let mut write_err: Option<io::Error> = None;
    let mut records = Vec::with_capacity(config.games);
    selfplay::run_matches_with_callback(&engine, &config, |record| {
        if let (Some(out), None) = (out.as_mut(), write_err.as_ref()) {
            if let Err(e) = selfplay::write_record(&record, out) {
                write_err = Some(e);
            }
        }
        records.push(record);
    });
    if let Some(e) = write_err {
        return Err(e.into());
    }
    if let Some(out) = out.as_mut() {
        out.flush()?;
    }

    MatchSummary::from_records(&records).log();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
