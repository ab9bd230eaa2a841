//! Match driver.
//!
//! Plays full games between two decision sources, one engine per game.
//! Batches run sequentially or concurrently on a rayon pool, with per-game
//! seeds derived from a base seed so that a batch is reproducible
//! regardless of thread count.

use std::io::{self, BufReader, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::{Outcome, Phase, Player};
use crate::catalog::AssetCatalog;
use crate::engine::GameEngine;
use crate::player::{DecisionSource, HeuristicModel, HumanSource, ModelSource, RandomSource};

/// Which kind of decision source plays a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Random,
    Heuristic,
    Human,
}

/// Configuration for a batch of matches.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play.
    pub games: usize,
    /// Worker threads. Batches with a human player always run on one.
    pub threads: usize,
    /// Base seed (0 = use entropy).
    pub seed: u64,
    /// Applied actions after which a game is abandoned.
    pub max_actions: usize,
    pub red: SourceKind,
    pub blue: SourceKind,
    /// Sampling temperature for model-backed sources (0.0 = greedy).
    pub temperature: f32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            games: 10,
            threads: 4,
            seed: 0,
            max_actions: 10_000,
            red: SourceKind::Random,
            blue: SourceKind::Random,
            temperature: 0.0,
        }
    }
}

impl MatchConfig {
    fn has_human(&self) -> bool {
        self.red == SourceKind::Human || self.blue == SourceKind::Human
    }
}

/// The result of one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub game_id: usize,
    pub seed: u64,
    pub red: String,
    pub blue: String,
    /// `None` when the game was cut short.
    pub outcome: Option<Outcome>,
    pub turns: u32,
    pub actions: usize,
    /// Victory points indexed by player.
    pub victory_points: [i32; 2],
    /// Hit the action cap before reaching a terminal state.
    pub truncated: bool,
    /// Why the game stopped early, if a source or the engine failed.
    pub error: Option<String>,
}

/// Builds the decision source for one side of one game.
pub fn make_source(
    kind: SourceKind,
    catalog: &Arc<AssetCatalog>,
    temperature: f32,
    seed: u64,
) -> Box<dyn DecisionSource + Send> {
    match kind {
        SourceKind::Random => Box::new(RandomSource::new(seed)),
        SourceKind::Heuristic => {
            let model = HeuristicModel::new(Arc::clone(catalog));
            if temperature > 0.0 {
                Box::new(ModelSource::sampling(model, temperature, seed))
            } else {
                Box::new(ModelSource::greedy(model))
            }
        }
        SourceKind::Human => Box::new(HumanSource::new(BufReader::new(io::stdin()), io::stdout())),
    }
}

/// Plays `engine` to completion, asking `red` and `blue` for every action.
///
/// Stops early when a source fails, when the engine rejects the chosen
/// action, or after `max_actions` applied actions.
pub fn play_match<'a>(
    engine: &mut GameEngine,
    red: &'a mut dyn DecisionSource,
    blue: &'a mut dyn DecisionSource,
    max_actions: usize,
) -> MatchRecord {
    let mut record = MatchRecord {
        game_id: 0,
        seed: 0,
        red: red.name().to_string(),
        blue: blue.name().to_string(),
        outcome: None,
        turns: 0,
        actions: 0,
        victory_points: [0; 2],
        truncated: false,
        error: None,
    };

    while !engine.is_terminal() {
        if record.actions >= max_actions {
            warn!(max_actions, turn = engine.turn(), "match hit the action cap");
            record.truncated = true;
            break;
        }

        let player = engine.current_player();
        let legal = engine.legal_choices(player);
        let view = engine.visible_state(player);
        let source = match player {
            Player::Red => &mut *red,
            Player::Blue => &mut *blue,
        };
        let chosen = if engine.phase() == Phase::Deployment {
            source.choose_deployment_action(&legal, &view)
        } else {
            source.choose_battle_action(&legal, &view)
        };

        let id = match chosen {
            Ok(id) => id,
            Err(e) => {
                warn!(%player, source = source.name(), error = %e, "decision source failed");
                record.error = Some(e.to_string());
                break;
            }
        };
        if let Err(e) = engine.apply(id) {
            warn!(%player, id, error = %e, "engine rejected chosen action");
            record.error = Some(e.to_string());
            break;
        }
        record.actions += 1;
    }

    let state = engine.state();
    record.outcome = engine.outcome();
    record.turns = engine.turn();
    record.victory_points = [
        state.ledger(Player::Red).victory_points,
        state.ledger(Player::Blue).victory_points,
    ];
    debug!(outcome = ?record.outcome, actions = record.actions, "match finished");
    record
}

fn game_seed(config: &MatchConfig, game_id: usize) -> u64 {
    if config.seed != 0 {
        config.seed.wrapping_add(game_id as u64)
    } else {
        rand::random()
    }
}

fn play_one(base: &GameEngine, config: &MatchConfig, game_id: usize) -> MatchRecord {
    let seed = game_seed(config, game_id);
    let catalog = base.catalog();
    let mut red = make_source(config.red, catalog, config.temperature, seed);
    // Keep Blue's stream distinct from Red's, and nonzero.
    let mut blue = make_source(config.blue, catalog, config.temperature, seed.rotate_left(17) | 1);
    let mut engine = base.clone();
    let mut record = play_match(&mut engine, &mut *red, &mut *blue, config.max_actions);
    record.game_id = game_id;
    record.seed = seed;
    record
}

fn describe(record: &MatchRecord) -> String {
    match record.outcome {
        Some(Outcome::Winner(p)) => format!("{p} wins"),
        Some(Outcome::Draw) => "draw".to_string(),
        None if record.truncated => "truncated".to_string(),
        None => "aborted".to_string(),
    }
}

/// Plays `config.games` matches from copies of `base`, returned in game order.
pub fn run_matches(base: &GameEngine, config: &MatchConfig) -> Vec<MatchRecord> {
    let mut records = Vec::with_capacity(config.games);
    run_matches_with_callback(base, config, |record| records.push(record));
    records.sort_by_key(|r| r.game_id);
    records
}

/// Plays matches, handing each finished record to `on_match` as it completes.
///
/// Parallel batches deliver records in completion order.
pub fn run_matches_with_callback<F>(base: &GameEngine, config: &MatchConfig, on_match: F)
where
    F: FnMut(MatchRecord) + Send,
{
    if config.threads > 1 && !config.has_human() {
        run_parallel(base, config, on_match);
    } else {
        run_sequential(base, config, on_match);
    }
}

fn run_sequential<F>(base: &GameEngine, config: &MatchConfig, mut on_match: F)
where
    F: FnMut(MatchRecord),
{
    for i in 0..config.games {
        let start = Instant::now();
        let record = play_one(base, config, i);
        info!(
            "game {}/{}: {} at turn {} ({:.1}s)",
            i + 1,
            config.games,
            describe(&record),
            record.turns,
            start.elapsed().as_secs_f64(),
        );
        on_match(record);
    }
}

fn run_parallel<F>(base: &GameEngine, config: &MatchConfig, mut on_match: F)
where
    F: FnMut(MatchRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            warn!(error = %e, "could not build thread pool, running sequentially");
            return run_sequential(base, config, on_match);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<MatchRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.games).into_par_iter().for_each_with(tx, |tx, i| {
                    let start = Instant::now();
                    let record = play_one(base, config, i);
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    info!(
                        "game {}/{}: {} at turn {} ({:.1}s)",
                        n,
                        config.games,
                        describe(&record),
                        record.turns,
                        start.elapsed().as_secs_f64(),
                    );
                    let _ = tx.send(record);
                });
            });
        });

        for record in rx {
            on_match(record);
        }
    });
}

/// Writes records as JSONL, one match per line.
pub fn write_jsonl<W: Write>(records: &[MatchRecord], out: &mut W) -> io::Result<()> {
    for record in records {
        write_record(record, out)?;
    }
    out.flush()
}

/// Writes one record followed by a newline.
pub fn write_record<W: Write>(record: &MatchRecord, out: &mut W) -> io::Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    writeln!(out)
}

/// Aggregate results over a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchSummary {
    pub games: usize,
    pub red_wins: usize,
    pub blue_wins: usize,
    pub draws: usize,
    pub truncated: usize,
    pub errors: usize,
    pub mean_turns: f64,
}

impl MatchSummary {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        let mut summary = MatchSummary { games: records.len(), ..Default::default() };
        let mut turns = 0u64;
        for record in records {
            turns += u64::from(record.turns);
            match record.outcome {
                Some(Outcome::Winner(Player::Red)) => summary.red_wins += 1,
                Some(Outcome::Winner(Player::Blue)) => summary.blue_wins += 1,
                Some(Outcome::Draw) => summary.draws += 1,
                None => {}
            }
            if record.truncated {
                summary.truncated += 1;
            }
            if record.error.is_some() {
                summary.errors += 1;
            }
        }
        if !records.is_empty() {
            summary.mean_turns = turns as f64 / records.len() as f64;
        }
        summary
    }

    /// Logs the summary at info level.
    pub fn log(&self) {
        info!(
            games = self.games,
            red_wins = self.red_wins,
            blue_wins = self.blue_wins,
            draws = self.draws,
            truncated = self.truncated,
            errors = self.errors,
            mean_turns = self.mean_turns,
            "match summary"
        );
    }
}
