//! # Huepath Main Entry Point
//!
//! Generates a level, then runs the tick loop headlessly with a greedy
//! automatic player and reports how the level ended.

use clap::Parser;
use huepath::{
    generation::utils, Direction, Entity, GameState, GenerationConfig, Generator, HuepathResult,
    Level, LevelGenerator, LevelStatistics,
};
use serde::Serialize;
use std::path::PathBuf;

#[cfg(not(feature = "dev-tools"))]
use log::{debug, error, info};
#[cfg(feature = "dev-tools")]
use tracing::{debug, error, info};

/// Command line arguments for Huepath.
#[derive(Parser, Debug)]
#[command(name = "huepath")]
#[command(about = "Headless runner for a tile-based colour-chain puzzle level")]
#[command(version)]
struct Args {
    /// Random seed for level generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON generation config; command line values override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Level width in tiles
    #[arg(long)]
    width: Option<u32>,

    /// Level height in tiles
    #[arg(long)]
    height: Option<u32>,

    /// Ticks available before the level is lost
    #[arg(long)]
    time: Option<u32>,

    /// Stop after this many ticks even if the level is still running
    #[arg(long, default_value_t = 10_000)]
    max_ticks: u64,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// What the runner reports once the loop stops.
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    level_number: u32,
    outcome: GameState,
    ticks: u64,
    time_remaining: u32,
    statistics: LevelStatistics,
}

fn main() -> HuepathResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Huepath v{}", huepath::VERSION);

    match run(&args) {
        Ok(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                info!(
                    "Level {} {} after {} ticks ({} moves, {} items collected)",
                    summary.level_number,
                    summary.outcome,
                    summary.ticks,
                    summary.statistics.player_moves,
                    summary.statistics.items_collected
                );
            }
            Ok(())
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e)
        }
    }
}

/// Initializes the logging system based on the specified log level.
///
/// `RUST_LOG`, when set, takes precedence over the flag.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing_subscriber::EnvFilter;

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .format_target(false)
            .init();
    }
}

/// Builds the generation config from the optional file plus overrides.
fn build_config(args: &Args) -> HuepathResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading generation config from {}", path.display());
            GenerationConfig::from_json_file(path)?
        }
        None => GenerationConfig::default(),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(time) = args.time {
        config.time_limit = time;
    }

    config.validate()?;
    Ok(config)
}

/// Generates the level and drives it until it ends or `max_ticks` is hit.
fn run(args: &Args) -> HuepathResult<RunSummary> {
    let config = build_config(args)?;

    info!("Generating level with seed: {}", config.seed);
    let mut rng = utils::create_rng(&config);
    let mut level = LevelGenerator::new().generate(&config, &mut rng)?;
    debug!("Initial layout:\n{}", level.grid());

    let mut outcome = GameState::Ongoing;
    while level.tick() < args.max_ticks {
        if let Some(direction) = choose_direction(&level) {
            level.move_player(direction);
        }

        outcome = level.update();
        if outcome.is_terminal() {
            break;
        }
    }

    if !outcome.is_terminal() {
        info!("Stopped after {} ticks with the level still running", level.tick());
    }
    debug!("Final layout:\n{}", level.grid());

    Ok(RunSummary {
        seed: config.seed,
        level_number: level.level_number(),
        outcome,
        ticks: level.tick(),
        time_remaining: level.time_remaining(),
        statistics: level.statistics().clone(),
    })
}

/// Picks the move whose destination lands closest to any remaining loot.
///
/// Returns `None` when the player is gone, nothing is left to collect, or
/// every direction is blocked.
fn choose_direction(level: &Level) -> Option<Direction> {
    let player = level.player()?;
    let origin = level.get_tile_at(player.position().x, player.position().y)?;
    let targets: Vec<_> = level
        .collectable_items()
        .iter()
        .map(|item| item.position())
        .collect();

    Direction::all()
        .into_iter()
        .filter_map(|direction| {
            let destination = level.next_tile_in_direction(origin, direction)?.position();
            let distance = targets
                .iter()
                .map(|target| destination.manhattan_distance(*target))
                .min()?;
            Some((distance, direction))
        })
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, direction)| direction)
}
