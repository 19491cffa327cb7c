//! Command-line race: collects the setup, then plays to a winner.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use ladder_race::input::ConsoleOperator;
use ladder_race::{GameConfig, GameRng, SeatedDice, TracingSink, TurnEngine};

/// Snakes and ladders for 2-6 players
#[derive(Parser, Debug)]
#[command(name = "ladder-race")]
#[command(about = "Race across a random snakes-and-ladders board", long_about = None)]
#[command(version)]
struct Cli {
    /// Board edge n; the board has n*n cells
    #[arg(short, long, default_value = "10")]
    board_size: u32,

    /// Dice rolled per turn
    #[arg(short, long, default_value = "1")]
    dice: u8,

    /// Faces per die
    #[arg(long, default_value = "6")]
    faces: u8,

    /// Total players (2-6)
    #[arg(short, long, default_value = "2")]
    players: usize,

    /// How many of the players are human
    #[arg(long, default_value = "0")]
    humans: usize,

    /// Seed for the board and automated dice; random if omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many turns
    #[arg(long)]
    max_turns: Option<u32>,
}

impl Cli {
    fn config(&self, seed: u64) -> GameConfig {
        GameConfig::new()
            .with_board_size(self.board_size)
            .with_dice(self.dice)
            .with_faces(self.faces)
            .with_players(self.players)
            .with_humans(self.humans)
            .with_seed(seed)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(rand::random);
    let config = cli.config(seed);

    let root = GameRng::new(seed);
    let operator = ConsoleOperator::new(io::stdin().lock(), io::stdout(), root.for_context("operator"));
    let dice = SeatedDice::new(root.for_context("dice"), operator);
    let mut engine = TurnEngine::from_config(&config, dice, TracingSink::new())?;

    info!(
        seed,
        size = config.board_size,
        humans = config.human_count,
        bots = config.automated_count(),
        "race set up"
    );
    for line in engine.board().summary().lines() {
        info!("{line}");
    }

    let outcome = match cli.max_turns {
        Some(limit) => engine.play_with_limit(limit),
        None => engine.play(),
    };

    match outcome {
        Some(outcome) => {
            let name = engine
                .player(outcome.winner)
                .map_or_else(|| outcome.winner.to_string(), |p| p.name.clone());
            info!(turns = outcome.turns, "{name} wins");
        }
        None => warn!(turns = engine.turns(), "no winner before the turn limit"),
    }
    Ok(())
}
