//! Configuration for the arena match runner.
//!
//! CLI arguments take priority; a few settings fall back to `ARENA_*`
//! environment variables so batch scripts can steer runs without editing
//! command lines.

use anyhow::{bail, Result};
use clap::Parser;

fn default_game() -> String {
    std::env::var("ARENA_GAME").unwrap_or_else(|_| "tictactoe".to_string())
}

fn default_log_level() -> String {
    std::env::var("ARENA_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
}

const KNOWN_PLAYERS: [&str; 2] = ["mcts", "random"];

#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(about = "Plays matches between search bots")]
#[command(
    long_about = "Plays a number of games of a catalog game between two bots,
sampling chance events outside the bots' control, and reports per-game and
aggregate results."
)]
pub struct Config {
    /// Game to play: tictactoe or pig
    #[arg(long, default_value_t = default_game())]
    pub game: String,

    /// Who controls player 1: mcts or random
    #[arg(long, default_value = "mcts")]
    pub player1: String,

    /// Who controls player 2: mcts or random
    #[arg(long, default_value = "random")]
    pub player2: String,

    /// PUCT exploration constant
    #[arg(long, default_value_t = 2.0)]
    pub uct_c: f64,

    /// Rollouts per evaluation for the random-rollout evaluator
    #[arg(long, default_value_t = 10)]
    pub rollout_count: u32,

    /// Simulations per move
    #[arg(long, default_value_t = 1000)]
    pub max_simulations: u32,

    /// Memory ceiling per search in megabytes (0 = unlimited)
    #[arg(long, default_value_t = 1000)]
    pub max_memory_mb: u64,

    /// Back-propagate proven outcomes (MCTS-Solver)
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub solve: bool,

    /// RNG seed; 0 picks one from the clock
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    pub num_games: u32,

    /// Log per-move search statistics
    #[arg(long)]
    pub verbose: bool,

    /// Suppress per-move logging, keep only aggregate results
    #[arg(long)]
    pub quiet: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,

    /// Forced opening actions, by display name (e.g. "x(1,1)")
    pub initial_actions: Vec<String>,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !KNOWN_PLAYERS.contains(&self.player1.as_str()) {
            bail!("unknown player1 type {:?}", self.player1);
        }
        if !KNOWN_PLAYERS.contains(&self.player2.as_str()) {
            bail!("unknown player2 type {:?}", self.player2);
        }
        if self.max_simulations == 0 {
            bail!("max_simulations must be at least 1");
        }
        if self.rollout_count == 0 {
            bail!("rollout_count must be at least 1");
        }
        if !(self.uct_c.is_finite() && self.uct_c > 0.0) {
            bail!("uct_c must be finite and positive");
        }
        if self.num_games == 0 {
            bail!("num_games must be at least 1");
        }
        Ok(())
    }

    /// The configured seed, or one derived from the clock when unset.
    pub fn effective_seed(&self) -> u64 {
        if self.seed != 0 {
            return self.seed;
        }
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(1)
    }
}
