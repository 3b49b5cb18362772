//! Arena - match runner for the search bots
//!
//! Plays a number of games of a catalog game between two configurable bots
//! (mcts or random). Chance events are sampled by the arena itself, outside
//! the bots' control, so every bot only ever steps at decision states.

use anyhow::{bail, Context, Result};
use clap::Parser;
use game_core::Game;
use games_pig::Pig;
use games_tictactoe::TicTacToe;
use mcts::{
    sample_chance_outcome, Bot, MctsBot, MctsConfig, RandomRolloutEvaluator, UniformRandomBot,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashMap;
use tracing::{debug, info};

mod config;

use crate::config::Config;

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn main() -> Result<()> {
    let config = Config::parse();
    config.validate()?;
    init_tracing(&config.log_level);

    match config.game.as_str() {
        "tictactoe" => run_matches(TicTacToe::new(), &config),
        "pig" => run_matches(Pig::new(), &config),
        other => bail!("unknown game {other:?}, expected tictactoe or pig"),
    }
}

fn make_bot<G>(kind: &str, game: G, seat: usize, config: &Config) -> Result<Box<dyn Bot<G>>>
where
    G: Game + 'static,
{
    // Per-seat seed offset so two mcts bots don't mirror each other.
    let seed = config.effective_seed().wrapping_add(seat as u64);
    match kind {
        "mcts" => {
            let mcts_config = MctsConfig {
                uct_c: config.uct_c,
                max_simulations: config.max_simulations,
                max_memory_mb: config.max_memory_mb,
                solve: config.solve,
                seed,
                verbose: config.verbose,
            };
            let evaluator = RandomRolloutEvaluator::new(config.rollout_count, seed);
            let bot = MctsBot::new(game, evaluator, mcts_config)
                .context("game not searchable by mcts")?;
            Ok(Box::new(bot))
        }
        "random" => Ok(Box::new(UniformRandomBot::new(game, seed))),
        other => bail!("unknown bot type {other:?}, expected mcts or random"),
    }
}

fn run_matches<G>(game: G, config: &Config) -> Result<()>
where
    G: Game + Clone + 'static,
{
    if game.num_players() != 2 {
        bail!("the arena only seats two players");
    }

    let mut bots: Vec<Box<dyn Bot<G>>> = vec![
        make_bot(&config.player1, game.clone(), 0, config)?,
        make_bot(&config.player2, game.clone(), 1, config)?,
    ];
    let mut rng = ChaCha20Rng::seed_from_u64(config.effective_seed() ^ 0xA5A5_5A5A);

    let mut histories: HashMap<String, u32> = HashMap::new();
    let mut overall_returns = vec![0.0; game.num_players()];
    let mut overall_wins = vec![0u32; game.num_players()];

    for game_num in 0..config.num_games {
        let (returns, history) =
            play_game(&game, &mut bots, &mut rng, &config.initial_actions, config.quiet)?;
        info!(
            game = game_num,
            returns = ?returns,
            actions = history.join(" ").as_str(),
            "game finished"
        );
        *histories.entry(history.join(" ")).or_insert(0) += 1;
        for (i, &value) in returns.iter().enumerate() {
            overall_returns[i] += value;
            if value > 0.0 {
                overall_wins[i] += 1;
            }
        }
    }

    info!(games = config.num_games, "matches complete");
    info!(distinct_games = histories.len());
    info!(wins = ?overall_wins);
    info!(returns = ?overall_returns);
    Ok(())
}

/// Resolve a forced opening action by its display name.
fn find_action<G: Game>(game: &G, state: &G::State, action_str: &str) -> Option<G::Action> {
    let player = game.current_player(state);
    game.legal_actions(state)
        .into_iter()
        .find(|&action| game.action_to_string(player, action) == action_str)
}

fn play_game<G>(
    game: &G,
    bots: &mut [Box<dyn Bot<G>>],
    rng: &mut ChaCha20Rng,
    initial_actions: &[String],
    quiet: bool,
) -> Result<(Vec<f64>, Vec<String>)>
where
    G: Game,
{
    let mut state = game.initial_state();
    let mut history = Vec::new();

    for action_str in initial_actions {
        let action = find_action(game, &state, action_str)
            .with_context(|| format!("illegal forced action {action_str:?}"))?;
        history.push(action_str.clone());
        game.apply_action(&mut state, action);
        if !quiet {
            debug!(action = action_str.as_str(), "forced action");
        }
    }

    while !game.is_terminal(&state) {
        let player = game.current_player(&state);
        let action = match player.seat() {
            // Chance node: the arena samples from the game's distribution.
            None => sample_chance_outcome(&game.chance_outcomes(&state), rng)
                .context("bad chance distribution")?,
            Some(seat) => {
                let (_, action) = bots[seat]
                    .step(&state)
                    .with_context(|| format!("bot for seat {seat} failed"))?;
                action
            }
        };

        if !quiet {
            debug!(
                player = %player,
                action = game.action_to_string(player, action).as_str(),
                "move"
            );
        }
        history.push(game.action_to_string(player, action));
        game.apply_action(&mut state, action);
    }

    Ok((game.returns(&state), history))
}
