//! Bot facades over the search driver.
//!
//! `MctsBot` is the one-shot entry point: validate the game at
//! construction, then `step(state)` runs a full search and returns the
//! chosen action with a unit-mass policy. `UniformRandomBot` is the
//! baseline opponent used by match runners.

use game_core::{Dynamics, Game, RewardModel};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::time::Instant;
use tracing::info;

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::node::{NodeId, SearchTree};
use crate::search::{MctsSearch, SearchError};

/// A policy over actions paired with the action chosen from it.
pub type Decision<A> = (Vec<(A, f64)>, A);

/// Anything that can pick a move at a decision state.
pub trait Bot<G: Game> {
    fn step(&mut self, state: &G::State) -> Result<Decision<G::Action>, SearchError>;
}

/// Monte Carlo Tree Search bot.
///
/// Owns the rules object, the evaluator, and the driver RNG. Each `step`
/// grows a fresh tree, picks the best root child, and drops the tree before
/// returning; nothing persists between moves.
pub struct MctsBot<G: Game, E: Evaluator<G>> {
    game: G,
    evaluator: E,
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl<G: Game, E: Evaluator<G>> MctsBot<G, E> {
    /// Create a bot for `game`.
    ///
    /// Fails unless the game has sequential dynamics and terminal rewards;
    /// simultaneous-move and intermediate-reward games are not searchable
    /// with this algorithm.
    pub fn new(game: G, evaluator: E, config: MctsConfig) -> Result<Self, SearchError> {
        let game_type = game.game_type();
        if game_type.dynamics != Dynamics::Sequential
            || game_type.reward_model != RewardModel::Terminal
        {
            return Err(SearchError::UnsupportedGameType);
        }
        let rng = ChaCha20Rng::seed_from_u64(config.seed);
        Ok(Self {
            game,
            evaluator,
            config,
            rng,
        })
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Run the search driver from `state` and return the finished tree.
    ///
    /// Exposed separately from `step` so callers (and tests) can inspect
    /// the statistics instead of just taking the chosen action.
    pub fn search(&mut self, state: &G::State) -> Result<SearchTree<G::Action>, SearchError> {
        MctsSearch::new(&self.game, &self.evaluator, &self.config, &mut self.rng).run(state)
    }
}

impl<G: Game, E: Evaluator<G>> Bot<G> for MctsBot<G, E> {
    fn step(&mut self, state: &G::State) -> Result<Decision<G::Action>, SearchError> {
        let start = Instant::now();
        let tree = self.search(state)?;
        let (action, chosen) = tree.best_child(NodeId::ROOT).ok_or(SearchError::NoChildren)?;

        if self.config.verbose {
            let root = tree.get(NodeId::ROOT);
            let seconds = start.elapsed().as_secs_f64().max(1e-9);
            info!(
                sims = root.explore_count,
                sims_per_sec = f64::from(root.explore_count) / seconds,
                tree_kb = tree.memory_used() / 1024,
                "search finished"
            );
            info!("root:\n{}", tree.node_line(NodeId::ROOT, &self.game));
            info!("children:\n{}", tree.children_lines(NodeId::ROOT, &self.game));
            info!(
                "children of {}:\n{}",
                self.game.action_to_string(tree.get(chosen).player, action),
                tree.children_lines(chosen, &self.game)
            );
        }

        Ok((vec![(action, 1.0)], action))
    }
}

/// Bot that plays uniformly at random over the legal actions.
pub struct UniformRandomBot<G: Game> {
    game: G,
    rng: ChaCha20Rng,
}

impl<G: Game> UniformRandomBot<G> {
    pub fn new(game: G, seed: u64) -> Self {
        Self {
            game,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl<G: Game> Bot<G> for UniformRandomBot<G> {
    fn step(&mut self, state: &G::State) -> Result<Decision<G::Action>, SearchError> {
        let actions = self.game.legal_actions(state);
        if actions.is_empty() {
            return Err(EvaluatorError::NoLegalActions.into());
        }
        let p = 1.0 / actions.len() as f64;
        let policy = actions.iter().map(|&action| (action, p)).collect();
        let action = actions[self.rng.gen_range(0..actions.len())];
        Ok((policy, action))
    }
}
