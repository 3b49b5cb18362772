//! Monte Carlo Tree Search for sequential, terminal-reward games.
//!
//! This crate provides a game-agnostic MCTS agent for any game implementing
//! the `game-core` Game trait: any fixed number of players, chance events,
//! terminal rewards.
//!
//! # Overview
//!
//! Each simulation has four phases:
//!
//! 1. **Selection**: descend from the root, picking children by PUCT at
//!    decision nodes and by the game's own distribution at chance nodes
//! 2. **Expansion**: a node's children are materialized on its second
//!    visit, ordered by a driver-RNG shuffle of the evaluator's prior
//! 3. **Evaluation**: terminal leaves report the game's returns; other
//!    leaves are estimated by the [`Evaluator`] (random rollouts by default)
//! 4. **Backpropagation**: returns are credited along the visit path, and
//!    with solving enabled, proven outcomes propagate while the solver
//!    rules hold (MCTS-Solver)
//!
//! The search stops at the simulation cap, at the memory ceiling, or as
//! soon as the root's outcome is proven.
//!
//! # Usage
//!
//! ```rust
//! use game_core::Game;
//! use games_tictactoe::TicTacToe;
//! use mcts::{Bot, MctsBot, MctsConfig, RandomRolloutEvaluator};
//!
//! let config = MctsConfig::default().with_simulations(200).with_seed(42);
//! let evaluator = RandomRolloutEvaluator::new(10, 42);
//! let mut bot = MctsBot::new(TicTacToe::new(), evaluator, config).unwrap();
//!
//! let state = bot.game().initial_state();
//! let (policy, action) = bot.step(&state).unwrap();
//! assert_eq!(policy, vec![(action, 1.0)]);
//! ```

pub mod bot;
pub mod config;
pub mod evaluator;
pub mod node;
pub mod search;

// Re-export main types
pub use bot::{Bot, Decision, MctsBot, UniformRandomBot};
pub use config::MctsConfig;
pub use evaluator::{sample_chance_outcome, Evaluator, EvaluatorError, RandomRolloutEvaluator};
pub use node::{NodeId, SearchNode, SearchTree};
pub use search::{MctsSearch, SearchError};
