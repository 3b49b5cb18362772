//! Typed `Game` trait for sequential, terminal-reward games.

use crate::player::PlayerId;
use std::fmt::Debug;
use std::hash::Hash;

/// How actions are taken over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dynamics {
    /// One player (or chance) acts at a time.
    Sequential,
    /// All players act at once. Not supported by the search crates.
    Simultaneous,
}

/// When rewards are handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardModel {
    /// Returns are defined only at terminal states.
    Terminal,
    /// Rewards accumulate during play. Not supported by the search crates.
    Rewards,
}

/// Coarse classification of a game, used by agents to validate support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameType {
    pub dynamics: Dynamics,
    pub reward_model: RewardModel,
}

/// Main trait for game implementations.
///
/// A `Game` value is the rules object; the position lives in `Self::State`
/// and is cloned freely by searchers for simulated play. Actions are small
/// copyable values.
///
/// # Contract
///
/// - `legal_actions` is non-empty at every non-terminal decision state.
/// - `chance_outcomes` probabilities sum to 1 at every chance state.
/// - `returns` has length `num_players()` at terminal states, and no entry
///   exceeds `max_utility()`.
pub trait Game: Send + Sync {
    /// Game state - cloned once per simulation, so keep it compact.
    type State: Clone + Send;

    /// Action - small and `Copy`.
    type Action: Copy + Eq + Hash + Debug + Send;

    /// Number of seated players.
    fn num_players(&self) -> usize;

    /// The maximum return any player can receive in this game.
    fn max_utility(&self) -> f64;

    /// Dynamics and reward model of this game.
    fn game_type(&self) -> GameType;

    /// The starting position.
    fn initial_state(&self) -> Self::State;

    /// Who acts at `state`. Meaningless at terminal states.
    fn current_player(&self, state: &Self::State) -> PlayerId;

    /// Whether the game has ended at `state`.
    fn is_terminal(&self, state: &Self::State) -> bool;

    /// Whether the next move at `state` is drawn by nature.
    fn is_chance_node(&self, state: &Self::State) -> bool {
        self.current_player(state).is_chance()
    }

    /// All legal actions at a decision state.
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// The `(action, probability)` distribution at a chance state.
    fn chance_outcomes(&self, state: &Self::State) -> Vec<(Self::Action, f64)>;

    /// Advance `state` by `action` in place.
    fn apply_action(&self, state: &mut Self::State, action: Self::Action);

    /// Per-player returns at a terminal state.
    fn returns(&self, state: &Self::State) -> Vec<f64>;

    /// Human-readable action label for diagnostics, from the point of view
    /// of `player` (the mover).
    fn action_to_string(&self, player: PlayerId, action: Self::Action) -> String;
}
