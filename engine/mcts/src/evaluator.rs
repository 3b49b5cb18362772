//! Evaluator trait for position evaluation.
//!
//! The evaluator supplies the two signals the search cannot derive from the
//! game itself: a per-player value estimate for a non-terminal state, and a
//! prior distribution over a state's actions. The default implementation
//! estimates value with uniform random rollouts; a learned model slots in
//! behind the same trait.

use game_core::Game;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::cell::RefCell;
use thiserror::Error;

/// Errors raised by evaluators. All of them are game-contract violations.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("no legal actions at a non-terminal decision state")]
    NoLegalActions,

    #[error("chance outcomes sum to {total}, expected 1")]
    InvalidChanceDistribution { total: f64 },
}

/// Trait for position evaluators.
pub trait Evaluator<G: Game> {
    /// Estimate per-player returns for a non-terminal state. The vector has
    /// one entry per seated player.
    fn evaluate(&self, game: &G, state: &G::State) -> Result<Vec<f64>, EvaluatorError>;

    /// Prior distribution over the state's actions. At a chance state this
    /// must equal the game's chance distribution; at a decision state it is
    /// any non-negative weighting over the legal actions summing to 1.
    fn prior(&self, game: &G, state: &G::State)
        -> Result<Vec<(G::Action, f64)>, EvaluatorError>;
}

/// Sample one action from a `(action, probability)` distribution.
///
/// Validates that the probabilities sum to 1 within `1e-6`; anything else is
/// a broken game contract.
pub fn sample_chance_outcome<A: Copy, R: Rng>(
    outcomes: &[(A, f64)],
    rng: &mut R,
) -> Result<A, EvaluatorError> {
    let total: f64 = outcomes.iter().map(|&(_, p)| p).sum();
    if (total - 1.0).abs() > 1e-6 {
        return Err(EvaluatorError::InvalidChanceDistribution { total });
    }

    let roll: f64 = rng.gen();
    let mut cumulative = 0.0;
    for &(action, p) in outcomes {
        cumulative += p;
        if roll < cumulative {
            return Ok(action);
        }
    }

    // Floating point can leave the cumulative sum a hair under 1.
    outcomes
        .last()
        .map(|&(action, _)| action)
        .ok_or(EvaluatorError::NoLegalActions)
}

/// Evaluator that estimates value with uniform random playouts.
///
/// `evaluate` runs `n_rollouts` independent playouts to a terminal state and
/// returns the component-wise mean of the terminal returns. `prior` is
/// uniform over legal actions at decision states and the game's own
/// distribution at chance states.
pub struct RandomRolloutEvaluator {
    n_rollouts: u32,
    /// Interior mutability so `evaluate` can take `&self`: the RNG state
    /// advances on every call.
    rng: RefCell<ChaCha20Rng>,
}

impl RandomRolloutEvaluator {
    /// Create an evaluator running `n_rollouts` playouts per evaluation.
    /// `n_rollouts` must be at least 1.
    pub fn new(n_rollouts: u32, seed: u64) -> Self {
        Self {
            n_rollouts: n_rollouts.max(1),
            rng: RefCell::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    fn rollout<G: Game>(
        &self,
        game: &G,
        state: &G::State,
        rng: &mut ChaCha20Rng,
    ) -> Result<Vec<f64>, EvaluatorError> {
        let mut state = state.clone();
        while !game.is_terminal(&state) {
            let action = if game.is_chance_node(&state) {
                sample_chance_outcome(&game.chance_outcomes(&state), rng)?
            } else {
                let actions = game.legal_actions(&state);
                if actions.is_empty() {
                    return Err(EvaluatorError::NoLegalActions);
                }
                actions[rng.gen_range(0..actions.len())]
            };
            game.apply_action(&mut state, action);
        }
        Ok(game.returns(&state))
    }
}

impl<G: Game> Evaluator<G> for RandomRolloutEvaluator {
    fn evaluate(&self, game: &G, state: &G::State) -> Result<Vec<f64>, EvaluatorError> {
        let mut rng = self.rng.borrow_mut();
        let mut result = vec![0.0; game.num_players()];
        for _ in 0..self.n_rollouts {
            let returns = self.rollout(game, state, &mut rng)?;
            for (acc, r) in result.iter_mut().zip(returns) {
                *acc += r;
            }
        }
        for value in &mut result {
            *value /= f64::from(self.n_rollouts);
        }
        Ok(result)
    }

    fn prior(
        &self,
        game: &G,
        state: &G::State,
    ) -> Result<Vec<(G::Action, f64)>, EvaluatorError> {
        if game.is_chance_node(state) {
            return Ok(game.chance_outcomes(state));
        }
        let actions = game.legal_actions(state);
        if actions.is_empty() {
            return Err(EvaluatorError::NoLegalActions);
        }
        let p = 1.0 / actions.len() as f64;
        Ok(actions.into_iter().map(|action| (action, p)).collect())
    }
}
