//! Search driver.
//!
//! Runs simulations up to the configured budget. Each simulation descends
//! from the root to a leaf (expanding nodes on their second visit), asks the
//! evaluator for a value estimate at non-terminal leaves, and walks the
//! visit path backwards crediting returns. With solving enabled, terminal
//! returns also propagate as proven outcomes where the solver rules allow.

use game_core::{Game, PlayerId};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::trace;

use crate::config::MctsConfig;
use crate::evaluator::{sample_chance_outcome, Evaluator, EvaluatorError};
use crate::node::{value_for, NodeId, SearchNode, SearchTree};

/// Errors that can occur during search. Everything here is either a broken
/// game contract or a broken evaluator contract; none of them are recovered
/// locally.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),

    #[error("game must have sequential dynamics and terminal rewards")]
    UnsupportedGameType,

    #[error("expected {expected} returns, got {got}")]
    WrongReturnsLength { expected: usize, got: usize },

    #[error("sampled chance outcome has no matching child")]
    MissingChanceChild,

    #[error("node has no children to choose from")]
    NoChildren,
}

/// Capacity-based estimate of a vector's heap footprint.
fn vec_bytes<T>(v: &Vec<T>) -> usize {
    std::mem::size_of::<T>() * v.capacity()
}

/// One search: owns the scratch state for a single `run` and borrows
/// everything else from the bot.
pub struct MctsSearch<'a, G: Game, E: Evaluator<G>> {
    game: &'a G,
    evaluator: &'a E,
    config: &'a MctsConfig,
    rng: &'a mut ChaCha20Rng,
    max_utility: f64,
    /// Nodes traversed by the current simulation, root first. Reused across
    /// simulations to avoid per-iteration allocation.
    visit_path: Vec<NodeId>,
}

impl<'a, G: Game, E: Evaluator<G>> MctsSearch<'a, G, E> {
    pub fn new(
        game: &'a G,
        evaluator: &'a E,
        config: &'a MctsConfig,
        rng: &'a mut ChaCha20Rng,
    ) -> Self {
        Self {
            game,
            evaluator,
            config,
            rng,
            max_utility: game.max_utility(),
            visit_path: Vec::with_capacity(64),
        }
    }

    /// Run up to `max_simulations` simulations from `root_state` and return
    /// the finished tree.
    ///
    /// Exits early when the root's outcome is proven (the game is solved
    /// from this state) or when the memory estimate crosses the configured
    /// cap; the simulation in flight always completes first.
    pub fn run(mut self, root_state: &G::State) -> Result<SearchTree<G::Action>, SearchError> {
        let root_player = self.game.current_player(root_state);
        let mut tree = SearchTree::new(SearchNode::root(root_player));

        for sim in 0..self.config.max_simulations {
            let working_state = self.apply_tree_policy(&mut tree, root_state)?;

            let (returns, solved) = if self.game.is_terminal(&working_state) {
                let returns = self.game.returns(&working_state);
                self.check_returns_len(&returns)?;
                let leaf = self.visit_path.last().copied().unwrap_or(NodeId::ROOT);
                if tree.get(leaf).outcome.is_empty() {
                    tree.get_mut(leaf).outcome = returns.clone();
                    let bytes = vec_bytes(&tree.get(leaf).outcome);
                    tree.add_memory(bytes);
                }
                (returns, self.config.solve)
            } else {
                let returns = self.evaluator.evaluate(self.game, &working_state)?;
                self.check_returns_len(&returns)?;
                (returns, false)
            };

            self.backpropagate(&mut tree, &returns, solved);

            trace!(
                sim,
                depth = self.visit_path.len(),
                nodes = tree.len(),
                "simulation complete"
            );

            if tree.get(NodeId::ROOT).is_solved() {
                break;
            }
            let cap = self.config.max_memory_bytes();
            if cap != 0 && tree.memory_used() >= cap {
                break;
            }
        }

        Ok(tree)
    }

    /// Descend from the root until a fresh leaf or a terminal state,
    /// recording the visit path and returning the working state at the
    /// stopping point.
    ///
    /// A node is expanded the first time the descent tries to move *past*
    /// it, i.e. on its second visit: the first visit ends at the node
    /// itself with zero children.
    fn apply_tree_policy(
        &mut self,
        tree: &mut SearchTree<G::Action>,
        root_state: &G::State,
    ) -> Result<G::State, SearchError> {
        self.visit_path.clear();
        self.visit_path.push(NodeId::ROOT);

        let mut working_state = root_state.clone();
        let mut current = NodeId::ROOT;

        while !self.game.is_terminal(&working_state) && tree.get(current).explore_count > 0 {
            if tree.get(current).children.is_empty() {
                self.expand(tree, current, &working_state)?;
            }

            let (action, child) = if self.game.is_chance_node(&working_state) {
                // Descend through chance by the game's own distribution.
                let outcomes = self.game.chance_outcomes(&working_state);
                let action = sample_chance_outcome(&outcomes, self.rng)?;
                let child = tree
                    .get(current)
                    .children
                    .iter()
                    .find(|&&(a, _)| a == action)
                    .map(|&(_, id)| id)
                    .ok_or(SearchError::MissingChanceChild)?;
                (action, child)
            } else {
                self.select_puct(tree, current)?
            };

            self.game.apply_action(&mut working_state, action);
            current = child;
            self.visit_path.push(current);
        }

        Ok(working_state)
    }

    /// Materialize one child per prior entry, in an order shuffled by the
    /// driver RNG to remove bias from the game's action enumeration.
    fn expand(
        &mut self,
        tree: &mut SearchTree<G::Action>,
        id: NodeId,
        state: &G::State,
    ) -> Result<(), SearchError> {
        let mut prior = self.evaluator.prior(self.game, state)?;
        prior.shuffle(self.rng);
        tree.add_memory(vec_bytes(&prior));

        let player = self.game.current_player(state);
        let mut children = Vec::with_capacity(prior.len());
        for &(action, p) in &prior {
            let child = tree.allocate(SearchNode::child(action, player, p));
            children.push((action, child));
        }
        tree.add_memory(vec_bytes(&children));
        tree.get_mut(id).children = children;
        Ok(())
    }

    /// Highest-PUCT child; the first child reaching the maximum wins.
    fn select_puct(
        &self,
        tree: &SearchTree<G::Action>,
        id: NodeId,
    ) -> Result<(G::Action, NodeId), SearchError> {
        let parent_count = tree.get(id).explore_count;
        let mut best: Option<(G::Action, NodeId)> = None;
        let mut best_value = f64::NEG_INFINITY;
        for &(action, child) in &tree.get(id).children {
            let value = tree.get(child).puct_value(parent_count, self.config.uct_c);
            if value > best_value {
                best_value = value;
                best = Some((action, child));
            }
        }
        best.ok_or(SearchError::NoChildren)
    }

    /// Walk the visit path leaf to root, crediting returns and propagating
    /// proven outcomes while the solver rules keep holding.
    fn backpropagate(&mut self, tree: &mut SearchTree<G::Action>, returns: &[f64], mut solved: bool) {
        for i in (0..self.visit_path.len()).rev() {
            let id = self.visit_path[i];
            let node = tree.get_mut(id);
            node.total_reward += value_for(returns, node.player);
            node.explore_count += 1;

            if solved && !tree.get(id).children.is_empty() {
                solved = self.propagate_outcome(tree, id);
            }
        }
    }

    /// Try to derive this node's outcome from its children. Returns whether
    /// propagation may continue to the node's ancestors.
    ///
    /// Once set, an outcome never changes; already-proven descendants are
    /// left untouched when propagation fails higher up.
    fn propagate_outcome(&self, tree: &mut SearchTree<G::Action>, id: NodeId) -> bool {
        if tree.get(id).is_solved() {
            return true;
        }

        let first_child = tree.get(id).children[0].1;
        let mover = tree.get(first_child).player;

        let outcome = match mover {
            PlayerId::Chance => {
                // A chance node is proven only when every branch agrees; a
                // weighted average of partial proofs is not a proof.
                let reference = tree.get(first_child).outcome.clone();
                if reference.is_empty() {
                    return false;
                }
                let unanimous = tree
                    .get(id)
                    .children
                    .iter()
                    .all(|&(_, child)| tree.get(child).outcome == reference);
                if !unanimous {
                    return false;
                }
                reference
            }
            PlayerId::Player(seat) => {
                // Proven if the mover can force the game's maximum return,
                // or if every reply is proven; either way the mover picks
                // the best proven child.
                let mut best: Option<NodeId> = None;
                let mut all_solved = true;
                for &(_, child) in &tree.get(id).children {
                    let node = tree.get(child);
                    if node.outcome.is_empty() {
                        all_solved = false;
                    } else if best
                        .map_or(true, |b| node.outcome[seat] > tree.get(b).outcome[seat])
                    {
                        best = Some(child);
                    }
                }
                match best {
                    Some(b) if all_solved || tree.get(b).outcome[seat] == self.max_utility => {
                        tree.get(b).outcome.clone()
                    }
                    _ => return false,
                }
            }
        };

        let bytes = vec_bytes(&outcome);
        tree.get_mut(id).outcome = outcome;
        tree.add_memory(bytes);
        true
    }

    fn check_returns_len(&self, returns: &[f64]) -> Result<(), SearchError> {
        let expected = self.game.num_players();
        if returns.len() != expected {
            return Err(SearchError::WrongReturnsLength {
                expected,
                got: returns.len(),
            });
        }
        Ok(())
    }
}
