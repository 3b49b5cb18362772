//! Search tree nodes and arena storage.
//!
//! Each node sits on the edge from its parent: it records the action that
//! was taken, the player who took it, and the statistics accumulated by
//! simulations passing through. Nodes live in an arena owned by the tree and
//! reference each other by index, so the visit path can be held as plain
//! indices while the tree is mutated.

use game_core::{Game, PlayerId};
use std::cmp::Ordering;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node of any tree is at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// The value of a return vector from `player`'s point of view.
///
/// The chance pseudo-player owns no seat; its edges are credited with the
/// mean across players. Chance edges never feed PUCT, so this only shows up
/// in statistics and diagnostics.
pub(crate) fn value_for(values: &[f64], player: PlayerId) -> f64 {
    match player {
        PlayerId::Player(seat) => values[seat],
        PlayerId::Chance => values.iter().sum::<f64>() / values.len() as f64,
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<A> {
    /// Action that led to this node from the parent (`None` for the root).
    pub action: Option<A>,

    /// The player who was to move at the parent state, i.e. whose reward
    /// this edge's statistics credit. For the root, the player to move at
    /// the searched state.
    pub player: PlayerId,

    /// Prior probability the evaluator assigned to `action` at the parent.
    pub prior: f64,

    /// Number of simulations that have passed through this node.
    pub explore_count: u32,

    /// Sum of returns credited to `player` over those simulations.
    pub total_reward: f64,

    /// Proven per-player returns. Empty while the subgame is unsolved; once
    /// set it never changes.
    pub outcome: Vec<f64>,

    /// Children as `(action, node)` pairs. Empty until the node is expanded
    /// on its second visit.
    pub children: Vec<(A, NodeId)>,
}

impl<A: Copy> SearchNode<A> {
    /// Create the root node for a search.
    pub fn root(player: PlayerId) -> Self {
        Self {
            action: None,
            player,
            prior: 1.0,
            explore_count: 0,
            total_reward: 0.0,
            outcome: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an unexplored child node.
    pub fn child(action: A, player: PlayerId, prior: f64) -> Self {
        Self {
            action: Some(action),
            player,
            prior,
            explore_count: 0,
            total_reward: 0.0,
            outcome: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether the game-theoretic outcome of this subtree is proven.
    #[inline]
    pub fn is_solved(&self) -> bool {
        !self.outcome.is_empty()
    }

    /// Mean simulated reward for `player`. Zero if never visited.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.explore_count == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.explore_count)
        }
    }

    /// The proven value of this edge for its player, if solved.
    pub fn solved_value(&self) -> Option<f64> {
        if self.outcome.is_empty() {
            None
        } else {
            Some(value_for(&self.outcome, self.player))
        }
    }

    /// PUCT selection score of this child given the parent's visit count.
    ///
    /// A proven outcome short-circuits the formula: the edge is worth
    /// exactly what it guarantees its player.
    pub fn puct_value(&self, parent_explore_count: u32, uct_c: f64) -> f64 {
        if let Some(value) = self.solved_value() {
            return value;
        }
        self.mean_reward()
            + uct_c * self.prior * f64::from(parent_explore_count).sqrt()
                / (f64::from(self.explore_count) + 1.0)
    }

    /// Lexicographic ordering used to pick the final move: proven score for
    /// the mover, then visits, then total reward.
    ///
    /// This ranks a proven win above any unproven action, a proven draw
    /// above unsolved actions only when it was explored at least as hard,
    /// and a proven loss below everything unsolved.
    pub fn compare_final(&self, other: &Self) -> Ordering {
        let score = self.solved_value().unwrap_or(0.0);
        let score_other = other.solved_value().unwrap_or(0.0);
        score
            .total_cmp(&score_other)
            .then_with(|| self.explore_count.cmp(&other.explore_count))
            .then_with(|| self.total_reward.total_cmp(&other.total_reward))
    }
}

/// Search tree with arena-based node storage.
///
/// The tree also carries the coarse memory estimate maintained by the
/// driver: the capacity of the major grown buffers, not a precise allocator
/// account.
#[derive(Debug)]
pub struct SearchTree<A> {
    nodes: Vec<SearchNode<A>>,
    memory_used: usize,
}

impl<A: Copy> SearchTree<A> {
    /// Create a tree holding only `root`.
    pub fn new(root: SearchNode<A>) -> Self {
        Self {
            nodes: vec![root],
            memory_used: 0,
        }
    }

    /// Get a reference to a node by id.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<A> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by id.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<A> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its id.
    pub fn allocate(&mut self, node: SearchNode<A>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Estimated bytes held by the tree's grown buffers.
    #[inline]
    pub fn memory_used(&self) -> usize {
        self.memory_used
    }

    pub(crate) fn add_memory(&mut self, bytes: usize) {
        self.memory_used += bytes;
    }

    /// The best move from `id` under `compare_final`, with its node.
    ///
    /// Ties keep the first child encountered, which is deterministic given
    /// the shuffled expansion order.
    pub fn best_child(&self, id: NodeId) -> Option<(A, NodeId)> {
        let mut best: Option<(A, NodeId)> = None;
        for &(action, child_id) in &self.get(id).children {
            let better = match best {
                Some((_, current)) => {
                    self.get(child_id).compare_final(self.get(current)) == Ordering::Greater
                }
                None => true,
            };
            if better {
                best = Some((action, child_id));
            }
        }
        best
    }

    /// One diagnostics line for a node:
    /// `action: player, prior, value, sims, outcome, #children`.
    pub fn node_line<G: Game<Action = A>>(&self, id: NodeId, game: &G) -> String {
        let node = self.get(id);
        let action_str = match node.action {
            Some(action) => game.action_to_string(node.player, action),
            None => "none".to_string(),
        };
        let outcome_str = match node.solved_value() {
            Some(value) => format!("{value:4.1}"),
            None => "none".to_string(),
        };
        format!(
            "{:>6}: player: {}, prior: {:5.3}, value: {:6.3}, sims: {:5}, outcome: {}, {:3} children",
            action_str,
            node.player,
            node.prior,
            node.mean_reward(),
            node.explore_count,
            outcome_str,
            node.children.len(),
        )
    }

    /// Diagnostics lines for a node's children, best first.
    pub fn children_lines<G: Game<Action = A>>(&self, id: NodeId, game: &G) -> String {
        let mut ids: Vec<NodeId> = self.get(id).children.iter().map(|&(_, c)| c).collect();
        ids.sort_by(|&a, &b| self.get(b).compare_final(self.get(a)));
        ids.iter()
            .map(|&c| self.node_line(c, game))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
