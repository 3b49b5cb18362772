//! Search configuration parameters.

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration constant in the PUCT formula. Higher values push the
    /// search toward unexplored actions.
    pub uct_c: f64,

    /// Hard cap on simulations per `step`.
    pub max_simulations: u32,

    /// Soft memory ceiling in megabytes for the search tree's grown
    /// buffers. `0` means unlimited. Checked after each simulation, so the
    /// cap can be overshot by one simulation's worth of allocation.
    pub max_memory_mb: u64,

    /// Back-propagate proven outcomes (MCTS-Solver). The search stops early
    /// once the root is solved.
    pub solve: bool,

    /// Seed for the driver RNG (child-order shuffle, chance sampling).
    pub seed: u64,

    /// Log a search summary and per-child statistics after each step.
    pub verbose: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            uct_c: 2.0,
            max_simulations: 800,
            max_memory_mb: 0,
            solve: true,
            seed: 0,
            verbose: false,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_simulations: 100,
            ..Self::default()
        }
    }

    /// Builder pattern: set number of simulations.
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.max_simulations = n;
        self
    }

    /// Builder pattern: set the PUCT exploration constant.
    pub fn with_uct_c(mut self, c: f64) -> Self {
        self.uct_c = c;
        self
    }

    /// Builder pattern: set the memory ceiling in megabytes.
    pub fn with_max_memory_mb(mut self, mb: u64) -> Self {
        self.max_memory_mb = mb;
        self
    }

    /// Builder pattern: enable or disable outcome solving.
    pub fn with_solve(mut self, solve: bool) -> Self {
        self.solve = solve;
        self
    }

    /// Builder pattern: set the driver RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Memory ceiling in bytes, `0` when unlimited.
    pub(crate) fn max_memory_bytes(&self) -> usize {
        (self.max_memory_mb as usize) << 20
    }
}
