//! Search configuration parameters.

use agent_config::SearchConfig;

/// Configuration for Monte Carlo tree search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploitation constant for the UCT formula.
    /// Higher values favor exploration, lower values favor exploitation.
    /// The classic choice is sqrt(2).
    pub exploitation_constant: f64,

    /// Seed for the search RNG. Reseeded on every `set_up`, so two agents
    /// with the same seed and inputs pick the same moves.
    pub seed: u64,

    /// How many rollout steps run between budget checks.
    pub rollout_check_stride: u32,

    /// How many search iterations run between progress log lines.
    pub progress_log_interval: u64,

    /// Hard cap on simulations per search, on top of the time budget.
    /// None searches until the budget expires.
    pub max_simulations: Option<u64>,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploitation_constant: std::f64::consts::SQRT_2,
            seed: 42,
            rollout_check_stride: 31,
            progress_log_interval: 97,
            max_simulations: None,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            max_simulations: Some(256),
            ..Self::default()
        }
    }

    /// Load the config from the central configuration files and environment.
    pub fn load() -> Self {
        Self::from(&agent_config::load_config().search)
    }

    /// Builder pattern: set the exploitation constant.
    pub fn with_exploitation_constant(mut self, c: f64) -> Self {
        self.exploitation_constant = c;
        self
    }

    /// Builder pattern: set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder pattern: set the rollout budget check stride.
    pub fn with_rollout_check_stride(mut self, stride: u32) -> Self {
        self.rollout_check_stride = stride;
        self
    }

    /// Builder pattern: cap the number of simulations per search.
    pub fn with_max_simulations(mut self, cap: u64) -> Self {
        self.max_simulations = Some(cap);
        self
    }
}

impl From<&SearchConfig> for MctsConfig {
    fn from(search: &SearchConfig) -> Self {
        Self {
            exploitation_constant: search.exploitation_constant,
            seed: search.seed,
            rollout_check_stride: search.rollout_check_stride,
            progress_log_interval: search.progress_log_interval,
            max_simulations: search.max_simulations,
        }
    }
}
