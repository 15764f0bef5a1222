//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_exploitation_constant() -> f64 {
    defaults::exploitation_constant()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_rollout_check_stride() -> u32 {
    defaults::rollout_check_stride()
}
fn d_progress_log_interval() -> u64 {
    defaults::progress_log_interval()
}
fn d_max_simulations() -> Option<u64> {
    defaults::max_simulations()
}
fn d_log_level() -> String {
    defaults::log_level().into()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching agent.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct AgentConfig {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Search tuning shared by every agent seat
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Exploration weight in the UCT formula
    #[serde(default = "d_exploitation_constant")]
    pub exploitation_constant: f64,
    /// RNG seed, reapplied on every set_up for reproducible matches
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// Rollout steps between deadline checks
    #[serde(default = "d_rollout_check_stride")]
    pub rollout_check_stride: u32,
    /// Iterations between progress log lines
    #[serde(default = "d_progress_log_interval")]
    pub progress_log_interval: u64,
    /// Hard cap on iterations per search (None = time budget only)
    #[serde(default = "d_max_simulations")]
    pub max_simulations: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploitation_constant: defaults::exploitation_constant(),
            seed: defaults::seed(),
            rollout_check_stride: defaults::rollout_check_stride(),
            progress_log_interval: defaults::progress_log_interval(),
            max_simulations: defaults::max_simulations(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    #[serde(default = "d_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level().into(),
        }
    }
}
