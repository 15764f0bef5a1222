//! Default configuration values loaded from config.defaults.toml.
//!
//! The shared TOML file is embedded at compile time so every binary ships
//! with the same built-in defaults.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    search: SearchDefaults,
    log: LogDefaults,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    exploitation_constant: f64,
    seed: u64,
    rollout_check_stride: u32,
    progress_log_interval: u64,
    max_simulations: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct LogDefaults {
    level: String,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Search
pub fn exploitation_constant() -> f64 {
    DEFAULTS.search.exploitation_constant
}
pub fn seed() -> u64 {
    DEFAULTS.search.seed
}
pub fn rollout_check_stride() -> u32 {
    DEFAULTS.search.rollout_check_stride
}
pub fn progress_log_interval() -> u64 {
    DEFAULTS.search.progress_log_interval
}
pub fn max_simulations() -> Option<u64> {
    DEFAULTS.search.max_simulations
}

// Log
pub fn log_level() -> &'static str {
    &DEFAULTS.log.level
}
