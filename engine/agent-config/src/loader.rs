//! Configuration loading logic.
//!
//! Handles loading config from files and applying environment variable overrides.

use crate::AgentConfig;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Standard locations to search for agent.toml
pub const CONFIG_SEARCH_PATHS: &[&str] = &[
    "agent.toml",      // Current directory
    "../agent.toml",   // Parent directory (when running from subdirectory)
    "/app/agent.toml", // Container deployments
];

/// Load the agent configuration from agent.toml.
///
/// Searches for agent.toml in the following order:
/// 1. Path specified by AGENT_CONFIG environment variable
/// 2. Current directory (agent.toml)
/// 3. Parent directory (../agent.toml)
/// 4. Container path (/app/agent.toml)
///
/// After loading, environment variable overrides are applied. Never fails:
/// unreadable or invalid files fall back to the built-in defaults.
pub fn load_config() -> AgentConfig {
    // Check for explicit config path
    if let Ok(path) = std::env::var("AGENT_CONFIG") {
        let path = PathBuf::from(&path);
        if path.exists() {
            info!("Loading config from AGENT_CONFIG: {}", path.display());
            return load_from_path(&path);
        }
        warn!(
            "AGENT_CONFIG={} not found, searching defaults",
            path.display()
        );
    }

    // Search default locations
    for path_str in CONFIG_SEARCH_PATHS {
        let path = PathBuf::from(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_from_path(&path);
        }
    }

    // Fall back to defaults
    debug!("No agent.toml found, using built-in defaults");
    apply_env_overrides(AgentConfig::default())
}

/// Load configuration from a specific path.
pub fn load_from_path(path: &PathBuf) -> AgentConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => apply_env_overrides(config),
            Err(e) => {
                warn!("Failed to parse {}: {}, using defaults", path.display(), e);
                apply_env_overrides(AgentConfig::default())
            }
        },
        Err(e) => {
            warn!("Failed to read {}: {}, using defaults", path.display(), e);
            apply_env_overrides(AgentConfig::default())
        }
    }
}

/// Macro to reduce env override boilerplate
macro_rules! env_override {
    // String field
    ($config:expr, $section:ident . $field:ident, $key:expr) => {
        if let Ok(v) = std::env::var($key) {
            $config.$section.$field = v;
        }
    };
    // Parseable field (u32, u64, f64, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = v;
        }
    };
    // Optional parseable field (Option<u64>, etc.)
    ($config:expr, $section:ident . $field:ident, $key:expr, optional_parse) => {
        if let Ok(v) =
            std::env::var($key).and_then(|s| s.parse().map_err(|_| std::env::VarError::NotPresent))
        {
            $config.$section.$field = Some(v);
        }
    };
}

/// Apply environment variable overrides to a configuration.
///
/// Environment variables follow the pattern: AGENT_<SECTION>_<KEY>
pub fn apply_env_overrides(mut config: AgentConfig) -> AgentConfig {
    // Search
    env_override!(
        config,
        search.exploitation_constant,
        "AGENT_SEARCH_EXPLOITATION_CONSTANT",
        parse
    );
    env_override!(config, search.seed, "AGENT_SEARCH_SEED", parse);
    env_override!(
        config,
        search.rollout_check_stride,
        "AGENT_SEARCH_ROLLOUT_CHECK_STRIDE",
        parse
    );
    env_override!(
        config,
        search.progress_log_interval,
        "AGENT_SEARCH_PROGRESS_LOG_INTERVAL",
        parse
    );
    env_override!(
        config,
        search.max_simulations,
        "AGENT_SEARCH_MAX_SIMULATIONS",
        optional_parse
    );

    // Log
    env_override!(config, log.level, "AGENT_LOG_LEVEL");

    config
}
