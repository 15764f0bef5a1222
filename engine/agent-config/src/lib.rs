//! Centralized configuration loading from agent.toml.
//!
//! This crate provides configuration structs and loading logic shared
//! across the agent components.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`AGENT_<SECTION>_<KEY>`)
//! 2. agent.toml file
//! 3. Built-in defaults (config.defaults.toml, embedded at compile time)
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! AGENT_<SECTION>_<KEY>=value
//!
//! Examples:
//!     AGENT_SEARCH_SEED=7
//!     AGENT_SEARCH_EXPLOITATION_CONSTANT=2.0
//!     AGENT_SEARCH_MAX_SIMULATIONS=10000
//!     AGENT_LOG_LEVEL=debug
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{apply_env_overrides, load_config, load_from_path, CONFIG_SEARCH_PATHS};
pub use structs::*;
