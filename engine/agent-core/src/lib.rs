//! Core abstractions for turn-based game agents
//!
//! This crate provides the contract between the search agent and the games it
//! plays:
//! - `GameState`: capability trait for immutable game-state values
//! - `ActionRecord`: who took which action, used for root relocation matching
//! - `min_max_weights`: the per-player weight vector built at agent setup
//! - `two_player`: shared utility helpers for two-player zero-sum games

pub mod game;
pub mod two_player;

// Re-export main types for convenience
pub use game::{min_max_weights, ActionRecord, GameState};
