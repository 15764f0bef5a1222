//! Monte Carlo tree search over the [`agent_core::GameState`] trait.
//!
//! The agent keeps a single arena-backed tree per match. Every call to
//! [`MctsAgent::compute_next_action`] roots the tree at the given state,
//! reusing the statistics gathered on earlier turns when the state is a known
//! descendant, then runs the four phases in a loop until the time budget
//! expires or the simulation cap is hit:
//!
//! 1. **Selection**: descend from the root by UCT, balancing exploitation
//!    against exploration
//! 2. **Expansion**: add a child to the selected leaf for each legal action
//! 3. **Simulation**: play the most promising new child to the end of the
//!    game with the rollout policy
//! 4. **Backpropagation**: update play and win counters on the ancestors of
//!    the simulated node
//!
//! Searches can be aborted from another thread through a [`CancelHandle`].
//!
//! # Usage
//!
//! ```
//! use games_tictactoe::TicTacToe;
//! use mcts::{MctsAgent, MctsConfig};
//! use std::time::Duration;
//!
//! let config = MctsConfig::default().with_max_simulations(64);
//! let mut agent: MctsAgent<TicTacToe> = MctsAgent::new(config);
//! agent.set_up(2, 0);
//!
//! let action = agent
//!     .compute_next_action(&TicTacToe::new(), Duration::from_secs(1))
//!     .unwrap();
//! assert!(action < 9);
//! ```

pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod select;
pub mod stats;
pub mod time;
pub mod tree;

pub use config::MctsConfig;
pub use node::{NodeId, SearchNode};
pub use rollout::{classify_win, RandomRollout, RolloutPolicy};
pub use search::{MctsAgent, SearchError};
pub use select::{heuristic_order, max_first, move_order, node_uct, selection_order, uct_score};
pub use stats::SearchStatistics;
pub use time::{CancelHandle, TimeBudget};
pub use tree::{SearchTree, TreeStats};
