//! Playout policies estimating the value of a position.
//!
//! A rollout advances a state until the game ends or the time budget runs
//! out, and the outcome is classified as a win or a loss for the searching
//! player. The policy is a trait so callers can swap the default uniform
//! random playout for something domain-aware.

use agent_core::GameState;
use rand::Rng;
use rand_chacha::ChaCha20Rng;

use crate::time::TimeBudget;

/// Strategy for playing a state out to an outcome.
pub trait RolloutPolicy<G: GameState>: Send + Sync {
    /// Advance the state until the game is over or the budget interrupts.
    ///
    /// The returned state is terminal when the playout completed; a state cut
    /// off mid-game counts as a loss during classification.
    fn rollout(&self, state: &G, rng: &mut ChaCha20Rng, budget: &TimeBudget) -> G;
}

/// Uniform random playout.
///
/// Chance turns (negative current player) advance through `apply_chance`;
/// everything else picks a uniformly random legal action. The budget is
/// polled every `check_stride` steps to keep clock reads off the hot path.
#[derive(Debug, Clone)]
pub struct RandomRollout {
    check_stride: u32,
}

impl RandomRollout {
    /// Create a policy polling the budget every `check_stride` steps.
    pub fn new(check_stride: u32) -> Self {
        Self {
            check_stride: check_stride.max(1),
        }
    }
}

impl Default for RandomRollout {
    fn default() -> Self {
        Self::new(31)
    }
}

impl<G: GameState> RolloutPolicy<G> for RandomRollout {
    fn rollout(&self, state: &G, rng: &mut ChaCha20Rng, budget: &TimeBudget) -> G {
        let mut current = state.clone();
        let mut depth: u32 = 0;

        while !current.is_over() {
            if depth % self.check_stride == 0 && budget.should_stop() {
                break;
            }
            depth = depth.wrapping_add(1);

            if current.current_player() < 0 {
                current = current.apply_chance();
            } else {
                let actions = current.possible_actions();
                if actions.is_empty() {
                    break;
                }
                current = current.apply(&actions[rng.gen_range(0..actions.len())]);
            }
        }

        current
    }
}

/// Classify a playout outcome as a win for the given player.
///
/// A terminal state is a win when no other player scored strictly higher.
/// When every player scored the same the result is a coin flip, so repeated
/// draws split credit evenly instead of all counting one way. A state that
/// never reached the end of the game is never a win.
pub fn classify_win<G: GameState>(state: &G, player_id: usize, rng: &mut ChaCha20Rng) -> bool {
    if !state.is_over() {
        return false;
    }

    let utilities = state.utility_vector();
    let own = match utilities.get(player_id) {
        Some(&utility) => utility,
        None => return false,
    };

    let win = utilities.iter().all(|&u| u <= own);
    let all_tied = win && utilities.iter().all(|&u| u >= own);

    if all_tied {
        rng.gen_bool(0.5)
    } else {
        win
    }
}
