//! Capability trait for immutable game-state values
//!
//! The agent is generic over this trait rather than over a class of games: a
//! state knows its legal actions, how to transition, whether it is finished
//! and how good it is for each player. States are values; transitions return
//! a new state and leave the source untouched.

/// Record of a taken action together with the player who took it.
///
/// Games expose the record of their most recent transition so an agent can
/// match an already-explored branch against the actual move history when it
/// relocates its search root.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord<A> {
    /// Player that took the action (negative for environment/chance actors).
    pub player: i32,
    /// The action itself.
    pub action: A,
}

impl<A> ActionRecord<A> {
    /// Create a record for `action` taken by `player`.
    pub fn new(player: i32, action: A) -> Self {
        Self { player, action }
    }
}

/// Main trait for game-state implementations
///
/// A `GameState` is the position after a sequence of actions. All transition
/// methods are value-to-value: `apply` and `apply_chance` build the successor
/// position without mutating the receiver, so a search tree can hold
/// snapshots at every node.
///
/// Implementations must return `possible_actions` in a stable, game-defined
/// order. The agent threads a seeded generator through every random choice it
/// makes; a stable action order is what keeps those choices reproducible.
///
/// # Example
///
/// ```rust
/// # use agent_core::game::{ActionRecord, GameState};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct CoinRace {
///     position: u8,
///     to_move: i32,
/// }
///
/// impl GameState for CoinRace {
///     type Action = u8;
///
///     // Implementation methods...
/// #   fn possible_actions(&self) -> Vec<u8> { todo!() }
/// #   fn apply(&self, _action: &u8) -> Self { todo!() }
/// #   fn apply_chance(&self) -> Self { todo!() }
/// #   fn is_over(&self) -> bool { todo!() }
/// #   fn current_player(&self) -> i32 { todo!() }
/// #   fn num_players(&self) -> usize { todo!() }
/// #   fn utility_vector(&self) -> Vec<f64> { todo!() }
/// #   fn previous_action(&self) -> Option<u8> { todo!() }
/// #   fn previous_action_record(&self) -> Option<ActionRecord<u8>> { todo!() }
/// #   fn actions_taken(&self) -> usize { todo!() }
/// }
/// ```
pub trait GameState: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static {
    /// Action type - should be small and cheap to clone
    type Action: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static;

    /// Legal actions from this state, in a stable game-defined order.
    ///
    /// Terminal states return an empty list.
    fn possible_actions(&self) -> Vec<Self::Action>;

    /// Apply a legal action, returning the successor state.
    ///
    /// Callers only pass actions obtained from `possible_actions` on the same
    /// state; behavior for other actions is game-defined.
    fn apply(&self, action: &Self::Action) -> Self;

    /// Take the forced environment/chance transition.
    ///
    /// Only called when `current_player` is negative. Games without chance
    /// turns never report a negative player and may implement this as a
    /// plain clone.
    fn apply_chance(&self) -> Self;

    /// Whether this state is terminal (no further actions possible).
    fn is_over(&self) -> bool;

    /// Player to move. A negative value is the sentinel for an
    /// environment/chance turn.
    fn current_player(&self) -> i32;

    /// Number of players in the game.
    fn num_players(&self) -> usize;

    /// Per-player utility of this state.
    ///
    /// For terminal states this is the definitive outcome, one entry per
    /// player. Non-terminal states report a neutral estimate.
    fn utility_vector(&self) -> Vec<f64>;

    /// Utility of this state under a per-player weight vector.
    ///
    /// The default is the weighted sum of `utility_vector`; under min-max
    /// weights this is positive for positions the searching player has won
    /// and negative for positions it has lost.
    fn utility_value(&self, weights: &[f64]) -> f64 {
        self.utility_vector()
            .iter()
            .zip(weights)
            .map(|(u, w)| u * w)
            .sum()
    }

    /// Heuristic estimate of this state under a per-player weight vector.
    ///
    /// Games with a position evaluator override this; the default falls back
    /// to `utility_value`.
    fn heuristic_value(&self, weights: &[f64]) -> f64 {
        self.utility_value(weights)
    }

    /// The action that produced this state, if any.
    fn previous_action(&self) -> Option<Self::Action>;

    /// Record of the transition that produced this state, if any.
    fn previous_action_record(&self) -> Option<ActionRecord<Self::Action>>;

    /// Total number of actions taken since the initial position.
    fn actions_taken(&self) -> usize;
}

/// Build the min-max weight vector for a searching player.
///
/// The searching player's own utility counts positively, every opponent's
/// negatively. This is the evaluation context an agent installs at setup and
/// passes to `utility_value`/`heuristic_value` throughout a search.
///
/// # Arguments
///
/// * `num_players` - Number of players in the game
/// * `player_id` - The searching player's id
pub fn min_max_weights(num_players: usize, player_id: i32) -> Vec<f64> {
    (0..num_players)
        .map(|p| if p as i32 == player_id { 1.0 } else { -1.0 })
        .collect()
}
