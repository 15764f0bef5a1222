//! Shared utilities for two-player game implementations
//!
//! Both bundled board games track their result as a compact winner indicator;
//! this module turns that indicator into the per-player utility vectors the
//! agent consumes, so the games agree on one encoding and one payoff scheme.

/// Winner indicator values shared by the two-player games.
///
/// The indicator is `0` while the game is running, the winning player's
/// number once decided, or `3` for a draw.
pub mod winner {
    /// Game still in progress
    pub const ONGOING: u8 = 0;
    /// First player won
    pub const PLAYER_ONE: u8 = 1;
    /// Second player won
    pub const PLAYER_TWO: u8 = 2;
    /// Drawn game
    pub const DRAW: u8 = 3;
}

/// Terminal per-player utilities for a decided two-player game.
///
/// Returns `None` while the game is still running. A win pays the winner
/// `1.0` and the loser `0.0`; a draw pays both `0.5`.
///
/// # Example
/// ```
/// use agent_core::two_player::{terminal_utilities, winner};
///
/// // Player 1 won
/// assert_eq!(terminal_utilities(winner::PLAYER_ONE), Some([1.0, 0.0]));
///
/// // Draw
/// assert_eq!(terminal_utilities(winner::DRAW), Some([0.5, 0.5]));
///
/// // Game still in progress
/// assert_eq!(terminal_utilities(winner::ONGOING), None);
/// ```
#[inline]
pub fn terminal_utilities(winner: u8) -> Option<[f64; 2]> {
    match winner {
        self::winner::PLAYER_ONE => Some([1.0, 0.0]),
        self::winner::PLAYER_TWO => Some([0.0, 1.0]),
        self::winner::DRAW => Some([0.5, 0.5]),
        _ => None,
    }
}

/// Per-player utilities for any two-player position.
///
/// Decided positions report their terminal utilities; running positions
/// report the neutral `[0.5, 0.5]`.
///
/// # Example
/// ```
/// use agent_core::two_player::{utility_pair, winner};
///
/// assert_eq!(utility_pair(winner::PLAYER_TWO), [0.0, 1.0]);
/// assert_eq!(utility_pair(winner::ONGOING), [0.5, 0.5]);
/// ```
#[inline]
pub fn utility_pair(winner: u8) -> [f64; 2] {
    terminal_utilities(winner).unwrap_or([0.5, 0.5])
}
