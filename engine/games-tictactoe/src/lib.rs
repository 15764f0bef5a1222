//! TicTacToe game implementation for the MCTS agent
//!
//! This crate provides a complete reference implementation of TicTacToe
//! demonstrating how to implement the `GameState` trait for the agent.
//!
//! # Usage
//!
//! ```rust
//! use agent_core::GameState;
//! use games_tictactoe::TicTacToe;
//!
//! let state = TicTacToe::new();
//! assert_eq!(state.possible_actions().len(), 9);
//!
//! // X takes the center
//! let state = state.apply(&4);
//! assert_eq!(state.previous_action(), Some(4));
//! ```

use agent_core::two_player::{terminal_utilities, utility_pair, winner};
use agent_core::{ActionRecord, GameState};

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, winner information and the action history bookkeeping the
/// agent needs for root relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicTacToe {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
    /// Mover and position of the move that produced this state
    last_move: Option<(u8, u8)>,
    /// Moves played so far
    moves_played: u8,
}

impl TicTacToe {
    /// Winning positions (rows, columns, diagonals)
    const LINES: [[usize; 3]; 8] = [
        [0, 1, 2],
        [3, 4, 5],
        [6, 7, 8], // rows
        [0, 3, 6],
        [1, 4, 7],
        [2, 5, 8], // columns
        [0, 4, 8],
        [2, 4, 6], // diagonals
    ];

    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: winner::ONGOING,
            last_move: None,
            moves_played: 0,
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != winner::ONGOING
    }

    /// Get legal moves (empty positions)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Bit-mask representation of legal moves.
    ///
    /// Bits 0-8 correspond to board positions 0-8. A bit set to 1 indicates the
    /// position is currently legal. When the game is finished the mask is zeroed.
    pub fn legal_moves_mask(&self) -> u16 {
        if self.is_done() {
            return 0;
        }

        self.board
            .iter()
            .enumerate()
            .fold(0u16, |mask, (idx, cell)| {
                if *cell == 0 {
                    mask | (1u16 << idx)
                } else {
                    mask
                }
            })
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> TicTacToe {
        if self.is_done() || position >= 9 || self.board[position as usize] != 0 {
            return *self; // Invalid move, return unchanged state
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;
        new_state.last_move = Some((self.current_player, position));
        new_state.moves_played = self.moves_played + 1;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == winner::ONGOING {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        for line in &Self::LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return winner::DRAW;
        }

        winner::ONGOING
    }

    /// Per-player heuristic scores based on still-winnable lines.
    ///
    /// Each line occupied by only one player contributes the square of that
    /// player's piece count; decided games report their terminal utilities.
    fn heuristic_pair(&self) -> [f64; 2] {
        if let Some(utilities) = terminal_utilities(self.winner) {
            return utilities;
        }

        let mut scores = [0.0f64; 2];
        for line in &Self::LINES {
            let mut counts = [0u32; 2];
            for &pos in line {
                match self.board[pos] {
                    1 => counts[0] += 1,
                    2 => counts[1] += 1,
                    _ => {}
                }
            }
            if counts[1] == 0 && counts[0] > 0 {
                scores[0] += (counts[0] * counts[0]) as f64;
            }
            if counts[0] == 0 && counts[1] > 0 {
                scores[1] += (counts[1] * counts[1]) as f64;
            }
        }

        // Keep scores strictly below the terminal utilities so a proven win
        // always outranks a threat.
        [scores[0] / 36.0, scores[1] / 36.0]
    }
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for TicTacToe {
    type Action = u8;

    fn possible_actions(&self) -> Vec<u8> {
        self.legal_moves()
    }

    fn apply(&self, action: &u8) -> Self {
        self.make_move(*action)
    }

    fn apply_chance(&self) -> Self {
        // No chance turns in tic-tac-toe
        *self
    }

    fn is_over(&self) -> bool {
        self.is_done()
    }

    fn current_player(&self) -> i32 {
        (self.current_player - 1) as i32
    }

    fn num_players(&self) -> usize {
        2
    }

    fn utility_vector(&self) -> Vec<f64> {
        utility_pair(self.winner).to_vec()
    }

    fn heuristic_value(&self, weights: &[f64]) -> f64 {
        self.heuristic_pair()
            .iter()
            .zip(weights)
            .map(|(h, w)| h * w)
            .sum()
    }

    fn previous_action(&self) -> Option<u8> {
        self.last_move.map(|(_, position)| position)
    }

    fn previous_action_record(&self) -> Option<ActionRecord<u8>> {
        self.last_move
            .map(|(player, position)| ActionRecord::new((player - 1) as i32, position))
    }

    fn actions_taken(&self) -> usize {
        self.moves_played as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::min_max_weights;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn test_initial_state() {
        let state = TicTacToe::new();
        assert_eq!(state.board, [0; 9]);
        assert_eq!(state.current_player, 1);
        assert_eq!(state.winner, winner::ONGOING);
        assert!(!state.is_done());
        assert_eq!(state.actions_taken(), 0);
        assert_eq!(state.previous_action(), None);
        assert_eq!(state.previous_action_record(), None);
    }

    #[test]
    fn test_legal_moves() {
        let state = TicTacToe::new();
        let legal = state.legal_moves();
        assert_eq!(legal, (0..9).collect::<Vec<_>>());
        assert_eq!(state.legal_moves_mask(), 0x1FFu16);

        // After one move
        let state = state.make_move(4); // Center
        let legal = state.legal_moves();
        assert_eq!(legal.len(), 8);
        assert!(!legal.contains(&4));
        assert_eq!(state.legal_moves_mask(), 0x1FFu16 & !(1u16 << 4));
    }

    #[test]
    fn test_make_move() {
        let state = TicTacToe::new();
        let new_state = state.make_move(4); // X places in center

        assert_eq!(new_state.board[4], 1);
        assert_eq!(new_state.current_player, 2); // Now O's turn
        assert!(!new_state.is_done());
        assert_eq!(new_state.actions_taken(), 1);
        assert_eq!(new_state.previous_action(), Some(4));
    }

    #[test]
    fn test_invalid_move() {
        let state = TicTacToe::new();
        let state_with_move = state.make_move(4);

        // Try to place in same position
        let invalid_state = state_with_move.make_move(4);
        assert_eq!(invalid_state, state_with_move); // Should be unchanged
    }

    #[test]
    fn test_winning_game() {
        let mut state = TicTacToe::new();

        // X wins with top row
        state = state.make_move(0); // X
        state = state.make_move(3); // O
        state = state.make_move(1); // X
        state = state.make_move(4); // O
        state = state.make_move(2); // X wins

        assert_eq!(state.winner, winner::PLAYER_ONE);
        assert!(state.is_done());
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.utility_vector(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_draw_game() {
        // Board: X O X / O X O / O X O
        let board = [1, 2, 1, 2, 1, 2, 2, 1, 2];
        let detected_winner = TicTacToe::check_winner(&board);
        assert_eq!(detected_winner, winner::DRAW);

        let state = TicTacToe {
            board,
            current_player: 1,
            winner: detected_winner,
            last_move: Some((1, 7)),
            moves_played: 9,
        };
        assert!(state.is_done());
        assert_eq!(state.utility_vector(), vec![0.5, 0.5]);
    }

    /// All 8 winning lines should be detected correctly
    #[test]
    fn test_all_winning_lines() {
        for (line_idx, line) in TicTacToe::LINES.iter().enumerate() {
            // Test X wins on this line
            let mut board_x = [0u8; 9];
            for &pos in line {
                board_x[pos] = 1; // X
            }
            let detected = TicTacToe::check_winner(&board_x);
            assert_eq!(
                detected,
                winner::PLAYER_ONE,
                "X should win on line {}: {:?}",
                line_idx,
                line
            );

            // Test O wins on this line
            let mut board_o = [0u8; 9];
            for &pos in line {
                board_o[pos] = 2; // O
            }
            let detected = TicTacToe::check_winner(&board_o);
            assert_eq!(
                detected,
                winner::PLAYER_TWO,
                "O should win on line {}: {:?}",
                line_idx,
                line
            );
        }
    }

    /// Legal move mask should match legal_moves vector
    #[test]
    fn test_legal_moves_mask_consistency() {
        let boards = [
            [0, 0, 0, 0, 0, 0, 0, 0, 0], // Empty
            [1, 0, 0, 0, 0, 0, 0, 0, 0], // One move
            [1, 2, 1, 2, 0, 0, 0, 0, 0], // Four moves
            [1, 2, 1, 2, 1, 2, 0, 0, 0], // Six moves
            [1, 2, 1, 2, 1, 2, 2, 1, 0], // Eight moves
        ];

        for board in &boards {
            let moves_played = board.iter().filter(|&&cell| cell != 0).count() as u8;
            let state = TicTacToe {
                board: *board,
                current_player: 1,
                winner: winner::ONGOING,
                last_move: None,
                moves_played,
            };

            let legal_vec = state.legal_moves();
            let legal_mask = state.legal_moves_mask();

            for pos in 0..9u8 {
                let is_in_vec = legal_vec.contains(&pos);
                let is_in_mask = (legal_mask & (1u16 << pos)) != 0;
                assert_eq!(
                    is_in_vec, is_in_mask,
                    "Mismatch at pos {} for board {:?}",
                    pos, board
                );
            }

            assert_eq!(
                legal_vec.len(),
                legal_mask.count_ones() as usize,
                "Count mismatch for board {:?}",
                board
            );
        }
    }

    /// No moves allowed on finished game
    #[test]
    fn test_no_moves_after_game_over() {
        let state = TicTacToe {
            board: [1, 1, 1, 2, 2, 0, 0, 0, 0],
            current_player: 2,
            winner: winner::PLAYER_ONE,
            last_move: Some((1, 2)),
            moves_played: 5,
        };

        assert!(state.is_done());
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.legal_moves_mask(), 0);

        // Attempting a move should return unchanged state
        let new_state = state.make_move(5);
        assert_eq!(new_state, state);
    }

    #[test]
    fn test_trait_action_history() {
        let state = TicTacToe::new().apply(&4).apply(&0);

        assert_eq!(state.actions_taken(), 2);
        // O (player 1 in agent numbering) made the last move
        assert_eq!(state.previous_action(), Some(0));
        assert_eq!(state.previous_action_record(), Some(ActionRecord::new(1, 0)));
    }

    #[test]
    fn test_current_player_is_zero_based() {
        let state = TicTacToe::new();
        assert_eq!(GameState::current_player(&state), 0); // X

        let state = state.apply(&4);
        assert_eq!(GameState::current_player(&state), 1); // O
    }

    #[test]
    fn test_utility_values_under_min_max_weights() {
        // X wins with the top row
        let state = TicTacToe::new()
            .apply(&0)
            .apply(&3)
            .apply(&1)
            .apply(&4)
            .apply(&2);
        assert!(state.is_over());

        assert_eq!(state.utility_value(&min_max_weights(2, 0)), 1.0);
        assert_eq!(state.utility_value(&min_max_weights(2, 1)), -1.0);
    }

    #[test]
    fn test_heuristic_prefers_threats() {
        let weights = min_max_weights(2, 0);
        let empty = TicTacToe::new();

        // X on 0 and 1: a live two-in-a-row threat
        let threat = TicTacToe::new().apply(&0).apply(&4).apply(&1);

        assert!(
            threat.heuristic_value(&weights) > empty.heuristic_value(&weights),
            "a live threat should score higher than the empty board"
        );
    }

    #[test]
    fn test_heuristic_matches_utility_when_decided() {
        let won = TicTacToe::new()
            .apply(&0)
            .apply(&3)
            .apply(&1)
            .apply(&4)
            .apply(&2);
        let weights = min_max_weights(2, 0);

        assert_eq!(won.heuristic_value(&weights), won.utility_value(&weights));
    }

    /// Play many random games and verify invariants hold
    #[test]
    fn test_random_games_invariants() {
        for seed in 0..50 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut state = TicTacToe::new();
            let mut move_count = 0;

            while !state.is_done() && move_count < 9 {
                let legal = state.legal_moves();
                assert!(
                    !legal.is_empty(),
                    "Non-done game must have legal moves (seed={}, moves={})",
                    seed,
                    move_count
                );

                let prev_player = state.current_player;
                let action = legal[rng.gen_range(0..legal.len())];
                state = state.make_move(action);
                move_count += 1;

                assert_eq!(state.actions_taken(), move_count);
                assert_eq!(state.previous_action(), Some(action));

                if state.is_done() {
                    assert!(
                        state.winner != winner::ONGOING,
                        "Done game must have winner (seed={})",
                        seed
                    );
                    assert!(
                        state.legal_moves().is_empty(),
                        "Done game must have no legal moves (seed={})",
                        seed
                    );
                } else {
                    assert_ne!(
                        state.current_player, prev_player,
                        "Player should switch after move (seed={})",
                        seed
                    );
                }
            }

            assert!(
                state.is_done(),
                "Game should finish within 9 moves (seed={})",
                seed
            );
        }
    }
}
