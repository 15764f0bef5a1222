//! Connect Four game implementation for the MCTS agent
//!
//! Standard 7x6 Connect Four with gravity. Columns are indexed 0-6 from the
//! left, rows 0-5 from the bottom. The crate implements the `GameState` trait
//! so the agent can search it directly.
//!
//! # Usage
//!
//! ```rust
//! use agent_core::GameState;
//! use games_connect4::Connect4;
//!
//! let state = Connect4::new();
//! assert_eq!(state.possible_actions().len(), 7);
//!
//! // Red drops in the center column
//! let state = state.apply(&3);
//! assert_eq!(state.previous_action(), Some(3));
//! ```

use agent_core::two_player::{terminal_utilities, utility_pair, winner};
use agent_core::{ActionRecord, GameState};

/// Number of columns on the board
pub const COLS: usize = 7;
/// Number of rows in each column
pub const ROWS: usize = 6;
/// Total number of cells
pub const BOARD_SIZE: usize = COLS * ROWS;

/// Connect Four game state
///
/// Holds the board, per-column fill heights and the action history
/// bookkeeping the agent needs for root relocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connect4 {
    /// Board representation: 0=empty, 1=red, 2=yellow. Row-major with
    /// row 0 at the bottom, so cell (col, row) lives at `row * COLS + col`.
    board: [u8; BOARD_SIZE],
    /// Current player: 1=red, 2=yellow
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=red, 2=yellow, 3=draw
    winner: u8,
    /// Number of pieces already dropped into each column
    column_heights: [u8; COLS],
    /// Mover and column of the move that produced this state
    last_move: Option<(u8, u8)>,
    /// Moves played so far
    moves_played: u8,
}

impl Connect4 {
    /// Line directions checked for a win: horizontal, vertical and the
    /// two diagonals.
    const DIRECTIONS: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; BOARD_SIZE],
            current_player: 1, // Red goes first
            winner: winner::ONGOING,
            column_heights: [0; COLS],
            last_move: None,
            moves_played: 0,
        }
    }

    /// Index of cell (col, row) in the board array
    #[inline]
    fn pos(col: usize, row: usize) -> usize {
        row * COLS + col
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != winner::ONGOING
    }

    /// Get legal moves (columns that are not full)
    pub fn legal_moves(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..COLS as u8)
            .filter(|&col| self.column_heights[col as usize] < ROWS as u8)
            .collect()
    }

    /// Bit-mask representation of legal moves.
    ///
    /// Bits 0-6 correspond to columns 0-6. A bit set to 1 indicates the column
    /// still has room. When the game is finished the mask is zeroed.
    pub fn legal_moves_mask(&self) -> u8 {
        if self.is_done() {
            return 0;
        }

        self.column_heights
            .iter()
            .enumerate()
            .fold(0u8, |mask, (col, height)| {
                if (*height as usize) < ROWS {
                    mask | (1u8 << col)
                } else {
                    mask
                }
            })
    }

    /// Drop a piece into a column and return the new state
    pub fn drop_piece(&self, column: u8) -> Connect4 {
        let col = column as usize;
        if self.is_done() || col >= COLS || self.column_heights[col] as usize >= ROWS {
            return self.clone(); // Invalid move, return unchanged state
        }

        let row = self.column_heights[col] as usize;
        let mut new_state = self.clone();
        new_state.board[Self::pos(col, row)] = self.current_player;
        new_state.column_heights[col] += 1;
        new_state.last_move = Some((self.current_player, column));
        new_state.moves_played = self.moves_played + 1;

        // Check for winner around the placed piece
        new_state.check_winner_at(col, row);

        // Switch player if game not over
        if new_state.winner == winner::ONGOING {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        new_state
    }

    /// Update `winner` after a piece landed at (col, row).
    ///
    /// Counts the run through the placed piece in each direction; a run of
    /// four or more decides the game. A full board with no run is a draw.
    fn check_winner_at(&mut self, col: usize, row: usize) {
        let player = self.board[Self::pos(col, row)];
        if player != 0 {
            for (dc, dr) in Self::DIRECTIONS {
                let mut count = 1;
                for step in [1i32, -1] {
                    let mut c = col as i32 + dc * step;
                    let mut r = row as i32 + dr * step;
                    while c >= 0
                        && c < COLS as i32
                        && r >= 0
                        && r < ROWS as i32
                        && self.board[Self::pos(c as usize, r as usize)] == player
                    {
                        count += 1;
                        c += dc * step;
                        r += dr * step;
                    }
                }
                if count >= 4 {
                    self.winner = player;
                    return;
                }
            }
        }

        // Check for draw (every column full but no run of four)
        if self.column_heights.iter().all(|&h| h as usize >= ROWS) {
            self.winner = winner::DRAW;
        }
    }

    /// Per-player heuristic scores based on still-winnable windows.
    ///
    /// Every four-cell window occupied by only one player contributes the
    /// square of that player's piece count; decided games report their
    /// terminal utilities.
    fn heuristic_pair(&self) -> [f64; 2] {
        if let Some(utilities) = terminal_utilities(self.winner) {
            return utilities;
        }

        let mut scores = [0.0f64; 2];
        for col in 0..COLS {
            for row in 0..ROWS {
                for (dc, dr) in Self::DIRECTIONS {
                    let end_col = col as i32 + 3 * dc;
                    let end_row = row as i32 + 3 * dr;
                    if end_col >= COLS as i32 || end_row < 0 || end_row >= ROWS as i32 {
                        continue;
                    }

                    let mut counts = [0u32; 2];
                    for step in 0..4i32 {
                        let c = (col as i32 + dc * step) as usize;
                        let r = (row as i32 + dr * step) as usize;
                        match self.board[Self::pos(c, r)] {
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
            }
        }

        // Keep scores strictly below the terminal utilities so a proven win
        // always outranks a threat.
        [scores[0] / 700.0, scores[1] / 700.0]
    }
}

impl Default for Connect4 {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for Connect4 {
    type Action = u8;

    fn possible_actions(&self) -> Vec<u8> {
        self.legal_moves()
    }

    fn apply(&self, action: &u8) -> Self {
        self.drop_piece(*action)
    }

    fn apply_chance(&self) -> Self {
        // No chance turns in Connect Four
        self.clone()
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
        self.last_move.map(|(_, column)| column)
    }

    fn previous_action_record(&self) -> Option<ActionRecord<u8>> {
        self.last_move
            .map(|(player, column)| ActionRecord::new((player - 1) as i32, column))
    }

    fn actions_taken(&self) -> usize {
        self.moves_played as usize
    }
}
