//! TicTacToe implementation of the `game-core` Game trait
//!
//! The canonical two-player decision game: no chance nodes, terminal returns
//! of `[+1, -1]`, `[-1, +1]` or `[0, 0]`. Used as the reference game for
//! search tests and benchmarks.

use game_core::{Dynamics, Game, GameType, PlayerId, RewardModel};

/// TicTacToe game state
///
/// Board cells are `0` = empty, `1` = X, `2` = O. X always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation, row-major from the top-left corner
    board: [u8; 9],
    /// Mark of the player to move: 1=X, 2=O
    to_move: u8,
    /// Winner: 0=ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            to_move: 1,
            winner: 0,
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Empty positions, in board order
    pub fn open_cells(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }
        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Place the current player's mark at `position`.
    ///
    /// Callers only pass actions previously listed as legal.
    fn place(&mut self, position: u8) {
        self.board[position as usize] = self.to_move;
        self.winner = Self::check_winner(&self.board);
        if self.winner == 0 {
            self.to_move = if self.to_move == 1 { 2 } else { 1 };
        }
    }

    /// Check for a winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            [0, 4, 8],
            [2, 4, 6],
        ];

        for line in &LINES {
            let mark = board[line[0]];
            if mark != 0 && board[line[1]] == mark && board[line[2]] == mark {
                return mark;
            }
        }

        if board.iter().all(|&cell| cell != 0) {
            3 // draw
        } else {
            0
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// TicTacToe rules object.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicTacToe;

impl TicTacToe {
    pub fn new() -> Self {
        Self
    }
}

impl Game for TicTacToe {
    type State = State;
    type Action = u8;

    fn num_players(&self) -> usize {
        2
    }

    fn max_utility(&self) -> f64 {
        1.0
    }

    fn game_type(&self) -> GameType {
        GameType {
            dynamics: Dynamics::Sequential,
            reward_model: RewardModel::Terminal,
        }
    }

    fn initial_state(&self) -> State {
        State::new()
    }

    fn current_player(&self, state: &State) -> PlayerId {
        PlayerId::Player(state.to_move as usize - 1)
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.is_done()
    }

    fn legal_actions(&self, state: &State) -> Vec<u8> {
        state.open_cells()
    }

    fn chance_outcomes(&self, _state: &State) -> Vec<(u8, f64)> {
        Vec::new()
    }

    fn apply_action(&self, state: &mut State, action: u8) {
        state.place(action);
    }

    fn returns(&self, state: &State) -> Vec<f64> {
        match state.winner {
            1 => vec![1.0, -1.0],
            2 => vec![-1.0, 1.0],
            _ => vec![0.0, 0.0],
        }
    }

    fn action_to_string(&self, player: PlayerId, action: u8) -> String {
        let mark = match player {
            PlayerId::Player(0) => 'x',
            _ => 'o',
        };
        format!("{}({},{})", mark, action / 3, action % 3)
    }
}
