//! Pig implementation of the `game-core` Game trait
//!
//! Two-player jeopardy dice game. On their turn a player either *holds*,
//! banking the running turn total, or *rolls*. A roll is a chance event with
//! six equiprobable faces: face 1 wipes the turn total and passes the turn,
//! any other face adds to it. First player to bank `goal` points wins.
//!
//! Pig is the smallest game in the catalog that exercises chance nodes, so
//! the search tests use it to cover probabilistic descent and chance-node
//! solving.

use game_core::{Dynamics, Game, GameType, PlayerId, RewardModel};

/// One move in Pig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Bank the turn total and pass the turn.
    Hold,
    /// Ask for a die roll (leads to a chance node).
    Roll,
    /// Chance outcome: the face that came up.
    Face(u8),
}

/// Pig game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Banked score per player.
    scores: [u32; 2],
    /// Points accumulated this turn, not yet banked.
    turn_total: u32,
    /// Seat of the player whose turn it is.
    to_move: u8,
    /// A roll was requested and the die is in the air.
    rolling: bool,
    /// Winning seat, if any.
    winner: Option<u8>,
}

impl State {
    fn new() -> Self {
        Self {
            scores: [0, 0],
            turn_total: 0,
            to_move: 0,
            rolling: false,
            winner: None,
        }
    }

    pub fn score(&self, seat: usize) -> u32 {
        self.scores[seat]
    }

    pub fn turn_total(&self) -> u32 {
        self.turn_total
    }

    fn pass_turn(&mut self) {
        self.turn_total = 0;
        self.to_move = 1 - self.to_move;
    }
}

/// Pig rules object.
#[derive(Debug, Clone, Copy)]
pub struct Pig {
    goal: u32,
}

impl Pig {
    /// Standard game to 100 points.
    pub fn new() -> Self {
        Self::with_goal(100)
    }

    /// Shorter race, handy for tests and fast matches.
    pub fn with_goal(goal: u32) -> Self {
        Self { goal }
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }
}

impl Default for Pig {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for Pig {
    type State = State;
    type Action = Action;

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
        if state.rolling {
            PlayerId::Chance
        } else {
            PlayerId::Player(state.to_move as usize)
        }
    }

    fn is_terminal(&self, state: &State) -> bool {
        state.winner.is_some()
    }

    fn legal_actions(&self, state: &State) -> Vec<Action> {
        if self.is_terminal(state) || state.rolling {
            Vec::new()
        } else {
            vec![Action::Roll, Action::Hold]
        }
    }

    fn chance_outcomes(&self, state: &State) -> Vec<(Action, f64)> {
        if !state.rolling {
            return Vec::new();
        }
        (1..=6).map(|face| (Action::Face(face), 1.0 / 6.0)).collect()
    }

    fn apply_action(&self, state: &mut State, action: Action) {
        match action {
            Action::Roll => {
                state.rolling = true;
            }
            Action::Hold => {
                let seat = state.to_move as usize;
                state.scores[seat] += state.turn_total;
                if state.scores[seat] >= self.goal {
                    state.winner = Some(state.to_move);
                } else {
                    state.pass_turn();
                }
            }
            Action::Face(face) => {
                state.rolling = false;
                if face == 1 {
                    state.pass_turn();
                } else {
                    state.turn_total += u32::from(face);
                }
            }
        }
    }

    fn returns(&self, state: &State) -> Vec<f64> {
        match state.winner {
            Some(0) => vec![1.0, -1.0],
            Some(_) => vec![-1.0, 1.0],
            None => vec![0.0, 0.0],
        }
    }

    fn action_to_string(&self, _player: PlayerId, action: Action) -> String {
        match action {
            Action::Hold => "hold".to_string(),
            Action::Roll => "roll".to_string(),
            Action::Face(face) => face.to_string(),
        }
    }
}
