//! Tiny purpose-built games for exercising individual search behaviors.
#![allow(dead_code)]

use game_core::{Dynamics, Game, GameType, PlayerId, RewardModel};
use mcts::{Evaluator, EvaluatorError};

pub const SEQ_TERMINAL: GameType = GameType {
    dynamics: Dynamics::Sequential,
    reward_model: RewardModel::Terminal,
};

/// One player, one legal action, immediate win.
pub struct TrivialWin;

impl Game for TrivialWin {
    type State = bool; // moved yet?
    type Action = u8;

    fn num_players(&self) -> usize {
        1
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> bool {
        false
    }
    fn current_player(&self, _: &bool) -> PlayerId {
        PlayerId::Player(0)
    }
    fn is_terminal(&self, state: &bool) -> bool {
        *state
    }
    fn legal_actions(&self, _: &bool) -> Vec<u8> {
        vec![0]
    }
    fn chance_outcomes(&self, _: &bool) -> Vec<(u8, f64)> {
        Vec::new()
    }
    fn apply_action(&self, state: &mut bool, _: u8) {
        *state = true;
    }
    fn returns(&self, _: &bool) -> Vec<f64> {
        vec![1.0]
    }
    fn action_to_string(&self, _: PlayerId, action: u8) -> String {
        action.to_string()
    }
}

/// Two players; the mover picks action 0 (they win) or action 1 (they lose).
pub struct TwoChoice;

#[derive(Clone, Copy, Default)]
pub struct TwoChoiceState {
    pub chosen: Option<u8>,
}

impl Game for TwoChoice {
    type State = TwoChoiceState;
    type Action = u8;

    fn num_players(&self) -> usize {
        2
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> TwoChoiceState {
        TwoChoiceState::default()
    }
    fn current_player(&self, _: &TwoChoiceState) -> PlayerId {
        PlayerId::Player(0)
    }
    fn is_terminal(&self, state: &TwoChoiceState) -> bool {
        state.chosen.is_some()
    }
    fn legal_actions(&self, _: &TwoChoiceState) -> Vec<u8> {
        vec![0, 1]
    }
    fn chance_outcomes(&self, _: &TwoChoiceState) -> Vec<(u8, f64)> {
        Vec::new()
    }
    fn apply_action(&self, state: &mut TwoChoiceState, action: u8) {
        state.chosen = Some(action);
    }
    fn returns(&self, state: &TwoChoiceState) -> Vec<f64> {
        if state.chosen == Some(0) {
            vec![1.0, -1.0]
        } else {
            vec![-1.0, 1.0]
        }
    }
    fn action_to_string(&self, _: PlayerId, action: u8) -> String {
        action.to_string()
    }
}

/// One chance flip leading to a terminal worth 1 (heads) or 0 (tails).
pub struct CoinFlip;

impl Game for CoinFlip {
    type State = Option<u8>;
    type Action = u8;

    fn num_players(&self) -> usize {
        1
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> Option<u8> {
        None
    }
    fn current_player(&self, _: &Option<u8>) -> PlayerId {
        PlayerId::Chance
    }
    fn is_terminal(&self, state: &Option<u8>) -> bool {
        state.is_some()
    }
    fn legal_actions(&self, _: &Option<u8>) -> Vec<u8> {
        Vec::new()
    }
    fn chance_outcomes(&self, _: &Option<u8>) -> Vec<(u8, f64)> {
        vec![(0, 0.5), (1, 0.5)]
    }
    fn apply_action(&self, state: &mut Option<u8>, action: u8) {
        *state = Some(action);
    }
    fn returns(&self, state: &Option<u8>) -> Vec<f64> {
        vec![if *state == Some(0) { 1.0 } else { 0.0 }]
    }
    fn action_to_string(&self, _: PlayerId, action: u8) -> String {
        action.to_string()
    }
}

/// Two consecutive chance flips, every terminal worth 1. The whole game
/// tree is provably worth `[1]`, so the chance-unanimity solver rule can
/// fire at every level.
pub struct ChanceChain;

impl Game for ChanceChain {
    type State = u8; // flips resolved so far
    type Action = u8;

    fn num_players(&self) -> usize {
        1
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> u8 {
        0
    }
    fn current_player(&self, _: &u8) -> PlayerId {
        PlayerId::Chance
    }
    fn is_terminal(&self, state: &u8) -> bool {
        *state >= 2
    }
    fn legal_actions(&self, _: &u8) -> Vec<u8> {
        Vec::new()
    }
    fn chance_outcomes(&self, _: &u8) -> Vec<(u8, f64)> {
        vec![(0, 0.5), (1, 0.5)]
    }
    fn apply_action(&self, state: &mut u8, _: u8) {
        *state += 1;
    }
    fn returns(&self, _: &u8) -> Vec<f64> {
        vec![1.0]
    }
    fn action_to_string(&self, _: PlayerId, action: u8) -> String {
        action.to_string()
    }
}

/// Two arms over identical-value subtrees, two plies deep so the arms stay
/// unproven; priors come from the evaluator, so tests pair this with
/// `FixedPriorEvaluator` to try to starve one arm.
pub struct TwoArm;

impl Game for TwoArm {
    type State = u8; // plies played
    type Action = u8;

    fn num_players(&self) -> usize {
        1
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> u8 {
        0
    }
    fn current_player(&self, _: &u8) -> PlayerId {
        PlayerId::Player(0)
    }
    fn is_terminal(&self, state: &u8) -> bool {
        *state >= 2
    }
    fn legal_actions(&self, _: &u8) -> Vec<u8> {
        vec![0, 1]
    }
    fn chance_outcomes(&self, _: &u8) -> Vec<(u8, f64)> {
        Vec::new()
    }
    fn apply_action(&self, state: &mut u8, _: u8) {
        *state += 1;
    }
    fn returns(&self, _: &u8) -> Vec<f64> {
        vec![0.0]
    }
    fn action_to_string(&self, _: PlayerId, action: u8) -> String {
        action.to_string()
    }
}

/// Evaluator with a hard-coded root prior and neutral values.
pub struct FixedPriorEvaluator {
    pub prior: Vec<(u8, f64)>,
}

impl<G: Game<Action = u8>> Evaluator<G> for FixedPriorEvaluator {
    fn evaluate(&self, game: &G, _: &G::State) -> Result<Vec<f64>, EvaluatorError> {
        Ok(vec![0.0; game.num_players()])
    }

    fn prior(&self, _: &G, _: &G::State) -> Result<Vec<(u8, f64)>, EvaluatorError> {
        Ok(self.prior.clone())
    }
}

/// Very wide two-ply game used to trip the memory ceiling: every decision
/// node offers `width` actions.
pub struct WideGame {
    pub width: u16,
}

impl Game for WideGame {
    type State = u8; // plies played
    type Action = u16;

    fn num_players(&self) -> usize {
        1
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> u8 {
        0
    }
    fn current_player(&self, _: &u8) -> PlayerId {
        PlayerId::Player(0)
    }
    fn is_terminal(&self, state: &u8) -> bool {
        *state >= 2
    }
    fn legal_actions(&self, _: &u8) -> Vec<u16> {
        (0..self.width).collect()
    }
    fn chance_outcomes(&self, _: &u8) -> Vec<(u16, f64)> {
        Vec::new()
    }
    fn apply_action(&self, state: &mut u8, _: u16) {
        *state += 1;
    }
    fn returns(&self, _: &u8) -> Vec<f64> {
        vec![0.0]
    }
    fn action_to_string(&self, _: PlayerId, action: u16) -> String {
        action.to_string()
    }
}

/// Player 0 chooses between a certain draw and a fight the opponent always
/// wins.
pub struct DrawOrLose;

#[derive(Clone, Copy, Default)]
pub struct DrawOrLoseState {
    pub first: Option<u8>,
    pub reply: Option<u8>,
}

impl Game for DrawOrLose {
    type State = DrawOrLoseState;
    type Action = u8;

    fn num_players(&self) -> usize {
        2
    }
    fn max_utility(&self) -> f64 {
        1.0
    }
    fn game_type(&self) -> GameType {
        SEQ_TERMINAL
    }
    fn initial_state(&self) -> DrawOrLoseState {
        DrawOrLoseState::default()
    }
    fn current_player(&self, state: &DrawOrLoseState) -> PlayerId {
        if state.first.is_none() {
            PlayerId::Player(0)
        } else {
            PlayerId::Player(1)
        }
    }
    fn is_terminal(&self, state: &DrawOrLoseState) -> bool {
        state.first == Some(0) || state.reply.is_some()
    }
    fn legal_actions(&self, _: &DrawOrLoseState) -> Vec<u8> {
        vec![0, 1]
    }
    fn chance_outcomes(&self, _: &DrawOrLoseState) -> Vec<(u8, f64)> {
        Vec::new()
    }
    fn apply_action(&self, state: &mut DrawOrLoseState, action: u8) {
        if state.first.is_none() {
            state.first = Some(action);
        } else {
            state.reply = Some(action);
        }
    }
    fn returns(&self, state: &DrawOrLoseState) -> Vec<f64> {
        if state.first == Some(0) {
            vec![0.0, 0.0]
        } else {
            vec![-1.0, 1.0]
        }
    }
    fn action_to_string(&self, _: PlayerId, action: u8) -> String {
        action.to_string()
    }
}
