//! Core traits and types for turn-based game simulation
//!
//! This crate provides the fundamental abstractions consumed by the search
//! crates:
//! - `Game`: typed trait for sequential games with any fixed number of
//!   players and optional chance events
//! - `PlayerId`: who acts at a state (a seated player or the chance
//!   pseudo-player)
//! - `GameType`: coarse classification (dynamics, reward model) used by
//!   agents to validate that a game is supported

pub mod game;
pub mod player;

// Re-export main types for convenience
pub use game::{Dynamics, Game, GameType, RewardModel};
pub use player::PlayerId;
