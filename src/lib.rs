//! Number-guessing game with a Q-learning opponent
//!
//! This crate provides:
//! - The guessing game itself: difficulties, sessions, hints and records
//! - A learning opponent with a fixed-capacity Q-table, ε-greedy
//!   binary-search guessing and online Q-learning updates
//! - Persistence for the Q-table (MessagePack) and records (plain text)
//! - Self-play training and the `numguess` CLI

pub mod adapters;
pub mod cli;
pub mod error;
pub mod game;
pub mod logging;
pub mod ports;
pub mod q_learning;
pub mod training;

pub use error::{Error, Result};
pub use game::{Difficulty, GameSession, GuessOutcome, Records};
pub use q_learning::{LearningOpponent, OpponentConfig, QTable};
