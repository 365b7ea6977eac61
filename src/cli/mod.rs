//! CLI infrastructure for the guessing game
//!
//! This module provides the interactive game, offline training of the AI
//! opponent, and the records listing.

pub mod commands;
pub mod config;
pub mod output;

pub use crate::q_learning::build_rng;
