//! Q-learning opponent for the guessing game
//!
//! The opponent keeps a fixed-capacity Q-table indexed by
//! `(state - min_value, action - min_value)` and learns online with the
//! one-step Q-learning rule:
//!
//! ```text
//! Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
//! ```
//!
//! Action selection is ε-greedy with a binary-search fallback. With
//! probability ε the opponent guesses uniformly inside the current interval;
//! otherwise it guesses the midpoint. ε decays multiplicatively after every
//! guess.
//!
//! ## Usage Example
//!
//! ```no_run
//! use numguess::q_learning::{LearningOpponent, OpponentConfig};
//!
//! let config = OpponentConfig::new(1, 100)
//!     .with_exploration_rate(0.0)
//!     .with_table_path("q_table.msgpack");
//! let mut opponent = LearningOpponent::new(config)?;
//!
//! let guess = opponent.choose_action(1, 100)?;
//! assert_eq!(guess, 50);
//! opponent.update(guess, guess, -1.0, guess);
//! opponent.decay();
//! opponent.save()?;
//! # Ok::<(), numguess::Error>(())
//! ```

pub mod agent;
pub mod config;
pub mod q_table;
pub mod serialization;

// Public re-exports
pub use agent::{LearningOpponent, build_rng};
pub use config::OpponentConfig;
pub use q_table::QTable;
pub use serialization::SavedQTable;
