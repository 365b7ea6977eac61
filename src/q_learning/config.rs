//! Configuration for the learning opponent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error};

/// Default step size α.
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default discount factor γ.
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;
/// Default initial exploration rate ε₀.
pub const DEFAULT_EXPLORATION_RATE: f64 = 1.0;
/// Default multiplicative decay δ applied to ε after every guess.
pub const DEFAULT_EXPLORATION_DECAY: f64 = 0.99;
/// Default table side length; covers the hard difficulty range.
pub const DEFAULT_TABLE_CAPACITY: usize = 250;
/// Default location of the persisted table.
pub const DEFAULT_TABLE_PATH: &str = "q_table.msgpack";

/// Parameters of a [`LearningOpponent`](crate::q_learning::LearningOpponent).
///
/// Builder-style: start from [`OpponentConfig::new`] with the guess domain
/// and override whatever differs from the defaults.
///
/// # Examples
///
/// ```
/// use numguess::q_learning::OpponentConfig;
///
/// let config = OpponentConfig::new(1, 200)
///     .with_learning_rate(0.2)
///     .with_exploration_decay(0.95);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentConfig {
    /// Smallest guessable value; maps to table index 0
    pub min_value: i64,
    /// Largest guessable value
    pub max_value: i64,
    /// Learning rate α in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ in (0, 1]
    pub discount_factor: f64,
    /// Initial exploration rate ε₀ in [0, 1]
    pub exploration_rate: f64,
    /// Exploration decay δ in (0, 1]
    pub exploration_decay: f64,
    /// Side length of the square Q-table
    pub table_capacity: usize,
    /// Where the Q-table is loaded from and saved to
    pub table_path: PathBuf,
}

impl OpponentConfig {
    /// Create a configuration for the guess domain `[min_value, max_value]`
    /// with default learning parameters.
    pub fn new(min_value: i64, max_value: i64) -> Self {
        Self {
            min_value,
            max_value,
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            exploration_decay: DEFAULT_EXPLORATION_DECAY,
            table_capacity: DEFAULT_TABLE_CAPACITY,
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_exploration_rate(mut self, exploration_rate: f64) -> Self {
        self.exploration_rate = exploration_rate;
        self
    }

    pub fn with_exploration_decay(mut self, exploration_decay: f64) -> Self {
        self.exploration_decay = exploration_decay;
        self
    }

    pub fn with_table_capacity(mut self, table_capacity: usize) -> Self {
        self.table_capacity = table_capacity;
        self
    }

    pub fn with_table_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.table_path = path.as_ref().to_path_buf();
        self
    }

    /// Check parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when the domain is empty, the
    /// table has zero capacity, or a rate falls outside its range.
    pub fn validate(&self) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(invalid(format!(
                "min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            )));
        }
        if self.table_capacity == 0 {
            return Err(invalid("table_capacity must be positive".to_string()));
        }
        check_half_open("learning_rate", self.learning_rate)?;
        check_half_open("discount_factor", self.discount_factor)?;
        check_half_open("exploration_decay", self.exploration_decay)?;
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(invalid(format!(
                "exploration_rate {} must lie in [0, 1]",
                self.exploration_rate
            )));
        }
        Ok(())
    }
}

fn check_half_open(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} {value} must lie in (0, 1]")))
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidConfiguration { message }
}
