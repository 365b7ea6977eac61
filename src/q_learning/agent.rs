//! The learning opponent
//!
//! Wraps a [`QTable`] with ε-greedy action selection over a guess interval,
//! the one-step Q-learning update, and multiplicative exploration decay.

use std::path::Path;

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    error::Error,
    q_learning::{
        config::OpponentConfig,
        q_table::QTable,
        serialization::{SavedQTable, load_saved},
    },
};

/// Seeded RNG when a seed is given, entropy-seeded otherwise.
pub fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Q-learning opponent (off-policy TD control)
///
/// Exploits with a binary-search midpoint rather than the argmax of the
/// table. The table only shapes play indirectly through which regions get
/// reinforced.
#[derive(Debug, Clone)]
pub struct LearningOpponent {
    config: OpponentConfig,
    q_table: QTable,
    epsilon: f64,
    rng: StdRng,
    rng_seed: Option<u64>,
    table_loaded: bool,
}

impl LearningOpponent {
    /// Create an opponent, loading its table from `config.table_path`.
    ///
    /// A missing or unreadable table file is not an error; the opponent
    /// starts from zeros instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` fails validation.
    pub fn new(config: OpponentConfig) -> Result<Self> {
        config.validate()?;
        let saved = load_saved(&config.table_path, config.table_capacity);
        let table_loaded = saved.is_some();
        let q_table = saved.unwrap_or_else(|| QTable::new(config.table_capacity));
        let mut opponent = Self::assemble(config, q_table);
        opponent.table_loaded = table_loaded;
        Ok(opponent)
    }

    /// Create an opponent around an existing table, skipping the filesystem.
    pub fn with_table(config: OpponentConfig, q_table: QTable) -> Result<Self> {
        config.validate()?;
        if q_table.capacity() != config.table_capacity {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "table capacity {} does not match configured capacity {}",
                    q_table.capacity(),
                    config.table_capacity
                ),
            });
        }
        Ok(Self::assemble(config, q_table))
    }

    fn assemble(config: OpponentConfig, q_table: QTable) -> Self {
        Self {
            epsilon: config.exploration_rate,
            config,
            q_table,
            rng: build_rng(None),
            rng_seed: None,
            table_loaded: false,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
        self
    }

    /// ε-greedy guess within `[low, high]`.
    ///
    /// Explores with a uniform guess with probability ε, otherwise returns
    /// the floor midpoint `(low + high) / 2`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInterval`] when `low > high`.
    pub fn choose_action(&mut self, low: i64, high: i64) -> Result<i64> {
        if low > high {
            return Err(Error::EmptyInterval { low, high });
        }

        let action = if self.rng.random::<f64>() < self.epsilon {
            self.rng.random_range(low..=high)
        } else {
            // Widened so domains near the i64 limits cannot overflow
            let midpoint = (i128::from(low) + i128::from(high)).div_euclid(2);
            i64::try_from(midpoint).unwrap_or(low)
        };
        tracing::debug!(
            low,
            high,
            action,
            epsilon = self.epsilon,
            "opponent chose action"
        );
        Ok(action)
    }

    /// One-step Q-learning update for a raw `(state, action, next_state)`.
    ///
    /// Indices are `value - min_value`, clamped into the table. Values below
    /// `min_value` map to index 0.
    pub fn update(&mut self, state: i64, action: i64, reward: f64, next_state: i64) {
        let state_index = self.index_of(state);
        let action_index = self.index_of(action);
        let next_state_index = self.index_of(next_state);

        self.q_table.q_learning_update(
            state_index,
            action_index,
            reward,
            next_state_index,
            self.config.learning_rate,
            self.config.discount_factor,
        );
    }

    /// Decay epsilon after a guess
    pub fn decay(&mut self) {
        self.epsilon *= self.config.exploration_decay;
    }

    /// Persist the table to the configured path, overwriting it.
    pub fn save(&self) -> Result<()> {
        self.save_to(&self.config.table_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        SavedQTable::new(self.q_table.clone()).save_to_file(path)?;
        tracing::info!(path = %path.display(), "Q-table saved");
        Ok(())
    }

    /// Table index for a raw state or action value.
    pub fn index_of(&self, value: i64) -> usize {
        let offset = usize::try_from(value.saturating_sub(self.config.min_value)).unwrap_or(0);
        self.q_table.clamp_index(offset)
    }

    /// Q-value for raw state and action values.
    pub fn value(&self, state: i64, action: i64) -> f64 {
        self.q_table.get(self.index_of(state), self.index_of(action))
    }

    pub fn exploration_rate(&self) -> f64 {
        self.epsilon
    }

    /// Override the current exploration rate, e.g. to force pure exploitation.
    pub fn set_exploration_rate(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    pub fn config(&self) -> &OpponentConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Whether construction picked up a saved table rather than zeros.
    pub fn table_loaded(&self) -> bool {
        self.table_loaded
    }

    /// Forget everything learned and restore ε₀.
    pub fn reset(&mut self) {
        self.q_table.reset();
        self.epsilon = self.config.exploration_rate;
        self.rng = build_rng(self.rng_seed);
    }
}
