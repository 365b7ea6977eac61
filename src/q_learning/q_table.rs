//! Fixed-capacity Q-table for the learning opponent

use serde::{Deserialize, Serialize};

/// Square Q-table mapping `(state_index, action_index)` to a Q-value.
///
/// Values are stored row-major in a single buffer. Every accessor clamps
/// indices to `capacity - 1`, so guess domains wider than the table share
/// the last row/column instead of panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    /// Side length of the table
    capacity: usize,
    /// Q-values, `capacity * capacity` entries, row-major
    values: Vec<f64>,
}

impl QTable {
    /// Create a zero-initialized table of `capacity × capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: vec![0.0; capacity * capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Clamp an index to the last valid row/column.
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.capacity.saturating_sub(1))
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.values[self.offset(state, action)]
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        let offset = self.offset(state, action);
        self.values[offset] = value;
    }

    /// All action values of one state.
    pub fn row(&self, state: usize) -> &[f64] {
        let start = self.clamp_index(state) * self.capacity;
        &self.values[start..start + self.capacity]
    }

    /// Get maximum Q-value over every action of a state
    pub fn max_q(&self, state: usize) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    pub fn q_learning_update(
        &mut self,
        state: usize,
        action: usize,
        reward: f64,
        next_state: usize,
        learning_rate: f64,
        discount_factor: f64,
    ) {
        let current_q = self.get(state, action);
        let max_next_q = self.max_q(next_state);
        let td_target = reward + discount_factor * max_next_q;
        let td_error = td_target - current_q;
        self.set(state, action, current_q + learning_rate * td_error);
    }

    /// Number of entries that hold a non-zero value.
    pub fn visited(&self) -> usize {
        self.values.iter().filter(|value| **value != 0.0).count()
    }

    /// Whether the value buffer matches the declared capacity.
    ///
    /// Only tables that came off disk can fail this.
    pub fn is_well_formed(&self) -> bool {
        self.capacity > 0 && self.values.len() == self.capacity * self.capacity
    }

    /// Reset all Q-values to zero.
    pub fn reset(&mut self) {
        self.values.iter_mut().for_each(|value| *value = 0.0);
    }

    fn offset(&self, state: usize, action: usize) -> usize {
        self.clamp_index(state) * self.capacity + self.clamp_index(action)
    }
}
