//! Guess/feedback loop state

use std::{cmp::Ordering, fmt};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::Error,
    game::difficulty::{Difficulty, MIN_SECRET},
    q_learning::LearningOpponent,
};

/// Reward handed to the opponent when its guess hits the secret.
pub const SUCCESS_REWARD: f64 = 100.0;
/// Reward handed to the opponent for every miss.
pub const MISS_REWARD: f64 = -1.0;
/// Player attempt after which hard-mode hints are shown.
pub const HINT_ATTEMPT: u32 = 5;

/// Feedback for a single guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// The guess hit the secret after `attempts` tries
    Correct { attempts: u32 },
    /// The guess is below the secret
    TooLow,
    /// The guess is above the secret
    TooHigh,
}

impl GuessOutcome {
    pub fn is_correct(self) -> bool {
        matches!(self, GuessOutcome::Correct { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Opponent,
}

/// Result of one opponent round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpponentTurn {
    pub guess: i64,
    pub outcome: GuessOutcome,
    pub attempt: u32,
    pub reward: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hint {
    Even,
    Odd,
    AtMost(i64),
    Above(i64),
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Even => write!(f, "Hint: The secret number is even."),
            Hint::Odd => write!(f, "Hint: The secret number is odd."),
            Hint::AtMost(bound) => write!(
                f,
                "Hint: The secret number is less than or equal to {bound}."
            ),
            Hint::Above(bound) => write!(f, "Hint: The secret number is greater than {bound}."),
        }
    }
}

/// One game: a secret, the shrinking interval of plausible values, and the
/// attempt counters of both sides.
///
/// The interval `[low, high]` only ever shrinks and always contains the
/// secret, so it is never empty while the game is running.
#[derive(Debug, Clone)]
pub struct GameSession {
    difficulty: Difficulty,
    secret: i64,
    low: i64,
    high: i64,
    attempts: u32,
    opponent_attempts: u32,
    versus: bool,
    winner: Option<Winner>,
}

impl GameSession {
    /// Start a session with a secret drawn uniformly from the difficulty range.
    pub fn new<R: Rng>(difficulty: Difficulty, versus: bool, rng: &mut R) -> Self {
        let secret = rng.random_range(MIN_SECRET..=difficulty.range_max());
        Self::build(difficulty, secret, versus)
    }

    /// Start a session with a known secret.
    ///
    /// # Errors
    ///
    /// Returns [`Error::GuessOutOfRange`] if the secret lies outside the
    /// difficulty range.
    pub fn with_secret(difficulty: Difficulty, secret: i64, versus: bool) -> Result<Self> {
        check_range(difficulty, secret)?;
        Ok(Self::build(difficulty, secret, versus))
    }

    fn build(difficulty: Difficulty, secret: i64, versus: bool) -> Self {
        Self {
            difficulty,
            secret,
            low: MIN_SECRET,
            high: difficulty.range_max(),
            attempts: 0,
            opponent_attempts: 0,
            versus,
            winner: None,
        }
    }

    /// Score a player guess and narrow the interval.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] once either side has won, and
    /// [`Error::GuessOutOfRange`] for guesses outside the difficulty range.
    /// Rejected guesses do not count as attempts.
    pub fn submit_guess(&mut self, guess: i64) -> Result<GuessOutcome> {
        if self.winner.is_some() {
            return Err(Error::GameOver);
        }
        check_range(self.difficulty, guess)?;

        self.attempts += 1;
        let outcome = self.evaluate(guess, self.attempts);
        if outcome.is_correct() {
            self.winner = Some(Winner::Player);
        }
        Ok(outcome)
    }

    /// Let the opponent guess once, then feed the result back to it.
    ///
    /// The update uses the guess as state, action and next state alike
    /// (`update(guess, guess, reward, guess)`), followed by one decay step.
    pub fn opponent_turn(&mut self, opponent: &mut LearningOpponent) -> Result<OpponentTurn> {
        if self.winner.is_some() {
            return Err(Error::GameOver);
        }

        let guess = opponent.choose_action(self.low, self.high)?;
        self.opponent_attempts += 1;
        let outcome = self.evaluate(guess, self.opponent_attempts);

        let reward = if outcome.is_correct() {
            SUCCESS_REWARD
        } else {
            MISS_REWARD
        };
        opponent.update(guess, guess, reward, guess);
        opponent.decay();

        if outcome.is_correct() {
            self.winner = Some(Winner::Opponent);
        }
        tracing::debug!(guess, ?outcome, low = self.low, high = self.high, "opponent turn");

        Ok(OpponentTurn {
            guess,
            outcome,
            attempt: self.opponent_attempts,
            reward,
        })
    }

    /// Hints due after the current player attempt; empty unless this is the
    /// fifth attempt on a hinting difficulty.
    pub fn hints(&self) -> Vec<Hint> {
        if !self.difficulty.gives_hints() || self.attempts != HINT_ATTEMPT {
            return Vec::new();
        }

        let half = self.difficulty.range_max() / 2;
        let parity = if self.secret % 2 == 0 {
            Hint::Even
        } else {
            Hint::Odd
        };
        let side = if self.secret <= half {
            Hint::AtMost(half)
        } else {
            Hint::Above(half)
        };
        vec![parity, side]
    }

    fn evaluate(&mut self, guess: i64, attempts: u32) -> GuessOutcome {
        match guess.cmp(&self.secret) {
            Ordering::Equal => GuessOutcome::Correct { attempts },
            Ordering::Less => {
                self.low = self.low.max(guess + 1);
                GuessOutcome::TooLow
            }
            Ordering::Greater => {
                self.high = self.high.min(guess - 1);
                GuessOutcome::TooHigh
            }
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn secret(&self) -> i64 {
        self.secret
    }

    /// Current plausible interval `(low, high)`.
    pub fn interval(&self) -> (i64, i64) {
        (self.low, self.high)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn opponent_attempts(&self) -> u32 {
        self.opponent_attempts
    }

    pub fn is_versus(&self) -> bool {
        self.versus
    }

    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

fn check_range(difficulty: Difficulty, value: i64) -> Result<()> {
    let max = difficulty.range_max();
    if (MIN_SECRET..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::GuessOutOfRange {
            guess: value,
            min: MIN_SECRET,
            max,
        })
    }
}
