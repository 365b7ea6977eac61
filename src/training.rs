//! Offline self-play training for the learning opponent
//!
//! The opponent plays whole games alone: a secret is drawn, and the opponent
//! keeps guessing through [`GameSession::opponent_turn`] until it hits. Every
//! guess goes through the same update/decay path as in a live versus game.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    game::{Difficulty, GameSession},
    q_learning::LearningOpponent,
};

/// Training configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of self-play games
    pub num_games: usize,

    /// Difficulty the secrets are drawn from
    pub difficulty: Difficulty,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            num_games: 500,
            difficulty: Difficulty::default(),
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total games played
    pub total_games: usize,

    /// Guesses summed over all games
    pub total_guesses: u64,

    /// Mean guesses per game
    pub mean_guesses: f64,

    /// Fewest guesses in a single game
    pub best_guesses: Option<u32>,

    /// Most guesses in a single game
    pub worst_guesses: Option<u32>,

    /// Exploration rate after the last game
    pub final_exploration_rate: f64,

    /// Table entries holding a non-zero value
    pub visited_entries: usize,
}

impl TrainingResult {
    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

/// Play `config.num_games` self-play games.
///
/// `on_game` is called after each game with the 1-based game number and the
/// number of guesses that game took.
pub fn self_play<R, F>(
    opponent: &mut LearningOpponent,
    config: &TrainingConfig,
    rng: &mut R,
    mut on_game: F,
) -> Result<TrainingResult>
where
    R: Rng,
    F: FnMut(usize, u32),
{
    let mut total_guesses = 0u64;
    let mut best: Option<u32> = None;
    let mut worst: Option<u32> = None;

    for game_num in 1..=config.num_games {
        let mut session = GameSession::new(config.difficulty, true, rng);
        while !session.is_over() {
            session.opponent_turn(opponent)?;
        }

        let guesses = session.opponent_attempts();
        total_guesses += u64::from(guesses);
        best = Some(best.map_or(guesses, |b| b.min(guesses)));
        worst = Some(worst.map_or(guesses, |w| w.max(guesses)));
        on_game(game_num, guesses);
    }

    let mean_guesses = if config.num_games > 0 {
        total_guesses as f64 / config.num_games as f64
    } else {
        0.0
    };

    tracing::info!(
        games = config.num_games,
        mean_guesses,
        epsilon = opponent.exploration_rate(),
        "self-play finished"
    );

    Ok(TrainingResult {
        total_games: config.num_games,
        total_guesses,
        mean_guesses,
        best_guesses: best,
        worst_guesses: worst,
        final_exploration_rate: opponent.exploration_rate(),
        visited_entries: opponent.q_table().visited(),
    })
}
