//! Difficulty levels and their guess ranges

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Smallest secret on every difficulty.
pub const MIN_SECRET: i64 = 1;

/// Difficulty level; determines the upper end of the secret range.
///
/// Ordering follows the menu (easy < medium < hard), which is also the order
/// records are written in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Secret in 1-50
    Easy,
    /// Secret in 1-100
    #[default]
    Medium,
    /// Secret in 1-200, with hints after the fifth attempt
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Label used in prompts and in the records file.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Largest possible secret.
    pub fn range_max(self) -> i64 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 200,
        }
    }

    /// Whether parity and half-range hints are given.
    pub fn gives_hints(self) -> bool {
        matches!(self, Difficulty::Hard)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "1" | "easy" => Ok(Difficulty::Easy),
            "2" | "medium" => Ok(Difficulty::Medium),
            "3" | "hard" => Ok(Difficulty::Hard),
            _ => Err(crate::Error::ParseDifficulty {
                input: s.to_string(),
                expected: "1/easy, 2/medium, 3/hard".to_string(),
            }),
        }
    }
}
