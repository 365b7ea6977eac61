//! Best-attempt records per difficulty and player

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Result, error::Error, game::difficulty::Difficulty};

/// Separates the fields of a records line.
const FIELD_SEPARATOR: char = ':';

/// Trim a player name and check it can be stored as a records entry.
///
/// # Errors
///
/// Returns [`Error::InvalidPlayerName`] for an empty name or one containing
/// the field separator.
pub fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    let reason = if trimmed.is_empty() {
        "cannot be empty"
    } else if trimmed.contains(FIELD_SEPARATOR) {
        "cannot contain ':'"
    } else {
        return Ok(trimmed.to_string());
    };
    Err(Error::InvalidPlayerName {
        name: name.to_string(),
        reason,
    })
}

/// Lowest attempt count per (difficulty, player).
///
/// Text form is one `<difficulty>: <name>: <attempts>` line per entry,
/// grouped by difficulty in menu order and sorted by attempts within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Records {
    entries: BTreeMap<Difficulty, BTreeMap<String, u32>>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished game. Keeps the lower of the stored and the new
    /// attempt count and returns whether the stored value changed.
    pub fn submit(&mut self, difficulty: Difficulty, name: &str, attempts: u32) -> bool {
        let by_name = self.entries.entry(difficulty).or_default();
        match by_name.get(name) {
            Some(&best) if best <= attempts => false,
            _ => {
                by_name.insert(name.to_string(), attempts);
                true
            }
        }
    }

    /// Best attempt count for a player, if any.
    pub fn best(&self, difficulty: Difficulty, name: &str) -> Option<u32> {
        self.entries
            .get(&difficulty)
            .and_then(|by_name| by_name.get(name))
            .copied()
    }

    /// Entries for one difficulty, fewest attempts first; ties by name.
    pub fn leaderboard(&self, difficulty: Difficulty) -> Vec<(&str, u32)> {
        let mut board: Vec<(&str, u32)> = self
            .entries
            .get(&difficulty)
            .map(|by_name| {
                by_name
                    .iter()
                    .map(|(name, &attempts)| (name.as_str(), attempts))
                    .collect()
            })
            .unwrap_or_default();
        board.sort_by(|(name_a, a), (name_b, b)| a.cmp(b).then_with(|| name_a.cmp(name_b)));
        board
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse the text form. Lines that do not split into exactly three
    /// `": "`-separated fields, or carry an unknown difficulty or a
    /// non-numeric count, are skipped.
    pub fn parse(content: &str) -> Self {
        let mut records = Self::new();
        for line in content.lines() {
            let parts: Vec<&str> = line.split(": ").collect();
            let [difficulty, name, attempts] = parts.as_slice() else {
                continue;
            };
            let (Ok(difficulty), Ok(attempts)) =
                (difficulty.parse::<Difficulty>(), attempts.trim().parse::<u32>())
            else {
                tracing::debug!(line, "skipping malformed record line");
                continue;
            };
            records.submit(difficulty, name, attempts);
        }
        records
    }

    /// Render the text form, without a trailing newline.
    pub fn to_text(&self) -> String {
        Difficulty::ALL
            .iter()
            .flat_map(|&difficulty| {
                self.leaderboard(difficulty)
                    .into_iter()
                    .map(move |(name, attempts)| format!("{difficulty}: {name}: {attempts}"))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("  ada ").unwrap(), "ada");
        assert!(matches!(
            validate_name("   "),
            Err(Error::InvalidPlayerName {
                reason: "cannot be empty",
                ..
            })
        ));
        assert!(matches!(
            validate_name("al: x"),
            Err(Error::InvalidPlayerName {
                reason: "cannot contain ':'",
                ..
            })
        ));
    }

    #[test]
    fn test_submit_keeps_lowest() {
        let mut records = Records::new();
        assert!(records.submit(Difficulty::Easy, "ada", 7));
        assert!(!records.submit(Difficulty::Easy, "ada", 9));
        assert!(!records.submit(Difficulty::Easy, "ada", 7));
        assert!(records.submit(Difficulty::Easy, "ada", 4));
        assert_eq!(records.best(Difficulty::Easy, "ada"), Some(4));
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_difficulties_are_independent() {
        let mut records = Records::new();
        records.submit(Difficulty::Easy, "ada", 3);
        records.submit(Difficulty::Hard, "ada", 12);
        assert_eq!(records.best(Difficulty::Easy, "ada"), Some(3));
        assert_eq!(records.best(Difficulty::Hard, "ada"), Some(12));
        assert_eq!(records.best(Difficulty::Medium, "ada"), None);
    }

    #[test]
    fn test_leaderboard_sorted_by_attempts_then_name() {
        let mut records = Records::new();
        records.submit(Difficulty::Medium, "zed", 5);
        records.submit(Difficulty::Medium, "amy", 5);
        records.submit(Difficulty::Medium, "bob", 2);
        assert_eq!(
            records.leaderboard(Difficulty::Medium),
            vec![("bob", 2), ("amy", 5), ("zed", 5)]
        );
        assert!(records.leaderboard(Difficulty::Easy).is_empty());
    }

    #[test]
    fn test_text_groups_by_difficulty() {
        let mut records = Records::new();
        records.submit(Difficulty::Hard, "cy", 9);
        records.submit(Difficulty::Easy, "bo", 6);
        records.submit(Difficulty::Easy, "al", 3);
        assert_eq!(records.to_text(), "easy: al: 3\neasy: bo: 6\nhard: cy: 9");
    }

    #[test]
    fn test_parse_skips_malformed_lines() {
        let content = "easy: al: 3\nnot a record\nlegendary: bo: 1\nmedium: cy: many\nhard: dee: 8\n";
        let records = Records::parse(content);
        assert_eq!(records.len(), 2);
        assert_eq!(records.best(Difficulty::Easy, "al"), Some(3));
        assert_eq!(records.best(Difficulty::Hard, "dee"), Some(8));
    }

    #[test]
    fn test_parse_keeps_lowest_duplicate() {
        let records = Records::parse("easy: al: 8\neasy: al: 3\neasy: al: 5");
        assert_eq!(records.best(Difficulty::Easy, "al"), Some(3));
    }

    #[test]
    fn test_text_roundtrip() {
        let mut records = Records::new();
        records.submit(Difficulty::Medium, "player one", 6);
        records.submit(Difficulty::Hard, "p2", 11);
        assert_eq!(Records::parse(&records.to_text()), records);
    }
}
