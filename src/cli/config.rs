//! Shared configuration types for CLI commands

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    adapters::text_repository::DEFAULT_RECORDS_PATH,
    error::Error,
    game::{Difficulty, difficulty::MIN_SECRET},
    q_learning::{
        OpponentConfig,
        config::{
            DEFAULT_DISCOUNT_FACTOR, DEFAULT_EXPLORATION_DECAY, DEFAULT_EXPLORATION_RATE,
            DEFAULT_LEARNING_RATE, DEFAULT_TABLE_CAPACITY, DEFAULT_TABLE_PATH,
        },
    },
};

/// Learning parameters applied to every opponent the CLI creates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    pub learning_rate: f64,
    pub discount_factor: f64,
    pub exploration_rate: f64,
    pub exploration_decay: f64,
    pub table_capacity: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            exploration_rate: DEFAULT_EXPLORATION_RATE,
            exploration_decay: DEFAULT_EXPLORATION_DECAY,
            table_capacity: DEFAULT_TABLE_CAPACITY,
        }
    }
}

/// Game configuration, loadable from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Q-table location
    pub table_path: PathBuf,

    /// Records file location
    pub records_path: PathBuf,

    /// Random seed for reproducibility
    pub seed: Option<u64>,

    /// Delay between characters of the victory message
    pub typewriter_delay_ms: u64,

    /// Delay between letters of the easter egg
    pub easter_egg_delay_ms: u64,

    pub learning: LearningConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            table_path: PathBuf::from(DEFAULT_TABLE_PATH),
            records_path: PathBuf::from(DEFAULT_RECORDS_PATH),
            seed: None,
            typewriter_delay_ms: 100,
            easter_egg_delay_ms: 500,
            learning: LearningConfig::default(),
        }
    }
}

impl GameConfig {
    /// Load configuration from a JSON file; absent keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open config file {path:?}"),
            source,
        })?;
        let config = serde_json::from_reader(BufReader::new(file))?;
        Ok(config)
    }

    /// Opponent configuration for the guess domain of `difficulty`.
    pub fn opponent_config(&self, difficulty: Difficulty) -> OpponentConfig {
        OpponentConfig::new(MIN_SECRET, difficulty.range_max())
            .with_learning_rate(self.learning.learning_rate)
            .with_discount_factor(self.learning.discount_factor)
            .with_exploration_rate(self.learning.exploration_rate)
            .with_exploration_decay(self.learning.exploration_decay)
            .with_table_capacity(self.learning.table_capacity)
            .with_table_path(&self.table_path)
    }

    pub fn typewriter_delay(&self) -> Duration {
        Duration::from_millis(self.typewriter_delay_ms)
    }

    pub fn easter_egg_delay(&self) -> Duration {
        Duration::from_millis(self.easter_egg_delay_ms)
    }
}

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// JSON configuration file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Q-table file (overrides the configuration file)
    #[arg(long)]
    pub table: Option<PathBuf>,

    /// Records file (overrides the configuration file)
    #[arg(long)]
    pub records: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

impl CommonArgs {
    /// Build the effective configuration: file values, then flag overrides.
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(table) = &self.table {
            config.table_path = table.clone();
        }
        if let Some(records) = &self.records {
            config.records_path = records.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.table_path, PathBuf::from("q_table.msgpack"));
        assert_eq!(config.records_path, PathBuf::from("records.txt"));
        assert_eq!(config.typewriter_delay(), Duration::from_millis(100));
        assert_eq!(config.learning, LearningConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("numguess.json");
        fs::write(
            &path,
            r#"{ "seed": 7, "learning": { "learning_rate": 0.25 } }"#,
        )
        .expect("Failed to write config");

        let config = GameConfig::load(&path).expect("Failed to load config");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.learning.learning_rate, 0.25);
        assert_eq!(config.learning.discount_factor, 0.9);
        assert_eq!(config.records_path, PathBuf::from("records.txt"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ seed: ").expect("Failed to write config");
        assert!(matches!(
            GameConfig::load(&path),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let args = CommonArgs {
            config: None,
            table: Some(PathBuf::from("custom.msgpack")),
            records: None,
            seed: Some(3),
        };
        let config = args.resolve().expect("Failed to resolve");
        assert_eq!(config.table_path, PathBuf::from("custom.msgpack"));
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_opponent_config_spans_difficulty() {
        let config = GameConfig::default().opponent_config(Difficulty::Hard);
        assert_eq!(config.min_value, 1);
        assert_eq!(config.max_value, 200);
        assert_eq!(config.table_path, PathBuf::from("q_table.msgpack"));
        assert!(config.validate().is_ok());
    }
}
