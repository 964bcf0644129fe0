use crate::catalog::StrategyFilter;
use crate::game::Game;
use crate::roster::{EXTRA_SELECTION_INDICES, SELECTION_HEAD};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which entries of the filtered catalog make it into the roster.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SelectionPolicy {
    /// Number of leading entries taken in catalog order
    pub head: usize,
    /// 0-based indices into the filtered list appended after the head, in order
    pub extra_indices: Vec<usize>,
}

impl SelectionPolicy {
    /// Minimum length of the filtered list this policy can be applied to.
    pub fn required_len(&self) -> usize {
        let extra = self.extra_indices.iter().max().map_or(0, |i| i + 1);
        self.head.max(extra)
    }

    pub fn len(&self) -> usize {
        self.head + self.extra_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            head: SELECTION_HEAD,
            extra_indices: EXTRA_SELECTION_INDICES.to_vec(),
        }
    }
}

/// The two payoff matrices the roster is paired with.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GamesConfig {
    pub stag: Game,
    pub high_temptation: Game,
}

impl Default for GamesConfig {
    fn default() -> Self {
        Self {
            stag: Game::stag(),
            high_temptation: Game::high_temptation(),
        }
    }
}

/// Roster configuration. Every section is optional in the TOML file and
/// falls back to the built-in constants.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub filter: StrategyFilter,
    pub selection: SelectionPolicy,
    pub games: GamesConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Checks the filter bounds and the selection policy for consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.filter.min_memory_depth > self.filter.max_memory_depth {
            return Err(ConfigError::Invalid(format!(
                "min_memory_depth ({}) is greater than max_memory_depth ({})",
                self.filter.min_memory_depth, self.filter.max_memory_depth
            )));
        }

        if self.selection.is_empty() {
            return Err(ConfigError::Invalid(
                "selection must pick at least one strategy".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for index in &self.selection.extra_indices {
            if !seen.insert(*index) {
                return Err(ConfigError::Invalid(format!(
                    "extra index {} is listed more than once",
                    index
                )));
            }
            if *index < self.selection.head {
                return Err(ConfigError::Invalid(format!(
                    "extra index {} is already covered by the first {} entries",
                    index, self.selection.head
                )));
            }
        }

        Ok(())
    }
}
