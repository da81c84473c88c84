//! Rule variants a game can be played with.

use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// What a `DoubleRoll` cell grants the player who stops on it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum DoubleRollPolicy {
    /// Roll again immediately and keep moving within the same turn.
    #[default]
    RollAgain,
    /// Stop on the cell and take one bonus turn next round.
    ExtraTurn,
}

/// How a `GoBack` cell pointing below the start is treated.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum UnderflowPolicy {
    /// Refuse the board at load time.
    #[default]
    Reject,
    /// Send the token back to the start cell.
    Clamp,
}

/// Rules configuration, usually read from a TOML file.
///
/// ```toml
/// double_roll = "extra_turn"
/// go_back_underflow = "clamp"
/// seed = 42
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Getters, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulesConfig {
    /// Behaviour of `DoubleRoll` cells.
    double_roll: DoubleRollPolicy,

    /// Behaviour of `GoBack` cells that would leave the track.
    go_back_underflow: UnderflowPolicy,

    /// Dice seed; `None` draws from OS entropy.
    seed: Option<u64>,
}

impl RulesConfig {
    /// Creates the default rules.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads rules from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading rules from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read rules file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(?config, "Rules loaded");
        Ok(config)
    }

    /// Parses rules from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse rules: {}", e)))
    }

    /// Replaces the double-roll policy.
    pub fn with_double_roll(mut self, policy: DoubleRollPolicy) -> Self {
        self.double_roll = policy;
        self
    }

    /// Replaces the go-back underflow policy.
    pub fn with_go_back_underflow(mut self, policy: UnderflowPolicy) -> Self {
        self.go_back_underflow = policy;
        self
    }

    /// Replaces the dice seed.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}
