//! # Bot Configuration
//!
//! JSON configuration for the round orchestrator. Every field is optional;
//! an empty object gives the default bot.
//!
//! ```rust
//! use triboard::arena::agent::BotConfig;
//!
//! let config = BotConfig::from_json(r#"{"name": "tri", "seed": 7}"#).unwrap();
//! assert_eq!("tri", config.name);
//! assert_eq!(Some(7), config.seed);
//! ```
//!
//! ## Fields
//!
//! - `name` - name reported by the bot
//! - `allocation` - `"greedy"` (default) or `"exhaustive"`
//! - `equity` - where board equity comes from, see [`EquityMode`]
//! - `policy` - betting constants, see [`PolicyConfig`]
//! - `seed` - fixed seed for the random source
//! - `pair_strengths` - a 13x13 symmetric table replacing the built-in one
//!
//! ### Monte Carlo Equity
//! ```json
//! {
//!   "equity": {"type": "monte_carlo", "trials": 200, "clock_floor_secs": 2.0}
//! }
//! ```

use std::{io::ErrorKind, path::Path};

use serde::{Deserialize, Serialize};

use crate::arena::errors::BotConfigError;
use crate::arena::policy::PolicyConfig;
use crate::holdem::{AllocationStrategy, PairStrengthTable};

/// Where the per-board equity handed to the betting policy comes from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EquityMode {
    /// Use each hand's pair strength for the whole round.
    #[default]
    Allocation,
    /// Simulate each board once per street.
    MonteCarlo {
        /// Trials per estimate
        #[serde(default = "default_trials")]
        trials: usize,
        /// Below this many seconds on the game clock, stop simulating and
        /// reuse the last estimate.
        #[serde(default = "default_clock_floor_secs")]
        clock_floor_secs: f32,
    },
}

fn default_trials() -> usize {
    100
}

fn default_clock_floor_secs() -> f32 {
    5.0
}

fn default_name() -> String {
    "triboard".to_string()
}

/// Configuration for [`RoundOrchestrator`](super::RoundOrchestrator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub allocation: AllocationStrategy,
    #[serde(default)]
    pub equity: EquityMode,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub pair_strengths: Option<PairStrengthTable>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            allocation: AllocationStrategy::default(),
            equity: EquityMode::default(),
            policy: PolicyConfig::default(),
            seed: None,
            pair_strengths: None,
        }
    }
}

impl BotConfig {
    /// Validate that the configuration is correct
    pub fn validate(&self) -> Result<(), BotConfigError> {
        if self.name.trim().is_empty() {
            return Err(BotConfigError::ValidationError(
                "name must not be empty".to_string(),
            ));
        }
        if let EquityMode::MonteCarlo {
            trials,
            clock_floor_secs,
        } = self.equity
        {
            if trials == 0 {
                return Err(BotConfigError::InvalidTrials);
            }
            if !clock_floor_secs.is_finite() || clock_floor_secs < 0.0 {
                return Err(BotConfigError::ValidationError(format!(
                    "clock_floor_secs must be a non-negative number, got {clock_floor_secs}"
                )));
            }
        }
        self.policy.validate()
    }

    /// Create from a JSON string
    pub fn from_json(json: &str) -> Result<Self, BotConfigError> {
        let config: BotConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Create from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BotConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to parse as file path first, then as inline JSON
    pub fn from_str_or_file(input: &str) -> Result<Self, BotConfigError> {
        match Self::from_file(input) {
            Ok(config) => Ok(config),
            Err(BotConfigError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
                Self::from_json(input)
            }
            Err(err) => Err(err),
        }
    }
}
