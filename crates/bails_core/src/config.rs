//! Match format configuration.
//!
//! Loaded from JSON, either directly or from the file named by
//! [`MATCH_CONFIG_PATH_ENV`]. Missing fields fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::{env, fs};

use crate::error::ConfigError;
use crate::models::BALLS_PER_OVER;

pub const MATCH_CONFIG_PATH_ENV: &str = "BAILS_MATCH_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Overs per innings; the innings ends after `total_overs * 6` legal balls.
    pub total_overs: u32,

    /// Wickets that end an innings. `None` lets the innings run to its over quota.
    #[serde(default = "default_all_out_wickets")]
    pub all_out_wickets: Option<u32>,

    /// Name given to players entered without one.
    #[serde(default = "default_unnamed_player")]
    pub unnamed_player: String,
}

fn default_all_out_wickets() -> Option<u32> {
    Some(10)
}

fn default_unnamed_player() -> String {
    "Unnamed player".to_string()
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::with_overs(20)
    }
}

impl MatchConfig {
    pub fn with_overs(total_overs: u32) -> Self {
        Self {
            total_overs,
            all_out_wickets: default_all_out_wickets(),
            unnamed_player: default_unnamed_player(),
        }
    }

    /// Legal deliveries allowed per innings.
    pub fn ball_quota(&self) -> u32 {
        self.total_overs.saturating_mul(BALLS_PER_OVER)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_string(), source })?;
        Self::from_json(&content)
    }

    /// Read the config named by [`MATCH_CONFIG_PATH_ENV`], if that variable is set and non-empty.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        let Ok(path) = env::var(MATCH_CONFIG_PATH_ENV) else {
            return Ok(None);
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }

        Self::from_file(path).map(Some)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_overs == 0 {
            return Err(ConfigError::Validation("total_overs must be at least 1".to_string()));
        }
        if self.total_overs.checked_mul(BALLS_PER_OVER).is_none() {
            return Err(ConfigError::Validation(format!(
                "total_overs must be at most {}",
                u32::MAX / BALLS_PER_OVER
            )));
        }
        if self.all_out_wickets == Some(0) {
            return Err(ConfigError::Validation(
                "all_out_wickets must be at least 1 when set".to_string(),
            ));
        }
        if self.unnamed_player.trim().is_empty() {
            return Err(ConfigError::Validation("unnamed_player must not be blank".to_string()));
        }
        Ok(())
    }
}
